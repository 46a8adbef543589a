//! Nan-aware descriptive statistics.
//!
//! Missing samples are encoded as `f64::NAN` and are skipped by every
//! reduction here. An input without any finite sample reduces to NaN.

use ndarray::Array1;

/// Mean of the finite values, NaN if there are none.
pub fn nanmean<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in values {
        if v.is_finite() {
            sum += v;
            count += 1;
        }
    }
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// Population standard deviation (ddof = 0) of the finite values, NaN if
/// there are none.
pub fn nanstd<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
    I::IntoIter: Clone,
{
    let iter = values.into_iter();
    let mean = nanmean(iter.clone());
    if mean.is_nan() {
        return f64::NAN;
    }

    let mut sum_sq = 0.0;
    let mut count = 0usize;
    for v in iter {
        if v.is_finite() {
            let d = v - mean;
            sum_sq += d * d;
            count += 1;
        }
    }
    (sum_sq / count as f64).sqrt()
}

/// Z-scores of a 1-D signal, computed against the nan-omitting mean and
/// population standard deviation.
///
/// Missing samples stay NaN. If the finite part has zero variance (or is
/// empty) every z-score is NaN, since the score is undefined there.
pub fn zscores(signal: &Array1<f64>) -> Array1<f64> {
    let mean = nanmean(signal.iter().copied());
    let std = nanstd(signal.iter().copied());

    if !std.is_finite() || std == 0.0 {
        return Array1::from_elem(signal.len(), f64::NAN);
    }

    signal.mapv(|v| (v - mean) / std)
}
