//! Outlier masking for 1-D trial signals.

use ndarray::Array1;

use crate::stats::zscores;

/// Default z-score threshold, in standard-deviation units.
pub const DEFAULT_OUTLIER_THRESHOLD: f64 = 3.0;

/// Replace outliers with NaN, in place.
///
/// An element is an outlier when the absolute value of its nan-omitting
/// z-score exceeds `threshold`. The signal keeps its length; only the flagged
/// values change. Returns the number of samples that were masked.
///
/// A zero-variance signal has no defined z-scores and is left unchanged.
pub fn fill_outliers_nan(signal: &mut Array1<f64>, threshold: f64) -> usize {
    let z = zscores(signal);

    let mut masked = 0usize;
    for (value, z) in signal.iter_mut().zip(z.iter()) {
        if z.abs() > threshold {
            *value = f64::NAN;
            masked += 1;
        }
    }

    if masked > 0 {
        log::debug!(
            "Masked {} of {} samples above {:.1} SD",
            masked,
            z.len(),
            threshold
        );
    }
    masked
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_no_extreme_values_unchanged() {
        let mut signal = array![1.0, 2.0, 3.0, 2.0, 1.0, 2.0];
        let original = signal.clone();

        let masked = fill_outliers_nan(&mut signal, DEFAULT_OUTLIER_THRESHOLD);

        assert_eq!(masked, 0);
        assert_eq!(signal, original);
    }

    #[test]
    fn test_single_extreme_value_masked() {
        // One sample far outside the spread of the rest.
        let mut signal = Array1::from_elem(50, 0.0);
        for (i, v) in signal.iter_mut().enumerate() {
            *v = (i % 5) as f64;
        }
        signal[25] = 1000.0;

        let masked = fill_outliers_nan(&mut signal, DEFAULT_OUTLIER_THRESHOLD);

        assert_eq!(masked, 1);
        assert!(signal[25].is_nan());
        assert_eq!(signal.iter().filter(|v| v.is_nan()).count(), 1);
    }

    #[test]
    fn test_zero_variance_flags_nothing() {
        let mut signal = Array1::from_elem(10, 7.0);
        let masked = fill_outliers_nan(&mut signal, DEFAULT_OUTLIER_THRESHOLD);

        assert_eq!(masked, 0);
        assert!(signal.iter().all(|&v| v == 7.0));
    }

    #[test]
    fn test_existing_nan_preserved_and_ignored() {
        let mut signal = array![1.0, f64::NAN, 2.0, 3.0, 2.0, 1.0];
        let masked = fill_outliers_nan(&mut signal, DEFAULT_OUTLIER_THRESHOLD);

        assert_eq!(masked, 0);
        assert!(signal[1].is_nan());
        assert_eq!(signal[0], 1.0);
    }
}
