//! Trial normalization.
//!
//! Two normalizations used when comparing the slow and fast conditions:
//! percentage change relative to the baseline window at block start, and
//! centering on the mean across conditions. Both return a new array of the
//! same shape as the input.

use ndarray::{Array, Axis, Dimension};

use crate::error::{Result, SignalError};
use crate::stats::nanmean;

/// Number of samples at the start of the time axis that form the baseline.
pub const BASELINE_WINDOW: usize = 5;

/// Normalize to the baseline window and express as percentage change.
///
/// The baseline is the nan-mean of the first [`BASELINE_WINDOW`] samples along
/// the last axis (or of the whole axis when it is shorter). Each sample
/// becomes `(x - baseline) / baseline * 100`. A zero baseline propagates as
/// NaN or infinity, it is not an error.
pub fn norm_perc<D: Dimension>(array: &Array<f64, D>) -> Result<Array<f64, D>> {
    if array.ndim() == 0 {
        return Err(SignalError::InvalidShape(
            "norm_perc requires at least one axis".to_string(),
        ));
    }
    let time_axis = Axis(array.ndim() - 1);

    let mut normalized = array.clone();
    for mut lane in normalized.lanes_mut(time_axis) {
        let window = lane.len().min(BASELINE_WINDOW);
        let baseline = nanmean(lane.iter().take(window).copied());
        lane.mapv_inplace(|v| (v - baseline) / baseline * 100.0);
    }
    Ok(normalized)
}

/// Center on the mean over the condition axis (second-to-last).
///
/// Subtracts the nan-mean across conditions from every sample, so the two
/// conditions become deviations from their common mean. Shape is preserved.
pub fn norm_all<D: Dimension>(array: &Array<f64, D>) -> Result<Array<f64, D>> {
    if array.ndim() < 2 {
        return Err(SignalError::InvalidShape(format!(
            "norm_all requires at least 2 axes, got {}",
            array.ndim()
        )));
    }
    let cond_axis = Axis(array.ndim() - 2);

    let mut centered = array.clone();
    for mut lane in centered.lanes_mut(cond_axis) {
        let mean = nanmean(lane.iter().copied());
        lane.mapv_inplace(|v| v - mean);
    }
    Ok(centered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2, Array3};

    #[test]
    fn test_norm_perc_constant_is_zero() {
        let signal = Array2::from_elem((2, 10), 4.2);
        let normalized = norm_perc(&signal).unwrap();

        assert_eq!(normalized.shape(), signal.shape());
        assert!(normalized.iter().all(|v| v.abs() < 1e-12));
    }

    #[test]
    fn test_norm_perc_step_signal() {
        let signal = array![1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 2.0, 2.0];
        let normalized = norm_perc(&signal).unwrap();

        for i in 0..5 {
            assert!(normalized[i].abs() < 1e-12);
        }
        for i in 5..10 {
            assert!((normalized[i] - 100.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_norm_perc_preserves_shape_3d() {
        let signal = Array3::from_shape_fn((3, 2, 8), |(i, j, k)| (i + j + k) as f64 + 1.0);
        let normalized = norm_perc(&signal).unwrap();
        assert_eq!(normalized.shape(), &[3, 2, 8]);
    }

    #[test]
    fn test_norm_perc_zero_baseline_propagates() {
        let signal = array![0.0, 0.0, 0.0, 0.0, 0.0, 1.0];
        let normalized = norm_perc(&signal).unwrap();
        // Baseline is zero, so every sample is NaN or infinite, never a panic.
        assert!(normalized.iter().all(|v| !v.is_finite()));
    }

    #[test]
    fn test_norm_all_identical_conditions_zero() {
        let signal = array![[1.0, 2.0, 3.0], [1.0, 2.0, 3.0]];
        let centered = norm_all(&signal).unwrap();

        assert_eq!(centered.shape(), signal.shape());
        assert!(centered.iter().all(|v| v.abs() < 1e-12));
    }

    #[test]
    fn test_norm_all_centers_conditions() {
        let signal = array![[1.0, 3.0], [3.0, 5.0]];
        let centered = norm_all(&signal).unwrap();

        assert_eq!(centered, array![[-1.0, -1.0], [1.0, 1.0]]);
    }

    #[test]
    fn test_norm_all_rejects_1d() {
        let signal = array![1.0, 2.0, 3.0];
        assert!(norm_all(&signal).is_err());
    }
}
