//! Moving-average smoothing along a configurable axis.
//!
//! The filter convolves a uniform kernel of `window_size` along one axis.
//! Both output-length policies found in the wild are supported and must be
//! chosen explicitly via [`ConvolveMode`]; `Same` is the default.

use ndarray::{Array, ArrayView1, ArrayViewMut1, Axis, Dimension, Zip};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SignalError};

/// Output-length policy for the moving-average convolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvolveMode {
    /// Output length equals input length. The window is centered and the
    /// signal is edge-padded (nearest sample repeated), so a constant signal
    /// stays constant everywhere.
    Same,
    /// No padding. Output length along the smoothed axis shrinks to
    /// `n - window_size + 1`.
    Valid,
}

/// Configuration for [`smooth_moving_average`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmoothingConfig {
    /// Number of samples averaged per output sample.
    pub window_size: usize,
    /// Axis along which to smooth.
    pub axis: usize,
    pub mode: ConvolveMode,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            window_size: 5,
            axis: 2,
            mode: ConvolveMode::Same,
        }
    }
}

/// Smooth an array with a uniform moving-average window along one axis.
///
/// NaN samples propagate: every output sample whose window touches a NaN is
/// NaN. With `window_size` 1 the input is returned unchanged under either
/// mode.
pub fn smooth_moving_average<D: Dimension>(
    array: &Array<f64, D>,
    config: &SmoothingConfig,
) -> Result<Array<f64, D>> {
    if config.window_size == 0 {
        return Err(SignalError::InvalidParameter(
            "window_size must be at least 1".to_string(),
        ));
    }
    if config.axis >= array.ndim() {
        return Err(SignalError::InvalidParameter(format!(
            "axis {} out of range for {}-dimensional array",
            config.axis,
            array.ndim()
        )));
    }

    let axis = Axis(config.axis);
    let len = array.len_of(axis);
    let window = config.window_size;

    let out_len = match config.mode {
        ConvolveMode::Same => len,
        ConvolveMode::Valid => {
            if window > len {
                return Err(SignalError::InvalidParameter(format!(
                    "window_size {} exceeds axis length {} in valid mode",
                    window, len
                )));
            }
            len - window + 1
        }
    };

    log::debug!(
        "Smoothing axis {} (len {}) with window {} ({:?})",
        config.axis,
        len,
        window,
        config.mode
    );

    let mut dim = array.raw_dim();
    dim.slice_mut()[config.axis] = out_len;
    let mut smoothed = Array::zeros(dim);

    Zip::from(smoothed.lanes_mut(axis))
        .and(array.lanes(axis))
        .for_each(|out, lane| match config.mode {
            ConvolveMode::Same => convolve_same(lane, out, window),
            ConvolveMode::Valid => convolve_valid(lane, out, window),
        });

    Ok(smoothed)
}

fn convolve_same(lane: ArrayView1<'_, f64>, mut out: ArrayViewMut1<'_, f64>, window: usize) {
    let n = lane.len();
    if n == 0 {
        return;
    }
    // Centered window, nearest-sample padding at both ends.
    let offset = (window - 1) / 2;
    for i in 0..n {
        let mut acc = 0.0;
        for k in 0..window {
            let idx = (i + k).saturating_sub(offset).min(n - 1);
            acc += lane[idx];
        }
        out[i] = acc / window as f64;
    }
}

fn convolve_valid(lane: ArrayView1<'_, f64>, mut out: ArrayViewMut1<'_, f64>, window: usize) {
    for (i, out) in out.iter_mut().enumerate() {
        let mut acc = 0.0;
        for k in 0..window {
            acc += lane[i + k];
        }
        *out = acc / window as f64;
    }
}
