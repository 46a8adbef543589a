//! Preprocessing and plotting utilities for two-condition trial time series.
//!
//! Helpers for behavioral/neuroscience experiments that compare a slow and a
//! fast condition: z-score outlier masking, baseline percentage change,
//! cross-condition centering, moving-average smoothing, and two comparison
//! plots. Missing samples are NaN and every reduction skips them (see
//! [`stats`]).

pub mod error;
pub mod normalize;
pub mod outliers;
pub mod plot;
pub mod smoothing;
pub mod stats;

pub use error::{Result, SignalError};
pub use normalize::{norm_all, norm_perc, BASELINE_WINDOW};
pub use outliers::{fill_outliers_nan, DEFAULT_OUTLIER_THRESHOLD};
pub use plot::{
    despine, plot_bar_points_connect, plot_conds, AxesStyle, BarPointsStyle, CondPlotStyle,
    SpineStyle, COLOR_FAST, COLOR_SLOW,
};
pub use smoothing::{smooth_moving_average, ConvolveMode, SmoothingConfig};
