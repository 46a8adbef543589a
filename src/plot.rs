//! Comparison plots for two-condition trial data.
//!
//! Every routine draws onto a caller-supplied `DrawingArea` instead of a
//! process-wide figure, so rendering is testable: point the functions at an
//! in-memory SVG backend and assert on the produced elements. The caller owns
//! the backend and calls `present()` when done.

use ndarray::Array2;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::{DashedLineSeries, LineSeries};

use crate::error::{Result, SignalError};
use crate::stats::nanmean;

/// Default line color for the slow condition.
pub const COLOR_SLOW: RGBColor = RGBColor(0x00, 0x86, 0x3b);
/// Default line color for the fast condition.
pub const COLOR_FAST: RGBColor = RGBColor(0x3b, 0x00, 0x86);

/// Which frame lines are drawn around the plotting area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpineStyle {
    /// Full rectangular frame.
    Box,
    /// Left and bottom axes only.
    Open,
}

/// Axes-level styling shared by the plot routines.
#[derive(Debug, Clone)]
pub struct AxesStyle {
    pub spines: SpineStyle,
    pub margin: u32,
    pub x_label_area: u32,
    pub y_label_area: u32,
}

impl Default for AxesStyle {
    fn default() -> Self {
        Self {
            spines: SpineStyle::Box,
            margin: 10,
            x_label_area: 40,
            y_label_area: 60,
        }
    }
}

/// Drop the top and right frame lines from an axes style.
pub fn despine(axes: &mut AxesStyle) {
    axes.spines = SpineStyle::Open;
}

/// Styling for [`plot_conds`].
#[derive(Debug, Clone)]
pub struct CondPlotStyle {
    pub axes: AxesStyle,
    pub color_slow: RGBColor,
    pub color_fast: RGBColor,
    pub label_slow: String,
    pub label_fast: String,
    pub line_width: u32,
    /// Opacity of the shaded variance band.
    pub band_alpha: f64,
}

impl Default for CondPlotStyle {
    fn default() -> Self {
        Self {
            axes: AxesStyle::default(),
            color_slow: COLOR_SLOW,
            color_fast: COLOR_FAST,
            label_slow: "Slow".to_string(),
            label_fast: "Fast".to_string(),
            line_width: 3,
            band_alpha: 0.2,
        }
    }
}

/// Styling for [`plot_bar_points_connect`].
#[derive(Debug, Clone)]
pub struct BarPointsStyle {
    pub axes: AxesStyle,
    pub colors: [RGBColor; 2],
    pub labels: [String; 2],
    pub bar_alpha: f64,
    pub bar_width: f64,
    pub marker_size: u32,
    /// Stroke width of the per-sample connecting segments.
    pub line_width: u32,
}

impl Default for BarPointsStyle {
    fn default() -> Self {
        Self {
            axes: AxesStyle::default(),
            colors: [COLOR_SLOW, COLOR_FAST],
            labels: ["Slow".to_string(), "Fast".to_string()],
            bar_alpha: 0.5,
            bar_width: 0.5,
            marker_size: 3,
            line_width: 1,
        }
    }
}

fn plot_err<E: std::fmt::Display>(err: E) -> SignalError {
    SignalError::Plot(err.to_string())
}

/// Plot the two conditions of a `conditions x trials` matrix as lines.
///
/// Row 0 is the slow condition, row 1 the fast condition. A dashed black
/// reference line is drawn at zero. When `variance` (same shape) is given,
/// a shaded band of mean ± variance is drawn behind each line. Non-finite
/// samples are skipped.
pub fn plot_conds<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    values: &Array2<f64>,
    variance: Option<&Array2<f64>>,
    style: &CondPlotStyle,
) -> Result<()> {
    if values.nrows() != 2 {
        return Err(SignalError::InvalidShape(format!(
            "expected 2 conditions, got {}",
            values.nrows()
        )));
    }
    if let Some(var) = variance {
        if var.shape() != values.shape() {
            return Err(SignalError::InvalidShape(format!(
                "variance shape {:?} does not match values shape {:?}",
                var.shape(),
                values.shape()
            )));
        }
    }

    let trials = values.ncols();
    let mut y_min = 0.0f64;
    let mut y_max = 0.0f64;
    let mut any_finite = false;
    for ((cond, trial), &v) in values.indexed_iter() {
        if !v.is_finite() {
            continue;
        }
        any_finite = true;
        let spread = variance
            .map(|var| var[[cond, trial]])
            .filter(|s| s.is_finite())
            .unwrap_or(0.0);
        y_min = y_min.min(v - spread);
        y_max = y_max.max(v + spread);
    }
    if !any_finite {
        return Err(SignalError::InvalidShape(
            "no finite samples to plot".to_string(),
        ));
    }
    let (y_lo, y_hi) = pad_range(y_min, y_max);
    let x_lo = 0.0;
    let x_hi = if trials > 1 { (trials - 1) as f64 } else { 1.0 };

    area.fill(&WHITE).map_err(plot_err)?;
    let mut chart = ChartBuilder::on(area)
        .margin(style.axes.margin)
        .x_label_area_size(style.axes.x_label_area)
        .y_label_area_size(style.axes.y_label_area)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)
        .map_err(plot_err)?;
    chart
        .configure_mesh()
        .disable_mesh()
        .draw()
        .map_err(plot_err)?;

    let conditions = [
        (0usize, style.color_slow, &style.label_slow),
        (1usize, style.color_fast, &style.label_fast),
    ];

    // Bands go in first so the condition lines stay on top.
    if let Some(var) = variance {
        for &(cond, color, _) in &conditions {
            let mut band = Vec::with_capacity(trials * 2);
            for trial in 0..trials {
                let mean = values[[cond, trial]];
                let spread = var[[cond, trial]];
                if mean.is_finite() && spread.is_finite() {
                    band.push((trial as f64, mean + spread));
                }
            }
            for trial in (0..trials).rev() {
                let mean = values[[cond, trial]];
                let spread = var[[cond, trial]];
                if mean.is_finite() && spread.is_finite() {
                    band.push((trial as f64, mean - spread));
                }
            }
            if band.len() >= 3 {
                chart
                    .draw_series(std::iter::once(Polygon::new(
                        band,
                        color.mix(style.band_alpha).filled(),
                    )))
                    .map_err(plot_err)?;
            }
        }
    }

    chart
        .draw_series(DashedLineSeries::new(
            [(x_lo, 0.0), (x_hi, 0.0)],
            10,
            5,
            BLACK.stroke_width(2),
        ))
        .map_err(plot_err)?;

    for &(cond, color, label) in &conditions {
        let points: Vec<(f64, f64)> = (0..trials)
            .map(|trial| (trial as f64, values[[cond, trial]]))
            .filter(|(_, v)| v.is_finite())
            .collect();
        chart
            .draw_series(LineSeries::new(
                points,
                color.stroke_width(style.line_width),
            ))
            .map_err(plot_err)?
            .label(label.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(3))
            });
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()
        .map_err(plot_err)?;

    if style.axes.spines == SpineStyle::Box {
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(x_lo, y_hi), (x_hi, y_hi), (x_hi, y_lo)],
                BLACK.stroke_width(1),
            )))
            .map_err(plot_err)?;
    }

    Ok(())
}

/// Plot paired per-sample comparisons against the condition means.
///
/// `matrix` is `samples x 2`. Two bars at x = 1 and x = 2 show the nan-mean
/// of each condition; each sample adds one marker per condition plus a black
/// segment connecting the pair. Samples with a non-finite value in a
/// condition skip that marker (and the segment, if either side is missing).
pub fn plot_bar_points_connect<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    matrix: &Array2<f64>,
    style: &BarPointsStyle,
) -> Result<()> {
    if matrix.ncols() != 2 {
        return Err(SignalError::InvalidShape(format!(
            "expected 2 conditions, got {} columns",
            matrix.ncols()
        )));
    }

    let means = [
        nanmean(matrix.column(0).iter().copied()),
        nanmean(matrix.column(1).iter().copied()),
    ];
    if means.iter().any(|m| !m.is_finite()) {
        return Err(SignalError::InvalidShape(
            "a condition has no finite samples".to_string(),
        ));
    }

    let mut y_min = 0.0f64;
    let mut y_max = 0.0f64;
    for &v in matrix.iter().chain(means.iter()) {
        if v.is_finite() {
            y_min = y_min.min(v);
            y_max = y_max.max(v);
        }
    }
    let (y_lo, y_hi) = pad_range(y_min, y_max);

    area.fill(&WHITE).map_err(plot_err)?;
    let mut chart = ChartBuilder::on(area)
        .margin(style.axes.margin)
        .x_label_area_size(style.axes.x_label_area)
        .y_label_area_size(style.axes.y_label_area)
        .build_cartesian_2d(0.4..2.6, y_lo..y_hi)
        .map_err(plot_err)?;
    chart
        .configure_mesh()
        .disable_mesh()
        .draw()
        .map_err(plot_err)?;

    let half = style.bar_width / 2.0;
    for (cond, (&mean, &color)) in means.iter().zip(style.colors.iter()).enumerate() {
        let x = (cond + 1) as f64;
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(x - half, 0.0), (x + half, mean)],
                color.mix(style.bar_alpha).filled(),
            )))
            .map_err(plot_err)?
            .label(style.labels[cond].as_str())
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
            });
    }

    for row in matrix.rows() {
        let (slow, fast) = (row[0], row[1]);
        if slow.is_finite() && fast.is_finite() {
            chart
                .draw_series(std::iter::once(PathElement::new(
                    vec![(1.0, slow), (2.0, fast)],
                    BLACK.mix(0.5).stroke_width(style.line_width),
                )))
                .map_err(plot_err)?;
        }
        for (cond, &v) in [slow, fast].iter().enumerate() {
            if v.is_finite() {
                chart
                    .draw_series(std::iter::once(Circle::new(
                        ((cond + 1) as f64, v),
                        style.marker_size,
                        style.colors[cond].filled(),
                    )))
                    .map_err(plot_err)?;
            }
        }
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()
        .map_err(plot_err)?;

    if style.axes.spines == SpineStyle::Box {
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(0.4, y_hi), (2.6, y_hi), (2.6, y_lo)],
                BLACK.stroke_width(1),
            )))
            .map_err(plot_err)?;
    }

    Ok(())
}

fn pad_range(min: f64, max: f64) -> (f64, f64) {
    let range = max - min;
    let pad = if range > 1e-6 {
        0.1 * range
    } else {
        0.1 * max.abs().max(1.0)
    };
    (min - pad, max + pad)
}
