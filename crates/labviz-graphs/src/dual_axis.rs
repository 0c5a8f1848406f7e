//! Two differently scaled series sharing one x-axis.
//!
//! The left axis follows the first series. The right axis is fixed to
//! `[-1, 1]`, the range of similarity-style scores such as silhouette.

use std::ops::Range;

use labviz_common::{sanitize_file_stem, LabVizError, Result};
use labviz_config::DualAxisConfig;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::debug;

use crate::figure::render_error;
use crate::palette::hex_color;
use crate::traits::FigureRenderer;

/// Limits of the right axis, whatever the data.
pub const SECONDARY_Y_RANGE: Range<f64> = -1.0..1.0;

/// Fraction of the data span added on each side of a computed range.
const RANGE_PADDING: f64 = 0.05;

/// Validated input of a dual-axis chart.
#[derive(Debug, Clone, PartialEq)]
pub struct DualAxisChart {
    x: Vec<f64>,
    y1: Vec<f64>,
    y2: Vec<f64>,
    xlabel: String,
    y1label: String,
    y2label: String,
}

impl DualAxisChart {
    /// Pairs `y1` (left axis) and `y2` (right axis) with the shared `x` values.
    ///
    /// Fails with [`LabVizError::LengthMismatch`] unless all three have the same length.
    pub fn new(
        x: &[f64],
        y1: &[f64],
        y2: &[f64],
        xlabel: impl Into<String>,
        y1label: impl Into<String>,
        y2label: impl Into<String>,
    ) -> Result<Self> {
        if x.len() != y1.len() || x.len() != y2.len() {
            return Err(LabVizError::LengthMismatch {
                x: x.len(),
                y1: y1.len(),
                y2: y2.len(),
            });
        }
        Ok(Self {
            x: x.to_vec(),
            y1: y1.to_vec(),
            y2: y2.to_vec(),
            xlabel: xlabel.into(),
            y1label: y1label.into(),
            y2label: y2label.into(),
        })
    }

    /// Number of points per series.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the series are empty.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Range of the shared x-axis.
    pub fn x_range(&self) -> Range<f64> {
        padded_range(&self.x)
    }

    /// Range of the left axis.
    pub fn primary_y_range(&self) -> Range<f64> {
        padded_range(&self.y1)
    }

    /// Range of the right axis, always [`SECONDARY_Y_RANGE`].
    pub const fn secondary_y_range(&self) -> Range<f64> {
        SECONDARY_Y_RANGE
    }

    /// Left-axis points, skipping non-finite values.
    pub fn primary_points(&self) -> Vec<(f64, f64)> {
        finite_points(&self.x, &self.y1)
    }

    /// Right-axis points, skipping non-finite values.
    pub fn secondary_points(&self) -> Vec<(f64, f64)> {
        finite_points(&self.x, &self.y2)
    }
}

fn finite_points(x: &[f64], y: &[f64]) -> Vec<(f64, f64)> {
    x.iter()
        .copied()
        .zip(y.iter().copied())
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect()
}

/// Span of the finite `values` widened by [`RANGE_PADDING`] on each side.
///
/// An empty or single-valued input widens to a unit span.
fn padded_range(values: &[f64]) -> Range<f64> {
    let (min, max) = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if min > max {
        return 0.0..1.0;
    }
    if (max - min).abs() < f64::EPSILON {
        return (min - 0.5)..(max + 0.5);
    }
    let pad = (max - min) * RANGE_PADDING;
    (min - pad)..(max + pad)
}

/// Bottom-center point of the x description, half a margin above the lower edge.
fn x_description_anchor((width, height): (u32, u32)) -> (i32, i32) {
    let x = i32::try_from(width / 2).unwrap_or(i32::MAX);
    let y = i32::try_from(height.saturating_sub(DualAxisConfig::MARGIN / 2)).unwrap_or(i32::MAX);
    (x, y)
}

/// Renderer of a [`DualAxisChart`].
#[derive(Debug, Clone)]
pub struct DualAxisChartRenderer {
    chart: DualAxisChart,
    config: DualAxisConfig,
}

impl DualAxisChartRenderer {
    /// Creates a renderer for `chart`.
    pub const fn new(chart: DualAxisChart, config: DualAxisConfig) -> Self {
        Self { chart, config }
    }

    /// The drawn chart.
    pub const fn chart(&self) -> &DualAxisChart {
        &self.chart
    }

    /// Color of the left axis and its series.
    pub fn left_color(&self) -> RGBColor {
        hex_color(&self.config.left_color)
    }

    /// Color of the right axis and its series.
    pub fn right_color(&self) -> RGBColor {
        hex_color(&self.config.right_color)
    }

}

impl FigureRenderer for DualAxisChartRenderer {
    fn name(&self) -> String {
        format!(
            "two_plots_{}_{}",
            sanitize_file_stem(&self.chart.y1label),
            sanitize_file_stem(&self.chart.y2label)
        )
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        root.fill(&WHITE).map_err(render_error)?;

        let left = self.left_color();
        let right = self.right_color();
        let desc_size = f64::from(self.config.font_size);
        let tick_size = desc_size * 0.8;
        let label_area = self.config.label_area_size();

        let mut chart = ChartBuilder::on(root)
            .margin(DualAxisConfig::MARGIN)
            .x_label_area_size(label_area)
            .y_label_area_size(label_area)
            .right_y_label_area_size(label_area)
            .build_cartesian_2d(self.chart.x_range(), self.chart.primary_y_range())
            .map_err(render_error)?
            .set_secondary_coord(self.chart.x_range(), self.chart.secondary_y_range());

        chart
            .configure_mesh()
            .disable_mesh()
            .y_desc(self.chart.y1label.as_str())
            .label_style(("sans-serif", tick_size).into_font().color(&BLACK))
            .y_label_style(("sans-serif", tick_size).into_font().color(&left))
            .axis_desc_style(("sans-serif", desc_size).into_font().color(&left))
            .draw()
            .map_err(render_error)?;

        chart
            .configure_secondary_axes()
            .y_desc(self.chart.y2label.as_str())
            .label_style(("sans-serif", tick_size).into_font().color(&right))
            .axis_desc_style(("sans-serif", desc_size).into_font().color(&right))
            .draw()
            .map_err(render_error)?;

        chart
            .draw_series(LineSeries::new(
                self.chart.primary_points(),
                left.stroke_width(2),
            ))
            .map_err(render_error)?;
        chart
            .draw_secondary_series(LineSeries::new(
                self.chart.secondary_points(),
                right.stroke_width(2),
            ))
            .map_err(render_error)?;

        // The x description stays black, so it is drawn apart from the colored left mesh.
        let x_desc_style = ("sans-serif", desc_size)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        root.draw(&Text::new(
            self.chart.xlabel.clone(),
            x_description_anchor(root.dim_in_pixel()),
            x_desc_style,
        ))
        .map_err(render_error)?;

        debug!(points = self.chart.len(), "Drew dual-axis chart");
        Ok(())
    }
}
