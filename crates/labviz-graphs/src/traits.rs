//! Renderer trait shared by both figure types.

use labviz_common::Result;
use labviz_config::OutputFormat;
use plotters::coord::Shift;
use plotters::prelude::{DrawingArea, DrawingBackend};

use crate::figure::{render_figure, Figure};

/// A figure that can draw itself onto any plotters backend.
pub trait FigureRenderer {
    /// Name of the figure, used as the output file stem.
    fn name(&self) -> String;

    /// Figure size in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Draws the whole figure onto `root`.
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()>;

    /// Renders the figure into an encoded in-memory [`Figure`].
    fn render(&self, format: OutputFormat) -> Result<Figure>
    where
        Self: Sized,
    {
        render_figure(self, format)
    }
}
