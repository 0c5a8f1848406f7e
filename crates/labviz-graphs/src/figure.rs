//! Encoded figures and the sink that shows them.

use std::path::PathBuf;

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use labviz_common::{sanitize_file_stem, LabVizError, Result};
use labviz_config::{DisplayMode, OutputConfig, OutputFormat};
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use tracing::{info, warn};

use crate::traits::FigureRenderer;

/// A rendered figure held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Figure {
    /// Figure name, used as the output file stem.
    pub name: String,
    /// Encoding of `bytes`.
    pub format: OutputFormat,
    /// Encoded image.
    pub bytes: Vec<u8>,
}

/// Converts a plotters drawing error into [`LabVizError::Render`].
pub fn render_error<E>(err: DrawingAreaErrorKind<E>) -> LabVizError
where
    E: std::error::Error + Send + Sync,
{
    LabVizError::Render(err.to_string())
}

/// Draws `renderer` onto a fresh backend of the requested format and encodes the result.
pub fn render_figure<R: FigureRenderer>(renderer: &R, format: OutputFormat) -> Result<Figure> {
    let (width, height) = renderer.dimensions();
    let bytes = match format {
        OutputFormat::Png => {
            let mut buffer = vec![0_u8; width as usize * height as usize * 3];
            {
                let root = BitMapBackend::with_buffer(&mut buffer, (width, height))
                    .into_drawing_area();
                renderer.draw(&root)?;
                root.present().map_err(render_error)?;
            }
            encode_png(&buffer, width, height)?
        }
        OutputFormat::Svg => {
            let mut svg = String::new();
            {
                let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
                renderer.draw(&root)?;
                root.present().map_err(render_error)?;
            }
            svg.into_bytes()
        }
    };

    Ok(Figure {
        name: renderer.name(),
        format,
        bytes,
    })
}

fn encode_png(rgb: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(rgb, width, height, ColorType::Rgb8)
        .map_err(|e| LabVizError::Encode(e.to_string()))?;
    Ok(png)
}

/// Writes figures to the configured directory and optionally opens them.
#[derive(Debug, Clone)]
pub struct FigureSink {
    output: OutputConfig,
}

impl FigureSink {
    /// Creates a sink for the given output configuration.
    pub const fn new(output: OutputConfig) -> Self {
        Self { output }
    }

    /// Path `figure` is written to.
    pub fn path_for(&self, figure: &Figure) -> PathBuf {
        self.output.directory.join(format!(
            "{}.{}",
            sanitize_file_stem(&figure.name),
            figure.format.extension()
        ))
    }

    /// Writes `figure` and, in viewer mode, opens it.
    ///
    /// A viewer that fails to launch is logged, not reported as an error:
    /// the figure is already on disk.
    pub fn show(&self, figure: &Figure) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output.directory)?;
        let path = self.path_for(figure);
        std::fs::write(&path, &figure.bytes)?;
        info!(
            "Wrote {} figure '{}' to {}",
            figure.format.extension(),
            figure.name,
            path.display()
        );

        if self.output.display == DisplayMode::Viewer {
            if let Err(e) = open::that(&path) {
                warn!("Could not open {} in a viewer: {}", path.display(), e);
            }
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BlankRenderer;

    impl FigureRenderer for BlankRenderer {
        fn name(&self) -> String {
            "blank figure".to_string()
        }

        fn dimensions(&self) -> (u32, u32) {
            (40, 30)
        }

        fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, plotters::coord::Shift>) -> Result<()> {
            root.fill(&WHITE).map_err(render_error)?;
            root.draw(&Circle::new((20, 15), 5, RED.filled()))
                .map_err(render_error)
        }
    }

    #[test]
    fn test_png_rendering() {
        let figure = BlankRenderer.render(OutputFormat::Png).unwrap();
        assert_eq!(figure.name, "blank figure");
        assert_eq!(&figure.bytes[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&figure.bytes).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (40, 30));
        assert_eq!(decoded.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(decoded.get_pixel(20, 15).0, [255, 0, 0]);
    }

    #[test]
    fn test_svg_rendering() {
        let figure = BlankRenderer.render(OutputFormat::Svg).unwrap();
        let svg = String::from_utf8(figure.bytes).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("<circle"));
    }

    #[test]
    fn test_sink_writes_sanitized_path() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FigureSink::new(OutputConfig {
            directory: dir.path().join("plots"),
            format: OutputFormat::Svg,
            display: DisplayMode::File,
        });
        let figure = Figure {
            name: "k-means: silhouette".to_string(),
            format: OutputFormat::Svg,
            bytes: b"<svg></svg>".to_vec(),
        };

        let path = sink.show(&figure).unwrap();
        assert_eq!(path, dir.path().join("plots").join("k-means_silhouette.svg"));
        assert_eq!(std::fs::read(&path).unwrap(), figure.bytes);
    }
}
