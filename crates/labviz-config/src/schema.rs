//! Configuration schema definitions using serde.

use serde::{Deserialize, Serialize};

/// Main configuration structure for LabViz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where and how rendered figures are shown.
    pub output: OutputConfig,
    /// Rule graph rendering.
    pub rule_graph: RuleGraphConfig,
    /// Dual-axis chart rendering.
    pub dual_axis: DualAxisConfig,
}

/// Figure output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory figures are written to.
    pub directory: std::path::PathBuf,
    /// Encoding of written figures.
    pub format: OutputFormat,
    /// What happens after a figure is written.
    pub display: DisplayMode,
}

/// Figure encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Raster image.
    Png,
    /// Vector image.
    Svg,
}

impl OutputFormat {
    /// File extension for this format.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            other => Err(format!("unknown output format '{other}'")),
        }
    }
}

/// How a written figure is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Only write the file.
    File,
    /// Write the file and open it in the system viewer.
    Viewer,
}

impl std::str::FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "viewer" => Ok(Self::Viewer),
            other => Err(format!("unknown display mode '{other}'")),
        }
    }
}

/// Rule graph rendering configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleGraphConfig {
    /// Figure width in pixels.
    pub width: u32,
    /// Figure height in pixels.
    pub height: u32,
    /// Node circle radius in pixels.
    pub node_radius: u32,
    /// Label font size.
    pub font_size: u32,
    /// Upward label shift in layout units.
    pub label_offset: f64,
    /// Longer item labels are truncated with an ellipsis.
    pub max_label_chars: usize,
    /// Fill of rule nodes.
    pub rule_node_color: String,
    /// Fill of item nodes.
    pub item_node_color: String,
    /// Force-directed layout parameters.
    pub layout: LayoutConfig,
}

/// Spring layout parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Optimal distance between nodes.
    pub k: f64,
    /// Maximum number of simulation steps.
    pub iterations: u32,
    /// Positions are rescaled into `[-scale, scale]`.
    pub scale: f64,
    /// Seed of the initial random positions.
    pub seed: u64,
}

/// Dual-axis chart configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DualAxisConfig {
    /// Figure width in pixels.
    pub width: u32,
    /// Figure height in pixels.
    pub height: u32,
    /// Axis label font size.
    pub font_size: u32,
    /// Color of the left axis and its series.
    pub left_color: String,
    /// Color of the right axis and its series.
    pub right_color: String,
}

impl RuleGraphConfig {
    /// Space kept free around the plotted nodes so circles and labels stay inside the figure.
    pub const fn margin(&self) -> u32 {
        self.node_radius
            .saturating_add(self.font_size.saturating_mul(2))
    }
}

impl DualAxisConfig {
    /// Outer margin of the chart in pixels.
    pub const MARGIN: u32 = 15;

    /// Width of the label areas left, right and below the plot, sized so
    /// tick labels and axis descriptions are not clipped.
    pub const fn label_area_size(&self) -> u32 {
        self.font_size.saturating_mul(4)
    }

    /// Smallest figure that fits both y label areas, the x label area and the margins.
    pub const fn min_dimensions(&self) -> (u32, u32) {
        let frame = 2 * Self::MARGIN + 1;
        (
            self.label_area_size().saturating_mul(2).saturating_add(frame),
            self.label_area_size().saturating_add(frame),
        )
    }
}
