//! Default configuration values.

use crate::schema::*;

/// Seed used for reproducible layouts.
pub const DEFAULT_LAYOUT_SEED: u64 = 42;

impl Default for Config {
    fn default() -> Self {
        Self {
            output: OutputConfig::default(),
            rule_graph: RuleGraphConfig::default(),
            dual_axis: DualAxisConfig::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: std::path::PathBuf::from("figures"),
            format: OutputFormat::Png,
            display: DisplayMode::File,
        }
    }
}

impl Default for RuleGraphConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 800,
            node_radius: 12,
            font_size: 16,
            label_offset: 0.07,
            max_label_chars: 32,
            rule_node_color: "#ffff00".to_string(),
            item_node_color: "#008000".to_string(),
            layout: LayoutConfig::default(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            k: 16.0,
            iterations: 50,
            scale: 1.0,
            seed: DEFAULT_LAYOUT_SEED,
        }
    }
}

impl Default for DualAxisConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            font_size: 15,
            left_color: "#d62728".to_string(),
            right_color: "#1f77b4".to_string(),
        }
    }
}
