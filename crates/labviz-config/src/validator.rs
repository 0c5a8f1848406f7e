//! Runtime validation of render configuration.

use crate::schema::{Config, DualAxisConfig, LayoutConfig, RuleGraphConfig};
use labviz_common::{LabVizError, Result};

/// Parses a `#rrggbb` color into its components.
pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        Self::validate_rule_graph(&config.rule_graph)?;
        Self::validate_dual_axis(&config.dual_axis)?;
        Ok(())
    }

    fn validate_rule_graph(config: &RuleGraphConfig) -> Result<()> {
        check_dimensions("rule_graph", config.width, config.height)?;
        if config.node_radius == 0 {
            return Err(invalid("rule_graph.node_radius must be positive"));
        }
        if config.font_size == 0 {
            return Err(invalid("rule_graph.font_size must be positive"));
        }
        if !config.label_offset.is_finite() {
            return Err(invalid("rule_graph.label_offset must be finite"));
        }
        if config.max_label_chars < 4 {
            return Err(invalid("rule_graph.max_label_chars must be at least 4"));
        }
        check_color("rule_graph.rule_node_color", &config.rule_node_color)?;
        check_color("rule_graph.item_node_color", &config.item_node_color)?;
        if config
            .rule_node_color
            .eq_ignore_ascii_case(&config.item_node_color)
        {
            return Err(invalid(
                "rule_graph.rule_node_color and item_node_color must differ",
            ));
        }
        let side = config.margin().saturating_mul(2).saturating_add(1);
        check_min_dimensions("rule_graph", (config.width, config.height), (side, side))?;
        Self::validate_layout(&config.layout)
    }

    fn validate_layout(config: &LayoutConfig) -> Result<()> {
        if !(config.k.is_finite() && config.k > 0.0) {
            return Err(invalid("rule_graph.layout.k must be a positive number"));
        }
        if config.iterations == 0 {
            return Err(invalid("rule_graph.layout.iterations must be positive"));
        }
        if !(config.scale.is_finite() && config.scale > 0.0) {
            return Err(invalid("rule_graph.layout.scale must be a positive number"));
        }
        Ok(())
    }

    fn validate_dual_axis(config: &DualAxisConfig) -> Result<()> {
        check_dimensions("dual_axis", config.width, config.height)?;
        if config.font_size == 0 {
            return Err(invalid("dual_axis.font_size must be positive"));
        }
        check_min_dimensions(
            "dual_axis",
            (config.width, config.height),
            config.min_dimensions(),
        )?;
        check_color("dual_axis.left_color", &config.left_color)?;
        check_color("dual_axis.right_color", &config.right_color)?;
        if config.left_color.eq_ignore_ascii_case(&config.right_color) {
            return Err(invalid("dual_axis.left_color and right_color must differ"));
        }
        Ok(())
    }
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        ConfigValidator::validate(self)
    }
}

fn check_dimensions(section: &str, width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(LabVizError::Config(format!(
            "{section} dimensions must be positive, got {width}x{height}"
        )));
    }
    Ok(())
}

fn check_min_dimensions(
    section: &str,
    (width, height): (u32, u32),
    (min_width, min_height): (u32, u32),
) -> Result<()> {
    if width < min_width || height < min_height {
        return Err(LabVizError::Config(format!(
            "{section} is {width}x{height}, at least {min_width}x{min_height} is needed for labels and margins"
        )));
    }
    Ok(())
}

fn check_color(field: &str, value: &str) -> Result<()> {
    parse_hex_color(value).map(|_| ()).ok_or_else(|| {
        LabVizError::Config(format!("{field} must be a #rrggbb color, got '{value}'"))
    })
}

fn invalid(message: &str) -> LabVizError {
    LabVizError::Config(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FF0000"), Some((255, 0, 0)));
        assert_eq!(parse_hex_color("#1f77b4"), Some((31, 119, 180)));
        assert_eq!(parse_hex_color("1f77b4"), None);
        assert_eq!(parse_hex_color("#ZZ0000"), None);
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#ffé00"), None);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let mut config = Config::default();
        config.rule_graph.width = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("rule_graph dimensions"));
    }

    #[test]
    fn test_layout_parameters_rejected() {
        let mut config = Config::default();
        config.rule_graph.layout.k = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.rule_graph.layout.iterations = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.rule_graph.layout.scale = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_axis_colors_must_differ() {
        let mut config = Config::default();
        config.dual_axis.right_color = config.dual_axis.left_color.to_uppercase();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, LabVizError::Config(_)));
    }

    #[test]
    fn test_malformed_color_rejected() {
        let mut config = Config::default();
        config.rule_graph.item_node_color = "green".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("item_node_color"));
    }

    #[test]
    fn test_node_colors_must_differ() {
        let mut config = Config::default();
        config.rule_graph.item_node_color = config.rule_graph.rule_node_color.to_uppercase();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("item_node_color"));
    }

    #[test]
    fn test_figure_too_small_for_labels() {
        let mut config = Config::default();
        config.dual_axis.height = 5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("dual_axis is 800x5"));

        let mut config = Config::default();
        let (min_width, min_height) = config.dual_axis.min_dimensions();
        config.dual_axis.width = min_width;
        config.dual_axis.height = min_height;
        assert!(config.validate().is_ok());
        config.dual_axis.width -= 1;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.rule_graph.height = 40;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("rule_graph is 1000x40"));
    }
}
