//! Graph manager tying both renderers to one configuration and figure sink.

use std::path::PathBuf;

use labviz_common::{Result, Rule};
use labviz_config::Config;
use tracing::info;

use crate::dual_axis::{DualAxisChart, DualAxisChartRenderer};
use crate::figure::{Figure, FigureSink};
use crate::rule_graph_renderer::RuleGraphRenderer;
use crate::traits::FigureRenderer;

/// Renders rule graphs and dual-axis charts and shows them.
#[derive(Debug, Clone)]
pub struct GraphManager {
    config: Config,
    sink: FigureSink,
}

impl GraphManager {
    /// Creates a new graph manager from a configuration, validating it first.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let sink = FigureSink::new(config.output.clone());
        Ok(Self { config, sink })
    }

    /// The active configuration.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Renders the graph of the first `rules_to_show` rules without showing it.
    pub fn render_rules_graph(&self, rules: &[Rule], rules_to_show: usize) -> Result<Figure> {
        let renderer = RuleGraphRenderer::new(rules, rules_to_show, self.config.rule_graph.clone())?;
        renderer.render(self.config.output.format)
    }

    /// Draws the first `rules_to_show` rules as a graph linking antecedents
    /// and consequents through rule nodes, then shows the figure.
    ///
    /// Returns the path of the written figure.
    pub fn draw_rules_graph(&self, rules: &[Rule], rules_to_show: usize) -> Result<PathBuf> {
        let figure = self.render_rules_graph(rules, rules_to_show)?;
        let path = self.sink.show(&figure)?;
        info!(rules = rules_to_show, "Rule graph ready at {}", path.display());
        Ok(path)
    }

    /// Renders `y1` and `y2` against `x` on two y-axes without showing it.
    pub fn render_two_plots(
        &self,
        x: &[f64],
        y1: &[f64],
        y2: &[f64],
        xlabel: &str,
        y1label: &str,
        y2label: &str,
    ) -> Result<Figure> {
        let chart = DualAxisChart::new(x, y1, y2, xlabel, y1label, y2label)?;
        DualAxisChartRenderer::new(chart, self.config.dual_axis.clone())
            .render(self.config.output.format)
    }

    /// Plots `y1` on the left axis and `y2` on a right axis fixed to `[-1, 1]`,
    /// both against `x`, then shows the figure.
    ///
    /// Returns the path of the written figure.
    pub fn two_plots(
        &self,
        x: &[f64],
        y1: &[f64],
        y2: &[f64],
        xlabel: &str,
        y1label: &str,
        y2label: &str,
    ) -> Result<PathBuf> {
        let figure = self.render_two_plots(x, y1, y2, xlabel, y1label, y2label)?;
        let path = self.sink.show(&figure)?;
        info!(points = x.len(), "Dual-axis chart ready at {}", path.display());
        Ok(path)
    }
}
