//! Draws a laid-out [`RuleGraph`]: colored arrows, yellow rule nodes, green item nodes.

use labviz_common::{truncate_string, Result, Rule};
use labviz_config::RuleGraphConfig;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::debug;

use crate::figure::render_error;
use crate::layout::{spring_layout, Layout};
use crate::palette::{hex_color, viridis};
use crate::rule_graph::{NodeClass, RuleGraph};
use crate::traits::FigureRenderer;

/// Arrow head length in pixels.
const ARROW_LENGTH: f64 = 12.0;
/// Half of the arrow head base in pixels.
const ARROW_HALF_WIDTH: f64 = 5.0;

/// Renderer of association rules as a directed graph.
#[derive(Debug, Clone)]
pub struct RuleGraphRenderer {
    graph: RuleGraph,
    layout: Layout,
    config: RuleGraphConfig,
}

impl RuleGraphRenderer {
    /// Builds and lays out the graph of `rules[..rules_to_show]`.
    pub fn new(rules: &[Rule], rules_to_show: usize, config: RuleGraphConfig) -> Result<Self> {
        let graph = RuleGraph::build(rules, rules_to_show)?;
        Ok(Self::from_graph(graph, config))
    }

    /// Lays out an already built graph.
    pub fn from_graph(graph: RuleGraph, config: RuleGraphConfig) -> Self {
        let layout = spring_layout(&graph, &config.layout);
        Self {
            graph,
            layout,
            config,
        }
    }

    /// The drawn graph.
    pub const fn graph(&self) -> &RuleGraph {
        &self.graph
    }

    /// Node positions in layout units.
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Fill color of a node of `class`.
    pub fn node_color(&self, class: NodeClass) -> RGBColor {
        match class {
            NodeClass::Rule => hex_color(&self.config.rule_node_color),
            NodeClass::Item => hex_color(&self.config.item_node_color),
        }
    }

    /// Maps layout coordinates to pixels, leaving room for nodes and labels.
    fn to_pixel(&self, (x, y): (f64, f64), (width, height): (u32, u32)) -> (f64, f64) {
        let margin = f64::from(self.config.margin());
        let scale = self.config.layout.scale;
        let usable_w = (f64::from(width) - 2.0 * margin).max(1.0);
        let usable_h = (f64::from(height) - 2.0 * margin).max(1.0);
        (
            margin + (x + scale) / (2.0 * scale) * usable_w,
            margin + (scale - y) / (2.0 * scale) * usable_h,
        )
    }

    fn draw_edges<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        pixels: &[(f64, f64)],
    ) -> Result<()> {
        let radius = f64::from(self.config.node_radius);
        for (source, target, edge) in self.graph.indexed_edges() {
            let (from, to) = (pixels[source], pixels[target]);
            let (dx, dy) = (to.0 - from.0, to.1 - from.1);
            let length = dx.hypot(dy);
            if length <= radius {
                continue;
            }
            let (ux, uy) = (dx / length, dy / length);
            let tip = (to.0 - ux * radius, to.1 - uy * radius);
            let base = (tip.0 - ux * ARROW_LENGTH, tip.1 - uy * ARROW_LENGTH);
            let color = viridis(edge.intensity);

            root.draw(&PathElement::new(
                vec![to_i32(from), to_i32(base)],
                color.stroke_width(edge.weight),
            ))
            .map_err(render_error)?;
            root.draw(&Polygon::new(
                vec![
                    to_i32(tip),
                    to_i32((base.0 - uy * ARROW_HALF_WIDTH, base.1 + ux * ARROW_HALF_WIDTH)),
                    to_i32((base.0 + uy * ARROW_HALF_WIDTH, base.1 - ux * ARROW_HALF_WIDTH)),
                ],
                color.filled(),
            ))
            .map_err(render_error)?;
        }
        Ok(())
    }

    fn draw_nodes<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        pixels: &[(f64, f64)],
    ) -> Result<()> {
        for (key, &pixel) in self.graph.nodes().zip(pixels) {
            let color = self.node_color(key.class());
            root.draw(&Circle::new(
                to_i32(pixel),
                self.config.node_radius,
                color.filled(),
            ))
            .map_err(render_error)?;
        }
        Ok(())
    }

    fn draw_labels<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        dimensions: (u32, u32),
    ) -> Result<()> {
        let style = ("sans-serif", f64::from(self.config.font_size))
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));

        for (index, key) in self.graph.nodes().enumerate() {
            let Some((x, y)) = self.layout.position(index) else {
                continue;
            };
            let pixel = self.to_pixel((x, y + self.config.label_offset), dimensions);
            let label = truncate_string(&key.label(), self.config.max_label_chars);
            root.draw(&Text::new(label, to_i32(pixel), style.clone()))
                .map_err(render_error)?;
        }
        Ok(())
    }
}

impl FigureRenderer for RuleGraphRenderer {
    fn name(&self) -> String {
        format!("rules_graph_{}", self.graph.rule_count())
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        root.fill(&WHITE).map_err(render_error)?;

        let dimensions = root.dim_in_pixel();
        let pixels: Vec<(f64, f64)> = self
            .layout
            .positions()
            .iter()
            .map(|&position| self.to_pixel(position, dimensions))
            .collect();

        self.draw_edges(root, &pixels)?;
        self.draw_nodes(root, &pixels)?;
        self.draw_labels(root, dimensions)?;

        debug!(
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            "Drew rule graph"
        );
        Ok(())
    }
}

fn to_i32((x, y): (f64, f64)) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule_graph::NodeKey;
    use labviz_common::test_utils::rule_fixtures;

    fn renderer() -> RuleGraphRenderer {
        RuleGraphRenderer::new(
            &rule_fixtures::grocery_rules(),
            3,
            RuleGraphConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_node_colors_partition() {
        let renderer = renderer();
        let rule = renderer.node_color(NodeClass::Rule);
        let item = renderer.node_color(NodeClass::Item);
        assert_eq!(rule, RGBColor(255, 255, 0));
        assert_eq!(item, RGBColor(0, 128, 0));

        let colors: std::collections::HashSet<(u8, u8, u8)> = renderer
            .graph()
            .nodes()
            .map(|key| {
                let c = renderer.node_color(key.class());
                (c.0, c.1, c.2)
            })
            .collect();
        assert_eq!(colors.len(), 2);
    }

    #[test]
    fn test_pixels_stay_inside_figure() {
        let renderer = renderer();
        let dims = renderer.dimensions();
        for &position in renderer.layout().positions() {
            let (px, py) = renderer.to_pixel(position, dims);
            assert!(px >= 0.0 && px <= f64::from(dims.0));
            assert!(py >= 0.0 && py <= f64::from(dims.1));
        }
    }

    #[test]
    fn test_labels_sit_above_nodes() {
        let renderer = renderer();
        let dims = renderer.dimensions();
        let (x, y) = renderer.layout().position(0).unwrap();
        let node = renderer.to_pixel((x, y), dims);
        let label = renderer.to_pixel((x, y + 0.07), dims);
        assert!(label.1 < node.1);
        assert!((label.0 - node.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_name_counts_rules() {
        assert_eq!(renderer().name(), "rules_graph_3");
    }

    #[test]
    fn test_rejects_too_many_rules() {
        let result = RuleGraphRenderer::new(
            &rule_fixtures::grocery_rules(),
            10,
            RuleGraphConfig::default(),
        );
        assert!(matches!(
            result,
            Err(labviz_common::LabVizError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_first_node_is_first_rule() {
        let renderer = renderer();
        assert_eq!(renderer.graph().nodes().next(), Some(&NodeKey::Rule(0)));
    }
}
