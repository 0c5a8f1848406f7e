//! Fruchterman-Reingold spring layout.

use labviz_config::LayoutConfig;
use tracing::trace;

use crate::rule_graph::RuleGraph;

/// Pairwise distances are clamped to this to avoid infinite repulsion.
const MIN_DISTANCE: f64 = 0.01;

/// Mean node displacement below which the simulation has settled.
const CONVERGENCE_THRESHOLD: f64 = 1e-4;

/// Node positions in layout units, indexed like [`RuleGraph::nodes`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    positions: Vec<(f64, f64)>,
}

impl Layout {
    /// Position of the node at `index`.
    pub fn position(&self, index: usize) -> Option<(f64, f64)> {
        self.positions.get(index).copied()
    }

    /// All positions.
    pub fn positions(&self) -> &[(f64, f64)] {
        &self.positions
    }

    /// Number of positioned nodes.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether no node is positioned.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Positions the nodes of `graph` with a force-directed simulation.
///
/// Every pair of nodes repels with `k² / d`, connected nodes attract with
/// `w · d² / k`, and the step size cools linearly over `iterations` steps.
/// Initial positions come from `params.seed`, so the same graph and
/// parameters always produce the same layout. The result is centered on the
/// origin and scaled so the largest coordinate magnitude equals `params.scale`.
pub fn spring_layout(graph: &RuleGraph, params: &LayoutConfig) -> Layout {
    let n = graph.node_count();
    match n {
        0 => return Layout::default(),
        1 => {
            return Layout {
                positions: vec![(0.0, 0.0)],
            }
        }
        _ => {}
    }

    let mut rng = fastrand::Rng::with_seed(params.seed);
    let mut pos: Vec<[f64; 2]> = (0..n).map(|_| [rng.f64(), rng.f64()]).collect();

    // Layout treats edges as undirected.
    let mut adjacency = vec![0.0_f64; n * n];
    for (a, b, edge) in graph.indexed_edges() {
        let w = f64::from(edge.weight);
        adjacency[a * n + b] = w;
        adjacency[b * n + a] = w;
    }

    let k = params.k;
    let mut temperature = 0.1 * span(&pos);
    let cooling = temperature / (f64::from(params.iterations) + 1.0);
    let mut displacement = vec![[0.0_f64; 2]; n];

    for iteration in 0..params.iterations {
        for (i, disp) in displacement.iter_mut().enumerate() {
            *disp = [0.0, 0.0];
            for j in 0..n {
                if i == j {
                    continue;
                }
                let dx = pos[i][0] - pos[j][0];
                let dy = pos[i][1] - pos[j][1];
                let distance = dx.hypot(dy).max(MIN_DISTANCE);
                let force =
                    k * k / (distance * distance) - adjacency[i * n + j] * distance / k;
                disp[0] += dx * force;
                disp[1] += dy * force;
            }
        }

        let mut moved = 0.0;
        for (p, disp) in pos.iter_mut().zip(&displacement) {
            let length = disp[0].hypot(disp[1]);
            let length = if length < MIN_DISTANCE { 0.1 } else { length };
            let step = [disp[0] * temperature / length, disp[1] * temperature / length];
            p[0] += step[0];
            p[1] += step[1];
            moved += step[0].hypot(step[1]);
        }
        temperature -= cooling;

        if moved / (n as f64) < CONVERGENCE_THRESHOLD {
            trace!(iteration, "Spring layout converged");
            break;
        }
    }

    Layout {
        positions: rescale(&pos, params.scale),
    }
}

/// Larger of the horizontal and vertical extent of `pos`.
fn span(pos: &[[f64; 2]]) -> f64 {
    let extent = |axis: usize| {
        let (min, max) = pos.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p[axis]), hi.max(p[axis]))
        });
        max - min
    };
    extent(0).max(extent(1))
}

fn rescale(pos: &[[f64; 2]], scale: f64) -> Vec<(f64, f64)> {
    let n = pos.len() as f64;
    let mean_x = pos.iter().map(|p| p[0]).sum::<f64>() / n;
    let mean_y = pos.iter().map(|p| p[1]).sum::<f64>() / n;

    let centered: Vec<(f64, f64)> = pos.iter().map(|p| (p[0] - mean_x, p[1] - mean_y)).collect();
    let limit = centered
        .iter()
        .map(|&(x, y)| x.abs().max(y.abs()))
        .fold(0.0, f64::max);

    if limit > 0.0 {
        centered
            .into_iter()
            .map(|(x, y)| (x * scale / limit, y * scale / limit))
            .collect()
    } else {
        centered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labviz_common::test_utils::rule_fixtures;

    fn grocery_graph() -> RuleGraph {
        RuleGraph::build(&rule_fixtures::grocery_rules(), 3).unwrap()
    }

    #[test]
    fn test_empty_and_single_node() {
        let params = LayoutConfig::default();
        let empty = RuleGraph::default();
        assert!(spring_layout(&empty, &params).is_empty());

        let single = RuleGraph::build(&[labviz_common::Rule::default()], 1).unwrap();
        assert_eq!(spring_layout(&single, &params).positions(), [(0.0, 0.0)]);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let graph = grocery_graph();
        let params = LayoutConfig::default();
        assert_eq!(spring_layout(&graph, &params), spring_layout(&graph, &params));
    }

    #[test]
    fn test_seed_changes_layout() {
        let graph = grocery_graph();
        let a = spring_layout(&graph, &LayoutConfig::default());
        let b = spring_layout(
            &graph,
            &LayoutConfig {
                seed: 7,
                ..LayoutConfig::default()
            },
        );
        assert_ne!(a, b);
    }

    #[test]
    fn test_layout_fits_scale() {
        let graph = grocery_graph();
        let params = LayoutConfig {
            scale: 2.5,
            ..LayoutConfig::default()
        };
        let layout = spring_layout(&graph, &params);
        assert_eq!(layout.len(), graph.node_count());

        let max = layout
            .positions()
            .iter()
            .map(|&(x, y)| x.abs().max(y.abs()))
            .fold(0.0, f64::max);
        assert!((max - 2.5).abs() < 1e-9);
        assert!(layout.positions().iter().all(|&(x, y)| x.is_finite() && y.is_finite()));
    }

    #[test]
    fn test_layout_is_centered() {
        let layout = spring_layout(&grocery_graph(), &LayoutConfig::default());
        let n = layout.len() as f64;
        let mean_x: f64 = layout.positions().iter().map(|p| p.0).sum::<f64>() / n;
        let mean_y: f64 = layout.positions().iter().map(|p| p.1).sum::<f64>() / n;
        assert!(mean_x.abs() < 1e-9);
        assert!(mean_y.abs() < 1e-9);
    }

    #[test]
    fn test_long_simulation_settles() {
        let graph = RuleGraph::build(&rule_fixtures::milk_bread(), 1).unwrap();
        let params = LayoutConfig {
            iterations: 2_000,
            ..LayoutConfig::default()
        };
        let layout = spring_layout(&graph, &params);
        assert_eq!(layout.len(), 3);
        assert!(layout.positions().iter().all(|&(x, y)| x.is_finite() && y.is_finite()));
    }

    #[test]
    fn test_rescale_degenerate() {
        let pos = vec![[0.5, 0.5], [0.5, 0.5]];
        assert_eq!(rescale(&pos, 1.0), vec![(0.0, 0.0), (0.0, 0.0)]);
    }
}
