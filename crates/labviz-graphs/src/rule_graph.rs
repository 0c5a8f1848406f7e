//! Directed graph linking antecedent items to rule nodes and rule nodes to consequent items.

use std::collections::HashMap;
use std::fmt;

use labviz_common::{rule_node_name, ItemId, LabVizError, Result, Rule};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use tracing::debug;

use crate::palette::rule_intensity;

/// Number of rules drawn when the caller does not choose.
pub const DEFAULT_RULES_TO_SHOW: usize = 5;

/// Weight, and stroke width, of every edge.
pub const EDGE_WEIGHT: u32 = 2;

/// Identity of a node in a [`RuleGraph`].
///
/// Rule nodes and item nodes live in separate namespaces, so an item that
/// happens to be called `R0` never merges with the first rule. A graph keyed
/// by plain node names would fold the two into one rule-colored node and
/// give it the item's edges; here the item keeps its own node, its green
/// color and its own degrees, and only shares the label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKey {
    /// Synthetic node of the rule at this index.
    Rule(usize),
    /// Item taken from an antecedent or consequent set.
    Item(ItemId),
}

impl NodeKey {
    /// Shorthand for an item node key.
    pub fn item(id: impl Into<ItemId>) -> Self {
        Self::Item(id.into())
    }

    /// Which color class this node belongs to.
    pub const fn class(&self) -> NodeClass {
        match self {
            Self::Rule(_) => NodeClass::Rule,
            Self::Item(_) => NodeClass::Item,
        }
    }

    /// Text drawn next to the node.
    pub fn label(&self) -> String {
        match self {
            Self::Rule(index) => rule_node_name(*index),
            Self::Item(id) => id.to_string(),
        }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// The two node color classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeClass {
    /// Synthetic rule node.
    Rule,
    /// Item node.
    Item,
}

/// Edge attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleEdge {
    /// Index of the rule this edge belongs to.
    pub rule: usize,
    /// Color tag of the rule, in `[0, 1)`.
    pub intensity: f64,
    /// Edge weight.
    pub weight: u32,
}

impl RuleEdge {
    fn for_rule(rule: usize) -> Self {
        Self {
            rule,
            intensity: rule_intensity(rule),
            weight: EDGE_WEIGHT,
        }
    }
}

/// Graph of the first `rules_to_show` rules of a rule table.
///
/// Nodes keep insertion order: each rule node is followed by the items it
/// introduces.
#[derive(Debug, Clone, Default)]
pub struct RuleGraph {
    graph: DiGraph<NodeKey, RuleEdge>,
    index: HashMap<NodeKey, NodeIndex>,
    rule_count: usize,
}

impl RuleGraph {
    /// Builds the graph of `rules[..rules_to_show]`.
    ///
    /// Fails with [`LabVizError::IndexOutOfRange`] when fewer than
    /// `rules_to_show` rules are available; nothing is truncated silently.
    pub fn build(rules: &[Rule], rules_to_show: usize) -> Result<Self> {
        if rules_to_show > rules.len() {
            return Err(LabVizError::IndexOutOfRange {
                requested: rules_to_show,
                available: rules.len(),
            });
        }

        let mut graph = Self::default();
        for (i, rule) in rules.iter().take(rules_to_show).enumerate() {
            let rule_node = graph.ensure_node(NodeKey::Rule(i));
            for item in &rule.antecedents {
                let item_node = graph.ensure_node(NodeKey::Item(item.clone()));
                graph
                    .graph
                    .update_edge(item_node, rule_node, RuleEdge::for_rule(i));
            }
            for item in &rule.consequents {
                let item_node = graph.ensure_node(NodeKey::Item(item.clone()));
                graph
                    .graph
                    .update_edge(rule_node, item_node, RuleEdge::for_rule(i));
            }
        }
        graph.rule_count = rules_to_show;

        debug!(
            rules = rules_to_show,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Built rule graph"
        );
        Ok(graph)
    }

    fn ensure_node(&mut self, key: NodeKey) -> NodeIndex {
        if let Some(&idx) = self.index.get(&key) {
            return idx;
        }
        let idx = self.graph.add_node(key.clone());
        self.index.insert(key, idx);
        idx
    }

    /// Number of rule nodes.
    pub const fn rule_count(&self) -> usize {
        self.rule_count
    }

    /// Number of nodes of both classes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeKey> + '_ {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    /// Whether `key` is a node of this graph.
    pub fn contains_node(&self, key: &NodeKey) -> bool {
        self.index.contains_key(key)
    }

    /// Class of `key`, or `None` when it is not in the graph.
    pub fn node_class(&self, key: &NodeKey) -> Option<NodeClass> {
        self.contains_node(key).then(|| key.class())
    }

    /// Rule nodes in insertion order.
    pub fn rule_nodes(&self) -> Vec<&NodeKey> {
        self.nodes()
            .filter(|key| key.class() == NodeClass::Rule)
            .collect()
    }

    /// Item nodes in insertion order.
    pub fn item_nodes(&self) -> Vec<&NodeKey> {
        self.nodes()
            .filter(|key| key.class() == NodeClass::Item)
            .collect()
    }

    /// Number of edges ending at `key`.
    pub fn in_degree(&self, key: &NodeKey) -> Option<usize> {
        self.degree(key, Direction::Incoming)
    }

    /// Number of edges leaving `key`.
    pub fn out_degree(&self, key: &NodeKey) -> Option<usize> {
        self.degree(key, Direction::Outgoing)
    }

    fn degree(&self, key: &NodeKey, direction: Direction) -> Option<usize> {
        let idx = *self.index.get(key)?;
        Some(self.graph.edges_directed(idx, direction).count())
    }

    /// Whether the edge `from -> to` exists.
    pub fn contains_edge(&self, from: &NodeKey, to: &NodeKey) -> bool {
        match (self.index.get(from), self.index.get(to)) {
            (Some(&a), Some(&b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    /// Attributes of the edge `from -> to`.
    pub fn edge(&self, from: &NodeKey, to: &NodeKey) -> Option<&RuleEdge> {
        let (a, b) = (*self.index.get(from)?, *self.index.get(to)?);
        let edge = self.graph.find_edge(a, b)?;
        self.graph.edge_weight(edge)
    }

    /// All edges as `(source, target, attributes)`.
    pub fn edges(&self) -> impl Iterator<Item = (&NodeKey, &NodeKey, &RuleEdge)> + '_ {
        self.graph.edge_references().map(move |edge| {
            (
                &self.graph[edge.source()],
                &self.graph[edge.target()],
                edge.weight(),
            )
        })
    }

    /// All edges as `(source position, target position, attributes)`, where a
    /// position is the node's index in [`RuleGraph::nodes`] order.
    pub fn indexed_edges(&self) -> impl Iterator<Item = (usize, usize, &RuleEdge)> + '_ {
        self.graph
            .edge_references()
            .map(|edge| (edge.source().index(), edge.target().index(), edge.weight()))
    }
}
