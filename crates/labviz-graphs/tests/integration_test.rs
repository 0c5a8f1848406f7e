//! Integration tests for labviz-graphs crate.
//!
//! These tests cover rule graph construction properties and input validation.

use std::collections::BTreeSet;

use labviz_common::test_utils::{init_test_logging, rule_fixtures};
use labviz_common::{ItemId, LabVizError, Rule};
use labviz_config::LayoutConfig;
use labviz_graphs::{
    rule_color, spring_layout, DualAxisChart, NodeClass, NodeKey, RuleGraph,
    DEFAULT_RULES_TO_SHOW, SECONDARY_Y_RANGE,
};
use proptest::prelude::*;

fn item_set() -> impl Strategy<Value = BTreeSet<ItemId>> {
    prop::collection::btree_set("[a-f]{1,2}", 0..4)
        .prop_map(|items| items.into_iter().map(ItemId::from).collect())
}

fn rule_table() -> impl Strategy<Value = Vec<Rule>> {
    prop::collection::vec(
        (item_set(), item_set()).prop_map(|(antecedents, consequents)| Rule {
            antecedents,
            consequents,
        }),
        0..8,
    )
}

fn table_and_prefix() -> impl Strategy<Value = (Vec<Rule>, usize)> {
    rule_table().prop_flat_map(|rules| {
        let len = rules.len();
        (Just(rules), 0..=len)
    })
}

proptest! {
    #[test]
    fn prop_one_rule_node_per_shown_rule((rules, shown) in table_and_prefix()) {
        let graph = RuleGraph::build(&rules, shown).unwrap();
        prop_assert_eq!(graph.rule_nodes().len(), shown);
        for i in 0..shown {
            prop_assert_eq!(graph.node_class(&NodeKey::Rule(i)), Some(NodeClass::Rule));
        }
    }

    #[test]
    fn prop_one_edge_per_item_occurrence((rules, shown) in table_and_prefix()) {
        let graph = RuleGraph::build(&rules, shown).unwrap();
        let occurrences: usize = rules[..shown]
            .iter()
            .map(|rule| rule.antecedents.len() + rule.consequents.len())
            .sum();
        prop_assert_eq!(graph.edge_count(), occurrences);
    }

    #[test]
    fn prop_rule_degrees_match_item_sets((rules, shown) in table_and_prefix()) {
        let graph = RuleGraph::build(&rules, shown).unwrap();
        for (i, rule) in rules[..shown].iter().enumerate() {
            let key = NodeKey::Rule(i);
            prop_assert_eq!(graph.in_degree(&key), Some(rule.antecedents.len()));
            prop_assert_eq!(graph.out_degree(&key), Some(rule.consequents.len()));
        }
    }

    #[test]
    fn prop_nodes_partition_into_two_classes((rules, shown) in table_and_prefix()) {
        let graph = RuleGraph::build(&rules, shown).unwrap();
        prop_assert_eq!(
            graph.rule_nodes().len() + graph.item_nodes().len(),
            graph.node_count()
        );
        prop_assert!(graph.rule_nodes().iter().all(|key| matches!(key, NodeKey::Rule(_))));
        prop_assert!(graph.item_nodes().iter().all(|key| matches!(key, NodeKey::Item(_))));
    }

    #[test]
    fn prop_too_many_rules_fail(rules in rule_table(), extra in 1usize..5) {
        let requested = rules.len() + extra;
        let result = RuleGraph::build(&rules, requested);
        let is_out_of_range = matches!(
            result,
            Err(LabVizError::IndexOutOfRange { requested: r, available: a })
                if r == requested && a == rules.len()
        );
        prop_assert!(is_out_of_range);
    }

    #[test]
    fn prop_layout_within_scale((rules, shown) in table_and_prefix()) {
        let graph = RuleGraph::build(&rules, shown).unwrap();
        let layout = spring_layout(&graph, &LayoutConfig::default());
        prop_assert_eq!(layout.len(), graph.node_count());
        for &(x, y) in layout.positions() {
            prop_assert!(x.abs() <= 1.0 + 1e-9 && y.abs() <= 1.0 + 1e-9);
        }
    }

    #[test]
    fn prop_secondary_range_ignores_data(y2 in prop::collection::vec(-1e6f64..1e6, 1..20)) {
        let x: Vec<f64> = (0..y2.len()).map(|i| i as f64).collect();
        let chart = DualAxisChart::new(&x, &x, &y2, "x", "a", "b").unwrap();
        prop_assert_eq!(chart.secondary_y_range(), SECONDARY_Y_RANGE);
    }
}

#[test]
fn test_milk_bread_graph() {
    init_test_logging();

    let graph = RuleGraph::build(&rule_fixtures::milk_bread(), 1).unwrap();
    let nodes: Vec<&NodeKey> = graph.nodes().collect();
    assert_eq!(
        nodes,
        [&NodeKey::Rule(0), &NodeKey::item("milk"), &NodeKey::item("bread")]
    );

    let edges: Vec<(String, String)> = graph
        .edges()
        .map(|(from, to, _)| (from.label(), to.label()))
        .collect();
    assert_eq!(edges.len(), 2);
    assert!(edges.contains(&("milk".to_string(), "R0".to_string())));
    assert!(edges.contains(&("R0".to_string(), "bread".to_string())));
}

#[test]
fn test_ten_of_three_rules_is_out_of_range() {
    let result = RuleGraph::build(&rule_fixtures::grocery_rules(), 10);
    assert!(matches!(
        result,
        Err(LabVizError::IndexOutOfRange {
            requested: 10,
            available: 3
        })
    ));
}

#[test]
fn test_default_rule_count() {
    let rules = rule_fixtures::generated_rules(8);
    let graph = RuleGraph::build(&rules, DEFAULT_RULES_TO_SHOW).unwrap();
    assert_eq!(graph.rule_count(), 5);
}

#[test]
fn test_edge_color_is_stable_per_rule() {
    let graph = RuleGraph::build(&rule_fixtures::grocery_rules(), 3).unwrap();
    for (_, _, edge) in graph.edges() {
        assert_eq!(
            labviz_graphs::viridis(edge.intensity),
            rule_color(edge.rule)
        );
    }
}

#[test]
fn test_dual_axis_example_ranges() {
    let chart = DualAxisChart::new(
        &[1.0, 2.0, 3.0],
        &[10.0, 20.0, 30.0],
        &[0.1, 0.5, 0.9],
        "x",
        "y1",
        "y2",
    )
    .unwrap();
    let range = chart.secondary_y_range();
    assert_eq!((range.start, range.end), (-1.0, 1.0));
}
