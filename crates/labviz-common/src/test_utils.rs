//! Test utilities and shared fixtures for LabViz.
//!
//! Available to other crates through the `testing` feature.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        // Another harness may already own the global subscriber.
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Association rule fixtures.
pub mod rule_fixtures {
    use crate::Rule;

    /// The single-rule example `{milk} -> {bread}`.
    pub fn milk_bread() -> Vec<Rule> {
        vec![Rule::new(["milk"], ["bread"])]
    }

    /// Three grocery rules sharing some items.
    pub fn grocery_rules() -> Vec<Rule> {
        vec![
            Rule::new(["milk"], ["bread"]),
            Rule::new(["beer", "chips"], ["salsa"]),
            Rule::new(["bread", "butter"], ["milk", "jam"]),
        ]
    }

    /// `count` rules with `i % 3 + 1` antecedents and `i % 2 + 1` consequents
    /// drawn from a pool of ten items.
    pub fn generated_rules(count: usize) -> Vec<Rule> {
        (0..count)
            .map(|i| {
                let antecedents = (0..i % 3 + 1).map(|j| format!("item{}", (i + j) % 10));
                let consequents = (0..i % 2 + 1).map(|j| format!("item{}", (i + j + 5) % 10));
                Rule::new(antecedents, consequents)
            })
            .collect()
    }
}

/// Numeric series fixtures.
pub mod series_fixtures {
    /// An elbow-method sweep: cluster counts, inertia, and silhouette scores.
    pub fn kmeans_sweep() -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let x = vec![2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let inertia = vec![1520.0, 980.0, 610.0, 520.0, 470.0, 440.0, 420.0];
        let silhouette = vec![0.42, 0.51, 0.58, 0.49, 0.44, 0.39, 0.35];
        (x, inertia, silhouette)
    }
}

/// Configuration-related test fixtures.
pub mod config_fixtures {
    /// A minimal TOML configuration that only overrides the output section.
    pub fn minimal_config_toml() -> &'static str {
        r#"
[output]
directory = "out"
format = "svg"
display = "file"
"#
    }

    /// A full YAML configuration.
    pub fn full_config_yaml() -> &'static str {
        concat!(
            "output:\n",
            "  directory: \"figures\"\n",
            "  format: \"png\"\n",
            "  display: \"file\"\n",
            "rule_graph:\n",
            "  width: 1200\n",
            "  height: 900\n",
            "  node_radius: 14\n",
            "  font_size: 14\n",
            "  label_offset: 0.07\n",
            "  max_label_chars: 24\n",
            "  rule_node_color: \"#ffff00\"\n",
            "  item_node_color: \"#008000\"\n",
            "  layout:\n",
            "    k: 16.0\n",
            "    iterations: 80\n",
            "    scale: 1.0\n",
            "    seed: 7\n",
            "dual_axis:\n",
            "  width: 900\n",
            "  height: 600\n",
            "  font_size: 15\n",
            "  left_color: \"#d62728\"\n",
            "  right_color: \"#1f77b4\"\n",
        )
    }
}
