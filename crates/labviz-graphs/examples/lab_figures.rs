//! Renders both lab figures with the configuration in `labviz.toml`, if present.
//!
//! ```text
//! cargo run -p labviz-graphs --example lab_figures -- rules.json
//! ```

use labviz_common::{init_logging, rules_from_json, Rule, DEFAULT_LOG_DIRECTIVE};
use labviz_config::ConfigLoader;
use labviz_graphs::{GraphManager, DEFAULT_RULES_TO_SHOW};
use tracing::{error, info};

fn main() {
    init_logging(DEFAULT_LOG_DIRECTIVE);

    if let Err(e) = run() {
        error!("Rendering failed: {}", e);
        std::process::exit(1);
    }
}

fn run() -> labviz_common::Result<()> {
    let config = ConfigLoader::new("labviz.toml").load_or_default()?;
    let manager = GraphManager::new(config)?;

    let rules = match std::env::args().nth(1) {
        Some(path) => rules_from_json(&std::fs::read_to_string(path)?)?,
        None => vec![
            Rule::new(["milk"], ["bread"]),
            Rule::new(["beer", "chips"], ["salsa"]),
            Rule::new(["bread", "butter"], ["milk", "jam"]),
            Rule::new(["diapers"], ["beer"]),
            Rule::new(["coffee", "milk"], ["sugar"]),
        ],
    };
    let shown = DEFAULT_RULES_TO_SHOW.min(rules.len());
    let path = manager.draw_rules_graph(&rules, shown)?;
    info!("Rule graph: {}", path.display());

    let clusters: Vec<f64> = (2..=8).map(f64::from).collect();
    let inertia = [1520.0, 980.0, 610.0, 520.0, 470.0, 440.0, 420.0];
    let silhouette = [0.42, 0.51, 0.58, 0.49, 0.44, 0.39, 0.35];
    let path = manager.two_plots(
        &clusters,
        &inertia,
        &silhouette,
        "number of clusters",
        "inertia",
        "silhouette score",
    )?;
    info!("Dual-axis chart: {}", path.display());
    Ok(())
}
