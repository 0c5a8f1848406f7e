//! # LabViz Graphs
//!
//! Association-rule graphs and dual-axis line charts rendered natively with
//! plotters.
//!
//! [`RuleGraph`] turns the first rules of a mined rule table into a directed
//! graph of item and rule nodes, laid out by [`spring_layout`] and drawn by
//! [`RuleGraphRenderer`]. [`DualAxisChartRenderer`] plots two differently
//! scaled series against one x-axis. [`GraphManager`] ties both to a
//! configuration and shows the resulting [`Figure`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod dual_axis;
pub mod figure;
pub mod layout;
pub mod manager;
pub mod palette;
pub mod rule_graph;
pub mod rule_graph_renderer;
pub mod traits;

pub use dual_axis::*;
pub use figure::*;
pub use layout::*;
pub use manager::*;
pub use palette::*;
pub use rule_graph::*;
pub use rule_graph_renderer::*;
pub use traits::*;
