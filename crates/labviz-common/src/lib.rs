//! # LabViz Common
//!
//! Shared types, errors, and utilities for LabViz.
//!
//! This crate provides the rule record consumed by the rule graph renderer,
//! the workspace-wide error type, and the logging bootstrap used by callers.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::*;
pub use logging::*;
pub use types::*;
pub use utils::*;
