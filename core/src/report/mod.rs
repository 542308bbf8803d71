//! Plain-text reports printed by the analysis tools.

pub mod comparison;
pub mod pruning;

pub use comparison::{format_comparison, NamedSummary, INSUFFICIENT_DATA};
pub use pruning::format_pruning_report;
