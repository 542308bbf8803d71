//! Analysis core for the sketch-generation benchmarks.
//!
//! Turns raw training logs into per-step loss series and run summaries,
//! formats side-by-side comparison reports, and profiles stroke opacity in
//! SVG outputs to judge how much a pruning pass removed.

pub mod math;
pub mod metrics;
pub mod opacity;
pub mod prelude;
pub mod report;
pub mod telemetry;

pub use metrics::{Component, RunSummary, StepRecord, TimeSeries};
pub use opacity::{OpacityBuckets, OpacityProfile};
pub use prelude::{AnalysisError, AnalysisResult};
