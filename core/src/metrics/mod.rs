pub mod extract;
pub mod series;
pub mod summary;

pub use extract::{load_training_log, parse_log_text, Extraction};
pub use series::{Component, StepRecord, TimeSeries};
pub use summary::RunSummary;
