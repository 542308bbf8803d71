//! Static chart rendering for the analysis tools.
//!
//! Every chart is a PNG sized as a figure in inches at [`geometry::DPI`].

pub mod geometry;
pub mod loss;
pub mod palette;
pub mod pruning;

pub use loss::{render_component_grid, render_total_loss, PlotSeries};
pub use pruning::render_pruning_dashboard;
