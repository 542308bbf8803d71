pub mod config;
pub mod pruning;
pub mod runner;
