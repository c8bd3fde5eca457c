pub mod analyzer;
pub mod config;

pub use analyzer::{Analyzer, RunReport};
pub use config::{AnalyzerOptions, load_blacklist};
