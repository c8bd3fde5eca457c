//! struct-graph library: Go struct dependency extraction, bounded traversal and enrichment.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
