//! Enrichment collaborators.

pub mod command;
pub mod prompt;
pub mod response;

pub use command::CommandEnricher;
