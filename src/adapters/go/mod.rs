//! Go source adapter built on tree-sitter-go.

pub mod extract;
pub mod loader;
pub mod lower;
pub mod render;

pub use loader::{GoSourceAdapter, build_source_model};
