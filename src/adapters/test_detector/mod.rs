//! Test code detection adapters
//!
//! Test files are excluded from the source model; each language marks them differently.

mod go;

pub use go::GoTestDetector;

use std::path::Path;

/// Trait for detecting test code based on language conventions
pub trait TestDetector: Send + Sync {
    /// Check if a file path indicates test code
    fn is_test_file(&self, file_path: &Path) -> bool;

    /// Get the language this detector is for
    fn language(&self) -> &str;
}
