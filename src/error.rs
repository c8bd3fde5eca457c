//! Error taxonomy.
//!
//! Only [`AnalysisError`] stops a run. Parse and config failures are reported per
//! call and the pipeline decides whether to continue without the offending input.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that abort an analysis before traversal begins.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("project root does not exist: {0}")]
    RootNotFound(PathBuf),

    #[error("seed struct '{seed}' not found ({} structs available: {})", available.len(), preview(available))]
    SeedNotFound { seed: String, available: Vec<String> },

    #[error("invalid options: {0}")]
    InvalidOptions(String),

    #[error("failed to walk source tree: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("failed to start parser workers: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

/// Per-file failure during SourceModel extraction. Never fatal.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("failed to read {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("failed to load Go grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    #[error("parser produced no tree for {0}")]
    NoTree(PathBuf),

    #[error("syntax error in {path} at line {line}")]
    Syntax { path: PathBuf, line: usize },
}

/// Blacklist configuration failure. Callers may continue without a blacklist.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read blacklist {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed blacklist {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

fn preview(names: &[String]) -> String {
    const LIMIT: usize = 10;
    let mut shown = names.iter().take(LIMIT).cloned().collect::<Vec<_>>().join(", ");
    if names.len() > LIMIT {
        shown.push_str(", ...");
    }
    shown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_not_found_lists_available_structs() {
        let err = AnalysisError::SeedNotFound {
            seed: "Missing".to_string(),
            available: vec!["User".to_string(), "UserService".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("'Missing'"));
        assert!(msg.contains("2 structs available"));
        assert!(msg.contains("User, UserService"));
    }

    #[test]
    fn test_seed_not_found_truncates_long_listing() {
        let available: Vec<String> = (0..15).map(|i| format!("S{}", i)).collect();
        let msg = AnalysisError::SeedNotFound {
            seed: "X".to_string(),
            available,
        }
        .to_string();
        assert!(msg.contains("S9, ..."));
        assert!(!msg.contains("S10"));
    }
}
