use crate::adapters::go::loader::MAX_PARSE_WORKERS;
use crate::domain::blacklist::Blacklist;
use crate::domain::enrichment::DEFAULT_CONCURRENCY;
use crate::error::{AnalysisError, ConfigError};
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const DEFAULT_MAX_DEPTH: usize = 2;

/// Everything one analysis run needs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalyzerOptions {
    pub project_path: PathBuf,
    pub seed: String,
    pub max_depth: usize,
    pub blacklist_file: Option<PathBuf>,
    pub blacklist_types: Vec<String>,
    pub blacklist_packages: Vec<String>,
    pub enable_cache: bool,
    pub enrichment_concurrency: usize,
    pub parse_workers: usize,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            project_path: PathBuf::from("."),
            seed: String::new(),
            max_depth: DEFAULT_MAX_DEPTH,
            blacklist_file: None,
            blacklist_types: Vec::new(),
            blacklist_packages: Vec::new(),
            enable_cache: true,
            enrichment_concurrency: DEFAULT_CONCURRENCY,
            parse_workers: MAX_PARSE_WORKERS,
        }
    }
}

impl AnalyzerOptions {
    pub fn new(project_path: impl Into<PathBuf>, seed: impl Into<String>) -> Self {
        Self {
            project_path: project_path.into(),
            seed: seed.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.seed.trim().is_empty() {
            return Err(AnalysisError::InvalidOptions(
                "seed struct name is empty".to_string(),
            ));
        }
        if self.enrichment_concurrency == 0 {
            return Err(AnalysisError::InvalidOptions(
                "enrichment concurrency must be at least 1".to_string(),
            ));
        }
        if self.parse_workers == 0 {
            return Err(AnalysisError::InvalidOptions(
                "parse workers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Blacklist from `blacklist_file` (if any) merged with the inline entries.
    ///
    /// A file that cannot be loaded is reported to the caller together with the
    /// inline-only blacklist, so the run can continue.
    pub fn blacklist(&self) -> (Blacklist, Option<ConfigError>) {
        let (mut blacklist, error) = match &self.blacklist_file {
            Some(path) => match load_blacklist(path) {
                Ok(blacklist) => (blacklist, None),
                Err(err) => (Blacklist::new(), Some(err)),
            },
            None => (Blacklist::new(), None),
        };
        blacklist.extend(
            self.blacklist_types.iter().cloned(),
            self.blacklist_packages.iter().cloned(),
        );
        (blacklist, error)
    }
}

/// Read a YAML blacklist. A missing file yields an empty blacklist.
pub fn load_blacklist(path: &Path) -> Result<Blacklist, ConfigError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Blacklist::new()),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    Blacklist::from_yaml_str(&text).map_err(|source| ConfigError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::type_ref::TypeRef;

    #[test]
    fn test_defaults() {
        let options = AnalyzerOptions::new("/tmp/app", "UserService");
        assert_eq!(options.max_depth, 2);
        assert!(options.enable_cache);
        assert_eq!(options.enrichment_concurrency, 3);
        assert_eq!(options.parse_workers, 8);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        assert!(AnalyzerOptions::new(".", "  ").validate().is_err());

        let mut options = AnalyzerOptions::new(".", "A");
        options.enrichment_concurrency = 0;
        assert!(matches!(
            options.validate(),
            Err(AnalysisError::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_deserialize_partial() {
        let options: AnalyzerOptions =
            serde_yaml::from_str("seed: Service\nmax_depth: 4\nblacklist_types: [Logger]\n").unwrap();
        assert_eq!(options.seed, "Service");
        assert_eq!(options.max_depth, 4);
        assert_eq!(options.blacklist_types, vec!["Logger".to_string()]);
        assert!(options.enable_cache);
    }

    #[test]
    fn test_load_blacklist_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let blacklist = load_blacklist(&dir.path().join("nope.yaml")).unwrap();
        assert!(blacklist.is_empty());
    }

    #[test]
    fn test_load_blacklist_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blacklist.yaml");
        std::fs::write(&path, "types: [unterminated").unwrap();
        assert!(matches!(
            load_blacklist(&path),
            Err(ConfigError::Malformed { .. })
        ));
    }

    #[test]
    fn test_inline_entries_merge_with_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blacklist.yaml");
        std::fs::write(&path, "types:\n  - Logger\npackages:\n  - metrics\n").unwrap();

        let mut options = AnalyzerOptions::new(dir.path(), "Service");
        options.blacklist_file = Some(path);
        options.blacklist_types = vec!["Tracer".to_string()];
        let (blacklist, error) = options.blacklist();

        assert!(error.is_none());
        assert!(blacklist.is_blocked(&TypeRef::parse("Logger")));
        assert!(blacklist.is_blocked(&TypeRef::parse("Tracer")));
        assert!(blacklist.is_blocked(&TypeRef::parse("metrics.Counter")));
    }

    #[test]
    fn test_broken_file_keeps_inline_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blacklist.yaml");
        std::fs::write(&path, "types: {").unwrap();

        let mut options = AnalyzerOptions::new(dir.path(), "Service");
        options.blacklist_file = Some(path);
        options.blacklist_types = vec!["Tracer".to_string()];
        let (blacklist, error) = options.blacklist();

        assert!(error.is_some());
        assert_eq!(blacklist.entries(), vec!["Tracer".to_string()]);
    }
}
