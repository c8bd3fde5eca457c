use super::extract::parse_file;
use crate::adapters::fs::discovery::discover_go_files;
use crate::adapters::fs::reader::FileSourceReader;
use crate::domain::model::SourceModel;
use crate::domain::ports::{SourceModelLoader, SourceReader};
use crate::domain::symbol::FileSymbols;
use crate::error::{AnalysisError, ParseError, Result};
use rayon::prelude::*;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Upper bound on parser threads regardless of core count.
pub const MAX_PARSE_WORKERS: usize = 8;

/// Builds a [`SourceModel`] from a Go module on disk.
pub struct GoSourceAdapter {
    root: PathBuf,
    reader: Arc<dyn SourceReader>,
    workers: usize,
}

impl GoSourceAdapter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            reader: Arc::new(FileSourceReader::new()),
            workers: MAX_PARSE_WORKERS,
        }
    }

    pub fn with_reader(mut self, reader: Arc<dyn SourceReader>) -> Self {
        self.reader = reader;
        self
    }

    /// Requested worker count; clamped to `1..=MAX_PARSE_WORKERS` and the core count.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    fn worker_count(&self) -> usize {
        self.workers
            .min(num_cpus::get())
            .clamp(1, MAX_PARSE_WORKERS)
    }

    fn parse_one(&self, path: &Path) -> std::result::Result<FileSymbols, ParseError> {
        let source = self.reader.read(path).map_err(|err| ParseError::Read {
            path: path.to_path_buf(),
            message: format!("{:#}", err),
        })?;
        let mut symbols = parse_file(path, &source)?;
        symbols.path = path
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf());
        for t in &mut symbols.types {
            t.file_path = symbols.path.clone();
        }
        Ok(symbols)
    }
}

impl SourceModelLoader for GoSourceAdapter {
    fn load(&self) -> Result<SourceModel> {
        if !self.root.is_dir() {
            return Err(AnalysisError::RootNotFound(self.root.clone()));
        }

        let root_id = discover_root_id(&self.root, self.reader.as_ref());
        let files = discover_go_files(&self.root)?;
        let workers = self.worker_count();
        info!(
            "Parsing {} Go files under {} with {} workers (module {})",
            files.len(),
            self.root.display(),
            workers,
            root_id
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()?;
        // collect() keeps input order, so the merge below is deterministic
        let parsed: Vec<(PathBuf, std::result::Result<FileSymbols, ParseError>)> = pool.install(|| {
            files
                .par_iter()
                .map(|path| (path.clone(), self.parse_one(path)))
                .collect()
        });

        let mut extracted = Vec::with_capacity(parsed.len());
        let mut skipped = Vec::new();
        for (path, outcome) in parsed {
            match outcome {
                Ok(symbols) => extracted.push(symbols),
                Err(err) => {
                    warn!("Skipping {}: {}", path.display(), err);
                    skipped.push(path);
                }
            }
        }

        let model = SourceModel::from_files(&self.root, root_id, extracted, skipped);
        info!(
            "Source model ready: {} structs, {} interfaces, {} packages ({} files parsed, {} skipped)",
            model.types().len(),
            model.interfaces().len(),
            model.packages().len(),
            model.stats().files_parsed,
            model.stats().skipped_files.len()
        );
        if model.stats().orphan_methods > 0 {
            debug!(
                "{} methods have non-struct receivers",
                model.stats().orphan_methods
            );
        }
        Ok(model)
    }
}

/// Module path from `go.mod`, else the root directory name.
pub fn discover_root_id(root: &Path, reader: &dyn SourceReader) -> String {
    let manifest = root.join("go.mod");
    if manifest.is_file() {
        match reader.read(&manifest) {
            Ok(content) => {
                if let Some(module) = parse_module_line(&content) {
                    return module;
                }
                debug!("No module line in {}", manifest.display());
            }
            Err(err) => warn!("Failed to read {}: {:#}", manifest.display(), err),
        }
    }
    root.canonicalize()
        .ok()
        .as_deref()
        .unwrap_or(root)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn parse_module_line(content: &str) -> Option<String> {
    let pattern = Regex::new(r"^\s*module\s+(\S+)").ok()?;
    content.lines().find_map(|line| {
        pattern
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim_matches('"').to_string())
    })
}

/// Convenience wrapper over [`GoSourceAdapter`].
pub fn build_source_model(root: &Path) -> Result<SourceModel> {
    GoSourceAdapter::new(root).load()
}
