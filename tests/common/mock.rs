//! Mock implementations for integration tests.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Result, anyhow, bail};
use struct_graph::domain::enrichment::{Enrichment, EnrichmentRequest, ItemSummary};
use struct_graph::domain::ports::{Enricher, SourceReader};

/// In-memory SourceReader for testing.
pub struct MockSourceReader {
    files: HashMap<PathBuf, String>,
}

impl MockSourceReader {
    pub fn new() -> Self {
        Self {
            files: HashMap::new(),
        }
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }
}

impl Default for MockSourceReader {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceReader for MockSourceReader {
    fn read(&self, path: &Path) -> Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow!("File not found: {}", path.display()))
    }
}

/// Enricher that describes every struct as "<Name> does things" and counts calls.
pub struct MockEnricher {
    calls: AtomicUsize,
    requested: Mutex<Vec<String>>,
    failing: HashSet<String>,
}

impl MockEnricher {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
            failing: HashSet::new(),
        }
    }

    /// Fail every request for `name`.
    pub fn failing_on(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requested(&self) -> Vec<String> {
        let mut names = self.requested.lock().unwrap().clone();
        names.sort();
        names
    }
}

impl Default for MockEnricher {
    fn default() -> Self {
        Self::new()
    }
}

impl Enricher for MockEnricher {
    fn provider_id(&self) -> String {
        "mock".to_string()
    }

    fn analyze(&self, request: &EnrichmentRequest) -> Result<Enrichment> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(request.name.clone());
        if self.failing.contains(&request.name) {
            bail!("backend refused {}", request.name);
        }
        Ok(Enrichment {
            summary: format!("{} does things", request.name),
            fields: vec![ItemSummary {
                name: "repo".to_string(),
                summary: "storage handle".to_string(),
            }],
            methods: Vec::new(),
        })
    }
}
