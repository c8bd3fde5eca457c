//! Persistent enrichment cache stored as one JSON document.
//!
//! Layout: `<project>/.struct-graph-cache.json`
//! - `version`: schema version; any mismatch discards every entry on load
//! - `entries`: struct name -> {content_hash, provider, payload, cached_at}
//!
//! An entry is served only when both its content hash and provider match the
//! request, so edited sources or a different backend never produce a hit.

use crate::domain::enrichment::Enrichment;
use crate::domain::ports::EnrichmentStore;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;
use tracing::{debug, info, warn};

pub const CACHE_FILE_NAME: &str = ".struct-graph-cache.json";
pub const CACHE_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub name: String,
    pub content_hash: String,
    pub provider: String,
    pub payload: Enrichment,
    pub cached_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CacheDocument {
    version: String,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    entries: HashMap<String, CacheEntry>,
}

/// Hex of the first 8 bytes of SHA-256.
pub fn content_hash(source: &str) -> String {
    let digest = Sha256::digest(source.as_bytes());
    hex::encode(&digest[..8])
}

pub struct JsonFileCache {
    path: PathBuf,
    entries: RwLock<HashMap<String, CacheEntry>>,
    dirty: AtomicBool,
}

impl JsonFileCache {
    /// Cache file inside `project_root`, not yet loaded.
    pub fn new(project_root: &Path) -> Self {
        Self::at(project_root.join(CACHE_FILE_NAME))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: RwLock::new(HashMap::new()),
            dirty: AtomicBool::new(false),
        }
    }

    /// Create and load, degrading to an empty cache on any read problem.
    pub fn open(project_root: &Path) -> Self {
        let cache = Self::new(project_root);
        match cache.load() {
            Ok(count) => debug!("Loaded {} cache entries from {}", count, cache.path.display()),
            Err(err) => warn!("Ignoring unreadable cache {}: {:#}", cache.path.display(), err),
        }
        cache
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace in-memory entries with the file's. Missing file and version mismatch
    /// yield an empty cache and `Ok`; unreadable or malformed files yield an empty
    /// cache and `Err`.
    pub fn load(&self) -> Result<usize> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| anyhow::anyhow!("cache lock poisoned"))?;
        entries.clear();

        if !self.path.exists() {
            return Ok(0);
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read cache file: {}", self.path.display()))?;
        let document: CacheDocument = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse cache file: {}", self.path.display()))?;

        if document.version != CACHE_VERSION {
            info!(
                "Cache version {} does not match {}, starting fresh",
                document.version, CACHE_VERSION
            );
            self.dirty.store(true, Ordering::SeqCst);
            return Ok(0);
        }

        *entries = document.entries;
        Ok(entries.len())
    }

    /// Write the document if anything changed since the last load or persist.
    pub fn persist(&self) -> Result<()> {
        if !self.dirty.load(Ordering::SeqCst) {
            return Ok(());
        }
        let entries = self
            .entries
            .read()
            .map_err(|_| anyhow::anyhow!("cache lock poisoned"))?;
        let document = CacheDocument {
            version: CACHE_VERSION.to_string(),
            updated_at: Utc::now(),
            entries: entries.clone(),
        };
        drop(entries);

        let json = serde_json::to_string_pretty(&document).context("Failed to serialize cache")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write cache file: {}", self.path.display()))?;
        self.dirty.store(false, Ordering::SeqCst);
        debug!("Persisted {} cache entries to {}", document.entries.len(), self.path.display());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EnrichmentStore for JsonFileCache {
    fn get(&self, name: &str, source: &str, provider: &str) -> Option<Enrichment> {
        let entries = self.entries.read().ok()?;
        let entry = entries.get(name)?;
        if entry.content_hash != content_hash(source) || entry.provider != provider {
            return None;
        }
        Some(entry.payload.clone())
    }

    fn set(&self, name: &str, source: &str, provider: &str, payload: &Enrichment) {
        let Ok(mut entries) = self.entries.write() else {
            return;
        };
        entries.insert(
            name.to_string(),
            CacheEntry {
                name: name.to_string(),
                content_hash: content_hash(source),
                provider: provider.to_string(),
                payload: payload.clone(),
                cached_at: Utc::now(),
            },
        );
        self.dirty.store(true, Ordering::SeqCst);
    }
}
