use crate::domain::enrichment::{Enrichment, EnrichmentRequest};
use crate::domain::model::SourceModel;
use anyhow::Result;
use std::path::Path;

/// Source model loader port (implemented by the Go parser adapter)
pub trait SourceModelLoader {
    fn load(&self) -> crate::error::Result<SourceModel>;
}

/// Source code reader port
pub trait SourceReader: Send + Sync {
    fn read(&self, path: &Path) -> Result<String>;
}

/// External description capability. Must tolerate concurrent calls; any retry policy
/// lives inside the implementation.
pub trait Enricher: Send + Sync {
    /// Identifies the backend and configuration that produced a result; part of the cache key.
    fn provider_id(&self) -> String;

    fn analyze(&self, request: &EnrichmentRequest) -> Result<Enrichment>;
}

/// Content-addressed enrichment storage.
pub trait EnrichmentStore: Send + Sync {
    /// A hit requires both the source hash and the provider to match.
    fn get(&self, name: &str, source: &str, provider: &str) -> Option<Enrichment>;

    fn set(&self, name: &str, source: &str, provider: &str, payload: &Enrichment);
}
