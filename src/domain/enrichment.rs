//! Enrichment orchestration.
//!
//! Cache hits are applied inline. Misses go to a semaphore-bounded set of tokio tasks;
//! each runs the blocking collaborator on the blocking pool and merges its result
//! into the shared node list under a mutex. The call returns after every task ends.

use crate::domain::model::SourceModel;
use crate::domain::node::AnalysisNode;
use crate::domain::ports::{Enricher, EnrichmentStore};
use crate::domain::symbol::TypeSymbol;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{Mutex, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Default ceiling on concurrent collaborator calls.
pub const DEFAULT_CONCURRENCY: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentRequest {
    pub name: String,
    pub package: String,
    pub declaration: String,
    pub methods_source: String,
}

impl EnrichmentRequest {
    pub fn from_symbol(symbol: &TypeSymbol) -> Self {
        Self {
            name: symbol.name.clone(),
            package: symbol.package.clone(),
            declaration: symbol.source.clone(),
            methods_source: symbol.methods_source(),
        }
    }

    /// Content-hash material: declaration plus method sources.
    pub fn cache_material(&self) -> String {
        if self.methods_source.is_empty() {
            return self.declaration.clone();
        }
        format!("{}\n\n{}", self.declaration, self.methods_source)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSummary {
    pub name: String,
    pub summary: String,
}

/// Structured description returned by an [`Enricher`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrichment {
    pub summary: String,
    #[serde(default)]
    pub fields: Vec<ItemSummary>,
    #[serde(default)]
    pub methods: Vec<ItemSummary>,
}

impl Enrichment {
    /// Merge into a node. Items are matched by name; unmatched ones keep their text.
    pub fn apply_to(&self, node: &mut AnalysisNode) {
        if !self.summary.trim().is_empty() {
            node.description = self.summary.clone();
        }
        for item in &self.fields {
            if let Some(field) = node.fields.iter_mut().find(|f| f.name == item.name) {
                field.description = item.summary.clone();
            }
        }
        for item in &self.methods {
            if let Some(method) = node.methods.iter_mut().find(|m| m.name == item.name) {
                method.description = item.summary.clone();
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EnrichmentStats {
    pub cache_hits: usize,
    pub enriched: usize,
    pub failed: usize,
}

/// Describe every node, consulting `store` first. Node order is preserved.
pub async fn enrich_nodes(
    mut nodes: Vec<AnalysisNode>,
    model: &SourceModel,
    enricher: Arc<dyn Enricher>,
    store: Option<Arc<dyn EnrichmentStore>>,
    concurrency: usize,
) -> (Vec<AnalysisNode>, EnrichmentStats) {
    let provider = enricher.provider_id();
    let mut stats = EnrichmentStats::default();
    let mut pending = Vec::new();

    for (idx, node) in nodes.iter_mut().enumerate() {
        let Some(symbol) = model.type_in_package(&node.package, &node.name) else {
            debug!("No symbol for node {}.{}, leaving placeholder", node.package, node.name);
            continue;
        };
        let request = EnrichmentRequest::from_symbol(symbol);
        if let Some(store) = &store
            && let Some(hit) = store.get(&request.name, &request.cache_material(), &provider)
        {
            hit.apply_to(node);
            stats.cache_hits += 1;
            continue;
        }
        pending.push((idx, request));
    }

    info!(
        "Enriching {} nodes with {} ({} cache hits, {} to request)",
        nodes.len(),
        provider,
        stats.cache_hits,
        pending.len()
    );
    if pending.is_empty() {
        return (nodes, stats);
    }

    let shared = Arc::new(Mutex::new(nodes));
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = JoinSet::new();

    for (idx, request) in pending {
        let shared = Arc::clone(&shared);
        let semaphore = Arc::clone(&semaphore);
        let enricher = Arc::clone(&enricher);
        let store = store.clone();
        let provider = provider.clone();

        tasks.spawn(async move {
            let Ok(_permit) = semaphore.acquire_owned().await else {
                return false;
            };
            let name = request.name.clone();
            let outcome = tokio::task::spawn_blocking(move || {
                let result = enricher.analyze(&request);
                (request, result)
            })
            .await;

            match outcome {
                Ok((request, Ok(enrichment))) => {
                    if let Some(node) = shared.lock().await.get_mut(idx) {
                        enrichment.apply_to(node);
                    }
                    if let Some(store) = store {
                        store.set(&request.name, &request.cache_material(), &provider, &enrichment);
                    }
                    true
                }
                Ok((_, Err(err))) => {
                    warn!("Enrichment failed for {}: {:#}", name, err);
                    false
                }
                Err(err) => {
                    warn!("Enrichment worker for {} aborted: {}", name, err);
                    false
                }
            }
        });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(true) => stats.enriched += 1,
            Ok(false) => stats.failed += 1,
            Err(err) => {
                warn!("Enrichment task aborted: {}", err);
                stats.failed += 1;
            }
        }
    }

    let nodes = match Arc::try_unwrap(shared) {
        Ok(mutex) => mutex.into_inner(),
        Err(shared) => shared.lock().await.clone(),
    };
    (nodes, stats)
}
