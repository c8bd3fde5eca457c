use crate::adapters::cache::JsonFileCache;
use crate::adapters::go::GoSourceAdapter;
use crate::app::config::AnalyzerOptions;
use crate::domain::enrichment::{EnrichmentStats, enrich_nodes};
use crate::domain::model::{ModelStats, SourceModel};
use crate::domain::ports::{Enricher, EnrichmentStore, SourceModelLoader};
use crate::domain::result::AnalysisResult;
use crate::domain::scope::ScopeFilter;
use crate::domain::traverser::Traverser;
use crate::error::{AnalysisError, Result};
use std::sync::Arc;
use tracing::{info, warn};

/// Outcome of one [`Analyzer::run`].
#[derive(Debug, Clone)]
pub struct RunReport {
    pub result: AnalysisResult,
    pub model_stats: ModelStats,
    /// `None` when no enricher was supplied.
    pub enrichment: Option<EnrichmentStats>,
}

/// Wires the Go adapter, the domain services and the enrichment cache together.
pub struct Analyzer {
    options: AnalyzerOptions,
}

impl Analyzer {
    pub fn new(options: AnalyzerOptions) -> Self {
        Self { options }
    }

    pub fn load_model(&self) -> Result<SourceModel> {
        if !self.options.project_path.is_dir() {
            return Err(AnalysisError::RootNotFound(self.options.project_path.clone()));
        }
        GoSourceAdapter::new(&self.options.project_path)
            .with_workers(self.options.parse_workers)
            .load()
    }

    /// Traverse an already-built model. Blacklist file problems are logged and ignored.
    pub fn analyze(&self, model: &SourceModel) -> Result<AnalysisResult> {
        let (blacklist, error) = self.options.blacklist();
        if let Some(err) = error {
            warn!("Continuing without blacklist file: {}", err);
        }
        if !blacklist.is_empty() {
            info!("Blacklist: {}", blacklist.entries().join(", "));
        }

        let filter = ScopeFilter::new(model, blacklist);
        Traverser::new(model, &filter).traverse(&self.options.seed, self.options.max_depth)
    }

    /// Full pipeline: parse, traverse, then describe nodes when `enricher` is given.
    pub async fn run(&self, enricher: Option<Arc<dyn Enricher>>) -> Result<RunReport> {
        self.options.validate()?;

        let model = self.load_model()?;
        let mut result = self.analyze(&model)?;

        let enrichment = match enricher {
            Some(enricher) => Some(self.enrich(&model, &mut result, enricher).await),
            None => None,
        };

        Ok(RunReport {
            result,
            model_stats: model.stats().clone(),
            enrichment,
        })
    }

    async fn enrich(
        &self,
        model: &SourceModel,
        result: &mut AnalysisResult,
        enricher: Arc<dyn Enricher>,
    ) -> EnrichmentStats {
        let cache = self
            .options
            .enable_cache
            .then(|| Arc::new(JsonFileCache::open(&self.options.project_path)));
        if let Some(cache) = &cache {
            info!(
                "Enrichment cache {} holds {} entries",
                cache.path().display(),
                cache.len()
            );
        }
        let store = cache
            .clone()
            .map(|cache| cache as Arc<dyn EnrichmentStore>);

        let nodes = std::mem::take(&mut result.nodes);
        let (nodes, stats) = enrich_nodes(
            nodes,
            model,
            enricher,
            store,
            self.options.enrichment_concurrency,
        )
        .await;
        result.nodes = nodes;

        if let Some(cache) = cache
            && let Err(err) = cache.persist()
        {
            warn!("Failed to save enrichment cache: {:#}", err);
        }

        info!(
            "Enrichment done: {} cached, {} described, {} failed",
            stats.cache_hits, stats.enriched, stats.failed
        );
        stats
    }
}
