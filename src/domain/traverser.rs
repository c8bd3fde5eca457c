use crate::domain::dependency::DependencyAnalyzer;
use crate::domain::graph::DependencyGraph;
use crate::domain::model::SourceModel;
use crate::domain::node::AnalysisNode;
use crate::domain::result::AnalysisResult;
use crate::domain::scope::ScopeFilter;
use crate::error::{AnalysisError, Result};
use chrono::Utc;
use std::collections::{HashSet, VecDeque};
use tracing::{debug, info};

/// Traverser - bounded breadth-first expansion from a seed struct
pub struct Traverser<'m> {
    model: &'m SourceModel,
    filter: &'m ScopeFilter<'m>,
    analyzer: DependencyAnalyzer<'m>,
}

impl<'m> Traverser<'m> {
    pub fn new(model: &'m SourceModel, filter: &'m ScopeFilter<'m>) -> Self {
        Self {
            model,
            filter,
            analyzer: DependencyAnalyzer::new(model, filter),
        }
    }

    /// Expand from `seed` up to `max_depth` hops, then detect cycles over the collected edges.
    ///
    /// Fails only when the seed is not a known struct.
    pub fn traverse(&self, seed: &str, max_depth: usize) -> Result<AnalysisResult> {
        let Some(root) = self.model.lookup_type(seed) else {
            return Err(AnalysisError::SeedNotFound {
                seed: seed.to_string(),
                available: self.model.struct_names(),
            });
        };

        let mut visited: HashSet<String> = HashSet::new();
        let mut nodes: Vec<AnalysisNode> = Vec::new();
        let mut total_edges = 0;

        // queue stores (type_name, depth)
        let mut queue: VecDeque<(String, usize)> = VecDeque::new();
        // a `pkg.Name` seed is keyed by its short name, like every edge target
        queue.push_back((root.name.clone(), 0));

        while let Some((name, depth)) = queue.pop_front() {
            if depth > max_depth || visited.contains(&name) {
                continue;
            }
            visited.insert(name.clone());

            let Some(symbol) = self.model.lookup_type(&name) else {
                debug!("No struct declaration for {}, skipping", name);
                continue;
            };

            let edges = self.analyzer.analyze(symbol, depth + 1);
            total_edges += edges.len();

            for edge in &edges {
                if !visited.contains(&edge.to) && self.filter.is_analyzable(&edge.to) {
                    queue.push_back((edge.to.clone(), depth + 1));
                }
            }

            debug!("Visited {} at depth {} ({} edges)", name, depth, edges.len());
            nodes.push(AnalysisNode::new(symbol, depth, edges));
        }

        let graph = DependencyGraph::from_edges(nodes.iter().flat_map(|n| n.edges.iter()));
        let cycles = graph.find_cycles();

        info!(
            "Traversal from {} complete: {} nodes, {} edges, {} cycles",
            seed,
            nodes.len(),
            total_edges,
            cycles.len()
        );

        Ok(AnalysisResult {
            project_path: self.model.root().display().to_string(),
            seed: seed.to_string(),
            max_depth,
            nodes,
            total_edges,
            cycles,
            blacklist: self.filter.blacklist().entries(),
            generated_at: Utc::now(),
        })
    }
}
