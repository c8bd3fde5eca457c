use crate::domain::edge::DependencyEdge;
use crate::domain::node::AnalysisNode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The artifact handed to renderers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub project_path: String,
    pub seed: String,
    pub max_depth: usize,
    /// BFS discovery order.
    pub nodes: Vec<AnalysisNode>,
    pub total_edges: usize,
    pub cycles: Vec<Vec<String>>,
    #[serde(default)]
    pub blacklist: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

impl AnalysisResult {
    pub fn node(&self, name: &str) -> Option<&AnalysisNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn nodes_at_depth(&self, depth: usize) -> Vec<&AnalysisNode> {
        self.nodes.iter().filter(|n| n.depth == depth).collect()
    }

    pub fn total_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }

    pub fn all_edges(&self) -> impl Iterator<Item = &DependencyEdge> {
        self.nodes.iter().flat_map(|n| n.edges.iter())
    }

    /// Outgoing edges of `name`; empty when the node was not visited.
    pub fn edges_of(&self, name: &str) -> &[DependencyEdge] {
        self.node(name).map(|n| n.edges.as_slice()).unwrap_or(&[])
    }

    /// Names of visited nodes with an edge into `name`, in discovery order.
    pub fn dependents_of(&self, name: &str) -> Vec<&str> {
        let mut out = Vec::new();
        for node in &self.nodes {
            if node.edges.iter().any(|e| e.to == name) && !out.contains(&node.name.as_str()) {
                out.push(node.name.as_str());
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::edge::DependencyKind;
    use crate::domain::node::PLACEHOLDER_DESCRIPTION;

    fn node(name: &str, depth: usize, targets: &[&str]) -> AnalysisNode {
        AnalysisNode {
            name: name.to_string(),
            package: "p".to_string(),
            description: PLACEHOLDER_DESCRIPTION.to_string(),
            depth,
            fields: Vec::new(),
            methods: Vec::new(),
            edges: targets
                .iter()
                .map(|t| DependencyEdge::new(name, *t, DependencyKind::Field, "f", depth + 1))
                .collect(),
        }
    }

    fn result() -> AnalysisResult {
        AnalysisResult {
            project_path: "/p".to_string(),
            seed: "A".to_string(),
            max_depth: 2,
            nodes: vec![node("A", 0, &["B", "C"]), node("B", 1, &["C"]), node("C", 1, &[])],
            total_edges: 3,
            cycles: Vec::new(),
            blacklist: Vec::new(),
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_queries() {
        let r = result();
        assert_eq!(r.total_nodes(), 3);
        assert_eq!(r.node("B").map(|n| n.depth), Some(1));
        assert!(r.node("Z").is_none());
        assert_eq!(r.nodes_at_depth(1).len(), 2);
        assert_eq!(r.all_edges().count(), 3);
        assert_eq!(r.edges_of("A").len(), 2);
        assert!(r.edges_of("Z").is_empty());
        assert_eq!(r.dependents_of("C"), vec!["A", "B"]);
        assert!(!r.has_cycles());
    }

    #[test]
    fn test_serializes_nodes_in_order() {
        let json = serde_json::to_value(result()).unwrap();
        let names: Vec<_> = json["nodes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|n| n["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(json["nodes"][0]["edges"][0]["kind"], "field");
    }
}
