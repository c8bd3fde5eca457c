use crate::domain::edge::{DependencyEdge, DependencyKind};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Type name used as a graph key
pub type TypeName = String;

/// Dependency Graph - the collected edges as a petgraph structure
///
/// Nodes are created in first-mention order; at most one edge is kept per ordered
/// pair (the first kind seen), since cycles only care about reachability.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    /// The directed graph of type names and dependency kinds
    pub graph: DiGraph<TypeName, DependencyKind>,

    /// Mapping from type name to node index
    pub name_to_node: HashMap<TypeName, NodeIndex>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_edges<'a>(edges: impl IntoIterator<Item = &'a DependencyEdge>) -> Self {
        let mut graph = Self::new();
        for edge in edges {
            let from = graph.add_node(&edge.from);
            let to = graph.add_node(&edge.to);
            graph.add_edge(from, to, edge.kind);
        }
        graph
    }

    pub fn add_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.name_to_node.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.name_to_node.insert(name.to_string(), idx);
        idx
    }

    pub fn add_edge(&mut self, source: NodeIndex, target: NodeIndex, kind: DependencyKind) {
        if self.graph.find_edge(source, target).is_none() {
            self.graph.add_edge(source, target, kind);
        }
    }

    pub fn get_node_by_name(&self, name: &str) -> Option<NodeIndex> {
        self.name_to_node.get(name).copied()
    }

    pub fn name(&self, idx: NodeIndex) -> &str {
        &self.graph[idx]
    }

    /// Successors in edge insertion order.
    pub fn successors(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        // petgraph yields the most recently added edge first
        let mut out: Vec<NodeIndex> = self.graph.neighbors(idx).collect();
        out.reverse();
        out
    }

    /// Depth-first cycle search from every unvisited node in insertion order.
    ///
    /// Each back edge to a node on the recursion stack yields one closed path
    /// `[A, B, C, A]`. Equivalent rotations are not merged.
    pub fn find_cycles(&self) -> Vec<Vec<TypeName>> {
        let count = self.graph.node_count();
        let mut visited = vec![false; count];
        let mut on_stack = vec![false; count];
        let mut path = Vec::new();
        let mut cycles = Vec::new();

        for idx in self.graph.node_indices() {
            if !visited[idx.index()] {
                self.dfs(idx, &mut visited, &mut on_stack, &mut path, &mut cycles);
            }
        }
        cycles
    }

    fn dfs(
        &self,
        idx: NodeIndex,
        visited: &mut [bool],
        on_stack: &mut [bool],
        path: &mut Vec<NodeIndex>,
        cycles: &mut Vec<Vec<TypeName>>,
    ) {
        visited[idx.index()] = true;
        on_stack[idx.index()] = true;
        path.push(idx);

        for next in self.successors(idx) {
            if !visited[next.index()] {
                self.dfs(next, visited, on_stack, path, cycles);
            } else if on_stack[next.index()]
                && let Some(start) = path.iter().position(|&n| n == next)
            {
                let mut cycle: Vec<TypeName> =
                    path[start..].iter().map(|&n| self.name(n).to_string()).collect();
                cycle.push(self.name(next).to_string());
                cycles.push(cycle);
            }
        }

        path.pop();
        on_stack[idx.index()] = false;
    }
}
