//! Shared utilities for graph algorithms
//!
//! Provides a read-only, optimized view of an undirected graph topology for algorithm execution.

use std::collections::HashMap;

/// Node Identifier type (u64)
pub type NodeId = u64;

/// A dense, integer-indexed view of an undirected graph using Compressed Sparse Row (CSR) format.
///
/// Every undirected edge `{u, v}` is stored twice: `v` in the neighbour slice of `u`
/// and `u` in the neighbour slice of `v`. Self-loops and parallel edges are not
/// represented; callers are expected to hand over a simple graph.
#[derive(Debug, Clone)]
pub struct GraphView {
    /// Number of nodes
    pub node_count: usize,
    /// Mapping from dense index (0..N) back to NodeId
    pub index_to_node: Vec<NodeId>,
    /// Mapping from NodeId to dense index
    pub node_to_index: HashMap<NodeId, usize>,

    /// Offsets into `targets`. Size = node_count + 1
    pub offsets: Vec<usize>,
    /// Contiguous array of neighbour node indices
    pub targets: Vec<usize>,
}

impl GraphView {
    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.targets.len() / 2
    }

    /// Get the degree of a node (by index)
    pub fn degree(&self, idx: usize) -> usize {
        self.offsets[idx + 1] - self.offsets[idx]
    }

    /// Get the neighbours of a node
    pub fn neighbors(&self, idx: usize) -> &[usize] {
        let start = self.offsets[idx];
        let end = self.offsets[idx + 1];
        &self.targets[start..end]
    }

    /// Build a view from per-node neighbour lists.
    ///
    /// `adjacency[i]` must already be symmetric with the other lists.
    pub fn from_adjacency_list(index_to_node: Vec<NodeId>, adjacency: Vec<Vec<usize>>) -> Self {
        let node_count = index_to_node.len();
        let node_to_index = index_to_node
            .iter()
            .enumerate()
            .map(|(idx, &id)| (id, idx))
            .collect();

        let mut offsets = Vec::with_capacity(node_count + 1);
        let mut targets = Vec::new();

        offsets.push(0);
        for neighbors in adjacency {
            targets.extend(neighbors);
            offsets.push(targets.len());
        }

        GraphView {
            node_count,
            index_to_node,
            node_to_index,
            offsets,
            targets,
        }
    }

    /// Build a view over `node_count` nodes (ids `0..node_count`) from an undirected edge list
    pub fn from_edges(node_count: usize, edges: &[(usize, usize)]) -> Self {
        let mut adjacency = vec![Vec::new(); node_count];
        for &(u, v) in edges {
            adjacency[u].push(v);
            adjacency[v].push(u);
        }
        Self::from_adjacency_list((0..node_count as NodeId).collect(), adjacency)
    }
}
