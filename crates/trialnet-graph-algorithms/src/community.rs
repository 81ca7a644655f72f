//! Connected component discovery

use super::common::GraphView;
use std::collections::VecDeque;

/// Component label of every node, by dense index
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ComponentsResult {
    /// `labels[idx]` is the component of node `idx`; components are numbered
    /// in order of their lowest node index
    pub labels: Vec<usize>,
    /// Node count per component label
    pub sizes: Vec<usize>,
}

impl ComponentsResult {
    /// Number of connected components
    pub fn count(&self) -> usize {
        self.sizes.len()
    }

    /// Size of the largest component (0 for an empty graph)
    pub fn largest(&self) -> usize {
        self.sizes.iter().copied().max().unwrap_or(0)
    }
}

/// Connected components of an undirected graph, labelled by BFS flood fill.
///
/// Isolated nodes form singleton components.
pub fn connected_components(view: &GraphView) -> ComponentsResult {
    const UNLABELLED: usize = usize::MAX;

    let mut labels = vec![UNLABELLED; view.node_count];
    let mut sizes = Vec::new();
    let mut queue = VecDeque::new();

    for start in 0..view.node_count {
        if labels[start] != UNLABELLED {
            continue;
        }

        let label = sizes.len();
        labels[start] = label;
        queue.push_back(start);
        let mut size = 0;

        while let Some(u) = queue.pop_front() {
            size += 1;
            for &v in view.neighbors(u) {
                if labels[v] == UNLABELLED {
                    labels[v] = label;
                    queue.push_back(v);
                }
            }
        }
        sizes.push(size);
    }

    ComponentsResult { labels, sizes }
}
