//! Unweighted shortest-path distances

use super::common::GraphView;
use std::collections::VecDeque;

/// Breadth-First Search distances from `source_idx` to every node.
///
/// Unreachable nodes are `None`; the source itself is `Some(0)`.
pub fn bfs_distances(view: &GraphView, source_idx: usize) -> Vec<Option<usize>> {
    let mut dist = vec![None; view.node_count];
    let mut queue = VecDeque::new();

    dist[source_idx] = Some(0);
    queue.push_back(source_idx);

    while let Some(current_idx) = queue.pop_front() {
        let next_dist = dist[current_idx].map(|d| d + 1);
        for &next_idx in view.neighbors(current_idx) {
            if dist[next_idx].is_none() {
                dist[next_idx] = next_dist;
                queue.push_back(next_idx);
            }
        }
    }

    dist
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bfs_distances() {
        // 0 - 1 - 2 - 3, 4 isolated
        let view = GraphView::from_edges(5, &[(0, 1), (1, 2), (2, 3)]);

        let dist = bfs_distances(&view, 0);
        assert_eq!(dist, vec![Some(0), Some(1), Some(2), Some(3), None]);

        // Undirected: distances are the same walking backwards
        let back = bfs_distances(&view, 3);
        assert_eq!(back[0], Some(3));
    }
}
