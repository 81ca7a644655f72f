//! Node centrality measures for undirected, unweighted graphs
//!
//! - Degree centrality: `deg(v) / (n - 1)`
//! - Betweenness centrality: Brandes' algorithm, normalized by `1 / ((n - 1)(n - 2))`
//! - Closeness centrality: Wasserman-Faust variant, safe on disconnected graphs
//!
//! All three return scores in `[0, 1]` for every node of the view. Graphs with
//! fewer than two nodes have no meaningful normalization; callers must reject
//! them before calling in.

use super::common::{GraphView, NodeId};
use super::pathfinding::bfs_distances;
use rayon::prelude::*;
use std::collections::{HashMap, VecDeque};

fn to_node_map(view: &GraphView, scores: Vec<f64>) -> HashMap<NodeId, f64> {
    let mut result = HashMap::with_capacity(view.node_count);
    for (idx, score) in scores.into_iter().enumerate() {
        result.insert(view.index_to_node[idx], score);
    }
    result
}

/// Degree centrality: fraction of the other nodes a node is adjacent to
pub fn degree_centrality(view: &GraphView) -> HashMap<NodeId, f64> {
    let n = view.node_count;
    if n <= 1 {
        return to_node_map(view, vec![0.0; n]);
    }

    let scale = 1.0 / (n - 1) as f64;
    let scores = (0..n).map(|idx| view.degree(idx) as f64 * scale).collect();
    to_node_map(view, scores)
}

/// Betweenness centrality (Brandes, unweighted).
///
/// Sources are processed in index order and their dependencies summed in that
/// order, so the result is bit-for-bit reproducible.
pub fn betweenness_centrality(view: &GraphView) -> HashMap<NodeId, f64> {
    let n = view.node_count;
    let mut centrality = vec![0.0; n];

    let mut stack = Vec::with_capacity(n);
    let mut queue = VecDeque::with_capacity(n);
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut sigma = vec![0.0f64; n];
    let mut dist = vec![-1i64; n];
    let mut delta = vec![0.0f64; n];

    for s in 0..n {
        // Reset per-source state
        stack.clear();
        for p in predecessors.iter_mut() {
            p.clear();
        }
        sigma.iter_mut().for_each(|x| *x = 0.0);
        dist.iter_mut().for_each(|x| *x = -1);
        delta.iter_mut().for_each(|x| *x = 0.0);

        sigma[s] = 1.0;
        dist[s] = 0;
        queue.push_back(s);

        // Shortest-path counting
        while let Some(v) = queue.pop_front() {
            stack.push(v);
            for &w in view.neighbors(v) {
                if dist[w] < 0 {
                    dist[w] = dist[v] + 1;
                    queue.push_back(w);
                }
                if dist[w] == dist[v] + 1 {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
            }
        }

        // Dependency accumulation in reverse BFS order
        while let Some(w) = stack.pop() {
            for &v in &predecessors[w] {
                delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
            }
            if w != s {
                centrality[w] += delta[w];
            }
        }
    }

    // Each unordered pair was visited from both endpoints, which the
    // (n-1)(n-2) denominator (ordered pairs) already accounts for.
    if n > 2 {
        let scale = 1.0 / ((n - 1) as f64 * (n - 2) as f64);
        centrality.iter_mut().for_each(|c| *c *= scale);
    }

    to_node_map(view, centrality)
}

/// Closeness centrality of a single node (Wasserman-Faust).
///
/// `((r - 1) / total) * ((r - 1) / (n - 1))` where `r` counts the nodes reachable
/// from `idx` (itself included) and `total` is the summed distance to them.
fn closeness_of(view: &GraphView, idx: usize) -> f64 {
    let n = view.node_count;
    let mut reachable = 0usize;
    let mut total = 0usize;

    for d in bfs_distances(view, idx).into_iter().flatten() {
        reachable += 1;
        total += d;
    }

    if total == 0 || n <= 1 {
        return 0.0;
    }

    let others = (reachable - 1) as f64;
    (others / total as f64) * (others / (n - 1) as f64)
}

/// Closeness centrality scaled by the reachable fraction of the graph.
///
/// Isolated nodes score 0. Nodes are independent, so they are scored in parallel.
pub fn closeness_centrality(view: &GraphView) -> HashMap<NodeId, f64> {
    let scores: Vec<f64> = (0..view.node_count)
        .into_par_iter()
        .map(|idx| closeness_of(view, idx))
        .collect();
    to_node_map(view, scores)
}
