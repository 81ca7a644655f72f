//! Graph algorithms module
//!
//! Algorithms are implemented in the `trialnet-graph-algorithms` crate.
//! This module provides the integration/adapter layer.

use crate::network::TrialNetwork;
use trialnet_graph_algorithms::{GraphView, NodeId as AlgoNodeId};

// Re-export algorithms
pub use trialnet_graph_algorithms::{
    betweenness_centrality, closeness_centrality, connected_components, degree_centrality,
    ComponentsResult,
};

/// Build a GraphView from the network for algorithm execution.
///
/// Dense index `i` (and algorithm NodeId `i`) is the `i`-th node in insertion
/// order, so results map straight back onto [`TrialNetwork::nodes`].
pub fn build_view(network: &TrialNetwork) -> GraphView {
    let node_count = network.node_count();
    let index_to_node: Vec<AlgoNodeId> = (0..node_count as AlgoNodeId).collect();

    let adjacency: Vec<Vec<usize>> = (0..node_count)
        .map(|pos| network.neighbor_positions(pos).to_vec())
        .collect();

    GraphView::from_adjacency_list(index_to_node, adjacency)
}
