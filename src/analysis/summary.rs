//! Network statistics aggregator
//!
//! Reduces the finalized network and its centrality scores to graph-level
//! statistics: density, components, average degree, Freeman degree
//! centralization, per-measure descriptives and rank correlations.

use super::centrality::{CentralityMeasure, CentralityScores};
use super::correlation::CorrelationMatrix;
use super::descriptive::Descriptive;
use super::{AnalysisError, AnalysisResult};
use crate::algo::{build_view, connected_components};
use crate::network::{NodeType, TrialNetwork};
use serde::Serialize;
use tracing::{debug, info};

/// Graph-level statistics of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkStatistics {
    pub total_nodes: usize,
    pub trials: usize,
    pub institutions: usize,
    pub total_edges: usize,
    pub density: f64,
    pub components: usize,
    pub largest_component: usize,
    pub average_degree: f64,
    pub degree_centralization: f64,
    pub degree: Descriptive,
    pub betweenness: Descriptive,
    pub closeness: Descriptive,
    pub correlations: CorrelationMatrix,
}

impl NetworkStatistics {
    pub fn descriptive(&self, measure: CentralityMeasure) -> &Descriptive {
        match measure {
            CentralityMeasure::Degree => &self.degree,
            CentralityMeasure::Betweenness => &self.betweenness,
            CentralityMeasure::Closeness => &self.closeness,
        }
    }
}

/// Edges over possible edges `n(n-1)/2`; 0 for a single node
pub fn density(nodes: usize, edges: usize) -> f64 {
    if nodes < 2 {
        return 0.0;
    }
    let possible = nodes as f64 * (nodes - 1) as f64 / 2.0;
    edges as f64 / possible
}

/// Freeman degree centralization `sum(max - c_i) / ((n-1)(n-2))`.
///
/// Defined as 0 for n < 3, where the denominator is not positive.
pub fn degree_centralization(degree_centrality: &[f64]) -> f64 {
    let n = degree_centrality.len();
    if n < 3 {
        return 0.0;
    }

    let max = degree_centrality
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let sum_diff: f64 = degree_centrality.iter().map(|c| max - c).sum();
    sum_diff / ((n - 1) as f64 * (n - 2) as f64)
}

fn describe(scores: &CentralityScores, measure: CentralityMeasure) -> AnalysisResult<Descriptive> {
    Descriptive::from_values(&scores.values(measure)).ok_or(AnalysisError::EmptyGraph)
}

/// Compute all graph-level statistics.
///
/// Fails with [`AnalysisError::EmptyGraph`] before computing anything if the
/// network has no nodes, and with [`AnalysisError::ScoresMismatch`] if the
/// scores were not computed for this network.
pub fn summarize(
    network: &TrialNetwork,
    scores: &CentralityScores,
) -> AnalysisResult<NetworkStatistics> {
    let n = network.node_count();
    if n == 0 {
        return Err(AnalysisError::EmptyGraph);
    }
    let keys_match = CentralityMeasure::ALL.iter().all(|&m| {
        let map = scores.measure(m);
        map.len() == n && network.nodes().all(|node| map.contains_key(&node.id))
    });
    if !keys_match {
        return Err(AnalysisError::ScoresMismatch {
            nodes: n,
            scored: scores.len(),
        });
    }

    let view = build_view(network);
    let components = connected_components(&view);
    let degree_sum: usize = (0..n).map(|idx| view.degree(idx)).sum();

    let stats = NetworkStatistics {
        total_nodes: n,
        trials: network.count_of_type(NodeType::Trial),
        institutions: network.count_of_type(NodeType::Institution),
        total_edges: network.edge_count(),
        density: density(n, network.edge_count()),
        components: components.count(),
        largest_component: components.largest(),
        average_degree: degree_sum as f64 / n as f64,
        degree_centralization: degree_centralization(&scores.values(CentralityMeasure::Degree)),
        degree: describe(scores, CentralityMeasure::Degree)?,
        betweenness: describe(scores, CentralityMeasure::Betweenness)?,
        closeness: describe(scores, CentralityMeasure::Closeness)?,
        correlations: CorrelationMatrix::from_scores(scores),
    };

    info!("Network density: {:.3}", stats.density);
    info!("Number of components: {}", stats.components);
    info!("Average degree: {:.2}", stats.average_degree);
    info!("Degree centralization: {:.3}", stats.degree_centralization);
    debug!("Largest component: {} nodes", stats.largest_component);

    Ok(stats)
}
