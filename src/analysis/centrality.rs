//! Centrality engine
//!
//! Computes degree, betweenness and closeness centrality for every node of a
//! finalized network. The three measures are independent read-only passes
//! over the same view and run concurrently.

use super::{AnalysisError, AnalysisResult, GraphDeficiency};
use crate::algo::{betweenness_centrality, build_view, closeness_centrality, degree_centrality};
use crate::network::{NodeId, TrialNetwork};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use tracing::info;

/// The three centrality measures, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CentralityMeasure {
    Degree,
    Betweenness,
    Closeness,
}

impl CentralityMeasure {
    pub const ALL: [CentralityMeasure; 3] = [
        CentralityMeasure::Degree,
        CentralityMeasure::Betweenness,
        CentralityMeasure::Closeness,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CentralityMeasure::Degree => "Degree",
            CentralityMeasure::Betweenness => "Betweenness",
            CentralityMeasure::Closeness => "Closeness",
        }
    }
}

impl fmt::Display for CentralityMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-node centrality values. All three maps share the network's node set
/// and iterate in node insertion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CentralityScores {
    pub degree: IndexMap<NodeId, f64>,
    pub betweenness: IndexMap<NodeId, f64>,
    pub closeness: IndexMap<NodeId, f64>,
}

impl CentralityScores {
    pub fn measure(&self, measure: CentralityMeasure) -> &IndexMap<NodeId, f64> {
        match measure {
            CentralityMeasure::Degree => &self.degree,
            CentralityMeasure::Betweenness => &self.betweenness,
            CentralityMeasure::Closeness => &self.closeness,
        }
    }

    pub fn get(&self, measure: CentralityMeasure, id: &NodeId) -> Option<f64> {
        self.measure(measure).get(id).copied()
    }

    /// Values of one measure in node insertion order
    pub fn values(&self, measure: CentralityMeasure) -> Vec<f64> {
        self.measure(measure).values().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.degree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.degree.is_empty()
    }
}

/// Map dense-index scores back onto node ids; every node must be scored
fn keyed_by_node(
    network: &TrialNetwork,
    scores: &HashMap<u64, f64>,
) -> AnalysisResult<IndexMap<NodeId, f64>> {
    network
        .nodes()
        .enumerate()
        .map(|(pos, node)| match scores.get(&(pos as u64)) {
            Some(&score) => Ok((node.id.clone(), score)),
            None => Err(AnalysisError::ScoresMismatch {
                nodes: network.node_count(),
                scored: scores.len(),
            }),
        })
        .collect()
}

/// Compute degree, betweenness and closeness centrality for every node.
///
/// Fails with [`AnalysisError::InsufficientGraph`] for graphs with fewer than
/// two nodes. Disconnected graphs are fine.
pub fn compute_centrality(network: &TrialNetwork) -> AnalysisResult<CentralityScores> {
    match network.node_count() {
        0 => return Err(AnalysisError::InsufficientGraph(GraphDeficiency::NoNodes)),
        1 => return Err(AnalysisError::InsufficientGraph(GraphDeficiency::SingleNode)),
        _ => {}
    }

    let view = build_view(network);
    let (degree, (betweenness, closeness)) = rayon::join(
        || degree_centrality(&view),
        || {
            rayon::join(
                || betweenness_centrality(&view),
                || closeness_centrality(&view),
            )
        },
    );

    info!("Centrality measures calculated for {} nodes", network.node_count());

    Ok(CentralityScores {
        degree: keyed_by_node(network, &degree)?,
        betweenness: keyed_by_node(network, &betweenness)?,
        closeness: keyed_by_node(network, &closeness)?,
    })
}
