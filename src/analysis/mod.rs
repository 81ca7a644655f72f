//! Centrality engine and network statistics
//!
//! All analysis reads a finalized [`TrialNetwork`](crate::network::TrialNetwork)
//! by reference and is a pure function of it.

pub mod centrality;
pub mod correlation;
pub mod descriptive;
pub mod summary;

use std::fmt;
use thiserror::Error;

pub use centrality::{compute_centrality, CentralityMeasure, CentralityScores};
pub use correlation::{spearman, Correlation, CorrelationMatrix};
pub use descriptive::Descriptive;
pub use summary::{summarize, NetworkStatistics};

/// Why a graph is too small for centrality
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphDeficiency {
    /// No data at all
    NoNodes,
    /// Data, but not enough structure to normalize against
    SingleNode,
}

impl fmt::Display for GraphDeficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphDeficiency::NoNodes => f.write_str("the graph has no nodes"),
            GraphDeficiency::SingleNode => f.write_str("the graph has a single node"),
        }
    }
}

/// Degenerate-graph errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Centrality is undefined: {0}")]
    InsufficientGraph(GraphDeficiency),

    #[error("Cannot compute network statistics: the graph has no nodes")]
    EmptyGraph,

    #[error("Centrality scores cover {scored} nodes but the network has {nodes}")]
    ScoresMismatch { nodes: usize, scored: usize },
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
