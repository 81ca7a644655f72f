//! Trialnet
//!
//! Network analysis of clinical-trial collaboration: trials and institutions
//! become an undirected graph, institutions that share a trial are linked by
//! co-participation edges, and every node is scored by degree, betweenness
//! and closeness centrality.
//!
//! # Pipeline
//!
//! - `loader`: trials, institutions and edges CSV tables → [`Dataset`]
//! - `network`: [`NetworkBuilder`] → immutable [`TrialNetwork`]
//! - `analysis`: centrality scores, descriptive statistics, Spearman correlations
//! - `funding`, `profile`: funder tables and dataset distributions
//! - `report`: CSV/JSON emitters
//!
//! ## Example Usage
//!
//! ```rust
//! use trialnet::analysis::{compute_centrality, summarize};
//! use trialnet::network::build_network;
//! use trialnet::records::{InstitutionRecord, RelationshipRecord, TrialRecord};
//!
//! let trials = vec![TrialRecord::new("T1", "Malaria vaccine", Some("Kenya"))];
//! let institutions = vec![
//!     InstitutionRecord::new("I1", "KEMRI", Some("Kenya"), Some("Academic")),
//!     InstitutionRecord::new("I2", "Oxford", Some("UK"), Some("Academic")),
//! ];
//! let relationships = vec![
//!     RelationshipRecord::new("T1", "I1", "collaboration"),
//!     RelationshipRecord::new("T1", "I2", "collaboration"),
//! ];
//!
//! let (network, augmentation) = build_network(&trials, &institutions, &relationships).unwrap();
//! assert_eq!(augmentation.added_count(), 1);
//!
//! let scores = compute_centrality(&network).unwrap();
//! let stats = summarize(&network, &scores).unwrap();
//! assert_eq!(stats.total_edges, 3);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod analysis;
pub mod config;
pub mod funding;
pub mod loader;
pub mod network;
pub mod pipeline;
pub mod profile;
pub mod records;
pub mod report;

// Re-export main types for convenience
pub use network::{
    AugmentationReport, Edge, EdgeKey, NetworkBuilder, NetworkError, NetworkResult, Node, NodeId,
    NodeType, PropertyMap, PropertyValue, RelationshipType, TrialNetwork,
};

pub use analysis::{
    compute_centrality, summarize, AnalysisError, AnalysisResult, CentralityMeasure,
    CentralityScores, CorrelationMatrix, NetworkStatistics,
};

pub use config::PipelineConfig;
pub use pipeline::{analyze, run, NetworkAnalysis};
pub use records::{Dataset, InstitutionRecord, RelationshipRecord, TrialRecord};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.1.0");
    }
}
