//! Trial network data model
//!
//! An undirected, typed simple graph:
//! - Nodes are trials or institutions (company and funder types are reserved)
//! - Edges carry an open relationship type and optional attributes
//! - At most one edge per node pair
//! - Built once by [`NetworkBuilder`], read-only afterwards

pub mod builder;
pub mod edge;
pub mod graph;
pub mod node;
pub mod property;
pub mod types;

// Re-export main types
pub use builder::{
    build_from_dataset, build_network, AugmentationReport, CoParticipation, NetworkBuilder,
};
pub use edge::{Edge, EdgeKey};
pub use graph::{NetworkError, NetworkResult, TrialNetwork};
pub use node::Node;
pub use property::{PropertyMap, PropertyValue};
pub use types::{NodeId, NodeType, RelationshipType};
