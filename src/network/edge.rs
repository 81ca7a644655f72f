//! Edge implementation for the trial network
//!
//! Edges are undirected: `(a, b)` and `(b, a)` name the same edge. The
//! endpoints keep the order they were inserted with (trial first for direct
//! edges) so reports read naturally, but equality goes through [`EdgeKey`].

use super::property::{PropertyMap, PropertyValue};
use super::types::{NodeId, RelationshipType};
use serde::{Deserialize, Serialize};

/// Order-independent key for an undirected edge
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey(NodeId, NodeId);

impl EdgeKey {
    pub fn new(a: &NodeId, b: &NodeId) -> Self {
        if a <= b {
            EdgeKey(a.clone(), b.clone())
        } else {
            EdgeKey(b.clone(), a.clone())
        }
    }
}

/// An undirected edge in the trial network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub relationship: RelationshipType,
    /// Optional attributes (strength, funding amount, project focus, ...)
    pub properties: PropertyMap,
}

impl Edge {
    pub fn new(
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        relationship: impl Into<RelationshipType>,
    ) -> Self {
        Edge {
            source: source.into(),
            target: target.into(),
            relationship: relationship.into(),
            properties: PropertyMap::new(),
        }
    }

    pub fn with_properties(mut self, properties: PropertyMap) -> Self {
        self.properties = properties;
        self
    }

    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(&self.source, &self.target)
    }

    /// True for edges added by co-participation augmentation
    pub fn is_derived(&self) -> bool {
        self.relationship.is_co_participation()
    }

    pub fn get_property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }
}
