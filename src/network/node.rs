//! Node implementation for the trial network

use super::property::{PropertyMap, PropertyValue};
use super::types::{NodeId, NodeType};
use serde::{Deserialize, Serialize};

/// A node in the trial network
///
/// Nodes have:
/// - A dataset-wide unique ID
/// - A node type (trial, institution, ...)
/// - A display name
/// - Optional country and sector (sector is only meaningful for institutions)
/// - Pass-through attributes from the source table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub node_type: NodeType,
    pub name: String,
    pub country: Option<String>,
    pub sector: Option<String>,
    pub properties: PropertyMap,
}

impl Node {
    /// Create a new node without country, sector or attributes
    pub fn new(id: impl Into<NodeId>, node_type: NodeType, name: impl Into<String>) -> Self {
        Node {
            id: id.into(),
            node_type,
            name: name.into(),
            country: None,
            sector: None,
            properties: PropertyMap::new(),
        }
    }

    /// Create a trial node
    pub fn trial(id: impl Into<NodeId>, title: impl Into<String>, country: Option<String>) -> Self {
        Node {
            country,
            ..Node::new(id, NodeType::Trial, title)
        }
    }

    /// Create an institution node
    pub fn institution(
        id: impl Into<NodeId>,
        name: impl Into<String>,
        country: Option<String>,
        sector: Option<String>,
    ) -> Self {
        Node {
            country,
            sector,
            ..Node::new(id, NodeType::Institution, name)
        }
    }

    /// Attach pass-through attributes
    pub fn with_properties(mut self, properties: PropertyMap) -> Self {
        self.properties = properties;
        self
    }

    pub fn is_trial(&self) -> bool {
        self.node_type == NodeType::Trial
    }

    pub fn is_institution(&self) -> bool {
        self.node_type == NodeType::Institution
    }

    /// Get a pass-through attribute
    pub fn get_property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trial_node() {
        let node = Node::trial("T1", "AI chest X-ray triage", Some("Kenya".to_string()));
        assert!(node.is_trial());
        assert!(!node.is_institution());
        assert_eq!(node.id.as_str(), "T1");
        assert_eq!(node.country.as_deref(), Some("Kenya"));
        assert_eq!(node.sector, None);
    }

    #[test]
    fn test_institution_node_with_properties() {
        let mut props = PropertyMap::new();
        props.insert("city".to_string(), "Nairobi".into());

        let node = Node::institution(
            "I1",
            "University of Nairobi",
            Some("Kenya".to_string()),
            Some("Academic".to_string()),
        )
        .with_properties(props);

        assert!(node.is_institution());
        assert_eq!(node.sector.as_deref(), Some("Academic"));
        assert_eq!(node.get_property("city").and_then(|v| v.as_string()), Some("Nairobi"));
        assert!(node.get_property("missing").is_none());
    }
}
