//! Core type definitions for the trial network

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a node (trial id or institution id as found in the dataset)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        NodeId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        NodeId(s)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId(s.to_string())
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Kind of entity a node stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Trial,
    Institution,
    Company,
    Funder,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Trial => "trial",
            NodeType::Institution => "institution",
            NodeType::Company => "company",
            NodeType::Funder => "funder",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relationship type of an edge (open set, e.g. "funding", "collaboration")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct RelationshipType(String);

impl RelationshipType {
    /// Derived edge between two institutions sharing a trial
    pub const CO_PARTICIPATION: &'static str = "co_participation";
    pub const FUNDING: &'static str = "funding";

    pub fn new(relationship: impl Into<String>) -> Self {
        RelationshipType(relationship.into())
    }

    pub fn co_participation() -> Self {
        RelationshipType::new(Self::CO_PARTICIPATION)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_co_participation(&self) -> bool {
        self.0 == Self::CO_PARTICIPATION
    }

    pub fn is_funding(&self) -> bool {
        self.0 == Self::FUNDING
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RelationshipType {
    fn from(s: String) -> Self {
        RelationshipType(s)
    }
}

impl From<&str> for RelationshipType {
    fn from(s: &str) -> Self {
        RelationshipType(s.to_string())
    }
}
