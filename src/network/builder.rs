//! Network construction
//!
//! Builds the undirected trial network in three steps:
//! 1. one node per trial and per institution record
//! 2. one edge per direct relationship record (last write wins on repeats)
//! 3. co-participation augmentation: institutions sharing a trial get linked
//!
//! Step 3 is a single pass over the trials as they stood after step 2. Edges it
//! adds are never re-examined, so only first-order sharing is captured.

use super::edge::Edge;
use super::graph::{NetworkResult, TrialNetwork};
use super::node::Node;
use super::types::{NodeId, RelationshipType};
use crate::records::{Dataset, InstitutionRecord, RelationshipRecord, TrialRecord};
use serde::Serialize;
use tracing::{debug, info};

/// A co-participation edge added during augmentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoParticipation {
    pub first: NodeId,
    pub second: NodeId,
    /// The trial through which the pair was discovered
    pub via_trial: NodeId,
}

/// What co-participation augmentation did to the network
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AugmentationReport {
    /// Edge count before augmentation (direct edges)
    pub direct_edges: usize,
    /// Derived edges, in the order they were added
    pub added: Vec<CoParticipation>,
}

impl AugmentationReport {
    pub fn added_count(&self) -> usize {
        self.added.len()
    }

    pub fn total_edges(&self) -> usize {
        self.direct_edges + self.added.len()
    }
}

/// Mutable construction phase of a [`TrialNetwork`]
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    network: TrialNetwork,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        NetworkBuilder {
            network: TrialNetwork::new(),
        }
    }

    /// Add a node. Re-adding an id with the same type overwrites its
    /// attributes; a different type is a `DuplicateNode` error.
    pub fn add_node(&mut self, node: Node) -> NetworkResult<()> {
        let id = node.id.clone();
        if !self.network.upsert_node(node)? {
            debug!("Node {} seen again, attributes overwritten", id);
        }
        Ok(())
    }

    pub fn add_trial(&mut self, record: &TrialRecord) -> NetworkResult<()> {
        let node = Node::trial(
            record.trial_id.as_str(),
            record.title.clone(),
            record.country.clone(),
        )
        .with_properties(record.attributes.clone());
        self.add_node(node)
    }

    pub fn add_institution(&mut self, record: &InstitutionRecord) -> NetworkResult<()> {
        let node = Node::institution(
            record.institution_id.as_str(),
            record.institution_name.clone(),
            record.country.clone(),
            record.sector.clone(),
        )
        .with_properties(record.attributes.clone());
        self.add_node(node)
    }

    /// Add an edge between two existing nodes. A repeated pair overwrites the
    /// relationship type and attributes of the existing edge.
    pub fn add_edge(&mut self, edge: Edge) -> NetworkResult<()> {
        let (source, target) = (edge.source.clone(), edge.target.clone());
        if !self.network.upsert_edge(edge)? {
            debug!("Edge {} -- {} seen again, relationship overwritten", source, target);
        }
        Ok(())
    }

    pub fn add_relationship(&mut self, record: &RelationshipRecord) -> NetworkResult<()> {
        let edge = Edge::new(
            record.trial_id.as_str(),
            record.institution_id.as_str(),
            record.relationship_type.as_str(),
        )
        .with_properties(record.attributes.clone());
        self.add_edge(edge)
    }

    /// Link every pair of institutions directly connected to the same trial,
    /// unless the pair is already connected by any edge.
    pub fn augment_co_participation(&mut self) -> NetworkResult<AugmentationReport> {
        let direct_edges = self.network.edge_count();

        // Snapshot institution neighbourhoods first: augmentation must not see
        // its own output.
        let groups: Vec<(NodeId, Vec<NodeId>)> = self
            .network
            .nodes()
            .filter(|n| n.is_trial())
            .map(|trial| {
                let institutions = self
                    .network
                    .neighbors(&trial.id)
                    .filter(|n| n.is_institution())
                    .map(|n| n.id.clone())
                    .collect();
                (trial.id.clone(), institutions)
            })
            .collect();

        let mut added = Vec::new();
        for (trial, institutions) in groups {
            for (i, first) in institutions.iter().enumerate() {
                for second in &institutions[i + 1..] {
                    if self.network.has_edge(first, second) {
                        continue;
                    }
                    let edge = Edge::new(
                        first.clone(),
                        second.clone(),
                        RelationshipType::co_participation(),
                    );
                    self.network.upsert_edge(edge)?;
                    debug!("Co-participation {} -- {} via {}", first, second, trial);
                    added.push(CoParticipation {
                        first: first.clone(),
                        second: second.clone(),
                        via_trial: trial.clone(),
                    });
                }
            }
        }

        info!(
            "Added {} co-participation edges ({} direct, {} total)",
            added.len(),
            direct_edges,
            self.network.edge_count()
        );

        Ok(AugmentationReport {
            direct_edges,
            added,
        })
    }

    /// Finalize the network; no further mutation is possible
    pub fn build(self) -> TrialNetwork {
        self.network
    }
}

/// Build the complete network (nodes, direct edges, co-participation edges)
/// from the three record sets.
pub fn build_network(
    trials: &[TrialRecord],
    institutions: &[InstitutionRecord],
    relationships: &[RelationshipRecord],
) -> NetworkResult<(TrialNetwork, AugmentationReport)> {
    let mut builder = NetworkBuilder::new();

    for trial in trials {
        builder.add_trial(trial)?;
    }
    for institution in institutions {
        builder.add_institution(institution)?;
    }
    for relationship in relationships {
        builder.add_relationship(relationship)?;
    }

    info!(
        "Network built: {} nodes, {} edges",
        builder.network.node_count(),
        builder.network.edge_count()
    );

    let report = builder.augment_co_participation()?;
    Ok((builder.build(), report))
}

/// [`build_network`] over a loaded [`Dataset`]
pub fn build_from_dataset(dataset: &Dataset) -> NetworkResult<(TrialNetwork, AugmentationReport)> {
    build_network(&dataset.trials, &dataset.institutions, &dataset.relationships)
}
