//! Finalized, read-only trial network
//!
//! A [`TrialNetwork`] is only produced by [`NetworkBuilder::build`](super::NetworkBuilder::build)
//! and exposes no mutation. Nodes and edges are kept in insertion order, which
//! is the tie-break order of every report.

use super::edge::{Edge, EdgeKey};
use super::node::Node;
use super::types::{NodeId, NodeType};
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Data-integrity errors raised while assembling the network
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    #[error("Node {id} already exists as {existing}, cannot add it as {requested}")]
    DuplicateNode {
        id: NodeId,
        existing: NodeType,
        requested: NodeType,
    },

    #[error("Edge {source_id} -- {target_id} references unknown node {missing}")]
    UnknownNode {
        source_id: NodeId,
        target_id: NodeId,
        missing: NodeId,
    },

    #[error("Self-loop on node {0} is not allowed")]
    SelfLoop(NodeId),
}

pub type NetworkResult<T> = Result<T, NetworkError>;

/// Undirected simple graph of trials and institutions
///
/// - nodes: insertion-ordered, addressed by position
/// - node_index: NodeId -> position
/// - edges: insertion-ordered
/// - edge_index: EdgeKey -> position in `edges`
/// - adjacency: position -> neighbour positions, in edge insertion order
#[derive(Debug, Clone, Default)]
pub struct TrialNetwork {
    nodes: Vec<Node>,
    node_index: FxHashMap<NodeId, usize>,
    edges: Vec<Edge>,
    edge_index: FxHashMap<EdgeKey, usize>,
    adjacency: Vec<Vec<usize>>,
}

impl TrialNetwork {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Insert a node, or overwrite the attributes of an existing node of the
    /// same type. Returns true when the node was new.
    pub(crate) fn upsert_node(&mut self, node: Node) -> NetworkResult<bool> {
        if let Some(&pos) = self.node_index.get(&node.id) {
            let existing = self.nodes[pos].node_type;
            if existing != node.node_type {
                return Err(NetworkError::DuplicateNode {
                    id: node.id,
                    existing,
                    requested: node.node_type,
                });
            }
            self.nodes[pos] = node;
            return Ok(false);
        }

        let pos = self.nodes.len();
        self.node_index.insert(node.id.clone(), pos);
        self.nodes.push(node);
        self.adjacency.push(Vec::new());
        Ok(true)
    }

    /// Insert an edge, or overwrite the relationship and attributes of the
    /// edge already joining the same pair. Returns true when the edge was new.
    pub(crate) fn upsert_edge(&mut self, edge: Edge) -> NetworkResult<bool> {
        if edge.source == edge.target {
            return Err(NetworkError::SelfLoop(edge.source));
        }
        let source_pos = self.require_endpoint(&edge, &edge.source)?;
        let target_pos = self.require_endpoint(&edge, &edge.target)?;

        let key = edge.key();
        if let Some(&pos) = self.edge_index.get(&key) {
            let existing = &mut self.edges[pos];
            existing.relationship = edge.relationship;
            existing.properties = edge.properties;
            return Ok(false);
        }

        self.edge_index.insert(key, self.edges.len());
        self.edges.push(edge);
        self.adjacency[source_pos].push(target_pos);
        self.adjacency[target_pos].push(source_pos);
        Ok(true)
    }

    fn require_endpoint(&self, edge: &Edge, endpoint: &NodeId) -> NetworkResult<usize> {
        self.node_index
            .get(endpoint)
            .copied()
            .ok_or_else(|| NetworkError::UnknownNode {
                source_id: edge.source.clone(),
                target_id: edge.target.clone(),
                missing: endpoint.clone(),
            })
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// All edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.node_index.get(id).map(|&pos| &self.nodes[pos])
    }

    /// The edge joining `a` and `b`, in either order
    pub fn edge(&self, a: &NodeId, b: &NodeId) -> Option<&Edge> {
        self.edge_index
            .get(&EdgeKey::new(a, b))
            .map(|&pos| &self.edges[pos])
    }

    pub fn has_edge(&self, a: &NodeId, b: &NodeId) -> bool {
        self.edge_index.contains_key(&EdgeKey::new(a, b))
    }

    /// Neighbouring nodes in edge insertion order; empty for unknown ids
    pub fn neighbors<'a>(&'a self, id: &NodeId) -> impl Iterator<Item = &'a Node> + 'a {
        let positions: &[usize] = self
            .node_index
            .get(id)
            .map(|&pos| self.adjacency[pos].as_slice())
            .unwrap_or(&[]);
        positions.iter().map(move |&pos| &self.nodes[pos])
    }

    pub fn degree(&self, id: &NodeId) -> Option<usize> {
        self.node_index.get(id).map(|&pos| self.adjacency[pos].len())
    }

    /// Number of nodes of a given type
    pub fn count_of_type(&self, node_type: NodeType) -> usize {
        self.nodes.iter().filter(|n| n.node_type == node_type).count()
    }

    /// Position of a node in insertion order (dense index used by algorithm views)
    pub fn position(&self, id: &NodeId) -> Option<usize> {
        self.node_index.get(id).copied()
    }

    /// Neighbour positions of the node at `pos`
    pub fn neighbor_positions(&self, pos: usize) -> &[usize] {
        &self.adjacency[pos]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_network() -> TrialNetwork {
        let mut net = TrialNetwork::new();
        net.upsert_node(Node::trial("T1", "Trial one", None)).unwrap();
        net.upsert_node(Node::institution("I1", "Inst one", None, None)).unwrap();
        net.upsert_node(Node::institution("I2", "Inst two", None, None)).unwrap();
        net
    }

    #[test]
    fn test_edges_are_symmetric() {
        let mut net = small_network();
        net.upsert_edge(Edge::new("T1", "I1", "funding")).unwrap();

        let t1 = NodeId::new("T1");
        let i1 = NodeId::new("I1");
        assert!(net.has_edge(&t1, &i1));
        assert!(net.has_edge(&i1, &t1));
        assert_eq!(net.degree(&t1), Some(1));
        assert_eq!(net.degree(&i1), Some(1));
        assert_eq!(net.neighbors(&i1).next().map(|n| n.id.as_str()), Some("T1"));
    }

    #[test]
    fn test_unknown_endpoint_is_rejected() {
        let mut net = small_network();
        let err = net.upsert_edge(Edge::new("T1", "I9", "funding")).unwrap_err();
        assert_eq!(
            err,
            NetworkError::UnknownNode {
                source_id: NodeId::new("T1"),
                target_id: NodeId::new("I9"),
                missing: NodeId::new("I9"),
            }
        );
        assert_eq!(net.edge_count(), 0);
    }

    #[test]
    fn test_self_loop_is_rejected() {
        let mut net = small_network();
        let err = net.upsert_edge(Edge::new("I1", "I1", "collaboration")).unwrap_err();
        assert_eq!(err, NetworkError::SelfLoop(NodeId::new("I1")));
    }

    #[test]
    fn test_duplicate_edge_overwrites_relationship() {
        let mut net = small_network();
        assert!(net.upsert_edge(Edge::new("T1", "I1", "collaboration")).unwrap());
        assert!(!net.upsert_edge(Edge::new("I1", "T1", "funding")).unwrap());

        assert_eq!(net.edge_count(), 1);
        let t1 = NodeId::new("T1");
        let edge = net.edge(&t1, &NodeId::new("I1")).unwrap();
        assert!(edge.relationship.is_funding());
        // Original orientation is kept
        assert_eq!(edge.source, t1);
        assert_eq!(net.degree(&t1), Some(1));
    }

    #[test]
    fn test_duplicate_node_type_conflict() {
        let mut net = small_network();
        let err = net.upsert_node(Node::institution("T1", "Clash", None, None)).unwrap_err();
        assert!(matches!(err, NetworkError::DuplicateNode { existing: NodeType::Trial, .. }));
        assert_eq!(net.node_count(), 3);
    }

    #[test]
    fn test_duplicate_node_same_type_last_write_wins() {
        let mut net = small_network();
        let replaced = Node::institution("I1", "Renamed", Some("Ghana".to_string()), None);
        assert!(!net.upsert_node(replaced).unwrap());

        assert_eq!(net.node_count(), 3);
        let node = net.node(&NodeId::new("I1")).unwrap();
        assert_eq!(node.name, "Renamed");
        // Position is unchanged
        assert_eq!(net.position(&NodeId::new("I1")), Some(1));
    }
}
