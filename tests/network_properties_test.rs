use std::collections::HashSet;
use trialnet::analysis::{compute_centrality, summarize, AnalysisError, CentralityMeasure};
use trialnet::network::{build_network, Edge, NetworkBuilder, Node, NodeId, TrialNetwork};
use trialnet::records::{InstitutionRecord, RelationshipRecord, TrialRecord};

/// Four trials over six institutions with overlapping memberships
fn overlapping_network() -> TrialNetwork {
    let trials: Vec<TrialRecord> = (1..=4)
        .map(|i| TrialRecord::new(format!("T{}", i), format!("Trial {}", i), None))
        .collect();
    let institutions: Vec<InstitutionRecord> = (1..=6)
        .map(|i| InstitutionRecord::new(format!("I{}", i), format!("Inst {}", i), None, None))
        .collect();
    let memberships = [
        ("T1", ["I1", "I2", "I3"].as_slice()),
        ("T2", ["I3", "I4"].as_slice()),
        ("T3", ["I4", "I5", "I1"].as_slice()),
        ("T4", ["I6"].as_slice()),
    ];
    let relationships: Vec<RelationshipRecord> = memberships
        .iter()
        .flat_map(|(trial, insts)| {
            insts
                .iter()
                .map(move |inst| RelationshipRecord::new(*trial, *inst, "collaboration"))
        })
        .collect();

    build_network(&trials, &institutions, &relationships).unwrap().0
}

#[test]
fn test_adjacency_is_symmetric() {
    let network = overlapping_network();
    for node in network.nodes() {
        for neighbor in network.neighbors(&node.id) {
            assert!(network.has_edge(&neighbor.id, &node.id));
            assert!(network.neighbors(&neighbor.id).any(|n| n.id == node.id));
        }
    }
}

#[test]
fn test_no_duplicate_pairs() {
    let network = overlapping_network();
    let mut seen = HashSet::new();
    for edge in network.edges() {
        assert!(seen.insert(edge.key()), "duplicate edge {:?}", edge.key());
    }
    assert_eq!(seen.len(), network.edge_count());
}

#[test]
fn test_co_participation_completeness() {
    let network = overlapping_network();
    let trial_members = |trial: &str| -> Vec<NodeId> {
        network
            .neighbors(&NodeId::new(trial))
            .filter(|n| n.is_institution())
            .map(|n| n.id.clone())
            .collect()
    };

    for trial in ["T1", "T2", "T3", "T4"] {
        let members = trial_members(trial);
        for (i, a) in members.iter().enumerate() {
            for b in &members[i + 1..] {
                assert!(network.has_edge(a, b), "{} and {} share {}", a, b, trial);
            }
        }
    }
    // I2 and I4 never share a trial
    assert!(!network.has_edge(&NodeId::new("I2"), &NodeId::new("I4")));
}

/// Trials linked to each other, an institution with no trial and a direct
/// institution pair alongside ordinary memberships
fn mixed_edge_network() -> TrialNetwork {
    let mut builder = NetworkBuilder::new();
    for id in ["T1", "T2", "T3"] {
        builder.add_node(Node::trial(id, id, None)).unwrap();
    }
    for id in ["I1", "I2", "I3", "I4", "I5"] {
        builder.add_node(Node::institution(id, id, None, None)).unwrap();
    }
    for (a, b, rel) in [
        ("T1", "I1", "collaboration"),
        ("T1", "I2", "funding"),
        ("T2", "I2", "collaboration"),
        ("T2", "I3", "collaboration"),
        ("T1", "T2", "follow_up"),
        ("T3", "T1", "follow_up"),
        ("I4", "I3", "technology_transfer"),
        ("I5", "I1", "technology_transfer"),
    ] {
        builder.add_edge(Edge::new(a, b, rel)).unwrap();
    }
    builder.augment_co_participation().unwrap();
    builder.build()
}

#[test]
fn test_derived_edges_join_institutions_sharing_a_trial() {
    let network = mixed_edge_network();
    let trials_of = |id: &NodeId| -> HashSet<NodeId> {
        network
            .neighbors(id)
            .filter(|n| n.is_trial())
            .map(|n| n.id.clone())
            .collect()
    };

    let derived: Vec<&Edge> = network.edges().filter(|e| e.is_derived()).collect();
    assert!(!derived.is_empty());
    for edge in &derived {
        let source = network.node(&edge.source).unwrap();
        let target = network.node(&edge.target).unwrap();
        assert!(source.is_institution() && target.is_institution(), "{:?}", edge);
        assert!(
            !trials_of(&edge.source).is_disjoint(&trials_of(&edge.target)),
            "{} and {} share no trial",
            edge.source,
            edge.target
        );
    }

    // Exactly the pairs sharing T1 or T2
    let mut pairs: Vec<(String, String)> = derived
        .iter()
        .map(|e| {
            let (a, b) = (e.source.to_string(), e.target.to_string());
            if a <= b { (a, b) } else { (b, a) }
        })
        .collect();
    pairs.sort();
    assert_eq!(
        pairs,
        vec![
            ("I1".to_string(), "I2".to_string()),
            ("I2".to_string(), "I3".to_string()),
        ]
    );
    // Trial-trial links and institutions outside any trial gain nothing
    assert!(!network.has_edge(&NodeId::new("I4"), &NodeId::new("I2")));
    assert!(!network.has_edge(&NodeId::new("I5"), &NodeId::new("I2")));
}

#[test]
fn test_centrality_ranges_and_keys() {
    let network = overlapping_network();
    let scores = compute_centrality(&network).unwrap();
    let node_ids: HashSet<&NodeId> = network.nodes().map(|n| &n.id).collect();

    for measure in CentralityMeasure::ALL {
        let map = scores.measure(measure);
        let keys: HashSet<&NodeId> = map.keys().collect();
        assert_eq!(keys, node_ids);
        for value in map.values() {
            assert!((0.0..=1.0).contains(value), "{} out of range: {}", measure, value);
        }
    }

    // T4 and I6 form their own component
    let stats = summarize(&network, &scores).unwrap();
    assert_eq!(stats.components, 2);
    assert!((0.0..=1.0).contains(&stats.degree_centralization));
}

#[test]
fn test_correlation_matrix_shape() {
    let network = overlapping_network();
    let scores = compute_centrality(&network).unwrap();
    let stats = summarize(&network, &scores).unwrap();

    let rows = stats.correlations.rows();
    for i in 0..3 {
        assert_eq!(rows[i][i], Some(1.0));
        for j in 0..3 {
            assert_eq!(rows[i][j], rows[j][i]);
            if let Some(rho) = rows[i][j] {
                assert!((-1.0..=1.0).contains(&rho));
            }
        }
    }
}

#[test]
fn test_degenerate_graphs() {
    let (empty, _) = build_network(&[], &[], &[]).unwrap();
    assert!(matches!(
        compute_centrality(&empty),
        Err(AnalysisError::InsufficientGraph(_))
    ));

    let (single, _) = build_network(&[TrialRecord::new("T1", "Only", None)], &[], &[]).unwrap();
    let err = compute_centrality(&single).unwrap_err();
    assert!(err.to_string().contains("single node"));
}
