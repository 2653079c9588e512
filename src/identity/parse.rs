use std::collections::HashSet;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::graph::{IdentityEdge, IdentityNode, IdentitySnapshot};

#[derive(Debug, Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    revision: u64,
    #[serde(default)]
    nodes: Vec<IdentityNode>,
    #[serde(default)]
    edges: Vec<IdentityEdge>,
}

pub(super) fn parse_snapshot(raw: &str) -> Result<IdentitySnapshot> {
    let raw: RawSnapshot =
        serde_json::from_str(raw).context("invalid identity snapshot JSON")?;
    Ok(ingest(raw))
}

fn ingest(raw: RawSnapshot) -> IdentitySnapshot {
    let mut known_ids = HashSet::with_capacity(raw.nodes.len());
    let mut nodes = Vec::with_capacity(raw.nodes.len());
    for node in raw.nodes {
        if node.id.is_empty() {
            tracing::warn!(label = %node.label, "dropping identity node without an id");
            continue;
        }
        if !known_ids.insert(node.id.clone()) {
            tracing::warn!(node_id = %node.id, "dropping duplicate identity node");
            continue;
        }
        nodes.push(node);
    }

    let mut edges = Vec::with_capacity(raw.edges.len());
    for mut edge in raw.edges {
        if !known_ids.contains(&edge.source) || !known_ids.contains(&edge.target) {
            tracing::warn!(
                edge_id = %edge.id,
                source = %edge.source,
                target = %edge.target,
                "dropping relationship with a dangling endpoint"
            );
            continue;
        }

        if !edge.strength.is_finite() {
            tracing::warn!(edge_id = %edge.id, "relationship strength is not finite, using 0");
            edge.strength = 0.0;
        } else if !(0.0..=1.0).contains(&edge.strength) {
            tracing::warn!(
                edge_id = %edge.id,
                strength = edge.strength,
                "clamping relationship strength into [0, 1]"
            );
            edge.strength = edge.strength.clamp(0.0, 1.0);
        }
        edges.push(edge);
    }

    IdentitySnapshot {
        revision: raw.revision,
        nodes,
        edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{EdgeKind, Origin};

    const SAMPLE: &str = r#"{
        "revision": 7,
        "nodes": [
            { "id": "craft", "label": "Craftsperson", "origin": "declared", "layer": "core",
              "created_at": "2024-03-01", "provenance": "onboarding" },
            { "id": "caretaker", "label": "Caretaker", "origin": "inferred", "layer": "relational",
              "learning_enabled": false, "externally_shared": true },
            { "id": "craft", "label": "Duplicate", "origin": "contributed", "layer": "core" },
            { "id": "", "label": "Nameless", "origin": "declared", "layer": "core" }
        ],
        "edges": [
            { "id": "e1", "source": "craft", "target": "caretaker", "kind": "reinforcing-pattern",
              "strength": 0.6, "label": "weekends" },
            { "id": "e2", "source": "craft", "target": "ghost", "kind": "tension", "strength": 0.4 },
            { "id": "e3", "source": "caretaker", "target": "craft", "kind": "contradiction",
              "strength": 1.7 }
        ]
    }"#;

    #[test]
    fn parses_nodes_with_defaults() {
        let snapshot = parse_snapshot(SAMPLE).expect("sample parses");

        assert_eq!(snapshot.revision, 7);
        assert_eq!(snapshot.node_count(), 2);

        let craft = &snapshot.nodes[0];
        assert_eq!(craft.label, "Craftsperson");
        assert_eq!(craft.origin, Origin::Declared);
        assert!(craft.learning_enabled);
        assert!(!craft.externally_shared);
        assert_eq!(craft.provenance, "onboarding");

        let caretaker = &snapshot.nodes[1];
        assert_eq!(caretaker.origin, Origin::Inferred);
        assert!(!caretaker.learning_enabled);
        assert!(caretaker.externally_shared);
        assert!(caretaker.created_at.is_empty());
    }

    #[test]
    fn duplicate_and_empty_ids_are_dropped() {
        let snapshot = parse_snapshot(SAMPLE).expect("sample parses");
        let ids: Vec<&str> = snapshot.nodes.iter().map(|node| node.id.as_str()).collect();
        assert_eq!(ids, vec!["craft", "caretaker"]);
    }

    #[test]
    fn dangling_edges_are_dropped_and_strength_is_clamped() {
        let snapshot = parse_snapshot(SAMPLE).expect("sample parses");
        let ids: Vec<&str> = snapshot.edges.iter().map(|edge| edge.id.as_str()).collect();
        assert_eq!(ids, vec!["e1", "e3"]);

        assert_eq!(snapshot.edges[0].kind, EdgeKind::ReinforcingPattern);
        assert_eq!(snapshot.edges[1].kind, EdgeKind::Contradiction);
        assert_eq!(snapshot.edges[1].strength, 1.0);
    }

    #[test]
    fn unknown_origin_is_rejected() {
        let raw = r#"{ "nodes": [ { "id": "x", "label": "X", "origin": "dreamt", "layer": "core" } ] }"#;
        assert!(parse_snapshot(raw).is_err());
    }

    #[test]
    fn empty_document_yields_empty_snapshot() {
        let snapshot = parse_snapshot("{}").expect("empty object parses");
        assert_eq!(snapshot, IdentitySnapshot::default());
    }
}
