use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Origin {
    Declared,
    Inferred,
    Contributed,
}

impl Origin {
    pub fn label(self) -> &'static str {
        match self {
            Self::Declared => "user-declared",
            Self::Inferred => "inferred",
            Self::Contributed => "externally contributed",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeKind {
    Tension,
    ReinforcingPattern,
    Contradiction,
    Support,
}

impl EdgeKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Tension => "tension",
            Self::ReinforcingPattern => "reinforcing pattern",
            Self::Contradiction => "contradiction",
            Self::Support => "support",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct IdentityNode {
    pub id: String,
    pub label: String,
    pub origin: Origin,
    pub layer: String,
    #[serde(default = "default_true")]
    pub learning_enabled: bool,
    #[serde(default)]
    pub externally_shared: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub provenance: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct IdentityEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
    pub strength: f32,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub first_observed: String,
    #[serde(default)]
    pub last_observed: String,
}

impl IdentityEdge {
    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }

    pub fn other_end(&self, node_id: &str) -> Option<&str> {
        if self.source == node_id {
            Some(self.target.as_str())
        } else if self.target == node_id {
            Some(self.source.as_str())
        } else {
            None
        }
    }
}

fn default_true() -> bool {
    true
}

// Node order fixes seeding slots and hit-test precedence.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IdentitySnapshot {
    pub revision: u64,
    pub nodes: Vec<IdentityNode>,
    pub edges: Vec<IdentityEdge>,
}

impl IdentitySnapshot {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node(&self, id: &str) -> Option<&IdentityNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn connected_edges(&self, id: &str) -> Vec<&IdentityEdge> {
        self.edges.iter().filter(|edge| edge.touches(id)).collect()
    }

    pub fn connection_count(&self, id: &str) -> usize {
        self.edges.iter().filter(|edge| edge.touches(id)).count()
    }

    pub fn layers(&self) -> Vec<&str> {
        let mut layers: Vec<&str> = Vec::new();
        for node in &self.nodes {
            if !layers.contains(&node.layer.as_str()) {
                layers.push(node.layer.as_str());
            }
        }
        layers
    }

    pub fn with_learning_enabled(&self, id: &str, enabled: bool) -> IdentitySnapshot {
        let mut next = self.clone();
        let Some(node) = next.nodes.iter_mut().find(|node| node.id == id) else {
            return next;
        };

        node.learning_enabled = enabled;
        next.revision = self.revision.wrapping_add(1);
        next
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub(crate) fn node(id: &str, layer: &str) -> IdentityNode {
        IdentityNode {
            id: id.to_owned(),
            label: id.to_uppercase(),
            origin: Origin::Declared,
            layer: layer.to_owned(),
            learning_enabled: true,
            externally_shared: false,
            created_at: String::new(),
            provenance: String::new(),
        }
    }

    pub(crate) fn edge(id: &str, source: &str, target: &str, strength: f32) -> IdentityEdge {
        IdentityEdge {
            id: id.to_owned(),
            source: source.to_owned(),
            target: target.to_owned(),
            kind: EdgeKind::Support,
            strength,
            label: String::new(),
            first_observed: String::new(),
            last_observed: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{edge, node};
    use super::*;

    fn sample() -> IdentitySnapshot {
        IdentitySnapshot {
            revision: 3,
            nodes: vec![node("a", "core"), node("b", "work"), node("c", "core")],
            edges: vec![edge("ab", "a", "b", 0.5), edge("ca", "c", "a", 0.9)],
        }
    }

    #[test]
    fn connected_edges_cover_both_directions() {
        let snapshot = sample();
        let ids: Vec<&str> = snapshot
            .connected_edges("a")
            .iter()
            .map(|edge| edge.id.as_str())
            .collect();

        assert_eq!(ids, vec!["ab", "ca"]);
        assert_eq!(snapshot.connection_count("b"), 1);
        assert_eq!(snapshot.connection_count("missing"), 0);
    }

    #[test]
    fn layers_keep_first_seen_order() {
        assert_eq!(sample().layers(), vec!["core", "work"]);
    }

    #[test]
    fn learning_toggle_returns_fresh_revision() {
        let snapshot = sample();
        let toggled = snapshot.with_learning_enabled("b", false);

        assert_eq!(toggled.revision, 4);
        assert!(!toggled.node("b").is_some_and(|node| node.learning_enabled));
        assert!(snapshot.node("b").is_some_and(|node| node.learning_enabled));
        assert_eq!(toggled.edges, snapshot.edges);
    }

    #[test]
    fn learning_toggle_on_unknown_id_is_a_no_op() {
        let snapshot = sample();
        assert_eq!(snapshot.with_learning_enabled("zzz", false), snapshot);
    }

    #[test]
    fn other_end_resolves_endpoints() {
        let edge = edge("ab", "a", "b", 1.0);
        assert_eq!(edge.other_end("a"), Some("b"));
        assert_eq!(edge.other_end("b"), Some("a"));
        assert_eq!(edge.other_end("c"), None);
    }
}
