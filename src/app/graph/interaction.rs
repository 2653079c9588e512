use eframe::egui::Vec2;

use crate::identity::{IdentityEdge, IdentityNode, IdentitySnapshot};

use super::super::physics::KinematicBuffer;

pub(in crate::app) fn hit_test<'a>(
    point: Vec2,
    nodes: &'a [IdentityNode],
    states: &KinematicBuffer,
    hit_radius: f32,
) -> Option<&'a str> {
    nodes
        .iter()
        .find(|node| {
            states
                .get(&node.id)
                .is_some_and(|state| (state.position - point).length() < hit_radius)
        })
        .map(|node| node.id.as_str())
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(in crate::app) enum Selection {
    #[default]
    Unselected,
    Selected(String),
}

impl Selection {
    pub(in crate::app) fn id(&self) -> Option<&str> {
        match self {
            Self::Unselected => None,
            Self::Selected(id) => Some(id.as_str()),
        }
    }

    pub(in crate::app) fn apply_hit(&mut self, hit: Option<&str>) -> bool {
        let next = match hit {
            Some(id) => Self::Selected(id.to_owned()),
            None => Self::Unselected,
        };
        if *self == next {
            return false;
        }

        tracing::debug!(from = ?self.id(), to = ?next.id(), "selection changed");
        *self = next;
        true
    }

    pub(in crate::app) fn clear(&mut self) -> bool {
        self.apply_hit(None)
    }

    pub(in crate::app) fn retain_in(&mut self, snapshot: &IdentitySnapshot) {
        if self.id().is_some_and(|id| snapshot.node(id).is_none()) {
            self.clear();
        }
    }
}

pub(in crate::app) struct Inspection<'a> {
    pub(in crate::app) node: &'a IdentityNode,
    pub(in crate::app) connected_edges: Vec<&'a IdentityEdge>,
}

pub(in crate::app) fn inspect<'a>(snapshot: &'a IdentitySnapshot, id: &str) -> Option<Inspection<'a>> {
    let node = snapshot.node(id)?;
    Some(Inspection {
        node,
        connected_edges: snapshot.connected_edges(id),
    })
}
