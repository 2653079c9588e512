use std::collections::HashSet;
use std::f32::consts::TAU;

use eframe::egui::{Vec2, vec2};

use crate::identity::IdentityNode;
use crate::util::stable_pair;

use super::{KinematicBuffer, Kinematics, PhysicsConfig};

pub(in crate::app) fn initialize(
    nodes: &[IdentityNode],
    surface: Vec2,
    config: &PhysicsConfig,
) -> KinematicBuffer {
    let center = surface * 0.5;
    let count = nodes.len();

    nodes
        .iter()
        .enumerate()
        .map(|(index, node)| {
            let angle = (index as f32 / count as f32) * TAU;
            let position = center + vec2(angle.cos(), angle.sin()) * config.layout_radius;
            (node.id.clone(), Kinematics::at_rest(position))
        })
        .collect()
}

pub(in crate::app) fn reconcile(
    nodes: &[IdentityNode],
    states: &mut KinematicBuffer,
    surface: Vec2,
    config: &PhysicsConfig,
) {
    let live_ids = nodes
        .iter()
        .map(|node| node.id.as_str())
        .collect::<HashSet<_>>();
    let before = states.len();
    states.retain(|id, _| live_ids.contains(id.as_str()));
    let removed = before - states.len();

    let anchor = if states.is_empty() {
        surface * 0.5
    } else {
        let sum = states
            .values()
            .fold(Vec2::ZERO, |sum, state| sum + state.position);
        sum / states.len() as f32
    };

    let mut added = 0usize;
    for node in nodes {
        if states.contains_key(&node.id) {
            continue;
        }

        let (jx, jy) = stable_pair(&node.id);
        let position = anchor + vec2(jx, jy) * config.seed_jitter;
        states.insert(node.id.clone(), Kinematics::at_rest(position));
        added += 1;
    }

    if added > 0 || removed > 0 {
        tracing::trace!(added, removed, total = states.len(), "reconciled kinematic state");
    }
}
