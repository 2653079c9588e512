mod forces;
mod seed;

use std::collections::HashMap;

use eframe::egui::Vec2;

use crate::identity::{IdentityEdge, IdentityNode};
use forces::{accumulate_gravity, accumulate_repulsion, accumulate_spring, integrate};
pub(in crate::app) use seed::{initialize, reconcile};

pub const DEFAULT_REPULSION: f32 = 5000.0;
pub const DEFAULT_SPRING_CONSTANT: f32 = 0.01;
pub const DEFAULT_REST_LENGTH: f32 = 150.0;
pub const DEFAULT_CENTER_GRAVITY: f32 = 0.001;
pub const DEFAULT_DAMPING: f32 = 0.85;
pub const DEFAULT_LAYOUT_RADIUS: f32 = 200.0;
pub const DEFAULT_SEED_JITTER: f32 = 12.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsConfig {
    pub repulsion: f32,
    pub spring_constant: f32,
    pub rest_length: f32,
    pub center_gravity: f32,
    pub damping: f32,
    pub layout_radius: f32,
    pub seed_jitter: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            repulsion: DEFAULT_REPULSION,
            spring_constant: DEFAULT_SPRING_CONSTANT,
            rest_length: DEFAULT_REST_LENGTH,
            center_gravity: DEFAULT_CENTER_GRAVITY,
            damping: DEFAULT_DAMPING,
            layout_radius: DEFAULT_LAYOUT_RADIUS,
            seed_jitter: DEFAULT_SEED_JITTER,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct Kinematics {
    pub(in crate::app) position: Vec2,
    pub(in crate::app) velocity: Vec2,
}

impl Kinematics {
    pub(in crate::app) fn at_rest(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
        }
    }
}

pub(in crate::app) type KinematicBuffer = HashMap<String, Kinematics>;

// All velocity accumulation finishes before any node is damped or moved.
pub(in crate::app) fn step(
    nodes: &[IdentityNode],
    edges: &[IdentityEdge],
    states: &mut KinematicBuffer,
    surface: Vec2,
    config: &PhysicsConfig,
) {
    let mut slots = nodes
        .iter()
        .map(|node| states.get(&node.id).copied())
        .collect::<Vec<_>>();
    let index_by_id = nodes
        .iter()
        .enumerate()
        .map(|(index, node)| (node.id.as_str(), index))
        .collect::<HashMap<_, _>>();

    accumulate_repulsion(&mut slots, config);

    for edge in edges {
        let (Some(&source), Some(&target)) = (
            index_by_id.get(edge.source.as_str()),
            index_by_id.get(edge.target.as_str()),
        ) else {
            continue;
        };
        accumulate_spring(&mut slots, source, target, edge.strength, config);
    }

    accumulate_gravity(&mut slots, surface * 0.5, config);
    integrate(&mut slots, config);

    for (node, slot) in nodes.iter().zip(slots) {
        if let (Some(next), Some(state)) = (slot, states.get_mut(&node.id)) {
            *state = next;
        }
    }
}

pub(in crate::app) fn kinetic_energy(states: &KinematicBuffer) -> f32 {
    states
        .values()
        .map(|state| state.velocity.length_sq())
        .sum()
}

pub(in crate::app) struct Simulation {
    config: PhysicsConfig,
    states: KinematicBuffer,
}

impl Simulation {
    pub(in crate::app) fn new(config: PhysicsConfig) -> Self {
        Self {
            config,
            states: KinematicBuffer::new(),
        }
    }

    pub(in crate::app) fn states(&self) -> &KinematicBuffer {
        &self.states
    }

    pub(in crate::app) fn position(&self, id: &str) -> Option<Vec2> {
        self.states.get(id).map(|state| state.position)
    }

    pub(in crate::app) fn is_seeded(&self) -> bool {
        !self.states.is_empty()
    }

    pub(in crate::app) fn reseed(&mut self, nodes: &[IdentityNode], surface: Vec2) {
        self.states = initialize(nodes, surface, &self.config);
    }

    pub(in crate::app) fn sync(&mut self, nodes: &[IdentityNode], surface: Vec2) {
        if self.states.is_empty() {
            self.reseed(nodes, surface);
        } else {
            reconcile(nodes, &mut self.states, surface, &self.config);
        }
    }

    pub(in crate::app) fn step(
        &mut self,
        nodes: &[IdentityNode],
        edges: &[IdentityEdge],
        surface: Vec2,
    ) {
        step(nodes, edges, &mut self.states, surface, &self.config);
    }

    pub(in crate::app) fn kinetic_energy(&self) -> f32 {
        kinetic_energy(&self.states)
    }
}
