use eframe::egui::Vec2;

use super::{Kinematics, PhysicsConfig};

const MIN_DISTANCE: f32 = 1.0;

fn separation(from: Vec2, to: Vec2) -> (Vec2, f32) {
    let delta = to - from;
    (delta, delta.length().max(MIN_DISTANCE))
}

pub(super) fn accumulate_repulsion(slots: &mut [Option<Kinematics>], config: &PhysicsConfig) {
    let count = slots.len();
    for i in 0..count {
        for j in (i + 1)..count {
            let (Some(first), Some(second)) = (slots[i], slots[j]) else {
                continue;
            };

            let (delta, distance) = separation(first.position, second.position);
            let push = (delta / distance) * (config.repulsion / (distance * distance));

            if let Some(state) = slots[i].as_mut() {
                state.velocity -= push;
            }
            if let Some(state) = slots[j].as_mut() {
                state.velocity += push;
            }
        }
    }
}

pub(super) fn accumulate_spring(
    slots: &mut [Option<Kinematics>],
    source: usize,
    target: usize,
    strength: f32,
    config: &PhysicsConfig,
) {
    if source == target {
        return;
    }
    let (Some(Some(from)), Some(Some(to))) = (slots.get(source).copied(), slots.get(target).copied())
    else {
        return;
    };

    let (delta, distance) = separation(from.position, to.position);
    let magnitude = (distance - config.rest_length) * config.spring_constant * strength;
    let pull = (delta / distance) * magnitude;

    if let Some(state) = slots[source].as_mut() {
        state.velocity += pull;
    }
    if let Some(state) = slots[target].as_mut() {
        state.velocity -= pull;
    }
}

pub(super) fn accumulate_gravity(
    slots: &mut [Option<Kinematics>],
    center: Vec2,
    config: &PhysicsConfig,
) {
    for state in slots.iter_mut().flatten() {
        state.velocity += (center - state.position) * config.center_gravity;
    }
}

pub(super) fn integrate(slots: &mut [Option<Kinematics>], config: &PhysicsConfig) {
    for state in slots.iter_mut().flatten() {
        state.velocity *= config.damping;
        state.position += state.velocity;
    }
}
