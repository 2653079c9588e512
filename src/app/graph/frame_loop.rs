use eframe::egui::Vec2;

use crate::identity::IdentitySnapshot;

use super::super::physics::Simulation;
use super::render::{FrameStats, LayerFilter, RenderStyle, Surface, render_frame};

// One fixed tick per frame while running, regardless of frame duration.
#[derive(Debug, Default)]
pub(in crate::app) struct FrameLoop {
    running: bool,
    ticks: u64,
}

impl FrameLoop {
    pub(in crate::app) fn start(&mut self) {
        if !self.running {
            tracing::debug!(ticks = self.ticks, "layout loop started");
            self.running = true;
        }
    }

    pub(in crate::app) fn stop(&mut self) {
        if self.running {
            tracing::debug!(ticks = self.ticks, "layout loop stopped");
            self.running = false;
        }
    }

    pub(in crate::app) fn is_running(&self) -> bool {
        self.running
    }

    pub(in crate::app) fn ticks(&self) -> u64 {
        self.ticks
    }

    #[allow(clippy::too_many_arguments)]
    pub(in crate::app) fn frame(
        &mut self,
        simulation: &mut Simulation,
        snapshot: &IdentitySnapshot,
        surface_size: Vec2,
        surface: &mut impl Surface,
        filter: &LayerFilter,
        selected: Option<&str>,
        style: &RenderStyle,
    ) -> FrameStats {
        if !simulation.is_seeded() {
            simulation.sync(&snapshot.nodes, surface_size);
        }

        if self.running {
            simulation.step(&snapshot.nodes, &snapshot.edges, surface_size);
            self.ticks = self.ticks.wrapping_add(1);
        }

        render_frame(
            surface,
            snapshot,
            simulation.states(),
            filter,
            selected,
            style,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::super::render::recording::{DrawOp, RecordingSurface};
    use super::*;
    use crate::app::physics::PhysicsConfig;
    use crate::identity::fixtures::{edge, node};

    const SURFACE: Vec2 = Vec2::new(800.0, 600.0);

    fn snapshot() -> IdentitySnapshot {
        IdentitySnapshot {
            revision: 1,
            nodes: vec![node("a", "core"), node("b", "core"), node("c", "work")],
            edges: vec![edge("ab", "a", "b", 0.8), edge("bc", "b", "c", 0.3)],
        }
    }

    fn run_frame(frame_loop: &mut FrameLoop, simulation: &mut Simulation) -> RecordingSurface {
        let mut surface = RecordingSurface::default();
        frame_loop.frame(
            simulation,
            &snapshot(),
            SURFACE,
            &mut surface,
            &LayerFilter::All,
            None,
            &RenderStyle::default(),
        );
        surface
    }

    #[test]
    fn start_and_stop_are_idempotent() {
        let mut frame_loop = FrameLoop::default();
        frame_loop.stop();
        assert!(!frame_loop.is_running());

        frame_loop.start();
        frame_loop.start();
        assert!(frame_loop.is_running());

        frame_loop.stop();
        frame_loop.stop();
        assert!(!frame_loop.is_running());
    }

    #[test]
    fn first_frame_seeds_every_node() {
        let mut frame_loop = FrameLoop::default();
        let mut simulation = Simulation::new(PhysicsConfig::default());

        let surface = run_frame(&mut frame_loop, &mut simulation);

        assert_eq!(simulation.states().len(), 3);
        assert_eq!(surface.ops.first(), Some(&DrawOp::Clear));
    }

    #[test]
    fn running_loop_ticks_once_per_frame() {
        let mut frame_loop = FrameLoop::default();
        let mut simulation = Simulation::new(PhysicsConfig::default());
        frame_loop.start();

        run_frame(&mut frame_loop, &mut simulation);
        let after_one = simulation.states().clone();
        run_frame(&mut frame_loop, &mut simulation);

        assert_eq!(frame_loop.ticks(), 2);
        assert_ne!(simulation.states(), &after_one);
    }

    #[test]
    fn stopped_loop_freezes_layout_but_keeps_drawing() {
        let mut frame_loop = FrameLoop::default();
        let mut simulation = Simulation::new(PhysicsConfig::default());
        frame_loop.start();
        for _ in 0..5 {
            run_frame(&mut frame_loop, &mut simulation);
        }

        frame_loop.stop();
        let frozen = simulation.states().clone();
        let surface = run_frame(&mut frame_loop, &mut simulation);

        assert_eq!(simulation.states(), &frozen);
        assert_eq!(frame_loop.ticks(), 5);
        assert_eq!(surface.lines().len(), 2);

        frame_loop.start();
        run_frame(&mut frame_loop, &mut simulation);
        assert_eq!(frame_loop.ticks(), 6);
        assert_ne!(simulation.states(), &frozen);
    }
}
