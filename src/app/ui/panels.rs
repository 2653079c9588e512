use std::path::Path;

use eframe::egui::{self, Align, Context, Layout, Vec2};

use crate::identity::IdentitySnapshot;

use super::super::graph::{FrameLoop, FrameStats, LayerFilter, RenderStyle, Selection};
use super::super::physics::Simulation;
use super::super::{ViewModel, ViewerSettings};

impl ViewModel {
    pub(in crate::app) fn new(snapshot: IdentitySnapshot, settings: ViewerSettings) -> Self {
        let mut frame_loop = FrameLoop::default();
        frame_loop.start();

        Self {
            snapshot,
            simulation: Simulation::new(settings.physics),
            frame_loop,
            selection: Selection::default(),
            layer_filter: LayerFilter::All,
            style: RenderStyle::with_node_radius(settings.hit_radius),
            hit_radius: settings.hit_radius,
            surface_size: Vec2::ZERO,
            last_frame: FrameStats::default(),
        }
    }

    pub(in crate::app) fn replace_snapshot(&mut self, snapshot: IdentitySnapshot) {
        tracing::info!(
            from = self.snapshot.revision,
            to = snapshot.revision,
            nodes = snapshot.node_count(),
            edges = snapshot.edge_count(),
            "applying identity snapshot"
        );

        if self.simulation.is_seeded() {
            self.simulation.sync(&snapshot.nodes, self.surface_size);
        }
        self.selection.retain_in(&snapshot);
        if let LayerFilter::Layer(layer) = &self.layer_filter
            && !snapshot.layers().contains(&layer.as_str())
        {
            self.layer_filter = LayerFilter::All;
        }
        self.snapshot = snapshot;
    }

    pub(in crate::app) fn set_learning_enabled(&mut self, id: &str, enabled: bool) {
        let next = self.snapshot.with_learning_enabled(id, enabled);
        if next.revision != self.snapshot.revision {
            self.replace_snapshot(next);
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        snapshot_path: &Path,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("identity graph");
                    ui.separator();
                    ui.label(format!("snapshot: {}", snapshot_path.display()));
                    ui.label(format!("revision: {}", self.snapshot.revision));
                    ui.label(format!("nodes: {}", self.snapshot.node_count()));
                    ui.label(format!("edges: {}", self.snapshot.edge_count()));
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload snapshot"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    ui.separator();
                    self.draw_controls(ui);
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(self.visible_graph_text());
                    });
                });
            });

        egui::SidePanel::right("inspector")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_graph(ui));
    }

    fn visible_graph_text(&self) -> String {
        format!(
            "drawn: {} nodes / {} edges  |  tick {}  |  energy {:.3}",
            self.last_frame.nodes_drawn,
            self.last_frame.edges_drawn,
            self.frame_loop.ticks(),
            self.simulation.kinetic_energy()
        )
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;
    use crate::app::physics::PhysicsConfig;
    use crate::identity::fixtures::{edge, node};

    fn model() -> ViewModel {
        let snapshot = IdentitySnapshot {
            revision: 1,
            nodes: vec![node("a", "core"), node("b", "work"), node("c", "core")],
            edges: vec![edge("ab", "a", "b", 0.7)],
        };
        let mut model = ViewModel::new(
            snapshot,
            ViewerSettings {
                physics: PhysicsConfig::default(),
                hit_radius: 24.0,
            },
        );
        model.surface_size = vec2(800.0, 600.0);
        model.simulation.sync(&model.snapshot.nodes, model.surface_size);
        for _ in 0..3 {
            model
                .simulation
                .step(&model.snapshot.nodes, &model.snapshot.edges, model.surface_size);
        }
        model
    }

    #[test]
    fn new_model_starts_the_loop() {
        assert!(model().frame_loop.is_running());
    }

    #[test]
    fn learning_toggle_keeps_layout_and_selection() {
        let mut model = model();
        model.selection.apply_hit(Some("b"));
        let before = model.simulation.states().clone();

        model.set_learning_enabled("b", false);

        assert_eq!(model.snapshot.revision, 2);
        assert!(model.snapshot.node("b").is_some_and(|node| !node.learning_enabled));
        assert_eq!(model.simulation.states(), &before);
        assert_eq!(model.selection.id(), Some("b"));
    }

    #[test]
    fn replacing_snapshot_prunes_removed_nodes() {
        let mut model = model();
        model.selection.apply_hit(Some("c"));
        model.layer_filter = LayerFilter::Layer("work".to_owned());
        let kept = model.simulation.states()["a"];

        model.replace_snapshot(IdentitySnapshot {
            revision: 5,
            nodes: vec![node("a", "core"), node("d", "core")],
            edges: Vec::new(),
        });

        assert_eq!(model.simulation.states()["a"], kept);
        assert!(model.simulation.position("c").is_none());
        assert!(model.simulation.position("d").is_some());
        assert_eq!(model.selection, Selection::Unselected);
        assert_eq!(model.layer_filter, LayerFilter::All);
    }
}
