use eframe::egui::{self, RichText, Ui};

use super::super::ViewModel;
use super::super::graph::inspect;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Inspector");
        ui.add_space(6.0);

        let Some(selected_id) = self.selection.id().map(str::to_owned) else {
            ui.label("Click a node in the graph to inspect it.");
            return;
        };

        let Some(inspection) = inspect(&self.snapshot, &selected_id) else {
            ui.label("Selected node no longer exists in the snapshot.");
            return;
        };

        let node = inspection.node;
        let mut learning_enabled = node.learning_enabled;

        ui.label(RichText::new(node.label.as_str()).strong());
        ui.small(node.id.as_str());
        ui.add_space(6.0);

        ui.label(format!("Origin: {}", node.origin.label()));
        ui.label(format!("Layer: {}", node.layer));
        ui.label(format!(
            "Externally shared: {}",
            if node.externally_shared { "yes" } else { "no" }
        ));
        if !node.created_at.is_empty() {
            ui.label(format!("Created: {}", node.created_at));
        }
        if !node.provenance.is_empty() {
            ui.label(format!("Provenance: {}", node.provenance));
        }
        if let Some(position) = self.simulation.position(&node.id) {
            ui.small(format!("position: ({:.0}, {:.0})", position.x, position.y));
        }

        let learning_changed = ui
            .checkbox(&mut learning_enabled, "Learning enabled")
            .changed();

        ui.separator();
        ui.label(
            RichText::new(format!(
                "Connections ({})",
                inspection.connected_edges.len()
            ))
            .strong(),
        );

        if inspection.connected_edges.is_empty() {
            ui.label("No relationships touch this node.");
        } else {
            egui::ScrollArea::vertical()
                .id_salt("connected_edges_scroll")
                .max_height(360.0)
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for edge in &inspection.connected_edges {
                        let other = edge
                            .other_end(&node.id)
                            .and_then(|id| self.snapshot.node(id))
                            .map(|other| other.label.as_str())
                            .unwrap_or("?");
                        let direction = if edge.source == node.id { "→" } else { "←" };

                        ui.label(format!(
                            "{direction} {other}  ·  {}  ·  strength {:.2}",
                            edge.kind.label(),
                            edge.strength
                        ));
                        if !edge.label.is_empty() {
                            ui.small(edge.label.as_str());
                        }
                        if !edge.first_observed.is_empty() || !edge.last_observed.is_empty() {
                            ui.small(format!(
                                "observed {} – {}",
                                edge.first_observed, edge.last_observed
                            ));
                        }
                        ui.add_space(4.0);
                    }
                });
        }

        if learning_changed {
            self.set_learning_enabled(&selected_id, learning_enabled);
        }
    }
}
