use eframe::egui::{self, Ui};

use super::super::ViewModel;
use super::super::graph::LayerFilter;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        let layers = self
            .snapshot
            .layers()
            .into_iter()
            .map(str::to_owned)
            .collect::<Vec<_>>();

        egui::ComboBox::from_id_salt("layer_filter")
            .selected_text(self.layer_filter.label().to_owned())
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut self.layer_filter, LayerFilter::All, "all layers");
                for layer in layers {
                    let label = layer.clone();
                    ui.selectable_value(&mut self.layer_filter, LayerFilter::Layer(layer), label);
                }
            });

        let running = self.frame_loop.is_running();
        let toggle_label = if running { "Pause layout" } else { "Resume layout" };
        if ui.button(toggle_label).clicked() {
            if running {
                self.frame_loop.stop();
            } else {
                self.frame_loop.start();
            }
        }

        let can_reseed = self.surface_size.x > 0.0 && self.surface_size.y > 0.0;
        if ui
            .add_enabled(can_reseed, egui::Button::new("Reseed layout"))
            .clicked()
        {
            self.simulation
                .reseed(&self.snapshot.nodes, self.surface_size);
        }

        if ui.button("Clear selection").clicked() {
            self.selection.clear();
        }
    }
}
