use eframe::egui::{self, Align2, Color32, FontId, Sense, Ui, vec2};

use super::super::ViewModel;
use super::super::render_utils::screen_to_surface;
use super::interaction::hit_test;
use super::render::PainterSurface;

impl ViewModel {
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click());
        let painter = ui.painter_at(rect);
        self.surface_size = rect.size();

        let mut surface = PainterSurface::new(&painter, rect);
        self.last_frame = self.frame_loop.frame(
            &mut self.simulation,
            &self.snapshot,
            rect.size(),
            &mut surface,
            &self.layer_filter,
            self.selection.id(),
            &self.style,
        );

        if self.frame_loop.is_running() {
            ui.ctx().request_repaint();
        }

        if self.snapshot.nodes.is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "This snapshot has no identity nodes.",
                FontId::proportional(14.0),
                Color32::from_gray(200),
            );
            return;
        }

        let hovered = response.hover_pos().and_then(|pointer| {
            hit_test(
                screen_to_surface(rect, pointer),
                &self.snapshot.nodes,
                self.simulation.states(),
                self.hit_radius,
            )
        });

        if let Some(node) = hovered.and_then(|id| self.snapshot.node(id)) {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });

            let panel_text = format!(
                "{}  |  {}  |  {}  |  connections {}",
                node.label,
                node.origin.label(),
                node.layer,
                self.snapshot.connection_count(&node.id)
            );
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                panel_text,
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }

        if response.clicked_by(egui::PointerButton::Primary)
            && let Some(pointer) = response.interact_pointer_pos()
        {
            let hit = hit_test(
                screen_to_surface(rect, pointer),
                &self.snapshot.nodes,
                self.simulation.states(),
                self.hit_radius,
            );
            self.selection.apply_hit(hit);
        }
    }
}
