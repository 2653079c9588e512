use eframe::egui::{Color32, Pos2, Rect, Vec2};

use crate::identity::{EdgeKind, Origin};

pub(super) const BACKGROUND: Color32 = Color32::from_rgb(19, 23, 29);
pub(super) const SELECTION_RING: Color32 = Color32::from_rgb(245, 206, 93);
pub(super) const LEARNING_OFF_BADGE: Color32 = Color32::from_rgb(222, 96, 84);
pub(super) const LABEL_TEXT: Color32 = Color32::from_gray(232);

pub(super) fn origin_color(origin: Origin) -> Color32 {
    match origin {
        Origin::Declared => Color32::from_rgb(92, 156, 230),
        Origin::Inferred => Color32::from_rgb(168, 120, 222),
        Origin::Contributed => Color32::from_rgb(236, 158, 82),
    }
}

pub(super) fn edge_color(kind: EdgeKind) -> Color32 {
    match kind {
        EdgeKind::Tension => Color32::from_rgb(232, 98, 92),
        EdgeKind::ReinforcingPattern => Color32::from_rgb(240, 196, 92),
        EdgeKind::Contradiction => Color32::from_rgb(214, 102, 182),
        EdgeKind::Support => Color32::from_rgb(104, 196, 132),
    }
}

pub(super) fn with_alpha(color: Color32, alpha: f32) -> Color32 {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    Color32::from_rgba_unmultiplied(r, g, b, (a as f32 * alpha.clamp(0.0, 1.0)) as u8)
}

pub(super) fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
        (color.a() as f32 * (0.45 + (factor * 0.55))) as u8,
    )
}

pub(super) fn surface_to_screen(rect: Rect, surface: Vec2) -> Pos2 {
    rect.min + surface
}

pub(super) fn screen_to_surface(rect: Rect, screen: Pos2) -> Vec2 {
    screen - rect.min
}
