use std::collections::HashMap;

use eframe::egui::{Align2, Color32, FontId, Painter, Rect, Stroke, Vec2, vec2};

use crate::identity::{IdentityNode, IdentitySnapshot};
use crate::util::truncate_label;

use super::super::physics::KinematicBuffer;
use super::super::render_utils::{
    BACKGROUND, LABEL_TEXT, LEARNING_OFF_BADGE, SELECTION_RING, dim_color, edge_color,
    origin_color, surface_to_screen, with_alpha,
};

pub(in crate::app) trait Surface {
    fn clear(&mut self, color: Color32);
    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color32);
    fn disc(&mut self, center: Vec2, radius: f32, fill: Color32);
    fn ring(&mut self, center: Vec2, radius: f32, width: f32, color: Color32);
    fn label(&mut self, anchor: Vec2, text: &str, color: Color32);
}

pub(in crate::app) struct PainterSurface<'a> {
    painter: &'a Painter,
    rect: Rect,
}

impl<'a> PainterSurface<'a> {
    pub(in crate::app) fn new(painter: &'a Painter, rect: Rect) -> Self {
        Self { painter, rect }
    }
}

impl Surface for PainterSurface<'_> {
    fn clear(&mut self, color: Color32) {
        self.painter.rect_filled(self.rect, 0.0, color);
    }

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color32) {
        self.painter.line_segment(
            [
                surface_to_screen(self.rect, from),
                surface_to_screen(self.rect, to),
            ],
            Stroke::new(width, color),
        );
    }

    fn disc(&mut self, center: Vec2, radius: f32, fill: Color32) {
        self.painter
            .circle_filled(surface_to_screen(self.rect, center), radius, fill);
    }

    fn ring(&mut self, center: Vec2, radius: f32, width: f32, color: Color32) {
        self.painter.circle_stroke(
            surface_to_screen(self.rect, center),
            radius,
            Stroke::new(width, color),
        );
    }

    fn label(&mut self, anchor: Vec2, text: &str, color: Color32) {
        self.painter.text(
            surface_to_screen(self.rect, anchor),
            Align2::LEFT_CENTER,
            text,
            FontId::proportional(12.0),
            color,
        );
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(in crate::app) enum LayerFilter {
    #[default]
    All,
    Layer(String),
}

impl LayerFilter {
    pub(in crate::app) fn admits_node(&self, node: &IdentityNode) -> bool {
        match self {
            Self::All => true,
            Self::Layer(layer) => node.layer == *layer,
        }
    }

    pub(in crate::app) fn admits_edge(&self, source: &IdentityNode, target: &IdentityNode) -> bool {
        self.admits_node(source) || self.admits_node(target)
    }

    pub(in crate::app) fn label(&self) -> &str {
        match self {
            Self::All => "all layers",
            Self::Layer(layer) => layer.as_str(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub(in crate::app) struct RenderStyle {
    pub(in crate::app) node_radius: f32,
    pub(in crate::app) dim_factor: f32,
    pub(in crate::app) badge_radius: f32,
    pub(in crate::app) label_chars: usize,
}

impl RenderStyle {
    pub(in crate::app) fn with_node_radius(node_radius: f32) -> Self {
        Self {
            node_radius,
            ..Self::default()
        }
    }
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            node_radius: 24.0,
            dim_factor: 0.35,
            badge_radius: 5.0,
            label_chars: 22,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(in crate::app) struct FrameStats {
    pub(in crate::app) nodes_drawn: usize,
    pub(in crate::app) edges_drawn: usize,
}

fn edge_stroke(strength: f32) -> (f32, f32) {
    let strength = strength.clamp(0.0, 1.0);
    (1.0 + strength * 3.0, 0.25 + strength * 0.75)
}

pub(in crate::app) fn render_frame(
    surface: &mut impl Surface,
    snapshot: &IdentitySnapshot,
    states: &KinematicBuffer,
    filter: &LayerFilter,
    selected: Option<&str>,
    style: &RenderStyle,
) -> FrameStats {
    surface.clear(BACKGROUND);
    let mut stats = FrameStats::default();

    let node_by_id = snapshot
        .nodes
        .iter()
        .map(|node| (node.id.as_str(), node))
        .collect::<HashMap<_, _>>();

    for edge in &snapshot.edges {
        let (Some(source), Some(target)) = (
            node_by_id.get(edge.source.as_str()),
            node_by_id.get(edge.target.as_str()),
        ) else {
            continue;
        };
        let (Some(from), Some(to)) = (states.get(&edge.source), states.get(&edge.target)) else {
            continue;
        };
        if !filter.admits_edge(source, target) {
            continue;
        }

        let (width, alpha) = edge_stroke(edge.strength);
        surface.line(
            from.position,
            to.position,
            width,
            with_alpha(edge_color(edge.kind), alpha),
        );
        stats.edges_drawn += 1;
    }

    for node in &snapshot.nodes {
        let Some(state) = states.get(&node.id) else {
            continue;
        };
        let position = state.position;
        let radius = style.node_radius;

        let base = origin_color(node.origin);
        let fill = if filter.admits_node(node) {
            base
        } else {
            dim_color(base, style.dim_factor)
        };

        surface.disc(position, radius, fill);
        surface.ring(
            position,
            radius,
            1.0,
            Color32::from_rgba_unmultiplied(15, 15, 15, 190),
        );
        if selected == Some(node.id.as_str()) {
            surface.ring(position, radius + 4.0, 3.0, SELECTION_RING);
        }
        if !node.learning_enabled {
            let offset = vec2(radius, -radius) * std::f32::consts::FRAC_1_SQRT_2;
            surface.disc(position + offset, style.badge_radius, LEARNING_OFF_BADGE);
        }

        surface.label(
            position + vec2(radius + 6.0, 0.0),
            &truncate_label(&node.label, style.label_chars),
            LABEL_TEXT,
        );
        stats.nodes_drawn += 1;
    }

    stats
}

#[cfg(test)]
pub(in crate::app) mod recording {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    pub(in crate::app) enum DrawOp {
        Clear,
        Line { from: Vec2, to: Vec2, width: f32, color: Color32 },
        Disc { center: Vec2, radius: f32, fill: Color32 },
        Ring { center: Vec2, radius: f32, color: Color32 },
        Label { text: String },
    }

    #[derive(Default)]
    pub(in crate::app) struct RecordingSurface {
        pub(in crate::app) ops: Vec<DrawOp>,
    }

    impl RecordingSurface {
        pub(in crate::app) fn lines(&self) -> Vec<&DrawOp> {
            self.ops
                .iter()
                .filter(|op| matches!(op, DrawOp::Line { .. }))
                .collect()
        }

        pub(in crate::app) fn discs_of_radius(&self, wanted: f32) -> Vec<(Vec2, Color32)> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    DrawOp::Disc { center, radius, fill } if *radius == wanted => {
                        Some((*center, *fill))
                    }
                    _ => None,
                })
                .collect()
        }
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self, _color: Color32) {
            self.ops.push(DrawOp::Clear);
        }

        fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color32) {
            self.ops.push(DrawOp::Line { from, to, width, color });
        }

        fn disc(&mut self, center: Vec2, radius: f32, fill: Color32) {
            self.ops.push(DrawOp::Disc { center, radius, fill });
        }

        fn ring(&mut self, center: Vec2, radius: f32, _width: f32, color: Color32) {
            self.ops.push(DrawOp::Ring { center, radius, color });
        }

        fn label(&mut self, _anchor: Vec2, text: &str, _color: Color32) {
            self.ops.push(DrawOp::Label {
                text: text.to_owned(),
            });
        }
    }
}
