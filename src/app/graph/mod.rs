mod frame_loop;
mod interaction;
mod render;
mod view;

pub(super) use frame_loop::FrameLoop;
pub(super) use interaction::{Selection, inspect};
pub(super) use render::{FrameStats, LayerFilter, RenderStyle};
