use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Vec2};

use crate::identity::{IdentitySnapshot, load_snapshot};

mod graph;
mod physics;
mod render_utils;
mod ui;

use graph::{FrameLoop, FrameStats, LayerFilter, RenderStyle, Selection};
pub use physics::PhysicsConfig;
use physics::Simulation;

#[derive(Clone, Copy, Debug)]
pub struct ViewerSettings {
    pub physics: PhysicsConfig,
    pub hit_radius: f32,
}

type LoadResult = Result<IdentitySnapshot, String>;

pub struct IdentityGraphApp {
    snapshot_path: PathBuf,
    settings: ViewerSettings,
    state: AppState,
    reload_rx: Option<Receiver<LoadResult>>,
}

enum AppState {
    Loading { rx: Receiver<LoadResult> },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    snapshot: IdentitySnapshot,
    simulation: Simulation,
    frame_loop: FrameLoop,
    selection: Selection,
    layer_filter: LayerFilter,
    style: RenderStyle,
    hit_radius: f32,
    surface_size: Vec2,
    last_frame: FrameStats,
}

impl IdentityGraphApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        snapshot_path: PathBuf,
        settings: ViewerSettings,
    ) -> Self {
        let state = Self::start_load(&snapshot_path);
        Self {
            snapshot_path,
            settings,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(snapshot_path: &Path) -> Receiver<LoadResult> {
        let (tx, rx) = mpsc::channel();
        let path = snapshot_path.to_path_buf();

        thread::spawn(move || {
            let result = load_snapshot(&path).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(snapshot_path: &Path) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(snapshot_path),
        }
    }
}

impl eframe::App for IdentityGraphApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(Ok(snapshot)) => {
                        transition = Some(AppState::Ready(Box::new(ViewModel::new(
                            snapshot,
                            self.settings,
                        ))));
                    }
                    Ok(Err(error)) => {
                        tracing::error!(%error, "identity snapshot failed to load");
                        transition = Some(AppState::Error(error));
                    }
                    Err(TryRecvError::Empty) => ctx.request_repaint(),
                    Err(TryRecvError::Disconnected) => {
                        transition = Some(AppState::Error(
                            "Background load worker disconnected".to_owned(),
                        ));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading identity graph...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load the identity snapshot");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(&self.snapshot_path));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &self.snapshot_path, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(&self.snapshot_path));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(Ok(snapshot)) => model.replace_snapshot(snapshot),
                        Ok(Err(error)) => {
                            tracing::warn!(%error, "reload failed, keeping current snapshot");
                        }
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                            ctx.request_repaint();
                        }
                        Err(TryRecvError::Disconnected) => {
                            tracing::warn!("background reload worker disconnected");
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}
