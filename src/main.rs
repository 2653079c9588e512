mod app;
mod identity;
mod util;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use app::{PhysicsConfig, ViewerSettings};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON snapshot holding the identity nodes and relationships
    #[arg(long)]
    snapshot: PathBuf,

    /// Pairwise repulsion constant
    #[arg(long, default_value_t = PhysicsConfig::default().repulsion, value_parser = finite_f32)]
    repulsion: f32,

    #[arg(long, default_value_t = PhysicsConfig::default().spring_constant, value_parser = finite_f32)]
    spring_constant: f32,

    /// Preferred edge length in pixels
    #[arg(long, default_value_t = PhysicsConfig::default().rest_length, value_parser = finite_f32)]
    rest_length: f32,

    #[arg(long, default_value_t = PhysicsConfig::default().center_gravity, value_parser = finite_f32)]
    center_gravity: f32,

    /// Per-tick velocity multiplier, below 1
    #[arg(long, default_value_t = PhysicsConfig::default().damping, value_parser = damping_factor)]
    damping: f32,

    /// Radius of the circle nodes are seeded on
    #[arg(long, default_value_t = PhysicsConfig::default().layout_radius, value_parser = finite_f32)]
    layout_radius: f32,

    /// Click distance that selects a node; also the drawn node radius
    #[arg(long, default_value_t = 24.0, value_parser = finite_f32)]
    hit_radius: f32,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn finite_f32(raw: &str) -> Result<f32, String> {
    let value = raw
        .parse::<f32>()
        .map_err(|err| format!("`{raw}` is not a number: {err}"))?;
    if !value.is_finite() {
        return Err(format!("`{raw}` must be a finite number"));
    }
    Ok(value)
}

fn damping_factor(raw: &str) -> Result<f32, String> {
    let value = finite_f32(raw)?;
    if !(0.0..1.0).contains(&value) {
        return Err(format!("damping must be in [0, 1), got {value}"));
    }
    Ok(value)
}

impl Args {
    fn settings(&self) -> ViewerSettings {
        ViewerSettings {
            physics: PhysicsConfig {
                repulsion: self.repulsion,
                spring_constant: self.spring_constant,
                rest_length: self.rest_length,
                center_gravity: self.center_gravity,
                damping: self.damping,
                layout_radius: self.layout_radius,
                ..PhysicsConfig::default()
            },
            hit_radius: self.hit_radius.max(1.0),
        }
    }
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();

    let filter = match args.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let settings = args.settings();
    tracing::info!(snapshot = %args.snapshot.display(), ?settings, "starting identity graph");

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1280.0, 820.0]),
        ..Default::default()
    };

    eframe::run_native(
        "identity graph",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::IdentityGraphApp::new(
                cc,
                args.snapshot.clone(),
                settings,
            )))
        }),
    )
}
