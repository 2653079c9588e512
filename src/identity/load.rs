use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::graph::IdentitySnapshot;
use super::parse::parse_snapshot;

pub fn load_snapshot(path: &Path) -> Result<IdentitySnapshot> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read identity snapshot {}", path.display()))?;

    let snapshot = parse_snapshot(&raw)
        .with_context(|| format!("failed to parse identity snapshot {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        revision = snapshot.revision,
        nodes = snapshot.node_count(),
        edges = snapshot.edge_count(),
        "loaded identity snapshot"
    );
    Ok(snapshot)
}
