use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use fakews::building::{write_manifest, FixtureConfig};
use fakews::WorkspaceWriter;

use crate::paths;

fn load(layout: &Path) -> Result<FixtureConfig> {
    FixtureConfig::load(layout).with_context(|| format!("failed to load layout {}", layout.display()))
}

/// Create a workspace from `layout` in `out` (or a fresh temp dir).
pub fn generate(layout: &Path, out: Option<&Path>, manifest: bool) -> Result<()> {
    let cfg = load(layout)?;
    let root = out.map(Path::to_path_buf).unwrap_or_else(paths::unique_temp_root);
    info!(
        "generating {} files from {} into {}",
        cfg.layout.file_count(),
        layout.display(),
        root.display()
    );

    let mut ws = WorkspaceWriter::create_with_markers(&root, cfg.markers.clone())
        .with_context(|| format!("cannot create workspace in {}", root.display()))?;
    cfg.layout.apply(ws.root_package())?;
    let root = ws.close()?;

    finish(&root, manifest)
}

/// Apply `layout` to the existing workspace at `root`.
pub fn modify(layout: &Path, root: &Path) -> Result<()> {
    let cfg = load(layout)?;
    let mut ws = WorkspaceWriter::open_existing_with_markers(root, cfg.markers.clone())
        .with_context(|| format!("cannot open workspace {}", root.display()))?;
    cfg.layout.apply(ws.root_package())?;
    let root = ws.close()?;

    finish(&root, false)
}

pub fn manifest(root: &Path) -> Result<()> {
    let mut out = io::stdout().lock();
    write_manifest(root, &mut out).with_context(|| format!("cannot list {}", root.display()))?;
    Ok(())
}

fn finish(root: &Path, print_manifest: bool) -> Result<()> {
    if print_manifest {
        manifest(root)?;
    }
    println!("Wrote workspace to {}", root.display());
    Ok(())
}
