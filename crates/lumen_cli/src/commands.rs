//! Subcommand implementations
//!
//! Each command turns the scene config into a serializable report; `main`
//! decides whether to print it as text or JSON.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use lumen_animation::{shared, AnimationScheduler, Clock, ManualClock, PropertyMap};
use lumen_core::Triangle;
use lumen_geometry::polygon::{orient, triangles_area};
use lumen_geometry::{combine, resolve, Viewport, Winding};
use serde::Serialize;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{debug, info};

use crate::config::{LumenConfig, CONFIG_FILE};

/// Upper bound on frames produced by one `play` run
pub const MAX_FRAMES: usize = 10_000;

/// Write a starter lumen.toml into `dir`
pub fn init(dir: &Path, force: bool) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let path = dir.join(CONFIG_FILE);
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Pass --force to overwrite it.",
            path.display()
        );
    }

    fs::write(&path, LumenConfig::starter().to_toml()?)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), "wrote starter scene");
    Ok(path)
}

#[derive(Debug, Serialize)]
pub struct PolygonReport {
    pub name: String,
    pub vertices: usize,
    /// Whether the outline was reversed to wind clockwise
    pub reversed: bool,
    pub triangles: Vec<[[f32; 2]; 3]>,
    pub area: f32,
}

/// Ear-clip every configured polygon, or only the one called `only`
pub fn triangulate(config: &LumenConfig, only: Option<&str>) -> Result<Vec<PolygonReport>> {
    let viewport = config.viewport.map(Viewport::from);
    let selected: Vec<_> = config
        .polygons
        .iter()
        .filter(|p| only.map_or(true, |name| p.name == name))
        .collect();
    if let (Some(name), true) = (only, selected.is_empty()) {
        anyhow::bail!("No polygon named `{name}`");
    }

    selected
        .into_iter()
        .map(|polygon| {
            let mut outline = polygon.outline();
            if let Some(viewport) = &viewport {
                outline = viewport.accept_ratio(&outline);
            }
            let reversed = polygon.normalize_winding && orient(&mut outline, Winding::Clockwise);
            let vertices = outline.len();

            let triangles = resolve(&mut outline)
                .with_context(|| format!("Failed to triangulate polygon `{}`", polygon.name))?;
            let area = triangles_area(&triangles);
            info!(
                polygon = %polygon.name,
                triangles = triangles.len(),
                area,
                "triangulated polygon"
            );

            Ok(PolygonReport {
                name: polygon.name.clone(),
                vertices,
                reversed,
                triangles: triangles.iter().map(flat_triangle).collect(),
                area,
            })
        })
        .collect()
}

fn flat_triangle([a, b, c]: &Triangle) -> [[f32; 2]; 3] {
    [[a.x, a.y], [b.x, b.y], [c.x, c.y]]
}

#[derive(Debug, Serialize)]
pub struct GridReport {
    pub name: String,
    pub columns: usize,
    pub rows: usize,
    pub triangles: Vec<[[f32; 3]; 3]>,
}

/// Tessellate every configured wave grid, or only the one called `only`
pub fn grid(config: &LumenConfig, only: Option<&str>) -> Result<Vec<GridReport>> {
    let selected: Vec<_> = config
        .grids
        .iter()
        .filter(|g| only.map_or(true, |name| g.name == name))
        .collect();
    if let (Some(name), true) = (only, selected.is_empty()) {
        anyhow::bail!("No grid named `{name}`");
    }

    selected
        .into_iter()
        .map(|grid| {
            let vertices = grid.vertices();
            let triangles = combine(&vertices, grid.columns)
                .with_context(|| format!("Failed to tessellate grid `{}`", grid.name))?;
            info!(grid = %grid.name, triangles = triangles.len(), "tessellated grid");

            Ok(GridReport {
                name: grid.name.clone(),
                columns: grid.columns,
                rows: grid.rows,
                triangles: triangles
                    .iter()
                    .map(|[a, b, c]| [a.to_array(), b.to_array(), c.to_array()])
                    .collect(),
            })
        })
        .collect()
}

/// Clock range stepped through by `play`, in milliseconds
#[derive(Debug, Clone, Copy)]
pub struct PlayRange {
    pub from: f64,
    pub to: f64,
    pub step: f64,
}

#[derive(Debug, Serialize)]
pub struct Frame {
    pub time_ms: f64,
    pub targets: Vec<TargetState>,
}

#[derive(Debug, Serialize)]
pub struct TargetState {
    pub target: String,
    pub properties: BTreeMap<String, f32>,
}

/// Drive every configured track from one root composition and record the
/// targets' properties at each step
pub fn play(config: &LumenConfig, range: PlayRange) -> Result<Vec<Frame>> {
    if !(range.step.is_finite() && range.step > 0.0) {
        anyhow::bail!("Step must be a positive number of milliseconds, got {}", range.step);
    }
    if !(range.from.is_finite() && range.to.is_finite()) || range.to < range.from {
        anyhow::bail!("Invalid time range {}..{}", range.from, range.to);
    }
    // Frames after the first. The epsilon keeps `to` reachable when the
    // division lands just below a whole number (0.3 / 0.1).
    let steps = ((range.to - range.from) / range.step + 1e-9).floor();
    if steps >= MAX_FRAMES as f64 {
        anyhow::bail!("{steps} frames requested, the limit is {MAX_FRAMES}");
    }
    let frame_count = steps as usize + 1;

    let mut targets: IndexMap<String, Rc<RefCell<PropertyMap>>> = IndexMap::new();
    let mut scheduler = AnimationScheduler::new();
    let root = scheduler.add_composition();

    for track_config in &config.tracks {
        let target = targets
            .entry(track_config.target.clone())
            .or_insert_with(|| shared(PropertyMap::new()))
            .clone();
        let track = track_config
            .build(target)
            .with_context(|| format!("Invalid track for target `{}`", track_config.target))?;
        let node = scheduler.add_track(track);
        scheduler.add(root, node)?;
    }
    debug!(
        tracks = scheduler.track_count(),
        targets = targets.len(),
        "scene assembled"
    );

    let mut clock = ManualClock::new(range.from);
    let mut frames = Vec::with_capacity(frame_count);
    for i in 0..frame_count {
        clock.seek((range.from + i as f64 * range.step).min(range.to));
        let now = clock.now_ms();
        scheduler.update(root, now)?;
        frames.push(Frame {
            time_ms: now,
            targets: targets
                .iter()
                .map(|(name, target)| TargetState {
                    target: name.clone(),
                    properties: target
                        .borrow()
                        .sorted()
                        .into_iter()
                        .map(|(k, v)| (k.to_string(), v))
                        .collect(),
                })
                .collect(),
        });
    }

    if !scheduler.has_active_animations(range.to) {
        info!("all tracks finished by {} ms", range.to);
    }
    Ok(frames)
}

pub fn format_polygons(reports: &[PolygonReport]) -> String {
    let mut out = String::new();
    for report in reports {
        let _ = writeln!(
            out,
            "{}: {} vertices -> {} triangles, area {:.4}{}",
            report.name,
            report.vertices,
            report.triangles.len(),
            report.area,
            if report.reversed { " (reversed)" } else { "" }
        );
        for [a, b, c] in &report.triangles {
            let _ = writeln!(
                out,
                "  ({:.3}, {:.3}) ({:.3}, {:.3}) ({:.3}, {:.3})",
                a[0], a[1], b[0], b[1], c[0], c[1]
            );
        }
    }
    out
}

pub fn format_grids(reports: &[GridReport]) -> String {
    let mut out = String::new();
    for report in reports {
        let _ = writeln!(
            out,
            "{}: {}x{} vertices -> {} triangles",
            report.name,
            report.columns,
            report.rows,
            report.triangles.len()
        );
    }
    out
}

pub fn format_frames(frames: &[Frame]) -> String {
    let mut out = String::new();
    for frame in frames {
        let _ = write!(out, "{:>8.1} ms", frame.time_ms);
        for state in &frame.targets {
            let _ = write!(out, "  {}[", state.target);
            let values: Vec<String> = state
                .properties
                .iter()
                .map(|(name, value)| format!("{name}={value:.3}"))
                .collect();
            let _ = write!(out, "{}]", values.join(" "));
        }
        out.push('\n');
    }
    out
}
