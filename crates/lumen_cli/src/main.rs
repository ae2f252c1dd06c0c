//! Lumen CLI
//!
//! Drives the triangulator and the keyframe scheduler from a `lumen.toml`
//! scene file:
//! - `init` writes a starter scene
//! - `triangulate` ear-clips the configured polygons
//! - `grid` tessellates the configured wave grids
//! - `play` steps the configured tracks through a manual clock

mod commands;
mod config;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::commands::PlayRange;
use crate::config::LumenConfig;

/// Triangulate polygons and play keyframe scenes
#[derive(Parser, Debug)]
#[command(name = "lumen")]
#[command(about = "Triangulate polygons and play keyframe scenes from lumen.toml")]
#[command(version)]
struct Cli {
    /// Log filter, e.g. `debug` or `lumen_geometry=trace` (overrides RUST_LOG)
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a starter lumen.toml
    Init {
        /// Directory to create the scene in
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Overwrite an existing lumen.toml
        #[arg(long)]
        force: bool,
    },

    /// Ear-clip the configured polygons
    Triangulate(SceneArgs),

    /// Tessellate the configured wave grids
    Grid(SceneArgs),

    /// Step the configured tracks and print property values per frame
    Play {
        #[command(flatten)]
        scene: SceneArgs,

        /// Clock time of the first frame, in milliseconds
        #[arg(long, default_value_t = 0.0)]
        from: f64,

        /// Clock time of the last frame, in milliseconds
        #[arg(long, default_value_t = 2000.0)]
        to: f64,

        /// Milliseconds between frames
        #[arg(long, default_value_t = 250.0)]
        step: f64,
    },
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Scene file, or a directory containing lumen.toml
    #[arg(short, long, default_value = ".")]
    config: PathBuf,

    /// Only process the item with this name
    #[arg(short, long)]
    name: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { dir, force } => {
            init_logging(cli.log.as_deref(), "info");
            let path = commands::init(&dir, force)?;
            println!("Created {}", path.display());
        }
        Commands::Triangulate(scene) => {
            let config = load_scene(&scene, cli.log.as_deref())?;
            let reports = commands::triangulate(&config, scene.name.as_deref())?;
            emit(scene.json, reports.as_slice(), commands::format_polygons)?;
        }
        Commands::Grid(scene) => {
            let config = load_scene(&scene, cli.log.as_deref())?;
            let reports = commands::grid(&config, scene.name.as_deref())?;
            emit(scene.json, reports.as_slice(), commands::format_grids)?;
        }
        Commands::Play {
            scene,
            from,
            to,
            step,
        } => {
            let config = load_scene(&scene, cli.log.as_deref())?;
            let frames = commands::play(&config, PlayRange { from, to, step })?;
            emit(scene.json, frames.as_slice(), commands::format_frames)?;
        }
    }

    Ok(())
}

fn load_scene(scene: &SceneArgs, log: Option<&str>) -> Result<LumenConfig> {
    let config = LumenConfig::load_from_dir(&scene.config)?;
    init_logging(log, &config.logging.filter);
    tracing::debug!(path = %scene.config.display(), "loaded scene");
    Ok(config)
}

/// Install the global subscriber. `--log` wins over `RUST_LOG`, which wins
/// over the scene's `[logging] filter`.
fn init_logging(cli_filter: Option<&str>, configured: &str) {
    let filter = match cli_filter {
        Some(directives) => EnvFilter::try_new(directives),
        None => EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(configured)),
    }
    .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn emit<T: Serialize>(json: bool, items: &[T], text: fn(&[T]) -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else {
        print!("{}", text(items));
    }
    Ok(())
}
