//! Lumen scene file handling

use anyhow::{Context, Result};
use lumen_animation::{AnimationError, Easing, SharedTarget, Track};
use lumen_core::math::{lerp, sine};
use lumen_core::{Point, Vertex};
use lumen_geometry::Viewport;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File name looked up when a directory is given
pub const CONFIG_FILE: &str = "lumen.toml";

/// Top-level scene configuration (lumen.toml)
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LumenConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Canvas size used to correct polygon aspect ratio
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<ViewportConfig>,
    #[serde(default, rename = "polygon")]
    pub polygons: Vec<PolygonConfig>,
    #[serde(default, rename = "grid")]
    pub grids: Vec<GridConfig>,
    #[serde(default, rename = "track")]
    pub tracks: Vec<TrackConfig>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct ViewportConfig {
    pub width: f32,
    pub height: f32,
}

impl From<ViewportConfig> for Viewport {
    fn from(config: ViewportConfig) -> Self {
        Viewport::new(config.width, config.height)
    }
}

/// A simple polygon to ear-clip
#[derive(Debug, Deserialize, Serialize)]
pub struct PolygonConfig {
    pub name: String,
    /// Outline in clip space, clockwise unless `normalize_winding` is set
    pub points: Vec<[f32; 2]>,
    /// Reverse counter-clockwise outlines before clipping
    #[serde(default)]
    pub normalize_winding: bool,
}

impl PolygonConfig {
    pub fn outline(&self) -> Vec<Point> {
        self.points.iter().copied().map(Point::from).collect()
    }
}

/// A height-mapped grid `z = amplitude * sin(omega * x + phi)`
#[derive(Debug, Deserialize, Serialize)]
pub struct GridConfig {
    pub name: String,
    #[serde(default = "default_grid_size")]
    pub columns: usize,
    #[serde(default = "default_grid_size")]
    pub rows: usize,
    #[serde(default = "default_range")]
    pub x_range: [f32; 2],
    #[serde(default = "default_range")]
    pub y_range: [f32; 2],
    #[serde(default = "default_amplitude")]
    pub amplitude: f32,
    #[serde(default = "default_omega")]
    pub omega: f32,
    #[serde(default)]
    pub phi: f32,
}

fn default_grid_size() -> usize {
    11
}

fn default_range() -> [f32; 2] {
    [-1.0, 1.0]
}

fn default_amplitude() -> f32 {
    0.1
}

fn default_omega() -> f32 {
    std::f32::consts::PI
}

impl GridConfig {
    /// Row-major vertices, `columns` per row
    pub fn vertices(&self) -> Vec<Vertex> {
        let wave = sine(self.amplitude, self.omega, self.phi);
        let along = |range: [f32; 2], i: usize, n: usize| {
            let t = if n > 1 { i as f32 / (n - 1) as f32 } else { 0.0 };
            lerp(range[0], range[1], t)
        };

        let mut vertices = Vec::with_capacity(self.columns * self.rows);
        for row in 0..self.rows {
            let y = along(self.y_range, row, self.rows);
            for col in 0..self.columns {
                let x = along(self.x_range, col, self.columns);
                vertices.push(Vertex::new(x, y, wave(x)));
            }
        }
        vertices
    }
}

/// Keyframed properties driving one named target
#[derive(Debug, Deserialize, Serialize)]
pub struct TrackConfig {
    pub target: String,
    /// Clock time at which the track starts, in milliseconds
    #[serde(default)]
    pub start: f64,
    #[serde(default = "default_duration")]
    pub duration: f64,
    #[serde(default = "default_true")]
    pub repeat: bool,
    #[serde(default, rename = "property")]
    pub properties: Vec<PropertyConfig>,
}

fn default_duration() -> f64 {
    lumen_animation::DEFAULT_DURATION_MS
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PropertyConfig {
    pub name: String,
    /// `[time_ms, value]` pairs in increasing time order
    pub keyframes: Vec<[f64; 2]>,
    /// Easing applied on every segment of this property
    #[serde(default)]
    pub easing: EasingName,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EasingName {
    #[default]
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    Step,
}

impl From<EasingName> for Easing {
    fn from(name: EasingName) -> Self {
        match name {
            EasingName::Linear => Easing::Linear,
            EasingName::EaseInQuad => Easing::EaseInQuad,
            EasingName::EaseOutQuad => Easing::EaseOutQuad,
            EasingName::EaseInOutQuad => Easing::EaseInOutQuad,
            EasingName::EaseInCubic => Easing::EaseInCubic,
            EasingName::EaseOutCubic => Easing::EaseOutCubic,
            EasingName::EaseInOutCubic => Easing::EaseInOutCubic,
            EasingName::Step => Easing::Step,
        }
    }
}

impl TrackConfig {
    /// Build a validated track writing into `target`
    pub fn build(&self, target: SharedTarget) -> lumen_animation::Result<Track> {
        for (i, property) in self.properties.iter().enumerate() {
            if self.properties[..i].iter().any(|p| p.name == property.name) {
                return Err(AnimationError::InvalidConfiguration(format!(
                    "property `{}` is listed more than once for target `{}`",
                    property.name, self.target
                )));
            }
        }

        let mut builder = Track::builder(target)
            .start_at(self.start)
            .duration(self.duration)
            .repeat(self.repeat);
        for property in &self.properties {
            let easing = Easing::from(property.easing);
            for &[time_ms, value] in &property.keyframes {
                builder = builder.keyframe_with_ease(&property.name, time_ms, value as f32, easing);
            }
            if property.keyframes.is_empty() {
                builder = builder.property(&property.name, Vec::new());
            }
        }
        builder.build()
    }
}

impl LumenConfig {
    /// Load configuration from a file, or from lumen.toml in a directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = if path.is_file() {
            path.to_path_buf()
        } else {
            path.join(CONFIG_FILE)
        };

        if !config_path.exists() {
            anyhow::bail!(
                "No {} found in {}. Run `lumen init` to create one.",
                CONFIG_FILE,
                path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::parse(&content).with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Starter scene: a square, an L-shaped outline, a wave grid and a
    /// pair of twinkling stars
    pub fn starter() -> Self {
        Self {
            logging: LoggingConfig::default(),
            viewport: Some(ViewportConfig {
                width: 800.0,
                height: 600.0,
            }),
            polygons: vec![
                PolygonConfig {
                    name: "square".to_string(),
                    points: vec![[-0.5, 0.5], [0.5, 0.5], [0.5, -0.5], [-0.5, -0.5]],
                    normalize_winding: false,
                },
                PolygonConfig {
                    name: "ell".to_string(),
                    points: vec![
                        [0.0, 0.0],
                        [0.0, 0.6],
                        [0.2, 0.6],
                        [0.2, 0.2],
                        [0.6, 0.2],
                        [0.6, 0.0],
                    ],
                    normalize_winding: true,
                },
            ],
            grids: vec![GridConfig {
                name: "wave".to_string(),
                columns: default_grid_size(),
                rows: default_grid_size(),
                x_range: default_range(),
                y_range: default_range(),
                amplitude: default_amplitude(),
                omega: default_omega(),
                phi: 0.0,
            }],
            tracks: vec![
                TrackConfig {
                    target: "star-a".to_string(),
                    start: 0.0,
                    duration: 2000.0,
                    repeat: true,
                    properties: vec![PropertyConfig {
                        name: "alpha".to_string(),
                        keyframes: vec![[0.0, 0.0], [1000.0, 1.0], [2000.0, 0.0]],
                        easing: EasingName::EaseInOutQuad,
                    }],
                },
                TrackConfig {
                    target: "star-b".to_string(),
                    start: 500.0,
                    duration: 1000.0,
                    repeat: false,
                    properties: vec![PropertyConfig {
                        name: "size".to_string(),
                        keyframes: vec![[0.0, 1.0], [1000.0, 4.0]],
                        easing: EasingName::Linear,
                    }],
                },
            ],
        }
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
