use serde::Deserialize;

use crate::error::ConfigError;
use crate::renderer::traits::ClearColor;

/// Viewports narrower than this get the compact populations.
pub const COMPACT_WIDTH: f32 = 768.0;

/// Environment facts sampled once at construction. Never re-evaluated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capabilities {
    pub reduced_motion: bool,
    pub viewport_width: f32,
}

/// How many particles, shards and stars the scene is built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Populations {
    pub particles: usize,
    pub shards: usize,
    pub stars: usize,
}

impl Populations {
    pub const REDUCED: Self = Self { particles: 200, shards: 40, stars: 200 };
    pub const COMPACT: Self = Self { particles: 350, shards: 70, stars: 400 };
    pub const FULL: Self = Self { particles: 650, shards: 120, stars: 900 };

    pub fn for_capabilities(caps: &Capabilities) -> Self {
        if caps.reduced_motion {
            Self::REDUCED
        } else if caps.viewport_width < COMPACT_WIDTH {
            Self::COMPACT
        } else {
            Self::FULL
        }
    }
}

/// Camera parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    /// Distance from the origin while inline.
    pub base_distance: f32,
    /// Additional distance at hover = 1.
    pub retreat: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_deg: 40.0,
            near: 0.1,
            // Rings reach ~100 world units when fully expanded.
            far: 1000.0,
            base_distance: 4.6,
            retreat: 6.0,
        }
    }
}

/// Tunables for the solar scene controller.
///
/// Deserialised from an optional JSON override string; absent fields keep
/// their defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Per-frame factor for the smoothed pointer.
    pub pointer_ease: f32,
    /// Per-frame factor for the smoothed hover scalar.
    pub hover_ease: f32,
    /// Smoothed hover above which PreExpand becomes Expanded.
    pub expand_threshold: f32,
    /// Radius (CSS px) around the anchored sun that counts as "inside".
    pub hit_radius_px: f32,
    /// Background layer fade duration before it is removed.
    pub backdrop_fade_ms: u32,
    /// CSS scale applied to the inline canvas during PreExpand.
    pub pre_expand_scale: f32,
    /// Solar group scale gain at hover = 1 (applied to hover²).
    pub solar_growth: f32,
    /// Ring group scale gain at hover = 1 (applied to hover²).
    pub ring_growth: f32,
    /// Per-frame factor for the solar group's drift toward its anchor.
    pub anchor_follow: f32,
    pub max_pixel_ratio: f32,
    pub exposure: f32,
    /// Upper bound for a single frame delta in seconds.
    pub max_frame_delta: f32,
    pub seed: u64,
    pub expanded_clear: ClearColor,
    pub camera: CameraConfig,
    /// Console log level for the browser bridge ("debug" shows per-second metrics).
    pub log_level: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            pointer_ease: 0.08,
            hover_ease: 0.02,
            expand_threshold: 0.6,
            hit_radius_px: 140.0,
            backdrop_fade_ms: 600,
            pre_expand_scale: 1.6,
            solar_growth: 0.35,
            ring_growth: 50.0,
            anchor_follow: 0.1,
            max_pixel_ratio: 2.0,
            exposure: 1.1,
            max_frame_delta: 0.1,
            seed: 0x5017_F02E,
            expanded_clear: ClearColor::opaque(0x0a0808),
            camera: CameraConfig::default(),
            log_level: "info".to_owned(),
        }
    }
}

impl SceneConfig {
    /// Parse overrides from JSON. An empty string yields the defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(json)?)
    }

    pub fn log_level(&self) -> Result<log::Level, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }
}
