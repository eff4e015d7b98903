//! Configuration with layered resolution using figment.
//!
//! Resolution order (highest priority last):
//! 1. Built-in defaults
//! 2. User config: `~/.config/graph-explorer/config.toml` (XDG) or platform config dir
//! 3. Project config: `.graph-explorer.toml`
//! 4. Environment variables: `GRAPH_EXPLORER_*` (nested keys joined with `__`)
//!
//! # Example
//!
//! ```toml
//! [animation]
//! processing_delay_ms = 1500
//! advance_delay_ms = 2000
//!
//! [layout]
//! node_gap = 80.0
//! level_gap = 80.0
//! leveling = "per_layer"     # or "per_dequeue"
//!
//! [traversal]
//! expansion = "origin_only"  # or "undirected"
//! root = 0
//! ```
//!
//! `GRAPH_EXPLORER_ANIMATION__ADVANCE_DELAY_MS=500` overrides a single key.

use std::ops::Deref;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

use crate::animation::{AnimationTimings, Expansion};
use crate::layout::{LayoutSettings, LevelStrategy};

/// Boxed wrapper for figment::Error to reduce Result size on the stack.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl Deref for ConfigError {
    type Target = figment::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub animation: AnimationConfig,
    pub layout: LayoutConfig,
    pub traversal: TraversalConfig,
}

/// Pauses between the two phases of each traversal step.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// How long a dequeued node stays highlighted before it is committed.
    pub processing_delay_ms: u64,
    /// How long the expanded queue is shown before the next dequeue.
    pub advance_delay_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            processing_delay_ms: 1500,
            advance_delay_ms: 2000,
        }
    }
}

impl AnimationConfig {
    pub fn timings(&self) -> AnimationTimings {
        AnimationTimings {
            processing_delay: Duration::from_millis(self.processing_delay_ms),
            advance_delay: Duration::from_millis(self.advance_delay_ms),
        }
    }
}

/// Level layout geometry.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Horizontal gap between nodes on the same level.
    pub node_gap: f64,
    /// Vertical gap between levels.
    pub level_gap: f64,
    /// Offset of the first node from the canvas origin on both axes.
    pub margin: f64,
    /// Canvas never gets shorter than this.
    pub min_canvas_height: f64,
    /// Canvas height contributed by each level of depth.
    pub height_per_level: f64,
    pub leveling: LevelStrategy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let settings = LayoutSettings::default();
        Self {
            node_gap: settings.node_gap,
            level_gap: settings.level_gap,
            margin: settings.margin,
            min_canvas_height: settings.min_canvas_height,
            height_per_level: settings.height_per_level,
            leveling: settings.strategy,
        }
    }
}

impl LayoutConfig {
    pub fn settings(&self) -> LayoutSettings {
        LayoutSettings {
            node_gap: self.node_gap,
            level_gap: self.level_gap,
            margin: self.margin,
            min_canvas_height: self.min_canvas_height,
            height_per_level: self.height_per_level,
            strategy: self.leveling,
        }
    }
}

/// Traversal behaviour.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TraversalConfig {
    /// Which side of an edge a dequeued node may expand along.
    pub expansion: Expansion,
    /// Index of the node the traversal starts from.
    pub root: usize,
}

/// Project-local config file name.
pub const PROJECT_CONFIG_FILE: &str = ".graph-explorer.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "GRAPH_EXPLORER_";

impl Config {
    /// Load config with layered resolution (defaults → user → project → env).
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// The layered figment used by [`Config::load`].
    pub fn figment() -> Figment {
        Figment::new()
            // Layer 1: User config (lowest priority)
            .merge(Toml::file(Self::user_config_path()))
            // Layer 2: Project config
            .merge(Toml::file(PROJECT_CONFIG_FILE))
            // Layer 3: Environment variables (highest priority)
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Parse config from a TOML string, filling unspecified keys with defaults.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Figment::from(Toml::string(toml))
            .extract()
            .map_err(ConfigError::from)
    }

    /// User config path: ~/.config/graph-explorer/config.toml (XDG) or platform config dir.
    fn user_config_path() -> std::path::PathBuf {
        // Prefer XDG config location (~/.config) on all platforms
        if let Some(home) = dirs::home_dir() {
            let xdg_path = home
                .join(".config")
                .join("graph-explorer")
                .join("config.toml");
            if xdg_path.exists() {
                return xdg_path;
            }
        }
        // Fall back to platform-specific config dir
        dirs::config_dir()
            .map(|p| p.join("graph-explorer").join("config.toml"))
            .unwrap_or_default()
    }
}
