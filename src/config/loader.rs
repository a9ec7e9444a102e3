//! Configuration file loading with precedence handling.

use crate::state::app_state::ViewSettings;
use crate::view_state::transform::ZoomLimits;
use crate::view_state::types::GridGeometry;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// Environment variable holds an unparseable value.
    #[error("Invalid value {value:?} for environment variable {var}")]
    InvalidEnv {
        /// Variable name.
        var: &'static str,
        /// Raw value.
        value: String,
    },

    /// Resolved value is out of range.
    #[error("Invalid configuration value for {field}: {reason}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/tmv/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Tile edge length in pixels.
    #[serde(default)]
    pub tile_size: Option<u32>,

    /// Map width in tiles.
    #[serde(default)]
    pub map_width: Option<u32>,

    /// Map height in tiles.
    #[serde(default)]
    pub map_height: Option<u32>,

    /// Tileset atlas column count.
    #[serde(default)]
    pub tiles_per_row: Option<u32>,

    /// LOD threshold in screen pixels.
    #[serde(default)]
    pub min_visible_pixels: Option<f64>,

    /// Lower zoom bound.
    #[serde(default)]
    pub min_zoom: Option<f64>,

    /// Upper zoom bound.
    #[serde(default)]
    pub max_zoom: Option<f64>,

    /// Wheel-up / `+` zoom multiplier.
    #[serde(default)]
    pub zoom_in_factor: Option<f64>,

    /// Wheel-down / `-` zoom multiplier.
    #[serde(default)]
    pub zoom_out_factor: Option<f64>,

    /// Keyboard pan distance in screen pixels.
    #[serde(default)]
    pub pan_step: Option<f64>,

    /// Grid generator seed.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Tileset image path.
    #[serde(default)]
    pub tileset: Option<PathBuf>,

    /// Redraw cadence in milliseconds.
    #[serde(default)]
    pub frame_interval_ms: Option<u64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Tile edge length in pixels.
    pub tile_size: u32,
    /// Map width in tiles.
    pub map_width: u32,
    /// Map height in tiles.
    pub map_height: u32,
    /// Tileset atlas column count.
    pub tiles_per_row: u32,
    /// LOD threshold in screen pixels.
    pub min_visible_pixels: f64,
    /// Lower zoom bound.
    pub min_zoom: f64,
    /// Upper zoom bound.
    pub max_zoom: f64,
    /// Zoom-in multiplier.
    pub zoom_in_factor: f64,
    /// Zoom-out multiplier.
    pub zoom_out_factor: f64,
    /// Keyboard pan distance.
    pub pan_step: f64,
    /// Grid generator seed.
    pub seed: u64,
    /// Tileset image; `None` uses the built-in palette.
    pub tileset: Option<PathBuf>,
    /// Redraw cadence in milliseconds.
    pub frame_interval_ms: u64,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            tile_size: 16,
            map_width: 10_000,
            map_height: 10_000,
            tiles_per_row: 8,
            min_visible_pixels: 4.0,
            min_zoom: ZoomLimits::DEFAULT_MIN,
            max_zoom: ZoomLimits::DEFAULT_MAX,
            zoom_in_factor: 1.1,
            zoom_out_factor: 0.9,
            pan_step: 8.0,
            seed: 0,
            tileset: None,
            frame_interval_ms: 16,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Reject values the core would refuse.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.geometry()?;
        self.zoom_limits()?;
        positive("min_visible_pixels", self.min_visible_pixels)?;
        positive("zoom_in_factor", self.zoom_in_factor)?;
        positive("zoom_out_factor", self.zoom_out_factor)?;
        if !self.pan_step.is_finite() {
            return Err(ConfigError::Invalid {
                field: "pan_step",
                reason: format!("must be finite (got {})", self.pan_step),
            });
        }
        if self.frame_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "frame_interval_ms",
                reason: "must be >= 1".to_string(),
            });
        }
        Ok(())
    }

    /// Grid geometry from the size fields.
    pub fn geometry(&self) -> Result<GridGeometry, ConfigError> {
        GridGeometry::new(
            self.tile_size,
            self.map_width,
            self.map_height,
            self.tiles_per_row,
        )
        .map_err(|e| ConfigError::Invalid {
            field: "geometry",
            reason: e.to_string(),
        })
    }

    /// Zoom bounds.
    pub fn zoom_limits(&self) -> Result<ZoomLimits, ConfigError> {
        ZoomLimits::new(self.min_zoom, self.max_zoom).map_err(|e| ConfigError::Invalid {
            field: "min_zoom/max_zoom",
            reason: e.to_string(),
        })
    }

    /// Navigation tunables.
    pub fn view_settings(&self) -> ViewSettings {
        ViewSettings {
            zoom_in_factor: self.zoom_in_factor,
            zoom_out_factor: self.zoom_out_factor,
            pan_step: self.pan_step,
        }
    }

    /// Redraw cadence.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be finite and > 0 (got {value})"),
        })
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/tmv/tmv.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("tmv").join("tmv.log")
    } else {
        PathBuf::from("tmv.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/tmv/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tmv").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `TMV_CONFIG` environment variable
/// 3. Default path `~/.config/tmv/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("TMV_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        tile_size: config.tile_size.unwrap_or(defaults.tile_size),
        map_width: config.map_width.unwrap_or(defaults.map_width),
        map_height: config.map_height.unwrap_or(defaults.map_height),
        tiles_per_row: config.tiles_per_row.unwrap_or(defaults.tiles_per_row),
        min_visible_pixels: config
            .min_visible_pixels
            .unwrap_or(defaults.min_visible_pixels),
        min_zoom: config.min_zoom.unwrap_or(defaults.min_zoom),
        max_zoom: config.max_zoom.unwrap_or(defaults.max_zoom),
        zoom_in_factor: config.zoom_in_factor.unwrap_or(defaults.zoom_in_factor),
        zoom_out_factor: config.zoom_out_factor.unwrap_or(defaults.zoom_out_factor),
        pan_step: config.pan_step.unwrap_or(defaults.pan_step),
        seed: config.seed.unwrap_or(defaults.seed),
        tileset: config.tileset.or(defaults.tileset),
        frame_interval_ms: config
            .frame_interval_ms
            .unwrap_or(defaults.frame_interval_ms),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `TMV_TILESET`: Override tileset path
/// - `TMV_SEED`: Override grid seed
///
/// # Errors
///
/// `InvalidEnv` if `TMV_SEED` is not an unsigned integer.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Ok(tileset) = std::env::var("TMV_TILESET") {
        config.tileset = Some(PathBuf::from(tileset));
    }

    if let Ok(raw) = std::env::var("TMV_SEED") {
        config.seed = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
            var: "TMV_SEED",
            value: raw.clone(),
        })?;
    }

    Ok(config)
}

/// CLI flags that override configuration. `None` means "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--tileset`
    pub tileset: Option<PathBuf>,
    /// `--seed`
    pub seed: Option<u64>,
    /// `--map-width`
    pub map_width: Option<u32>,
    /// `--map-height`
    pub map_height: Option<u32>,
    /// `--tile-size`
    pub tile_size: Option<u32>,
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, overrides: CliOverrides) -> ResolvedConfig {
    if let Some(tileset) = overrides.tileset {
        config.tileset = Some(tileset);
    }
    if let Some(seed) = overrides.seed {
        config.seed = seed;
    }
    if let Some(width) = overrides.map_width {
        config.map_width = width;
    }
    if let Some(height) = overrides.map_height {
        config.map_height = height;
    }
    if let Some(size) = overrides.tile_size {
        config.tile_size = size;
    }
    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
