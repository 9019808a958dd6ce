//! Plot configuration - curve selection, cleaning rules and figure layout as TOML
//!
//! Every struct implements `Default` with the classic six-track display:
//! gamma ray, neutron porosity, sonic, caliper, bulk density and shale volume,
//! plus the MELCAL/RHOB overlay track and the four-component fraction track.

use super::defaults;
use crate::fraction::{demo_components, FractionComponent};
use crate::plot::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config parse error ({}): {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config validation failed:\n{}", format_errors(.0))]
    Validation(Vec<String>),
}

fn format_errors(errors: &[String]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration.
///
/// Load with `PlotConfig::load()` which searches:
/// 1. an explicit path (`--config`)
/// 2. `$LASPLOT_CONFIG`
/// 3. `./lasplot.toml`
/// 4. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Title and depth-axis labelling
    #[serde(default)]
    pub well: WellSection,

    /// Curve selection, missing-data and range filtering rules
    #[serde(default)]
    pub processing: ProcessingConfig,

    /// Figure size and track definitions
    #[serde(default)]
    pub figure: FigureConfig,

    /// Fraction track components
    #[serde(default)]
    pub fraction: FractionConfig,
}

impl PlotConfig {
    /// Load configuration using the standard search order. An explicit path
    /// that fails to load is an error; the env var and local file fall back
    /// to defaults with a warning.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            let config = Self::load_from_file(path)?;
            info!(path = %path.display(), "Loaded plot config");
            return Ok(config);
        }

        if let Ok(path) = std::env::var(defaults::CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded plot config from {}", defaults::CONFIG_ENV_VAR);
                        return Ok(config);
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {}, falling back", defaults::CONFIG_ENV_VAR);
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", defaults::CONFIG_ENV_VAR);
            }
        }

        let local = PathBuf::from(defaults::LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded plot config from ./{}", defaults::LOCAL_CONFIG_FILE);
                    return Ok(config);
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", defaults::LOCAL_CONFIG_FILE);
                }
            }
        }

        info!("No {} found, using built-in defaults", defaults::LOCAL_CONFIG_FILE);
        Ok(Self::default())
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Parse and validate TOML text. Unknown keys only warn.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }
        let config: Self = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate internal consistency.
    ///
    /// Rules:
    /// - Range filters need finite bounds with min < max
    /// - Required curves must be part of the selection
    /// - Tracks need at least one curve and a known color per curve
    /// - Fraction components must share a sample count
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (errors, warnings) = super::validation::validate_ranges(self);
        for w in &warnings {
            warn!("{}", w);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Figure title: the configured override or `Well: <WELL>`.
    pub fn title_for(&self, well_name: Option<&str>) -> String {
        match (&self.well.title, well_name) {
            (Some(title), _) => title.clone(),
            (None, Some(name)) => format!("Well: {name}"),
            (None, None) => "Well: UNKNOWN".to_string(),
        }
    }
}

// ============================================================================
// Well Section
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WellSection {
    /// Figure super-title. Defaults to `Well: <~W WELL>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Depth axis label on the first track
    #[serde(default = "default_depth_label")]
    pub depth_label: String,
}

fn default_depth_label() -> String {
    "Depth (ft)".to_string()
}

impl Default for WellSection {
    fn default() -> Self {
        Self {
            title: None,
            depth_label: default_depth_label(),
        }
    }
}

// ============================================================================
// Processing
// ============================================================================

/// A high/low cut: keep rows with `min < value <= max`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeFilter {
    pub curve: String,
    pub min: f64,
    pub max: f64,
}

impl RangeFilter {
    pub fn new(curve: &str, min: f64, max: f64) -> Self {
        Self {
            curve: curve.to_string(),
            min,
            max,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Curves kept from the LAS file, in display order
    #[serde(default = "default_select")]
    pub select: Vec<String>,

    /// Rows missing any of these curves are dropped
    #[serde(default = "default_required")]
    pub required: Vec<String>,

    /// Normal-range cuts applied one after another
    #[serde(default = "default_filters")]
    pub filters: Vec<RangeFilter>,

    /// Gamma ray curve the shale volume is computed from
    #[serde(default = "default_gamma_ray_curve")]
    pub gamma_ray_curve: String,

    /// Name of the derived shale volume curve
    #[serde(default = "default_shale_volume_curve")]
    pub shale_volume_curve: String,
}

fn default_select() -> Vec<String> {
    ["CNPOR", "GR", "RHOB", "DT", "MELCAL", "SPOR"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_required() -> Vec<String> {
    ["GR", "DT", "SPOR"].iter().map(|s| s.to_string()).collect()
}
fn default_filters() -> Vec<RangeFilter> {
    // SPOR is derived from DT and needs no cut of its own.
    vec![
        RangeFilter::new("CNPOR", -15.0, 50.0),
        RangeFilter::new("GR", 0.0, 250.0),
        RangeFilter::new("RHOB", 1.0, 3.0),
        RangeFilter::new("DT", 30.0, 140.0),
    ]
}
fn default_gamma_ray_curve() -> String {
    "GR".to_string()
}
fn default_shale_volume_curve() -> String {
    "Vsh".to_string()
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            select: default_select(),
            required: default_required(),
            filters: default_filters(),
            gamma_ray_curve: default_gamma_ray_curve(),
            shale_volume_curve: default_shale_volume_curve(),
        }
    }
}

// ============================================================================
// Figure
// ============================================================================

/// One curve drawn in a track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveStyleConfig {
    pub name: String,
    pub color: String,
}

impl CurveStyleConfig {
    pub fn new(name: &str, color: &str) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
        }
    }
}

/// A track of one or more curves sharing the depth axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackConfig {
    /// X-axis label. Defaults to the curve names joined with ", ".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    pub curves: Vec<CurveStyleConfig>,

    /// Fixed x limits; otherwise min..max over the track's curves
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
}

impl TrackConfig {
    fn single(name: &str, color: &str) -> Self {
        Self {
            label: None,
            curves: vec![CurveStyleConfig::new(name, color)],
            range: None,
        }
    }

    pub fn label(&self) -> String {
        self.label.clone().unwrap_or_else(|| {
            self.curves
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FigureConfig {
    #[serde(default = "default_width")]
    pub width: u32,

    /// Width used when the fraction track is appended
    #[serde(default = "default_combo_width")]
    pub combo_width: u32,

    /// Width of the standalone fraction panel
    #[serde(default = "default_panel_width")]
    pub panel_width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    #[serde(default = "default_title_font_px")]
    pub title_font_px: u32,

    #[serde(default = "default_label_font_px")]
    pub label_font_px: u32,

    /// Used when the output path has no recognised extension
    #[serde(default)]
    pub format: OutputFormat,

    /// Conventional tracks, left to right
    #[serde(default = "default_tracks")]
    pub tracks: Vec<TrackConfig>,

    /// Extra track appended by the overlay layout
    #[serde(default = "default_overlay")]
    pub overlay: TrackConfig,
}

fn default_width() -> u32 {
    defaults::FIGURE_WIDTH_PX
}
fn default_combo_width() -> u32 {
    defaults::COMBO_FIGURE_WIDTH_PX
}
fn default_panel_width() -> u32 {
    defaults::PANEL_FIGURE_WIDTH_PX
}
fn default_height() -> u32 {
    defaults::FIGURE_HEIGHT_PX
}
fn default_title_font_px() -> u32 {
    defaults::TITLE_FONT_PX
}
fn default_label_font_px() -> u32 {
    defaults::LABEL_FONT_PX
}
fn default_tracks() -> Vec<TrackConfig> {
    vec![
        TrackConfig::single("GR", "green"),
        TrackConfig::single("CNPOR", "red"),
        TrackConfig::single("DT", "black"),
        TrackConfig::single("MELCAL", "blue"),
        TrackConfig::single("RHOB", "c"),
        TrackConfig::single("Vsh", "m"),
    ]
}
fn default_overlay() -> TrackConfig {
    TrackConfig {
        label: Some("RHOB, MELCAL".to_string()),
        curves: vec![
            CurveStyleConfig::new("MELCAL", "blue"),
            CurveStyleConfig::new("RHOB", "c"),
        ],
        range: None,
    }
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            combo_width: default_combo_width(),
            panel_width: default_panel_width(),
            height: default_height(),
            title_font_px: default_title_font_px(),
            label_font_px: default_label_font_px(),
            format: OutputFormat::default(),
            tracks: default_tracks(),
            overlay: default_overlay(),
        }
    }
}

// ============================================================================
// Fraction Track
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FractionConfig {
    /// X-axis label of the fraction track in the combined layout
    #[serde(default = "default_fraction_label")]
    pub label: String,

    /// Title of the standalone fraction panel
    #[serde(default = "default_panel_title")]
    pub panel_title: String,

    /// Explicit sample depths; otherwise spread evenly over the log interval
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depths: Option<Vec<f64>>,

    /// Components stacked left to right
    #[serde(default = "demo_components")]
    pub components: Vec<FractionComponent>,
}

fn default_fraction_label() -> String {
    "Fraction 4".to_string()
}
fn default_panel_title() -> String {
    "Fraction Panel".to_string()
}

impl Default for FractionConfig {
    fn default() -> Self {
        Self {
            label: default_fraction_label(),
            panel_title: default_panel_title(),
            depths: None,
            components: demo_components(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
