//! Default constants.
//!
//! Centralises the numbers the processing steps and figures fall back to
//! when no config file overrides them.

// ============================================================================
// Config Discovery
// ============================================================================

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "LASPLOT_CONFIG";

/// Config file looked up in the current working directory.
pub const LOCAL_CONFIG_FILE: &str = "lasplot.toml";

// ============================================================================
// Inspection
// ============================================================================

/// Rows shown by the head/tail previews.
pub const PREVIEW_ROWS: usize = 5;

// ============================================================================
// Figure
// ============================================================================

/// Figure width for the six/seven-track layouts (pixels).
pub const FIGURE_WIDTH_PX: u32 = 1200;

/// Figure width when a fraction track is appended (pixels).
pub const COMBO_FIGURE_WIDTH_PX: u32 = 1400;

/// Standalone fraction panel width (pixels).
pub const PANEL_FIGURE_WIDTH_PX: u32 = 640;

/// Figure height for all layouts (pixels).
pub const FIGURE_HEIGHT_PX: u32 = 800;

/// Super-title font size (pixels).
pub const TITLE_FONT_PX: u32 = 22;

/// Axis label font size (pixels).
pub const LABEL_FONT_PX: u32 = 14;
