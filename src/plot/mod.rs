//! Multi-track well-log rendering
//!
//! A figure is a row of tracks sharing one depth axis, deepest sample at the
//! bottom. Curve tracks draw one or more logs as lines; a fraction track
//! fills the cumulative component bands. [`LogLayout`] is the drawing-free
//! description of a figure and [`render`] turns it into PNG or SVG output.

pub mod color;
mod render;
mod track;

pub use render::{draw_layout, render_svg, render_to_file};
pub use track::{curve_segments, padded_range, CurveTrace, LogLayout, Track, TrackKind, XRange};

use crate::fraction::FractionError;
use crate::frame::FrameError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error(transparent)]
    Fraction(#[from] FractionError),

    #[error("Layout has no tracks")]
    NoTracks,

    #[error("No finite depth samples to plot")]
    EmptyDepthRange,

    #[error("Curve {curve} has unknown color '{color}'")]
    UnknownColor { curve: String, color: String },

    #[error("Cannot create output directory {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Drawing failed: {0}")]
    Draw(String),
}

// ============================================================================
// Layouts
// ============================================================================

/// The figures the tool knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    /// Six single-curve tracks.
    Logs,
    /// The six tracks plus a MELCAL/RHOB overlay track.
    Overlay,
    /// Standalone fraction track with legend.
    FractionPanel,
    /// The six tracks plus a fraction track.
    Combo,
}

impl LayoutKind {
    pub const ALL: [LayoutKind; 4] = [
        LayoutKind::Logs,
        LayoutKind::Overlay,
        LayoutKind::FractionPanel,
        LayoutKind::Combo,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LayoutKind::Logs => "logs",
            LayoutKind::Overlay => "overlay",
            LayoutKind::FractionPanel => "fraction",
            LayoutKind::Combo => "combo",
        }
    }

    /// Whether the layout needs curves from a LAS file.
    pub fn needs_logs(self) -> bool {
        !matches!(self, LayoutKind::FractionPanel)
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LayoutKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "logs" => Ok(LayoutKind::Logs),
            "overlay" => Ok(LayoutKind::Overlay),
            "fraction" | "fraction-panel" => Ok(LayoutKind::FractionPanel),
            "combo" => Ok(LayoutKind::Combo),
            other => Err(format!(
                "unknown layout '{other}' (expected logs, overlay, fraction or combo)"
            )),
        }
    }
}

// ============================================================================
// Output Format
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
}

impl OutputFormat {
    /// Format implied by a file extension, if recognised.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        ext.parse().ok()
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            other => Err(format!("unknown output format '{other}' (expected png or svg)")),
        }
    }
}
