//! LAS (Log ASCII Standard) well-log reader
//!
//! Parses LAS 1.2 and 2.0 files into header sections and column-major curve
//! data. The first curve in the `~C` section is the depth index.
//!
//! # Usage
//!
//! ```ignore
//! use lasplot::las::LasFile;
//!
//! let las = LasFile::read("1050383876.las")?;
//! println!("{}", las.curves_table());
//! let frame = las.to_frame()?;
//! ```

mod parser;

use crate::frame::{FrameError, LogFrame};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub use parser::parse_header_line;

/// Missing-value sentinel used when `~W NULL` is absent.
pub const DEFAULT_NULL_VALUE: f64 = -999.25;

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum LasError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Missing required section ~{0}")]
    MissingSection(char),

    #[error("No curves defined in the ~C section")]
    NoCurves,

    #[error("Line {line}: malformed header line '{text}'")]
    MalformedHeader { line: usize, text: String },

    #[error("Line {line}: invalid numeric value '{token}'")]
    InvalidNumber { line: usize, token: String },

    #[error("Data section holds {values} values, not a multiple of {curves} curves")]
    RaggedData { values: usize, curves: usize },

    #[error("Unsupported LAS version {0} (only 1.2 and 2.0 are supported)")]
    UnsupportedVersion(String),
}

// ============================================================================
// Header Items
// ============================================================================

/// One `MNEM.UNIT  VALUE : DESCRIPTION` line from a header section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderItem {
    pub mnemonic: String,
    pub unit: String,
    pub value: String,
    pub description: String,
}

impl HeaderItem {
    /// Value with the LAS 1.2 fallback: older files put well information in
    /// the description slot and leave the value empty.
    pub fn effective_value(&self) -> &str {
        if self.value.is_empty() {
            &self.description
        } else {
            &self.value
        }
    }

    /// Numeric value, if the value field parses as a float.
    pub fn numeric_value(&self) -> Option<f64> {
        self.effective_value().parse().ok()
    }
}

/// Curve definition from the `~C` section.
pub type CurveInfo = HeaderItem;

// ============================================================================
// LAS File
// ============================================================================

/// A parsed LAS file.
#[derive(Debug, Clone)]
pub struct LasFile {
    /// `~V` section items (VERS, WRAP)
    pub version: Vec<HeaderItem>,
    /// `~W` section items (STRT, STOP, STEP, NULL, WELL, ...)
    pub well: Vec<HeaderItem>,
    /// `~C` curve definitions in column order
    pub curves: Vec<CurveInfo>,
    /// `~P` parameter items
    pub params: Vec<HeaderItem>,
    /// `~O` free text
    pub other: String,
    /// Column-major data, one vector per curve. Nulls are NaN.
    pub data: Vec<Vec<f64>>,
}

impl LasFile {
    /// Read and parse a LAS file from disk.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, LasError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LasError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let las = Self::parse(&text)?;
        info!(
            file = %path.display(),
            curves = las.curves.len(),
            rows = las.row_count(),
            "Loaded LAS file"
        );
        Ok(las)
    }

    /// Parse LAS text.
    pub fn parse(text: &str) -> Result<Self, LasError> {
        parser::parse(text)
    }

    fn find<'a>(items: &'a [HeaderItem], mnemonic: &str) -> Option<&'a HeaderItem> {
        items
            .iter()
            .find(|item| item.mnemonic.eq_ignore_ascii_case(mnemonic))
    }

    /// Look up a `~W` item by mnemonic (case-insensitive).
    pub fn well_value(&self, mnemonic: &str) -> Option<&HeaderItem> {
        Self::find(&self.well, mnemonic)
    }

    /// Look up a `~C` curve definition by mnemonic (case-insensitive).
    pub fn curve(&self, mnemonic: &str) -> Option<&CurveInfo> {
        Self::find(&self.curves, mnemonic)
    }

    /// Look up a `~P` parameter by mnemonic (case-insensitive).
    pub fn param(&self, mnemonic: &str) -> Option<&HeaderItem> {
        Self::find(&self.params, mnemonic)
    }

    /// `~V VERS`, defaulting to 2.0 when absent.
    pub fn version_number(&self) -> f64 {
        Self::find(&self.version, "VERS")
            .and_then(HeaderItem::numeric_value)
            .unwrap_or(2.0)
    }

    /// `~V WRAP` flag.
    pub fn is_wrapped(&self) -> bool {
        Self::find(&self.version, "WRAP")
            .map(|item| item.effective_value().eq_ignore_ascii_case("YES"))
            .unwrap_or(false)
    }

    /// `~W NULL`, or [`DEFAULT_NULL_VALUE`].
    pub fn null_value(&self) -> f64 {
        self.well_value("NULL")
            .and_then(HeaderItem::numeric_value)
            .unwrap_or(DEFAULT_NULL_VALUE)
    }

    pub fn well_name(&self) -> Option<&str> {
        self.well_value("WELL")
            .map(HeaderItem::effective_value)
            .filter(|name| !name.is_empty())
    }

    pub fn start(&self) -> Option<f64> {
        self.well_value("STRT").and_then(HeaderItem::numeric_value)
    }

    pub fn stop(&self) -> Option<f64> {
        self.well_value("STOP").and_then(HeaderItem::numeric_value)
    }

    pub fn step(&self) -> Option<f64> {
        self.well_value("STEP").and_then(HeaderItem::numeric_value)
    }

    /// Unit of the depth index curve (e.g. "FT", "M").
    pub fn index_unit(&self) -> Option<&str> {
        self.curves
            .first()
            .map(|c| c.unit.as_str())
            .filter(|u| !u.is_empty())
    }

    pub fn row_count(&self) -> usize {
        self.data.first().map_or(0, Vec::len)
    }

    /// Curve listing: mnemonic, unit and description per curve.
    pub fn curves_table(&self) -> String {
        let width = self
            .curves
            .iter()
            .map(|c| c.mnemonic.len())
            .max()
            .unwrap_or(0)
            .max("Mnemonic".len());
        let mut out = String::new();
        let _ = writeln!(out, "{:<width$}  {:<8}  Description", "Mnemonic", "Unit");
        let _ = writeln!(out, "{:-<width$}  {:-<8}  {:-<11}", "", "", "");
        for c in &self.curves {
            let _ = writeln!(out, "{:<width$}  {:<8}  {}", c.mnemonic, c.unit, c.description);
        }
        out
    }

    /// Convert to a depth-indexed [`LogFrame`]. The first curve becomes the
    /// index; all remaining curves become columns.
    pub fn to_frame(&self) -> Result<LogFrame, FrameError> {
        let (index, rest) = self
            .curves
            .split_first()
            .ok_or_else(|| FrameError::UnknownCurve("<depth index>".to_string()))?;
        let column = |i: usize, curve: &CurveInfo| {
            self.data
                .get(i)
                .cloned()
                .ok_or_else(|| FrameError::MissingData(curve.mnemonic.clone()))
        };
        let mut frame = LogFrame::new(&index.mnemonic, column(0, index)?);
        for (i, curve) in rest.iter().enumerate() {
            frame.insert_column(&curve.mnemonic, column(i + 1, curve)?)?;
        }
        Ok(frame)
    }
}

// ============================================================================
// Tests
// ============================================================================
