//! lasplot: LAS well-log processing and multi-track log display
//!
//! Reads a LAS file, cleans a selection of depth-indexed curves, derives a
//! shale volume curve and renders conventional well-log figures, including a
//! stacked "fraction" track built from cumulative component series.
//!
//! ## Flow
//!
//! - **las**: LAS 1.2 / 2.0 reader (`LasFile`)
//! - **frame**: depth-indexed curve table (`LogFrame`) with describe statistics
//! - **pipeline**: selection, missing-data handling, range filters, derived curves
//! - **fraction**: cumulative fraction bands and their fill polygons
//! - **plot**: track layouts and PNG/SVG rendering

pub mod config;
pub mod fraction;
pub mod frame;
pub mod las;
pub mod petrophysics;
pub mod pipeline;
pub mod plot;

// Re-export configuration
pub use config::PlotConfig;

// Re-export commonly used types
pub use fraction::{FractionComponent, FractionError, FractionSet};
pub use frame::{CurveStats, Describe, FrameError, LogFrame};
pub use las::{CurveInfo, HeaderItem, LasError, LasFile};
pub use pipeline::{InspectionReport, PipelineError, PreparedLogs};
pub use plot::{LayoutKind, LogLayout, OutputFormat, RenderError};
