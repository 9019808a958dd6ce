//! Log Preparation Pipeline
//!
//! ## Processing Steps
//!
//! ```text
//! STEP 1: Read LAS file (caller)
//! STEP 2: Inspection (shape)
//! STEP 3: Log selection
//! STEP 4: Missing-data counts
//! STEP 5: Drop rows missing a required curve
//! STEP 6: Statistics on the cleaned logs
//! STEP 7: Range filtering (each cut applies to the previous result)
//! STEP 8: Computed shale volume curve
//! STEP 9: Depth indexing (sort by depth)
//! ```
//!
//! Every step returns a new frame, so the counts and statistics gathered
//! along the way stay available for the inspection report.

mod report;

pub use report::InspectionReport;

use crate::config::{ProcessingConfig, RangeFilter};
use crate::frame::{Describe, FrameError, LogFrame};
use crate::las::LasFile;
use crate::petrophysics::shale_volume;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error("No rows left after {stage}")]
    Empty { stage: String },
}

/// Rows remaining after one range filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterStage {
    pub filter: RangeFilter,
    pub rows_before: usize,
    pub rows_after: usize,
}

/// Output of [`prepare`]: the final frame plus what each step saw.
#[derive(Debug, Clone, Serialize)]
pub struct PreparedLogs {
    /// (rows, curves) of the full file
    pub loaded_shape: (usize, usize),
    /// (rows, curves) after selection
    pub selected_shape: (usize, usize),
    /// Missing samples per selected curve, before any rows are dropped
    pub selected_nulls: Vec<(String, usize)>,
    pub rows_after_drop: usize,
    /// Statistics of the cleaned logs, before range filtering
    pub statistics: Describe,
    pub filter_stages: Vec<FilterStage>,
    /// Filtered, depth-sorted logs including the shale volume curve
    pub frame: LogFrame,
}

impl PreparedLogs {
    pub fn rows(&self) -> usize {
        self.frame.len()
    }
}

/// Run steps 2-9 on a parsed LAS file.
pub fn prepare(las: &LasFile, config: &ProcessingConfig) -> Result<PreparedLogs, PipelineError> {
    let frame = las.to_frame()?;
    prepare_frame(&frame, config)
}

/// Run steps 2-9 on an already loaded frame.
pub fn prepare_frame(
    frame: &LogFrame,
    config: &ProcessingConfig,
) -> Result<PreparedLogs, PipelineError> {
    // Step 2
    let loaded_shape = frame.shape();
    info!(rows = loaded_shape.0, curves = loaded_shape.1, "Step 2: inspected logs");

    // Step 3
    let selected = frame.select(&config.select)?;
    let selected_shape = selected.shape();
    info!(curves = ?selected.column_names(), "Step 3: selected logs");

    // Step 4
    let selected_nulls = selected.null_counts();
    let total_missing: usize = selected_nulls.iter().map(|(_, n)| n).sum();
    for (curve, missing) in selected_nulls.iter().filter(|(_, n)| *n > 0) {
        debug!(curve = %curve, missing, "Missing samples");
    }
    info!(total_missing, "Step 4: counted missing data");

    // Step 5
    let cleaned = selected.drop_nulls(&config.required)?;
    info!(
        rows = cleaned.len(),
        dropped = selected.len() - cleaned.len(),
        required = ?config.required,
        "Step 5: dropped rows with missing required curves"
    );
    if cleaned.is_empty() {
        return Err(PipelineError::Empty {
            stage: "dropping missing values".to_string(),
        });
    }

    // Step 6
    let statistics = cleaned.describe();
    info!(curves = statistics.curves.len(), "Step 6: computed statistics");

    // Step 7
    let mut filtered = cleaned.clone();
    let mut filter_stages = Vec::with_capacity(config.filters.len());
    for f in &config.filters {
        let rows_before = filtered.len();
        filtered = filtered.filter_range(&f.curve, f.min, f.max)?;
        debug!(
            curve = %f.curve,
            min = f.min,
            max = f.max,
            removed = rows_before - filtered.len(),
            "Applied range filter"
        );
        filter_stages.push(FilterStage {
            filter: f.clone(),
            rows_before,
            rows_after: filtered.len(),
        });
    }
    info!(rows = filtered.len(), filters = config.filters.len(), "Step 7: range filtering");
    if filtered.is_empty() {
        return Err(PipelineError::Empty {
            stage: "range filtering".to_string(),
        });
    }

    // Step 8
    let vsh = shale_volume(filtered.require(&config.gamma_ray_curve)?);
    if vsh.iter().all(|v| v.is_nan()) {
        warn!(curve = %config.shale_volume_curve, "Shale volume is entirely missing");
    }
    filtered.insert_column(&config.shale_volume_curve, vsh)?;
    info!(curve = %config.shale_volume_curve, source = %config.gamma_ray_curve, "Step 8: computed shale volume");

    // Step 9
    let frame = filtered.sort_by_depth();
    if let Some((top, base)) = frame.depth_range() {
        info!(top, base, rows = frame.len(), "Step 9: indexed by depth");
    }

    Ok(PreparedLogs {
        loaded_shape,
        selected_shape,
        selected_nulls,
        rows_after_drop: cleaned.len(),
        statistics,
        filter_stages,
        frame,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const NAN: f64 = f64::NAN;

    fn frame() -> LogFrame {
        LogFrame::new("DEPT", vec![1003.0, 1000.0, 1001.0, 1002.0, 1004.0, 1005.0])
            .with_column("CNPOR", vec![20.0, 18.0, 60.0, 22.0, 25.0, 24.0])
            .unwrap()
            .with_column("GR", vec![80.0, 40.0, 70.0, NAN, 120.0, 300.0])
            .unwrap()
            .with_column("RHOB", vec![2.4, 2.3, 2.5, 2.6, 2.45, 2.5])
            .unwrap()
            .with_column("DT", vec![90.0, 80.0, 85.0, 95.0, 100.0, 92.0])
            .unwrap()
            .with_column("MELCAL", vec![8.5, 8.6, 8.7, 8.8, 8.9, 9.0])
            .unwrap()
            .with_column("SPOR", vec![20.0, 15.0, 17.0, 22.0, NAN, 21.0])
            .unwrap()
            .with_column("ILD", vec![1.0; 6])
            .unwrap()
    }

    #[test]
    fn test_prepare_runs_every_step() {
        let prepared = prepare_frame(&frame(), &ProcessingConfig::default()).unwrap();

        assert_eq!(prepared.loaded_shape, (6, 7));
        assert_eq!(prepared.selected_shape, (6, 6));
        assert_eq!(
            prepared.selected_nulls.iter().find(|(c, _)| c == "GR"),
            Some(&("GR".to_string(), 1))
        );
        // GR missing at 1002, SPOR missing at 1004
        assert_eq!(prepared.rows_after_drop, 4);
        assert_eq!(prepared.statistics.get("GR").unwrap().count, 4);

        // CNPOR 60 and GR 300 are cut
        assert_eq!(prepared.frame.depth(), &[1000.0, 1003.0]);
        assert_eq!(prepared.filter_stages.len(), 4);
        assert_eq!(prepared.filter_stages[0].rows_after, 3);
        assert_eq!(prepared.filter_stages[1].rows_after, 2);
        assert!(prepared.frame.column("ILD").is_none());
    }

    #[test]
    fn test_shale_volume_uses_filtered_gamma_ray() {
        let prepared = prepare_frame(&frame(), &ProcessingConfig::default()).unwrap();
        assert_eq!(prepared.frame.column("GR").unwrap(), &[40.0, 80.0]);
        assert_eq!(prepared.frame.column("Vsh").unwrap(), &[0.0, 1.0]);
    }

    #[test]
    fn test_filters_are_cumulative() {
        let mut config = ProcessingConfig::default();
        config.filters = vec![
            RangeFilter::new("GR", 0.0, 100.0),
            RangeFilter::new("DT", 0.0, 85.0),
        ];
        let prepared = prepare_frame(&frame(), &config).unwrap();
        // GR keeps 1000, 1001, 1003; DT then keeps 1000 and 1001
        assert_eq!(prepared.frame.depth(), &[1000.0, 1001.0]);
    }

    #[test]
    fn test_unknown_selected_curve() {
        let mut config = ProcessingConfig::default();
        config.select.push("NPHI".to_string());
        let err = prepare_frame(&frame(), &config).unwrap_err();
        assert!(matches!(err, PipelineError::Frame(FrameError::UnknownCurve(ref c)) if c == "NPHI"));
    }

    #[test]
    fn test_everything_filtered_out() {
        let mut config = ProcessingConfig::default();
        config.filters = vec![RangeFilter::new("GR", 500.0, 600.0)];
        let err = prepare_frame(&frame(), &config).unwrap_err();
        assert_eq!(err.to_string(), "No rows left after range filtering");
    }
}
