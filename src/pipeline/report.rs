//! Text and JSON inspection report for the `inspect` command.

use super::{FilterStage, PreparedLogs};
use crate::config::defaults::PREVIEW_ROWS;
use crate::frame::{Describe, LogFrame};
use crate::las::{CurveInfo, LasFile};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Serialize)]
pub struct InspectionReport {
    pub well: Option<String>,
    pub version: f64,
    pub wrapped: bool,
    pub null_value: f64,
    pub curves: Vec<CurveInfo>,
    pub head: LogFrame,
    pub tail: LogFrame,
    pub shape: (usize, usize),
    pub selected_nulls: Vec<(String, usize)>,
    pub rows_after_drop: usize,
    pub statistics: Describe,
    pub filter_stages: Vec<FilterStage>,
    pub final_rows: usize,
    pub depth_range: Option<(f64, f64)>,
    /// Previews of the depth-sorted logs, derived curves included.
    pub final_head: LogFrame,
    pub final_tail: LogFrame,
}

impl InspectionReport {
    pub fn new(las: &LasFile, loaded: &LogFrame, prepared: &PreparedLogs) -> Self {
        Self {
            well: las.well_name().map(str::to_string),
            version: las.version_number(),
            wrapped: las.is_wrapped(),
            null_value: las.null_value(),
            curves: las.curves.clone(),
            head: loaded.head(PREVIEW_ROWS),
            tail: loaded.tail(PREVIEW_ROWS),
            shape: prepared.loaded_shape,
            selected_nulls: prepared.selected_nulls.clone(),
            rows_after_drop: prepared.rows_after_drop,
            statistics: prepared.statistics.clone(),
            filter_stages: prepared.filter_stages.clone(),
            final_rows: prepared.rows(),
            depth_range: prepared.frame.depth_range(),
            final_head: prepared.frame.head(PREVIEW_ROWS),
            final_tail: prepared.frame.tail(PREVIEW_ROWS),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn heading(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{title}")?;
    writeln!(f, "{}", "=".repeat(title.len()))
}

impl fmt::Display for InspectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Well: {}  (LAS {:.1}, wrap {}, null {})",
            self.well.as_deref().unwrap_or("UNKNOWN"),
            self.version,
            if self.wrapped { "YES" } else { "NO" },
            self.null_value
        )?;

        heading(f, "Curves")?;
        for c in &self.curves {
            writeln!(f, "{:<10} {:<8} {}", c.mnemonic, c.unit, c.description)?;
        }

        heading(f, "Head")?;
        write!(f, "{}", self.head)?;
        heading(f, "Tail")?;
        write!(f, "{}", self.tail)?;

        heading(f, "Shape")?;
        writeln!(f, "{} rows x {} curves", self.shape.0, self.shape.1)?;

        heading(f, "Missing values")?;
        for (curve, missing) in &self.selected_nulls {
            writeln!(f, "{curve:<10} {missing}")?;
        }
        writeln!(f, "rows with all required curves: {}", self.rows_after_drop)?;

        heading(f, "Statistics")?;
        write!(f, "{}", self.statistics)?;

        heading(f, "Range filtering")?;
        for s in &self.filter_stages {
            writeln!(
                f,
                "{:<10} {} < v <= {}  {} -> {} rows",
                s.filter.curve, s.filter.min, s.filter.max, s.rows_before, s.rows_after
            )?;
        }

        heading(f, "Result")?;
        write!(f, "{} rows", self.final_rows)?;
        if let Some((top, base)) = self.depth_range {
            write!(f, ", depth {top} - {base}")?;
        }
        writeln!(f)?;
        writeln!(f)?;
        write!(f, "{}", self.final_head)?;
        writeln!(f, "...")?;
        write!(f, "{}", self.final_tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProcessingConfig;
    use crate::pipeline::prepare_frame;

    const LAS: &str = "\
~V
 VERS.   2.0 : CWLS LOG ASCII STANDARD
 WRAP.   NO  : ONE LINE PER DEPTH STEP
~W
 NULL.   -999.25 : NULL VALUE
 WELL.   TEST #2 : WELL
~C
 DEPT.FT      : DEPTH
 CNPOR.%      : NEUTRON POROSITY
 GR.GAPI      : GAMMA RAY
 RHOB.G/C3    : BULK DENSITY
 DT.US/F      : SONIC
 MELCAL.IN    : CALIPER
 SPOR.%       : SONIC POROSITY
~A
 1000.0  20.0  40.0  2.40  80.0  8.5  15.0
 1000.5  21.0  60.0  2.45  85.0  8.6  16.0
 1001.0  22.0 -999.25 2.50 90.0  8.7  17.0
 1001.5  23.0  80.0  2.55  95.0  8.8  18.0
";

    fn report() -> InspectionReport {
        let las = LasFile::parse(LAS).unwrap();
        let loaded = las.to_frame().unwrap();
        let prepared = prepare_frame(&loaded, &ProcessingConfig::default()).unwrap();
        InspectionReport::new(&las, &loaded, &prepared)
    }

    #[test]
    fn test_report_text_sections() {
        let text = report().to_string();
        assert!(text.starts_with("Well: TEST #2"));
        for section in ["Curves", "Head", "Tail", "Shape", "Missing values", "Statistics"] {
            assert!(text.contains(section), "missing section {section}");
        }
        assert!(text.contains("4 rows x 6 curves"));
        assert!(text.contains("3 rows, depth 1000 - 1001.5"));
    }

    #[test]
    fn test_report_json_uses_null_for_missing() {
        let report = report();
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["well"], "TEST #2");
        assert_eq!(json["final_rows"], 3);
        assert_eq!(json["curves"][2]["mnemonic"], "GR");
        // GR column of the head preview, third row is the null sample
        assert!(json["head"]["columns"][1]["values"][2].is_null());
    }

    #[test]
    fn test_result_previews_show_shale_volume() {
        let report = report();
        let names: Vec<&str> = report
            .final_head
            .columns()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names.last(), Some(&"Vsh"));
        assert_eq!(report.final_head.shape(), (3, 7));
        assert_eq!(report.final_tail.depth().last(), Some(&1001.5));

        let text = report.to_string();
        let result = text.split("Result").nth(1).unwrap();
        assert!(result.contains("Vsh"));
    }
}
