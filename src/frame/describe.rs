//! Summary statistics per curve (count, mean, std, quartiles, extremes).

use super::LogFrame;
use serde::Serialize;
use statrs::statistics::{Data, OrderStatistics, Statistics};
use std::fmt;

/// Statistics for one curve, computed over present (non-NaN) samples.
#[derive(Debug, Clone, Serialize)]
pub struct CurveStats {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1)
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl CurveStats {
    pub fn from_values(name: &str, values: &[f64]) -> Self {
        let present: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        if present.is_empty() {
            return Self {
                name: name.to_string(),
                count: 0,
                mean: f64::NAN,
                std: f64::NAN,
                min: f64::NAN,
                q25: f64::NAN,
                median: f64::NAN,
                q75: f64::NAN,
                max: f64::NAN,
            };
        }

        let mean = present.iter().mean();
        let std = if present.len() > 1 {
            present.iter().std_dev()
        } else {
            f64::NAN
        };
        let min = Statistics::min(present.iter());
        let max = Statistics::max(present.iter());

        let count = present.len();
        let mut data = Data::new(present);
        Self {
            name: name.to_string(),
            count,
            mean,
            std,
            min,
            q25: data.quantile(0.25),
            median: data.quantile(0.5),
            q75: data.quantile(0.75),
            max,
        }
    }
}

/// Describe table for a whole frame.
#[derive(Debug, Clone, Serialize)]
pub struct Describe {
    pub curves: Vec<CurveStats>,
}

impl Describe {
    pub fn from_frame(frame: &LogFrame) -> Self {
        Self {
            curves: frame
                .columns()
                .iter()
                .map(|c| CurveStats::from_values(&c.name, &c.values))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&CurveStats> {
        self.curves.iter().find(|s| s.name == name)
    }
}

impl fmt::Display for Describe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>8}", "")?;
        for s in &self.curves {
            write!(f, " {:>12}", s.name)?;
        }
        writeln!(f)?;

        let rows: [(&str, fn(&CurveStats) -> f64); 8] = [
            ("count", |s| s.count as f64),
            ("mean", |s| s.mean),
            ("std", |s| s.std),
            ("min", |s| s.min),
            ("25%", |s| s.q25),
            ("50%", |s| s.median),
            ("75%", |s| s.q75),
            ("max", |s| s.max),
        ];
        for (label, get) in rows {
            write!(f, "{label:>8}")?;
            for s in &self.curves {
                write!(f, " {:>12.4}", get(s))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_skip_missing_samples() {
        let stats = CurveStats::from_values("GR", &[1.0, f64::NAN, 3.0, 5.0]);
        assert_eq!(stats.count, 3);
        assert!((stats.mean - 3.0).abs() < 1e-12);
        assert!((stats.std - 2.0).abs() < 1e-12);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
        assert!((stats.median - 3.0).abs() < 1e-12);
        assert!(stats.q25 >= stats.min && stats.q25 <= stats.median);
        assert!(stats.q75 >= stats.median && stats.q75 <= stats.max);
    }

    #[test]
    fn test_all_missing_curve() {
        let stats = CurveStats::from_values("X", &[f64::NAN, f64::NAN]);
        assert_eq!(stats.count, 0);
        assert!(stats.mean.is_nan());
        assert!(stats.max.is_nan());
    }

    #[test]
    fn test_single_sample_has_undefined_std() {
        let stats = CurveStats::from_values("X", &[7.0]);
        assert_eq!(stats.count, 1);
        assert_eq!(stats.mean, 7.0);
        assert!(stats.std.is_nan());
    }

    #[test]
    fn test_describe_table_layout() {
        let frame = LogFrame::new("DEPT", vec![1.0, 2.0])
            .with_column("GR", vec![10.0, 20.0])
            .unwrap();
        let describe = frame.describe();
        assert!(describe.get("GR").is_some());
        let text = describe.to_string();
        for label in ["count", "mean", "std", "min", "25%", "50%", "75%", "max"] {
            assert!(text.contains(label), "missing row {label}");
        }
    }

    #[test]
    fn test_describe_serializes_nan_as_null() {
        let stats = CurveStats::from_values("X", &[f64::NAN]);
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"mean\":null"));
    }
}
