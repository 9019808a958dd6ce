//! Depth-indexed curve table
//!
//! `LogFrame` holds a depth index plus named curve columns of equal length.
//! Missing samples are stored as NaN. All row operations (selection, null
//! dropping, range filtering, sorting) return a new frame so each processing
//! stage can be inspected on its own.

mod describe;

pub use describe::{CurveStats, Describe};

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum FrameError {
    #[error("Unknown curve: {0}")]
    UnknownCurve(String),

    #[error("Curve {0} has no data column")]
    MissingData(String),

    #[error("Curve {name} has {got} samples, expected {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
}

/// One named curve column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

/// Depth-indexed table of log curves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogFrame {
    depth_name: String,
    depth: Vec<f64>,
    columns: Vec<Column>,
}

impl LogFrame {
    pub fn new(depth_name: &str, depth: Vec<f64>) -> Self {
        Self {
            depth_name: depth_name.to_string(),
            depth,
            columns: Vec::new(),
        }
    }

    /// Builder-style column insertion.
    pub fn with_column(mut self, name: &str, values: Vec<f64>) -> Result<Self, FrameError> {
        self.insert_column(name, values)?;
        Ok(self)
    }

    /// Append a column, or replace an existing one with the same name.
    pub fn insert_column(&mut self, name: &str, values: Vec<f64>) -> Result<(), FrameError> {
        if values.len() != self.depth.len() {
            return Err(FrameError::LengthMismatch {
                name: name.to_string(),
                expected: self.depth.len(),
                got: values.len(),
            });
        }
        match self.columns.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.values = values,
            None => self.columns.push(Column {
                name: name.to_string(),
                values,
            }),
        }
        Ok(())
    }

    pub fn depth_name(&self) -> &str {
        &self.depth_name
    }

    pub fn depth(&self) -> &[f64] {
        &self.depth
    }

    pub fn len(&self) -> usize {
        self.depth.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depth.is_empty()
    }

    /// (rows, curve columns), the depth index not counted.
    pub fn shape(&self) -> (usize, usize) {
        (self.depth.len(), self.columns.len())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Like [`column`](Self::column) but unknown names are an error.
    pub fn require(&self, name: &str) -> Result<&[f64], FrameError> {
        self.column(name)
            .ok_or_else(|| FrameError::UnknownCurve(name.to_string()))
    }

    /// New frame containing only `names`, in the given order.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Self, FrameError> {
        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            let values = self.require(name)?;
            columns.push(Column {
                name: name.to_string(),
                values: values.to_vec(),
            });
        }
        Ok(Self {
            depth_name: self.depth_name.clone(),
            depth: self.depth.clone(),
            columns,
        })
    }

    /// Missing-sample count per curve.
    pub fn null_counts(&self) -> Vec<(String, usize)> {
        self.columns
            .iter()
            .map(|c| (c.name.clone(), c.values.iter().filter(|v| v.is_nan()).count()))
            .collect()
    }

    /// Drop every row where any curve in `subset` is missing.
    pub fn drop_nulls<S: AsRef<str>>(&self, subset: &[S]) -> Result<Self, FrameError> {
        let checked: Vec<&[f64]> = subset
            .iter()
            .map(|name| self.require(name.as_ref()))
            .collect::<Result<_, _>>()?;
        let mask: Vec<bool> = (0..self.len())
            .map(|row| checked.iter().all(|values| !values[row].is_nan()))
            .collect();
        Ok(self.retain_rows(&mask))
    }

    /// Keep rows where `min < value <= max`. Missing values never pass.
    pub fn filter_range(&self, curve: &str, min: f64, max: f64) -> Result<Self, FrameError> {
        let values = self.require(curve)?;
        let mask: Vec<bool> = values.iter().map(|&v| v > min && v <= max).collect();
        Ok(self.retain_rows(&mask))
    }

    fn retain_rows(&self, mask: &[bool]) -> Self {
        let keep = |values: &[f64]| -> Vec<f64> {
            values
                .iter()
                .zip(mask)
                .filter_map(|(&v, &k)| k.then_some(v))
                .collect()
        };
        Self {
            depth_name: self.depth_name.clone(),
            depth: keep(&self.depth),
            columns: self
                .columns
                .iter()
                .map(|c| Column {
                    name: c.name.clone(),
                    values: keep(&c.values),
                })
                .collect(),
        }
    }

    fn take_rows(&self, rows: &[usize]) -> Self {
        let take = |values: &[f64]| -> Vec<f64> { rows.iter().map(|&r| values[r]).collect() };
        Self {
            depth_name: self.depth_name.clone(),
            depth: take(&self.depth),
            columns: self
                .columns
                .iter()
                .map(|c| Column {
                    name: c.name.clone(),
                    values: take(&c.values),
                })
                .collect(),
        }
    }

    /// Stable sort by increasing depth; missing depths sort last.
    pub fn sort_by_depth(&self) -> Self {
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.sort_by(|&a, &b| {
            let (da, db) = (self.depth[a], self.depth[b]);
            match (da.is_nan(), db.is_nan()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => da.partial_cmp(&db).unwrap_or(Ordering::Equal),
            }
        });
        self.take_rows(&order)
    }

    pub fn head(&self, n: usize) -> Self {
        let rows: Vec<usize> = (0..self.len().min(n)).collect();
        self.take_rows(&rows)
    }

    pub fn tail(&self, n: usize) -> Self {
        let start = self.len().saturating_sub(n);
        let rows: Vec<usize> = (start..self.len()).collect();
        self.take_rows(&rows)
    }

    /// (shallowest, deepest) of the depth index, ignoring missing depths.
    pub fn depth_range(&self) -> Option<(f64, f64)> {
        finite_range(&self.depth)
    }

    /// (min, max) of a curve, ignoring missing samples. `Ok(None)` when the
    /// curve has no present samples.
    pub fn column_range(&self, name: &str) -> Result<Option<(f64, f64)>, FrameError> {
        Ok(finite_range(self.require(name)?))
    }

    /// Per-curve summary statistics.
    pub fn describe(&self) -> Describe {
        Describe::from_frame(self)
    }
}

/// (min, max) over non-NaN values.
pub fn finite_range(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

impl fmt::Display for LogFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>10}", self.depth_name)?;
        for c in &self.columns {
            write!(f, " {:>10}", c.name)?;
        }
        writeln!(f)?;
        for row in 0..self.len() {
            write!(f, "{:>10.4}", self.depth[row])?;
            for c in &self.columns {
                let v = c.values[row];
                if v.is_nan() {
                    write!(f, " {:>10}", "NaN")?;
                } else {
                    write!(f, " {:>10.4}", v)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
