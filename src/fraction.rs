//! Fraction track geometry
//!
//! A fraction track stacks several component series horizontally: at each
//! depth the k-th boundary is the running sum of the first k components.
//! Each component is then filled as a closed polygon between boundary k-1
//! and boundary k (the first component is bounded by the zero line).
//!
//! ```text
//!   value: 0 ─────────────── 1
//!   depth  |water|shale| sand |carb|
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// (value, depth) vertex.
pub type Point = (f64, f64);

#[derive(Debug, Error, PartialEq)]
pub enum FractionError {
    #[error("Fraction set has no components")]
    NoComponents,

    #[error("Component {name} has {got} samples, expected {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("Component {name} has a non-finite value at sample {index}")]
    NonFiniteValue { name: String, index: usize },

    #[error("Fraction depths must be finite and non-decreasing (sample {0})")]
    InvalidDepths(usize),
}

/// One component series, e.g. water or shale fraction at each sample depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FractionComponent {
    pub name: String,
    pub color: String,
    pub values: Vec<f64>,
}

impl FractionComponent {
    pub fn new(name: &str, color: &str, values: Vec<f64>) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
            values,
        }
    }
}

/// Evenly spaced samples over `[start, stop]`, endpoints included.
///
/// `n == 1` yields `[start]`; `n == 0` yields an empty vector.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { stop } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Components sharing one depth column, validated on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct FractionSet {
    components: Vec<FractionComponent>,
    depths: Vec<f64>,
}

impl FractionSet {
    /// Components sampled at explicit depths.
    pub fn with_depths(
        components: Vec<FractionComponent>,
        depths: Vec<f64>,
    ) -> Result<Self, FractionError> {
        if components.is_empty() {
            return Err(FractionError::NoComponents);
        }
        for (i, d) in depths.iter().enumerate() {
            if !d.is_finite() || (i > 0 && *d < depths[i - 1]) {
                return Err(FractionError::InvalidDepths(i));
            }
        }
        for c in &components {
            if c.values.len() != depths.len() {
                return Err(FractionError::LengthMismatch {
                    name: c.name.clone(),
                    expected: depths.len(),
                    got: c.values.len(),
                });
            }
            if let Some(index) = c.values.iter().position(|v| !v.is_finite()) {
                return Err(FractionError::NonFiniteValue {
                    name: c.name.clone(),
                    index,
                });
            }
            if c.values.iter().any(|v| *v < 0.0) {
                warn!(component = %c.name, "Negative fraction values will make bands overlap");
            }
        }

        let set = Self { components, depths };
        if let Some(total) = set.row_totals().into_iter().find(|t| *t > 1.0 + 1e-9) {
            warn!(total, "Fraction row total exceeds 1.0 and will overflow a 0..1 track");
        }
        Ok(set)
    }

    /// Components spread evenly between `top` and `base`, one depth per
    /// sample of the first component.
    pub fn evenly_spaced(
        components: Vec<FractionComponent>,
        top: f64,
        base: f64,
    ) -> Result<Self, FractionError> {
        let samples = components
            .first()
            .ok_or(FractionError::NoComponents)?
            .values
            .len();
        Self::with_depths(components, linspace(top, base, samples))
    }

    pub fn components(&self) -> &[FractionComponent] {
        &self.components
    }

    pub fn depths(&self) -> &[f64] {
        &self.depths
    }

    /// (shallowest, deepest) sample depth.
    pub fn depth_span(&self) -> Option<(f64, f64)> {
        Some((*self.depths.first()?, *self.depths.last()?))
    }

    /// Sum of all components at each sample.
    pub fn row_totals(&self) -> Vec<f64> {
        (0..self.depths.len())
            .map(|i| self.components.iter().map(|c| c.values[i]).sum())
            .collect()
    }

    /// Cumulative boundaries: band k holds `(Σ_{j<=k} values_j[i], depth_i)`.
    pub fn cumulative_bands(&self) -> Vec<Vec<Point>> {
        let mut running = vec![0.0; self.depths.len()];
        self.components
            .iter()
            .map(|c| {
                running
                    .iter_mut()
                    .zip(&c.values)
                    .zip(&self.depths)
                    .map(|((acc, v), d)| {
                        *acc += v;
                        (*acc, *d)
                    })
                    .collect()
            })
            .collect()
    }

    /// One polygon per component, in component order.
    ///
    /// The first polygon starts on the zero line at the deepest then the
    /// shallowest sample and follows band 1 down; later polygons follow band
    /// k-1 down and band k back up. The closing edge is implicit.
    pub fn polygons(&self) -> Vec<Vec<Point>> {
        let bands = self.cumulative_bands();
        let Some((top, base)) = self.depth_span() else {
            return vec![Vec::new(); bands.len()];
        };

        let mut polygons = Vec::with_capacity(bands.len());
        for (k, band) in bands.iter().enumerate() {
            let mut polygon = Vec::with_capacity(band.len() * 2 + 2);
            if k == 0 {
                polygon.push((0.0, base));
                polygon.push((0.0, top));
                polygon.extend(band.iter().copied());
            } else {
                polygon.extend(bands[k - 1].iter().copied());
                polygon.extend(band.iter().rev().copied());
            }
            polygons.push(polygon);
        }
        polygons
    }
}

/// The four-component demonstration set: water, shale, sand and carbonate
/// fractions at five samples, each row summing to 1 within rounding.
pub fn demo_components() -> Vec<FractionComponent> {
    vec![
        FractionComponent::new("Water", "blue", vec![0.292, 0.333, 0.200, 0.458, 0.292]),
        FractionComponent::new("Shale", "red", vec![0.083, 0.125, 0.167, 0.125, 0.083]),
        FractionComponent::new("Sand", "yellow", vec![0.292, 0.333, 0.292, 0.083, 0.083]),
        FractionComponent::new("Carbonate", "green", vec![0.333, 0.208, 0.341, 0.333, 0.542]),
    ]
}

// ============================================================================
// Tests
// ============================================================================
