//! Petrophysical derived curves.

use crate::frame::finite_range;
use tracing::warn;

/// Linear gamma-ray index: `(gr - gr_min) / (gr_max - gr_min)`.
pub fn gamma_ray_index(gr: f64, gr_min: f64, gr_max: f64) -> f64 {
    (gr - gr_min) / (gr_max - gr_min)
}

/// Shale volume from gamma ray using the linear index, with the clean and
/// shale end points taken from the curve's own min and max.
///
/// Missing samples stay missing. A curve with zero span (or no present
/// samples) yields an all-missing result.
pub fn shale_volume(gamma_ray: &[f64]) -> Vec<f64> {
    let Some((gr_min, gr_max)) = finite_range(gamma_ray) else {
        warn!("Gamma ray curve has no samples, shale volume is undefined");
        return vec![f64::NAN; gamma_ray.len()];
    };
    if gr_max - gr_min <= f64::EPSILON {
        warn!(gr = gr_min, "Gamma ray curve is constant, shale volume is undefined");
        return vec![f64::NAN; gamma_ray.len()];
    }
    gamma_ray
        .iter()
        .map(|&gr| gamma_ray_index(gr, gr_min, gr_max))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shale_volume_spans_zero_to_one() {
        let vsh = shale_volume(&[20.0, 70.0, 120.0]);
        assert_eq!(vsh, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_shale_volume_keeps_missing_samples() {
        let vsh = shale_volume(&[20.0, f64::NAN, 120.0]);
        assert_eq!(vsh[0], 0.0);
        assert!(vsh[1].is_nan());
        assert_eq!(vsh[2], 1.0);
    }

    #[test]
    fn test_constant_gamma_ray_is_undefined() {
        let vsh = shale_volume(&[50.0, 50.0]);
        assert!(vsh.iter().all(|v| v.is_nan()));
        assert!(shale_volume(&[]).is_empty());
    }

    #[test]
    fn test_gamma_ray_index() {
        assert!((gamma_ray_index(45.0, 30.0, 130.0) - 0.15).abs() < 1e-12);
    }
}
