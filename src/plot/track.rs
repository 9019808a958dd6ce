//! Figure description: tracks, traces and axis limits.
//!
//! Everything here is plain data so layouts can be checked without a
//! drawing backend.

use super::color::parse_color;
use super::{LayoutKind, RenderError};
use crate::config::{FractionConfig, PlotConfig, TrackConfig};
use crate::fraction::{FractionSet, Point};
use crate::frame::{finite_range, FrameError, LogFrame};
use plotters::style::RGBColor;
use tracing::debug;

/// One curve as (value, depth) points in frame order.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveTrace {
    pub name: String,
    pub color: RGBColor,
    pub points: Vec<Point>,
}

impl CurveTrace {
    pub fn from_frame(frame: &LogFrame, name: &str, color: RGBColor) -> Result<Self, FrameError> {
        let values = frame.require(name)?;
        Ok(Self {
            name: name.to_string(),
            color,
            points: values.iter().copied().zip(frame.depth().iter().copied()).collect(),
        })
    }

    /// (min, max) of the present values.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let values: Vec<f64> = self.points.iter().map(|p| p.0).collect();
        finite_range(&values)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum XRange {
    /// min..max over everything drawn in the track
    Auto,
    Fixed(f64, f64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrackKind {
    Curves(Vec<CurveTrace>),
    Fraction(FractionSet),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub label: String,
    pub kind: TrackKind,
    pub x_range: XRange,
    pub legend: bool,
}

impl Track {
    pub fn curves(label: impl Into<String>, traces: Vec<CurveTrace>) -> Self {
        Self {
            label: label.into(),
            kind: TrackKind::Curves(traces),
            x_range: XRange::Auto,
            legend: false,
        }
    }

    /// Fraction track on a fixed 0..1 axis with a component legend.
    pub fn fraction(label: impl Into<String>, set: FractionSet) -> Self {
        Self {
            label: label.into(),
            kind: TrackKind::Fraction(set),
            x_range: XRange::Fixed(0.0, 1.0),
            legend: true,
        }
    }

    pub fn with_x_range(mut self, x_range: XRange) -> Self {
        self.x_range = x_range;
        self
    }

    /// Resolved x-axis limits.
    pub fn x_limits(&self) -> (f64, f64) {
        if let XRange::Fixed(lo, hi) = self.x_range {
            return (lo, hi);
        }
        let range = match &self.kind {
            TrackKind::Curves(traces) => traces
                .iter()
                .filter_map(CurveTrace::value_range)
                .reduce(|a, b| (a.0.min(b.0), a.1.max(b.1))),
            TrackKind::Fraction(set) => {
                let edges: Vec<f64> = set
                    .cumulative_bands()
                    .iter()
                    .flatten()
                    .map(|p| p.0)
                    .chain(std::iter::once(0.0))
                    .collect();
                finite_range(&edges)
            }
        };
        match range {
            Some((lo, hi)) => padded_range(lo, hi),
            None => (0.0, 1.0),
        }
    }
}

/// Widen a zero-width range so the axis stays drawable.
pub fn padded_range(lo: f64, hi: f64) -> (f64, f64) {
    if hi - lo > f64::EPSILON * lo.abs().max(1.0) {
        return (lo, hi);
    }
    let pad = if lo == 0.0 { 0.5 } else { lo.abs() * 0.05 };
    (lo - pad, hi + pad)
}

/// Split a polyline at missing points; each run of present points becomes
/// its own segment. Single isolated points are kept as one-point segments.
pub fn curve_segments(points: &[Point]) -> Vec<Vec<Point>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    for &(x, y) in points {
        if x.is_nan() || y.is_nan() {
            if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
        } else {
            current.push((x, y));
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

// ============================================================================
// Layout
// ============================================================================

/// A complete figure ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct LogLayout {
    pub kind: LayoutKind,
    pub title: String,
    pub depth_label: String,
    pub width: u32,
    pub height: u32,
    pub title_font_px: u32,
    pub label_font_px: u32,
    /// (top, base) shared by every track; top is drawn at the top edge.
    pub depth_span: (f64, f64),
    pub tracks: Vec<Track>,
}

impl LogLayout {
    /// Build `kind` from prepared logs. The fraction panel only uses the
    /// frame's depth interval.
    pub fn from_frame(
        kind: LayoutKind,
        frame: &LogFrame,
        config: &PlotConfig,
        well_name: Option<&str>,
    ) -> Result<Self, RenderError> {
        let (top, base) = frame.depth_range().ok_or(RenderError::EmptyDepthRange)?;
        if kind == LayoutKind::FractionPanel {
            return Self::fraction_panel(config, top, base);
        }

        let fig = &config.figure;
        let mut tracks = fig
            .tracks
            .iter()
            .map(|tc| curve_track(frame, tc))
            .collect::<Result<Vec<_>, _>>()?;
        let mut depth_span = (top, base);
        let mut width = fig.width;

        match kind {
            LayoutKind::Overlay => tracks.push(curve_track(frame, &fig.overlay)?),
            LayoutKind::Combo => {
                let set = fraction_set(&config.fraction, top, base)?;
                if let Some((ft, fb)) = set.depth_span() {
                    depth_span = (top.min(ft), base.max(fb));
                }
                tracks.push(Track::fraction(config.fraction.label.clone(), set));
                width = fig.combo_width;
            }
            LayoutKind::Logs | LayoutKind::FractionPanel => {}
        }

        let layout = Self {
            kind,
            title: config.title_for(well_name),
            depth_label: config.well.depth_label.clone(),
            width,
            height: fig.height,
            title_font_px: fig.title_font_px,
            label_font_px: fig.label_font_px,
            depth_span: padded_range(depth_span.0, depth_span.1),
            tracks,
        };
        debug!(layout = %kind, tracks = layout.tracks.len(), "Built layout");
        Ok(layout)
    }

    /// Standalone fraction panel over `top..base` (ignored when the config
    /// carries explicit sample depths).
    pub fn fraction_panel(config: &PlotConfig, top: f64, base: f64) -> Result<Self, RenderError> {
        let set = fraction_set(&config.fraction, top, base)?;
        let (top, base) = set.depth_span().ok_or(RenderError::EmptyDepthRange)?;
        Ok(Self {
            kind: LayoutKind::FractionPanel,
            title: config.fraction.panel_title.clone(),
            depth_label: config.well.depth_label.clone(),
            width: config.figure.panel_width,
            height: config.figure.height,
            title_font_px: config.figure.title_font_px,
            label_font_px: config.figure.label_font_px,
            depth_span: padded_range(top, base),
            tracks: vec![Track::fraction(config.fraction.label.clone(), set)],
        })
    }
}

fn curve_track(frame: &LogFrame, tc: &TrackConfig) -> Result<Track, RenderError> {
    let traces = tc
        .curves
        .iter()
        .map(|c| -> Result<CurveTrace, RenderError> {
            let color = parse_color(&c.color).ok_or_else(|| RenderError::UnknownColor {
                curve: c.name.clone(),
                color: c.color.clone(),
            })?;
            Ok(CurveTrace::from_frame(frame, &c.name, color)?)
        })
        .collect::<Result<Vec<_>, _>>()?;
    let track = Track::curves(tc.label(), traces);
    Ok(match tc.range {
        Some([lo, hi]) => track.with_x_range(XRange::Fixed(lo, hi)),
        None => track,
    })
}

fn fraction_set(config: &FractionConfig, top: f64, base: f64) -> Result<FractionSet, RenderError> {
    let components = config.components.clone();
    let set = match &config.depths {
        Some(depths) => FractionSet::with_depths(components, depths.clone())?,
        None => FractionSet::evenly_spaced(components, top, base)?,
    };
    Ok(set)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const NAN: f64 = f64::NAN;

    fn frame() -> LogFrame {
        LogFrame::new("DEPT", vec![1000.0, 1000.5, 1001.0, 1001.5])
            .with_column("GR", vec![40.0, 80.0, NAN, 120.0])
            .unwrap()
            .with_column("CNPOR", vec![10.0, 12.0, 14.0, 16.0])
            .unwrap()
            .with_column("DT", vec![60.0, 70.0, 80.0, 90.0])
            .unwrap()
            .with_column("MELCAL", vec![8.0, 8.5, 9.0, 9.5])
            .unwrap()
            .with_column("RHOB", vec![2.2, 2.4, 2.6, 2.65])
            .unwrap()
            .with_column("Vsh", vec![0.0, 0.5, NAN, 1.0])
            .unwrap()
    }

    #[test]
    fn test_curve_segments_break_at_missing() {
        let segments = curve_segments(&[
            (1.0, 10.0),
            (2.0, 11.0),
            (NAN, 12.0),
            (3.0, 13.0),
            (NAN, 14.0),
            (NAN, 15.0),
        ]);
        assert_eq!(segments, vec![vec![(1.0, 10.0), (2.0, 11.0)], vec![(3.0, 13.0)]]);
        assert!(curve_segments(&[(NAN, 1.0)]).is_empty());
    }

    #[test]
    fn test_padded_range() {
        assert_eq!(padded_range(1.0, 3.0), (1.0, 3.0));
        assert_eq!(padded_range(0.0, 0.0), (-0.5, 0.5));
        let (lo, hi) = padded_range(100.0, 100.0);
        assert!((lo - 95.0).abs() < 1e-9 && (hi - 105.0).abs() < 1e-9);
    }

    #[test]
    fn test_logs_layout() {
        let layout =
            LogLayout::from_frame(LayoutKind::Logs, &frame(), &PlotConfig::default(), Some("W-1"))
                .unwrap();
        let labels: Vec<&str> = layout.tracks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["GR", "CNPOR", "DT", "MELCAL", "RHOB", "Vsh"]);
        assert_eq!(layout.title, "Well: W-1");
        assert_eq!(layout.depth_span, (1000.0, 1001.5));
        assert_eq!(layout.width, 1200);
        assert_eq!(layout.tracks[0].x_limits(), (40.0, 120.0));
    }

    #[test]
    fn test_overlay_track_spans_both_curves() {
        let layout =
            LogLayout::from_frame(LayoutKind::Overlay, &frame(), &PlotConfig::default(), None)
                .unwrap();
        assert_eq!(layout.tracks.len(), 7);
        let overlay = &layout.tracks[6];
        assert_eq!(overlay.label, "RHOB, MELCAL");
        assert_eq!(overlay.x_limits(), (2.2, 9.5));
        match &overlay.kind {
            TrackKind::Curves(traces) => {
                assert_eq!(traces[0].name, "MELCAL");
                assert_eq!(traces[1].color, RGBColor(0, 191, 191));
            }
            other => panic!("expected curves, got {other:?}"),
        }
    }

    #[test]
    fn test_combo_appends_fraction_track() {
        let layout =
            LogLayout::from_frame(LayoutKind::Combo, &frame(), &PlotConfig::default(), None)
                .unwrap();
        assert_eq!(layout.tracks.len(), 7);
        assert_eq!(layout.width, 1400);
        let fraction = &layout.tracks[6];
        assert_eq!(fraction.label, "Fraction 4");
        assert_eq!(fraction.x_limits(), (0.0, 1.0));
        assert!(fraction.legend);
        match &fraction.kind {
            TrackKind::Fraction(set) => assert_eq!(set.depth_span(), Some((1000.0, 1001.5))),
            other => panic!("expected fraction, got {other:?}"),
        }
    }

    #[test]
    fn test_fraction_panel() {
        let layout = LogLayout::fraction_panel(&PlotConfig::default(), 2000.0, 2400.0).unwrap();
        assert_eq!(layout.title, "Fraction Panel");
        assert_eq!(layout.tracks.len(), 1);
        assert_eq!(layout.depth_span, (2000.0, 2400.0));
        assert_eq!(layout.width, 640);
    }

    #[test]
    fn test_missing_curve_is_reported() {
        let mut config = PlotConfig::default();
        config.figure.tracks[0].curves[0].name = "ILD".to_string();
        let err = LogLayout::from_frame(LayoutKind::Logs, &frame(), &config, None).unwrap_err();
        assert!(matches!(err, RenderError::Frame(FrameError::UnknownCurve(ref c)) if c == "ILD"));
    }

    #[test]
    fn test_fixed_range_overrides_auto() {
        let mut config = PlotConfig::default();
        config.figure.tracks[0].range = Some([0.0, 150.0]);
        let layout = LogLayout::from_frame(LayoutKind::Logs, &frame(), &config, None).unwrap();
        assert_eq!(layout.tracks[0].x_limits(), (0.0, 150.0));
    }

    #[test]
    fn test_empty_frame_has_no_depth_range() {
        let empty = LogFrame::new("DEPT", vec![]);
        let err =
            LogLayout::from_frame(LayoutKind::Logs, &empty, &PlotConfig::default(), None).unwrap_err();
        assert!(matches!(err, RenderError::EmptyDepthRange));
    }
}
