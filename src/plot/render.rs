//! Drawing layouts with plotters.
//!
//! Depth is plotted negated so the shallowest sample sits at the top of
//! every track; tick labels flip the sign back.

use super::color::parse_color;
use super::track::{curve_segments, LogLayout, Track, TrackKind};
use super::{OutputFormat, RenderError};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use tracing::info;

fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

fn font(px: u32) -> FontDesc<'static> {
    FontDesc::new(FontFamily::SansSerif, f64::from(px), FontStyle::Normal)
}

/// Draw a whole figure onto `root`: super-title, then the tracks side by
/// side at equal widths.
pub fn draw_layout<DB>(root: &DrawingArea<DB, Shift>, layout: &LogLayout) -> Result<(), RenderError>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    if layout.tracks.is_empty() {
        return Err(RenderError::NoTracks);
    }

    root.fill(&WHITE).map_err(draw_err)?;
    let body = root
        .titled(&layout.title, font(layout.title_font_px))
        .map_err(draw_err)?;
    let areas = body.split_evenly((1, layout.tracks.len()));
    for (i, (area, track)) in areas.iter().zip(&layout.tracks).enumerate() {
        draw_track(area, track, layout, i == 0)?;
    }
    root.present().map_err(draw_err)?;
    Ok(())
}

fn draw_track<DB>(
    area: &DrawingArea<DB, Shift>,
    track: &Track,
    layout: &LogLayout,
    first: bool,
) -> Result<(), RenderError>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let (top, base) = layout.depth_span;
    let (x0, x1) = track.x_limits();

    // Only the first track carries depth ticks and the depth label.
    let mut chart = ChartBuilder::on(area)
        .margin(6)
        .x_label_area_size(40)
        .y_label_area_size(if first { 64 } else { 0 })
        .build_cartesian_2d(x0..x1, -base..-top)
        .map_err(draw_err)?;

    let depth_ticks = |v: &f64| format!("{:.0}", -v);
    let mut mesh = chart.configure_mesh();
    mesh.x_desc(track.label.as_str())
        .x_labels(4)
        .y_labels(10)
        .y_label_formatter(&depth_ticks)
        .label_style(font(layout.label_font_px))
        .axis_desc_style(font(layout.label_font_px))
        .light_line_style(&BLACK.mix(0.05))
        .bold_line_style(&BLACK.mix(0.2));
    if first {
        mesh.y_desc(layout.depth_label.as_str());
    }
    mesh.draw().map_err(draw_err)?;

    match &track.kind {
        TrackKind::Curves(traces) => {
            for trace in traces {
                for segment in curve_segments(&trace.points) {
                    chart
                        .draw_series(LineSeries::new(
                            segment.into_iter().map(|(x, depth)| (x, -depth)),
                            trace.color.stroke_width(1),
                        ))
                        .map_err(draw_err)?;
                }
            }
        }
        TrackKind::Fraction(set) => {
            for (component, polygon) in set.components().iter().zip(set.polygons()) {
                let color = parse_color(&component.color).ok_or_else(|| {
                    RenderError::UnknownColor {
                        curve: component.name.clone(),
                        color: component.color.clone(),
                    }
                })?;
                let points: Vec<(f64, f64)> =
                    polygon.into_iter().map(|(x, depth)| (x, -depth)).collect();
                chart
                    .draw_series(std::iter::once(Polygon::new(points, color.filled())))
                    .map_err(draw_err)?
                    .label(component.name.as_str())
                    .legend(move |(x, y)| {
                        Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled())
                    });
            }
        }
    }

    if track.legend {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::LowerRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .label_font(font(layout.label_font_px))
            .draw()
            .map_err(draw_err)?;
    }
    Ok(())
}

/// Write `layout` to `path`, creating parent directories as needed.
pub fn render_to_file(
    layout: &LogLayout,
    path: &Path,
    format: OutputFormat,
) -> Result<(), RenderError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| RenderError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let size = (layout.width, layout.height);
    match format {
        OutputFormat::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw_layout(&root, layout)?;
        }
        OutputFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw_layout(&root, layout)?;
        }
    }

    info!(
        path = %path.display(),
        layout = %layout.kind,
        tracks = layout.tracks.len(),
        "Wrote figure"
    );
    Ok(())
}

/// Render `layout` to an in-memory SVG document.
pub fn render_svg(layout: &LogLayout) -> Result<String, RenderError> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (layout.width, layout.height))
            .into_drawing_area();
        draw_layout(&root, layout)?;
    }
    Ok(svg)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlotConfig;
    use crate::plot::LayoutKind;

    /// Text layout needs a system font; hosts without one cannot render.
    fn font_unavailable(err: &RenderError) -> bool {
        matches!(err, RenderError::Draw(msg) if msg.to_lowercase().contains("font"))
    }

    #[test]
    fn test_fraction_panel_svg_has_one_polygon_per_component() {
        let layout = LogLayout::fraction_panel(&PlotConfig::default(), 1000.0, 1400.0).unwrap();
        let svg = match render_svg(&layout) {
            Ok(svg) => svg,
            Err(e) if font_unavailable(&e) => {
                eprintln!("Skipping: no usable font ({e})");
                return;
            }
            Err(e) => panic!("render failed: {e}"),
        };
        assert!(svg.contains("<svg"));
        assert!(svg.matches("<polygon").count() >= 4);
        assert!(svg.contains("Fraction Panel"));
        assert!(svg.contains("Carbonate"));
    }

    #[test]
    fn test_empty_layout_is_rejected() {
        let mut layout = LogLayout::fraction_panel(&PlotConfig::default(), 0.0, 10.0).unwrap();
        layout.tracks.clear();
        assert!(matches!(render_svg(&layout), Err(RenderError::NoTracks)));
    }

    #[test]
    fn test_render_to_file_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("figures").join("panel.svg");
        let layout = LogLayout::fraction_panel(&PlotConfig::default(), 0.0, 10.0).unwrap();
        assert_eq!(layout.kind, LayoutKind::FractionPanel);
        match render_to_file(&layout, &path, OutputFormat::Svg) {
            Ok(()) => assert!(path.exists()),
            Err(e) if font_unavailable(&e) => eprintln!("Skipping: no usable font ({e})"),
            Err(e) => panic!("render failed: {e}"),
        }
        assert!(dir.path().join("figures").is_dir());
    }
}
