//! Rendering Smoke Tests
//!
//! Builds every layout from the sample LAS file and writes it to a temp
//! directory. Hosts without a usable system font cannot lay out text; those
//! runs are skipped (not failed).

use lasplot::config::PlotConfig;
use lasplot::las::LasFile;
use lasplot::pipeline::prepare;
use lasplot::plot::{
    render_svg, render_to_file, LayoutKind, LogLayout, OutputFormat, RenderError, TrackKind,
};
use std::path::PathBuf;

fn sample_las_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/sample.las")
}

fn font_unavailable(err: &RenderError) -> bool {
    matches!(err, RenderError::Draw(msg) if msg.to_lowercase().contains("font"))
}

fn layouts() -> Vec<LogLayout> {
    let las = LasFile::read(sample_las_path()).unwrap();
    let config = PlotConfig::default();
    let prepared = prepare(&las, &config.processing).unwrap();
    LayoutKind::ALL
        .iter()
        .map(|&kind| LogLayout::from_frame(kind, &prepared.frame, &config, las.well_name()).unwrap())
        .collect()
}

#[test]
fn every_layout_shares_the_log_depth_interval() {
    for layout in layouts() {
        assert_eq!(layout.depth_span, (1000.0, 1014.5), "{}", layout.kind);
        if layout.kind != LayoutKind::FractionPanel {
            assert_eq!(layout.title, "Well: SAMPLE TEST #1");
        }
    }
}

#[test]
fn track_counts_per_layout() {
    let counts: Vec<(LayoutKind, usize)> =
        layouts().iter().map(|l| (l.kind, l.tracks.len())).collect();
    assert_eq!(
        counts,
        vec![
            (LayoutKind::Logs, 6),
            (LayoutKind::Overlay, 7),
            (LayoutKind::FractionPanel, 1),
            (LayoutKind::Combo, 7),
        ]
    );
}

#[test]
fn combo_fraction_track_fills_the_unit_axis() {
    let combo = layouts().pop().unwrap();
    let track = combo.tracks.last().unwrap();
    assert_eq!(track.label, "Fraction 4");
    match &track.kind {
        TrackKind::Fraction(set) => {
            let polygons = set.polygons();
            assert_eq!(polygons.len(), 4);
            // First polygon starts on the zero line at the base.
            assert_eq!(polygons[0][0], (0.0, 1014.5));
            assert_eq!(polygons[0][1], (0.0, 1000.0));
        }
        other => panic!("expected fraction track, got {other:?}"),
    }
}

#[test]
fn all_layouts_render_to_svg_and_png() {
    let dir = tempfile::tempdir().unwrap();
    for layout in layouts() {
        for format in [OutputFormat::Svg, OutputFormat::Png] {
            let path = dir
                .path()
                .join(format!("sample_{}.{}", layout.kind, format.extension()));
            match render_to_file(&layout, &path, format) {
                Ok(()) => {
                    let size = std::fs::metadata(&path).unwrap().len();
                    assert!(size > 0, "{} is empty", path.display());
                }
                Err(e) if font_unavailable(&e) => {
                    eprintln!("SKIP: no usable font ({e})");
                    return;
                }
                Err(e) => panic!("rendering {} failed: {e}", path.display()),
            }
        }
    }
}

#[test]
fn overlay_svg_draws_both_curves() {
    let overlay = layouts().into_iter().nth(1).unwrap();
    let svg = match render_svg(&overlay) {
        Ok(svg) => svg,
        Err(e) if font_unavailable(&e) => {
            eprintln!("SKIP: no usable font ({e})");
            return;
        }
        Err(e) => panic!("render failed: {e}"),
    };
    assert!(svg.contains("Well: SAMPLE TEST #1"));
    assert!(svg.contains("RHOB, MELCAL"));
    assert!(svg.contains("Depth (ft)"));
    assert!(svg.matches("<polyline").count() >= 7);
}
