//! Config Validation Tests
//!
//! Typo detection and consistency validation, exercised through the public
//! config API independently from the rest of the pipeline.

use lasplot::config::validation::{
    known_config_keys, suggest_correction, validate_ranges, validate_unknown_keys,
};
use lasplot::config::{ConfigError, PlotConfig, RangeFilter};
use std::path::PathBuf;

fn shipped_config_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("lasplot.toml")
}

// ============================================================================
// Typo Detection
// ============================================================================

#[test]
fn typo_in_processing_key_warns_with_suggestion() {
    let toml_str = r#"
[processing]
requird = ["GR"]
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1, "Expected exactly 1 warning");
    assert_eq!(warnings[0].field, "processing.requird");
    assert_eq!(warnings[0].suggestion.as_deref(), Some("processing.required"));
}

#[test]
fn typo_in_filter_table_warns() {
    let toml_str = r#"
[[processing.filters]]
curve = "GR"
mn = 0.0
max = 250.0
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].suggestion.as_deref(), Some("processing.filters.min"));
}

#[test]
fn unknown_section_produces_warning() {
    let warnings = validate_unknown_keys("[legend]\nposition = \"upper right\"\n");
    assert!(warnings.iter().any(|w| w.field == "legend"));
    assert!(warnings.iter().any(|w| w.field == "legend.position"));
}

#[test]
fn garbage_key_has_no_suggestion() {
    let known = known_config_keys();
    assert!(suggest_correction("zzzzzzzzzzzzzzzz", &known).is_none());
}

#[test]
fn shipped_config_has_no_unknown_keys() {
    let path = shipped_config_path();
    let contents = std::fs::read_to_string(&path).expect("lasplot.toml ships with the repo");
    let warnings = validate_unknown_keys(&contents);
    assert!(warnings.is_empty(), "Unexpected warnings: {:?}", warnings);
}

// ============================================================================
// Consistency Validation
// ============================================================================

#[test]
fn shipped_config_loads_and_matches_defaults() {
    let config = PlotConfig::load_from_file(&shipped_config_path()).expect("shipped config loads");
    let defaults = PlotConfig::default();
    assert_eq!(config.processing.select, defaults.processing.select);
    assert_eq!(config.processing.filters, defaults.processing.filters);
    assert_eq!(config.fraction.components, defaults.fraction.components);
    assert_eq!(config.figure.tracks.len(), 6);
    assert_eq!(config.figure.tracks[5].range, Some([0.0, 1.0]));
}

#[test]
fn filter_on_unselected_curve_is_an_error() {
    let mut config = PlotConfig::default();
    config.processing.filters.push(RangeFilter::new("NPHI", 0.0, 0.6));
    let (errors, _) = validate_ranges(&config);
    assert!(errors.iter().any(|e| e.contains("'NPHI'")), "{errors:?}");
}

#[test]
fn shale_volume_name_must_not_shadow_a_log() {
    let mut config = PlotConfig::default();
    config.processing.shale_volume_curve = "GR".to_string();
    let (errors, _) = validate_ranges(&config);
    assert!(errors.iter().any(|e| e.contains("collides")));
}

#[test]
fn empty_selection_is_an_error() {
    let toml_str = r#"
[processing]
select = []
required = []
filters = []
"#;
    match PlotConfig::from_toml_str(toml_str) {
        Err(ConfigError::Validation(errors)) => {
            assert!(errors.iter().any(|e| e.contains("processing.select")));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn validation_error_lists_every_problem() {
    let toml_str = r#"
[figure]
width = 0
height = 0
"#;
    let err = PlotConfig::from_toml_str(toml_str).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("figure.width"));
    assert!(message.contains("figure.height"));
}

#[test]
fn env_var_config_is_used_when_no_path_given() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("env.toml");
    std::fs::write(&path, "[well]\ndepth_label = \"MD (m)\"\n").unwrap();

    // Only this test touches LASPLOT_CONFIG.
    std::env::set_var("LASPLOT_CONFIG", &path);
    let config = PlotConfig::load(None);
    std::env::remove_var("LASPLOT_CONFIG");

    assert_eq!(config.unwrap().well.depth_label, "MD (m)");
}
