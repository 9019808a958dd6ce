//! Config validation: unknown-key detection with Levenshtein suggestions
//! and consistency checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Unknown keys never break a config.

use crate::fraction::{FractionSet, linspace};
use crate::plot::color::parse_color;
use std::collections::HashSet;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for PlotConfig.
///
/// Keys inside arrays of tables (`[[processing.filters]]`, track curves,
/// fraction components) are listed under the array's own path.
/// Any new field added to PlotConfig must be added here too.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [well]
        "well",
        "well.title",
        "well.depth_label",
        // [processing]
        "processing",
        "processing.select",
        "processing.required",
        "processing.gamma_ray_curve",
        "processing.shale_volume_curve",
        // [[processing.filters]]
        "processing.filters",
        "processing.filters.curve",
        "processing.filters.min",
        "processing.filters.max",
        // [figure]
        "figure",
        "figure.width",
        "figure.combo_width",
        "figure.panel_width",
        "figure.height",
        "figure.title_font_px",
        "figure.label_font_px",
        "figure.format",
        // [[figure.tracks]]
        "figure.tracks",
        "figure.tracks.label",
        "figure.tracks.range",
        "figure.tracks.curves",
        "figure.tracks.curves.name",
        "figure.tracks.curves.color",
        // [figure.overlay]
        "figure.overlay",
        "figure.overlay.label",
        "figure.overlay.range",
        "figure.overlay.curves",
        "figure.overlay.curves.name",
        "figure.overlay.curves.color",
        // [fraction]
        "fraction",
        "fraction.label",
        "fraction.panel_title",
        "fraction.depths",
        // [[fraction.components]]
        "fraction.components",
        "fraction.components.name",
        "fraction.components.color",
        "fraction.components.values",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`. Tables inside arrays share the array's path, and
/// each path is reported once.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    collect_keys(value, prefix, &mut keys);
    let mut seen = HashSet::new();
    keys.retain(|k| seen.insert(k.clone()));
    keys
}

fn collect_keys(value: &toml::Value, prefix: &str, keys: &mut Vec<String>) {
    match value {
        toml::Value::Table(table) => {
            for (k, v) in table {
                let path = if prefix.is_empty() {
                    k.clone()
                } else {
                    format!("{prefix}.{k}")
                };
                keys.push(path.clone());
                collect_keys(v, &path, keys);
            }
        }
        toml::Value::Array(items) if !prefix.is_empty() => {
            for item in items.iter().filter(|v| v.is_table()) {
                collect_keys(item, prefix, keys);
            }
        }
        _ => {}
    }
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (k, levenshtein(unknown, k)))
        .filter(|(_, dist)| *dist <= 3)
        // Tie-break on the key so suggestions don't depend on hash order.
        .min_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)))
        .map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// This does NOT fail on unknown keys, it only warns.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are handled by serde later
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Consistency Validation
// ============================================================================

/// Validate value ranges and cross references on a parsed PlotConfig.
///
/// Returns (errors, warnings). Errors are configurations that cannot
/// produce a figure; warnings are suspicious but not fatal.
pub fn validate_ranges(config: &super::PlotConfig) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    validate_processing(&config.processing, &mut errors, &mut warnings);
    validate_figure(config, &mut errors, &mut warnings);
    validate_fraction(&config.fraction, &mut errors);

    (errors, warnings)
}

fn contains_curve(list: &[String], name: &str) -> bool {
    list.iter().any(|c| c == name)
}

fn validate_processing(
    p: &super::ProcessingConfig,
    errors: &mut Vec<String>,
    warnings: &mut Vec<ValidationWarning>,
) {
    if p.select.is_empty() {
        errors.push("processing.select must name at least one curve".to_string());
    }

    for name in &p.required {
        if !contains_curve(&p.select, name) {
            errors.push(format!(
                "processing.required curve '{name}' is not in processing.select"
            ));
        }
    }

    let mut filtered = HashSet::new();
    for f in &p.filters {
        if !f.min.is_finite() || !f.max.is_finite() {
            errors.push(format!(
                "processing.filters[{}] bounds must be finite (min = {}, max = {})",
                f.curve, f.min, f.max
            ));
        } else if f.min >= f.max {
            errors.push(format!(
                "processing.filters[{}] min = {} must be less than max = {}",
                f.curve, f.min, f.max
            ));
        }
        if !contains_curve(&p.select, &f.curve) {
            errors.push(format!(
                "processing.filters curve '{}' is not in processing.select",
                f.curve
            ));
        }
        if !filtered.insert(f.curve.as_str()) {
            warnings.push(ValidationWarning {
                field: "processing.filters".to_string(),
                message: format!(
                    "processing.filters has more than one range for '{}'; all of them apply",
                    f.curve
                ),
                suggestion: None,
            });
        }
    }

    if !contains_curve(&p.select, &p.gamma_ray_curve) {
        errors.push(format!(
            "processing.gamma_ray_curve '{}' is not in processing.select",
            p.gamma_ray_curve
        ));
    }
    if p.shale_volume_curve.trim().is_empty() {
        errors.push("processing.shale_volume_curve must not be empty".to_string());
    } else if contains_curve(&p.select, &p.shale_volume_curve) {
        errors.push(format!(
            "processing.shale_volume_curve '{}' collides with a selected curve",
            p.shale_volume_curve
        ));
    }
}

fn validate_track(
    field: &str,
    track: &super::TrackConfig,
    available: &[String],
    errors: &mut Vec<String>,
) {
    if track.curves.is_empty() {
        errors.push(format!("{field} has no curves"));
    }
    for c in &track.curves {
        if parse_color(&c.color).is_none() {
            errors.push(format!("{field} curve '{}' has unknown color '{}'", c.name, c.color));
        }
        if !contains_curve(available, &c.name) {
            errors.push(format!(
                "{field} curve '{}' is neither selected nor derived",
                c.name
            ));
        }
    }
    if let Some([lo, hi]) = track.range {
        if !lo.is_finite() || !hi.is_finite() || lo >= hi {
            errors.push(format!("{field}.range = [{lo}, {hi}] must be finite with min < max"));
        }
    }
}

fn validate_figure(
    config: &super::PlotConfig,
    errors: &mut Vec<String>,
    warnings: &mut Vec<ValidationWarning>,
) {
    let fig = &config.figure;
    for (name, value) in [
        ("width", fig.width),
        ("combo_width", fig.combo_width),
        ("panel_width", fig.panel_width),
        ("height", fig.height),
        ("title_font_px", fig.title_font_px),
        ("label_font_px", fig.label_font_px),
    ] {
        if value == 0 {
            errors.push(format!("figure.{name} must be > 0"));
        }
    }

    if fig.tracks.is_empty() {
        errors.push("figure.tracks must define at least one track".to_string());
    }

    let mut available = config.processing.select.clone();
    available.push(config.processing.shale_volume_curve.clone());
    for (i, track) in fig.tracks.iter().enumerate() {
        validate_track(&format!("figure.tracks[{i}]"), track, &available, errors);
    }
    validate_track("figure.overlay", &fig.overlay, &available, errors);

    let tracks = fig.tracks.len() as u32 + 2;
    if fig.combo_width > 0 && fig.combo_width / tracks < 60 {
        warnings.push(ValidationWarning {
            field: "figure.combo_width".to_string(),
            message: format!(
                "figure.combo_width = {} leaves less than 60 px per track",
                fig.combo_width
            ),
            suggestion: None,
        });
    }
}

fn validate_fraction(f: &super::FractionConfig, errors: &mut Vec<String>) {
    for c in &f.components {
        if parse_color(&c.color).is_none() {
            errors.push(format!(
                "fraction.components '{}' has unknown color '{}'",
                c.name, c.color
            ));
        }
    }

    let samples = f.components.first().map_or(0, |c| c.values.len());
    let depths = f
        .depths
        .clone()
        .unwrap_or_else(|| linspace(0.0, 1.0, samples));
    if let Err(e) = FractionSet::with_depths(f.components.clone(), depths) {
        errors.push(format!("fraction: {e}"));
    }
}

// ============================================================================
// Tests
// ============================================================================
