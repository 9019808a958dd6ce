//! Section-by-section LAS text parser.

use super::{HeaderItem, LasError, LasFile};
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Section currently being read, from the letter after `~`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Version,
    Well,
    Curve,
    Parameter,
    Other,
    Ascii,
    Unknown(char),
}

impl Section {
    fn from_marker(line: &str) -> Self {
        let letter = line
            .trim_start()
            .trim_start_matches('~')
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or(' ');
        match letter {
            'V' => Section::Version,
            'W' => Section::Well,
            'C' => Section::Curve,
            'P' => Section::Parameter,
            'O' => Section::Other,
            'A' => Section::Ascii,
            other => Section::Unknown(other),
        }
    }
}

/// `MNEM.UNIT  rest`: mnemonic up to the first dot, unit runs from the dot to
/// the first whitespace.
fn header_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(?P<mnem>[^.]*?)\s*\.(?P<unit>\S*)(?P<rest>.*)$")
            .unwrap_or_else(|e| unreachable!("static LAS header regex is valid: {e}"))
    })
}

/// Parse one header line. Returns `None` when the line has no `.` delimiter
/// or an empty mnemonic.
pub fn parse_header_line(line: &str) -> Option<HeaderItem> {
    let caps = header_regex().captures(line)?;
    let mnemonic = caps.name("mnem")?.as_str().trim();
    if mnemonic.is_empty() {
        return None;
    }
    let mut unit = caps.name("unit").map_or("", |m| m.as_str());
    let rest = caps.name("rest").map_or("", |m| m.as_str());

    // Units may contain colons (`HH:MM`). Only when the rest of the line has
    // none is the unit's last colon the description delimiter (`GR.GAPI: ...`).
    let delimiter_in_unit = if rest.contains(':') { None } else { unit.rfind(':') };
    let (value, description) = match delimiter_in_unit {
        Some(idx) => {
            let description = format!("{}{rest}", &unit[idx + 1..]);
            unit = &unit[..idx];
            (String::new(), description)
        }
        // Description follows the last colon; everything before it is the value.
        None => match rest.rfind(':') {
            Some(idx) => (rest[..idx].to_string(), rest[idx + 1..].to_string()),
            None => (rest.to_string(), String::new()),
        },
    };

    Some(HeaderItem {
        mnemonic: mnemonic.to_string(),
        unit: unit.to_string(),
        value: value.trim().to_string(),
        description: description.trim().to_string(),
    })
}

/// Rename repeated curve mnemonics to `NAME:2`, `NAME:3`, ...
fn dedupe_curve_names(curves: &mut [HeaderItem]) {
    let mut seen: Vec<(String, usize)> = Vec::new();
    for curve in curves.iter_mut() {
        let key = curve.mnemonic.to_uppercase();
        match seen.iter_mut().find(|(name, _)| *name == key) {
            Some((_, count)) => {
                *count += 1;
                let renamed = format!("{}:{}", curve.mnemonic, count);
                warn!(curve = %curve.mnemonic, renamed = %renamed, "Duplicate curve mnemonic");
                curve.mnemonic = renamed;
            }
            None => seen.push((key, 1)),
        }
    }
}

pub(super) fn parse(text: &str) -> Result<LasFile, LasError> {
    let mut version = Vec::new();
    let mut well = Vec::new();
    let mut curves = Vec::new();
    let mut params = Vec::new();
    let mut other = String::new();
    let mut ascii_lines: Vec<(usize, &str)> = Vec::new();

    let mut section: Option<Section> = None;
    let mut saw_curve_section = false;
    let mut saw_ascii_section = false;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = raw.trim();

        if trimmed.starts_with('~') {
            let next = Section::from_marker(trimmed);
            match next {
                Section::Curve => saw_curve_section = true,
                Section::Ascii => saw_ascii_section = true,
                Section::Unknown(letter) => {
                    debug!(line = line_no, section = %letter, "Skipping unknown LAS section");
                }
                _ => {}
            }
            section = Some(next);
            continue;
        }

        let Some(current) = section else {
            if !trimmed.is_empty() && !trimmed.starts_with('#') {
                debug!(line = line_no, "Ignoring text before the first section");
            }
            continue;
        };

        if current == Section::Other {
            other.push_str(raw);
            other.push('\n');
            continue;
        }

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let target = match current {
            Section::Version => &mut version,
            Section::Well => &mut well,
            Section::Curve => &mut curves,
            Section::Parameter => &mut params,
            Section::Ascii => {
                ascii_lines.push((line_no, trimmed));
                continue;
            }
            Section::Other | Section::Unknown(_) => continue,
        };

        let item = parse_header_line(raw).ok_or_else(|| LasError::MalformedHeader {
            line: line_no,
            text: trimmed.to_string(),
        })?;
        target.push(item);
    }

    if let Some(vers) = version
        .iter()
        .find(|item| item.mnemonic.eq_ignore_ascii_case("VERS"))
    {
        if vers.numeric_value().is_some_and(|v| v >= 3.0) {
            return Err(LasError::UnsupportedVersion(vers.value.clone()));
        }
    }

    if !saw_curve_section {
        return Err(LasError::MissingSection('C'));
    }
    if curves.is_empty() {
        return Err(LasError::NoCurves);
    }
    if !saw_ascii_section {
        return Err(LasError::MissingSection('A'));
    }
    dedupe_curve_names(&mut curves);

    let null_value = well
        .iter()
        .find(|item| item.mnemonic.eq_ignore_ascii_case("NULL"))
        .and_then(HeaderItem::numeric_value)
        .unwrap_or(super::DEFAULT_NULL_VALUE);

    let data = parse_ascii(&ascii_lines, curves.len(), null_value)?;

    Ok(LasFile {
        version,
        well,
        curves,
        params,
        other,
        data,
    })
}

/// Read the `~A` block as one token stream and chunk it into rows of
/// `n_curves` values. Works for both wrapped and unwrapped files.
fn parse_ascii(
    lines: &[(usize, &str)],
    n_curves: usize,
    null_value: f64,
) -> Result<Vec<Vec<f64>>, LasError> {
    let mut flat = Vec::new();
    for &(line_no, line) in lines {
        for token in line.split_whitespace() {
            let value: f64 = token.parse().map_err(|_| LasError::InvalidNumber {
                line: line_no,
                token: token.to_string(),
            })?;
            flat.push(if value == null_value { f64::NAN } else { value });
        }
    }

    if flat.len() % n_curves != 0 {
        return Err(LasError::RaggedData {
            values: flat.len(),
            curves: n_curves,
        });
    }

    let rows = flat.len() / n_curves;
    let mut columns: Vec<Vec<f64>> = (0..n_curves).map(|_| Vec::with_capacity(rows)).collect();
    for row in flat.chunks_exact(n_curves) {
        for (column, &value) in columns.iter_mut().zip(row) {
            column.push(value);
        }
    }
    Ok(columns)
}

// ============================================================================
// Tests
// ============================================================================
