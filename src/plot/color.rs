//! Color names used in config files.
//!
//! Accepts the single-letter codes (`b g r c m y k w`), common CSS color
//! names and `#rrggbb` hex strings.

use plotters::style::RGBColor;

/// Resolve a color spec, case-insensitively. Returns `None` when unknown.
pub fn parse_color(spec: &str) -> Option<RGBColor> {
    let spec = spec.trim();
    if let Some(hex) = spec.strip_prefix('#') {
        return parse_hex(hex);
    }

    let rgb = match spec.to_ascii_lowercase().as_str() {
        // single-letter codes
        "b" => (0, 0, 255),
        "g" => (0, 128, 0),
        "r" => (255, 0, 0),
        "c" => (0, 191, 191),
        "m" => (191, 0, 191),
        "y" => (191, 191, 0),
        "k" => (0, 0, 0),
        "w" => (255, 255, 255),
        // named
        "blue" => (0, 0, 255),
        "green" => (0, 128, 0),
        "red" => (255, 0, 0),
        "cyan" => (0, 255, 255),
        "magenta" => (255, 0, 255),
        "yellow" => (255, 255, 0),
        "black" => (0, 0, 0),
        "white" => (255, 255, 255),
        "orange" => (255, 165, 0),
        "purple" => (128, 0, 128),
        "brown" => (165, 42, 42),
        "pink" => (255, 192, 203),
        "gray" | "grey" => (128, 128, 128),
        "olive" => (128, 128, 0),
        "navy" => (0, 0, 128),
        "teal" => (0, 128, 128),
        "maroon" => (128, 0, 0),
        "gold" => (255, 215, 0),
        "tan" => (210, 180, 140),
        "khaki" => (240, 230, 140),
        "lime" => (0, 255, 0),
        "darkgreen" => (0, 100, 0),
        "skyblue" => (135, 206, 235),
        _ => return None,
    };
    Some(RGBColor(rgb.0, rgb.1, rgb.2))
}

fn parse_hex(hex: &str) -> Option<RGBColor> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}
