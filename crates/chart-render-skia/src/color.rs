// File: crates/chart-render-skia/src/color.rs
// Summary: CSS color strings (hex and a few keywords) to Skia colors.

use skia_safe as skia;

/// Parses `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa` and the keywords
/// `black`, `white`, `transparent`. Case-insensitive.
pub fn parse_css_color(css: &str) -> Option<skia::Color> {
    let css = css.trim();
    match css.to_ascii_lowercase().as_str() {
        "black" => return Some(skia::Color::BLACK),
        "white" => return Some(skia::Color::WHITE),
        "transparent" => return Some(skia::Color::TRANSPARENT),
        _ => {}
    }
    let hex = css.strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let (r, g, b, a) = match hex.len() {
        3 => (nibble(0)?, nibble(1)?, nibble(2)?, 255),
        4 => (nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?),
        6 => (byte(0)?, byte(2)?, byte(4)?, 255),
        8 => (byte(0)?, byte(2)?, byte(4)?, byte(6)?),
        _ => return None,
    };
    Some(skia::Color::from_argb(a, r, g, b))
}
