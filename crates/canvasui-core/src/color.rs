//! CSS-style color strings.

use peniko::Color;

/// Named colors understood by [`parse_color`].
const NAMED_COLORS: &[(&str, [u8; 4])] = &[
    ("black", [0, 0, 0, 255]),
    ("white", [255, 255, 255, 255]),
    ("red", [255, 0, 0, 255]),
    ("green", [0, 128, 0, 255]),
    ("lime", [0, 255, 0, 255]),
    ("blue", [0, 0, 255, 255]),
    ("yellow", [255, 255, 0, 255]),
    ("orange", [255, 165, 0, 255]),
    ("purple", [128, 0, 128, 255]),
    ("gray", [128, 128, 128, 255]),
    ("grey", [128, 128, 128, 255]),
    ("transparent", [0, 0, 0, 0]),
];

/// Parse a CSS color: a named color, `#rgb`, `#rrggbb`, `#rrggbbaa`,
/// `rgb(r, g, b)` or `rgba(r, g, b, a)` with `a` in `0..=1`.
pub fn parse_color(input: &str) -> Option<Color> {
    let s = input.trim().to_ascii_lowercase();

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(body) = s.strip_prefix("rgba(").and_then(|b| b.strip_suffix(')')) {
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return None;
        }
        let alpha: f64 = parts[3].parse().ok()?;
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        return Some(Color::from_rgba8(
            parts[0].parse().ok()?,
            parts[1].parse().ok()?,
            parts[2].parse().ok()?,
            a,
        ));
    }
    if let Some(body) = s.strip_prefix("rgb(").and_then(|b| b.strip_suffix(')')) {
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return None;
        }
        return Some(Color::from_rgba8(
            parts[0].parse().ok()?,
            parts[1].parse().ok()?,
            parts[2].parse().ok()?,
            255,
        ));
    }

    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == s)
        .map(|(_, [r, g, b, a])| Color::from_rgba8(*r, *g, *b, *a))
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    match hex.len() {
        3 => {
            // #rgb expands each nibble: f -> ff
            let r = channel(0..1)?;
            let g = channel(1..2)?;
            let b = channel(2..3)?;
            Some(Color::from_rgba8(r * 17, g * 17, b * 17, 255))
        }
        6 => Some(Color::from_rgba8(channel(0..2)?, channel(2..4)?, channel(4..6)?, 255)),
        8 => Some(Color::from_rgba8(
            channel(0..2)?,
            channel(2..4)?,
            channel(4..6)?,
            channel(6..8)?,
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba(color: Color) -> [u8; 4] {
        let c = color.to_rgba8();
        [c.r, c.g, c.b, c.a]
    }

    #[test]
    fn test_named_colors() {
        assert_eq!(rgba(parse_color("black").unwrap()), [0, 0, 0, 255]);
        assert_eq!(rgba(parse_color("White").unwrap()), [255, 255, 255, 255]);
        assert_eq!(rgba(parse_color("green").unwrap()), [0, 128, 0, 255]);
        assert!(parse_color("chartreuse-ish").is_none());
    }

    #[test]
    fn test_hex_colors() {
        assert_eq!(rgba(parse_color("#ff0000").unwrap()), [255, 0, 0, 255]);
        assert_eq!(rgba(parse_color("#0f0").unwrap()), [0, 255, 0, 255]);
        assert_eq!(rgba(parse_color("#00000080").unwrap()), [0, 0, 0, 128]);
        assert!(parse_color("#12345").is_none());
        assert!(parse_color("#gg0000").is_none());
    }

    #[test]
    fn test_rgb_functions() {
        assert_eq!(rgba(parse_color("rgb(10, 20, 30)").unwrap()), [10, 20, 30, 255]);
        assert_eq!(rgba(parse_color("rgba(10,20,30,0)").unwrap()), [10, 20, 30, 0]);
        assert!(parse_color("rgb(10, 20)").is_none());
        assert!(parse_color("rgb(300, 0, 0)").is_none());
    }
}
