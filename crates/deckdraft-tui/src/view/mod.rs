pub mod editor;
pub mod help;
pub mod progress;
pub mod themes;
pub mod upload;

use ratatui::style::Color;

/// Spinner frames for animated progress indication.
const SPINNER_FRAMES: &[char] = &[
    '\u{280B}', '\u{2819}', '\u{2839}', '\u{2838}', '\u{283C}', '\u{2834}', '\u{2826}', '\u{2827}',
    '\u{2807}', '\u{280F}',
];

/// Get the current spinner character based on a tick counter.
pub fn spinner_char(tick: usize) -> char {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

/// Truncate a string to fit in `max_width` columns, appending "\u{2026}" if truncated.
pub fn truncate(s: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if s.len() <= max_width {
        return s.to_string();
    }
    let mut truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
    truncated.push('\u{2026}');
    truncated
}

/// Parse a `#rrggbb` catalog color into a terminal color for swatches.
pub fn hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

/// Build a `██████░░░░` text progress bar for a 0-100 value.
pub fn progress_bar(value: u8, width: usize) -> String {
    let filled = (value as usize * width) / 100;
    let empty = width.saturating_sub(filled);
    "\u{2588}".repeat(filled) + &"\u{2591}".repeat(empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_parses_catalog_entries() {
        assert_eq!(hex_color("#2563eb"), Some(Color::Rgb(0x25, 0x63, 0xeb)));
        assert_eq!(hex_color("2563eb"), None);
        assert_eq!(hex_color("#25"), None);
    }

    #[test]
    fn test_progress_bar_bounds() {
        assert_eq!(progress_bar(0, 4), "\u{2591}\u{2591}\u{2591}\u{2591}");
        assert_eq!(progress_bar(100, 4), "\u{2588}\u{2588}\u{2588}\u{2588}");
        assert_eq!(progress_bar(50, 4), "\u{2588}\u{2588}\u{2591}\u{2591}");
    }
}
