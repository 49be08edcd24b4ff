//! Category color codec.
//!
//! Colors travel as `#RRGGBB` strings over HTTP and are stored as a packed
//! 24-bit RGB integer (`0xff6b6b`).

use std::sync::LazyLock;

use regex::Regex;

static HEX_COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid regex"));

/// Largest packed value (`#ffffff`).
pub const MAX_PACKED_COLOR: i32 = 0x00ff_ffff;

/// Parse a `#RRGGBB` string (case-insensitive) into its packed form.
pub fn parse_hex_color(input: &str) -> Result<i32, String> {
    if !HEX_COLOR_RE.is_match(input) {
        return Err(format!(
            "Invalid color '{input}'. Expected a hex color like #ff6b6b"
        ));
    }
    i32::from_str_radix(&input[1..], 16).map_err(|e| format!("Invalid color '{input}': {e}"))
}

/// Render a packed color as lowercase `#rrggbb`.
///
/// Bits above the low 24 are ignored.
pub fn format_hex_color(packed: i32) -> String {
    format!("#{:06x}", packed & MAX_PACKED_COLOR)
}
