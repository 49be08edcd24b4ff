//! Category name and emoji rules.
//!
//! Names are stored lowercase and must be unique per user; the database
//! enforces uniqueness, this module enforces shape.

use std::sync::LazyLock;

use regex::Regex;

/// Maximum length of a category name, in characters.
pub const MAX_NAME_LEN: usize = 32;

/// Maximum length of a category emoji, in characters.
pub const MAX_EMOJI_LEN: usize = 8;

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_-]+$").expect("valid regex"));

/// Trim and lowercase a user-supplied category name.
pub fn normalize_category_name(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Validate an already-normalized category name.
pub fn validate_category_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Category name must not be empty".to_string());
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(format!(
            "Category name must be at most {MAX_NAME_LEN} characters"
        ));
    }
    if !NAME_RE.is_match(name) {
        return Err(
            "Category name may only contain lowercase letters, digits, '-' and '_'".to_string(),
        );
    }
    Ok(())
}

/// Validate an optional emoji glyph.
///
/// Only a loose check: short, non-blank, and no ASCII letters or digits.
pub fn validate_emoji(emoji: &str) -> Result<(), String> {
    let len = emoji.chars().count();
    if len == 0 || emoji.trim().is_empty() {
        return Err("Emoji must not be blank".to_string());
    }
    if len > MAX_EMOJI_LEN {
        return Err(format!("Emoji must be at most {MAX_EMOJI_LEN} characters"));
    }
    if emoji.chars().any(|c| c.is_ascii_alphanumeric()) {
        return Err("Emoji must not contain letters or digits".to_string());
    }
    Ok(())
}
