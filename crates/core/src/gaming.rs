//! Gamification side-feature: games, cosmetic variants and scores.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Maximum length of game and variant names.
pub const MAX_GAME_NAME_LEN: u64 = 80;
/// Maximum length of a variant title.
pub const MAX_VARIANT_TITLE_LEN: u64 = 80;
/// Maximum length of a variant badge.
pub const MAX_VARIANT_BADGE_LEN: u64 = 10;

/// Variant colors are `#RRGGBB` hex strings.
const COLOR_PATTERN: &str = r"^#[0-9a-fA-F]{6}$";

static COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(COLOR_PATTERN).expect("valid regex"));

/// Trim a user-supplied game name and reject blank names.
pub fn normalize_game_name(name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Game name must not be empty".into()));
    }
    Ok(trimmed.to_string())
}

/// Validate a variant color such as `#ff8800`.
pub fn validate_variant_color(color: &str) -> Result<(), CoreError> {
    if !COLOR_RE.is_match(color) {
        return Err(CoreError::Validation(format!(
            "Variant color must be a #RRGGBB hex value, got '{color}'"
        )));
    }
    Ok(())
}

/// Display name of a player as shown next to their scores.
pub fn full_name(first_name: &str, last_name: &str) -> String {
    format!("{first_name} {last_name}").trim().to_string()
}
