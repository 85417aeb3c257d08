//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Time bucket selection (`?bucket=day`).
///
/// Kept as a raw string: unknown values fall back to `day` rather than
/// rejecting the request.
#[derive(Debug, Deserialize)]
pub struct BucketParams {
    pub bucket: Option<String>,
}

/// Split a comma-separated query value into trimmed, non-empty items.
pub fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
