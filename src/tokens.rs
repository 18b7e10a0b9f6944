//! Date and slug derivation from a post filename.
//!
//! A post named `2021-05-01-hello-world.md` carries its date in the first ten
//! characters and its slug after the separator at index 10. Tokens come from
//! the filename only; file contents are never consulted.

use chrono::NaiveDate;

use crate::error::{PostshiftError, Result};
use crate::model::SlugMode;

const DATE_LEN: usize = 10;
const SLUG_START: usize = DATE_LEN + 1;

/// First ten characters of the filename. The token lands inside a single
/// metadata line, so control characters (line breaks included) are rejected.
pub fn date_token(file_name: &str) -> Result<String> {
    if file_name.chars().count() < DATE_LEN {
        return Err(PostshiftError::InvalidFileName(file_name.to_string()));
    }
    let token: String = file_name.chars().take(DATE_LEN).collect();
    if token.chars().any(char::is_control) {
        return Err(PostshiftError::InvalidFileName(file_name.escape_debug().to_string()));
    }
    Ok(token)
}

/// Filename from index 11 onward, extension removed per `mode`, lower-cased.
pub fn slug_token(file_name: &str, mode: SlugMode) -> Result<String> {
    let remainder: String = file_name.chars().skip(SLUG_START).collect();
    let stem = match mode {
        SlugMode::FirstDot => remainder.split('.').next().unwrap_or_default(),
        SlugMode::Extension => remainder
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(remainder.as_str()),
    };

    let slug = stem.to_lowercase();
    if slug.is_empty() || slug == "." || slug == ".." {
        return Err(PostshiftError::InvalidFileName(file_name.to_string()));
    }
    Ok(slug)
}

/// True when cutting at the first `.` loses part of the name that a
/// final-extension cut would keep (`v1.0-release.md` -> `v1`).
pub fn is_truncated(file_name: &str) -> bool {
    match (
        slug_token(file_name, SlugMode::FirstDot),
        slug_token(file_name, SlugMode::Extension),
    ) {
        (Ok(first_dot), Ok(extension)) => first_dot != extension,
        _ => false,
    }
}

pub fn is_calendar_date(token: &str) -> bool {
    NaiveDate::parse_from_str(token, "%Y-%m-%d").is_ok()
}
