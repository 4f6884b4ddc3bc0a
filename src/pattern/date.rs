//! Timestamp reformatting in message text

use super::rightmost_spans;
use crate::error::{RewriteError, RewriteResult};
use crate::model::Message;
use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::LazyLock;

/// Display format for timestamps surfaced to end users
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// 4-digit year, anything (greedy), then `T` and `HH:MM:SS`
static ISO_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{4}.*T\d\d:\d\d:\d\d").expect("timestamp pattern is a valid regex")
});

/// Exact shape accepted by [`format_timestamp`]; chrono alone also takes
/// single-digit fields
static ISO_STRICT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}\z")
        .expect("strict timestamp pattern is a valid regex")
});

/// Parse an ISO-8601-like timestamp and render it with [`DATE_FORMAT`]
///
/// # Errors
/// Returns `RewriteError::Timestamp` if `raw` is not `YYYY-MM-DDTHH:MM:SS`.
pub fn format_timestamp(raw: &str) -> RewriteResult<String> {
    if !ISO_STRICT.is_match(raw) {
        return Err(RewriteError::malformed_timestamp(raw));
    }
    let date = NaiveDateTime::parse_from_str(raw, ISO_FORMAT)
        .map_err(|e| RewriteError::timestamp(raw, e))?;
    Ok(date.format(DATE_FORMAT).to_string())
}

/// Reformat every embedded timestamp in the message's textual field.
///
/// Returns the number of timestamps rewritten.
///
/// # Errors
/// Returns `RewriteError::Timestamp` on the first match that does not parse;
/// the field is left unchanged in that case.
pub fn reformat(message: &mut Message) -> RewriteResult<usize> {
    match message.text_field_mut() {
        Some(text) => reformat_text(text),
        None => Ok(0),
    }
}

/// Reformat every embedded timestamp in `text`, rightmost first
///
/// # Errors
/// Same as [`reformat`].
pub fn reformat_text(text: &mut String) -> RewriteResult<usize> {
    let mut rewrites = Vec::new();
    for span in rightmost_spans(text, &ISO_PATTERN, None) {
        let raw = text.get(span.clone()).unwrap_or_default();
        let formatted = format_timestamp(raw)?;
        tracing::info!(date = %raw, formatted = %formatted, "Reformatted date");
        rewrites.push((span, formatted));
    }

    for (span, formatted) in &rewrites {
        text.replace_range(span.clone(), formatted);
    }
    Ok(rewrites.len())
}
