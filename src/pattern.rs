//! Pattern matching, extraction and rewriting on message text
//!
//! All operations act on the textual field of a message (see
//! [`Message::text_field`]) and are no-ops for variants without one.
//!
//! Rewrites bind to the rightmost occurrence of a pattern first and walk
//! leftwards. Each rewrite narrows the searchable window to the text left of
//! the span just rewritten, so inserted text is never searched again.

mod date;
mod substitute;

#[cfg(test)]
mod proptests;

pub use date::{format_timestamp, reformat, reformat_text, DATE_FORMAT};
pub use substitute::{substitute, substitute_text, SubstituteMode};

use crate::model::Message;
use regex::Regex;
use std::ops::Range;

/// True if `pattern` matches anywhere in the message's textual field
pub fn matches(message: &Message, pattern: &Regex) -> bool {
    tracing::debug!(pattern = %pattern.as_str(), "Checking message for pattern");
    message
        .text_field()
        .is_some_and(|text| pattern.is_match(text))
}

/// Collect every match of `pattern` in the message's textual field.
///
/// With capture groups the first group is taken (an unmatched group gives an
/// empty string), otherwise the whole match. Enclosing parentheses and single
/// quotes are trimmed from each value.
pub fn extract(message: &Message, pattern: &Regex) -> Vec<String> {
    let Some(text) = message.text_field() else {
        return Vec::new();
    };

    if pattern.captures_len() > 1 {
        pattern
            .captures_iter(text)
            .map(|caps| trim_capture(caps.get(1).map_or("", |m| m.as_str())))
            .collect()
    } else {
        pattern
            .find_iter(text)
            .map(|m| trim_capture(m.as_str()))
            .collect()
    }
}

fn trim_capture(raw: &str) -> String {
    raw.trim_matches('(')
        .trim_matches(')')
        .trim_matches('\'')
        .to_string()
}

/// Spans of `pattern` in `text`, rightmost first.
///
/// Each span starts where the pattern matches at the largest possible offset
/// inside the current window. The next window ends at that span's start and
/// the next span must start strictly before it, so at most one span is
/// produced per offset. `limit` caps the number of spans.
pub(crate) fn rightmost_spans(
    text: &str,
    pattern: &Regex,
    limit: Option<usize>,
) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut end = text.len();
    let mut max_start = Some(text.len());

    while let Some(upper) = max_start {
        if limit.is_some_and(|limit| spans.len() >= limit) {
            break;
        }
        let Some(window) = text.get(..end) else {
            break;
        };
        let Some(span) = rightmost_match(window, pattern, upper) else {
            break;
        };
        max_start = span.start.checked_sub(1);
        end = span.start;
        spans.push(span);
    }
    spans
}

/// Match starting at the largest offset `<= max_start` in `window`.
///
/// Walks match starts left to right: `find_at` returns the leftmost start at
/// or after `offset`, so resuming one character past each start visits every
/// offset that begins a match, overlapping ones included. A window without a
/// match costs a single search.
fn rightmost_match(window: &str, pattern: &Regex, max_start: usize) -> Option<Range<usize>> {
    let max_start = max_start.min(window.len());
    let mut found = None;
    let mut offset = 0;

    while offset <= max_start {
        let Some(m) = pattern.find_at(window, offset) else {
            break;
        };
        if m.start() > max_start {
            break;
        }
        found = Some(m.range());
        offset = next_char_boundary(window, m.start());
    }
    found
}

fn next_char_boundary(text: &str, offset: usize) -> usize {
    text.get(offset..)
        .and_then(|rest| rest.chars().next())
        .map_or(offset + 1, |c| offset + c.len_utf8())
}
