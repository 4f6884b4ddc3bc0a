//! Response-wide pattern helpers

use crate::error::RewriteResult;
use crate::model::Response;
use crate::pattern::{self, SubstituteMode};
use regex::Regex;

/// True if any text message of the response matches `pattern`
#[must_use]
pub fn contains_pattern(response: &Response, pattern: &Regex) -> bool {
    response
        .messages
        .iter()
        .filter(|m| m.has_text_lines())
        .any(|m| pattern::matches(m, pattern))
}

/// Replace every occurrence of `pattern` in every message, cards included
pub fn substitute_all(response: &mut Response, pattern: &Regex, replacement: &str) -> usize {
    tracing::info!(
        pattern = %pattern.as_str(),
        replace = %replacement,
        "Replacing text in response"
    );
    response
        .messages
        .iter_mut()
        .map(|m| pattern::substitute(m, pattern, replacement, SubstituteMode::Exhaustive))
        .sum()
}

/// Reformat timestamps in every text message of the response
///
/// # Errors
/// Returns `RewriteError::Timestamp` on the first malformed timestamp.
/// Messages before the failing one keep their rewrites.
pub fn reformat_dates(response: &mut Response) -> RewriteResult<usize> {
    tracing::info!("Reformatting dates in response");
    let mut rewritten = 0;
    for message in response.messages.iter_mut().filter(|m| m.has_text_lines()) {
        rewritten += pattern::reformat(message)?;
    }
    Ok(rewritten)
}
