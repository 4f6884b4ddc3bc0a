//! Pattern substitution in message text

use super::rightmost_spans;
use crate::model::Message;
use regex::Regex;

/// How many occurrences a substitution rewrites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubstituteMode {
    /// Only the rightmost occurrence
    Once,
    /// Every occurrence, right to left
    #[default]
    Exhaustive,
}

impl SubstituteMode {
    fn limit(self) -> Option<usize> {
        match self {
            Self::Once => Some(1),
            Self::Exhaustive => None,
        }
    }
}

/// Replace occurrences of `pattern` in the message's textual field.
///
/// Returns the number of rewrites. The replacement is inserted literally
/// (no `$1` expansion) and is never searched again, so the exhaustive mode
/// terminates even when `replacement` matches `pattern`.
pub fn substitute(
    message: &mut Message,
    pattern: &Regex,
    replacement: &str,
    mode: SubstituteMode,
) -> usize {
    match message.text_field_mut() {
        Some(text) => substitute_text(text, pattern, replacement, mode),
        None => 0,
    }
}

/// Replace occurrences of `pattern` in `text`, rightmost first.
///
/// A deletion (empty `replacement`) in exhaustive mode repeats the pass on
/// the updated text until nothing is removed, so an occurrence that only
/// forms once an inner one is gone is removed too. Zero-width matches are
/// not deletions and are skipped. Every repeated pass shrinks the text.
pub fn substitute_text(
    text: &mut String,
    pattern: &Regex,
    replacement: &str,
    mode: SubstituteMode,
) -> usize {
    let deleting = replacement.is_empty();
    let mut total = 0;
    loop {
        let spans: Vec<_> = rightmost_spans(text, pattern, mode.limit())
            .into_iter()
            .filter(|span| !(deleting && span.is_empty()))
            .collect();
        // Spans are ordered right to left, so earlier offsets stay valid
        for span in &spans {
            text.replace_range(span.clone(), replacement);
        }
        total += spans.len();

        if spans.is_empty() || !deleting || mode == SubstituteMode::Once {
            return total;
        }
    }
}
