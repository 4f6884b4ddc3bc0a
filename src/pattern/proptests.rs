//! Property-based tests for pattern matching and rewriting
//!
//! These tests verify key invariants of the rewrite helpers:
//! - Matching agrees with the regex engine on the textual field
//! - Single-shot substitution rewrites exactly the rightmost occurrence
//! - Exhaustive substitution of a literal equals `str::replace`
//! - Trigger stripping is idempotent and leaves no SIP trigger behind,
//!   nested triggers included
//! - Embedded timestamps are rendered with the display format

#![allow(clippy::redundant_closure_for_method_calls)]

use super::{matches, reformat, substitute, SubstituteMode, DATE_FORMAT};
use crate::model::{Message, Response};
use crate::triggers::TriggerRegistry;
use chrono::NaiveDate;
use proptest::prelude::*;
use regex::Regex;

// ============================================================================
// Strategies
// ============================================================================

/// Lowercase filler: no digits, no uppercase, no trigger sigils
fn arb_filler() -> impl Strategy<Value = String> {
    "[a-z ,.]{0,20}"
}

/// Literal token that never occurs inside filler
fn arb_token() -> impl Strategy<Value = String> {
    "[A-Z]{2,4}"
}

/// A SIP trigger occurrence with a random payload
fn arb_sip_trigger() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!["handover", "hangup", "play_file", "pause", "send_dtmf"]),
        "[a-z0-9+]{0,8}",
    )
        .prop_map(|(action, payload)| format!("$sip.{action}('{payload}')"))
}

/// Filler interleaved with SIP triggers
fn arb_triggered_text() -> impl Strategy<Value = String> {
    prop::collection::vec((arb_filler(), arb_sip_trigger()), 0..5).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(filler, trigger)| format!("{filler}{trigger}"))
            .collect::<String>()
    })
}

/// One SIP trigger spliced into another, so removing the inner one joins the outer
fn arb_nested_trigger() -> impl Strategy<Value = String> {
    (arb_sip_trigger(), arb_sip_trigger(), any::<prop::sample::Index>()).prop_map(
        |(outer, inner, split)| {
            let at = 1 + split.index(outer.len() - 1);
            let (head, tail) = outer.split_at(at);
            format!("{head}{inner}{tail}")
        },
    )
}

fn arb_datetime() -> impl Strategy<Value = chrono::NaiveDateTime> {
    (1970i32..2100, 1u32..=12, 1u32..=28, 0u32..24, 0u32..60, 0u32..60).prop_map(
        |(y, mo, d, h, mi, s)| {
            NaiveDate::from_ymd_opt(y, mo, d)
                .and_then(|date| date.and_hms_opt(h, mi, s))
                .expect("generated components are in range")
        },
    )
}

// ============================================================================
// Invariant 1: matches agrees with the regex engine
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn prop_matches_agrees_with_regex(
        line in "[a-c]{0,12}",
        pattern in "[a-c]{1,3}",
    ) {
        let re = Regex::new(&pattern).unwrap();
        let msg = Message::text(line.clone());
        prop_assert_eq!(matches(&msg, &re), re.is_match(&line));

        let card = Message::card("", line.clone());
        prop_assert_eq!(matches(&card, &re), re.is_match(&line));

        let empty = Message::Text { lines: vec![] };
        prop_assert!(!matches(&empty, &re));
    }
}

// ============================================================================
// Invariant 2: Once rewrites only the rightmost occurrence
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn prop_once_rewrites_rightmost(
        parts in prop::collection::vec(arb_filler(), 2..6),
        token in arb_token(),
        replacement in arb_filler(),
    ) {
        let line = parts.join(&token);
        let re = Regex::new(&regex::escape(&token)).unwrap();

        let mut expected = line.clone();
        let last = expected.rfind(&token).unwrap();
        expected.replace_range(last..last + token.len(), &replacement);

        let mut msg = Message::text(line);
        prop_assert_eq!(substitute(&mut msg, &re, &replacement, SubstituteMode::Once), 1);
        prop_assert_eq!(msg, Message::text(expected));
    }
}

// ============================================================================
// Invariant 3: Exhaustive literal substitution equals str::replace
//
// Holds even when the replacement contains the token, which would loop
// forever under whole-field re-matching.
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn prop_exhaustive_equals_replace(
        parts in prop::collection::vec(arb_filler(), 1..6),
        token in arb_token(),
        wrap in any::<bool>(),
    ) {
        let line = parts.join(&token);
        let replacement = if wrap { format!("<{token}>") } else { "_".to_string() };
        let re = Regex::new(&regex::escape(&token)).unwrap();

        let mut msg = Message::text(line.clone());
        let count = substitute(&mut msg, &re, &replacement, SubstituteMode::Exhaustive);
        prop_assert_eq!(count, parts.len() - 1);
        prop_assert_eq!(msg, Message::text(line.replace(&token, &replacement)));
    }
}

// ============================================================================
// Invariant 4: remove_all is idempotent and leaves no SIP trigger
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_remove_all_idempotent(
        lines in prop::collection::vec(arb_triggered_text(), 1..4),
    ) {
        let registry = TriggerRegistry::global();
        let mut response = Response::new(lines.into_iter().map(Message::text).collect());

        registry.remove_all(&mut response);
        let stripped = response.clone();
        prop_assert_eq!(registry.remove_all(&mut response), 0);
        prop_assert_eq!(&response, &stripped);

        for message in &response.messages {
            for trigger in registry.sip() {
                prop_assert!(!matches(message, &trigger.pattern));
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_remove_all_nested_triggers(
        prefix in arb_filler(),
        nested in arb_nested_trigger(),
        suffix in arb_filler(),
    ) {
        let registry = TriggerRegistry::global();
        let mut response = Response::new(vec![Message::text(format!("{prefix}{nested}{suffix}"))]);

        prop_assert!(registry.remove_all(&mut response) >= 1);
        prop_assert_eq!(registry.remove_all(&mut response), 0);
        prop_assert_eq!(&response.messages[0], &Message::text(format!("{prefix}{suffix}")));
    }
}

// ============================================================================
// Invariant 5: timestamps render with the display format
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn prop_reformat_embedded_timestamps(
        prefix in arb_filler(),
        middle in arb_filler(),
        suffix in arb_filler(),
        first in arb_datetime(),
        second in arb_datetime(),
    ) {
        let iso = |d: &chrono::NaiveDateTime| d.format("%Y-%m-%dT%H:%M:%S").to_string();
        let shown = |d: &chrono::NaiveDateTime| d.format(DATE_FORMAT).to_string();

        let mut msg = Message::text(format!("{prefix}{}{middle}{}{suffix}", iso(&first), iso(&second)));
        prop_assert_eq!(reformat(&mut msg).unwrap(), 2);
        prop_assert_eq!(
            msg,
            Message::text(format!("{prefix}{}{middle}{}{suffix}", shown(&first), shown(&second)))
        );
    }
}
