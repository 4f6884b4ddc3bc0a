//! Trigger detection and stripping across a response

use super::{TriggerHits, TriggerRegistry};
use crate::model::{Message, Response};
use crate::pattern::{self, SubstituteMode};
use serde::Serialize;

/// Flat view of the SIP triggers found in a response.
///
/// `names` gets one entry per (message, trigger) hit while `contents` gets
/// every captured payload, so the two lists line up only in aggregate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TriggerReport {
    pub names: Vec<String>,
    pub contents: Vec<String>,
}

impl TriggerReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl TriggerRegistry {
    /// Triggers found in one message, SIP then query
    #[must_use]
    pub fn scan_message(&self, message: &Message) -> TriggerHits {
        let mut hits = TriggerHits::new();
        for trigger in self.iter() {
            if pattern::matches(message, &trigger.pattern) {
                hits.insert(
                    trigger.name.to_string(),
                    pattern::extract(message, &trigger.pattern),
                );
            }
        }
        hits
    }

    /// Triggers found in any message, keyed by name.
    ///
    /// When several messages hit the same trigger the last one wins.
    #[must_use]
    pub fn scan(&self, response: &Response) -> TriggerHits {
        let mut hits = TriggerHits::new();
        for message in &response.messages {
            hits.extend(self.scan_message(message));
        }
        hits
    }

    /// SIP triggers found in text messages, accumulated in message order
    #[must_use]
    pub fn scan_flat(&self, response: &Response) -> TriggerReport {
        let mut report = TriggerReport::default();
        for message in response.messages.iter().filter(|m| m.has_text_lines()) {
            for trigger in self.sip() {
                if pattern::matches(message, &trigger.pattern) {
                    report.names.push(trigger.name.to_string());
                    report
                        .contents
                        .extend(pattern::extract(message, &trigger.pattern));
                }
            }
        }
        report
    }

    /// Strip every SIP trigger from the text messages of a response.
    ///
    /// Returns the number of trigger occurrences removed; a second call
    /// removes nothing. Each message is swept until a full round over the
    /// SIP triggers removes nothing, since removing one trigger can join the
    /// text around it into another.
    pub fn remove_all(&self, response: &mut Response) -> usize {
        let mut removed = 0;
        for message in response.messages.iter_mut().filter(|m| m.has_text_lines()) {
            loop {
                let round: usize = self
                    .sip()
                    .iter()
                    .map(|trigger| {
                        pattern::substitute(
                            message,
                            &trigger.pattern,
                            "",
                            SubstituteMode::Exhaustive,
                        )
                    })
                    .sum();
                if round == 0 {
                    break;
                }
                removed += round;
            }
        }
        if removed > 0 {
            tracing::info!(removed, "Removed triggers from response");
        }
        removed
    }
}
