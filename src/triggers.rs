//! Control sequences embedded in generated replies
//!
//! Triggers come in two fixed sets: SIP triggers drive the telephony side
//! (handover, hangup, audio playback) and are stripped before a reply is
//! surfaced; query triggers ask the caller to re-query the backend. Both sets
//! share the `$<family>.<action>(<args>)` shape, and the argument list,
//! parentheses included, is the captured payload.

mod scanner;

pub use scanner::TriggerReport;

use crate::error::RewriteResult;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Payloads captured per trigger name
pub type TriggerHits = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerKind {
    Sip,
    Query,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SipTrigger {
    Handover,
    Hangup,
    PlayFile,
    Pause,
    SendDtmf,
}

impl SipTrigger {
    pub const ALL: [SipTrigger; 5] = [
        SipTrigger::Handover,
        SipTrigger::Hangup,
        SipTrigger::PlayFile,
        SipTrigger::Pause,
        SipTrigger::SendDtmf,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            SipTrigger::Handover => "sip.handover",
            SipTrigger::Hangup => "sip.hangup",
            SipTrigger::PlayFile => "sip.play_file",
            SipTrigger::Pause => "sip.pause",
            SipTrigger::SendDtmf => "sip.send_dtmf",
        }
    }

    #[must_use]
    pub fn pattern(self) -> &'static str {
        match self {
            SipTrigger::Handover => r"\$sip\.handover(\([^()]*\))",
            SipTrigger::Hangup => r"\$sip\.hangup(\([^()]*\))",
            SipTrigger::PlayFile => r"\$sip\.play_file(\([^()]*\))",
            SipTrigger::Pause => r"\$sip\.pause(\([^()]*\))",
            SipTrigger::SendDtmf => r"\$sip\.send_dtmf(\([^()]*\))",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryTrigger {
    TriggerIntent,
    ResetSession,
    SetLanguage,
}

impl QueryTrigger {
    pub const ALL: [QueryTrigger; 3] = [
        QueryTrigger::TriggerIntent,
        QueryTrigger::ResetSession,
        QueryTrigger::SetLanguage,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            QueryTrigger::TriggerIntent => "query.trigger_intent",
            QueryTrigger::ResetSession => "query.reset_session",
            QueryTrigger::SetLanguage => "query.set_language",
        }
    }

    #[must_use]
    pub fn pattern(self) -> &'static str {
        match self {
            QueryTrigger::TriggerIntent => r"\$query\.trigger_intent(\([^()]*\))",
            QueryTrigger::ResetSession => r"\$query\.reset_session(\([^()]*\))",
            QueryTrigger::SetLanguage => r"\$query\.set_language(\([^()]*\))",
        }
    }
}

/// A named, compiled trigger pattern
#[derive(Debug, Clone)]
pub struct Trigger {
    pub name: &'static str,
    pub kind: TriggerKind,
    pub pattern: Regex,
}

impl Trigger {
    /// Compile a trigger
    ///
    /// # Errors
    /// Returns `RewriteError::Pattern` if `pattern` is not a valid regex.
    pub fn new(name: &'static str, kind: TriggerKind, pattern: &str) -> RewriteResult<Self> {
        Ok(Self {
            name,
            kind,
            pattern: Regex::new(pattern)?,
        })
    }
}

static GLOBAL: LazyLock<TriggerRegistry> = LazyLock::new(|| {
    TriggerRegistry::new().expect("built-in trigger patterns are valid regexes")
});

/// Immutable table of every recognized trigger, SIP first
#[derive(Debug, Clone)]
pub struct TriggerRegistry {
    sip: Vec<Trigger>,
    query: Vec<Trigger>,
}

impl TriggerRegistry {
    /// Compile the built-in trigger sets
    ///
    /// # Errors
    /// Returns `RewriteError::Pattern` if a built-in pattern fails to compile.
    pub fn new() -> RewriteResult<Self> {
        let sip = SipTrigger::ALL
            .iter()
            .map(|t| Trigger::new(t.name(), TriggerKind::Sip, t.pattern()))
            .collect::<RewriteResult<Vec<_>>>()?;
        let query = QueryTrigger::ALL
            .iter()
            .map(|t| Trigger::new(t.name(), TriggerKind::Query, t.pattern()))
            .collect::<RewriteResult<Vec<_>>>()?;
        Ok(Self { sip, query })
    }

    /// Process-wide registry, compiled on first use
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    #[must_use]
    pub fn sip(&self) -> &[Trigger] {
        &self.sip
    }

    #[must_use]
    pub fn query(&self) -> &[Trigger] {
        &self.query
    }

    /// All triggers in registry order
    pub fn iter(&self) -> impl Iterator<Item = &Trigger> {
        self.sip.iter().chain(self.query.iter())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Trigger> {
        self.iter().find(|t| t.name == name)
    }
}
