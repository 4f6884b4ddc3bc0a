//! Rewrite pipeline applied to a response before it is surfaced
//!
//! Order of steps:
//! 1. record triggers (both the keyed and the flat view)
//! 2. inject configured parameters
//! 3. strip SIP triggers
//! 4. reformat timestamps
//!
//! Triggers are recorded before stripping so their payloads survive in the
//! report.

use crate::config::RewriteConfig;
use crate::error::RewriteResult;
use crate::model::Response;
use crate::params;
use crate::rewrite;
use crate::triggers::{TriggerHits, TriggerRegistry, TriggerReport};
use serde::Serialize;

/// What the pipeline found and changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub triggers: TriggerHits,
    pub sip: TriggerReport,
    pub contexts_updated: usize,
    pub triggers_removed: usize,
    pub dates_reformatted: usize,
}

pub struct Pipeline<'a> {
    registry: &'a TriggerRegistry,
    config: RewriteConfig,
}

impl Pipeline<'static> {
    /// Pipeline over the built-in trigger registry
    #[must_use]
    pub fn new(config: RewriteConfig) -> Self {
        Self::with_registry(TriggerRegistry::global(), config)
    }
}

impl<'a> Pipeline<'a> {
    #[must_use]
    pub fn with_registry(registry: &'a TriggerRegistry, config: RewriteConfig) -> Self {
        Self { registry, config }
    }

    #[must_use]
    pub fn config(&self) -> &RewriteConfig {
        &self.config
    }

    /// Run every configured step against `response` in place
    ///
    /// # Errors
    /// Returns `RewriteError::InvalidParams` if the configured params are not
    /// a struct and `RewriteError::Timestamp` for a malformed timestamp.
    pub fn process(&self, response: &mut Response) -> RewriteResult<PipelineReport> {
        let mut report = PipelineReport {
            session_id: response.session_id().map(str::to_string),
            triggers: self.registry.scan(response),
            sip: self.registry.scan_flat(response),
            ..PipelineReport::default()
        };

        if !report.sip.is_empty() {
            tracing::info!(
                session = ?report.session_id,
                triggers = ?report.sip.names,
                "Found SIP triggers"
            );
        }

        if let Some(inject) = &self.config.inject {
            report.contexts_updated = params::set_params(response, &inject.params, &inject.context)?;
        }
        if self.config.strip_triggers {
            report.triggers_removed = self.registry.remove_all(response);
        }
        if self.config.format_dates {
            report.dates_reformatted = rewrite::reformat_dates(response)?;
        }
        Ok(report)
    }
}
