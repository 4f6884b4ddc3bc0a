//! Response rewriter - post-processing for conversational-AI responses
//!
//! Detects and strips embedded trigger sequences, reformats timestamps for
//! display and manages parameters on a response's named contexts. Every
//! operation mutates or inspects a caller-owned [`Response`] in place.

pub mod config;
mod error;
pub mod model;
pub mod params;
pub mod pattern;
pub mod pipeline;
pub mod rewrite;
pub mod triggers;

pub use config::RewriteConfig;
pub use error::{RewriteError, RewriteResult};
pub use model::{Context, Message, ParamValue, Parameters, Response};
pub use pattern::{SubstituteMode, DATE_FORMAT};
pub use pipeline::{Pipeline, PipelineReport};
pub use triggers::{QueryTrigger, SipTrigger, Trigger, TriggerKind, TriggerRegistry, TriggerReport};
