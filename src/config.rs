//! Configuration for the rewrite pipeline

use crate::error::{RewriteError, RewriteResult};
use crate::model::ParamValue;
use crate::params::parameters_from_json;

pub const STRIP_TRIGGERS_VAR: &str = "REWRITE_STRIP_TRIGGERS";
pub const FORMAT_DATES_VAR: &str = "REWRITE_FORMAT_DATES";
pub const CONTEXT_VAR: &str = "REWRITE_CONTEXT";
pub const PARAMS_VAR: &str = "REWRITE_PARAMS";
pub const PRETTY_VAR: &str = "REWRITE_PRETTY";

/// Parameters to merge into a named context before the response goes out
#[derive(Debug, Clone, PartialEq)]
pub struct ParamInjection {
    pub context: String,
    pub params: ParamValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RewriteConfig {
    pub strip_triggers: bool,
    pub format_dates: bool,
    pub inject: Option<ParamInjection>,
    /// Pretty-print JSON output (CLI only)
    pub pretty: bool,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            strip_triggers: true,
            format_dates: true,
            inject: None,
            pretty: false,
        }
    }
}

impl RewriteConfig {
    /// Read configuration from the process environment
    ///
    /// # Errors
    /// See [`RewriteConfig::from_vars`].
    pub fn from_env() -> RewriteResult<Self> {
        Self::from_vars(std::env::vars())
    }

    /// Build configuration from `(name, value)` pairs; unknown names are ignored
    ///
    /// # Errors
    /// Returns `RewriteError::Config` for an unparsable flag, for params
    /// without a target context, and `RewriteError::Json` or
    /// `RewriteError::InvalidParams` for a bad params document.
    pub fn from_vars<I, K, V>(vars: I) -> RewriteResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut config = Self::default();
        let mut context = None;
        let mut params = None;

        for (name, value) in vars {
            let value = value.into();
            match name.as_ref() {
                STRIP_TRIGGERS_VAR => config.strip_triggers = parse_flag(STRIP_TRIGGERS_VAR, &value)?,
                FORMAT_DATES_VAR => config.format_dates = parse_flag(FORMAT_DATES_VAR, &value)?,
                PRETTY_VAR => config.pretty = parse_flag(PRETTY_VAR, &value)?,
                CONTEXT_VAR if !value.trim().is_empty() => context = Some(value),
                PARAMS_VAR if !value.trim().is_empty() => {
                    params = Some(parameters_from_json(serde_json::from_str(&value)?)?);
                }
                _ => {}
            }
        }

        config.inject = match (context, params) {
            (Some(context), Some(params)) => Some(ParamInjection { context, params }),
            (None, Some(params)) => {
                return Err(RewriteError::Config {
                    name: CONTEXT_VAR,
                    value: format!("unset while {PARAMS_VAR} is {}", params.kind()),
                })
            }
            _ => None,
        };
        Ok(config)
    }
}

fn parse_flag(name: &'static str, value: &str) -> RewriteResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(RewriteError::Config {
            name,
            value: value.to_string(),
        }),
    }
}
