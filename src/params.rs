//! Context parameter store
//!
//! Reads, merges and deletes parameters on the named contexts of a
//! [`Response`]. Lookups take the first context with a matching name;
//! writes touch every one.

use crate::error::{RewriteError, RewriteResult};
use crate::model::{Context, ParamValue, Response};

/// First context named `context_name`
#[must_use]
pub fn get_context<'a>(response: &'a Response, context_name: &str) -> Option<&'a Context> {
    tracing::debug!(context = %context_name, "Searching for context");
    let context = response.contexts.iter().find(|c| c.name == context_name);
    tracing::debug!(context = %context_name, found = context.is_some(), "Context lookup done");
    context
}

/// Value of `param_name` in the first context named `context_name`
#[must_use]
pub fn get_param<'a>(
    response: &'a Response,
    param_name: &str,
    context_name: &str,
) -> Option<&'a ParamValue> {
    let value = get_context(response, context_name)?.parameters.get(param_name);
    tracing::debug!(
        param = %param_name,
        context = %context_name,
        found = value.is_some(),
        "Parameter lookup done"
    );
    value
}

/// Merge a struct of parameters into every context named `context_name`.
///
/// Existing keys are overwritten. `Null` merges nothing. Returns the number
/// of contexts updated.
///
/// # Errors
/// Returns `RewriteError::InvalidParams` if `params` is neither a struct nor null.
pub fn set_params(
    response: &mut Response,
    params: &ParamValue,
    context_name: &str,
) -> RewriteResult<usize> {
    let entries = match params {
        ParamValue::Struct(entries) => entries,
        ParamValue::Null => return Ok(0),
        other => return Err(RewriteError::InvalidParams(other.kind())),
    };

    tracing::info!(
        params = ?entries.keys().collect::<Vec<_>>(),
        context = %context_name,
        "Adding parameters to response"
    );

    let mut updated = 0;
    for context in response
        .contexts
        .iter_mut()
        .filter(|c| c.name == context_name)
    {
        context
            .parameters
            .extend(entries.iter().map(|(k, v)| (k.clone(), v.clone())));
        updated += 1;
    }
    Ok(updated)
}

/// Remove `param_name` from every context holding it; returns the removal count
pub fn delete_param(response: &mut Response, param_name: &str) -> usize {
    tracing::info!(param = %param_name, "Deleting parameter from response");
    response
        .contexts
        .iter_mut()
        .filter_map(|c| c.parameters.remove(param_name))
        .count()
}

/// Build a parameter struct from a JSON object.
///
/// `null` gives `ParamValue::Null`, which [`set_params`] treats as "nothing
/// to merge".
///
/// # Errors
/// Returns `RewriteError::InvalidParams` for any other non-object value.
pub fn parameters_from_json(value: serde_json::Value) -> RewriteResult<ParamValue> {
    match value {
        serde_json::Value::Object(_) | serde_json::Value::Null => Ok(ParamValue::from(value)),
        other => Err(RewriteError::InvalidParams(ParamValue::from(other).kind())),
    }
}
