//! Error types for response rewriting

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RewriteError {
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
    /// `source` is absent when the text is not shaped `YYYY-MM-DDTHH:MM:SS`
    #[error("Cannot parse timestamp {text:?}")]
    Timestamp {
        text: String,
        #[source]
        source: Option<chrono::ParseError>,
    },
    /// Parameters must be a struct (or null for "nothing to merge")
    #[error("Parameters must be a struct, got {0}")]
    InvalidParams(&'static str),
    #[error("Invalid value for {name}: {value:?}")]
    Config { name: &'static str, value: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl RewriteError {
    #[must_use]
    pub fn timestamp(text: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::Timestamp {
            text: text.into(),
            source: Some(source),
        }
    }

    #[must_use]
    pub fn malformed_timestamp(text: impl Into<String>) -> Self {
        Self::Timestamp {
            text: text.into(),
            source: None,
        }
    }
}

pub type RewriteResult<T> = Result<T, RewriteError>;
