//! Response model handed over by the conversational backend
//!
//! A [`Response`] aggregates fulfillment messages and named contexts. Only
//! two message variants carry text this crate reads or rewrites: the first
//! line of a [`Message::Text`] and the subtitle of a [`Message::Card`].

mod value;

pub use value::{ParamValue, Parameters};

use crate::error::RewriteResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Diagnostic key holding the backend session id
pub const SESSION_ID_KEY: &str = "sessionId";

/// One unit of reply content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    Text {
        #[serde(default)]
        lines: Vec<String>,
    },
    Card {
        #[serde(default)]
        title: String,
        #[serde(default)]
        subtitle: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image_uri: Option<String>,
    },
    QuickReplies {
        #[serde(default)]
        title: String,
        #[serde(default)]
        replies: Vec<String>,
    },
    Image {
        image_uri: String,
    },
    Payload {
        payload: ParamValue,
    },
}

impl Message {
    #[must_use]
    pub fn text(line: impl Into<String>) -> Self {
        Message::Text {
            lines: vec![line.into()],
        }
    }

    #[must_use]
    pub fn card(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Message::Card {
            title: title.into(),
            subtitle: subtitle.into(),
            image_uri: None,
        }
    }

    /// The textual field this crate operates on, if the variant has one
    #[must_use]
    pub fn text_field(&self) -> Option<&str> {
        match self {
            Message::Text { lines } => lines.first().map(String::as_str),
            Message::Card { subtitle, .. } => Some(subtitle),
            _ => None,
        }
    }

    /// Mutable access to the textual field; never changes the variant
    pub fn text_field_mut(&mut self) -> Option<&mut String> {
        match self {
            Message::Text { lines } => lines.first_mut(),
            Message::Card { subtitle, .. } => Some(subtitle),
            _ => None,
        }
    }

    /// True for a text message with at least one line.
    ///
    /// Response-wide scans use this as their guard, so cards are skipped there.
    #[must_use]
    pub fn has_text_lines(&self) -> bool {
        matches!(self, Message::Text { lines } if !lines.is_empty())
    }
}

/// Named bag of parameters attached to a response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Context {
    pub name: String,
    #[serde(default)]
    pub parameters: Parameters,
}

impl Context {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Parameters::new(),
        }
    }

    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }
}

/// Response of one detect-intent cycle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub contexts: Vec<Context>,
    #[serde(default)]
    pub diagnostic_info: Parameters,
}

impl Response {
    #[must_use]
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_context(mut self, context: Context) -> Self {
        self.contexts.push(context);
        self
    }

    /// Parse a response from its JSON form
    ///
    /// # Errors
    /// Returns `RewriteError::Json` if the document is not a valid response.
    pub fn from_json(raw: &str) -> RewriteResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Load a response from a JSON file
    ///
    /// # Errors
    /// Returns `RewriteError::Io` if the file cannot be read and
    /// `RewriteError::Json` if it is not a valid response.
    pub fn from_path<P: AsRef<Path>>(path: P) -> RewriteResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Backend session id recorded in the diagnostic info
    #[must_use]
    pub fn session_id(&self) -> Option<&str> {
        self.diagnostic_info
            .get(SESSION_ID_KEY)
            .and_then(ParamValue::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_text_field_reads_first_line_only() {
        let msg = Message::Text {
            lines: vec!["first".into(), "second".into()],
        };
        assert_eq!(msg.text_field(), Some("first"));
        assert!(msg.has_text_lines());
    }

    #[test]
    fn test_text_field_absent_for_empty_and_non_content() {
        let empty = Message::Text { lines: vec![] };
        assert_eq!(empty.text_field(), None);
        assert!(!empty.has_text_lines());

        let image = Message::Image {
            image_uri: "https://example.com/a.png".into(),
        };
        assert_eq!(image.text_field(), None);
    }

    #[test]
    fn test_card_exposes_subtitle() {
        let mut card = Message::card("Title", "Sub");
        assert_eq!(card.text_field(), Some("Sub"));
        assert!(!card.has_text_lines());

        card.text_field_mut().unwrap().push_str("title");
        assert_eq!(card, Message::card("Title", "Subtitle"));
    }

    #[test]
    fn test_deserialize_wire_shape() {
        let raw = r#"{
            "messages": [
                {"type": "text", "lines": ["Hello"]},
                {"type": "card", "title": "T", "subtitle": "S"},
                {"type": "quick_replies", "replies": ["yes", "no"]}
            ],
            "contexts": [{"name": "order-context", "parameters": {"size": "large"}}],
            "diagnosticInfo": {"sessionId": "abc-123"}
        }"#;
        let response = Response::from_json(raw).unwrap();
        assert_eq!(response.messages.len(), 3);
        assert_eq!(response.messages[0], Message::text("Hello"));
        assert_eq!(response.contexts[0].parameters["size"], ParamValue::from("large"));
        assert_eq!(response.session_id(), Some("abc-123"));
    }

    #[test]
    fn test_session_id_absent() {
        assert_eq!(Response::default().session_id(), None);
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"messages": [{{"type": "text", "lines": ["hi"]}}]}}"#).unwrap();

        let response = Response::from_path(file.path()).unwrap();
        assert_eq!(response.messages, vec![Message::text("hi")]);
        assert!(response.contexts.is_empty());
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Response::from_path(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, crate::RewriteError::Io(_)));
    }
}
