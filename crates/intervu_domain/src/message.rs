use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    /// Local-only failure notice shown in the transcript
    Error,
}

/// One entry of an interview transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self { role, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self::new(Role::Error, content)
    }

    pub fn is_assistant(&self) -> bool {
        self.role == Role::Assistant
    }
}

/// Replaces real line breaks and the escaped `\n` sequence the model
/// sometimes emits with single spaces
pub fn collapse_line_breaks(text: &str) -> String {
    text.replace("\\n", " ")
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
}

/// Prepares a typed answer for the transcript
pub fn normalize_answer(input: &str) -> String {
    collapse_line_breaks(input.trim())
}

pub fn decode_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

/// Prepares a model reply for the transcript
pub fn clean_reply(text: &str) -> String {
    decode_entities(&collapse_line_breaks(text))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_normalize_answer_collapses_breaks() {
        let fixture = "  Round robin\nuses a\\nfixed quantum\r\n ";

        let actual = normalize_answer(fixture);

        assert_eq!(actual, "Round robin uses a fixed quantum");
    }

    #[test]
    fn test_clean_reply_decodes_entities() {
        let fixture = "What&#39;s the difference between\n&lt;process&gt; &amp; thread?";

        let actual = clean_reply(fixture);

        assert_eq!(actual, "What's the difference between <process> & thread?");
    }

    #[test]
    fn test_role_wire_format() {
        let fixture = vec![Message::user("a"), Message::assistant("b"), Message::error("c")];

        let actual = serde_json::to_value(&fixture).unwrap();

        assert_eq!(
            actual,
            serde_json::json!([
                {"role": "user", "content": "a"},
                {"role": "assistant", "content": "b"},
                {"role": "error", "content": "c"}
            ])
        );
    }
}
