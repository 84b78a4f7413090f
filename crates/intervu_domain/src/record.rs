use serde::{Deserialize, Serialize};

use crate::{Message, TurnEvaluation};

/// A past interview session as stored by the server.
///
/// `messages` and `improvement_keywords` arrive as JSON-encoded strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewRecord {
    pub id: u64,
    pub interview_type: String,
    #[serde(default)]
    pub messages: String,
    #[serde(default)]
    pub overall_score: Option<f64>,
    #[serde(default)]
    pub overall_feedback: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub improvement_keywords: Option<String>,
    #[serde(default)]
    pub turn_evaluations: Vec<TurnEvaluation>,
}

/// Question/answer pair lined up with its evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct RecordTurn<'a> {
    pub evaluation: &'a TurnEvaluation,
    pub question: Option<&'a Message>,
    pub answer: Option<&'a Message>,
}

impl InterviewRecord {
    /// Stored transcript without the trailing unanswered question. An
    /// unreadable transcript yields an empty list.
    pub fn transcript(&self) -> Vec<Message> {
        let mut messages: Vec<Message> = serde_json::from_str(&self.messages).unwrap_or_default();
        if messages.last().is_some_and(Message::is_assistant) {
            messages.pop();
        }
        messages
    }

    pub fn keywords(&self) -> Vec<String> {
        self.improvement_keywords
            .as_deref()
            .and_then(|raw| serde_json::from_str::<Vec<String>>(raw).ok())
            .unwrap_or_default()
            .into_iter()
            .filter(|k| !k.trim().is_empty())
            .collect()
    }

    /// Pairs the n-th evaluation with transcript entries `2n` and `2n + 1`
    pub fn turns<'a>(&'a self, transcript: &'a [Message]) -> Vec<RecordTurn<'a>> {
        self.turn_evaluations
            .iter()
            .enumerate()
            .map(|(idx, evaluation)| RecordTurn {
                evaluation,
                question: transcript.get(idx * 2),
                answer: transcript.get(idx * 2 + 1),
            })
            .collect()
    }
}
