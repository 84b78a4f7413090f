use serde::{Deserialize, Serialize};

use crate::{InterviewType, Message, SessionId};

pub const MSG_INVALID_START: &str = "The server response was not valid.";
pub const MSG_INVALID_EVALUATION: &str = "The evaluation data was not in the expected format.";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartChatRequest {
    pub interview_type: InterviewType,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartChatResponse {
    #[serde(default)]
    pub session_id: Option<SessionId>,
    #[serde(default)]
    pub response: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextTurnRequest {
    pub session_id: SessionId,
    pub interview_type: InterviewType,
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NextTurnResponse {
    #[serde(default)]
    pub response: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRequest {
    pub session_id: SessionId,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EvaluationResponse {
    #[serde(default)]
    pub evaluation_report: Option<EvaluationReport>,
}

/// Scored summary of a finished session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub overall_score: f64,
    #[serde(default)]
    pub overall_feedback: String,
    #[serde(default)]
    pub improvement_keywords: Vec<String>,
    #[serde(default)]
    pub turn_evaluations: Vec<TurnEvaluation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnEvaluation {
    pub turn: u32,
    #[serde(default)]
    pub question: Option<String>,
    pub score: f64,
    #[serde(default)]
    pub feedback: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn of(score: f64) -> Self {
        if score >= 80.0 {
            ScoreBand::Excellent
        } else if score >= 60.0 {
            ScoreBand::Good
        } else if score >= 40.0 {
            ScoreBand::Fair
        } else {
            ScoreBand::Poor
        }
    }
}
