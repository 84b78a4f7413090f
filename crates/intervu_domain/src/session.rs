use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use derive_more::{Deref, From};
use serde::{Deserialize, Serialize};

/// Server-issued identifier of an interview conversation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, From, Deref)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of mock interview. Anything other than the two built-in kinds is a
/// free-form category understood by the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InterviewType {
    Cs,
    Project,
    Category(String),
}

impl InterviewType {
    pub fn as_str(&self) -> &str {
        match self {
            InterviewType::Cs => "cs",
            InterviewType::Project => "project",
            InterviewType::Category(category) => category,
        }
    }

    pub fn title(&self) -> String {
        match self {
            InterviewType::Cs => "CS fundamentals interview".to_string(),
            InterviewType::Project => "Project experience interview".to_string(),
            InterviewType::Category(category) => format!("{category} interview"),
        }
    }
}

impl From<String> for InterviewType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "cs" => InterviewType::Cs,
            "project" => InterviewType::Project,
            _ => InterviewType::Category(value),
        }
    }
}

impl From<InterviewType> for String {
    fn from(value: InterviewType) -> Self {
        value.as_str().to_string()
    }
}

impl FromStr for InterviewType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.to_string().into())
    }
}

impl fmt::Display for InterviewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum SessionState {
    #[default]
    Idle,
    AwaitingFirstQuestion,
    Conversing,
    Terminated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: SessionId,
    pub interview_type: InterviewType,
    pub turn_count: usize,
}

impl Session {
    pub fn new(id: SessionId, interview_type: InterviewType) -> Self {
        Self { id, interview_type, turn_count: 0 }
    }
}
