use std::fmt;
use std::str::FromStr;

use crate::{Error, InterviewType, Message, SessionId};

/// Client-side screens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Signup,
    Profile,
    StudyMajor,
    StudyInterview,
    StudyInterviewReview,
    InterviewStart,
    Interview,
    InterviewResult,
    Records,
    RecordDetail(String),
    Keyword(String),
}

fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// Percent-decodes a path segment. `+` is literal in a path. A segment that
/// does not decode to UTF-8 is kept as written.
fn decode_segment(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => f.write_str("/"),
            Route::Login => f.write_str("/login"),
            Route::Signup => f.write_str("/signup"),
            Route::Profile => f.write_str("/profile"),
            Route::StudyMajor => f.write_str("/study/major"),
            Route::StudyInterview => f.write_str("/study/interview"),
            Route::StudyInterviewReview => f.write_str("/study/interview/review"),
            Route::InterviewStart => f.write_str("/interview/start"),
            Route::Interview => f.write_str("/interview"),
            Route::InterviewResult => f.write_str("/interview/result"),
            Route::Records => f.write_str("/study/interview/record"),
            Route::RecordDetail(id) => write!(f, "/study/interview/record/{}", encode_segment(id)),
            Route::Keyword(name) => {
                write!(f, "/study/interview/record/keyword/{}", encode_segment(name))
            }
        }
    }
}

impl FromStr for Route {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let route = match segments.as_slice() {
            [] => Route::Home,
            ["login"] => Route::Login,
            ["signup"] => Route::Signup,
            ["profile"] => Route::Profile,
            ["study", "major"] => Route::StudyMajor,
            ["study", "interview"] => Route::StudyInterview,
            ["study", "interview", "review"] => Route::StudyInterviewReview,
            ["interview", "start"] => Route::InterviewStart,
            ["interview"] => Route::Interview,
            ["interview", "result"] => Route::InterviewResult,
            ["study", "interview", "record"] => Route::Records,
            ["study", "interview", "record", "keyword", name] => Route::Keyword(decode_segment(name)),
            ["study", "interview", "record", id] => Route::RecordDetail(decode_segment(id)),
            _ => return Err(Error::Validation(format!("Unknown route: {s}"))),
        };
        Ok(route)
    }
}

/// State carried to the result screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultState {
    pub session_id: SessionId,
    pub interview_type: InterviewType,
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub route: Route,
    pub state: Option<ResultState>,
}

impl Navigation {
    pub fn to(route: Route) -> Self {
        Self { route, state: None }
    }

    pub fn result(state: ResultState) -> Self {
        Self { route: Route::InterviewResult, state: Some(state) }
    }
}

impl From<Route> for Navigation {
    fn from(route: Route) -> Self {
        Navigation::to(route)
    }
}
