use std::sync::Arc;

use intervu_config::InterviewConfig;
use intervu_domain::{
    ApiRequest, Error, InterviewType, MSG_INVALID_START, Message, Navigation, NextTurnRequest,
    NextTurnResponse, Result, ResultState, Route, Session, SessionState, StartChatRequest,
    StartChatResponse, clean_reply, decode_entities, normalize_answer,
};
use tracing::{debug, info, warn};

use crate::{AuthenticatedClient, Infrastructure};

pub const START_PATH: &str = "/api/interview/chat/start";
pub const NEXT_TURN_PATH: &str = "/api/interview/chat/next";

pub const MSG_TURN_FAILED: &str = "Failed to send your answer. Please try again.";

/// Result of submitting one answer
#[derive(Debug)]
pub enum TurnOutcome {
    /// The interviewer asked the next question
    Reply(String),
    /// The answer was recorded but no question came back. The turn still
    /// counts and the session stays open.
    Failed { notice: String, error: Error },
    /// That was the last answer; the session is over
    Concluded(Navigation),
}

/// Drives one bounded mock interview.
///
/// The transcript only ever grows. Every answer counts towards
/// `max_turns`, whether or not the interviewer replied, and the last answer
/// ends the session locally without another request.
pub struct InterviewController<I> {
    infra: Arc<I>,
    client: Arc<AuthenticatedClient<I>>,
    config: InterviewConfig,
    state: SessionState,
    session: Option<Session>,
    messages: Vec<Message>,
    last_error: Option<String>,
}

impl<I: Infrastructure> InterviewController<I> {
    pub fn new(infra: Arc<I>, client: Arc<AuthenticatedClient<I>>, config: InterviewConfig) -> Self {
        Self {
            infra,
            client,
            config,
            state: SessionState::default(),
            session: None,
            messages: Vec::new(),
            last_error: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn max_turns(&self) -> usize {
        self.config.max_turns
    }

    pub fn turns_left(&self) -> usize {
        let used = self.session.as_ref().map_or(0, |session| session.turn_count);
        self.config.max_turns.saturating_sub(used)
    }

    /// Opens a session and returns the first question
    pub async fn start(&mut self, interview_type: InterviewType) -> Result<&Message> {
        if self.state != SessionState::Idle {
            return Err(Error::InvalidTransition { action: "start", state: self.state });
        }
        self.last_error = None;

        let request =
            ApiRequest::post(START_PATH).json(&StartChatRequest { interview_type: interview_type.clone() })?;
        let response: StartChatResponse = match self.client.json(request).await {
            Ok(response) => response,
            Err(error) => {
                self.last_error = Some(error.user_message());
                return Err(error);
            }
        };

        let Some(session_id) = response.session_id else {
            warn!("Start response carried no session id");
            self.last_error = Some(MSG_INVALID_START.to_string());
            return Err(Error::MalformedPayload(MSG_INVALID_START.to_string()));
        };

        info!(session_id = %session_id, interview_type = %interview_type, "Interview started");
        self.state = SessionState::AwaitingFirstQuestion;
        self.session = Some(Session::new(session_id, interview_type));
        self.messages = vec![Message::assistant(decode_entities(
            response.response.as_deref().unwrap_or_default(),
        ))];
        self.state = SessionState::Conversing;

        Ok(&self.messages[0])
    }

    /// Records an answer and, unless it was the last one, asks for the next
    /// question
    pub async fn send(&mut self, input: &str) -> Result<TurnOutcome> {
        match self.state {
            SessionState::Conversing => {}
            SessionState::Terminated => return Err(Error::SessionNotActive),
            state => return Err(Error::InvalidTransition { action: "send", state }),
        }
        if input.trim().is_empty() {
            return Err(Error::Validation("Please enter an answer.".to_string()));
        }
        let session = self.session.as_mut().ok_or(Error::SessionNotActive)?;

        self.messages.push(Message::user(normalize_answer(input)));
        session.turn_count += 1;
        debug!(turn = session.turn_count, max_turns = self.config.max_turns, "Answer recorded");

        if session.turn_count >= self.config.max_turns {
            return Ok(TurnOutcome::Concluded(self.terminate(true)));
        }

        let request = ApiRequest::post(NEXT_TURN_PATH).json(&NextTurnRequest {
            session_id: session.id.clone(),
            interview_type: session.interview_type.clone(),
            messages: self.messages.clone(),
        })?;

        match self.next_question(request).await {
            Ok(reply) => {
                self.messages.push(Message::assistant(reply.clone()));
                Ok(TurnOutcome::Reply(reply))
            }
            Err(Error::ReauthenticationRequired) => Err(Error::ReauthenticationRequired),
            Err(error) => {
                warn!(error = %error, "Next question could not be fetched");
                self.messages.push(Message::error(MSG_TURN_FAILED));
                Ok(TurnOutcome::Failed { notice: MSG_TURN_FAILED.to_string(), error })
            }
        }
    }

    /// Ends the session early. Nothing happens unless the person confirmed.
    pub fn end(&mut self, confirmed: bool) -> Result<Option<Navigation>> {
        if !confirmed {
            return Ok(None);
        }
        match self.state {
            SessionState::Conversing => Ok(Some(self.terminate(false))),
            SessionState::Terminated => Err(Error::SessionNotActive),
            state => Err(Error::InvalidTransition { action: "end", state }),
        }
    }

    async fn next_question(&self, request: ApiRequest) -> Result<String> {
        let response: NextTurnResponse = self.client.json(request).await?;
        response
            .response
            .map(|reply| clean_reply(&reply))
            .ok_or_else(|| Error::MalformedPayload("Reply carried no question".to_string()))
    }

    fn terminate(&mut self, reached_limit: bool) -> Navigation {
        self.state = SessionState::Terminated;

        let mut navigation = Navigation::to(Route::InterviewResult);
        if let Some(session) = &self.session {
            info!(session_id = %session.id, turns = session.turn_count, "Interview finished");
            navigation = Navigation::result(ResultState {
                session_id: session.id.clone(),
                interview_type: session.interview_type.clone(),
                messages: self.messages.clone(),
            });
        }

        if reached_limit && let Some(closing) = &self.config.conclude_message {
            self.messages.push(Message::assistant(closing.clone()));
        }

        self.infra.navigate(navigation.clone());
        navigation
    }
}
