use http::StatusCode;

use crate::SessionState;

pub const MSG_NETWORK: &str = "Cannot reach the server. Please check your network connection.";
pub const MSG_SESSION_EXPIRED: &str = "Your session has expired. Please log in again.";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Local input check failed; nothing was sent
    #[error("{0}")]
    Validation(String),

    /// 401/403 that survived the single token refresh
    #[error("Request was rejected with status {status}")]
    Unauthorized { status: StatusCode },

    /// Token refresh failed; credentials were cleared and the client was
    /// sent back to the login route
    #[error("Token refresh failed, re-authentication required")]
    ReauthenticationRequired,

    #[error("Server responded with {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Http {
        status: StatusCode,
        message: Option<String>,
    },

    /// No response was received at all
    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed response: {0}")]
    MalformedPayload(String),

    #[error("No refresh token is stored")]
    MissingRefreshToken,

    #[error("Request was already retried after a token refresh")]
    RetryExhausted,

    #[error("Interview session is not active")]
    SessionNotActive,

    #[error("Cannot {action} while the interview is {state}")]
    InvalidTransition {
        action: &'static str,
        state: SessionState,
    },

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Text suitable for showing to the person using the client.
    ///
    /// Distinguishes a server that answered with an error from one that
    /// could not be reached.
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation(message) | Error::MalformedPayload(message) => message.clone(),
            Error::Unauthorized { .. } => "You are not allowed to perform this action.".to_string(),
            Error::ReauthenticationRequired | Error::MissingRefreshToken => {
                MSG_SESSION_EXPIRED.to_string()
            }
            Error::Http { message: Some(message), .. } => message.clone(),
            Error::Http { status, message: None } => {
                format!("The server returned an error. ({})", status.as_u16())
            }
            Error::Network(_) => MSG_NETWORK.to_string(),
            Error::RetryExhausted => "The request could not be completed.".to_string(),
            Error::SessionNotActive => "The interview has already ended.".to_string(),
            Error::InvalidTransition { .. } | Error::Storage(_) => {
                "Something went wrong while processing the request.".to_string()
            }
        }
    }
}
