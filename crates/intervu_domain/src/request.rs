use http::Method;
use serde::Serialize;

use crate::{AccessToken, Error, Result};

/// Per-request retry bookkeeping for the token-refresh interceptor.
///
/// The only legal transition is `Initial -> RefreshAttempted`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RetryState {
    #[default]
    Initial,
    RefreshAttempted,
}

impl RetryState {
    pub fn advance(&mut self) -> Result<()> {
        match self {
            RetryState::Initial => {
                *self = RetryState::RefreshAttempted;
                Ok(())
            }
            RetryState::RefreshAttempted => Err(Error::RetryExhausted),
        }
    }
}

/// Description of an outgoing API call, relative to the configured base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    pub authorization: Option<AccessToken>,
    pub retry: RetryState,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            authorization: None,
            retry: RetryState::Initial,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| Error::Validation(format!("Request body could not be encoded: {e}")))?;
        self.body = Some(value);
        Ok(self)
    }

}
