use bytes::Bytes;
use http::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{Error, Result};

/// Raw response as seen by the request pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
    }

    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| Error::MalformedPayload(e.to_string()))
    }

    /// Decodes a body that may or may not be wrapped in the
    /// `{success, message, data}` envelope. An object carrying `success` or
    /// `data` is always treated as an envelope.
    pub fn data<T: DeserializeOwned>(&self) -> Result<T> {
        let value: Value = self.decode()?;
        let is_envelope = value
            .as_object()
            .is_some_and(|object| object.contains_key("success") || object.contains_key("data"));
        if is_envelope {
            Envelope::from_value(value)?.into_data()
        } else {
            from_value(value)
        }
    }

    /// Server-provided error text, if the body carries one
    pub fn error_message(&self) -> Option<String> {
        serde_json::from_slice::<ErrorBody>(&self.body)
            .ok()
            .and_then(|body| body.render())
    }

    /// Converts a non-success response into [`Error::Http`]
    pub fn into_error(self) -> Error {
        let message = self.error_message();
        Error::Http { status: self.status, message }
    }
}

fn from_value<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| Error::MalformedPayload(e.to_string()))
}

/// `{success, message, data}` wrapper used by most endpoints
#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Value,
}

impl Envelope {
    fn from_value(value: Value) -> Result<Self> {
        from_value(value)
    }

    /// `success: false` fails regardless of what `data` holds
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T> {
        if self.success == Some(false) {
            return Err(Error::MalformedPayload(
                self.message.unwrap_or_else(|| "Request was not successful".to_string()),
            ));
        }
        from_value(self.data)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Error body produced by the API on failures
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl ErrorBody {
    fn field_errors(&self) -> Vec<FieldError> {
        self.data
            .clone()
            .and_then(|data| serde_json::from_value::<Vec<FieldError>>(data).ok())
            .unwrap_or_default()
    }

    /// `message (field: reason, ...)` when field errors are present
    pub fn render(&self) -> Option<String> {
        let message = self.message.clone()?;
        let fields = self.field_errors();
        if fields.is_empty() {
            return Some(message);
        }
        let details = fields
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join(", ");
        Some(format!("{message} ({details})"))
    }
}
