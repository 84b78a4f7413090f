use serde::{Deserialize, Serialize};

use crate::{Error, Result};

const MSG_FIELD_REQUIRED: &str = "Please fill in this field";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }

    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() || self.password.is_empty() {
            return Err(Error::Validation(
                "Please enter both your username and password.".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub nickname: String,
}

impl SignUpForm {
    /// Reports only the first failing field, in form order
    pub fn validate(&self) -> Result<()> {
        let first_error = if self.username.trim().is_empty() {
            Some(format!("username: {MSG_FIELD_REQUIRED}"))
        } else if self.password.is_empty() {
            Some(format!("password: {MSG_FIELD_REQUIRED}"))
        } else if self.confirm_password.is_empty() {
            Some(format!("confirm password: {MSG_FIELD_REQUIRED}"))
        } else if self.password != self.confirm_password {
            Some("confirm password: Passwords do not match".to_string())
        } else if self.nickname.trim().is_empty() {
            Some(format!("nickname: {MSG_FIELD_REQUIRED}"))
        } else {
            None
        };

        match first_error {
            Some(message) => Err(Error::Validation(message)),
            None => Ok(()),
        }
    }

    /// Body for the sign-up endpoint; the confirmation never leaves the
    /// client
    pub fn to_request(&self) -> SignUpRequest {
        SignUpRequest {
            username: self.username.clone(),
            password: self.password.clone(),
            nickname: self.nickname.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignUpRequest {
    pub username: String,
    pub password: String,
    pub nickname: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub username: String,
    pub nickname: String,
    pub role: String,
}
