use std::fmt;

use derive_more::{AsRef, Deref, From};
use serde::{Deserialize, Serialize};

/// Local storage key holding the access token
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
/// Cookie name holding the refresh token
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, From, Deref, AsRef)]
#[serde(transparent)]
pub struct AccessToken(String);

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, From, Deref, AsRef)]
#[serde(transparent)]
pub struct RefreshToken(String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Authorization` header value
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl RefreshToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AccessToken {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for RefreshToken {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RefreshToken([REDACTED])")
    }
}

/// Token pair returned by login and refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: AccessToken,
    pub refresh_token: RefreshToken,
}

impl TokenPair {
    pub fn new(access_token: impl Into<AccessToken>, refresh_token: impl Into<RefreshToken>) -> Self {
        Self { access_token: access_token.into(), refresh_token: refresh_token.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: RefreshToken,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CookieOptions {
    pub path: String,
    pub secure: bool,
    pub same_site: SameSite,
}

impl CookieOptions {
    /// Attributes used for the refresh-token cookie
    pub fn refresh_token() -> Self {
        Self { path: "/".to_string(), secure: true, same_site: SameSite::Lax }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_token_pair_wire_format() {
        let fixture = serde_json::json!({"accessToken": "A1", "refreshToken": "R1"});

        let actual: TokenPair = serde_json::from_value(fixture).unwrap();

        assert_eq!(actual, TokenPair::new("A1", "R1"));
        assert_eq!(actual.access_token.bearer(), "Bearer A1");
    }

    #[test]
    fn test_tokens_are_redacted_in_debug_output() {
        let fixture = TokenPair::new("secret-access", "secret-refresh");

        let actual = format!("{fixture:?}");

        assert!(!actual.contains("secret"));
    }
}
