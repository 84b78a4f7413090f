use std::sync::Arc;

use intervu_domain::{ApiRequest, Error, HttpResponse, RefreshRequest, Result, Route, TokenPair};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{CredentialStore, Infrastructure};

pub const REFRESH_PATH: &str = "/auth/jwt/refresh";

/// Request pipeline that attaches the stored bearer token and recovers from
/// an expired access token with a single silent refresh.
///
/// Each request carries its own [`intervu_domain::RetryState`], so a request
/// is refreshed and resent at most once. Concurrent requests that fail
/// together each run their own refresh.
pub struct AuthenticatedClient<I> {
    infra: Arc<I>,
    credentials: CredentialStore<I>,
}

impl<I: Infrastructure> AuthenticatedClient<I> {
    pub fn new(infra: Arc<I>) -> Self {
        let credentials = CredentialStore::new(infra.clone());
        Self { infra, credentials }
    }

    pub fn credentials(&self) -> &CredentialStore<I> {
        &self.credentials
    }

    /// Sends `request` and returns the successful response.
    ///
    /// # Errors
    ///
    /// - [`Error::ReauthenticationRequired`] when the token refresh fails; by
    ///   then both tokens are gone and the navigator points at the login
    ///   route
    /// - [`Error::Unauthorized`] when the resent request is rejected again
    /// - [`Error::Http`] for other non-success statuses
    /// - [`Error::Network`] when no response was received
    pub async fn send(&self, mut request: ApiRequest) -> Result<HttpResponse> {
        request.authorization = self.credentials.access_token().await?;

        loop {
            debug!(method = %request.method, path = %request.path, retry = ?request.retry, "Sending request");
            let response = self.infra.execute(&request).await?;

            if !response.is_auth_failure() {
                return Self::into_result(response);
            }

            if request.retry.advance().is_err() {
                debug!(path = %request.path, status = %response.status, "Rejected after refresh");
                return Err(Error::Unauthorized { status: response.status });
            }

            let tokens = self.refresh_or_sign_out().await?;
            request.authorization = Some(tokens.access_token);
        }
    }

    /// Sends `request` and decodes the `data` of an enveloped body (or the
    /// bare body)
    pub async fn data<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        self.send(request).await?.data()
    }

    /// Sends `request` and decodes the body as-is
    pub async fn json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        self.send(request).await?.decode()
    }

    fn into_result(response: HttpResponse) -> Result<HttpResponse> {
        if response.status.is_success() {
            Ok(response)
        } else {
            Err(response.into_error())
        }
    }

    async fn refresh_or_sign_out(&self) -> Result<TokenPair> {
        match self.refresh().await {
            Ok(tokens) => Ok(tokens),
            Err(error) => {
                warn!(error = %error, "Token refresh failed");
                self.credentials.clear().await?;
                self.infra.navigate(Route::Login.into());
                Err(Error::ReauthenticationRequired)
            }
        }
    }

    /// Exchanges the refresh cookie for a new token pair. Bypasses the
    /// pipeline so a failing refresh can never trigger another refresh.
    async fn refresh(&self) -> Result<TokenPair> {
        let refresh_token = self
            .credentials
            .refresh_token()
            .await?
            .ok_or(Error::MissingRefreshToken)?;

        let request = ApiRequest::post(REFRESH_PATH).json(&RefreshRequest { refresh_token })?;
        let response = Self::into_result(self.infra.execute(&request).await?)?;
        let tokens: TokenPair = response.data()?;

        self.credentials.store(&tokens).await?;
        debug!("Access token refreshed");
        Ok(tokens)
    }
}
