use std::sync::Arc;

use http::StatusCode;
use intervu_domain::{
    ApiRequest, Error, LoginForm, Profile, RefreshRequest, Result, Route, SignUpForm, TokenPair,
};
use tracing::{info, warn};

use crate::{AuthenticatedClient, CredentialStore, Infrastructure};

pub const LOGIN_PATH: &str = "/auth/login";
pub const SIGN_UP_PATH: &str = "/auth/signUp";
pub const LOGOUT_PATH: &str = "/auth/logout";
pub const PROFILE_PATH: &str = "/member/profile";

const MSG_BAD_CREDENTIALS: &str = "Invalid username or password.";

pub struct AuthService<I> {
    infra: Arc<I>,
    client: Arc<AuthenticatedClient<I>>,
    credentials: CredentialStore<I>,
}

impl<I: Infrastructure> AuthService<I> {
    pub fn new(infra: Arc<I>, client: Arc<AuthenticatedClient<I>>) -> Self {
        let credentials = client.credentials().clone();
        Self { infra, client, credentials }
    }

    /// Exchanges credentials for a token pair, stores it and moves to the
    /// home route.
    ///
    /// Login goes straight to the transport: a rejected password must not
    /// trigger a token refresh.
    pub async fn login(&self, form: &LoginForm) -> Result<TokenPair> {
        form.validate()?;

        let request = ApiRequest::post(LOGIN_PATH).json(form)?;
        let response = self.infra.execute(&request).await?;
        if response.status == StatusCode::UNAUTHORIZED {
            return Err(Error::Http {
                status: response.status,
                message: Some(MSG_BAD_CREDENTIALS.to_string()),
            });
        }
        if !response.status.is_success() {
            return Err(response.into_error());
        }

        let tokens: TokenPair = response.data()?;
        self.credentials.store(&tokens).await?;
        info!(username = %form.username, "Logged in");
        self.infra.navigate(Route::Home.into());
        Ok(tokens)
    }

    pub async fn sign_up(&self, form: &SignUpForm) -> Result<()> {
        form.validate()?;

        let request = ApiRequest::post(SIGN_UP_PATH).json(&form.to_request())?;
        let response = self.infra.execute(&request).await?;
        if !response.status.is_success() {
            return Err(response.into_error());
        }

        info!(username = %form.username, "Account created");
        self.infra.navigate(Route::Login.into());
        Ok(())
    }

    pub async fn profile(&self) -> Result<Profile> {
        self.client.data(ApiRequest::get(PROFILE_PATH)).await
    }

    /// Revokes the refresh token on the server and forgets both tokens
    /// locally. The local tokens are dropped even when the server call fails.
    /// A failed token refresh on the way leaves the login redirect in place.
    pub async fn logout(&self) -> Result<()> {
        let mut signed_out = false;
        if let Some(refresh_token) = self.credentials.refresh_token().await? {
            let request = ApiRequest::post(LOGOUT_PATH).json(&RefreshRequest { refresh_token })?;
            match self.client.send(request).await {
                Ok(_) => {}
                Err(Error::ReauthenticationRequired) => signed_out = true,
                Err(error) => warn!(error = %error, "Server-side logout failed"),
            }
        }

        self.credentials.clear().await?;
        info!("Logged out");
        if !signed_out {
            self.infra.navigate(Route::Home.into());
        }
        Ok(())
    }

    /// Drops both tokens without telling the server
    pub async fn clear_local_tokens(&self) -> Result<()> {
        self.credentials.clear().await
    }

    pub async fn is_logged_in(&self) -> Result<bool> {
        self.credentials.is_logged_in().await
    }
}

#[cfg(test)]
mod tests {
    use intervu_domain::{ACCESS_TOKEN_KEY, Navigation, REFRESH_TOKEN_COOKIE};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::mock::{MockInfra, Reply};

    fn service(infra: MockInfra) -> (Arc<MockInfra>, AuthService<MockInfra>) {
        let infra = Arc::new(infra);
        let client = Arc::new(AuthenticatedClient::new(infra.clone()));
        (infra.clone(), AuthService::new(infra, client))
    }

    fn sign_up_form() -> SignUpForm {
        SignUpForm {
            username: "alice".to_string(),
            password: "secret".to_string(),
            confirm_password: "secret".to_string(),
            nickname: "ally".to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_stores_tokens_and_goes_home() {
        let (infra, service) = service(MockInfra::default().reply(
            LOGIN_PATH,
            Reply::ok(json!({"success": true, "data": {"accessToken": "A1", "refreshToken": "R1"}})),
        ));

        let actual = service.login(&LoginForm::new("alice", "secret")).await.unwrap();

        assert_eq!(actual, TokenPair::new("A1", "R1"));
        assert_eq!(
            infra.requests_to(LOGIN_PATH)[0].body,
            Some(json!({"username": "alice", "password": "secret"}))
        );
        assert_eq!(infra.item(ACCESS_TOKEN_KEY), Some("A1".to_string()));
        assert_eq!(
            infra.cookie(REFRESH_TOKEN_COOKIE).map(|(value, _)| value),
            Some("R1".to_string())
        );
        assert_eq!(infra.navigations(), vec![Navigation::to(Route::Home)]);
    }

    #[tokio::test]
    async fn test_login_rejected_does_not_refresh() {
        let (infra, service) = service(
            MockInfra::default()
                .with_tokens("A0", "R0")
                .reply(LOGIN_PATH, Reply::Status(401, String::new())),
        );

        let actual = service.login(&LoginForm::new("alice", "wrong")).await.unwrap_err();

        assert_eq!(actual.user_message(), MSG_BAD_CREDENTIALS);
        assert!(infra.requests_to("/auth/jwt/refresh").is_empty());
        assert!(infra.navigations().is_empty());
    }

    #[tokio::test]
    async fn test_login_with_blank_fields_sends_nothing() {
        let (infra, service) = service(MockInfra::default());

        let actual = service.login(&LoginForm::new("  ", "secret")).await;

        assert!(matches!(actual, Err(Error::Validation(_))));
        assert!(infra.requests().is_empty());
    }

    #[tokio::test]
    async fn test_sign_up_omits_confirmation_and_goes_to_login() {
        let (infra, service) =
            service(MockInfra::default().reply(SIGN_UP_PATH, Reply::ok(json!({"success": true}))));

        service.sign_up(&sign_up_form()).await.unwrap();

        assert_eq!(
            infra.requests_to(SIGN_UP_PATH)[0].body,
            Some(json!({"username": "alice", "password": "secret", "nickname": "ally"}))
        );
        assert_eq!(infra.navigations(), vec![Navigation::to(Route::Login)]);
    }

    #[tokio::test]
    async fn test_sign_up_surfaces_field_errors() {
        let (_infra, service) = service(MockInfra::default().reply(
            SIGN_UP_PATH,
            Reply::Status(
                400,
                json!({"message": "Invalid input", "data": [{"field": "username", "message": "too short"}]})
                    .to_string(),
            ),
        ));

        let actual = service.sign_up(&sign_up_form()).await.unwrap_err();

        assert_eq!(actual.user_message(), "Invalid input (username: too short)");
    }

    #[tokio::test]
    async fn test_logout_clears_tokens_even_when_server_fails() {
        let (infra, service) = service(
            MockInfra::default()
                .with_tokens("A1", "R1")
                .reply(LOGOUT_PATH, Reply::NetworkDown),
        );

        service.logout().await.unwrap();

        assert_eq!(
            infra.requests_to(LOGOUT_PATH)[0].body,
            Some(json!({"refreshToken": "R1"}))
        );
        assert_eq!(infra.item(ACCESS_TOKEN_KEY), None);
        assert_eq!(infra.cookie(REFRESH_TOKEN_COOKIE), None);
        assert_eq!(infra.navigations(), vec![Navigation::to(Route::Home)]);
    }

    #[tokio::test]
    async fn test_logout_keeps_login_redirect_after_failed_refresh() {
        let (infra, service) = service(
            MockInfra::default()
                .with_tokens("A1", "R1")
                .reply(LOGOUT_PATH, Reply::Status(401, String::new()))
                .reply("/auth/jwt/refresh", Reply::Status(401, String::new())),
        );

        service.logout().await.unwrap();

        assert_eq!(infra.item(ACCESS_TOKEN_KEY), None);
        assert_eq!(infra.cookie(REFRESH_TOKEN_COOKIE), None);
        assert_eq!(infra.navigations(), vec![Navigation::to(Route::Login)]);
    }

    #[tokio::test]
    async fn test_clear_local_tokens_makes_no_request() {
        let (infra, service) = service(MockInfra::default().with_tokens("A1", "R1"));

        service.clear_local_tokens().await.unwrap();

        assert!(!service.is_logged_in().await.unwrap());
        assert!(infra.requests().is_empty());
    }
}
