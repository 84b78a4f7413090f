use std::sync::Arc;

use intervu_domain::{
    ACCESS_TOKEN_KEY, AccessToken, CookieOptions, REFRESH_TOKEN_COOKIE, RefreshToken, Result,
    TokenPair,
};

use crate::{CookieStore, KeyValueStore};

/// Access token in local storage, refresh token in a cookie
pub struct CredentialStore<I> {
    infra: Arc<I>,
}

impl<I> Clone for CredentialStore<I> {
    fn clone(&self) -> Self {
        Self { infra: self.infra.clone() }
    }
}

impl<I: KeyValueStore + CookieStore> CredentialStore<I> {
    pub fn new(infra: Arc<I>) -> Self {
        Self { infra }
    }

    pub async fn access_token(&self) -> Result<Option<AccessToken>> {
        Ok(self
            .infra
            .get_item(ACCESS_TOKEN_KEY)
            .await?
            .filter(|token| !token.is_empty())
            .map(AccessToken::from))
    }

    pub async fn refresh_token(&self) -> Result<Option<RefreshToken>> {
        Ok(self
            .infra
            .get_cookie(REFRESH_TOKEN_COOKIE)
            .await?
            .filter(|token| !token.is_empty())
            .map(RefreshToken::from))
    }

    pub async fn store(&self, tokens: &TokenPair) -> Result<()> {
        self.infra
            .set_item(ACCESS_TOKEN_KEY, tokens.access_token.as_str())
            .await?;
        self.infra
            .set_cookie(
                REFRESH_TOKEN_COOKIE,
                tokens.refresh_token.as_str(),
                &CookieOptions::refresh_token(),
            )
            .await
    }

    pub async fn clear(&self) -> Result<()> {
        self.infra.remove_item(ACCESS_TOKEN_KEY).await?;
        self.infra.remove_cookie(REFRESH_TOKEN_COOKIE).await
    }

    pub async fn is_logged_in(&self) -> Result<bool> {
        Ok(self.access_token().await?.is_some())
    }
}
