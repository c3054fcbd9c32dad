use anyhow::Result;
use reqwest::Client;

use crate::auth;
use crate::config::Config;
use crate::error::AuthError;
use crate::store::{TokenStore, TOKEN_KEY};

/// Session context built at login or restore and threaded explicitly into
/// the query layer. Nothing reads the token from ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn from_token(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Heuristic JWT-shape check: three dot-separated segments.
    pub fn has_jwt_shape(token: &str) -> bool {
        token.split('.').count() == 3
    }

    /// Rebuilds a session from the store. An absent token, or one that does
    /// not look like a JWT, means logged-out; the malformed value is purged
    /// so the next restore starts clean.
    pub fn restore(store: &TokenStore) -> Result<Option<Session>> {
        match store.get(TOKEN_KEY)? {
            Some(token) if Self::has_jwt_shape(&token) => Ok(Some(Session { token })),
            Some(_) => {
                store.remove(TOKEN_KEY)?;
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Signs in and persists the token under the well-known key.
    pub async fn login(
        http: &Client,
        cfg: &Config,
        store: &TokenStore,
        identifier: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let token = auth::signin(http, &cfg.base_url, identifier, password).await?;
        store
            .put(TOKEN_KEY, &token)
            .map_err(|e| AuthError::Store(e.to_string()))?;
        Ok(Session { token })
    }

    /// Drops the stored token. No network call.
    pub fn logout(store: &TokenStore) -> Result<()> {
        store.remove(TOKEN_KEY)
    }
}
