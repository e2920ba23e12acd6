//! Authentication access module
//!
//! Signin persists the session token through the injected store on success
//! and clears it on failure; signout clears it locally. No other module
//! touches the token directly.

use serde_json::json;
use tracing::{info, warn};

use crate::client::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::models::{SessionUser, SigninResponse};
use crate::validate::{validate_email, validate_password, validate_signin};

pub struct AuthApi<'a> {
    api: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Sign in with email and password. Credentials are validated locally
    /// first; no network call happens for an empty or malformed form.
    pub async fn signin(&self, email: &str, password: &str) -> ApiResult<SessionUser> {
        validate_signin(email, password)?;

        let result: ApiResult<SigninResponse> = self
            .api
            .post(
                "/auth/user/signin",
                &json!({ "email": email, "password": password }),
            )
            .await;

        match result {
            Ok(response) => {
                self.api
                    .tokens()
                    .save(&response.token)
                    .map_err(|e| ApiError::Storage(e.to_string()))?;
                info!("Signed in as {} ({})", response.user.email, response.user.role);
                Ok(response.user)
            }
            Err(e) => {
                // A failed signin invalidates whatever session was stored
                if let Err(clear_err) = self.api.tokens().clear() {
                    warn!("Failed to clear stored token: {}", clear_err);
                }
                Err(e)
            }
        }
    }

    /// Drop the local session. The server keeps no session state to clear.
    pub fn signout(&self) -> ApiResult<()> {
        self.api
            .tokens()
            .clear()
            .map_err(|e| ApiError::Storage(e.to_string()))
    }

    /// Request a password-reset email.
    pub async fn forgot_password(&self, email: &str) -> ApiResult<()> {
        validate_email(email)?;
        let _: serde_json::Value = self
            .api
            .post("/auth/user/forgot-password/request", &json!({ "email": email }))
            .await?;
        Ok(())
    }

    /// Complete a password reset with the emailed token.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> ApiResult<()> {
        validate_password(new_password)?;
        let _: serde_json::Value = self
            .api
            .post(
                "/auth/user/forgot-password/reset",
                &json!({ "token": token, "newPassword": new_password }),
            )
            .await?;
        Ok(())
    }

    /// Confirm an email address with the token from the verification mail.
    pub async fn verify_email(&self, token: &str) -> ApiResult<()> {
        let _: serde_json::Value = self
            .api
            .post("/auth/user/email/verify", &json!({ "token": token }))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemoryTokenStore, TokenStore};
    use crate::validate::{INVALID_EMAIL, REQUIRED_CREDENTIALS};
    use std::sync::Arc;

    fn offline_client_with_store() -> (ApiClient, Arc<MemoryTokenStore>) {
        let store = Arc::new(MemoryTokenStore::with_token("stale-token"));
        let client = ApiClient::new("http://127.0.0.1:0", store.clone());
        (client, store)
    }

    #[tokio::test]
    async fn empty_password_is_rejected_without_network() {
        let (client, _store) = offline_client_with_store();
        let auth = AuthApi::new(&client);

        let err = auth.signin("hacker@example.com", "").await.unwrap_err();
        assert!(err.is_local());
        assert_eq!(err.to_string(), REQUIRED_CREDENTIALS);
    }

    #[tokio::test]
    async fn malformed_email_is_rejected_without_network() {
        let (client, _store) = offline_client_with_store();
        let auth = AuthApi::new(&client);

        let err = auth.signin("a@b", "Str0ng!Pass").await.unwrap_err();
        assert!(err.is_local());
        assert_eq!(err.to_string(), INVALID_EMAIL);
    }

    #[tokio::test]
    async fn failed_signin_clears_the_stored_token() {
        let (client, store) = offline_client_with_store();
        let auth = AuthApi::new(&client);
        assert!(store.load().is_some());

        // Unroutable server: the request itself fails, and the stale
        // session must be dropped
        let err = auth
            .signin("hacker@example.com", "Str0ng!Pass")
            .await
            .unwrap_err();
        assert!(!err.is_local());
        assert_eq!(store.load(), None);
    }

    #[tokio::test]
    async fn signout_clears_the_stored_token() {
        let (client, store) = offline_client_with_store();
        let auth = AuthApi::new(&client);

        auth.signout().unwrap();
        assert_eq!(store.load(), None);
    }

    #[tokio::test]
    async fn weak_reset_password_is_rejected_locally() {
        let (client, _store) = offline_client_with_store();
        let auth = AuthApi::new(&client);

        let err = auth
            .reset_password("reset-token", "NoSymbol123")
            .await
            .unwrap_err();
        assert!(err.is_local());
    }
}
