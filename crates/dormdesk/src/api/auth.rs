//! `/auth/...`: getting in and out.

use dormdesk_protocol::{CurrentUser, StudentRegistration, TokenResponse};
use dormdesk_router::LOGIN_PATH;
use dormdesk_session::KeyValueStore;
use dormdesk_transport::{HttpRequest, HttpTransport, RequestBody};
use serde::de::IgnoredAny;

use super::with_json;
use crate::notify::{Notifier, Severity};
use crate::{DormClient, DormdeskError};

pub struct AuthApi<'a, T: HttpTransport, N: Notifier, K: KeyValueStore> {
    client: &'a DormClient<T, N, K>,
}

impl<'a, T, N, K> AuthApi<'a, T, N, K>
where
    T: HttpTransport,
    N: Notifier,
    K: KeyValueStore,
{
    pub(crate) fn new(client: &'a DormClient<T, N, K>) -> Self {
        Self { client }
    }

    /// Logs in with a username (student id or admin username) and password.
    ///
    /// On success the session is replaced, "Login successful" is notified,
    /// and the client navigates to the role's home. A wrong password comes
    /// back as a 401, which the pipeline already reacted to.
    ///
    /// # Errors
    /// Any pipeline error, or [`DormdeskError::Session`] if the new session
    /// couldn't be persisted (in which case nothing changed).
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, DormdeskError> {
        let request = HttpRequest::post("/auth/login").body(RequestBody::Form(vec![
            ("username".to_string(), username.to_string()),
            ("password".to_string(), password.to_string()),
        ]));
        let token: TokenResponse = self.client.call(request).await?;

        let pipeline = self.client.pipeline();
        pipeline
            .set_session(token.access_token.clone(), token.user_type, token.user_id.clone())
            .await?;
        tracing::info!(role = %token.user_type, subject = %token.user_id, "logged in");
        pipeline
            .notifier()
            .notify(Severity::Success, "Login successful");
        pipeline.navigate(token.user_type.home()).await?;

        Ok(token)
    }

    /// Creates a student account. Does not log in.
    pub async fn register(&self, registration: &StudentRegistration) -> Result<(), DormdeskError> {
        let request = with_json(HttpRequest::post("/auth/register"), registration)?;
        let _: IgnoredAny = self.client.call(request).await?;
        tracing::info!(student = %registration.student_id, "registered");
        Ok(())
    }

    /// Who the backend thinks the token belongs to.
    pub async fn current_user(&self) -> Result<CurrentUser, DormdeskError> {
        self.client.call(HttpRequest::get("/auth/me")).await
    }

    /// Tells the backend, then forgets the session and goes to `/login`.
    ///
    /// The local session is cleared and the client navigates even if the
    /// backend call failed.
    ///
    /// # Errors
    /// The backend call's failure if there was one; otherwise a storage or
    /// navigation error from the local cleanup.
    pub async fn logout(&self) -> Result<(), DormdeskError> {
        let remote: Result<IgnoredAny, DormdeskError> =
            self.client.call(HttpRequest::post("/auth/logout")).await;

        let pipeline = self.client.pipeline();
        let cleared = pipeline.clear_session().await;
        let navigated = pipeline.navigate(LOGIN_PATH).await;
        tracing::info!(remote_ok = remote.is_ok(), "logged out");

        remote?;
        cleared?;
        navigated?;
        Ok(())
    }
}
