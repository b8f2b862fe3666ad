//! The request pipeline every backend call goes through.
//!
//! ```text
//! HttpRequest ──→ attach_credentials ──→ transport.send ──→ response stage
//!                      ↑                                      │
//!                  session (read)              2xx: decode ───┤──→ Ok(R)
//!                                      otherwise: classify    │
//!                                        → notify             │
//!                                        → clear session?     │
//!                                        → navigate?  ────────┴──→ Err(Api)
//! ```
//!
//! # Concurrency note
//!
//! The session store and the router sit behind `tokio::sync::Mutex`. Each
//! lock is taken for one store or router operation and released before
//! the next `.await` on the network, so a slow request never blocks
//! another caller from reading the session.

use dormdesk_protocol::{Codec, JsonCodec, Role};
use dormdesk_router::{Navigation, Router};
use dormdesk_session::{KeyValueStore, Session, SessionStore};
use dormdesk_transport::{HttpRequest, HttpTransport, RequestId};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::notify::Notifier;
use crate::{ApiFailure, DormdeskError};

/// Adds `Authorization: Bearer <token>` if the session has a token.
///
/// An anonymous session leaves the request exactly as it was.
pub fn attach_credentials(request: HttpRequest, session: &Session) -> HttpRequest {
    match session.token() {
        Some(token) => request.header("authorization", format!("Bearer {token}")),
        None => request,
    }
}

/// Shared client state plus the transport that talks to the backend.
///
/// Wrapped in an `Arc` by [`DormClient`](crate::DormClient) so clones of
/// the client share one session and one router.
pub struct Pipeline<T, N, K: KeyValueStore> {
    transport: T,
    notifier: N,
    codec: JsonCodec,
    session: Mutex<SessionStore<K>>,
    router: Mutex<Router>,
}

impl<T, N, K> Pipeline<T, N, K>
where
    T: HttpTransport,
    N: Notifier,
    K: KeyValueStore,
{
    pub fn new(transport: T, notifier: N, session: SessionStore<K>, router: Router) -> Self {
        Self {
            transport,
            notifier,
            codec: JsonCodec,
            session: Mutex::new(session),
            router: Mutex::new(router),
        }
    }

    /// Runs `request` through every stage and decodes a 2xx body as `R`.
    ///
    /// # Errors
    /// - [`DormdeskError::Api`] for any non-2xx status or transport
    ///   failure, after the failure's reaction has been applied.
    /// - [`DormdeskError::Protocol`] if a 2xx body doesn't decode as `R`.
    ///   No notification is sent for this.
    pub async fn execute<R: DeserializeOwned>(
        &self,
        request: HttpRequest,
    ) -> Result<R, DormdeskError> {
        let session = self.session().await;
        let request = attach_credentials(request, &session);
        let id = request.id;
        tracing::debug!(%id, method = %request.method, path = %request.path, "dispatching request");

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => return Err(self.fail(id, ApiFailure::from_transport(e)).await),
        };

        if !response.is_success() {
            return Err(self.fail(id, ApiFailure::classify(&response)).await);
        }

        self.codec.decode(&response.body).map_err(|e| {
            tracing::warn!(%id, status = response.status, error = %e, "response body has unexpected shape");
            DormdeskError::Protocol(e)
        })
    }

    async fn fail(&self, id: RequestId, failure: ApiFailure) -> DormdeskError {
        tracing::warn!(%id, status = ?failure.status(), ?failure, "request failed");
        self.react(&failure).await;
        DormdeskError::Api(failure)
    }

    /// Applies `failure`'s reaction: notify, then clear the session and
    /// navigate if the reaction says so.
    ///
    /// Storage and navigation problems here are logged, not returned: the
    /// caller is about to receive the failure itself.
    pub async fn react(&self, failure: &ApiFailure) {
        let reaction = failure.reaction();
        self.notifier.notify(reaction.severity, &reaction.message);

        if reaction.clear_session {
            if let Err(e) = self.session.lock().await.clear() {
                tracing::error!(error = %e, "could not remove persisted session");
            }
        }

        if let Some(target) = reaction.redirect_to {
            if let Err(e) = self.navigate(target).await {
                tracing::error!(%target, error = %e, "could not navigate after failure");
            }
        }
    }

    /// A snapshot of the current session.
    pub async fn session(&self) -> Session {
        self.session.lock().await.read()
    }

    /// Replaces the session after a successful login.
    pub async fn set_session(
        &self,
        token: impl Into<String>,
        role: Role,
        subject_id: impl Into<String>,
    ) -> Result<(), DormdeskError> {
        self.session.lock().await.set(token, role, subject_id)?;
        Ok(())
    }

    /// Forgets the session. In memory it's gone even if this errors.
    pub async fn clear_session(&self) -> Result<(), DormdeskError> {
        self.session.lock().await.clear()?;
        Ok(())
    }

    /// Navigates with the session as it is right now.
    pub async fn navigate(&self, target: &str) -> Result<Navigation, DormdeskError> {
        let session = self.session().await;
        let navigation = self.router.lock().await.navigate(target, &session)?;
        Ok(navigation)
    }

    pub async fn current_location(&self) -> Option<String> {
        self.router.lock().await.current().map(str::to_string)
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

// =========================================================================
// Tests
// =========================================================================
