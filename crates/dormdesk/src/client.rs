//! `DormClient` and its builder.
//!
//! This is the entry point for talking to the backend. It ties together
//! all the layers: transport → protocol → session → router.

use std::sync::Arc;
use std::time::Duration;

use dormdesk_router::{Navigation, RouteTable, Router};
use dormdesk_session::{KeyValueStore, Session, SessionStore};
use dormdesk_transport::{HttpRequest, HttpTransport, ReqwestTransport};
use serde::de::DeserializeOwned;

use crate::api::{AdminApi, AuthApi, StudentApi};
use crate::notify::Notifier;
use crate::pipeline::Pipeline;
use crate::{ClientConfig, DormdeskError};

/// Builder for configuring a [`DormClient`].
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
/// use dormdesk::prelude::*;
///
/// # fn demo() -> Result<(), DormdeskError> {
/// let client = DormClient::builder()
///     .base_url("http://localhost:8000")
///     .timeout(Duration::from_secs(5))
///     .build(LogNotifier, MemoryStore::new())?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct DormClientBuilder {
    config: ClientConfig,
}

impl DormClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every setting at once.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn base_url(mut self, base_url: &str) -> Self {
        self.config.base_url = base_url.to_string();
        self
    }

    pub fn api_prefix(mut self, api_prefix: &str) -> Self {
        self.config.api_prefix = api_prefix.to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn max_redirects(mut self, max_redirects: usize) -> Self {
        self.config.max_redirects = max_redirects;
        self
    }

    /// Builds a client that talks HTTP through `reqwest`.
    ///
    /// The persisted session in `storage` is loaded immediately.
    ///
    /// # Errors
    /// Returns [`DormdeskError::Transport`] if the HTTP client can't be
    /// constructed.
    pub fn build<N: Notifier, K: KeyValueStore>(
        self,
        notifier: N,
        storage: K,
    ) -> Result<DormClient<ReqwestTransport, N, K>, DormdeskError> {
        let transport = ReqwestTransport::new(
            &self.config.base_url,
            &self.config.api_prefix,
            self.config.timeout,
        )?;
        Ok(self.build_with_transport(transport, notifier, storage))
    }

    /// Builds a client on top of any transport.
    ///
    /// `base_url`, `api_prefix` and `timeout` are the transport's business
    /// here and are ignored.
    pub fn build_with_transport<T: HttpTransport, N: Notifier, K: KeyValueStore>(
        self,
        transport: T,
        notifier: N,
        storage: K,
    ) -> DormClient<T, N, K> {
        let router =
            Router::new(RouteTable::standard()).with_max_redirects(self.config.max_redirects);
        let session = SessionStore::open(storage);
        DormClient {
            pipeline: Arc::new(Pipeline::new(transport, notifier, session, router)),
        }
    }
}

/// A handle to the backend plus the client-side session and location.
///
/// Cheap to clone; clones share the same session and router.
pub struct DormClient<T: HttpTransport, N: Notifier, K: KeyValueStore> {
    pipeline: Arc<Pipeline<T, N, K>>,
}

impl<T: HttpTransport, N: Notifier, K: KeyValueStore> Clone for DormClient<T, N, K> {
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
        }
    }
}

impl DormClient<ReqwestTransport, crate::LogNotifier, dormdesk_session::MemoryStore> {
    /// Creates a new builder.
    pub fn builder() -> DormClientBuilder {
        DormClientBuilder::new()
    }
}

impl<T, N, K> DormClient<T, N, K>
where
    T: HttpTransport,
    N: Notifier,
    K: KeyValueStore,
{
    /// Sends `request` through the pipeline and decodes the 2xx body.
    ///
    /// This is what every call wrapper uses; reach for it directly to hit
    /// an endpoint the wrappers don't cover.
    pub async fn call<R: DeserializeOwned>(&self, request: HttpRequest) -> Result<R, DormdeskError> {
        self.pipeline.execute(request).await
    }

    /// A snapshot of the current session.
    pub async fn session(&self) -> Session {
        self.pipeline.session().await
    }

    /// Moves to `target`, guard permitting.
    pub async fn navigate(&self, target: &str) -> Result<Navigation, DormdeskError> {
        self.pipeline.navigate(target).await
    }

    /// The committed location, or `None` before the first navigation.
    pub async fn current_location(&self) -> Option<String> {
        self.pipeline.current_location().await
    }

    pub fn notifier(&self) -> &N {
        self.pipeline.notifier()
    }

    pub fn auth(&self) -> AuthApi<'_, T, N, K> {
        AuthApi::new(self)
    }

    pub fn student(&self) -> StudentApi<'_, T, N, K> {
        StudentApi::new(self)
    }

    pub fn admin(&self) -> AdminApi<'_, T, N, K> {
        AdminApi::new(self)
    }

    pub(crate) fn pipeline(&self) -> &Pipeline<T, N, K> {
        &self.pipeline
    }
}
