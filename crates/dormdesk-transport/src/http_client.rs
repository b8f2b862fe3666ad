//! HTTP transport implementation using `reqwest`.
//!
//! This is the only module in the workspace that knows `reqwest` exists.
//! Everything above it speaks [`HttpRequest`] / [`HttpResponse`], so the
//! pipeline can be tested against a scripted transport and the real one
//! can be swapped without touching any call wrapper.
//!
//! ## What `send` does NOT do
//!
//! It never looks at the status code. A 401 or a 500 is still an
//! `Ok(HttpResponse)`: the server answered, and deciding what that answer
//! means is the pipeline's job. `Err` is reserved for "no answer at all",
//! split in two by [`TransportError`]:
//!
//! - `NotSent` → the request couldn't be built (bad URL, bad header)
//! - `NoResponse` → it went out, but timed out or the connection failed
//!
//! ## The `?` operator here
//!
//! `builder.send().await?` works because `TransportError` implements
//! `From<reqwest::Error>`. The `?` calls that conversion for us, and the
//! conversion is where `is_builder()` / `is_timeout()` are inspected to
//! pick the right variant.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;

use crate::{HttpRequest, HttpResponse, HttpTransport, Method, RequestBody, TransportError};

/// A `reqwest`-based [`HttpTransport`].
///
/// Every request path is resolved against `base_url` + `api_prefix`, so
/// `/auth/login` with base `http://localhost:8000` and prefix `/api`
/// becomes `http://localhost:8000/api/auth/login`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    root: String,
}

impl ReqwestTransport {
    /// Builds a transport with the given base URL, API prefix, and timeout.
    ///
    /// The URL is not validated here; a malformed URL shows up as
    /// [`TransportError::NotSent`] on the first request.
    pub fn new(
        base_url: &str,
        api_prefix: &str,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TransportError::from)?;
        let root = format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            api_prefix.trim_matches('/')
        );
        tracing::debug!(%root, ?timeout, "HTTP transport ready");
        Ok(Self { client, root })
    }

    /// The URL every request path is appended to.
    pub fn root(&self) -> &str {
        &self.root
    }

    fn url_for(&self, path: &str) -> Result<reqwest::Url, TransportError> {
        let joined = format!(
            "{}/{}",
            self.root.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        reqwest::Url::parse(&joined)
            .map_err(|e| TransportError::NotSent(format!("invalid url '{joined}': {e}")))
    }
}

impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = self.url_for(&request.path)?;
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(bytes) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(bytes),
            RequestBody::Form(fields) => {
                let form = fields
                    .into_iter()
                    .fold(reqwest::multipart::Form::new(), |form, (k, v)| {
                        form.text(k, v)
                    });
                builder.multipart(form)
            }
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        tracing::debug!(id = %request.id, status, bytes = body.len(), "response received");
        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}
