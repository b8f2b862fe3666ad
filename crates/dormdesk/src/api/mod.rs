//! Typed wrappers around the backend's endpoints.
//!
//! Each wrapper only builds the request (method, path, query, body) and
//! hands it to [`DormClient::call`](crate::DormClient::call); failures
//! have already been reacted to by the time a wrapper returns `Err`.
//!
//! Grouped by who may call them:
//!
//! - [`AuthApi`]: login, registration, logout (`/auth/...`)
//! - [`StudentApi`]: the logged-in student's own data (`/students/...`)
//! - [`AdminApi`]: management endpoints (`/admin/...`)

mod admin;
mod auth;
mod student;

pub use admin::AdminApi;
pub use auth::AuthApi;
pub use student::StudentApi;

use dormdesk_protocol::{Codec, JsonCodec, PageRequest};
use dormdesk_transport::{HttpRequest, RequestBody};
use serde::Serialize;

use crate::DormdeskError;

/// Attaches `body` as a JSON request body.
fn with_json<B: Serialize>(request: HttpRequest, body: &B) -> Result<HttpRequest, DormdeskError> {
    let bytes = JsonCodec.encode(body)?;
    Ok(request.body(RequestBody::Json(bytes)))
}

/// Appends `skip` and `limit`.
fn paged(request: HttpRequest, page: PageRequest) -> HttpRequest {
    request.query("skip", page.skip).query("limit", page.limit)
}
