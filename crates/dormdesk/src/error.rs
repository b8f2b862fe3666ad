//! Unified error type for the Dormdesk client.

use dormdesk_protocol::ProtocolError;
use dormdesk_router::RouterError;
use dormdesk_session::{SessionError, StorageError};
use dormdesk_transport::TransportError;

use crate::ApiFailure;

/// Top-level error that wraps all crate-specific errors.
///
/// Every call wrapper returns this, so callers match on one type. The
/// `#[from]` attributes let `?` convert sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum DormdeskError {
    /// A call failed and the user has already been told (see
    /// [`ApiFailure::reaction`]).
    #[error(transparent)]
    Api(#[from] ApiFailure),

    /// A request body couldn't be encoded, or a 2xx body didn't match the
    /// expected shape.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The transport couldn't be constructed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The session couldn't be persisted.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Navigation bounced between redirects.
    #[error(transparent)]
    Router(#[from] RouterError),
}

impl From<StorageError> for DormdeskError {
    fn from(error: StorageError) -> Self {
        Self::Session(SessionError::from(error))
    }
}

impl DormdeskError {
    /// The classified failure, if this is one.
    pub fn as_api(&self) -> Option<&ApiFailure> {
        match self {
            Self::Api(failure) => Some(failure),
            _ => None,
        }
    }
}
