//! Error types for the protocol layer.
//!
//! Each crate in Dormdesk defines its own error enum. A `ProtocolError`
//! always means the problem is in turning bytes into typed values (or
//! back), never in networking or session state.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust type).
    ///
    /// Common causes: the backend changed a field name, returned HTML
    /// from a proxy instead of JSON, or truncated the body.
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The value parsed but breaks a protocol rule, e.g. a `user_type`
    /// that is neither `student` nor `admin`.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
