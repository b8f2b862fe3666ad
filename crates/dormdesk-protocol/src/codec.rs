//! Codec trait and implementations for serializing/deserializing payloads.
//!
//! A "codec" (coder/decoder) converts between Rust types and raw bytes.
//! The pipeline doesn't care HOW bodies are serialized: it just needs
//! something that implements the [`Codec`] trait. The backend speaks JSON,
//! so [`JsonCodec`] is the only implementation today; tests can swap in
//! their own without touching the pipeline.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// ## Trait bounds explained
///
/// - `Send + Sync` → safe to share between tasks (the client is usually
///   held in an `Arc` and called from several places).
/// - `'static` → the codec owns everything it needs.
///
/// `DeserializeOwned` (vs plain `Deserialize`) means the decoded value
/// doesn't borrow from the input bytes, so the response buffer can be
/// dropped right after decoding.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed,
    /// incomplete, or don't match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// An empty (or whitespace-only) body decodes as JSON `null`. Endpoints
/// like `204 No Content` then decode cleanly into `()` or `Option<T>`.
///
/// ## Example
///
/// ```rust
/// use dormdesk_protocol::{Codec, JsonCodec, Role, TokenResponse};
///
/// let codec = JsonCodec;
/// let body = br#"{"access_token":"t1","token_type":"bearer","user_type":"admin","user_id":"a1"}"#;
///
/// let token: TokenResponse = codec.decode(body).unwrap();
/// assert_eq!(token.user_type, Role::Admin);
///
/// let unit: () = codec.decode(b"").unwrap();
/// assert_eq!(unit, ());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        if data.iter().all(u8::is_ascii_whitespace) {
            return serde_json::from_slice(b"null").map_err(ProtocolError::Decode);
        }
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
