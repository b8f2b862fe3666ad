/// Errors that can occur in the transport layer.
///
/// The split matters to the pipeline: a request that never left the
/// client is a local configuration fault, while one that left but got no
/// answer is a network problem.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request was never sent (bad URL, bad header, client build failure).
    #[error("request not sent: {0}")]
    NotSent(String),

    /// The request was sent but no response arrived (connect failure,
    /// timeout, connection reset while reading the body).
    #[error("no response: {0}")]
    NoResponse(String),
}

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            Self::NotSent(e.to_string())
        } else if e.is_timeout() {
            Self::NoResponse(format!("request timed out: {e}"))
        } else if e.is_connect() {
            Self::NoResponse(format!("connection failed: {e}"))
        } else {
            Self::NoResponse(format!("network error: {e}"))
        }
    }
}
