//! Classified call failures and the client's reaction to each.
//!
//! Classification and reaction are both pure: the same outcome always
//! maps to the same [`ApiFailure`], and the same failure always maps to
//! the same [`Reaction`]. Applying the reaction (notify, clear the
//! session, navigate) is the pipeline's job.

use dormdesk_protocol::ErrorBody;
use dormdesk_router::LOGIN_PATH;
use dormdesk_transport::{HttpResponse, TransportError};

use crate::notify::Severity;

/// Shown when a non-2xx response carries no usable `detail`.
pub const FALLBACK_MESSAGE: &str = "Request failed";

/// A failed call, as the user should understand it.
///
/// The `Display` text is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiFailure {
    /// 401: the token is missing, invalid, or expired.
    #[error("Invalid username or password")]
    AuthExpired,

    /// 403: authenticated, but not allowed.
    #[error("You do not have permission to access")]
    Forbidden,

    /// 404
    #[error("Requested resource not found")]
    NotFound,

    /// 500
    #[error("Server error")]
    ServerFault,

    /// Any other non-2xx status.
    #[error("{}", .detail.as_deref().unwrap_or(FALLBACK_MESSAGE))]
    BackendRejected { status: u16, detail: Option<String> },

    /// The request went out but nothing came back (timeout, refused,
    /// reset).
    #[error("Network error, please check your connection")]
    NetworkUnreachable(String),

    /// The request could not even be built.
    #[error("Request configuration error")]
    ClientMisconfigured(String),
}

/// What the client does about a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub severity: Severity,
    pub message: String,
    pub clear_session: bool,
    pub redirect_to: Option<&'static str>,
}

impl ApiFailure {
    /// Classifies a non-2xx response.
    ///
    /// Callers only pass responses that aren't successes; a 2xx here is
    /// treated like any other unrecognized status.
    pub fn classify(response: &HttpResponse) -> Self {
        match response.status {
            401 => Self::AuthExpired,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            500 => Self::ServerFault,
            status => Self::BackendRejected {
                status,
                detail: ErrorBody::from_bytes(&response.body).message(),
            },
        }
    }

    /// Classifies a call that never produced a response.
    pub fn from_transport(error: TransportError) -> Self {
        match error {
            TransportError::NotSent(reason) => Self::ClientMisconfigured(reason),
            TransportError::NoResponse(reason) => Self::NetworkUnreachable(reason),
        }
    }

    /// The HTTP status, when there was a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::AuthExpired => Some(401),
            Self::Forbidden => Some(403),
            Self::NotFound => Some(404),
            Self::ServerFault => Some(500),
            Self::BackendRejected { status, .. } => Some(*status),
            Self::NetworkUnreachable(_) | Self::ClientMisconfigured(_) => None,
        }
    }

    pub fn reaction(&self) -> Reaction {
        let ends_session = matches!(self, Self::AuthExpired);
        Reaction {
            severity: Severity::Error,
            message: self.to_string(),
            clear_session: ends_session,
            redirect_to: ends_session.then_some(LOGIN_PATH),
        }
    }
}

impl From<TransportError> for ApiFailure {
    fn from(error: TransportError) -> Self {
        Self::from_transport(error)
    }
}

#[cfg(test)]
mod tests {
    //! Naming convention: `test_{function}_{scenario}_{expected}`.

    use super::*;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse::new(status, body.as_bytes().to_vec())
    }

    #[test]
    fn test_classify_fixed_statuses() {
        assert_eq!(ApiFailure::classify(&response(401, "")), ApiFailure::AuthExpired);
        assert_eq!(ApiFailure::classify(&response(403, "")), ApiFailure::Forbidden);
        assert_eq!(ApiFailure::classify(&response(404, "")), ApiFailure::NotFound);
        assert_eq!(ApiFailure::classify(&response(500, "{}")), ApiFailure::ServerFault);
    }

    #[test]
    fn test_classify_fixed_status_ignores_detail() {
        let failure = ApiFailure::classify(&response(404, r#"{"detail":"no such bill"}"#));
        assert_eq!(failure.to_string(), "Requested resource not found");
    }

    #[test]
    fn test_classify_422_string_detail_is_message() {
        let failure = ApiFailure::classify(&response(422, r#"{"detail":"invalid field"}"#));
        assert_eq!(
            failure,
            ApiFailure::BackendRejected {
                status: 422,
                detail: Some("invalid field".into())
            }
        );
        assert_eq!(failure.reaction().message, "invalid field");
    }

    #[test]
    fn test_classify_422_validation_list_joins_messages() {
        let body = r#"{"detail":[
            {"loc":["body","email"],"msg":"value is not a valid email address","type":"value_error"},
            {"loc":["body","name"],"msg":"field required","type":"missing"}
        ]}"#;
        let failure = ApiFailure::classify(&response(422, body));
        assert_eq!(
            failure.to_string(),
            "value is not a valid email address; field required"
        );
    }

    #[test]
    fn test_classify_other_status_without_detail_uses_fallback() {
        for body in ["", "{}", "<html>bad gateway</html>", r#"{"detail":42}"#] {
            let failure = ApiFailure::classify(&response(502, body));
            assert_eq!(failure.to_string(), FALLBACK_MESSAGE, "body {body:?}");
            assert_eq!(failure.status(), Some(502));
        }
    }

    #[test]
    fn test_from_transport_maps_both_kinds() {
        assert!(matches!(
            ApiFailure::from(TransportError::NoResponse("timed out".into())),
            ApiFailure::NetworkUnreachable(_)
        ));
        assert!(matches!(
            ApiFailure::from(TransportError::NotSent("bad url".into())),
            ApiFailure::ClientMisconfigured(_)
        ));
    }

    #[test]
    fn test_reaction_401_clears_and_redirects() {
        let reaction = ApiFailure::AuthExpired.reaction();
        assert_eq!(reaction.severity, Severity::Error);
        assert_eq!(reaction.message, "Invalid username or password");
        assert!(reaction.clear_session);
        assert_eq!(reaction.redirect_to, Some("/login"));
    }

    #[test]
    fn test_reaction_other_failures_keep_session() {
        for failure in [
            ApiFailure::Forbidden,
            ApiFailure::NotFound,
            ApiFailure::ServerFault,
            ApiFailure::BackendRejected {
                status: 409,
                detail: None,
            },
            ApiFailure::NetworkUnreachable("refused".into()),
            ApiFailure::ClientMisconfigured("bad header".into()),
        ] {
            let reaction = failure.reaction();
            assert!(!reaction.clear_session, "{failure:?}");
            assert_eq!(reaction.redirect_to, None, "{failure:?}");
        }
    }

    #[test]
    fn test_reaction_messages() {
        assert_eq!(
            ApiFailure::NetworkUnreachable("x".into()).reaction().message,
            "Network error, please check your connection"
        );
        assert_eq!(
            ApiFailure::ClientMisconfigured("x".into()).reaction().message,
            "Request configuration error"
        );
        assert_eq!(
            ApiFailure::Forbidden.reaction().message,
            "You do not have permission to access"
        );
    }

    #[test]
    fn test_reaction_is_idempotent() {
        let failure = ApiFailure::classify(&response(422, r#"{"detail":"invalid field"}"#));
        assert_eq!(failure.reaction(), failure.reaction());
        assert_eq!(
            ApiFailure::classify(&response(401, "")).reaction(),
            ApiFailure::classify(&response(401, "")).reaction()
        );
    }
}
