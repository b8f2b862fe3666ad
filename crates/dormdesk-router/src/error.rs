//! Error types for the router.

/// Errors that can occur while navigating.
///
/// The guard itself never fails; only the router's redirect-following
/// can, when a badly built table bounces between routes forever.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    /// Redirects kept chaining past the configured limit.
    ///
    /// `hops` counts the redirect that broke the limit, so it is always
    /// one more than the limit itself.
    #[error("navigation to {path} gave up after {hops} redirects")]
    RedirectLoop { path: String, hops: usize },
}
