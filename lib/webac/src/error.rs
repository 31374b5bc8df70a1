use ldp_fusion_common::error::ResourceError;
use thiserror::Error;

/// A request that was rejected by the [AuthorizationGate](crate::AuthorizationGate).
///
/// The variants never reveal whether the target of the request exists.
#[derive(Debug, Error)]
pub enum AuthorizationError {
    /// An anonymous session lacks a required mode. The challenges tell the client how to
    /// authenticate.
    #[error("Authentication required")]
    Unauthenticated { challenges: Vec<String> },
    /// An authenticated session lacks a required mode.
    #[error("Access forbidden")]
    Forbidden,
    /// The access modes could not be resolved.
    #[error("Could not resolve access modes: {0}")]
    Resolution(#[from] ResourceError),
}
