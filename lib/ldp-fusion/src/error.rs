use ldp_fusion_common::error::{ResourceError, StorageError};
use ldp_fusion_model::{InteractionModel, NamedNode};
use ldp_fusion_webac::AuthorizationError;
use std::io;

/// An error raised while handling a request in the [`ResourceManager`](crate::manager::ResourceManager).
#[derive(Debug, thiserror::Error)]
pub enum LdpError {
    /// The request was rejected before touching any resource.
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),
    /// The resource store refused or failed the operation.
    #[error(transparent)]
    Resource(#[from] ResourceError),
    /// The content of a non-RDF source could not be read or written.
    #[error("Binary content could not be processed: {0}")]
    Binary(#[source] StorageError),
    /// Binary content was sent for something that only accepts RDF.
    #[error("Binary content cannot be stored as {0}")]
    BinaryNotAcceptable(InteractionModel),
    /// A resource was posted to something that is not a container.
    #[error("The resource {0} is not a container")]
    NotAContainer(NamedNode),
}

impl LdpError {
    /// Returns the HTTP status code that corresponds to this error.
    pub fn status(&self) -> u16 {
        match self {
            LdpError::Authorization(AuthorizationError::Unauthenticated { .. }) => 401,
            LdpError::Authorization(AuthorizationError::Forbidden) => 403,
            LdpError::Authorization(AuthorizationError::Resolution(error))
            | LdpError::Resource(error) => resource_status(error),
            LdpError::Binary(_) => 500,
            LdpError::BinaryNotAcceptable(_) => 406,
            LdpError::NotAContainer(_) => 405,
        }
    }
}

fn resource_status(error: &ResourceError) -> u16 {
    match error {
        ResourceError::NotFound(_) => 404,
        ResourceError::AlreadyExists(_) | ResourceError::Conflict { .. } => 409,
        ResourceError::UnsupportedInteractionModel(_) | ResourceError::ConstraintViolation(_) => {
            400
        }
        ResourceError::PreconditionFailed(_) => 412,
        ResourceError::PreconditionRequired(_) => 428,
        _ => 500,
    }
}

impl From<LdpError> for io::Error {
    #[inline]
    fn from(error: LdpError) -> Self {
        match error {
            LdpError::Binary(error) => error.into(),
            LdpError::Resource(ResourceError::Storage(error)) => error.into(),
            LdpError::Resource(ResourceError::NotFound(_)) => {
                Self::new(io::ErrorKind::NotFound, error.to_string())
            }
            LdpError::Authorization(
                AuthorizationError::Unauthenticated { .. } | AuthorizationError::Forbidden,
            ) => Self::new(io::ErrorKind::PermissionDenied, error.to_string()),
            _ => Self::new(io::ErrorKind::InvalidInput, error.to_string()),
        }
    }
}
