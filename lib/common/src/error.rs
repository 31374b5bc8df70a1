use ldp_fusion_model::{ConstraintViolation, InteractionModel, NamedNode, Revision};
use std::error::Error;
use std::io;

/// An error related to storage operations (reads, writes...).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StorageError {
    /// Error from the OS I/O layer.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// Error related to data corruption.
    #[error(transparent)]
    Corruption(#[from] CorruptionError),
    #[error("{0}")]
    Other(#[source] Box<dyn Error + Send + Sync + 'static>),
}

impl From<StorageError> for io::Error {
    #[inline]
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::Io(error) => error,
            StorageError::Corruption(error) => error.into(),
            StorageError::Other(error) => Self::other(error),
        }
    }
}

/// An error return if some content in the store is corrupted.
///
/// This includes inconsistent containment hierarchies (e.g., cycles) that are detected while
/// walking from a resource to the root container.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct CorruptionError(#[from] CorruptionErrorKind);

#[derive(Debug, thiserror::Error)]
enum CorruptionErrorKind {
    #[error("{0}")]
    Msg(String),
    #[error("{0}")]
    Other(#[source] Box<dyn Error + Send + Sync + 'static>),
}

impl CorruptionError {
    /// Builds an error from another error.
    #[inline]
    pub fn new(error: impl Into<Box<dyn Error + Send + Sync + 'static>>) -> Self {
        Self(CorruptionErrorKind::Other(error.into()))
    }

    /// Builds an error from a printable error message.
    #[inline]
    pub fn msg(msg: impl Into<String>) -> Self {
        Self(CorruptionErrorKind::Msg(msg.into()))
    }
}

impl From<CorruptionError> for io::Error {
    #[inline]
    fn from(error: CorruptionError) -> Self {
        Self::new(io::ErrorKind::InvalidData, error)
    }
}

/// The reason why a mutation conflicts with the stored state of a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictKind {
    /// The resource was modified since the expected revision was observed.
    RevisionMismatch { expected: Revision, actual: Revision },
    /// The interaction model cannot change to the requested one.
    InteractionModelChange {
        current: InteractionModel,
        requested: InteractionModel,
    },
}

impl std::fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConflictKind::RevisionMismatch { expected, actual } => {
                write!(f, "expected revision {expected}, found {actual}")
            }
            ConflictKind::InteractionModelChange { current, requested } => {
                write!(f, "cannot change {current} to {requested}")
            }
        }
    }
}

/// The outcome of a failed operation on a resource.
///
/// The absence of a resource is not an error when reading, see
/// [Lookup](ldp_fusion_model::Lookup).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ResourceError {
    #[error("The resource {0} does not exist")]
    NotFound(NamedNode),
    #[error("The resource {0} already exists")]
    AlreadyExists(NamedNode),
    #[error("The interaction model {0} is not supported")]
    UnsupportedInteractionModel(InteractionModel),
    #[error("Conflicting modification of {identifier}: {kind}")]
    Conflict {
        identifier: NamedNode,
        kind: ConflictKind,
    },
    #[error("The precondition for modifying {0} failed")]
    PreconditionFailed(NamedNode),
    #[error("Modifying {0} requires a precondition")]
    PreconditionRequired(NamedNode),
    #[error(transparent)]
    ConstraintViolation(#[from] ConstraintViolation),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<CorruptionError> for ResourceError {
    #[inline]
    fn from(error: CorruptionError) -> Self {
        Self::Storage(error.into())
    }
}
