use crate::{InteractionModel, Partition};
use oxrdf::NamedNode;

/// A violation of the structural constraints of a resource.
///
/// These errors are detected before any data is written and indicate that the request itself is
/// invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstraintViolation {
    /// A membership container without a complete membership configuration.
    #[error("A {0} requires ldp:membershipResource together with ldp:hasMemberRelation or ldp:isMemberOfRelation")]
    IncompleteMembership(InteractionModel),
    /// Membership properties on a resource that does not support membership.
    #[error("Membership properties are not supported by a {0}")]
    UnexpectedMembership(InteractionModel),
    /// An indirect container without an inserted content relation.
    #[error("An ldp:IndirectContainer requires ldp:insertedContentRelation")]
    MissingInsertedContentRelation,
    /// A non-RDF source without binary metadata.
    #[error("An ldp:NonRDFSource requires binary metadata")]
    MissingBinary,
    /// Binary metadata on a resource that is not a non-RDF source.
    #[error("Binary metadata is not supported by a {0}")]
    UnexpectedBinary(InteractionModel),
    /// Statements that target a partition that cannot be written by the operation.
    #[error("Statements in {0} cannot be written by this operation")]
    ReadOnlyPartition(Partition),
    /// Statements in a graph that is not a known partition.
    #[error("Statements in the graph {0} do not belong to any partition")]
    UnknownGraph(String),
    /// A resource that is its own container.
    #[error("The resource {0} cannot contain itself")]
    SelfContainment(NamedNode),
}
