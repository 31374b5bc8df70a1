use crate::error::ConstraintViolation;
use crate::{InteractionModel, Revision};
use oxrdf::NamedNode;

/// Describes where the content of a non-RDF source is stored.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BinaryMetadata {
    /// The location of the content in the binary service.
    pub location: NamedNode,
    /// The media type of the content, if known.
    pub mime_type: Option<String>,
}

impl BinaryMetadata {
    pub fn new(location: NamedNode) -> Self {
        Self {
            location,
            mime_type: None,
        }
    }

    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

/// The metadata that is passed to the mutating operations of a resource store.
///
/// If `revision` is set, the mutation only succeeds if the stored resource still has this
/// revision.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Metadata {
    pub identifier: NamedNode,
    pub interaction_model: InteractionModel,
    pub container: Option<NamedNode>,
    pub membership_resource: Option<NamedNode>,
    pub member_relation: Option<NamedNode>,
    pub member_of_relation: Option<NamedNode>,
    pub inserted_content_relation: Option<NamedNode>,
    pub binary: Option<BinaryMetadata>,
    pub revision: Option<Revision>,
}

impl Metadata {
    /// Creates new [Metadata] for `identifier` without a container.
    pub fn new(identifier: NamedNode, interaction_model: InteractionModel) -> Self {
        Self {
            identifier,
            interaction_model,
            container: None,
            membership_resource: None,
            member_relation: None,
            member_of_relation: None,
            inserted_content_relation: None,
            binary: None,
            revision: None,
        }
    }

    #[must_use]
    pub fn with_container(mut self, container: NamedNode) -> Self {
        self.container = Some(container);
        self
    }

    #[must_use]
    pub fn with_membership_resource(mut self, membership_resource: NamedNode) -> Self {
        self.membership_resource = Some(membership_resource);
        self
    }

    #[must_use]
    pub fn with_member_relation(mut self, member_relation: NamedNode) -> Self {
        self.member_relation = Some(member_relation);
        self
    }

    #[must_use]
    pub fn with_member_of_relation(mut self, member_of_relation: NamedNode) -> Self {
        self.member_of_relation = Some(member_of_relation);
        self
    }

    #[must_use]
    pub fn with_inserted_content_relation(mut self, relation: NamedNode) -> Self {
        self.inserted_content_relation = Some(relation);
        self
    }

    #[must_use]
    pub fn with_binary(mut self, binary: BinaryMetadata) -> Self {
        self.binary = Some(binary);
        self
    }

    #[must_use]
    pub fn with_revision(mut self, revision: Revision) -> Self {
        self.revision = Some(revision);
        self
    }

    /// Checks the structural constraints of the metadata.
    ///
    /// - Direct and indirect containers declare a membership resource iff they declare a member
    ///   relation or a member-of relation. Indirect containers always declare an inserted content
    ///   relation. Other interaction models declare none of these properties.
    /// - Binary metadata is present iff the interaction model is `ldp:NonRDFSource`.
    pub fn validate(&self) -> Result<(), ConstraintViolation> {
        let model = self.interaction_model;
        let has_relation = self.member_relation.is_some() || self.member_of_relation.is_some();

        if model.has_membership() {
            if self.membership_resource.is_some() != has_relation {
                return Err(ConstraintViolation::IncompleteMembership(model));
            }
            if model == InteractionModel::IndirectContainer
                && self.inserted_content_relation.is_none()
            {
                return Err(ConstraintViolation::MissingInsertedContentRelation);
            }
        } else if self.membership_resource.is_some()
            || has_relation
            || self.inserted_content_relation.is_some()
        {
            return Err(ConstraintViolation::UnexpectedMembership(model));
        }

        match (model, &self.binary) {
            (InteractionModel::NonRdfSource, None) => Err(ConstraintViolation::MissingBinary),
            (InteractionModel::NonRdfSource, Some(_)) | (_, None) => Ok(()),
            (_, Some(_)) => Err(ConstraintViolation::UnexpectedBinary(model)),
        }?;

        if self.container.as_ref() == Some(&self.identifier) {
            return Err(ConstraintViolation::SelfContainment(self.identifier.clone()));
        }

        Ok(())
    }
}
