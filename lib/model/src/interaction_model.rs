use crate::vocab::ldp;
use oxrdf::NamedNodeRef;
use std::fmt::{Display, Formatter};

/// The LDP interaction model of a resource.
///
/// The models form a small type hierarchy: every container variant is an [InteractionModel::Container],
/// which in turn is an [InteractionModel::RdfSource]. `ldp:Resource` is the implicit super type of
/// all models and is not a valid interaction model on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InteractionModel {
    RdfSource,
    NonRdfSource,
    Container,
    BasicContainer,
    DirectContainer,
    IndirectContainer,
}

impl InteractionModel {
    /// All interaction models.
    pub const ALL: [InteractionModel; 6] = [
        InteractionModel::RdfSource,
        InteractionModel::NonRdfSource,
        InteractionModel::Container,
        InteractionModel::BasicContainer,
        InteractionModel::DirectContainer,
        InteractionModel::IndirectContainer,
    ];

    /// Returns the LDP IRI of this interaction model.
    pub fn iri(self) -> NamedNodeRef<'static> {
        match self {
            InteractionModel::RdfSource => ldp::RDF_SOURCE,
            InteractionModel::NonRdfSource => ldp::NON_RDF_SOURCE,
            InteractionModel::Container => ldp::CONTAINER,
            InteractionModel::BasicContainer => ldp::BASIC_CONTAINER,
            InteractionModel::DirectContainer => ldp::DIRECT_CONTAINER,
            InteractionModel::IndirectContainer => ldp::INDIRECT_CONTAINER,
        }
    }

    /// Parses an interaction model from its LDP IRI.
    ///
    /// Returns [None] for `ldp:Resource` and for IRIs outside the LDP vocabulary.
    pub fn from_iri(iri: NamedNodeRef<'_>) -> Option<Self> {
        Self::ALL.into_iter().find(|model| model.iri() == iri)
    }

    /// Returns the direct super type of this model, if any.
    pub fn parent(self) -> Option<Self> {
        match self {
            InteractionModel::RdfSource | InteractionModel::NonRdfSource => None,
            InteractionModel::Container => Some(InteractionModel::RdfSource),
            InteractionModel::BasicContainer
            | InteractionModel::DirectContainer
            | InteractionModel::IndirectContainer => Some(InteractionModel::Container),
        }
    }

    /// Returns this model followed by all of its super types, ending with `ldp:Resource`.
    ///
    /// For example, the types of an [InteractionModel::BasicContainer] are
    /// `ldp:BasicContainer`, `ldp:Container`, `ldp:RDFSource` and `ldp:Resource`.
    pub fn types(self) -> Vec<NamedNodeRef<'static>> {
        let mut types = Vec::with_capacity(4);
        let mut current = Some(self);
        while let Some(model) = current {
            types.push(model.iri());
            current = model.parent();
        }
        types.push(ldp::RESOURCE);
        types
    }

    /// Returns whether `self` is `other` or one of its subtypes.
    pub fn is_subtype_of(self, other: InteractionModel) -> bool {
        let mut current = Some(self);
        while let Some(model) = current {
            if model == other {
                return true;
            }
            current = model.parent();
        }
        false
    }

    /// Returns whether a resource with the interaction model `self` may be replaced by a resource
    /// with the interaction model `replacement`.
    ///
    /// A replacement is only valid if it does not leave the type hierarchy of the current model,
    /// i.e., the replacement is the same model or a subtype of it.
    pub fn can_become(self, replacement: InteractionModel) -> bool {
        replacement.is_subtype_of(self)
    }

    /// Returns whether this model is a container.
    pub fn is_container(self) -> bool {
        self.is_subtype_of(InteractionModel::Container)
    }

    /// Returns whether resources with this model expose membership statements.
    pub fn has_membership(self) -> bool {
        matches!(
            self,
            InteractionModel::DirectContainer | InteractionModel::IndirectContainer
        )
    }
}

impl Display for InteractionModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.iri().as_str())
    }
}
