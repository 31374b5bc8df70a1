use crate::vocab::ldp;
use crate::{BinaryMetadata, InteractionModel, Metadata, Partition, Revision};
use itertools::Either;
use oxrdf::{Graph, NamedNode, NamedNodeRef, Quad, QuadRef, Triple, TripleRef};
use std::sync::Arc;
use time::OffsetDateTime;

/// An immutable snapshot of a stored resource.
///
/// The stored partitions are shared between snapshots, so cloning a [Resource] is cheap. Derived
/// partitions are attached by the store when the resource is read.
#[derive(Clone, Debug)]
pub struct Resource {
    metadata: Metadata,
    revision: Revision,
    modified: OffsetDateTime,
    user_managed: Arc<Graph>,
    access_control: Arc<Graph>,
    audit: Arc<[Triple]>,
    containment: Arc<Graph>,
    membership: Arc<Graph>,
}

impl Resource {
    /// Creates a new [Resource] without any statements.
    ///
    /// The revision of `metadata` is ignored. The expected revision of a mutation is not the
    /// revision of the resulting snapshot.
    pub fn new(metadata: Metadata, revision: Revision, modified: OffsetDateTime) -> Self {
        Self {
            metadata: Metadata {
                revision: None,
                ..metadata
            },
            revision,
            modified,
            user_managed: Arc::default(),
            access_control: Arc::default(),
            audit: Arc::from(Vec::new()),
            containment: Arc::default(),
            membership: Arc::default(),
        }
    }

    /// Replaces the statements of a graph-based partition.
    ///
    /// The audit partition is set with [Self::with_audit].
    #[must_use]
    pub fn with_graph(mut self, partition: Partition, graph: Arc<Graph>) -> Self {
        match partition {
            Partition::UserManaged => self.user_managed = graph,
            Partition::AccessControl => self.access_control = graph,
            Partition::Containment => self.containment = graph,
            Partition::Membership => self.membership = graph,
            Partition::Audit => self.audit = graph.iter().map(TripleRef::into_owned).collect(),
        }
        self
    }

    /// Sets the audit statements in the order they were appended.
    #[must_use]
    pub fn with_audit(mut self, audit: Arc<[Triple]>) -> Self {
        self.audit = audit;
        self
    }

    pub fn identifier(&self) -> &NamedNode {
        &self.metadata.identifier
    }

    pub fn interaction_model(&self) -> InteractionModel {
        self.metadata.interaction_model
    }

    pub fn container(&self) -> Option<&NamedNode> {
        self.metadata.container.as_ref()
    }

    pub fn membership_resource(&self) -> Option<&NamedNode> {
        self.metadata.membership_resource.as_ref()
    }

    pub fn member_relation(&self) -> Option<&NamedNode> {
        self.metadata.member_relation.as_ref()
    }

    pub fn member_of_relation(&self) -> Option<&NamedNode> {
        self.metadata.member_of_relation.as_ref()
    }

    /// Returns the inserted content relation of a membership container.
    ///
    /// Direct containers without an explicit relation report `ldp:MemberSubject`.
    pub fn inserted_content_relation(&self) -> Option<NamedNodeRef<'_>> {
        match (
            self.metadata.interaction_model,
            &self.metadata.inserted_content_relation,
        ) {
            (_, Some(relation)) => Some(relation.as_ref()),
            (InteractionModel::DirectContainer, None) => Some(ldp::MEMBER_SUBJECT),
            _ => None,
        }
    }

    pub fn binary(&self) -> Option<&BinaryMetadata> {
        self.metadata.binary.as_ref()
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }

    pub fn modified(&self) -> OffsetDateTime {
        self.modified
    }

    /// Returns the audit statements in the order they were appended.
    pub fn audit_statements(&self) -> &[Triple] {
        &self.audit
    }

    /// Returns whether this resource carries its own access-control statements.
    pub fn has_acl(&self) -> bool {
        !self.access_control.is_empty()
    }

    /// Returns the metadata of this resource. The revision of the returned metadata is set to the
    /// current revision, so it can be used for a conditional mutation.
    pub fn metadata(&self) -> Metadata {
        self.metadata.clone().with_revision(self.revision)
    }

    /// Returns the triples of a partition.
    pub fn triples(&self, partition: Partition) -> impl Iterator<Item = TripleRef<'_>> + '_ {
        match partition {
            Partition::UserManaged => Either::Left(self.user_managed.iter()),
            Partition::AccessControl => Either::Left(self.access_control.iter()),
            Partition::Containment => Either::Left(self.containment.iter()),
            Partition::Membership => Either::Left(self.membership.iter()),
            Partition::Audit => Either::Right(self.audit.iter().map(Triple::as_ref)),
        }
    }

    /// Returns the graph of a stored or derived partition. The audit partition is not a graph as
    /// its statements are ordered, see [Self::triples].
    pub fn graph(&self, partition: Partition) -> Option<&Graph> {
        match partition {
            Partition::UserManaged => Some(&self.user_managed),
            Partition::AccessControl => Some(&self.access_control),
            Partition::Containment => Some(&self.containment),
            Partition::Membership => Some(&self.membership),
            Partition::Audit => None,
        }
    }

    /// Streams the statements of a partition as quads in the graph of the partition.
    pub fn stream(&self, partition: Partition) -> impl Iterator<Item = Quad> + '_ {
        let graph_name = partition.graph_name();
        self.triples(partition).map(move |triple| {
            QuadRef::new(triple.subject, triple.predicate, triple.object, graph_name).into_owned()
        })
    }

    /// Streams the statements of multiple partitions.
    pub fn stream_all<'a>(
        &'a self,
        partitions: &'a [Partition],
    ) -> impl Iterator<Item = Quad> + 'a {
        partitions
            .iter()
            .flat_map(move |partition| self.stream(*partition))
    }
}

/// The result of looking up an identifier in a resource store.
#[derive(Clone, Debug)]
pub enum Lookup {
    /// A live resource.
    Live(Arc<Resource>),
    /// The identifier was never used.
    Missing,
    /// The resource was deleted.
    Deleted,
}

impl Lookup {
    pub fn is_live(&self) -> bool {
        matches!(self, Lookup::Live(_))
    }

    /// Returns the resource if it is live.
    pub fn live(&self) -> Option<&Arc<Resource>> {
        match self {
            Lookup::Live(resource) => Some(resource),
            Lookup::Missing | Lookup::Deleted => None,
        }
    }

    /// Returns the resource if it is live.
    pub fn into_live(self) -> Option<Arc<Resource>> {
        match self {
            Lookup::Live(resource) => Some(resource),
            Lookup::Missing | Lookup::Deleted => None,
        }
    }
}
