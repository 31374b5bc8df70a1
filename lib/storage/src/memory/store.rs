use crate::composition::compose;
use async_trait::async_trait;
use dashmap::mapref::entry::Entry as MapEntry;
use dashmap::DashMap;
use ldp_fusion_common::error::{ConflictKind, ResourceError};
use ldp_fusion_common::ResourceStore;
use ldp_fusion_model::{
    ConstraintViolation, Dataset, Graph, InteractionModel, Lookup, Metadata, NamedNode,
    NamedNodeRef, Partition, Resource, Revision, Triple, TripleRef,
};
use rustc_hash::{FxHashSet, FxHasher};
use std::hash::BuildHasherDefault;
use std::sync::Arc;
use time::OffsetDateTime;
use tracing::{debug, trace};
use uuid::Uuid;

type FxDashMap<K, V> = DashMap<K, V, BuildHasherDefault<FxHasher>>;

/// The state of an identifier that has been used.
#[derive(Clone, Debug)]
enum Entry {
    Live(Arc<Resource>),
    Deleted {
        revision: Revision,
        modified: OffsetDateTime,
    },
}

impl Entry {
    fn revision(&self) -> Revision {
        match self {
            Entry::Live(resource) => resource.revision(),
            Entry::Deleted { revision, .. } => *revision,
        }
    }

    fn modified(&self) -> OffsetDateTime {
        match self {
            Entry::Live(resource) => resource.modified(),
            Entry::Deleted { modified, .. } => *modified,
        }
    }
}

/// An in-memory [ResourceStore].
///
/// # Concurrency
///
/// Every identifier is guarded by the lock of its shard in the resource map. Mutations check the
/// expected revision and install the new snapshot while holding this lock, so writers to
/// unrelated identifiers rarely contend. Readers clone the [Arc] of the current snapshot and never
/// observe a partially applied mutation.
///
/// # Partitions
///
/// The mutable partitions are part of the snapshot. The audit partition is kept in a separate map
/// such that replacing or deleting a resource cannot touch it. Containment and membership are
/// derived from a parent-to-children index when a container is read.
#[derive(Debug)]
pub struct MemResourceStore {
    /// The current state of every identifier that has been used.
    entries: FxDashMap<NamedNode, Entry>,
    /// Maps containers to the identifiers that have been created with this container.
    children: FxDashMap<NamedNode, FxHashSet<NamedNode>>,
    /// The audit statements of every resource in the order they were added. Appending replaces
    /// the slice, so readers share it without copying.
    audit: FxDashMap<NamedNode, Arc<[Triple]>>,
    /// The interaction models that can be stored.
    interaction_models: Vec<InteractionModel>,
}

impl Default for MemResourceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemResourceStore {
    /// Creates a new empty [MemResourceStore] that supports all interaction models.
    pub fn new() -> Self {
        Self::with_interaction_models(InteractionModel::ALL)
    }

    /// Creates a new empty [MemResourceStore] that only supports the given interaction models.
    pub fn with_interaction_models(
        interaction_models: impl IntoIterator<Item = InteractionModel>,
    ) -> Self {
        Self {
            entries: DashMap::with_hasher(BuildHasherDefault::default()),
            children: DashMap::with_hasher(BuildHasherDefault::default()),
            audit: DashMap::with_hasher(BuildHasherDefault::default()),
            interaction_models: interaction_models.into_iter().collect(),
        }
    }

    fn check_metadata(&self, metadata: &Metadata) -> Result<(), ResourceError> {
        if !self.supports(metadata.interaction_model) {
            return Err(ResourceError::UnsupportedInteractionModel(
                metadata.interaction_model,
            ));
        }
        metadata.validate()?;
        Ok(())
    }

    /// Registers `child` with its container.
    fn link(&self, container: Option<&NamedNode>, child: &NamedNode) {
        if let Some(container) = container {
            self.children
                .entry(container.clone())
                .or_default()
                .insert(child.clone());
        }
    }

    /// Removes `child` from the children of its container.
    fn unlink(&self, container: Option<&NamedNode>, child: &NamedNode) {
        if let Some(container) = container {
            if let Some(mut children) = self.children.get_mut(container) {
                children.remove(child);
            }
        }
    }

    /// Returns the live children of `container`.
    fn live_children(&self, container: &NamedNode) -> Vec<Arc<Resource>> {
        let candidates = self
            .children
            .get(container)
            .map_or_else(Vec::new, |children| children.iter().cloned().collect());

        candidates
            .iter()
            .filter_map(|candidate| {
                let entry = self.entries.get(candidate)?.value().clone();
                match entry {
                    Entry::Live(child) if child.container() == Some(container) => Some(child),
                    _ => None,
                }
            })
            .collect()
    }

    fn audit_of(&self, identifier: &NamedNode) -> Arc<[Triple]> {
        self.audit
            .get(identifier)
            .map_or_else(|| Arc::from(Vec::new()), |audit| Arc::clone(audit.value()))
    }
}

#[async_trait]
impl ResourceStore for MemResourceStore {
    fn generate_identifier(&self) -> String {
        Uuid::new_v4().to_string()
    }

    fn supported_interaction_models(&self) -> &[InteractionModel] {
        &self.interaction_models
    }

    async fn get(&self, identifier: NamedNodeRef<'_>) -> Result<Lookup, ResourceError> {
        let identifier = identifier.into_owned();
        let entry = self.entries.get(&identifier).map(|entry| entry.value().clone());
        let resource = match entry {
            None => return Ok(Lookup::Missing),
            Some(Entry::Deleted { .. }) => return Ok(Lookup::Deleted),
            Some(Entry::Live(resource)) => resource,
        };

        let mut resource = Resource::clone(&resource).with_audit(self.audit_of(&identifier));
        if resource.interaction_model().is_container() {
            let children = self.live_children(&identifier);
            trace!(%identifier, children = children.len(), "Composing container");
            resource = compose(resource, &children);
        }
        Ok(Lookup::Live(Arc::new(resource)))
    }

    async fn get_stored(&self, identifier: NamedNodeRef<'_>) -> Result<Lookup, ResourceError> {
        let entry = self
            .entries
            .get(&identifier.into_owned())
            .map(|entry| entry.value().clone());
        Ok(match entry {
            None => Lookup::Missing,
            Some(Entry::Deleted { .. }) => Lookup::Deleted,
            Some(Entry::Live(resource)) => Lookup::Live(resource),
        })
    }

    async fn create(
        &self,
        metadata: Metadata,
        dataset: Dataset,
    ) -> Result<Revision, ResourceError> {
        self.check_metadata(&metadata)?;
        let identifier = metadata.identifier.clone();
        let container = metadata.container.clone();

        let revision = match self.entries.entry(identifier.clone()) {
            MapEntry::Occupied(mut occupied) => {
                let (revision, modified) = match occupied.get() {
                    Entry::Live(_) => return Err(ResourceError::AlreadyExists(identifier)),
                    Entry::Deleted { revision, modified } => (revision.increment(), *modified),
                };
                let resource = snapshot(metadata, &dataset, revision, Some(modified))?;
                occupied.insert(Entry::Live(Arc::new(resource)));
                self.link(container.as_ref(), &identifier);
                revision
            }
            MapEntry::Vacant(vacant) => {
                let revision = Revision::INITIAL;
                let resource = snapshot(metadata, &dataset, revision, None)?;
                vacant.insert(Entry::Live(Arc::new(resource)));
                self.link(container.as_ref(), &identifier);
                revision
            }
        };

        debug!(%identifier, %revision, "Created resource");
        Ok(revision)
    }

    async fn replace(
        &self,
        metadata: Metadata,
        dataset: Dataset,
    ) -> Result<Revision, ResourceError> {
        self.check_metadata(&metadata)?;
        let identifier = metadata.identifier.clone();

        let MapEntry::Occupied(mut occupied) = self.entries.entry(identifier.clone()) else {
            return Err(ResourceError::NotFound(identifier));
        };
        let Entry::Live(current) = occupied.get().clone() else {
            return Err(ResourceError::NotFound(identifier));
        };

        if let Some(expected) = metadata.revision {
            if expected != current.revision() {
                return Err(ResourceError::Conflict {
                    identifier,
                    kind: ConflictKind::RevisionMismatch {
                        expected,
                        actual: current.revision(),
                    },
                });
            }
        }
        if !current
            .interaction_model()
            .can_become(metadata.interaction_model)
        {
            return Err(ResourceError::Conflict {
                identifier,
                kind: ConflictKind::InteractionModelChange {
                    current: current.interaction_model(),
                    requested: metadata.interaction_model,
                },
            });
        }

        let revision = current.revision().increment();
        let container = metadata.container.clone();
        let resource = snapshot(metadata, &dataset, revision, Some(current.modified()))?;
        occupied.insert(Entry::Live(Arc::new(resource)));
        if container.as_ref() != current.container() {
            self.unlink(current.container(), &identifier);
            self.link(container.as_ref(), &identifier);
        }

        debug!(%identifier, %revision, "Replaced resource");
        Ok(revision)
    }

    async fn delete(&self, metadata: Metadata) -> Result<(), ResourceError> {
        let identifier = metadata.identifier;

        match self.entries.entry(identifier.clone()) {
            MapEntry::Occupied(mut occupied) => {
                let Entry::Live(current) = occupied.get().clone() else {
                    trace!(%identifier, "Resource is already deleted");
                    return Ok(());
                };
                if let Some(expected) = metadata.revision {
                    if expected != current.revision() {
                        return Err(ResourceError::Conflict {
                            identifier,
                            kind: ConflictKind::RevisionMismatch {
                                expected,
                                actual: current.revision(),
                            },
                        });
                    }
                }

                let revision = occupied.get().revision().increment();
                let modified = next_modified(Some(occupied.get().modified()));
                occupied.insert(Entry::Deleted { revision, modified });
                self.unlink(current.container(), &identifier);
                debug!(%identifier, %revision, "Deleted resource");
            }
            MapEntry::Vacant(vacant) => {
                vacant.insert(Entry::Deleted {
                    revision: Revision::INITIAL,
                    modified: next_modified(None),
                });
                trace!(%identifier, "Deleted resource that never existed");
            }
        }
        Ok(())
    }

    async fn add(
        &self,
        identifier: NamedNodeRef<'_>,
        dataset: Dataset,
    ) -> Result<(), ResourceError> {
        let identifier = identifier.into_owned();
        let triples = audit_triples(&dataset)?;
        if !self.entries.contains_key(&identifier) {
            return Err(ResourceError::NotFound(identifier));
        }

        let count = triples.len();
        let mut audit = self
            .audit
            .entry(identifier.clone())
            .or_insert_with(|| Arc::from(Vec::new()));
        let appended = audit.iter().cloned().chain(triples).collect::<Arc<[Triple]>>();
        *audit = appended;
        trace!(%identifier, count, "Appended audit statements");
        Ok(())
    }
}

/// Builds the snapshot that results from writing `dataset`.
fn snapshot(
    metadata: Metadata,
    dataset: &Dataset,
    revision: Revision,
    previous: Option<OffsetDateTime>,
) -> Result<Resource, ResourceError> {
    let (user_managed, access_control) = split_mutable_partitions(dataset)?;
    Ok(Resource::new(metadata, revision, next_modified(previous))
        .with_graph(Partition::UserManaged, Arc::new(user_managed))
        .with_graph(Partition::AccessControl, Arc::new(access_control)))
}

/// Splits `dataset` into the user-managed and the access-control graph.
fn split_mutable_partitions(dataset: &Dataset) -> Result<(Graph, Graph), ConstraintViolation> {
    let mut user_managed = Graph::new();
    let mut access_control = Graph::new();
    for quad in dataset.iter() {
        let triple = TripleRef::from(quad);
        match Partition::from_graph_name(quad.graph_name) {
            Some(Partition::UserManaged) => user_managed.insert(triple),
            Some(Partition::AccessControl) => access_control.insert(triple),
            Some(partition) => return Err(ConstraintViolation::ReadOnlyPartition(partition)),
            None => {
                return Err(ConstraintViolation::UnknownGraph(
                    quad.graph_name.to_string(),
                ))
            }
        };
    }
    Ok((user_managed, access_control))
}

/// Returns the audit statements of `dataset`. Statements in other partitions are rejected.
fn audit_triples(dataset: &Dataset) -> Result<Vec<Triple>, ConstraintViolation> {
    dataset
        .iter()
        .map(|quad| match Partition::from_graph_name(quad.graph_name) {
            Some(Partition::Audit) => Ok(TripleRef::from(quad).into_owned()),
            Some(partition) => Err(ConstraintViolation::ReadOnlyPartition(partition)),
            None => Err(ConstraintViolation::UnknownGraph(
                quad.graph_name.to_string(),
            )),
        })
        .collect()
}

/// The modification time of a new snapshot. Never earlier than the previous one.
fn next_modified(previous: Option<OffsetDateTime>) -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    previous.map_or(now, |previous| previous.max(now))
}
