use crate::error::ResourceError;
use async_trait::async_trait;
use ldp_fusion_model::{Dataset, InteractionModel, Lookup, Metadata, NamedNodeRef, Revision};

/// Persists resources and their partitions.
///
/// # Consistency
///
/// Mutations of a single identifier are linearizable. If [Metadata::revision] is set, a mutation
/// only commits if the stored resource still has this revision. Readers observe either the state
/// before or after a mutation, never a partially applied one.
///
/// # Partitions
///
/// The dataset passed to [ResourceStore::create] and [ResourceStore::replace] contains the quads of
/// the mutable partitions, with the partition IRI as graph name. The audit partition can only be
/// extended with [ResourceStore::add]. Containment and membership are derived by the store and
/// cannot be written at all.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// Returns a new identifier that has not been returned before.
    fn generate_identifier(&self) -> String;

    /// Returns the interaction models that this store can persist.
    fn supported_interaction_models(&self) -> &[InteractionModel];

    /// Returns whether `interaction_model` is supported by this store.
    fn supports(&self, interaction_model: InteractionModel) -> bool {
        self.supported_interaction_models()
            .contains(&interaction_model)
    }

    /// Looks up the resource with the given identifier.
    ///
    /// Absent resources are reported as [Lookup::Missing] or [Lookup::Deleted]. Live containers
    /// include their containment and membership partitions.
    async fn get(&self, identifier: NamedNodeRef<'_>) -> Result<Lookup, ResourceError>;

    /// Looks up the stored state of a resource: its metadata and mutable partitions.
    ///
    /// The containment, membership, and audit partitions of the returned resource may be empty.
    /// Stores should override this method if deriving them is expensive, as it is used on every
    /// authorization.
    async fn get_stored(&self, identifier: NamedNodeRef<'_>) -> Result<Lookup, ResourceError> {
        self.get(identifier).await
    }

    /// Creates a new resource. Returns the revision of the created resource.
    ///
    /// Fails if a live resource with the same identifier exists. Deleted identifiers can be used
    /// again.
    async fn create(&self, metadata: Metadata, dataset: Dataset)
        -> Result<Revision, ResourceError>;

    /// Replaces the mutable partitions and the metadata of a live resource. Returns the new
    /// revision. The audit partition is kept.
    async fn replace(
        &self,
        metadata: Metadata,
        dataset: Dataset,
    ) -> Result<Revision, ResourceError>;

    /// Deletes a resource. Deleting an absent resource succeeds.
    async fn delete(&self, metadata: Metadata) -> Result<(), ResourceError>;

    /// Appends the quads of `dataset` to the audit partition of a resource.
    ///
    /// Audit statements can be added to deleted resources. The revision is not advanced.
    async fn add(
        &self,
        identifier: NamedNodeRef<'_>,
        dataset: Dataset,
    ) -> Result<(), ResourceError>;
}
