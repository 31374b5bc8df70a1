use crate::error::StorageError;
use async_trait::async_trait;
use futures::stream::BoxStream;
use ldp_fusion_model::{BinaryMetadata, NamedNode, NamedNodeRef};
use std::io;

/// The content of a non-RDF source as a stream of chunks.
pub type ByteStream = BoxStream<'static, io::Result<Vec<u8>>>;

/// Stores the content of non-RDF sources.
///
/// Failing to persist content aborts the creation or replacement of the resource that refers to
/// it.
#[async_trait]
pub trait BinaryService: Send + Sync {
    /// Returns a new location for binary content.
    fn generate_identifier(&self) -> NamedNode;

    /// Stores `content` at the location given in `metadata`.
    async fn persist(
        &self,
        metadata: &BinaryMetadata,
        content: ByteStream,
    ) -> Result<(), StorageError>;

    /// Returns the content stored at `location`, if any.
    async fn get(&self, location: NamedNodeRef<'_>) -> Result<Option<ByteStream>, StorageError>;

    /// Removes the content stored at `location`.
    async fn purge(&self, location: NamedNodeRef<'_>) -> Result<(), StorageError>;
}
