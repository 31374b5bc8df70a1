use async_trait::async_trait;
use dashmap::DashMap;
use futures::stream::{self, StreamExt, TryStreamExt};
use ldp_fusion_common::error::StorageError;
use ldp_fusion_common::{BinaryService, ByteStream};
use ldp_fusion_model::{BinaryMetadata, NamedNode, NamedNodeRef};
use rustc_hash::FxHasher;
use std::hash::BuildHasherDefault;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Keeps the content of non-RDF sources in memory.
#[derive(Debug)]
pub struct MemBinaryService {
    prefix: String,
    contents: DashMap<NamedNode, Arc<[u8]>, BuildHasherDefault<FxHasher>>,
}

impl Default for MemBinaryService {
    fn default() -> Self {
        Self::new("mem:binary/")
    }
}

impl MemBinaryService {
    /// Creates a new [MemBinaryService] whose locations start with `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            contents: DashMap::with_hasher(BuildHasherDefault::default()),
        }
    }

    /// Returns the number of stored contents.
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

#[async_trait]
impl BinaryService for MemBinaryService {
    fn generate_identifier(&self) -> NamedNode {
        NamedNode::new_unchecked(format!("{}{}", self.prefix, Uuid::new_v4()))
    }

    async fn persist(
        &self,
        metadata: &BinaryMetadata,
        content: ByteStream,
    ) -> Result<(), StorageError> {
        let bytes: Vec<u8> = content.try_concat().await?;
        debug!(location = %metadata.location, size = bytes.len(), "Persisted binary content");
        self.contents
            .insert(metadata.location.clone(), Arc::from(bytes));
        Ok(())
    }

    async fn get(&self, location: NamedNodeRef<'_>) -> Result<Option<ByteStream>, StorageError> {
        let Some(bytes) = self
            .contents
            .get(&location.into_owned())
            .map(|bytes| Arc::clone(bytes.value()))
        else {
            return Ok(None);
        };
        Ok(Some(stream::once(async move { Ok(bytes.to_vec()) }).boxed()))
    }

    async fn purge(&self, location: NamedNodeRef<'_>) -> Result<(), StorageError> {
        self.contents.remove(&location.into_owned());
        Ok(())
    }
}
