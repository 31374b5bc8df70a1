//! In-memory implementations of the storage contracts.
mod binary;
mod store;

pub use binary::MemBinaryService;
pub use store::MemResourceStore;
