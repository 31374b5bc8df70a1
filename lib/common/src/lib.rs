mod audit_service;
mod binary_service;
pub mod error;
mod event_service;
mod resource_store;

pub use audit_service::{ActivityType, AuditService};
pub use binary_service::{BinaryService, ByteStream};
pub use event_service::{Event, EventService};
pub use resource_store::ResourceStore;
