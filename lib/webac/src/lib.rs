#![doc(test(attr(deny(warnings))))]
//! Web Access Control for resources of a [ResourceStore](ldp_fusion_common::ResourceStore).
//!
//! The [WebAcService] resolves the [AccessModes] a session has on a resource by walking the
//! containment hierarchy until it finds an ACL. The [AuthorizationGate] uses these modes to
//! accept or reject requests.
//!
//! ```
//! use ldp_fusion_model::{IdentifierMapper, Session};
//! use ldp_fusion_storage::memory::MemResourceStore;
//! use ldp_fusion_webac::{AccessControl, AccessModes, WebAcService};
//! use std::sync::Arc;
//!
//! let store = Arc::new(MemResourceStore::new());
//! let service = WebAcService::new(store);
//! let target = IdentifierMapper::default().resource("missing/resource");
//!
//! // Without any ACL, the root policy grants every mode to the public.
//! let modes = tokio_test::block_on(service.access_modes(target.as_ref(), &Session::anonymous()))?;
//! assert_eq!(modes, AccessModes::ALL);
//! # Result::<_, Box<dyn std::error::Error>>::Ok(())
//! ```

mod access_mode;
mod authorization;
mod error;
mod gate;
mod service;

pub use access_mode::{AccessMode, AccessModes};
pub use authorization::Authorization;
pub use error::AuthorizationError;
pub use gate::{AclLink, AuthorizationGate, AuthorizationRequest, GateConfig};
pub use service::{AccessControl, WebAcConfig, WebAcService};
