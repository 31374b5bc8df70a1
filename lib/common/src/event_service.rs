use crate::audit_service::ActivityType;
use ldp_fusion_model::{InteractionModel, NamedNode};
use time::OffsetDateTime;

/// Announces a committed mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub identifier: NamedNode,
    pub activity: ActivityType,
    /// The interaction model of the resource after the mutation.
    pub interaction_model: InteractionModel,
    pub agent: NamedNode,
    pub created: OffsetDateTime,
}

/// Delivers events to interested parties.
///
/// Emitting an event never fails the mutation it describes.
pub trait EventService: Send + Sync {
    fn emit(&self, event: Event);
}
