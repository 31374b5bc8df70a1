use ldp_fusion_model::vocab::activity_streams;
use ldp_fusion_model::{NamedNodeRef, Quad, Session};
use std::fmt::{Display, Formatter};

/// The kind of a mutation that is recorded in the audit partition and announced as an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActivityType {
    Create,
    Update,
    Delete,
}

impl ActivityType {
    pub fn iri(self) -> NamedNodeRef<'static> {
        match self {
            ActivityType::Create => activity_streams::CREATE,
            ActivityType::Update => activity_streams::UPDATE,
            ActivityType::Delete => activity_streams::DELETE,
        }
    }
}

impl Display for ActivityType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.iri().as_str())
    }
}

/// Describes mutations as audit statements.
pub trait AuditService: Send + Sync {
    /// Returns the audit quads for an `activity` on the resource `identifier`.
    ///
    /// The quads belong to the audit partition. They may use blank nodes, which are skolemized
    /// before they are stored.
    fn activity(
        &self,
        identifier: NamedNodeRef<'_>,
        session: &Session,
        activity: ActivityType,
    ) -> Vec<Quad>;
}
