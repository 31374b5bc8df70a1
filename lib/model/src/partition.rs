use crate::vocab::{ldp, trellis};
use oxrdf::{GraphNameRef, NamedNodeRef};
use std::fmt::{Display, Formatter};

/// A named, non-overlapping set of statements of a resource.
///
/// Stored partitions are written by clients ([Partition::UserManaged],
/// [Partition::AccessControl]) or appended by the server ([Partition::Audit]). Derived partitions
/// ([Partition::Containment], [Partition::Membership]) are computed when a resource is read and
/// are never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Partition {
    UserManaged,
    AccessControl,
    Audit,
    Containment,
    Membership,
}

impl Partition {
    pub const ALL: [Partition; 5] = [
        Partition::UserManaged,
        Partition::AccessControl,
        Partition::Audit,
        Partition::Containment,
        Partition::Membership,
    ];

    /// The partitions that are replaced as a whole by a create or replace operation.
    pub const MUTABLE: [Partition; 2] = [Partition::UserManaged, Partition::AccessControl];

    /// The name of the graph that holds the statements of this partition.
    pub fn graph_name(self) -> NamedNodeRef<'static> {
        match self {
            Partition::UserManaged => trellis::PREFER_USER_MANAGED,
            Partition::AccessControl => trellis::PREFER_ACCESS_CONTROL,
            Partition::Audit => trellis::PREFER_AUDIT,
            Partition::Containment => ldp::PREFER_CONTAINMENT,
            Partition::Membership => ldp::PREFER_MEMBERSHIP,
        }
    }

    /// Looks up the partition that is stored in `graph_name`.
    pub fn from_graph_name(graph_name: GraphNameRef<'_>) -> Option<Self> {
        match graph_name {
            GraphNameRef::NamedNode(name) => {
                Self::ALL.into_iter().find(|p| p.graph_name() == name)
            }
            _ => None,
        }
    }

    /// Returns whether the partition is computed by the server when the resource is read.
    pub fn is_derived(self) -> bool {
        matches!(self, Partition::Containment | Partition::Membership)
    }

    /// Returns whether the partition can only grow.
    pub fn is_append_only(self) -> bool {
        self == Partition::Audit
    }
}

impl Display for Partition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.graph_name().as_str())
    }
}
