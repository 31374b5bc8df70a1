use crate::vocab::trellis;
use oxrdf::{NamedNode, NamedNodeRef};
use time::OffsetDateTime;
use uuid::Uuid;

/// The security context of a request.
///
/// A session without an agent is anonymous. A session may act on behalf of another agent, in
/// which case it is restricted to the permissions both agents share.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    identifier: NamedNode,
    agent: Option<NamedNode>,
    delegated_by: Option<NamedNode>,
    created: OffsetDateTime,
}

impl Session {
    /// Creates an anonymous session.
    pub fn anonymous() -> Self {
        Self {
            identifier: NamedNode::new_unchecked(format!("urn:uuid:{}", Uuid::new_v4())),
            agent: None,
            delegated_by: None,
            created: OffsetDateTime::now_utc(),
        }
    }

    /// Creates a session for an authenticated `agent`.
    pub fn for_agent(agent: NamedNode) -> Self {
        Self {
            agent: Some(agent),
            ..Self::anonymous()
        }
    }

    /// Returns a session for the same agent that acts on behalf of `delegator`.
    #[must_use]
    pub fn with_delegation(mut self, delegator: NamedNode) -> Self {
        self.delegated_by = Some(delegator);
        self
    }

    pub fn identifier(&self) -> &NamedNode {
        &self.identifier
    }

    /// Returns the authenticated agent of this session, if any.
    pub fn agent(&self) -> Option<&NamedNode> {
        self.agent.as_ref()
    }

    /// Returns the agent of this session, using `trellis:AnonymousAgent` for anonymous sessions.
    pub fn agent_or_anonymous(&self) -> NamedNodeRef<'_> {
        self.agent
            .as_ref()
            .map_or(trellis::ANONYMOUS_AGENT, NamedNode::as_ref)
    }

    pub fn delegated_by(&self) -> Option<&NamedNode> {
        self.delegated_by.as_ref()
    }

    pub fn is_anonymous(&self) -> bool {
        self.agent.is_none()
    }

    pub fn created(&self) -> OffsetDateTime {
        self.created
    }
}
