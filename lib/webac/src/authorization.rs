use crate::{AccessMode, AccessModes};
use itertools::Itertools;
use ldp_fusion_model::vocab::acl;
use ldp_fusion_model::{Graph, NamedNode, NamedNodeRef, SubjectRef, TermRef};

/// A single authorization of an access-control graph.
///
/// An authorization grants its `modes` to the agents it names, on the resources it is scoped to.
/// `access_to` scopes it to the resource whose ACL contains it, `default` to the descendants of
/// that resource.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Authorization {
    pub agents: Vec<NamedNode>,
    pub agent_classes: Vec<NamedNode>,
    pub agent_groups: Vec<NamedNode>,
    pub access_to: Vec<NamedNode>,
    pub default: Vec<NamedNode>,
    pub modes: AccessModes,
}

impl Authorization {
    /// Creates an authorization that grants `modes` to nobody.
    pub fn new(modes: impl Into<AccessModes>) -> Self {
        Self {
            modes: modes.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_agent(mut self, agent: NamedNode) -> Self {
        self.agents.push(agent);
        self
    }

    #[must_use]
    pub fn with_agent_class(mut self, agent_class: NamedNode) -> Self {
        self.agent_classes.push(agent_class);
        self
    }

    #[must_use]
    pub fn with_agent_group(mut self, agent_group: NamedNode) -> Self {
        self.agent_groups.push(agent_group);
        self
    }

    #[must_use]
    pub fn with_access_to(mut self, resource: NamedNode) -> Self {
        self.access_to.push(resource);
        self
    }

    #[must_use]
    pub fn with_default(mut self, resource: NamedNode) -> Self {
        self.default.push(resource);
        self
    }

    /// Extracts all authorizations of an access-control graph. Every subject with at least one
    /// `acl:mode` is an authorization; unknown modes are ignored.
    pub fn from_graph(graph: &Graph) -> Vec<Authorization> {
        graph
            .triples_for_predicate(acl::MODE)
            .map(|triple| triple.subject)
            .unique()
            .map(|subject| Self::from_subject(graph, subject))
            .collect()
    }

    fn from_subject(graph: &Graph, subject: SubjectRef<'_>) -> Authorization {
        let named_objects = |predicate: NamedNodeRef<'_>| -> Vec<NamedNode> {
            graph
                .objects_for_subject_predicate(subject, predicate)
                .filter_map(|object| match object {
                    TermRef::NamedNode(node) => Some(node.into_owned()),
                    _ => None,
                })
                .collect()
        };

        let modes = graph
            .objects_for_subject_predicate(subject, acl::MODE)
            .filter_map(|object| match object {
                TermRef::NamedNode(node) => AccessMode::from_iri(node),
                _ => None,
            })
            .collect();

        Authorization {
            agents: named_objects(acl::AGENT),
            agent_classes: named_objects(acl::AGENT_CLASS),
            agent_groups: named_objects(acl::AGENT_GROUP),
            access_to: named_objects(acl::ACCESS_TO),
            default: named_objects(acl::DEFAULT),
            modes,
        }
    }

    /// Returns whether this authorization is scoped to `resolved`, the resource whose ACL
    /// contains it. Inherited authorizations must name it with `acl:default`.
    pub fn applies_to(&self, resolved: NamedNodeRef<'_>, inherited: bool) -> bool {
        let scope = if inherited {
            &self.default
        } else {
            &self.access_to
        };
        scope.iter().any(|resource| resource.as_ref() == resolved)
    }
}
