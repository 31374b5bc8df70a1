use crate::{AccessModes, Authorization};
use async_trait::async_trait;
use ldp_fusion_common::error::{CorruptionError, ResourceError};
use ldp_fusion_common::ResourceStore;
use ldp_fusion_model::vocab::{acl, foaf, trellis, vcard};
use ldp_fusion_model::{
    IdentifierMapper, Lookup, NamedNode, NamedNodeRef, Partition, Session, TripleRef,
};
use rustc_hash::FxHashSet;
use std::sync::Arc;
use tracing::{debug, trace};

/// Computes the access modes a session has on a resource.
#[async_trait]
pub trait AccessControl: Send + Sync {
    /// Returns the modes `session` may exercise on `target`. The target does not have to exist.
    async fn access_modes(
        &self,
        target: NamedNodeRef<'_>,
        session: &Session,
    ) -> Result<AccessModes, ResourceError>;
}

/// Configuration of the [WebAcService].
#[derive(Clone, Debug)]
pub struct WebAcConfig {
    /// Agents that have every mode on every resource.
    pub admin_agents: Vec<NamedNode>,
    /// The authorizations that apply if no resource on the way to the root has an ACL. Their
    /// scope is ignored.
    pub root_policy: Vec<Authorization>,
    /// The maximum number of resources visited while looking for an ACL.
    pub max_depth: usize,
    pub mapper: IdentifierMapper,
}

impl Default for WebAcConfig {
    fn default() -> Self {
        Self {
            admin_agents: vec![trellis::ADMINISTRATOR_AGENT.into_owned()],
            root_policy: vec![
                Authorization::new(AccessModes::ALL).with_agent_class(foaf::AGENT.into_owned())
            ],
            max_depth: 512,
            mapper: IdentifierMapper::default(),
        }
    }
}

impl WebAcConfig {
    #[must_use]
    pub fn with_admin_agent(mut self, agent: NamedNode) -> Self {
        self.admin_agents.push(agent);
        self
    }

    #[must_use]
    pub fn with_root_policy(mut self, root_policy: Vec<Authorization>) -> Self {
        self.root_policy = root_policy;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_mapper(mut self, mapper: IdentifierMapper) -> Self {
        self.mapper = mapper;
        self
    }
}

/// The authorizations that govern a target.
struct Policy<'a> {
    authorizations: Vec<Authorization>,
    root: &'a [Authorization],
    /// The resource whose ACL was found and whether it is an ancestor of the target. [None] if
    /// the root policy applies.
    scope: Option<(NamedNode, bool)>,
}

impl Policy<'_> {
    fn applicable(&self) -> impl Iterator<Item = &Authorization> + '_ {
        let authorizations = match self.scope {
            Some(_) => self.authorizations.as_slice(),
            None => self.root,
        };
        authorizations
            .iter()
            .filter(move |authorization| match &self.scope {
                Some((resolved, inherited)) => authorization.applies_to(resolved.as_ref(), *inherited),
                None => true,
            })
    }
}

/// Resolves access modes from the WebAC statements in the access-control partition of the
/// resources in a [ResourceStore].
///
/// The ACL of a resource is found by walking from the resource towards the root container. The
/// first resource with a non-empty access-control partition governs the target. If it is an
/// ancestor of the target, only its `acl:default` authorizations are inherited.
pub struct WebAcService {
    store: Arc<dyn ResourceStore>,
    config: WebAcConfig,
}

impl WebAcService {
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        Self::with_config(store, WebAcConfig::default())
    }

    pub fn with_config(store: Arc<dyn ResourceStore>, config: WebAcConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &WebAcConfig {
        &self.config
    }

    fn is_admin(&self, agent: NamedNodeRef<'_>) -> bool {
        self.config
            .admin_agents
            .iter()
            .any(|admin| admin.as_ref() == agent)
    }

    /// Finds the policy that governs `target`.
    async fn resolve(&self, target: NamedNodeRef<'_>) -> Result<Policy<'_>, ResourceError> {
        let mut visited = FxHashSet::default();
        let mut next = Some(target.into_owned());

        while let Some(identifier) = next {
            if visited.len() >= self.config.max_depth {
                return Err(CorruptionError::msg(format!(
                    "Exceeded the maximum depth of {} while resolving the ACL of {target}",
                    self.config.max_depth
                ))
                .into());
            }
            if !visited.insert(identifier.clone()) {
                return Err(CorruptionError::msg(format!(
                    "Cycle at {identifier} while resolving the ACL of {target}"
                ))
                .into());
            }

            next = match self.store.get_stored(identifier.as_ref()).await? {
                Lookup::Live(resource) => {
                    if resource.has_acl() {
                        let inherited = identifier.as_ref() != target;
                        trace!(%target, resolved = %identifier, inherited, "Found ACL");
                        return Ok(Policy {
                            authorizations: resource
                                .graph(Partition::AccessControl)
                                .map_or_else(Vec::new, Authorization::from_graph),
                            root: &self.config.root_policy,
                            scope: Some((identifier, inherited)),
                        });
                    }
                    resource.container().cloned()
                }
                Lookup::Missing | Lookup::Deleted => {
                    self.config.mapper.container_of(identifier.as_ref())
                }
            };
        }

        trace!(%target, "No ACL found, using the root policy");
        Ok(Policy {
            authorizations: Vec::new(),
            root: &self.config.root_policy,
            scope: None,
        })
    }

    /// Computes the modes of a single agent under `policy`.
    async fn agent_modes(
        &self,
        policy: &Policy<'_>,
        agent: NamedNodeRef<'_>,
        authenticated: bool,
    ) -> Result<AccessModes, ResourceError> {
        let mut modes = AccessModes::NONE;
        for authorization in policy.applicable() {
            if authorization.modes.intersection(modes) == authorization.modes {
                continue;
            }
            if self.matches(authorization, agent, authenticated).await? {
                modes = modes.union(authorization.modes);
            }
        }
        Ok(modes)
    }

    async fn matches(
        &self,
        authorization: &Authorization,
        agent: NamedNodeRef<'_>,
        authenticated: bool,
    ) -> Result<bool, ResourceError> {
        if authorization.agents.iter().any(|a| a.as_ref() == agent) {
            return Ok(true);
        }
        if authorization.agent_classes.iter().any(|class| {
            class.as_ref() == foaf::AGENT
                || (authenticated && class.as_ref() == acl::AUTHENTICATED_AGENT)
        }) {
            return Ok(true);
        }
        for group in &authorization.agent_groups {
            if self.is_member(group.as_ref(), agent).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Checks whether the group resource lists `agent` as a member. The group is described in
    /// the user-managed partition of the resource identified by the group IRI without its
    /// fragment.
    async fn is_member(
        &self,
        group: NamedNodeRef<'_>,
        agent: NamedNodeRef<'_>,
    ) -> Result<bool, ResourceError> {
        let document = group
            .as_str()
            .split_once('#')
            .map_or(group.as_str(), |(document, _)| document);
        let Some(resource) = self
            .store
            .get_stored(NamedNodeRef::new_unchecked(document))
            .await?
            .into_live()
        else {
            return Ok(false);
        };
        Ok(resource
            .graph(Partition::UserManaged)
            .is_some_and(|graph| graph.contains(TripleRef::new(group, vcard::HAS_MEMBER, agent))))
    }
}

#[async_trait]
impl AccessControl for WebAcService {
    async fn access_modes(
        &self,
        target: NamedNodeRef<'_>,
        session: &Session,
    ) -> Result<AccessModes, ResourceError> {
        let agent = session.agent_or_anonymous();
        if self.is_admin(agent) {
            debug!(%target, %agent, "Administrator has every mode");
            return Ok(AccessModes::ALL);
        }

        let policy = self.resolve(target).await?;
        let mut modes = self
            .agent_modes(&policy, agent, !session.is_anonymous())
            .await?;
        if let Some(delegator) = session.delegated_by() {
            let delegator_modes = if self.is_admin(delegator.as_ref()) {
                AccessModes::ALL
            } else {
                self.agent_modes(&policy, delegator.as_ref(), true).await?
            };
            modes = modes.intersection(delegator_modes);
        }

        debug!(%target, %agent, %modes, "Resolved access modes");
        Ok(modes)
    }
}
