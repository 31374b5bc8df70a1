//! Handling of LDP requests on top of a [ResourceStore].
//!
//! The entry point of the module is the [`ResourceManager`] struct. Every request passes the
//! [AuthorizationGate] before the store is touched. Mutations are recorded in the audit partition
//! of the resource and announced to an [EventService] once they are committed.
//!
//! Usage example:
//! ```
//! use ldp_fusion::manager::ResourceManager;
//! use ldp_fusion::model::vocab::rdf;
//! use ldp_fusion::model::*;
//! use ldp_fusion::request::{Content, LdpRequest};
//!
//! # tokio_test::block_on(async {
//! let manager = ResourceManager::in_memory();
//! let target = IdentifierMapper::default().resource("resource");
//!
//! // creation
//! let subject = NamedNode::new("http://localhost/resource")?;
//! let kind = NamedNode::new("http://example.com/Kind")?;
//! let mut graph = Graph::new();
//! graph.insert(TripleRef::new(&subject, rdf::TYPE, &kind));
//! let request = LdpRequest::new("PUT", target.clone(), Session::anonymous());
//! let response = manager.put(&request, Content::Rdf(graph), None).await?;
//! assert_eq!(response.status, 201);
//!
//! // retrieval
//! let request = LdpRequest::new("GET", target, Session::anonymous());
//! let representation = manager.get(&request).await?;
//! assert_eq!(representation.triples.len(), 1);
//! # Result::<_, Box<dyn std::error::Error>>::Ok(())
//! # }).unwrap();
//! ```

use crate::audit::DefaultAuditService;
use crate::config::{triple_preferences, ManagerConfig};
use crate::error::LdpError;
use crate::events::NoopEventService;
use crate::request::{Content, IfMatch, LdpRequest};
use ldp_fusion_common::error::{ConflictKind, ResourceError};
use ldp_fusion_common::{
    ActivityType, AuditService, BinaryService, ByteStream, Event, EventService, ResourceStore,
};
use ldp_fusion_model::vocab::ldp;
use ldp_fusion_model::{
    BinaryMetadata, Dataset, Graph, GraphNameRef, InteractionModel, Metadata, NamedNode,
    NamedNodeRef, Partition, QuadRef, Resource, Revision, Session, SubjectRef, TermRef, Triple,
};
use ldp_fusion_storage::memory::{MemBinaryService, MemResourceStore};
use ldp_fusion_webac::{
    AclLink, AuthorizationGate, AuthorizationRequest, GateConfig, WebAcService,
};
use std::sync::Arc;
use time::OffsetDateTime;
use tracing::{debug, trace, warn};

/// The outcome of a successful mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    /// `201` if a resource was created, `204` otherwise.
    pub status: u16,
    /// The internal identifier of the affected resource.
    pub identifier: NamedNode,
    /// The revision of the resource after the mutation. Used as the entity tag.
    pub revision: Option<Revision>,
    /// The types to advertise with `Link: <...>; rel="type"`.
    pub types: Vec<NamedNode>,
    pub acl_link: Option<AclLink>,
}

/// The representation of a resource.
pub struct Representation {
    pub resource: Arc<Resource>,
    /// The statements of the requested partitions, relative to the base URL of the request.
    pub triples: Vec<Triple>,
    /// The content of a non-RDF source, unless another view was requested with `ext`.
    pub binary: Option<ByteStream>,
    pub types: Vec<NamedNode>,
    pub acl_link: Option<AclLink>,
}

/// What a create or replace writes.
struct WriteRequest<'a> {
    request: &'a LdpRequest,
    target: NamedNode,
    base_url: &'a str,
    current: Option<Arc<Resource>>,
    content: Content,
    interaction_model: Option<InteractionModel>,
    /// The container to generate a name in if `target` was named by a slug that got taken.
    fallback: Option<&'a NamedNode>,
}

/// Executes LDP requests against a [ResourceStore].
pub struct ResourceManager {
    store: Arc<dyn ResourceStore>,
    binaries: Arc<dyn BinaryService>,
    gate: AuthorizationGate,
    audit: Arc<dyn AuditService>,
    events: Arc<dyn EventService>,
    config: ManagerConfig,
}

impl ResourceManager {
    /// Creates a [ResourceManager] that authorizes requests with a [WebAcService] on the same
    /// store.
    pub fn new(store: Arc<dyn ResourceStore>, binaries: Arc<dyn BinaryService>) -> Self {
        let access_control = Arc::new(WebAcService::new(Arc::clone(&store)));
        Self {
            store,
            binaries,
            gate: AuthorizationGate::new(access_control, GateConfig::default()),
            audit: Arc::new(DefaultAuditService),
            events: Arc::new(NoopEventService),
            config: ManagerConfig::default(),
        }
    }

    /// Creates a [ResourceManager] backed by a [MemResourceStore] and a [MemBinaryService].
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemResourceStore::new()),
            Arc::new(MemBinaryService::default()),
        )
    }

    #[must_use]
    pub fn with_gate(mut self, gate: AuthorizationGate) -> Self {
        self.gate = gate;
        self
    }

    #[must_use]
    pub fn with_audit_service(mut self, audit: Arc<dyn AuditService>) -> Self {
        self.audit = audit;
        self
    }

    #[must_use]
    pub fn with_event_service(mut self, events: Arc<dyn EventService>) -> Self {
        self.events = events;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: ManagerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn store(&self) -> &Arc<dyn ResourceStore> {
        &self.store
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    fn base_url<'a>(&'a self, request: &'a LdpRequest) -> &'a str {
        request.base_url.as_deref().unwrap_or(&self.config.base_url)
    }

    fn is_acl_request(&self, request: &LdpRequest) -> bool {
        let acl_extension = &self.gate.config().acl_extension;
        request.ext.iter().any(|ext| ext == acl_extension)
    }

    /// Returns the representation of the target.
    ///
    /// An `ext` value that names a configured extension selects the corresponding partition.
    /// Otherwise, the partitions follow the `include` and `omit` preferences.
    pub async fn get(&self, request: &LdpRequest) -> Result<Representation, LdpError> {
        let base_url = self.base_url(request);
        let authorization = request.authorization(base_url);
        self.gate.authorize(&authorization).await?;

        let resource = self.live(request.target.as_ref()).await?;
        let partitions = request
            .ext
            .iter()
            .find_map(|ext| self.config.extension_partition(ext))
            .map_or_else(
                || triple_preferences(&request.include, &request.omit),
                |partition| vec![partition],
            );
        trace!(resource = %request.target, ?partitions, "Building representation");

        let mapper = &self.config.mapper;
        let triples = partitions
            .iter()
            .flat_map(|partition| resource.triples(*partition))
            .map(|triple| {
                let triple = mapper.unskolemize_triple(triple);
                mapper.external_triple(triple.as_ref(), base_url)
            })
            .collect();

        let binary = match resource.binary() {
            Some(binary) if request.ext.is_empty() => self
                .binaries
                .get(binary.location.as_ref())
                .await
                .map_err(LdpError::Binary)?,
            _ => None,
        };

        // The ACL and the description of a non-RDF source are plain RDF sources.
        let types = effective_types(resource.interaction_model(), !request.ext.is_empty());
        Ok(Representation {
            types,
            acl_link: self.gate.acl_link(&authorization, 200),
            resource,
            triples,
            binary,
        })
    }

    /// Creates or replaces the target.
    ///
    /// Without an explicit `interaction_model`, an existing resource keeps its model, and a new
    /// resource becomes an `ldp:NonRDFSource` for binary content or an `ldp:RDFSource` otherwise.
    /// RDF content sent to a non-RDF source replaces its description. With `ext=acl`, the content
    /// replaces the access-control partition instead of the user-managed one.
    pub async fn put(
        &self,
        request: &LdpRequest,
        content: Content,
        interaction_model: Option<InteractionModel>,
    ) -> Result<Response, LdpError> {
        let base_url = self.base_url(request);
        let authorization = request.authorization(base_url);
        self.gate.authorize(&authorization).await?;

        let current = self.store.get(request.target.as_ref()).await?.into_live();
        match &current {
            Some(current) => self.check_preconditions(request, current)?,
            // Entity tags, `*` included, only match a live representation.
            None if request.if_match.is_some() => {
                return Err(ResourceError::PreconditionFailed(request.target.clone()).into());
            }
            None => {}
        }

        let response = self
            .write(WriteRequest {
                request,
                target: request.target.clone(),
                base_url,
                current,
                content,
                interaction_model,
                fallback: None,
            })
            .await?;
        Ok(Response {
            acl_link: self.gate.acl_link(&authorization, response.status),
            ..response
        })
    }

    /// Creates a new child of the target container.
    ///
    /// The child is named by `slug` if it is a single, unused path segment. Otherwise, the store
    /// generates a name.
    pub async fn post(
        &self,
        request: &LdpRequest,
        slug: Option<&str>,
        content: Content,
        interaction_model: Option<InteractionModel>,
    ) -> Result<Response, LdpError> {
        let base_url = self.base_url(request);
        let authorization = request.authorization(base_url);
        self.gate.authorize(&authorization).await?;

        let container = self.live(request.target.as_ref()).await?;
        if !container.interaction_model().is_container() {
            return Err(LdpError::NotAContainer(request.target.clone()));
        }

        let (target, from_slug) = self.child_identifier(container.identifier(), slug).await?;
        debug!(container = %request.target, %target, "Creating child resource");
        let response = self
            .write(WriteRequest {
                request,
                target,
                base_url,
                current: None,
                content,
                interaction_model,
                fallback: from_slug.then(|| container.identifier()),
            })
            .await?;

        let child = AuthorizationRequest {
            target: response.identifier.as_ref(),
            ..authorization
        };
        let acl_link = self.gate.acl_link(&child, response.status);
        Ok(Response {
            acl_link,
            ..response
        })
    }

    /// Deletes the target. With `ext=acl`, only the access-control partition is removed.
    pub async fn delete(&self, request: &LdpRequest) -> Result<Response, LdpError> {
        let base_url = self.base_url(request);
        let authorization = request.authorization(base_url);
        self.gate.authorize(&authorization).await?;

        let current = self.live(request.target.as_ref()).await?;
        self.check_preconditions(request, &current)?;
        let target = current.identifier().clone();

        if self.is_acl_request(request) {
            let mut dataset = Dataset::new();
            for quad in current.stream(Partition::UserManaged) {
                dataset.insert(&quad);
            }
            debug!(%target, "Removing the ACL");
            let revision = self.store.replace(current.metadata(), dataset).await?;
            self.record(
                &target,
                &request.session,
                ActivityType::Update,
                InteractionModel::RdfSource,
            )
            .await?;
            return Ok(Response {
                status: 204,
                identifier: target,
                revision: Some(revision),
                types: effective_types(current.interaction_model(), true),
                acl_link: None,
            });
        }

        debug!(%target, "Deleting resource");
        self.store.delete(current.metadata()).await?;
        self.record(
            &target,
            &request.session,
            ActivityType::Delete,
            current.interaction_model(),
        )
        .await?;
        Ok(Response {
            status: 204,
            identifier: target,
            revision: None,
            types: Vec::new(),
            acl_link: None,
        })
    }

    async fn live(&self, identifier: NamedNodeRef<'_>) -> Result<Arc<Resource>, ResourceError> {
        self.store
            .get(identifier)
            .await?
            .into_live()
            .ok_or_else(|| ResourceError::NotFound(identifier.into_owned()))
    }

    fn check_preconditions(
        &self,
        request: &LdpRequest,
        current: &Resource,
    ) -> Result<(), ResourceError> {
        match request.if_match {
            None if self.config.precondition_required => {
                Err(ResourceError::PreconditionRequired(request.target.clone()))
            }
            None | Some(IfMatch::Any) => Ok(()),
            Some(IfMatch::Revision(revision)) if revision == current.revision() => Ok(()),
            Some(IfMatch::Revision(_)) => {
                Err(ResourceError::PreconditionFailed(request.target.clone()))
            }
        }
    }

    /// Names a new child of `container`. Also returns whether the name was taken from `slug`.
    async fn child_identifier(
        &self,
        container: &NamedNode,
        slug: Option<&str>,
    ) -> Result<(NamedNode, bool), ResourceError> {
        if let Some(slug) = slug.map(str::trim) {
            if !slug.is_empty() && !slug.contains(['/', '?', '#']) {
                let candidate = self.child(container, slug);
                if NamedNode::new(candidate.as_str()).is_ok()
                    && !self.store.get(candidate.as_ref()).await?.is_live()
                {
                    return Ok((candidate, true));
                }
                trace!(slug, "Slug is not usable, generating an identifier");
            }
        }
        Ok((self.generated_child(container), false))
    }

    fn child(&self, container: &NamedNode, segment: &str) -> NamedNode {
        let mapper = &self.config.mapper;
        let parent = mapper
            .path(container.as_ref())
            .unwrap_or_default()
            .trim_end_matches('/');
        if parent.is_empty() {
            mapper.resource(segment)
        } else {
            mapper.resource(&format!("{parent}/{segment}"))
        }
    }

    fn generated_child(&self, container: &NamedNode) -> NamedNode {
        self.child(container, &self.store.generate_identifier())
    }

    /// Creates a resource named by a slug. If another request took the name in the meantime, the
    /// resource is created once more under a generated name in `container`.
    async fn create_named(
        &self,
        target: &mut NamedNode,
        container: &NamedNode,
        metadata: Metadata,
        dataset: Dataset,
    ) -> Result<Revision, ResourceError> {
        match self.store.create(metadata.clone(), dataset.clone()).await {
            Err(ResourceError::AlreadyExists(_)) => {
                let generated = self.generated_child(container);
                debug!(slug = %target, %generated, "Slug was taken concurrently, generating an identifier");
                *target = generated;
                let metadata = Metadata {
                    identifier: target.clone(),
                    ..metadata
                };
                self.store.create(metadata, dataset).await
            }
            result => result,
        }
    }

    /// Creates or replaces a resource, then records the activity.
    async fn write(&self, write: WriteRequest<'_>) -> Result<Response, LdpError> {
        let WriteRequest {
            request,
            mut target,
            base_url,
            current,
            content,
            interaction_model,
            fallback,
        } = write;
        let acl_request = self.is_acl_request(request);
        if acl_request && content.is_binary() {
            return Err(LdpError::BinaryNotAcceptable(InteractionModel::RdfSource));
        }

        let binary_description = !content.is_binary()
            && current
                .as_ref()
                .is_some_and(|c| c.interaction_model() == InteractionModel::NonRdfSource);
        let model = if binary_description {
            InteractionModel::NonRdfSource
        } else {
            interaction_model
                .or_else(|| current.as_ref().map(|c| c.interaction_model()))
                .unwrap_or(if content.is_binary() {
                    InteractionModel::NonRdfSource
                } else {
                    InteractionModel::RdfSource
                })
        };

        if !self.store.supports(model) {
            return Err(ResourceError::UnsupportedInteractionModel(model).into());
        }
        if let Some(current) = &current {
            if !binary_description && !current.interaction_model().can_become(model) {
                warn!(%target, current = %current.interaction_model(), requested = %model, "Rejected interaction model change");
                return Err(ResourceError::Conflict {
                    identifier: target,
                    kind: ConflictKind::InteractionModelChange {
                        current: current.interaction_model(),
                        requested: model,
                    },
                }
                .into());
            }
        }
        debug!(%target, interaction_model = %model, acl_request, "Writing resource");

        let (partition, other) = if acl_request {
            (Partition::AccessControl, Partition::UserManaged)
        } else {
            (Partition::UserManaged, Partition::AccessControl)
        };

        let mut metadata = match &current {
            Some(current) => Metadata {
                interaction_model: model,
                ..current.metadata()
            },
            None => {
                let mut metadata = Metadata::new(target.clone(), model);
                metadata.container = self.config.mapper.container_of(target.as_ref());
                metadata
            }
        };

        let (mut dataset, persisted) = match content {
            Content::Binary { content, mime_type } => {
                if model != InteractionModel::NonRdfSource {
                    return Err(LdpError::BinaryNotAcceptable(model));
                }
                let mut binary = BinaryMetadata::new(self.binaries.generate_identifier());
                binary.mime_type = mime_type;
                debug!(%target, location = %binary.location, "Persisting binary content");
                self.binaries
                    .persist(&binary, content)
                    .await
                    .map_err(LdpError::Binary)?;
                metadata.binary = Some(binary.clone());
                (Dataset::new(), Some(binary))
            }
            Content::Rdf(graph) => (self.internal_dataset(&graph, partition, base_url), None),
        };
        if !acl_request {
            set_membership(&mut metadata, &dataset);
        }
        if let Some(current) = &current {
            for quad in current.stream(other) {
                dataset.insert(&quad);
            }
        }

        let result = match (&current, fallback) {
            (Some(_), _) => self.store.replace(metadata, dataset).await,
            (None, Some(container)) => {
                self.create_named(&mut target, container, metadata, dataset)
                    .await
            }
            (None, None) => self.store.create(metadata, dataset).await,
        };
        let revision = match result {
            Ok(revision) => revision,
            Err(error) => {
                if let Some(binary) = persisted {
                    self.purge(&binary).await;
                }
                return Err(error.into());
            }
        };

        let (activity, status) = match current {
            Some(_) => (ActivityType::Update, 204),
            None => (ActivityType::Create, 201),
        };
        let event_model = if acl_request {
            InteractionModel::RdfSource
        } else {
            model
        };
        self.record(&target, &request.session, activity, event_model)
            .await?;

        Ok(Response {
            status,
            identifier: target,
            revision: Some(revision),
            types: effective_types(model, acl_request || binary_description),
            acl_link: None,
        })
    }

    async fn purge(&self, binary: &BinaryMetadata) {
        if let Err(error) = self.binaries.purge(binary.location.as_ref()).await {
            warn!(location = %binary.location, %error, "Could not purge orphaned binary content");
        }
    }

    /// Appends the audit statements of an activity and announces it.
    async fn record(
        &self,
        target: &NamedNode,
        session: &Session,
        activity: ActivityType,
        interaction_model: InteractionModel,
    ) -> Result<(), ResourceError> {
        let mut audit = Dataset::new();
        for quad in self.audit.activity(target.as_ref(), session, activity) {
            audit.insert(&self.config.mapper.skolemize_quad(quad.as_ref()));
        }
        trace!(%target, %activity, statements = audit.len(), "Recording activity");
        self.store.add(target.as_ref(), audit).await?;

        self.events.emit(Event {
            identifier: target.clone(),
            activity,
            interaction_model,
            agent: session.agent_or_anonymous().into_owned(),
            created: OffsetDateTime::now_utc(),
        });
        Ok(())
    }

    /// Translates client statements into skolemized statements with internal identifiers.
    fn internal_dataset(&self, graph: &Graph, partition: Partition, base_url: &str) -> Dataset {
        let mapper = &self.config.mapper;
        let graph_name = partition.graph_name();
        let mut dataset = Dataset::new();
        for triple in graph {
            let triple = mapper.internal_triple(triple, base_url);
            let triple = mapper.skolemize_triple(triple.as_ref());
            dataset.insert(QuadRef::new(
                &triple.subject,
                &triple.predicate,
                &triple.object,
                graph_name,
            ));
        }
        dataset
    }
}

/// Reads the membership configuration of a container from its user-managed statements.
fn set_membership(metadata: &mut Metadata, dataset: &Dataset) {
    if !metadata.interaction_model.has_membership() {
        metadata.membership_resource = None;
        metadata.member_relation = None;
        metadata.member_of_relation = None;
        metadata.inserted_content_relation = None;
        return;
    }

    let subject = metadata.identifier.clone();
    let graph_name = GraphNameRef::NamedNode(Partition::UserManaged.graph_name());
    let object = |predicate: NamedNodeRef<'_>| {
        dataset
            .iter()
            .filter(|quad| {
                quad.subject == SubjectRef::NamedNode(subject.as_ref())
                    && quad.predicate == predicate
                    && quad.graph_name == graph_name
            })
            .find_map(|quad| match quad.object {
                TermRef::NamedNode(node) => Some(node.into_owned()),
                _ => None,
            })
    };

    metadata.membership_resource = object(ldp::MEMBERSHIP_RESOURCE);
    metadata.member_relation = object(ldp::HAS_MEMBER_RELATION);
    metadata.member_of_relation = object(ldp::IS_MEMBER_OF_RELATION);
    metadata.inserted_content_relation = object(ldp::INSERTED_CONTENT_RELATION);
}

/// The types to advertise for a resource.
fn effective_types(model: InteractionModel, rdf_view: bool) -> Vec<NamedNode> {
    let model = if rdf_view {
        InteractionModel::RdfSource
    } else {
        model
    };
    model
        .types()
        .into_iter()
        .map(NamedNodeRef::into_owned)
        .collect()
}
