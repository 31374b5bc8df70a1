use crate::{create, mapper, Acl, ALICE, BOB};
use ldp_fusion_common::error::{ResourceError, StorageError};
use ldp_fusion_common::ResourceStore;
use ldp_fusion_model::vocab::{acl, foaf, trellis, vcard};
use async_trait::async_trait;
use ldp_fusion_model::{
    Dataset, InteractionModel, Lookup, Metadata, NamedNode, NamedNodeRef, Partition, QuadRef,
    Revision, Session,
};
use ldp_fusion_storage::memory::MemResourceStore;
use ldp_fusion_webac::{AccessControl, AccessMode, AccessModes, WebAcConfig, WebAcService};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn read() -> AccessModes {
    AccessModes::from(AccessMode::Read)
}

fn alice() -> Session {
    Session::for_agent(ALICE.into_owned())
}

fn bob() -> Session {
    Session::for_agent(BOB.into_owned())
}

/// A container that grants Read and Write on itself to Alice, and only Read to Alice on its
/// descendants.
async fn store_with_private_container() -> Arc<MemResourceStore> {
    let store = Arc::new(MemResourceStore::new());
    let container = mapper().resource("container");
    let acl = Acl::new(&container)
        .grant(&[acl::READ, acl::WRITE], acl::AGENT, ALICE, acl::ACCESS_TO)
        .grant(&[acl::READ], acl::AGENT, ALICE, acl::DEFAULT);
    create(
        &store,
        "container",
        InteractionModel::BasicContainer,
        acl.into_dataset(),
    )
    .await;
    create(
        &store,
        "container/child",
        InteractionModel::RdfSource,
        Dataset::new(),
    )
    .await;
    store
}

#[tokio::test]
async fn test_root_policy_without_acl() {
    let store = Arc::new(MemResourceStore::new());
    let service = WebAcService::new(store);
    let target = mapper().resource("a/b/c");

    let modes = service
        .access_modes(target.as_ref(), &Session::anonymous())
        .await
        .unwrap();
    assert_eq!(modes, AccessModes::ALL);
}

#[tokio::test]
async fn test_custom_root_policy() {
    let store = Arc::new(MemResourceStore::new());
    let service =
        WebAcService::with_config(store, WebAcConfig::default().with_root_policy(Vec::new()));
    let target = mapper().resource("resource");

    let modes = service.access_modes(target.as_ref(), &alice()).await.unwrap();
    assert!(modes.is_empty());
}

#[tokio::test]
async fn test_access_to_applies_to_resolved_resource() {
    let service = WebAcService::new(store_with_private_container().await);
    let container = mapper().resource("container");

    let modes = service
        .access_modes(container.as_ref(), &alice())
        .await
        .unwrap();
    assert_eq!(modes, read().with(AccessMode::Write));
}

#[tokio::test]
async fn test_default_is_inherited() {
    let service = WebAcService::new(store_with_private_container().await);

    for path in ["container/child", "container/missing", "container/missing/deeper"] {
        let target = mapper().resource(path);
        let modes = service.access_modes(target.as_ref(), &alice()).await.unwrap();
        assert_eq!(modes, read(), "{path}");
    }
}

#[tokio::test]
async fn test_agent_must_match() {
    let service = WebAcService::new(store_with_private_container().await);
    let child = mapper().resource("container/child");

    let bob_modes = service.access_modes(child.as_ref(), &bob()).await.unwrap();
    let anonymous_modes = service
        .access_modes(child.as_ref(), &Session::anonymous())
        .await
        .unwrap();
    assert!(bob_modes.is_empty());
    assert!(anonymous_modes.is_empty());
}

#[tokio::test]
async fn test_own_acl_replaces_inherited_acl() {
    let store = store_with_private_container().await;
    let child = mapper().resource("container/child");
    let acl = Acl::new(&child).grant(&[acl::APPEND], acl::AGENT, BOB, acl::ACCESS_TO);
    let current = store.get(child.as_ref()).await.unwrap().into_live().unwrap();
    store
        .replace(current.metadata(), acl.into_dataset())
        .await
        .unwrap();
    let service = WebAcService::new(store);

    let alice_modes = service.access_modes(child.as_ref(), &alice()).await.unwrap();
    let bob_modes = service.access_modes(child.as_ref(), &bob()).await.unwrap();
    assert!(alice_modes.is_empty());
    assert_eq!(bob_modes, AccessModes::from(AccessMode::Append));
}

#[tokio::test]
async fn test_deleted_resource_inherits_from_container() {
    let store = store_with_private_container().await;
    let child = mapper().resource("container/child");
    let acl = Acl::new(&child).grant(&[acl::CONTROL], acl::AGENT, BOB, acl::ACCESS_TO);
    let current = store.get(child.as_ref()).await.unwrap().into_live().unwrap();
    store
        .replace(current.metadata(), acl.into_dataset())
        .await
        .unwrap();
    store
        .delete(Metadata::new(child.clone(), InteractionModel::RdfSource))
        .await
        .unwrap();
    let service = WebAcService::new(store);

    let modes = service.access_modes(child.as_ref(), &alice()).await.unwrap();
    assert_eq!(modes, read());
}

#[tokio::test]
async fn test_agent_classes() {
    let store = Arc::new(MemResourceStore::new());
    let resource = mapper().resource("resource");
    let acl = Acl::new(&resource)
        .grant(&[acl::READ], acl::AGENT_CLASS, foaf::AGENT, acl::ACCESS_TO)
        .grant(
            &[acl::APPEND],
            acl::AGENT_CLASS,
            acl::AUTHENTICATED_AGENT,
            acl::ACCESS_TO,
        );
    create(&store, "resource", InteractionModel::RdfSource, acl.into_dataset()).await;
    let service = WebAcService::new(store);

    let anonymous_modes = service
        .access_modes(resource.as_ref(), &Session::anonymous())
        .await
        .unwrap();
    let bob_modes = service.access_modes(resource.as_ref(), &bob()).await.unwrap();
    assert_eq!(anonymous_modes, read());
    assert_eq!(bob_modes, read().with(AccessMode::Append));
}

#[tokio::test]
async fn test_agent_group() {
    let store = Arc::new(MemResourceStore::new());
    let group = NamedNode::new_unchecked(format!("{}#editors", mapper().resource("groups")));
    let mut members = Dataset::new();
    members.insert(QuadRef::new(
        &group,
        vcard::HAS_MEMBER,
        ALICE,
        Partition::UserManaged.graph_name(),
    ));
    create(&store, "groups", InteractionModel::RdfSource, members).await;

    let resource = mapper().resource("resource");
    let acl = Acl::new(&resource).grant(
        &[acl::READ, acl::WRITE],
        acl::AGENT_GROUP,
        group.as_ref(),
        acl::ACCESS_TO,
    );
    create(&store, "resource", InteractionModel::RdfSource, acl.into_dataset()).await;
    let service = WebAcService::new(store);

    let alice_modes = service.access_modes(resource.as_ref(), &alice()).await.unwrap();
    let bob_modes = service.access_modes(resource.as_ref(), &bob()).await.unwrap();
    assert_eq!(alice_modes, read().with(AccessMode::Write));
    assert!(bob_modes.is_empty());
}

#[tokio::test]
async fn test_missing_group_grants_nothing() {
    let store = Arc::new(MemResourceStore::new());
    let resource = mapper().resource("resource");
    let group = NamedNode::new_unchecked(format!("{}#editors", mapper().resource("nowhere")));
    let acl = Acl::new(&resource).grant(&[acl::READ], acl::AGENT_GROUP, group.as_ref(), acl::ACCESS_TO);
    create(&store, "resource", InteractionModel::RdfSource, acl.into_dataset()).await;
    let service = WebAcService::new(store);

    let modes = service.access_modes(resource.as_ref(), &alice()).await.unwrap();
    assert!(modes.is_empty());
}

#[tokio::test]
async fn test_administrator_has_every_mode() {
    let service = WebAcService::with_config(
        store_with_private_container().await,
        WebAcConfig::default().with_admin_agent(BOB.into_owned()),
    );
    let child = mapper().resource("container/child");

    let admin = Session::for_agent(trellis::ADMINISTRATOR_AGENT.into_owned());
    let admin_modes = service.access_modes(child.as_ref(), &admin).await.unwrap();
    let bob_modes = service.access_modes(child.as_ref(), &bob()).await.unwrap();
    assert_eq!(admin_modes, AccessModes::ALL);
    assert_eq!(bob_modes, AccessModes::ALL);
}

#[tokio::test]
async fn test_delegation_intersects_modes() {
    let service = WebAcService::new(store_with_private_container().await);
    let container = mapper().resource("container");

    // Bob acting on behalf of Alice has nothing as Bob has nothing.
    let bob_for_alice = bob().with_delegation(ALICE.into_owned());
    let modes = service
        .access_modes(container.as_ref(), &bob_for_alice)
        .await
        .unwrap();
    assert!(modes.is_empty());

    let admin_for_alice = Session::for_agent(trellis::ADMINISTRATOR_AGENT.into_owned())
        .with_delegation(ALICE.into_owned());
    let modes = service
        .access_modes(container.as_ref(), &admin_for_alice)
        .await
        .unwrap();
    assert_eq!(modes, AccessModes::ALL);
}

#[tokio::test]
async fn test_delegation_restricts_to_delegator() {
    let store = Arc::new(MemResourceStore::new());
    let resource = mapper().resource("resource");
    let acl = Acl::new(&resource)
        .grant(&[acl::READ, acl::WRITE], acl::AGENT, ALICE, acl::ACCESS_TO)
        .grant(&[acl::READ, acl::CONTROL], acl::AGENT, BOB, acl::ACCESS_TO);
    create(&store, "resource", InteractionModel::RdfSource, acl.into_dataset()).await;
    let service = WebAcService::new(store);

    let session = alice().with_delegation(BOB.into_owned());
    let modes = service.access_modes(resource.as_ref(), &session).await.unwrap();
    assert_eq!(modes, read());
}

#[tokio::test]
async fn test_cycle_is_corruption() {
    let store = Arc::new(MemResourceStore::new());
    let a = mapper().resource("a");
    let b = mapper().resource("b");
    store
        .create(
            Metadata::new(a.clone(), InteractionModel::BasicContainer).with_container(b.clone()),
            Dataset::new(),
        )
        .await
        .unwrap();
    store
        .create(
            Metadata::new(b, InteractionModel::BasicContainer).with_container(a.clone()),
            Dataset::new(),
        )
        .await
        .unwrap();
    let service = WebAcService::new(store);

    let result = service.access_modes(a.as_ref(), &alice()).await;
    assert!(matches!(
        result,
        Err(ResourceError::Storage(StorageError::Corruption(_)))
    ));
}

#[tokio::test]
async fn test_maximum_depth_is_corruption() {
    let store = Arc::new(MemResourceStore::new());
    let service =
        WebAcService::with_config(store, WebAcConfig::default().with_max_depth(3));

    let shallow = mapper().resource("a/b");
    let deep = mapper().resource("a/b/c/d");
    assert!(service.access_modes(shallow.as_ref(), &alice()).await.is_ok());
    assert!(matches!(
        service.access_modes(deep.as_ref(), &alice()).await,
        Err(ResourceError::Storage(StorageError::Corruption(_)))
    ));
}

/// Counts the lookups that compose derived partitions.
#[derive(Default)]
struct CountingStore {
    inner: MemResourceStore,
    composed: AtomicUsize,
}

#[async_trait]
impl ResourceStore for CountingStore {
    fn generate_identifier(&self) -> String {
        self.inner.generate_identifier()
    }

    fn supported_interaction_models(&self) -> &[InteractionModel] {
        self.inner.supported_interaction_models()
    }

    async fn get(&self, identifier: NamedNodeRef<'_>) -> Result<Lookup, ResourceError> {
        self.composed.fetch_add(1, Ordering::Relaxed);
        self.inner.get(identifier).await
    }

    async fn get_stored(&self, identifier: NamedNodeRef<'_>) -> Result<Lookup, ResourceError> {
        self.inner.get_stored(identifier).await
    }

    async fn create(
        &self,
        metadata: Metadata,
        dataset: Dataset,
    ) -> Result<Revision, ResourceError> {
        self.inner.create(metadata, dataset).await
    }

    async fn replace(
        &self,
        metadata: Metadata,
        dataset: Dataset,
    ) -> Result<Revision, ResourceError> {
        self.inner.replace(metadata, dataset).await
    }

    async fn delete(&self, metadata: Metadata) -> Result<(), ResourceError> {
        self.inner.delete(metadata).await
    }

    async fn add(
        &self,
        identifier: NamedNodeRef<'_>,
        dataset: Dataset,
    ) -> Result<(), ResourceError> {
        self.inner.add(identifier, dataset).await
    }
}

#[tokio::test]
async fn test_resolution_reads_stored_state_only() {
    let store = Arc::new(CountingStore::default());
    let container = mapper().resource("container");
    let acl = Acl::new(&container)
        .grant(&[acl::READ], acl::AGENT, ALICE, acl::ACCESS_TO)
        .grant(&[acl::READ, acl::WRITE], acl::AGENT, ALICE, acl::DEFAULT);
    create(
        &store.inner,
        "container",
        InteractionModel::BasicContainer,
        acl.into_dataset(),
    )
    .await;
    for i in 0..50 {
        create(
            &store.inner,
            &format!("container/child{i}"),
            InteractionModel::RdfSource,
            Dataset::new(),
        )
        .await;
    }
    let service = WebAcService::new(Arc::clone(&store) as Arc<dyn ResourceStore>);

    let child = mapper().resource("container/child7");
    let modes = service.access_modes(child.as_ref(), &alice()).await.unwrap();
    assert_eq!(modes, AccessModes::from_iter([AccessMode::Read, AccessMode::Write]));
    let modes = service
        .access_modes(container.as_ref(), &alice())
        .await
        .unwrap();
    assert_eq!(modes, read());
    assert_eq!(store.composed.load(Ordering::Relaxed), 0);
}
