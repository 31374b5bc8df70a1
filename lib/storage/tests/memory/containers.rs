use crate::memory::create_store;
use crate::{
    add_user_statement, build_dataset, check_resource, new_identifier, root, SUBJECT0, SUBJECT1,
    SUBJECT2,
};
use ldp_fusion_common::ResourceStore;
use ldp_fusion_model::vocab::{ldp, rdf, trellis};
use ldp_fusion_model::{
    Dataset, Graph, InteractionModel, Literal, Metadata, NamedNode, NamedNodeRef, Partition,
    QuadRef, Resource, TripleRef,
};
use ldp_fusion_storage::memory::MemResourceStore;
use std::sync::Arc;
use time::OffsetDateTime;

const DC_IS_PART_OF: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://purl.org/dc/terms/isPartOf");
const DC_RELATION: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://purl.org/dc/terms/relation");
const FOAF_PRIMARY_TOPIC: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://xmlns.com/foaf/0.1/primaryTopic");

fn child_of(container: &NamedNode, name: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("{}/{name}", container.as_str()))
}

async fn create_child(store: &MemResourceStore, container: &NamedNode, name: &str, title: &str) {
    let child = child_of(container, name);
    let dataset = build_dataset(&child, title, SUBJECT1);
    store
        .create(
            Metadata::new(child, InteractionModel::RdfSource).with_container(container.clone()),
            dataset,
        )
        .await
        .unwrap();
}

async fn get(store: &MemResourceStore, identifier: &NamedNode) -> Arc<Resource> {
    store
        .get(identifier.as_ref())
        .await
        .unwrap()
        .into_live()
        .unwrap()
}

fn graph(resource: &Resource, partition: Partition) -> Graph {
    resource.triples(partition).collect()
}

fn assert_contains_children(resource: &Resource, children: &[&NamedNode]) {
    let containment = graph(resource, Partition::Containment);
    assert_eq!(containment.len(), children.len());
    for child in children {
        assert!(containment.contains(TripleRef::new(
            resource.identifier().as_ref(),
            ldp::CONTAINS,
            child.as_ref()
        )));
    }
}

#[tokio::test]
async fn test_ldp_c() {
    let before = OffsetDateTime::now_utc();
    let store = create_store();
    let identifier = new_identifier(&store);
    let dataset = build_dataset(&identifier, "Container Test", SUBJECT0);
    store
        .create(
            Metadata::new(identifier.clone(), InteractionModel::Container).with_container(root()),
            dataset.clone(),
        )
        .await
        .unwrap();

    create_child(&store, &identifier, "child01", "Contained Child 1").await;
    create_child(&store, &identifier, "child02", "Contained Child 2").await;

    let resource = get(&store, &identifier).await;
    check_resource(&resource, &identifier, before, &dataset);
    assert_contains_children(
        &resource,
        &[
            &child_of(&identifier, "child01"),
            &child_of(&identifier, "child02"),
        ],
    );
    assert_eq!(resource.stream(Partition::UserManaged).count(), 3);
}

#[tokio::test]
async fn test_ldp_bc() {
    let before = OffsetDateTime::now_utc();
    let store = create_store();
    let identifier = new_identifier(&store);
    let dataset = build_dataset(&identifier, "Basic Container Test", SUBJECT0);
    store
        .create(
            Metadata::new(identifier.clone(), InteractionModel::BasicContainer)
                .with_container(root()),
            dataset.clone(),
        )
        .await
        .unwrap();

    create_child(&store, &identifier, "child11", "Contained Child 1").await;
    create_child(&store, &identifier, "child12", "Contained Child 2").await;

    let resource = get(&store, &identifier).await;
    check_resource(&resource, &identifier, before, &dataset);
    assert_contains_children(
        &resource,
        &[
            &child_of(&identifier, "child11"),
            &child_of(&identifier, "child12"),
        ],
    );
    assert_eq!(resource.stream(Partition::UserManaged).count(), 3);
    assert_eq!(resource.stream(Partition::Membership).count(), 0);
}

#[tokio::test]
async fn test_ldp_dc() {
    let before = OffsetDateTime::now_utc();
    let store = create_store();
    assert!(store.supports(InteractionModel::DirectContainer));

    let identifier = new_identifier(&store);
    let member = child_of(&identifier, "member");
    let mut dataset = build_dataset(&identifier, "Direct Container Test", SUBJECT0);
    add_user_statement(
        &mut dataset,
        &identifier,
        ldp::MEMBERSHIP_RESOURCE,
        member.as_ref(),
    );
    add_user_statement(
        &mut dataset,
        &identifier,
        ldp::IS_MEMBER_OF_RELATION,
        DC_IS_PART_OF,
    );
    store
        .create(
            Metadata::new(identifier.clone(), InteractionModel::DirectContainer)
                .with_container(root())
                .with_membership_resource(member.clone())
                .with_member_of_relation(DC_IS_PART_OF.into_owned()),
            dataset.clone(),
        )
        .await
        .unwrap();

    create_child(&store, &identifier, "child1", "Child 1").await;
    create_child(&store, &identifier, "child2", "Child 2").await;

    let resource = get(&store, &identifier).await;
    check_resource(&resource, &identifier, before, &dataset);
    assert_eq!(resource.membership_resource(), Some(&member));
    assert_eq!(
        resource.member_of_relation(),
        Some(&DC_IS_PART_OF.into_owned())
    );
    assert_eq!(resource.member_relation(), None);
    assert_eq!(
        resource.inserted_content_relation(),
        Some(ldp::MEMBER_SUBJECT)
    );

    let child1 = child_of(&identifier, "child1");
    let child2 = child_of(&identifier, "child2");
    assert_contains_children(&resource, &[&child1, &child2]);
    assert_eq!(resource.stream(Partition::UserManaged).count(), 5);

    let membership = graph(&resource, Partition::Membership);
    assert_eq!(membership.len(), 2);
    for child in [&child1, &child2] {
        assert!(membership.contains(TripleRef::new(
            child.as_ref(),
            DC_IS_PART_OF,
            member.as_ref()
        )));
    }
}

#[tokio::test]
async fn test_ldp_ic() {
    let before = OffsetDateTime::now_utc();
    let store = create_store();
    assert!(store.supports(InteractionModel::IndirectContainer));

    let identifier = new_identifier(&store);
    let member = child_of(&identifier, "member");
    let mut dataset = build_dataset(&identifier, "Indirect Container Test", SUBJECT0);
    add_user_statement(
        &mut dataset,
        &identifier,
        ldp::MEMBERSHIP_RESOURCE,
        member.as_ref(),
    );
    add_user_statement(&mut dataset, &identifier, ldp::HAS_MEMBER_RELATION, DC_RELATION);
    add_user_statement(
        &mut dataset,
        &identifier,
        ldp::INSERTED_CONTENT_RELATION,
        FOAF_PRIMARY_TOPIC,
    );
    store
        .create(
            Metadata::new(identifier.clone(), InteractionModel::IndirectContainer)
                .with_container(root())
                .with_membership_resource(member.clone())
                .with_member_relation(DC_RELATION.into_owned())
                .with_inserted_content_relation(FOAF_PRIMARY_TOPIC.into_owned()),
            dataset.clone(),
        )
        .await
        .unwrap();

    // Only the first child declares a primary topic.
    let child1 = child_of(&identifier, "child1");
    let topic = NamedNode::new_unchecked(SUBJECT2);
    let mut child1_dataset = build_dataset(&child1, "Indirect Container Child 1", SUBJECT1);
    add_user_statement(
        &mut child1_dataset,
        &child1,
        FOAF_PRIMARY_TOPIC,
        topic.as_ref(),
    );
    store
        .create(
            Metadata::new(child1.clone(), InteractionModel::RdfSource)
                .with_container(identifier.clone()),
            child1_dataset,
        )
        .await
        .unwrap();
    create_child(&store, &identifier, "child2", "Indirect Container Child 2").await;

    let resource = get(&store, &identifier).await;
    check_resource(&resource, &identifier, before, &dataset);
    assert_eq!(resource.membership_resource(), Some(&member));
    assert_eq!(resource.member_relation(), Some(&DC_RELATION.into_owned()));
    assert_eq!(
        resource.inserted_content_relation(),
        Some(FOAF_PRIMARY_TOPIC)
    );
    assert_eq!(resource.member_of_relation(), None);
    assert_contains_children(&resource, &[&child1, &child_of(&identifier, "child2")]);
    assert_eq!(resource.stream(Partition::UserManaged).count(), 6);

    let membership = graph(&resource, Partition::Membership);
    assert_eq!(membership.len(), 1);
    assert!(membership.contains(TripleRef::new(
        member.as_ref(),
        DC_RELATION,
        topic.as_ref()
    )));
}

#[tokio::test]
async fn test_containment_is_independent_of_creation_order() {
    let store = create_store();
    let identifier = new_identifier(&store);
    let child = child_of(&identifier, "early");

    // The child is created before its container exists.
    create_child(&store, &identifier, "early", "Early Child").await;
    store
        .create(
            Metadata::new(identifier.clone(), InteractionModel::BasicContainer)
                .with_container(root()),
            Dataset::new(),
        )
        .await
        .unwrap();
    create_child(&store, &identifier, "late", "Late Child").await;

    let resource = get(&store, &identifier).await;
    assert_contains_children(&resource, &[&child, &child_of(&identifier, "late")]);
}

#[tokio::test]
async fn test_deleted_children_are_not_contained() {
    let store = create_store();
    let identifier = new_identifier(&store);
    store
        .create(
            Metadata::new(identifier.clone(), InteractionModel::BasicContainer)
                .with_container(root()),
            Dataset::new(),
        )
        .await
        .unwrap();
    create_child(&store, &identifier, "a", "A").await;
    create_child(&store, &identifier, "b", "B").await;

    let deleted = child_of(&identifier, "a");
    store
        .delete(
            Metadata::new(deleted, InteractionModel::RdfSource)
                .with_container(identifier.clone()),
        )
        .await
        .unwrap();

    let resource = get(&store, &identifier).await;
    assert_contains_children(&resource, &[&child_of(&identifier, "b")]);
}

#[tokio::test]
async fn test_root_container_scenario() {
    let store = create_store();
    let root = root();
    store
        .create(
            Metadata::new(root.clone(), InteractionModel::BasicContainer),
            Dataset::new(),
        )
        .await
        .unwrap();

    let container = NamedNode::new_unchecked("trellis:data/c");
    store
        .create(
            Metadata::new(container.clone(), InteractionModel::BasicContainer)
                .with_container(root.clone()),
            Dataset::new(),
        )
        .await
        .unwrap();

    let leaf = NamedNode::new_unchecked("trellis:data/c/l");
    let mut dataset = Dataset::new();
    for (predicate, value) in [
        (rdf::TYPE, "http://example.org/Thing"),
        (
            NamedNodeRef::new_unchecked("http://purl.org/dc/terms/title"),
            "Leaf",
        ),
        (
            NamedNodeRef::new_unchecked("http://purl.org/dc/terms/description"),
            "A leaf resource",
        ),
    ] {
        if predicate == rdf::TYPE {
            let object = NamedNode::new_unchecked(value);
            add_user_statement(&mut dataset, &leaf, predicate, object.as_ref());
        } else {
            dataset.insert(QuadRef::new(
                leaf.as_ref(),
                predicate,
                Literal::new_simple_literal(value).as_ref(),
                trellis::PREFER_USER_MANAGED,
            ));
        }
    }
    store
        .create(
            Metadata::new(leaf.clone(), InteractionModel::RdfSource)
                .with_container(container.clone()),
            dataset,
        )
        .await
        .unwrap();

    let container_resource = get(&store, &container).await;
    assert_eq!(
        container_resource.stream(Partition::Containment).count(),
        1
    );
    assert_eq!(
        container_resource.stream(Partition::UserManaged).count(),
        0
    );

    let leaf_resource = get(&store, &leaf).await;
    assert_eq!(leaf_resource.stream(Partition::UserManaged).count(), 3);
    assert_eq!(leaf_resource.stream(Partition::Containment).count(), 0);
    assert_eq!(leaf_resource.stream(Partition::Membership).count(), 0);

    let root_resource = get(&store, &root).await;
    assert_contains_children(&root_resource, &[&container]);
}
