//! Derives the server-managed partitions of containers.
//!
//! Containment and membership statements are never stored. They are computed from the live
//! children of a container whenever the container is read, so they always reflect the current
//! state of the hierarchy.

use itertools::Either;
use ldp_fusion_model::vocab::ldp;
use ldp_fusion_model::{
    Graph, NamedNode, NamedNodeRef, Partition, Resource, SubjectRef, TermRef, TripleRef,
};
use std::sync::Arc;

/// Attaches the containment and membership partitions to `container`.
///
/// `children` must only contain live resources whose container is `container`. Resources that
/// are not containers are returned unchanged.
pub fn compose(container: Resource, children: &[Arc<Resource>]) -> Resource {
    if !container.interaction_model().is_container() {
        return container;
    }

    let containment = containment(&container, children);
    let membership = membership(&container, children);
    container
        .with_graph(Partition::Containment, Arc::new(containment))
        .with_graph(Partition::Membership, Arc::new(membership))
}

/// Returns one `ldp:contains` statement per child.
pub fn containment(container: &Resource, children: &[Arc<Resource>]) -> Graph {
    let mut graph = Graph::new();
    for child in children {
        graph.insert(TripleRef::new(
            container.identifier().as_ref(),
            ldp::CONTAINS,
            child.identifier().as_ref(),
        ));
    }
    graph
}

/// Returns the membership statements of a direct or indirect container.
///
/// A container without a membership resource produces no statements.
pub fn membership(container: &Resource, children: &[Arc<Resource>]) -> Graph {
    let mut graph = Graph::new();
    if !container.interaction_model().has_membership() {
        return graph;
    }
    let Some(membership_resource) = container.membership_resource().map(NamedNode::as_ref)
    else {
        return graph;
    };
    let inserted_content_relation = container
        .inserted_content_relation()
        .unwrap_or(ldp::MEMBER_SUBJECT);

    for child in children {
        for member in inserted_content(child, inserted_content_relation) {
            if let Some(relation) = container.member_relation() {
                graph.insert(TripleRef::new(membership_resource, relation.as_ref(), member));
            }
            if let Some(relation) = container.member_of_relation() {
                if let Some(subject) = as_subject(member) {
                    graph.insert(TripleRef::new(
                        subject,
                        relation.as_ref(),
                        membership_resource,
                    ));
                }
            }
        }
    }
    graph
}

/// Returns the terms that `child` contributes to the membership of its container.
fn inserted_content<'a>(
    child: &'a Resource,
    relation: NamedNodeRef<'a>,
) -> impl Iterator<Item = TermRef<'a>> + 'a {
    if relation == ldp::MEMBER_SUBJECT {
        return Either::Left(std::iter::once(TermRef::from(child.identifier().as_ref())));
    }

    let subject = SubjectRef::from(child.identifier().as_ref());
    Either::Right(
        child
            .triples(Partition::UserManaged)
            .filter(move |t| t.subject == subject && t.predicate == relation)
            .map(|t| t.object),
    )
}

fn as_subject(term: TermRef<'_>) -> Option<SubjectRef<'_>> {
    match term {
        TermRef::NamedNode(node) => Some(node.into()),
        TermRef::BlankNode(node) => Some(node.into()),
        _ => None,
    }
}
