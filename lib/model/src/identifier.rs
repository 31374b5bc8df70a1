//! Translation between internal identifiers, external URLs, and blank nodes.
//!
//! Resources are identified by IRIs in an internal data namespace (e.g., `trellis:data/a/b`).
//! Blank nodes are stored as IRIs in a separate namespace (skolemization), so they can be
//! referenced across partitions and operations. Both namespaces are only visible inside the
//! server; clients see URLs relative to a base URL.

use oxrdf::{
    BlankNode, BlankNodeRef, NamedNode, NamedNodeRef, Quad, QuadRef, Subject, SubjectRef, Term,
    TermRef, Triple, TripleRef,
};

/// Maps terms between the internal namespaces and the outside world.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IdentifierMapper {
    data_prefix: String,
    bnode_prefix: String,
}

impl Default for IdentifierMapper {
    fn default() -> Self {
        Self::new("trellis:data/", "trellis:bnode/")
    }
}

impl IdentifierMapper {
    /// Creates a new [IdentifierMapper] with the given namespace prefixes.
    pub fn new(data_prefix: impl Into<String>, bnode_prefix: impl Into<String>) -> Self {
        Self {
            data_prefix: data_prefix.into(),
            bnode_prefix: bnode_prefix.into(),
        }
    }

    /// The identifier of the root container.
    pub fn root(&self) -> NamedNode {
        NamedNode::new_unchecked(self.data_prefix.as_str())
    }

    /// Returns the internal identifier of the resource at `path`.
    pub fn resource(&self, path: &str) -> NamedNode {
        let path = path.trim_start_matches('/');
        NamedNode::new_unchecked(format!("{}{path}", self.data_prefix))
    }

    /// Returns the path of an internal identifier relative to the root container.
    pub fn path<'a>(&self, identifier: NamedNodeRef<'a>) -> Option<&'a str> {
        identifier.as_str().strip_prefix(self.data_prefix.as_str())
    }

    pub fn is_internal(&self, identifier: NamedNodeRef<'_>) -> bool {
        identifier.as_str().starts_with(self.data_prefix.as_str())
    }

    pub fn is_skolemized(&self, identifier: NamedNodeRef<'_>) -> bool {
        identifier.as_str().starts_with(self.bnode_prefix.as_str())
    }

    /// Returns the container that is implied by the path of `identifier`.
    ///
    /// The root container has no container. Identifiers outside the data namespace have none
    /// either.
    pub fn container_of(&self, identifier: NamedNodeRef<'_>) -> Option<NamedNode> {
        let path = self.path(identifier)?.trim_end_matches('/');
        if path.is_empty() {
            return None;
        }
        Some(match path.rsplit_once('/') {
            Some((parent, _)) => self.resource(parent),
            None => self.root(),
        })
    }

    /// Replaces a blank node with an IRI in the blank node namespace.
    pub fn skolemize(&self, term: TermRef<'_>) -> Term {
        match term {
            TermRef::BlankNode(node) => self.skolemize_blank_node(node).into(),
            _ => term.into_owned(),
        }
    }

    /// Reverts [Self::skolemize].
    pub fn unskolemize(&self, term: TermRef<'_>) -> Term {
        match term {
            TermRef::NamedNode(node) => self
                .unskolemize_named_node(node)
                .map_or_else(|| term.into_owned(), Term::from),
            _ => term.into_owned(),
        }
    }

    /// Translates an internal identifier into a URL below `base_url`.
    pub fn to_external(&self, term: TermRef<'_>, base_url: &str) -> Term {
        match term {
            TermRef::NamedNode(node) => self
                .path(node)
                .map_or_else(|| term.into_owned(), |path| {
                    NamedNode::new_unchecked(format!("{}{path}", normalize_base_url(base_url)))
                        .into()
                }),
            _ => term.into_owned(),
        }
    }

    /// Translates a URL below `base_url` into an internal identifier.
    pub fn to_internal(&self, term: TermRef<'_>, base_url: &str) -> Term {
        match term {
            TermRef::NamedNode(node) => {
                let base_url = normalize_base_url(base_url);
                node.as_str()
                    .strip_prefix(base_url.as_str())
                    .map_or_else(|| term.into_owned(), |path| self.resource(path).into())
            }
            _ => term.into_owned(),
        }
    }

    pub fn skolemize_triple(&self, triple: TripleRef<'_>) -> Triple {
        map_triple(triple, |term| self.skolemize(term))
    }

    pub fn unskolemize_triple(&self, triple: TripleRef<'_>) -> Triple {
        map_triple(triple, |term| self.unskolemize(term))
    }

    /// Skolemizes the subject and object of `quad`. The graph name is kept as is.
    pub fn skolemize_quad(&self, quad: QuadRef<'_>) -> Quad {
        let graph_name = quad.graph_name.into_owned();
        Triple::from(self.skolemize_triple(quad.into())).in_graph(graph_name)
    }

    pub fn external_triple(&self, triple: TripleRef<'_>, base_url: &str) -> Triple {
        map_triple(triple, |term| self.to_external(term, base_url))
    }

    pub fn internal_triple(&self, triple: TripleRef<'_>, base_url: &str) -> Triple {
        map_triple(triple, |term| self.to_internal(term, base_url))
    }

    fn skolemize_blank_node(&self, node: BlankNodeRef<'_>) -> NamedNode {
        NamedNode::new_unchecked(format!("{}{}", self.bnode_prefix, node.as_str()))
    }

    fn unskolemize_named_node(&self, node: NamedNodeRef<'_>) -> Option<BlankNode> {
        let id = node.as_str().strip_prefix(self.bnode_prefix.as_str())?;
        BlankNode::new(id).ok()
    }
}

/// Makes sure that the base URL ends with a slash.
fn normalize_base_url(base_url: &str) -> String {
    if base_url.ends_with('/') {
        base_url.to_owned()
    } else {
        format!("{base_url}/")
    }
}

/// Applies `f` to the subject and the object of `triple`. The predicate is kept as is.
fn map_triple(triple: TripleRef<'_>, f: impl Fn(TermRef<'_>) -> Term) -> Triple {
    Triple::new(
        map_subject(triple.subject, &f),
        triple.predicate.into_owned(),
        f(triple.object),
    )
}

fn map_subject(subject: SubjectRef<'_>, f: impl Fn(TermRef<'_>) -> Term) -> Subject {
    let mapped = match subject {
        SubjectRef::NamedNode(node) => f(node.into()),
        SubjectRef::BlankNode(node) => f(node.into()),
        #[allow(unreachable_patterns, reason = "Quoted triples depend on the rdf-star feature")]
        _ => return subject.into_owned(),
    };
    match mapped {
        Term::NamedNode(node) => node.into(),
        Term::BlankNode(node) => node.into(),
        _ => subject.into_owned(),
    }
}
