use ldp_fusion_common::ByteStream;
use ldp_fusion_model::{Graph, NamedNode, Revision, Session};
use ldp_fusion_webac::AuthorizationRequest;
use std::num::ParseIntError;
use std::str::FromStr;

/// The `If-Match` precondition of a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IfMatch {
    /// `*`, matches any existing resource.
    Any,
    Revision(Revision),
}

impl FromStr for IfMatch {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == "*" {
            return Ok(IfMatch::Any);
        }
        s.parse().map(IfMatch::Revision)
    }
}

/// A request as seen by the [`ResourceManager`](crate::manager::ResourceManager).
///
/// Parsing HTTP messages is left to the caller. The target is already translated to an internal
/// identifier.
#[derive(Clone, Debug)]
pub struct LdpRequest {
    pub method: String,
    pub target: NamedNode,
    pub session: Session,
    /// The values of the `ext` query parameter.
    pub ext: Vec<String>,
    /// Partitions requested with `Prefer: return=representation; include="..."`.
    pub include: Vec<NamedNode>,
    /// Partitions excluded with `Prefer: return=representation; omit="..."`.
    pub omit: Vec<NamedNode>,
    pub if_match: Option<IfMatch>,
    /// Overrides the configured base URL.
    pub base_url: Option<String>,
}

impl LdpRequest {
    pub fn new(method: impl Into<String>, target: NamedNode, session: Session) -> Self {
        Self {
            method: method.into(),
            target,
            session,
            ext: Vec::new(),
            include: Vec::new(),
            omit: Vec::new(),
            if_match: None,
            base_url: None,
        }
    }

    #[must_use]
    pub fn with_ext(mut self, ext: impl Into<String>) -> Self {
        self.ext.push(ext.into());
        self
    }

    #[must_use]
    pub fn with_include(mut self, partition: NamedNode) -> Self {
        self.include.push(partition);
        self
    }

    #[must_use]
    pub fn with_omit(mut self, partition: NamedNode) -> Self {
        self.omit.push(partition);
        self
    }

    #[must_use]
    pub fn with_if_match(mut self, if_match: IfMatch) -> Self {
        self.if_match = Some(if_match);
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Returns the view of this request that the authorization gate needs.
    pub fn authorization<'a>(&'a self, base_url: &'a str) -> AuthorizationRequest<'a> {
        AuthorizationRequest::new(&self.method, self.target.as_ref(), &self.session, base_url)
            .with_ext(&self.ext)
            .with_include(&self.include)
    }
}

/// The entity of a request that creates or replaces a resource.
pub enum Content {
    /// RDF statements whose resources are identified relative to the base URL.
    Rdf(Graph),
    /// The content of a non-RDF source.
    Binary {
        content: ByteStream,
        mime_type: Option<String>,
    },
}

impl Content {
    pub fn is_binary(&self) -> bool {
        matches!(self, Content::Binary { .. })
    }
}
