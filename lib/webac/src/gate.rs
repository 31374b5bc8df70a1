//! Authorization of incoming requests.
//!
//! The [AuthorizationGate] maps the method of a request to the [AccessMode] it requires and checks
//! it against the modes an [AccessControl] implementation grants to the session. Requests that
//! expose access-control or audit statements additionally require [AccessMode::Control].

use crate::{AccessControl, AccessMode, AccessModes, AuthorizationError};
use ldp_fusion_model::vocab::trellis;
use ldp_fusion_model::{IdentifierMapper, NamedNode, NamedNodeRef, Session, Term, TermRef};
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use tracing::{debug, warn};

/// Configuration of the [AuthorizationGate].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GateConfig {
    pub readable_methods: Vec<String>,
    pub writable_methods: Vec<String>,
    pub appendable_methods: Vec<String>,
    /// The authentication schemes offered to anonymous sessions.
    pub challenges: Vec<String>,
    pub realm: String,
    /// Overrides the base URL of requests when advertising the ACL of a resource.
    pub base_url: Option<String>,
    /// The value of the `ext` parameter that selects the ACL of a resource.
    pub acl_extension: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            readable_methods: to_strings(&["GET", "HEAD", "OPTIONS"]),
            writable_methods: to_strings(&["PUT", "PATCH", "DELETE"]),
            appendable_methods: to_strings(&["POST"]),
            challenges: to_strings(&["Basic"]),
            realm: "trellis".to_owned(),
            base_url: None,
            acl_extension: "acl".to_owned(),
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

impl GateConfig {
    #[must_use]
    pub fn with_readable_method(mut self, method: impl Into<String>) -> Self {
        self.readable_methods.push(method.into());
        self
    }

    #[must_use]
    pub fn with_writable_method(mut self, method: impl Into<String>) -> Self {
        self.writable_methods.push(method.into());
        self
    }

    #[must_use]
    pub fn with_appendable_method(mut self, method: impl Into<String>) -> Self {
        self.appendable_methods.push(method.into());
        self
    }

    #[must_use]
    pub fn with_challenges(mut self, challenges: Vec<String>, realm: impl Into<String>) -> Self {
        self.challenges = challenges;
        self.realm = realm.into();
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Returns the mode that `method` requires, or [None] if the method is unknown.
    pub fn required_mode(&self, method: &str) -> Option<AccessMode> {
        let contains = |methods: &[String]| methods.iter().any(|m| m == method);
        if contains(&self.readable_methods) {
            Some(AccessMode::Read)
        } else if contains(&self.writable_methods) {
            Some(AccessMode::Write)
        } else if contains(&self.appendable_methods) {
            Some(AccessMode::Append)
        } else {
            None
        }
    }

    /// Renders the challenges for the `WWW-Authenticate` header.
    pub fn rendered_challenges(&self) -> Vec<String> {
        self.challenges
            .iter()
            .map(|scheme| format!("{scheme} realm=\"{}\"", self.realm))
            .collect()
    }
}

/// The parts of a request that are relevant for authorization.
#[derive(Clone, Copy, Debug)]
pub struct AuthorizationRequest<'a> {
    pub method: &'a str,
    /// The internal identifier of the target.
    pub target: NamedNodeRef<'a>,
    pub session: &'a Session,
    /// The values of the `ext` parameter.
    pub ext: &'a [String],
    /// The partitions the client asked to include in the representation.
    pub include: &'a [NamedNode],
    pub base_url: &'a str,
}

impl<'a> AuthorizationRequest<'a> {
    pub fn new(
        method: &'a str,
        target: NamedNodeRef<'a>,
        session: &'a Session,
        base_url: &'a str,
    ) -> Self {
        Self {
            method,
            target,
            session,
            ext: &[],
            include: &[],
            base_url,
        }
    }

    #[must_use]
    pub fn with_ext(mut self, ext: &'a [String]) -> Self {
        self.ext = ext;
        self
    }

    #[must_use]
    pub fn with_include(mut self, include: &'a [NamedNode]) -> Self {
        self.include = include;
        self
    }
}

/// A link to the ACL of a resource.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AclLink {
    pub href: String,
}

impl Display for AclLink {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}>; rel=\"acl\"", self.href)
    }
}

/// Decides whether a request may proceed.
pub struct AuthorizationGate {
    access_control: Arc<dyn AccessControl>,
    config: GateConfig,
    mapper: IdentifierMapper,
}

impl AuthorizationGate {
    pub fn new(access_control: Arc<dyn AccessControl>, config: GateConfig) -> Self {
        Self {
            access_control,
            config,
            mapper: IdentifierMapper::default(),
        }
    }

    #[must_use]
    pub fn with_mapper(mut self, mapper: IdentifierMapper) -> Self {
        self.mapper = mapper;
        self
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    fn is_acl_request(&self, request: &AuthorizationRequest<'_>) -> bool {
        request.ext.iter().any(|ext| *ext == self.config.acl_extension)
    }

    /// Checks that the session of `request` has every mode the request requires and returns the
    /// modes of the session.
    ///
    /// The modes are resolved for every request, including those with unknown methods, so the
    /// outcome does not depend on whether the target exists.
    pub async fn authorize(
        &self,
        request: &AuthorizationRequest<'_>,
    ) -> Result<AccessModes, AuthorizationError> {
        let modes = self
            .access_control
            .access_modes(request.target, request.session)
            .await?;

        let mut required = AccessModes::NONE;
        if let Some(mode) = self.config.required_mode(request.method) {
            required.insert(mode);
        }
        let include_control = request.include.iter().any(|partition| {
            partition.as_ref() == trellis::PREFER_AUDIT
                || partition.as_ref() == trellis::PREFER_ACCESS_CONTROL
        });
        if self.is_acl_request(request) || include_control {
            required.insert(AccessMode::Control);
        }

        let granted = required.iter().all(|mode| match mode {
            AccessMode::Append => modes.allows_append(),
            mode => modes.contains(mode),
        });
        if granted {
            debug!(method = request.method, target = %request.target, %required, "Authorized request");
            return Ok(modes);
        }

        let agent = request.session.agent_or_anonymous();
        if request.session.is_anonymous() {
            debug!(method = request.method, target = %request.target, %required, "Authentication required");
            Err(AuthorizationError::Unauthenticated {
                challenges: self.config.rendered_challenges(),
            })
        } else {
            warn!(method = request.method, target = %request.target, %agent, %required, "Forbidden request");
            Err(AuthorizationError::Forbidden)
        }
    }

    /// Returns the link to the ACL of the target that a response with `status` should advertise.
    ///
    /// Only successful responses advertise the link. Deletions and requests for the ACL itself
    /// do not.
    pub fn acl_link(&self, request: &AuthorizationRequest<'_>, status: u16) -> Option<AclLink> {
        if !(200..300).contains(&status)
            || request.method == "DELETE"
            || self.is_acl_request(request)
        {
            return None;
        }
        let base_url = self.config.base_url.as_deref().unwrap_or(request.base_url);
        let href = match self
            .mapper
            .to_external(TermRef::NamedNode(request.target), base_url)
        {
            Term::NamedNode(node) => node.into_string(),
            other => other.to_string(),
        };
        Some(AclLink {
            href: format!("{href}?ext={}", self.config.acl_extension),
        })
    }
}
