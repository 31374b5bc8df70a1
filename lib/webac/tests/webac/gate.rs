use crate::{create, mapper, Acl, ALICE, BOB};
use async_trait::async_trait;
use ldp_fusion_common::error::ResourceError;
use ldp_fusion_model::vocab::{acl, trellis};
use ldp_fusion_model::{Dataset, InteractionModel, NamedNode, NamedNodeRef, Session};
use ldp_fusion_storage::memory::MemResourceStore;
use ldp_fusion_webac::{
    AccessControl, AccessMode, AccessModes, AuthorizationError, AuthorizationGate,
    AuthorizationRequest, GateConfig, WebAcService,
};
use std::sync::Arc;

const BASE_URL: &str = "http://localhost/";

/// Grants the same modes on every resource.
struct FixedModes(AccessModes);

#[async_trait]
impl AccessControl for FixedModes {
    async fn access_modes(
        &self,
        _target: NamedNodeRef<'_>,
        _session: &Session,
    ) -> Result<AccessModes, ResourceError> {
        Ok(self.0)
    }
}

fn gate(modes: &[AccessMode]) -> AuthorizationGate {
    gate_with_config(modes.iter().copied().collect(), GateConfig::default())
}

fn gate_with_config(modes: AccessModes, config: GateConfig) -> AuthorizationGate {
    AuthorizationGate::new(Arc::new(FixedModes(modes)), config)
}

async fn check(gate: &AuthorizationGate, method: &str) -> Result<AccessModes, AuthorizationError> {
    let target = mapper().root();
    let session = Session::anonymous();
    gate.authorize(&AuthorizationRequest::new(
        method,
        target.as_ref(),
        &session,
        BASE_URL,
    ))
    .await
}

/// Asserts that `method` is allowed with `allowed`, and rejected otherwise, both for anonymous
/// and for authenticated sessions.
async fn assert_requires(config: GateConfig, method: &str, allowed: &[AccessMode]) {
    let target = mapper().root();
    let authenticated = Session::for_agent(ALICE.into_owned());
    for modes in [
        AccessModes::NONE,
        AccessModes::from(AccessMode::Read),
        AccessModes::from(AccessMode::Write),
        AccessModes::from(AccessMode::Append),
        AccessModes::from(AccessMode::Control),
    ] {
        let gate = gate_with_config(modes, config.clone());
        let expected = allowed.iter().any(|mode| modes.contains(*mode));

        let result = check(&gate, method).await;
        assert_eq!(result.is_ok(), expected, "{method} with {modes}");
        if !expected {
            assert!(matches!(
                result,
                Err(AuthorizationError::Unauthenticated { .. })
            ));
            let request =
                AuthorizationRequest::new(method, target.as_ref(), &authenticated, BASE_URL);
            assert!(matches!(
                gate.authorize(&request).await,
                Err(AuthorizationError::Forbidden)
            ));
        }
    }
}

#[tokio::test]
async fn test_unknown_method() {
    let gate = gate(&[]);
    assert!(check(&gate, "FOO").await.is_ok());
}

#[tokio::test]
async fn test_read() {
    assert_requires(GateConfig::default(), "GET", &[AccessMode::Read]).await;
    assert_requires(GateConfig::default(), "HEAD", &[AccessMode::Read]).await;
}

#[tokio::test]
async fn test_write() {
    assert_requires(GateConfig::default(), "PUT", &[AccessMode::Write]).await;
    assert_requires(GateConfig::default(), "DELETE", &[AccessMode::Write]).await;
}

#[tokio::test]
async fn test_append_is_satisfied_by_write() {
    assert_requires(
        GateConfig::default(),
        "POST",
        &[AccessMode::Append, AccessMode::Write],
    )
    .await;
}

#[tokio::test]
async fn test_custom_methods() {
    let config = GateConfig::default()
        .with_readable_method("READ")
        .with_writable_method("WRITE")
        .with_appendable_method("APPEND");
    assert_requires(config.clone(), "READ", &[AccessMode::Read]).await;
    assert_requires(config.clone(), "WRITE", &[AccessMode::Write]).await;
    assert_requires(config, "APPEND", &[AccessMode::Append, AccessMode::Write]).await;
}

#[tokio::test]
async fn test_control_for_audit_include() {
    let target = mapper().root();
    let include = [trellis::PREFER_AUDIT.into_owned()];
    let anonymous = Session::anonymous();
    let authenticated = Session::for_agent(ALICE.into_owned());

    let read_only = gate(&[AccessMode::Read]);
    let request =
        AuthorizationRequest::new("GET", target.as_ref(), &anonymous, BASE_URL).with_include(&include);
    assert!(matches!(
        read_only.authorize(&request).await,
        Err(AuthorizationError::Unauthenticated { .. })
    ));
    let authenticated_request = AuthorizationRequest {
        session: &authenticated,
        ..request
    };
    assert!(matches!(
        read_only.authorize(&authenticated_request).await,
        Err(AuthorizationError::Forbidden)
    ));

    let read_control = gate(&[AccessMode::Read, AccessMode::Control]);
    assert!(read_control.authorize(&request).await.is_ok());
}

#[tokio::test]
async fn test_control_for_acl_extension() {
    let target = mapper().root();
    let ext = ["acl".to_owned()];
    let session = Session::anonymous();
    let request = AuthorizationRequest::new("GET", target.as_ref(), &session, BASE_URL).with_ext(&ext);

    assert!(gate(&[AccessMode::Read]).authorize(&request).await.is_err());
    assert!(gate(&[AccessMode::Read, AccessMode::Control])
        .authorize(&request)
        .await
        .is_ok());
    // Control alone does not allow reading.
    assert!(gate(&[AccessMode::Control]).authorize(&request).await.is_err());
}

#[tokio::test]
async fn test_challenges() {
    let config = GateConfig::default()
        .with_challenges(vec!["Foo".to_owned(), "Bar".to_owned()], "my-realm");
    let gate = gate_with_config(AccessModes::NONE, config);

    let Err(AuthorizationError::Unauthenticated { challenges }) = check(&gate, "POST").await else {
        panic!("Anonymous request without modes must require authentication");
    };
    assert!(challenges.contains(&"Foo realm=\"my-realm\"".to_owned()));
    assert!(challenges.contains(&"Bar realm=\"my-realm\"".to_owned()));
}

#[tokio::test]
async fn test_resolution_failure_is_propagated() {
    struct Failing;

    #[async_trait]
    impl AccessControl for Failing {
        async fn access_modes(
            &self,
            target: NamedNodeRef<'_>,
            _session: &Session,
        ) -> Result<AccessModes, ResourceError> {
            Err(ResourceError::NotFound(target.into_owned()))
        }
    }

    let gate = AuthorizationGate::new(Arc::new(Failing), GateConfig::default());
    assert!(matches!(
        check(&gate, "GET").await,
        Err(AuthorizationError::Resolution(_))
    ));
}

#[test]
fn test_acl_link() {
    let gate = gate(&[]);
    let target = mapper().root();
    let session = Session::anonymous();
    let request = AuthorizationRequest::new("GET", target.as_ref(), &session, "http://localhost");

    let link = gate.acl_link(&request, 200).unwrap();
    assert_eq!(link.href, "http://localhost/?ext=acl");
    assert_eq!(link.to_string(), "<http://localhost/?ext=acl>; rel=\"acl\"");

    let child = mapper().resource("container/child");
    let request = AuthorizationRequest::new("PUT", child.as_ref(), &session, "http://localhost");
    assert_eq!(
        gate.acl_link(&request, 201).unwrap().href,
        "http://localhost/container/child?ext=acl"
    );
}

#[test]
fn test_acl_link_with_configured_base_url() {
    let gate = gate_with_config(
        AccessModes::NONE,
        GateConfig::default().with_base_url("http://example.com"),
    );
    let target = mapper().root();
    let session = Session::anonymous();
    let request = AuthorizationRequest::new("GET", target.as_ref(), &session, BASE_URL);

    assert_eq!(
        gate.acl_link(&request, 200).unwrap().href,
        "http://example.com/?ext=acl"
    );
}

#[test]
fn test_no_acl_link() {
    let gate = gate(&[]);
    let target = mapper().root();
    let session = Session::anonymous();
    let ext = ["foo".to_owned(), "acl".to_owned()];

    let delete = AuthorizationRequest::new("DELETE", target.as_ref(), &session, BASE_URL);
    let acl_view =
        AuthorizationRequest::new("GET", target.as_ref(), &session, BASE_URL).with_ext(&ext);
    let get = AuthorizationRequest::new("GET", target.as_ref(), &session, BASE_URL);

    assert_eq!(gate.acl_link(&delete, 200), None);
    assert_eq!(gate.acl_link(&acl_view, 200), None);
    assert_eq!(gate.acl_link(&get, 403), None);
}

#[tokio::test]
async fn test_missing_and_forbidden_are_indistinguishable() {
    let store = Arc::new(MemResourceStore::new());
    let container = mapper().resource("container");
    let acl = Acl::new(&container)
        .grant(&[acl::READ, acl::WRITE], acl::AGENT, ALICE, acl::ACCESS_TO)
        .grant(&[acl::READ, acl::WRITE], acl::AGENT, ALICE, acl::DEFAULT);
    create(
        &store,
        "container",
        InteractionModel::BasicContainer,
        acl.into_dataset(),
    )
    .await;
    create(
        &store,
        "container/secret",
        InteractionModel::RdfSource,
        Dataset::new(),
    )
    .await;
    let gate = AuthorizationGate::new(Arc::new(WebAcService::new(store)), GateConfig::default());

    let existing: NamedNode = mapper().resource("container/secret");
    let missing: NamedNode = mapper().resource("container/missing");
    let anonymous = Session::anonymous();
    let bob = Session::for_agent(BOB.into_owned());
    let alice = Session::for_agent(ALICE.into_owned());

    for method in ["GET", "PUT", "POST", "DELETE"] {
        let mut anonymous_challenges = Vec::new();
        for target in [&existing, &missing] {
            let request = AuthorizationRequest::new(method, target.as_ref(), &anonymous, BASE_URL);
            match gate.authorize(&request).await {
                Err(AuthorizationError::Unauthenticated { challenges }) => {
                    anonymous_challenges.push(challenges);
                }
                other => panic!("Unexpected outcome for {method} {target}: {other:?}"),
            }

            let request = AuthorizationRequest::new(method, target.as_ref(), &bob, BASE_URL);
            assert!(matches!(
                gate.authorize(&request).await,
                Err(AuthorizationError::Forbidden)
            ));

            let request = AuthorizationRequest::new(method, target.as_ref(), &alice, BASE_URL);
            assert!(gate.authorize(&request).await.is_ok());
        }
        assert_eq!(anonymous_challenges[0], anonymous_challenges[1]);
    }
}
