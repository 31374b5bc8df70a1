//! Vocabularies used by the resource model and the access-control layer.

pub use oxrdf::vocab::{rdf, xsd};

pub mod ldp {
    //! [LDP](https://www.w3.org/TR/ldp/) vocabulary.
    use oxrdf::NamedNodeRef;

    pub const RESOURCE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/ldp#Resource");
    pub const RDF_SOURCE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/ldp#RDFSource");
    pub const NON_RDF_SOURCE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/ldp#NonRDFSource");
    pub const CONTAINER: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/ldp#Container");
    pub const BASIC_CONTAINER: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/ldp#BasicContainer");
    pub const DIRECT_CONTAINER: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/ldp#DirectContainer");
    pub const INDIRECT_CONTAINER: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/ldp#IndirectContainer");

    pub const CONTAINS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/ldp#contains");
    pub const MEMBERSHIP_RESOURCE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/ldp#membershipResource");
    pub const HAS_MEMBER_RELATION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/ldp#hasMemberRelation");
    pub const IS_MEMBER_OF_RELATION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/ldp#isMemberOfRelation");
    pub const INSERTED_CONTENT_RELATION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/ldp#insertedContentRelation");
    pub const MEMBER_SUBJECT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/ldp#MemberSubject");
    pub const CONSTRAINED_BY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/ldp#constrainedBy");

    pub const PREFER_CONTAINMENT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/ldp#PreferContainment");
    pub const PREFER_MEMBERSHIP: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/ldp#PreferMembership");
}

pub mod acl {
    //! [Web Access Control](https://solidproject.org/TR/wac) vocabulary.
    use oxrdf::NamedNodeRef;

    pub const AUTHORIZATION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/auth/acl#Authorization");
    pub const AGENT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/auth/acl#agent");
    pub const AGENT_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/auth/acl#agentClass");
    pub const AGENT_GROUP: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/auth/acl#agentGroup");
    pub const AUTHENTICATED_AGENT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/auth/acl#AuthenticatedAgent");
    pub const ACCESS_TO: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/auth/acl#accessTo");
    pub const DEFAULT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/auth/acl#default");
    pub const MODE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/auth/acl#mode");

    pub const READ: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/auth/acl#Read");
    pub const WRITE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/auth/acl#Write");
    pub const APPEND: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/auth/acl#Append");
    pub const CONTROL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/auth/acl#Control");
}

pub mod trellis {
    //! Server-specific terms: partition names and well-known agents.
    use oxrdf::NamedNodeRef;

    pub const PREFER_USER_MANAGED: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.trellisldp.org/ns/trellis#PreferUserManaged");
    pub const PREFER_ACCESS_CONTROL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.trellisldp.org/ns/trellis#PreferAccessControl");
    pub const PREFER_AUDIT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.trellisldp.org/ns/trellis#PreferAudit");
    pub const PREFER_SERVER_MANAGED: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.trellisldp.org/ns/trellis#PreferServerManaged");

    pub const ANONYMOUS_AGENT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.trellisldp.org/ns/trellis#AnonymousAgent");
    pub const ADMINISTRATOR_AGENT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.trellisldp.org/ns/trellis#AdministratorAgent");

    pub const UNSUPPORTED_INTERACTION_MODEL: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(
        "http://www.trellisldp.org/ns/trellis#UnsupportedInteractionModel",
    );
}

pub mod prov {
    //! [PROV-O](https://www.w3.org/TR/prov-o/) terms used in audit records.
    use oxrdf::NamedNodeRef;

    pub const ACTIVITY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/prov#Activity");
    pub const WAS_GENERATED_BY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/prov#wasGeneratedBy");
    pub const WAS_ASSOCIATED_WITH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/prov#wasAssociatedWith");
    pub const ACTED_ON_BEHALF_OF: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/prov#actedOnBehalfOf");
    pub const AT_TIME: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/prov#atTime");
}

pub mod activity_streams {
    //! [Activity Streams](https://www.w3.org/TR/activitystreams-vocabulary/) activity types.
    use oxrdf::NamedNodeRef;

    pub const CREATE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://www.w3.org/ns/activitystreams#Create");
    pub const UPDATE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://www.w3.org/ns/activitystreams#Update");
    pub const DELETE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://www.w3.org/ns/activitystreams#Delete");
}

pub mod foaf {
    use oxrdf::NamedNodeRef;

    pub const AGENT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://xmlns.com/foaf/0.1/Agent");
}

pub mod vcard {
    use oxrdf::NamedNodeRef;

    pub const HAS_MEMBER: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/vcard/ns#hasMember");
}
