use ldp_fusion_common::{ActivityType, AuditService};
use ldp_fusion_model::vocab::{prov, rdf, xsd};
use ldp_fusion_model::{BlankNode, Literal, NamedNodeRef, Partition, Quad, Session, Term};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::warn;

/// Describes activities with the PROV ontology.
///
/// Every activity is a fresh blank node that the resource `prov:wasGeneratedBy`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultAuditService;

impl AuditService for DefaultAuditService {
    fn activity(
        &self,
        identifier: NamedNodeRef<'_>,
        session: &Session,
        activity: ActivityType,
    ) -> Vec<Quad> {
        let node = BlankNode::default();
        let graph = Partition::Audit.graph_name().into_owned();
        let quad = |subject: &BlankNode, predicate: NamedNodeRef<'_>, object: Term| {
            Quad::new(subject.clone(), predicate.into_owned(), object, graph.clone())
        };

        let mut quads = vec![
            Quad::new(
                identifier.into_owned(),
                prov::WAS_GENERATED_BY.into_owned(),
                node.clone(),
                graph.clone(),
            ),
            quad(&node, rdf::TYPE, prov::ACTIVITY.into_owned().into()),
            quad(&node, rdf::TYPE, activity.iri().into_owned().into()),
            quad(
                &node,
                prov::WAS_ASSOCIATED_WITH,
                session.agent_or_anonymous().into_owned().into(),
            ),
        ];
        if let Some(delegator) = session.delegated_by() {
            quads.push(quad(&node, prov::ACTED_ON_BEHALF_OF, delegator.clone().into()));
        }
        match OffsetDateTime::now_utc().format(&Rfc3339) {
            Ok(time) => quads.push(quad(
                &node,
                prov::AT_TIME,
                Literal::new_typed_literal(time, xsd::DATE_TIME).into(),
            )),
            Err(error) => warn!(%error, "Could not format the time of an activity"),
        }
        quads
    }
}
