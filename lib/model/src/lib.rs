mod error;
mod identifier;
mod interaction_model;
mod metadata;
mod partition;
mod resource;
mod revision;
mod session;
pub mod vocab;

pub use error::*;
pub use identifier::*;
pub use interaction_model::*;
pub use metadata::*;
pub use partition::*;
pub use resource::*;
pub use revision::*;
pub use session::*;

// Re-export some oxrdf types.
pub use oxiri::Iri;
pub use oxrdf::{
    BlankNode, BlankNodeRef, Dataset, Graph, GraphName, GraphNameRef, IriParseError, Literal,
    LiteralRef, NamedNode, NamedNodeRef, NamedOrBlankNode, NamedOrBlankNodeRef, Quad, QuadRef,
    Subject, SubjectRef, Term, TermRef, Triple, TripleRef,
};
