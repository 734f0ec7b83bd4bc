//! Declarative mapping of Rust object graphs onto RDF statements.
//!
//! Describe once how each type and field corresponds to a vocabulary (an
//! [`ObjectMapper`] per type, a [`PropertyMapper`] per field), register the
//! mappers in a [`MapperRegistry`], and let a [`TraversalContext`] walk object
//! graphs into any [`RdfGraph`], following references and mapping every object
//! at most once.

pub mod access;
pub mod context;
pub mod errors;
pub mod generators;
pub mod graph;
pub mod iri;
pub mod mapper;
pub mod namespace;
pub mod object;
pub mod params;
pub mod property;
pub mod registry;
#[cfg(feature = "sqlite-backend")]
pub mod schema;
pub mod term;
pub mod visited;
pub mod vocab;

pub use crate::access::{Computed, Getter, JsonField, Readable};
pub use crate::context::{MappingScope, TraversalContext};
pub use crate::errors::{MappingError, MappingFailure};
pub use crate::generators::{
    FnIriGenerator, FnLiteralGenerator, HashIriGenerator, IriGenerator, LiteralGenerator,
    ParamIriGenerator, SlugIriGenerator, StandardLiteralGenerator, TrueLiteralGenerator,
    ValueGenerator,
};
pub use crate::graph::{GraphHandle, MemoryGraph, RdfGraph};
#[cfg(feature = "sqlite-backend")]
pub use crate::graph::SqliteTripleStore;
pub use crate::mapper::{ClassMapper, FieldMapper, ObjectMapper, PropertyBinding};
pub use crate::namespace::NamespaceTable;
pub use crate::object::{MappedObject, ObjectKey, ObjectRef};
pub use crate::params::MappingParams;
pub use crate::property::{
    CollectionPropertyMapper, CompositePropertyMapper, DirectPropertyMapper,
    InversePropertyMapper, LiteralPropertyMapper, MultiValued, PropertyMapper,
    ResourcePropertyMapper, UriStringPropertyMapper,
};
pub use crate::registry::MapperRegistry;
pub use crate::term::{Literal, Term, ToLiteral, Triple, value_to_literal};
