//! The graph collaborator the mappers write into. The core only ever asserts
//! statements through [`RdfGraph`]; [`MemoryGraph`] and, with the
//! `sqlite-backend` feature, [`SqliteTripleStore`] are thin adapters that also
//! expose the inspection helpers tests need.

use std::sync::Arc;

use crate::{errors::MappingError, term::Literal, vocab::rdf};

pub mod memory;
#[cfg(feature = "sqlite-backend")]
pub mod sqlite_store;

pub use memory::MemoryGraph;
#[cfg(feature = "sqlite-backend")]
pub use sqlite_store::SqliteTripleStore;

/// Shared handle to the output graph. Mappers borrow it for the duration of a
/// single `map` call.
pub type GraphHandle = Arc<dyn RdfGraph>;

/// Statement sink. Implementations must tolerate concurrent `&self` callers and
/// repeated assertions of the same statement.
pub trait RdfGraph: Send + Sync {
    fn assert_resource(
        &self,
        subject: &str,
        predicate: &str,
        object: &str,
    ) -> Result<(), MappingError>;

    fn assert_literal(
        &self,
        subject: &str,
        predicate: &str,
        literal: &Literal,
    ) -> Result<(), MappingError>;

    fn assert_type(&self, subject: &str, class: &str) -> Result<(), MappingError> {
        self.assert_resource(subject, rdf::TYPE, class)
    }
}

/// True when both handles point at the same graph instance.
pub fn same_graph(a: &GraphHandle, b: &GraphHandle) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

pub(crate) fn validate_statement(subject: &str, predicate: &str) -> Result<(), MappingError> {
    if subject.trim().is_empty() {
        return Err(MappingError::graph("statement subject must be set"));
    }
    if predicate.trim().is_empty() {
        return Err(MappingError::graph("statement predicate must be set"));
    }
    Ok(())
}
