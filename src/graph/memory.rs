use ahash::AHashSet;
use parking_lot::RwLock;

use crate::{
    errors::MappingError,
    graph::{RdfGraph, validate_statement},
    term::{Literal, Term, Triple},
};

#[derive(Default)]
struct Statements {
    ordered: Vec<Triple>,
    index: AHashSet<Triple>,
}

/// In-memory statement set. Duplicate assertions are ignored and the first
/// assertion order is kept, so dumps are deterministic for one traversal.
#[derive(Default)]
pub struct MemoryGraph {
    inner: RwLock<Statements>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, triple: Triple) -> Result<bool, MappingError> {
        validate_statement(&triple.subject, &triple.predicate)?;
        let mut inner = self.inner.write();
        if inner.index.contains(&triple) {
            return Ok(false);
        }
        inner.index.insert(triple.clone());
        inner.ordered.push(triple);
        Ok(true)
    }

    pub fn len(&self) -> usize {
        self.inner.read().ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.ordered.clear();
        inner.index.clear();
    }

    pub fn triples(&self) -> Vec<Triple> {
        self.inner.read().ordered.clone()
    }

    pub fn contains(&self, subject: &str, predicate: &str, object: &Term) -> bool {
        let probe = Triple::new(subject, predicate, object.clone());
        self.inner.read().index.contains(&probe)
    }

    pub fn contains_link(&self, subject: &str, predicate: &str, object: &str) -> bool {
        self.contains(subject, predicate, &Term::iri(object))
    }

    /// Objects of every statement matching `subject` and `predicate`, in
    /// assertion order.
    pub fn objects(&self, subject: &str, predicate: &str) -> Vec<Term> {
        self.inner
            .read()
            .ordered
            .iter()
            .filter(|t| t.subject == subject && t.predicate == predicate)
            .map(|t| t.object.clone())
            .collect()
    }

    pub fn object(&self, subject: &str, predicate: &str) -> Option<Term> {
        self.objects(subject, predicate).into_iter().next()
    }

    pub fn subjects(&self, predicate: &str, object: &Term) -> Vec<String> {
        self.inner
            .read()
            .ordered
            .iter()
            .filter(|t| t.predicate == predicate && &t.object == object)
            .map(|t| t.subject.clone())
            .collect()
    }

    pub fn count_matching(&self, subject: Option<&str>, predicate: Option<&str>) -> usize {
        self.inner
            .read()
            .ordered
            .iter()
            .filter(|t| subject.is_none_or(|s| t.subject == s))
            .filter(|t| predicate.is_none_or(|p| t.predicate == p))
            .count()
    }

    /// Renders the whole graph as N-Triples, one statement per line.
    pub fn to_ntriples(&self) -> String {
        let inner = self.inner.read();
        let mut out = String::new();
        for triple in &inner.ordered {
            out.push_str(&triple.to_string());
            out.push('\n');
        }
        out
    }
}

impl RdfGraph for MemoryGraph {
    fn assert_resource(
        &self,
        subject: &str,
        predicate: &str,
        object: &str,
    ) -> Result<(), MappingError> {
        if object.trim().is_empty() {
            return Err(MappingError::graph("statement object must be set"));
        }
        let inserted = self.insert(Triple::new(subject, predicate, Term::iri(object)))?;
        tracing::trace!(subject, predicate, object, inserted, "asserted resource statement");
        Ok(())
    }

    fn assert_literal(
        &self,
        subject: &str,
        predicate: &str,
        literal: &Literal,
    ) -> Result<(), MappingError> {
        let inserted = self.insert(Triple::new(
            subject,
            predicate,
            Term::Literal(literal.clone()),
        ))?;
        tracing::trace!(subject, predicate, %literal, inserted, "asserted literal statement");
        Ok(())
    }
}
