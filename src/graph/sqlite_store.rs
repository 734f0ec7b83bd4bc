use std::path::Path;

use parking_lot::Mutex;
use rusqlite::{Connection, params};

use crate::{
    errors::MappingError,
    graph::{RdfGraph, validate_statement},
    schema::ensure_schema,
    term::{Literal, Term, Triple},
};

const KIND_IRI: &str = "iri";
const KIND_LITERAL: &str = "literal";

/// SQLite-backed statement store. The connection is serialised behind a mutex
/// so the store can be shared by concurrent traversals.
pub struct SqliteTripleStore {
    conn: Mutex<Connection>,
}

impl SqliteTripleStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, MappingError> {
        let conn = Connection::open(path).map_err(|e| MappingError::graph(e.to_string()))?;
        ensure_schema(&conn)?;
        Ok(Self::from_connection(conn))
    }

    pub fn open_in_memory() -> Result<Self, MappingError> {
        let conn =
            Connection::open_in_memory().map_err(|e| MappingError::graph(e.to_string()))?;
        ensure_schema(&conn)?;
        Ok(Self::from_connection(conn))
    }

    /// Stores `triple`; returns `false` when it was already present.
    pub fn insert(&self, triple: &Triple) -> Result<bool, MappingError> {
        validate_statement(&triple.subject, &triple.predicate)?;
        let (object, kind, datatype, language) = match &triple.object {
            Term::Iri(iri) => (iri.as_str(), KIND_IRI, "", ""),
            Term::Literal(literal) => (
                literal.lexical.as_str(),
                KIND_LITERAL,
                literal.datatype.as_deref().unwrap_or(""),
                literal.language.as_deref().unwrap_or(""),
            ),
        };
        let affected = self
            .conn
            .lock()
            .execute(
                "INSERT OR IGNORE INTO rdf_statements(subject, predicate, object, object_kind, datatype, language)
                 VALUES(?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    triple.subject.as_str(),
                    triple.predicate.as_str(),
                    object,
                    kind,
                    datatype,
                    language,
                ],
            )
            .map_err(|e| MappingError::graph(e.to_string()))?;
        Ok(affected > 0)
    }

    pub fn len(&self) -> Result<usize, MappingError> {
        let count: i64 = self
            .conn
            .lock()
            .query_row("SELECT COUNT(*) FROM rdf_statements", [], |row| row.get(0))
            .map_err(|e| MappingError::graph(e.to_string()))?;
        Ok(count as usize)
    }

    pub fn is_empty(&self) -> Result<bool, MappingError> {
        Ok(self.len()? == 0)
    }

    pub fn clear(&self) -> Result<(), MappingError> {
        self.conn
            .lock()
            .execute("DELETE FROM rdf_statements", [])
            .map_err(|e| MappingError::graph(e.to_string()))?;
        Ok(())
    }

    /// All statements in insertion order.
    pub fn triples(&self) -> Result<Vec<Triple>, MappingError> {
        self.collect(
            "SELECT subject, predicate, object, object_kind, datatype, language
             FROM rdf_statements ORDER BY id",
            &[],
        )
    }

    pub fn objects(&self, subject: &str, predicate: &str) -> Result<Vec<Term>, MappingError> {
        let triples = self.collect(
            "SELECT subject, predicate, object, object_kind, datatype, language
             FROM rdf_statements WHERE subject=?1 AND predicate=?2 ORDER BY id",
            &[subject, predicate],
        )?;
        Ok(triples.into_iter().map(|t| t.object).collect())
    }

    pub fn contains(
        &self,
        subject: &str,
        predicate: &str,
        object: &Term,
    ) -> Result<bool, MappingError> {
        Ok(self.objects(subject, predicate)?.iter().any(|o| o == object))
    }

    fn collect(&self, sql: &str, args: &[&str]) -> Result<Vec<Triple>, MappingError> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| MappingError::graph(e.to_string()))?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(args.iter()), row_to_triple)
            .map_err(|e| MappingError::graph(e.to_string()))?;
        let mut triples = Vec::new();
        for row in rows {
            triples.push(row.map_err(|e| MappingError::graph(e.to_string()))?);
        }
        Ok(triples)
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

impl RdfGraph for SqliteTripleStore {
    fn assert_resource(
        &self,
        subject: &str,
        predicate: &str,
        object: &str,
    ) -> Result<(), MappingError> {
        if object.trim().is_empty() {
            return Err(MappingError::graph("statement object must be set"));
        }
        self.insert(&Triple::new(subject, predicate, Term::iri(object)))?;
        Ok(())
    }

    fn assert_literal(
        &self,
        subject: &str,
        predicate: &str,
        literal: &Literal,
    ) -> Result<(), MappingError> {
        self.insert(&Triple::new(
            subject,
            predicate,
            Term::Literal(literal.clone()),
        ))?;
        Ok(())
    }
}

fn row_to_triple(row: &rusqlite::Row<'_>) -> Result<Triple, rusqlite::Error> {
    let object: String = row.get(2)?;
    let kind: String = row.get(3)?;
    let datatype: String = row.get(4)?;
    let language: String = row.get(5)?;
    let term = if kind == KIND_IRI {
        Term::Iri(object)
    } else {
        Term::Literal(Literal {
            lexical: object,
            datatype: (!datatype.is_empty()).then_some(datatype),
            language: (!language.is_empty()).then_some(language),
        })
    };
    Ok(Triple {
        subject: row.get(0)?,
        predicate: row.get(1)?,
        object: term,
    })
}
