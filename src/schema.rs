use rusqlite::Connection;

use crate::errors::MappingError;

/// Creates the statement table used by [`crate::graph::SqliteTripleStore`].
/// Absent datatype and language tags are stored as empty strings so the unique
/// index also de-duplicates plain literals.
pub fn ensure_schema(conn: &Connection) -> Result<(), MappingError> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS rdf_statements (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            subject     TEXT NOT NULL,
            predicate   TEXT NOT NULL,
            object      TEXT NOT NULL,
            object_kind TEXT NOT NULL CHECK (object_kind IN ('iri', 'literal')),
            datatype    TEXT NOT NULL DEFAULT '',
            language    TEXT NOT NULL DEFAULT ''
        );
        CREATE UNIQUE INDEX IF NOT EXISTS idx_statements_unique
            ON rdf_statements(subject, predicate, object, object_kind, datatype, language);
        CREATE INDEX IF NOT EXISTS idx_statements_subject ON rdf_statements(subject);
        CREATE INDEX IF NOT EXISTS idx_statements_predicate ON rdf_statements(predicate);
        "#,
    )
    .map_err(|e| MappingError::graph(format!("schema: {e}")))?;
    Ok(())
}
