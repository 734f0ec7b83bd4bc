//! Prefix table used to spell IRIs in mapper configuration (`foaf:Person`
//! instead of the full IRI). It is plain configuration data: build one, load it
//! from JSON, and pass it to whatever builds your mappers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{errors::MappingError, vocab};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamespaceTable {
    prefixes: BTreeMap<String, String>,
}

impl NamespaceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        table.register("rdf", vocab::rdf::NS);
        table.register("rdfs", vocab::rdfs::NS);
        table.register("owl", vocab::owl::NS);
        table.register("xsd", vocab::xsd::NS);
        table.register("dc", vocab::dc::NS);
        table.register("dc-terms", vocab::dcterms::NS);
        table.register("dcterms", vocab::dcterms::NS);
        table.register("foaf", vocab::foaf::NS);
        table.register("schema", vocab::schema::NS);
        table
    }

    /// Loads a `{"prefix": "namespace IRI"}` object.
    pub fn from_json(raw: &str) -> Result<Self, MappingError> {
        serde_json::from_str(raw)
            .map_err(|e| MappingError::configuration(format!("invalid namespace table: {e}")))
    }

    /// Adds the entries of `other`, replacing prefixes both tables define.
    pub fn merge(&mut self, other: &NamespaceTable) {
        for (prefix, namespace) in &other.prefixes {
            self.prefixes.insert(prefix.clone(), namespace.clone());
        }
    }

    pub fn register<P: Into<String>, N: Into<String>>(
        &mut self,
        prefix: P,
        namespace: N,
    ) -> Option<String> {
        self.prefixes.insert(prefix.into(), namespace.into())
    }

    pub fn namespace(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix.trim()).map(String::as_str)
    }

    pub fn iri(&self, prefix: &str, local: &str) -> Result<String, MappingError> {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return Err(MappingError::configuration(
                "cannot resolve an empty namespace prefix",
            ));
        }
        let namespace = self.namespace(prefix).ok_or_else(|| {
            MappingError::configuration(format!("namespace prefix '{prefix}' not found"))
        })?;
        Ok(format!("{namespace}{local}"))
    }

    /// Expands a compact `prefix:local` name.
    pub fn expand(&self, compact: &str) -> Result<String, MappingError> {
        let (prefix, local) = compact.split_once(':').ok_or_else(|| {
            MappingError::configuration(format!("'{compact}' is not a prefix:local name"))
        })?;
        self.iri(prefix, local)
    }

    /// `PREFIX` declarations for every entry, one per line.
    pub fn sparql_prolog(&self) -> String {
        self.prefixes
            .iter()
            .map(|(prefix, namespace)| format!("PREFIX {prefix}: <{namespace}>\n"))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes.iter().map(|(p, n)| (p.as_str(), n.as_str()))
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}
