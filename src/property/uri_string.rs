use std::fmt;

use crate::{
    context::MappingScope,
    errors::{ABBREVIATE_WIDTH, MappingError, abbreviate, short_type_name},
    iri::parse_iri,
    object::MappedObject,
};

use super::{PropertyMapper, statement_failure};

/// Links the subject to an IRI the field already holds as text, such as a
/// homepage or `rdfs:seeAlso` URL. Blank text maps to nothing; text that does
/// not parse as an absolute IRI is logged and skipped instead of failing the
/// traversal.
pub struct UriStringPropertyMapper {
    predicate: String,
}

impl UriStringPropertyMapper {
    pub fn new<P: Into<String>>(predicate: P) -> Self {
        Self {
            predicate: predicate.into(),
        }
    }

    pub fn predicate(&self) -> &str {
        &self.predicate
    }
}

impl<T, V> PropertyMapper<T, V> for UriStringPropertyMapper
where
    T: MappedObject,
    V: AsRef<str> + fmt::Debug + ?Sized,
{
    fn map_value(
        &self,
        scope: &MappingScope<'_>,
        source: &T,
        value: &V,
    ) -> Result<bool, MappingError> {
        let raw = value.as_ref().trim();
        if raw.is_empty() {
            return Ok(false);
        }
        let wrap = |e| statement_failure(source, &self.predicate, value, e);

        let Some(subject) = scope.identifier(source).map_err(wrap)? else {
            return Ok(false);
        };
        let object = match parse_iri(raw) {
            Ok(object) => object,
            Err(e) => {
                tracing::warn!(
                    "ignoring bad IRI while mapping {}[{}] <{}> [{}]: {}",
                    short_type_name::<T>(),
                    abbreviate(source, ABBREVIATE_WIDTH),
                    self.predicate,
                    abbreviate(raw, ABBREVIATE_WIDTH),
                    e
                );
                return Ok(false);
            }
        };
        scope
            .graph()
            .assert_resource(&subject, &self.predicate, &object)
            .map_err(wrap)?;
        Ok(true)
    }
}
