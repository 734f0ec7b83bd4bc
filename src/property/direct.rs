use std::fmt;

use crate::{
    context::MappingScope,
    errors::MappingError,
    generators::{IriGenerator, LiteralGenerator, ValueGenerator},
    object::MappedObject,
};

use super::{PropertyMapper, statement_failure};

enum ValueSource<V: ?Sized> {
    Generator(ValueGenerator<V>),
    Registry(fn(&MappingScope<'_>, &V) -> Result<Option<String>, MappingError>),
}

fn registry_identifier<V: MappedObject>(
    scope: &MappingScope<'_>,
    value: &V,
) -> Result<Option<String>, MappingError> {
    scope.identifier(value)
}

/// Asserts `(subject, predicate, value)` where the value is a literal or an
/// IRI computed by the configured generator. Without a generator the value must
/// be a mapped object and its registry identifier is used. The value object
/// itself is not traversed; use [`ResourcePropertyMapper`] for that.
///
/// [`ResourcePropertyMapper`]: super::ResourcePropertyMapper
pub struct DirectPropertyMapper<V: ?Sized> {
    predicate: String,
    source: ValueSource<V>,
}

impl<V: MappedObject> DirectPropertyMapper<V> {
    pub fn new<P: Into<String>>(predicate: P) -> Self {
        Self {
            predicate: predicate.into(),
            source: ValueSource::Registry(registry_identifier::<V>),
        }
    }
}

impl<V: ?Sized> DirectPropertyMapper<V> {
    pub fn with_generator<P: Into<String>>(predicate: P, generator: ValueGenerator<V>) -> Self {
        Self {
            predicate: predicate.into(),
            source: ValueSource::Generator(generator),
        }
    }

    pub fn with_literal<P, G>(predicate: P, generator: G) -> Self
    where
        P: Into<String>,
        G: LiteralGenerator<V> + 'static,
    {
        Self::with_generator(predicate, ValueGenerator::literal(generator))
    }

    pub fn with_iri<P, G>(predicate: P, generator: G) -> Self
    where
        P: Into<String>,
        G: IriGenerator<V> + 'static,
    {
        Self::with_generator(predicate, ValueGenerator::iri(generator))
    }

    pub fn predicate(&self) -> &str {
        &self.predicate
    }
}

impl<T, V> PropertyMapper<T, V> for DirectPropertyMapper<V>
where
    T: MappedObject,
    V: fmt::Debug + ?Sized,
{
    fn map_value(
        &self,
        scope: &MappingScope<'_>,
        source: &T,
        value: &V,
    ) -> Result<bool, MappingError> {
        let wrap = |e| statement_failure(source, &self.predicate, value, e);

        let Some(subject) = scope.identifier(source).map_err(wrap)? else {
            return Ok(false);
        };
        let graph = scope.graph();
        match &self.source {
            ValueSource::Generator(ValueGenerator::Literal(generator)) => {
                let Some(literal) = generator.literal(value, scope.params()).map_err(wrap)? else {
                    return Ok(false);
                };
                graph
                    .assert_literal(&subject, &self.predicate, &literal)
                    .map_err(wrap)?;
            }
            ValueSource::Generator(ValueGenerator::Iri(generator)) => {
                let Some(object) = generator.iri(value, scope.params()).map_err(wrap)? else {
                    return Ok(false);
                };
                graph
                    .assert_resource(&subject, &self.predicate, &object)
                    .map_err(wrap)?;
            }
            ValueSource::Registry(identify) => {
                let Some(object) = identify(scope, value).map_err(wrap)? else {
                    return Ok(false);
                };
                graph
                    .assert_resource(&subject, &self.predicate, &object)
                    .map_err(wrap)?;
            }
        }
        Ok(true)
    }
}
