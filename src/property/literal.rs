use std::fmt;

use crate::{
    context::MappingScope,
    errors::MappingError,
    generators::{LiteralGenerator, StandardLiteralGenerator, ValueGenerator},
    object::MappedObject,
    term::ToLiteral,
};

use super::{PropertyMapper, statement_failure};

/// Data property: `(subject, predicate, literal)`.
pub struct LiteralPropertyMapper<V: ?Sized> {
    predicate: String,
    generator: Box<dyn LiteralGenerator<V>>,
}

impl<V: ToLiteral + ?Sized> LiteralPropertyMapper<V> {
    pub fn new<P: Into<String>>(predicate: P) -> Self {
        Self::with_generator(predicate, StandardLiteralGenerator::default())
    }
}

impl<V: ?Sized> LiteralPropertyMapper<V> {
    pub fn with_generator<P, G>(predicate: P, generator: G) -> Self
    where
        P: Into<String>,
        G: LiteralGenerator<V> + 'static,
    {
        Self {
            predicate: predicate.into(),
            generator: Box::new(generator),
        }
    }

    /// Accepts only the literal kind of generator.
    pub fn from_generator<P: Into<String>>(
        predicate: P,
        generator: ValueGenerator<V>,
    ) -> Result<Self, MappingError> {
        let predicate = predicate.into();
        match generator {
            ValueGenerator::Literal(generator) => Ok(Self {
                predicate,
                generator,
            }),
            ValueGenerator::Iri(_) => Err(MappingError::configuration(format!(
                "literal property <{predicate}> needs a literal generator, got an IRI generator"
            ))),
        }
    }

    pub fn predicate(&self) -> &str {
        &self.predicate
    }
}

impl<T, V> PropertyMapper<T, V> for LiteralPropertyMapper<V>
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
        let Some(literal) = self
            .generator
            .literal(value, scope.params())
            .map_err(wrap)?
        else {
            return Ok(false);
        };
        scope
            .graph()
            .assert_literal(&subject, &self.predicate, &literal)
            .map_err(wrap)?;
        Ok(true)
    }
}
