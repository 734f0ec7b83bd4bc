use std::fmt;

use crate::{
    context::MappingScope,
    errors::MappingError,
    generators::{IriGenerator, ValueGenerator},
    object::{MappedObject, ObjectRef},
};

use super::{PropertyMapper, statement_failure};

/// Object property between two mapped objects, e.g. `Article.editor` as
/// `(article, schema:editor, person)`.
///
/// The target's identifier comes from the configured generator, or else from
/// the target type's own class mapper. After the link is asserted the target is
/// handed back to the traversal, which maps it at most once. The result is
/// `true` whenever the link was asserted, even when the target was already
/// mapped earlier in the run.
pub struct ResourcePropertyMapper<C> {
    predicate: String,
    generator: Option<Box<dyn IriGenerator<C>>>,
}

impl<C: MappedObject> ResourcePropertyMapper<C> {
    pub fn new<P: Into<String>>(predicate: P) -> Self {
        Self {
            predicate: predicate.into(),
            generator: None,
        }
    }

    pub fn with_iri_generator<P, G>(predicate: P, generator: G) -> Self
    where
        P: Into<String>,
        G: IriGenerator<C> + 'static,
    {
        Self {
            predicate: predicate.into(),
            generator: Some(Box::new(generator)),
        }
    }

    /// Accepts only the IRI kind of generator.
    pub fn from_generator<P: Into<String>>(
        predicate: P,
        generator: ValueGenerator<C>,
    ) -> Result<Self, MappingError> {
        let predicate = predicate.into();
        match generator {
            ValueGenerator::Iri(generator) => Ok(Self {
                predicate,
                generator: Some(generator),
            }),
            ValueGenerator::Literal(_) => Err(MappingError::configuration(format!(
                "resource property <{predicate}> needs an IRI generator, got a literal generator"
            ))),
        }
    }

    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    fn object_identifier(
        &self,
        scope: &MappingScope<'_>,
        target: &C,
    ) -> Result<Option<String>, MappingError> {
        match &self.generator {
            Some(generator) => generator.iri(target, scope.params()),
            None => scope.identifier(target),
        }
    }
}

impl<T, V, C> PropertyMapper<T, V> for ResourcePropertyMapper<C>
where
    T: MappedObject,
    V: ObjectRef<Target = C> + fmt::Debug + ?Sized,
    C: MappedObject,
{
    fn map_value(
        &self,
        scope: &MappingScope<'_>,
        source: &T,
        value: &V,
    ) -> Result<bool, MappingError> {
        let wrap = |e| statement_failure(source, &self.predicate, value, e);
        let target = value.target();

        let Some(subject) = scope.identifier(source).map_err(wrap)? else {
            return Ok(false);
        };
        let Some(object) = self.object_identifier(scope, target).map_err(wrap)? else {
            return Ok(false);
        };
        scope
            .graph()
            .assert_resource(&subject, &self.predicate, &object)
            .map_err(wrap)?;

        // Errors from the target's own mapping already carry its context.
        scope.map(target)?;
        Ok(true)
    }
}
