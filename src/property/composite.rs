use std::fmt;

use crate::{
    context::MappingScope, errors::MappingError, object::MappedObject, term::ToLiteral,
};

use super::{LiteralPropertyMapper, PropertyMapper};

/// Projects one field through several mappers, typically onto a custom
/// predicate and a well-known one at the same time. Every mapper runs; the
/// result is `true` if any of them asserted something.
pub struct CompositePropertyMapper<T: ?Sized, V: ?Sized> {
    mappers: Vec<Box<dyn PropertyMapper<T, V>>>,
}

impl<T: ?Sized, V: ?Sized> CompositePropertyMapper<T, V> {
    pub fn new() -> Self {
        Self {
            mappers: Vec::new(),
        }
    }

    pub fn with<M: PropertyMapper<T, V> + 'static>(mut self, mapper: M) -> Self {
        self.push(mapper);
        self
    }

    pub fn push<M: PropertyMapper<T, V> + 'static>(&mut self, mapper: M) {
        self.mappers.push(Box::new(mapper));
    }

    pub fn len(&self) -> usize {
        self.mappers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappers.is_empty()
    }
}

impl<T, V> CompositePropertyMapper<T, V>
where
    T: MappedObject,
    V: ToLiteral + fmt::Debug + ?Sized + 'static,
{
    /// The same literal asserted under each of `predicates`.
    pub fn literals<I, P>(predicates: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        predicates
            .into_iter()
            .fold(Self::new(), |composite, predicate| {
                composite.with(LiteralPropertyMapper::<V>::new(predicate))
            })
    }
}

impl<T: ?Sized, V: ?Sized> Default for CompositePropertyMapper<T, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized, V: ?Sized> PropertyMapper<T, V> for CompositePropertyMapper<T, V> {
    fn map_value(
        &self,
        scope: &MappingScope<'_>,
        source: &T,
        value: &V,
    ) -> Result<bool, MappingError> {
        let mut mapped = false;
        for mapper in &self.mappers {
            mapped |= mapper.map(scope, source, Some(value))?;
        }
        Ok(mapped)
    }
}
