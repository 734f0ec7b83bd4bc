//! Per-type mapping rules: [`ObjectMapper`] composes an identifier generator,
//! an optional class IRI and an ordered list of field bindings.

use crate::{
    access::{Computed, Getter, Readable},
    context::MappingScope,
    errors::{ABBREVIATE_WIDTH, MappingError, MappingFailure, abbreviate, short_type_name},
    generators::IriGenerator,
    object::MappedObject,
    params::MappingParams,
    property::PropertyMapper,
};

/// Maps a whole object of type `T`. Registered per type in the
/// [`MapperRegistry`](crate::registry::MapperRegistry).
pub trait ClassMapper<T>: Send + Sync {
    /// `true` when the object was materialised in the graph.
    fn map(&self, scope: &MappingScope<'_>, source: &T) -> Result<bool, MappingError>;

    fn iri_generator(&self) -> Option<&dyn IriGenerator<T>>;
}

/// One field rule of an [`ObjectMapper`]: reads its own field off the object
/// and maps it.
pub trait FieldMapper<T>: Send + Sync {
    fn field_name(&self) -> &str;

    fn map(&self, scope: &MappingScope<'_>, source: &T) -> Result<bool, MappingError>;
}

/// A field name, the reader that extracts its value and the mapper for it.
pub struct PropertyBinding<T, V: ?Sized> {
    name: String,
    reader: Box<dyn Readable<T, V>>,
    mapper: Box<dyn PropertyMapper<T, V>>,
}

impl<T, V: ?Sized> PropertyBinding<T, V> {
    pub fn new<N, R, M>(name: N, reader: R, mapper: M) -> Self
    where
        N: Into<String>,
        R: Readable<T, V> + 'static,
        M: PropertyMapper<T, V> + 'static,
    {
        Self {
            name: name.into(),
            reader: Box::new(reader),
            mapper: Box::new(mapper),
        }
    }
}

impl<T: MappedObject, V: ?Sized> FieldMapper<T> for PropertyBinding<T, V> {
    fn field_name(&self) -> &str {
        &self.name
    }

    fn map(&self, scope: &MappingScope<'_>, source: &T) -> Result<bool, MappingError> {
        self.reader
            .read(source, &mut |value| self.mapper.map(scope, source, value))
            .map_err(|e| {
                e.within_field(
                    short_type_name::<T>(),
                    &abbreviate(source, ABBREVIATE_WIDTH),
                    &self.name,
                )
            })
    }
}

/// Class mapper for plain structs.
///
/// Mapping runs every field binding in order, then computes the identifier
/// and asserts the type statement. An object none of whose fields mapped, or
/// whose identifier is `None`, is skipped and reported as `false`. A mapper with
/// no field bindings maps every object it is given.
pub struct ObjectMapper<T> {
    type_iri: Option<String>,
    iri_generator: Option<Box<dyn IriGenerator<T>>>,
    fields: Vec<Box<dyn FieldMapper<T>>>,
}

impl<T: MappedObject> ObjectMapper<T> {
    pub fn new() -> Self {
        Self {
            type_iri: None,
            iri_generator: None,
            fields: Vec::new(),
        }
    }

    pub fn with_type<S: Into<String>>(mut self, type_iri: S) -> Self {
        self.type_iri = Some(type_iri.into());
        self
    }

    pub fn with_iri_generator<G: IriGenerator<T> + 'static>(mut self, generator: G) -> Self {
        self.iri_generator = Some(Box::new(generator));
        self
    }

    pub fn set_type<S: Into<String>>(&mut self, type_iri: Option<S>) {
        self.type_iri = type_iri.map(Into::into);
    }

    pub fn set_iri_generator<G: IriGenerator<T> + 'static>(&mut self, generator: G) {
        self.iri_generator = Some(Box::new(generator));
    }

    pub fn type_iri(&self) -> Option<&str> {
        self.type_iri.as_deref()
    }

    /// Binds `name` to a borrowing accessor such as `|foo| foo.name.as_deref()`.
    pub fn add_property_mapper<V, F, M>(&mut self, name: &str, getter: F, mapper: M)
    where
        V: ?Sized + 'static,
        F: Fn(&T) -> Option<&V> + Send + Sync + 'static,
        M: PropertyMapper<T, V> + 'static,
    {
        self.add_readable_mapper(name, Getter::new::<T, V>(getter), mapper);
    }

    /// Binds `name` to an accessor returning an owned value.
    pub fn add_computed_mapper<V, F, M>(&mut self, name: &str, getter: F, mapper: M)
    where
        V: 'static,
        F: Fn(&T) -> Option<V> + Send + Sync + 'static,
        M: PropertyMapper<T, V> + 'static,
    {
        self.add_readable_mapper(name, Computed::new::<T, V>(getter), mapper);
    }

    pub fn add_readable_mapper<V, R, M>(&mut self, name: &str, reader: R, mapper: M)
    where
        V: ?Sized + 'static,
        R: Readable<T, V> + 'static,
        M: PropertyMapper<T, V> + 'static,
    {
        self.add_mapper(PropertyBinding::new(name, reader, mapper));
    }

    /// Adds a rule that maps the object as a whole.
    pub fn add_mapper<M: FieldMapper<T> + 'static>(&mut self, mapper: M) {
        self.fields.push(Box::new(mapper));
    }

    pub fn property<V, F, M>(mut self, name: &str, getter: F, mapper: M) -> Self
    where
        V: ?Sized + 'static,
        F: Fn(&T) -> Option<&V> + Send + Sync + 'static,
        M: PropertyMapper<T, V> + 'static,
    {
        self.add_property_mapper(name, getter, mapper);
        self
    }

    pub fn computed<V, F, M>(mut self, name: &str, getter: F, mapper: M) -> Self
    where
        V: 'static,
        F: Fn(&T) -> Option<V> + Send + Sync + 'static,
        M: PropertyMapper<T, V> + 'static,
    {
        self.add_computed_mapper(name, getter, mapper);
        self
    }

    pub fn readable<V, R, M>(mut self, name: &str, reader: R, mapper: M) -> Self
    where
        V: ?Sized + 'static,
        R: Readable<T, V> + 'static,
        M: PropertyMapper<T, V> + 'static,
    {
        self.add_readable_mapper(name, reader, mapper);
        self
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.field_name())
    }

    fn identifier(&self, source: &T, params: &MappingParams) -> Result<Option<String>, MappingError> {
        let generator = self.iri_generator.as_ref().ok_or_else(|| {
            MappingError::configuration(format!(
                "no IRI generator configured for {}",
                short_type_name::<T>()
            ))
        })?;
        generator.iri(source, params)
    }

    fn map_fields(&self, scope: &MappingScope<'_>, source: &T) -> Result<bool, MappingError> {
        if self.fields.is_empty() {
            return Ok(true);
        }
        let mut mapped = false;
        for field in &self.fields {
            mapped |= field.map(scope, source)?;
        }
        Ok(mapped)
    }
}

impl<T: MappedObject> Default for ObjectMapper<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: MappedObject> ClassMapper<T> for ObjectMapper<T> {
    fn map(&self, scope: &MappingScope<'_>, source: &T) -> Result<bool, MappingError> {
        if !self.map_fields(scope, source)? {
            tracing::debug!("no field of {} mapped, skipping", short_type_name::<T>());
            return Ok(false);
        }

        let wrap = |e| -> MappingError {
            MappingFailure::new(
                short_type_name::<T>(),
                abbreviate(source, ABBREVIATE_WIDTH),
                e,
            )
            .into()
        };

        let Some(iri) = self.identifier(source, scope.params()).map_err(wrap)? else {
            tracing::debug!("{} has no identifier, skipping", short_type_name::<T>());
            return Ok(false);
        };
        if let Some(type_iri) = &self.type_iri {
            scope.graph().assert_type(&iri, type_iri).map_err(wrap)?;
        }
        Ok(true)
    }

    fn iri_generator(&self) -> Option<&dyn IriGenerator<T>> {
        self.iri_generator.as_deref()
    }
}
