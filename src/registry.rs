//! Binding table from Rust types to their class mappers.
//!
//! The table is filled while configuring and then frozen behind an `Arc` in a
//! [`TraversalContext`](crate::context::TraversalContext); lookups are by exact
//! type, there is no fallback to related types.

use std::any::{Any, TypeId};

use ahash::AHashMap;

use crate::{
    context::{MappingScope, object_key},
    errors::{MappingError, short_type_name},
    mapper::ClassMapper,
    object::{MappedObject, ObjectKey},
    params::MappingParams,
};

/// Type-erased view of a binding, so mappers of unrelated types share a table.
pub(crate) trait ErasedMapper: Send + Sync {
    fn as_any(&self) -> &dyn Any;

    fn type_name(&self) -> &'static str;

    fn map_any(&self, scope: &MappingScope<'_>, object: &dyn Any) -> Result<bool, MappingError>;

    fn key_any(&self, object: &dyn Any, params: &MappingParams) -> ObjectKey;
}

struct Binding<T> {
    mapper: Box<dyn ClassMapper<T>>,
}

impl<T: MappedObject> ErasedMapper for Binding<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        short_type_name::<T>()
    }

    fn map_any(&self, scope: &MappingScope<'_>, object: &dyn Any) -> Result<bool, MappingError> {
        let object = object.downcast_ref::<T>().ok_or_else(|| {
            MappingError::configuration(format!(
                "object handed to the {} mapper has another type",
                short_type_name::<T>()
            ))
        })?;
        self.mapper.map(scope, object)
    }

    fn key_any(&self, object: &dyn Any, params: &MappingParams) -> ObjectKey {
        match object.downcast_ref::<T>() {
            Some(object) => object_key(self.mapper.as_ref(), object, params),
            None => ObjectKey::of_dyn(object),
        }
    }
}

#[derive(Default)]
pub struct MapperRegistry {
    bindings: AHashMap<TypeId, Box<dyn ErasedMapper>>,
}

impl MapperRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `T` to `mapper`; `true` when an earlier binding was replaced.
    pub fn register<T, M>(&mut self, mapper: M) -> bool
    where
        T: MappedObject,
        M: ClassMapper<T> + 'static,
    {
        let binding = Binding::<T> {
            mapper: Box::new(mapper),
        };
        let replaced = self
            .bindings
            .insert(TypeId::of::<T>(), Box::new(binding))
            .is_some();
        tracing::debug!(
            "registered class mapper for {} (replaced: {})",
            short_type_name::<T>(),
            replaced
        );
        replaced
    }

    pub fn with<T, M>(mut self, mapper: M) -> Self
    where
        T: MappedObject,
        M: ClassMapper<T> + 'static,
    {
        self.register(mapper);
        self
    }

    pub fn resolve_mapper<T: MappedObject>(&self) -> Result<&dyn ClassMapper<T>, MappingError> {
        let binding = self.binding(TypeId::of::<T>(), short_type_name::<T>())?;
        binding
            .as_any()
            .downcast_ref::<Binding<T>>()
            .map(|binding| binding.mapper.as_ref())
            .ok_or_else(|| {
                MappingError::configuration(format!(
                    "mapper bound to {} has another type ({})",
                    short_type_name::<T>(),
                    binding.type_name()
                ))
            })
    }

    pub fn resolve_mapper_for<T: MappedObject>(
        &self,
        _object: &T,
    ) -> Result<&dyn ClassMapper<T>, MappingError> {
        self.resolve_mapper::<T>()
    }

    /// Evaluates the identifier generator of the mapper bound to `T`.
    pub fn resolve_identifier<T: MappedObject>(
        &self,
        object: &T,
        params: &MappingParams,
    ) -> Result<Option<String>, MappingError> {
        let generator = self.resolve_mapper::<T>()?.iri_generator().ok_or_else(|| {
            MappingError::configuration(format!(
                "no IRI generator configured for {}",
                short_type_name::<T>()
            ))
        })?;
        generator.iri(object, params)
    }

    pub fn is_registered<T: MappedObject>(&self) -> bool {
        self.bindings.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub(crate) fn resolve_erased(&self, object: &dyn Any) -> Result<&dyn ErasedMapper, MappingError> {
        self.binding(Any::type_id(object), "the given type")
    }

    fn binding(&self, type_id: TypeId, type_name: &str) -> Result<&dyn ErasedMapper, MappingError> {
        if self.bindings.is_empty() {
            return Err(MappingError::configuration("no mappers registered"));
        }
        self.bindings
            .get(&type_id)
            .map(|binding| binding.as_ref())
            .ok_or_else(|| {
                MappingError::configuration(format!("no mapper registered for {type_name}"))
            })
    }
}
