//! Field-level mapping rules. A [`PropertyMapper`] turns one (subject, field
//! value) pair into zero or more statements and reports whether it asserted
//! anything.

use std::fmt;

use crate::{
    context::MappingScope,
    errors::{ABBREVIATE_WIDTH, MappingError, MappingFailure, abbreviate, short_type_name},
};

mod collection;
mod composite;
mod direct;
mod inverse;
mod literal;
mod resource;
mod uri_string;

pub use collection::{CollectionPropertyMapper, MultiValued};
pub use composite::CompositePropertyMapper;
pub use direct::DirectPropertyMapper;
pub use inverse::InversePropertyMapper;
pub use literal::LiteralPropertyMapper;
pub use resource::ResourcePropertyMapper;
pub use uri_string::UriStringPropertyMapper;

pub trait PropertyMapper<T: ?Sized, V: ?Sized>: Send + Sync {
    /// Maps a present value.
    fn map_value(
        &self,
        scope: &MappingScope<'_>,
        source: &T,
        value: &V,
    ) -> Result<bool, MappingError>;

    /// Unset values never produce statements.
    fn map(
        &self,
        scope: &MappingScope<'_>,
        source: &T,
        value: Option<&V>,
    ) -> Result<bool, MappingError> {
        match value {
            Some(value) => self.map_value(scope, source, value),
            None => Ok(false),
        }
    }
}

impl<T: ?Sized, V: ?Sized, M: PropertyMapper<T, V> + ?Sized> PropertyMapper<T, V> for Box<M> {
    fn map_value(
        &self,
        scope: &MappingScope<'_>,
        source: &T,
        value: &V,
    ) -> Result<bool, MappingError> {
        (**self).map_value(scope, source, value)
    }

    fn map(
        &self,
        scope: &MappingScope<'_>,
        source: &T,
        value: Option<&V>,
    ) -> Result<bool, MappingError> {
        (**self).map(scope, source, value)
    }
}

/// Wraps `error` with the subject, predicate and value it was raised for.
pub(crate) fn statement_failure<T, V>(
    source: &T,
    predicate: &str,
    value: &V,
    error: MappingError,
) -> MappingError
where
    T: fmt::Debug + ?Sized,
    V: fmt::Debug + ?Sized,
{
    MappingFailure::new(
        short_type_name::<T>(),
        abbreviate(source, ABBREVIATE_WIDTH),
        error,
    )
    .predicate(predicate)
    .value(abbreviate(value, ABBREVIATE_WIDTH))
    .into()
}
