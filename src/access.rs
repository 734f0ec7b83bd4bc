//! Field readers. A binding reads its field through a [`Readable`], either a
//! compile-time accessor ([`Getter`], [`Computed`]) or a by-name lookup over the
//! serde form of the object ([`JsonField`]).

use serde::Serialize;
use serde_json::Value;

use crate::errors::{MappingError, short_type_name};

/// Callback receiving the field value (or `None` when the field is unset).
pub type ValueVisitor<'v, V> = dyn FnMut(Option<&V>) -> Result<bool, MappingError> + 'v;

/// Reads one field of a `T` and hands it to `visit`. The visitor form lets
/// readers lend borrowed values and temporaries alike.
pub trait Readable<T, V: ?Sized>: Send + Sync {
    fn read(&self, source: &T, visit: &mut ValueVisitor<'_, V>) -> Result<bool, MappingError>;
}

/// Accessor borrowing the value out of the object, e.g. `|p| p.name.as_deref()`.
pub struct Getter<F> {
    func: F,
}

impl<F> Getter<F> {
    pub fn new<T, V: ?Sized>(func: F) -> Self
    where
        F: Fn(&T) -> Option<&V>,
    {
        Self { func }
    }
}

impl<T, V: ?Sized, F> Readable<T, V> for Getter<F>
where
    F: Fn(&T) -> Option<&V> + Send + Sync,
{
    fn read(&self, source: &T, visit: &mut ValueVisitor<'_, V>) -> Result<bool, MappingError> {
        visit((self.func)(source))
    }
}

/// Accessor producing an owned value, e.g. upgrading a `Weak` back-reference.
pub struct Computed<F> {
    func: F,
}

impl<F> Computed<F> {
    pub fn new<T, V>(func: F) -> Self
    where
        F: Fn(&T) -> Option<V>,
    {
        Self { func }
    }
}

impl<T, V, F> Readable<T, V> for Computed<F>
where
    F: Fn(&T) -> Option<V> + Send + Sync,
{
    fn read(&self, source: &T, visit: &mut ValueVisitor<'_, V>) -> Result<bool, MappingError> {
        let value = (self.func)(source);
        visit(value.as_ref())
    }
}

/// Looks a field up by name in the JSON form of the object. JSON `null` reads
/// as unset; a name the object does not serialise is a `FieldNotFound` error.
///
/// The whole object is serialised on every read, so prefer accessors on hot
/// types.
#[derive(Clone, Debug)]
pub struct JsonField {
    name: String,
}

impl JsonField {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn lookup<T: Serialize>(&self, source: &T) -> Result<Value, MappingError> {
        let mut json = serde_json::to_value(source).map_err(|e| {
            MappingError::configuration(format!(
                "cannot serialise {} to read '{}': {e}",
                short_type_name::<T>(),
                self.name
            ))
        })?;
        let field = match &mut json {
            Value::Object(fields) => fields.remove(&self.name),
            _ => None,
        };
        field.ok_or_else(|| MappingError::field_not_found(short_type_name::<T>(), &self.name))
    }
}

impl<T: Serialize> Readable<T, Value> for JsonField {
    fn read(&self, source: &T, visit: &mut ValueVisitor<'_, Value>) -> Result<bool, MappingError> {
        let value = self.lookup(source)?;
        if value.is_null() {
            return visit(None);
        }
        visit(Some(&value))
    }
}
