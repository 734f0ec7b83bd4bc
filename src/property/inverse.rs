use crate::{
    context::MappingScope,
    errors::MappingError,
    object::{MappedObject, ObjectRef},
};

use super::PropertyMapper;

/// Maps a field in the reverse direction: for `child.parent` with an inner
/// `has-child` mapper it asserts `(parent, has-child, child)`.
///
/// The inner mapper receives `(value, subject)`. The value is then mapped
/// through the traversal as well, since nothing else may reach it. Both steps
/// always run; the result is `true` when either produced statements.
pub struct InversePropertyMapper<M> {
    inner: M,
}

impl<M> InversePropertyMapper<M> {
    pub fn new(inner: M) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &M {
        &self.inner
    }
}

impl<T, V, M> PropertyMapper<T, V> for InversePropertyMapper<M>
where
    T: MappedObject,
    V: ObjectRef + ?Sized,
    M: for<'a> PropertyMapper<V::Target, &'a T>,
{
    fn map_value(
        &self,
        scope: &MappingScope<'_>,
        source: &T,
        value: &V,
    ) -> Result<bool, MappingError> {
        let target = value.target();
        let inverse = self.inner.map(scope, target, Some(&source))?;
        let mapped = scope.map(target)?;
        Ok(inverse | mapped)
    }
}
