use std::{
    collections::{BTreeSet, HashSet, VecDeque},
    hash::BuildHasher,
};

use crate::{context::MappingScope, errors::MappingError};

use super::PropertyMapper;

/// A field holding any number of values of the same kind.
pub trait MultiValued {
    type Item;

    fn values(&self) -> impl Iterator<Item = &Self::Item>;
}

impl<T> MultiValued for [T] {
    type Item = T;

    fn values(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

impl<T, const N: usize> MultiValued for [T; N] {
    type Item = T;

    fn values(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

impl<T> MultiValued for Vec<T> {
    type Item = T;

    fn values(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

impl<T> MultiValued for VecDeque<T> {
    type Item = T;

    fn values(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

impl<T> MultiValued for BTreeSet<T> {
    type Item = T;

    fn values(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

impl<T, S: BuildHasher> MultiValued for HashSet<T, S> {
    type Item = T;

    fn values(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

/// Runs the wrapped mapper once per element, always with the same subject.
/// Reports `true` when at least one element produced statements; an empty
/// collection reports `false`.
pub struct CollectionPropertyMapper<M> {
    inner: M,
}

impl<M> CollectionPropertyMapper<M> {
    pub fn new(inner: M) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &M {
        &self.inner
    }
}

impl<T, C, M> PropertyMapper<T, C> for CollectionPropertyMapper<M>
where
    T: ?Sized,
    C: MultiValued + ?Sized,
    M: PropertyMapper<T, C::Item>,
{
    fn map_value(
        &self,
        scope: &MappingScope<'_>,
        source: &T,
        values: &C,
    ) -> Result<bool, MappingError> {
        let mut mapped = false;
        for value in values.values() {
            mapped |= self.inner.map(scope, source, Some(value))?;
        }
        Ok(mapped)
    }
}
