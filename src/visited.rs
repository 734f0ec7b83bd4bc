use ahash::AHashSet;
use parking_lot::Mutex;

use crate::object::ObjectKey;

/// Objects already handed to a class mapper during the current traversal run.
///
/// Address keys of objects without an IRI are only meaningful while those
/// objects are alive; clear the set between batches of such roots.
#[derive(Default)]
pub struct VisitedSet {
    inner: Mutex<AHashSet<ObjectKey>>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(AHashSet::new()),
        }
    }

    /// Marks `key` visited; `false` when it was already there.
    pub fn insert(&self, key: ObjectKey) -> bool {
        self.inner.lock().insert(key)
    }

    pub fn contains(&self, key: &ObjectKey) -> bool {
        self.inner.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}
