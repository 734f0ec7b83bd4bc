use std::{any::Any, any::TypeId, fmt, rc::Rc, sync::Arc};

/// Any value a class mapper can be registered for.
pub trait MappedObject: Any + fmt::Debug {}

impl<T: Any + fmt::Debug> MappedObject for T {}

/// A field value pointing at another mapped object. Reference mappers follow
/// the pointer and hand the target to the traversal.
pub trait ObjectRef {
    type Target: MappedObject;

    fn target(&self) -> &Self::Target;
}

impl<T: MappedObject> ObjectRef for &T {
    type Target = T;

    fn target(&self) -> &T {
        self
    }
}

impl<T: MappedObject> ObjectRef for Box<T> {
    type Target = T;

    fn target(&self) -> &T {
        self
    }
}

impl<T: MappedObject> ObjectRef for Arc<T> {
    type Target = T;

    fn target(&self) -> &T {
        self
    }
}

impl<T: MappedObject> ObjectRef for Rc<T> {
    type Target = T;

    fn target(&self) -> &T {
        self
    }
}

/// Identity of an object within one traversal run: its concrete type plus
/// either the IRI its class mapper gives it or, when there is none, its
/// address.
///
/// IRI keys make "at most once" a property of the described resource, so a
/// value dropped mid-run cannot hand its slot to a new value that happens to
/// reuse the allocation. Address keys are only meaningful while the object is
/// alive.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectKey {
    type_id: TypeId,
    identity: Identity,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum Identity {
    Iri(String),
    Address(usize),
}

impl ObjectKey {
    /// Address key for `object`.
    pub fn of<T: MappedObject>(object: &T) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            identity: Identity::Address(object as *const T as usize),
        }
    }

    /// Same key as [`ObjectKey::of`] for the concrete value behind `object`.
    pub fn of_dyn(object: &dyn Any) -> Self {
        Self {
            type_id: Any::type_id(object),
            identity: Identity::Address(object as *const dyn Any as *const () as usize),
        }
    }

    /// Key of a `T` described by `iri`.
    pub fn resource<T: MappedObject, S: Into<String>>(iri: S) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            identity: Identity::Iri(iri.into()),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn iri(&self) -> Option<&str> {
        match &self.identity {
            Identity::Iri(iri) => Some(iri),
            Identity::Address(_) => None,
        }
    }
}
