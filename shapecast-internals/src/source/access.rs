//! Type-erased member accessors.
//!
//! Each registered member of a [`TypeInfo`] stores one of the four accessor
//! structs in this module behind a `Box<dyn ErasedAccessor>`. The structs
//! are monomorphized over the source type `T` and the member type `F`, so
//! the stored getter function keeps its real signature; the trait object
//! boundary is where the types are erased. Recovering `T` from the incoming
//! `&dyn Any` is a checked [`downcast_ref`], which turns a caller-side
//! identity mix-up into a `None` rather than undefined behavior.
//!
//! Value accessors ([`FieldAccessor`], [`PropertyAccessor`]) produce a
//! boxed copy of the member. Object accessors ([`ObjectFieldAccessor`],
//! [`ObjectPropertyAccessor`]) instead hand the member back as a
//! `dyn Introspect` so it can serve as the source of a nested projection.
//! A member is registered as one or the other, never both.
//!
//! [`downcast_ref`]: core::any::Any::downcast_ref

use alloc::boxed::Box;
use core::any::Any;

use crate::introspect::Introspect;
use crate::source::TypeInfo;

/// Object-safe interface over a single member accessor.
///
/// Exactly one of [`read_value`](ErasedAccessor::read_value) and
/// [`read_object`](ErasedAccessor::read_object) succeeds for a given
/// implementation; the other returns `None` unconditionally. Both also
/// return `None` when `source` is not the type the accessor was
/// registered for.
pub(crate) trait ErasedAccessor: Send + Sync + 'static {
    /// Reads the member as an owned, boxed copy of its value.
    fn read_value(&self, source: &dyn Any) -> Option<Box<dyn Any>>;

    /// Reads the member as a projection source in its own right.
    fn read_object<'a>(&self, source: &'a dyn Any) -> Option<ObjectHandle<'a>>;

    /// The member table of the member's own type, if this accessor was
    /// registered as an object member.
    fn object_type_info(&self) -> Option<&'static TypeInfo>;
}

/// A member read back out of a source object, usable as the source of a
/// nested projection.
///
/// Field-backed members borrow straight from the parent object; getter
/// computed members are returned by value and must be boxed to outlive the
/// call. [`as_introspect`](ObjectHandle::as_introspect) papers over the
/// difference.
pub enum ObjectHandle<'a> {
    /// The member borrowed in place from the parent object.
    Borrowed(&'a dyn Introspect),
    /// The member computed by a getter and owned by the handle.
    Owned(Box<dyn Introspect>),
}

impl ObjectHandle<'_> {
    /// Returns the contained object as a `&dyn Introspect`.
    pub fn as_introspect(&self) -> &dyn Introspect {
        match self {
            ObjectHandle::Borrowed(object) => *object,
            ObjectHandle::Owned(object) => &**object,
        }
    }
}

/// Accessor for a plain stored field, read by cloning.
pub(crate) struct FieldAccessor<T, F> {
    get: fn(&T) -> &F,
}

impl<T, F> FieldAccessor<T, F> {
    pub(crate) fn new(get: fn(&T) -> &F) -> Self {
        Self { get }
    }
}

impl<T, F> ErasedAccessor for FieldAccessor<T, F>
where
    T: 'static,
    F: Clone + 'static,
{
    fn read_value(&self, source: &dyn Any) -> Option<Box<dyn Any>> {
        let source = source.downcast_ref::<T>()?;
        Some(Box::new((self.get)(source).clone()))
    }

    fn read_object<'a>(&self, _source: &'a dyn Any) -> Option<ObjectHandle<'a>> {
        None
    }

    fn object_type_info(&self) -> Option<&'static TypeInfo> {
        None
    }
}

/// Accessor for a computed member, read by running its getter.
pub(crate) struct PropertyAccessor<T, F> {
    get: fn(&T) -> F,
}

impl<T, F> PropertyAccessor<T, F> {
    pub(crate) fn new(get: fn(&T) -> F) -> Self {
        Self { get }
    }
}

impl<T, F> ErasedAccessor for PropertyAccessor<T, F>
where
    T: 'static,
    F: 'static,
{
    fn read_value(&self, source: &dyn Any) -> Option<Box<dyn Any>> {
        let source = source.downcast_ref::<T>()?;
        Some(Box::new((self.get)(source)))
    }

    fn read_object<'a>(&self, _source: &'a dyn Any) -> Option<ObjectHandle<'a>> {
        None
    }

    fn object_type_info(&self) -> Option<&'static TypeInfo> {
        None
    }
}

/// Accessor for a stored field whose type is itself a projection source.
pub(crate) struct ObjectFieldAccessor<T, F> {
    get: fn(&T) -> &F,
}

impl<T, F> ObjectFieldAccessor<T, F> {
    pub(crate) fn new(get: fn(&T) -> &F) -> Self {
        Self { get }
    }
}

impl<T, F> ErasedAccessor for ObjectFieldAccessor<T, F>
where
    T: 'static,
    F: Introspect,
{
    fn read_value(&self, _source: &dyn Any) -> Option<Box<dyn Any>> {
        None
    }

    fn read_object<'a>(&self, source: &'a dyn Any) -> Option<ObjectHandle<'a>> {
        let source = source.downcast_ref::<T>()?;
        Some(ObjectHandle::Borrowed((self.get)(source)))
    }

    fn object_type_info(&self) -> Option<&'static TypeInfo> {
        Some(F::static_type_info())
    }
}

/// Accessor for a computed member whose type is itself a projection
/// source.
pub(crate) struct ObjectPropertyAccessor<T, F> {
    get: fn(&T) -> F,
}

impl<T, F> ObjectPropertyAccessor<T, F> {
    pub(crate) fn new(get: fn(&T) -> F) -> Self {
        Self { get }
    }
}

impl<T, F> ErasedAccessor for ObjectPropertyAccessor<T, F>
where
    T: 'static,
    F: Introspect,
{
    fn read_value(&self, _source: &dyn Any) -> Option<Box<dyn Any>> {
        None
    }

    fn read_object<'a>(&self, source: &'a dyn Any) -> Option<ObjectHandle<'a>> {
        let source = source.downcast_ref::<T>()?;
        Some(ObjectHandle::Owned(Box::new((self.get)(source))))
    }

    fn object_type_info(&self) -> Option<&'static TypeInfo> {
        Some(F::static_type_info())
    }
}
