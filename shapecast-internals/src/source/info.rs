use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{Any, TypeId};
use core::fmt;
use core::marker::PhantomData;

use crate::introspect::Introspect;
use crate::source::access::{
    ErasedAccessor, FieldAccessor, ObjectFieldAccessor, ObjectHandle, ObjectPropertyAccessor,
    PropertyAccessor,
};

/// The immutable member table of one concrete source type.
///
/// A `TypeInfo` is built once per type, usually inside a `static`
/// initializer, and then shared by reference for the lifetime of the
/// process. It records the type's identity and an ordered list of its
/// readable members. The engine keys its plan cache on
/// [`type_id`](TypeInfo::type_id), so two `TypeInfo` values for the same
/// type must describe the same members.
pub struct TypeInfo {
    type_id: TypeId,
    type_name: &'static str,
    members: Vec<MemberInfo>,
}

impl TypeInfo {
    /// Starts building the member table for the type `T`.
    ///
    /// The `type_name` is only used in diagnostics and debug output; it
    /// does not participate in identity.
    pub fn builder<T: 'static>(type_name: &'static str) -> TypeInfoBuilder<T> {
        TypeInfoBuilder {
            type_name,
            members: Vec::new(),
            _source: PhantomData,
        }
    }

    /// The [`TypeId`] of the described type.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The human-readable name of the described type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// All members, in registration order.
    pub fn members(&self) -> &[MemberInfo] {
        &self.members
    }

    /// Looks up a member by exact name and returns its index alongside it.
    ///
    /// When a field and a computed member share a name, the field wins.
    /// Otherwise the first registered member with the name is returned.
    pub fn member(&self, name: &str) -> Option<(usize, &MemberInfo)> {
        let mut found = None;
        for (index, member) in self.members.iter().enumerate() {
            if member.name != name {
                continue;
            }
            if member.kind == MemberKind::Field {
                return Some((index, member));
            }
            if found.is_none() {
                found = Some((index, member));
            }
        }
        found
    }

    /// Returns the member at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds. Indices obtained from
    /// [`member`](TypeInfo::member) on the same table are always valid.
    pub fn member_at(&self, index: usize) -> &MemberInfo {
        &self.members[index]
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("type_name", &self.type_name)
            .field("members", &self.members)
            .finish()
    }
}

/// Whether a member is a stored field or a computed getter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    /// A stored field, read by borrowing and cloning.
    Field,
    /// A computed member, read by running its getter.
    Property,
}

/// One readable member of a [`TypeInfo`].
///
/// Pairs the member's name and declared type with the erased accessor
/// that reads it out of a `&dyn Any`.
pub struct MemberInfo {
    name: &'static str,
    kind: MemberKind,
    value_type: TypeId,
    value_type_name: &'static str,
    accessor: Box<dyn ErasedAccessor>,
}

impl MemberInfo {
    /// The member's name, as registered.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the member is a field or a computed getter.
    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    /// The [`TypeId`] of the member's value type.
    pub fn value_type(&self) -> TypeId {
        self.value_type
    }

    /// The human-readable name of the member's value type.
    pub fn value_type_name(&self) -> &'static str {
        self.value_type_name
    }

    /// The member table of the member's own type, if the member was
    /// registered as an object member.
    ///
    /// `None` means the member holds a plain value and cannot serve as a
    /// nested projection source.
    pub fn object_type_info(&self) -> Option<&'static TypeInfo> {
        self.accessor.object_type_info()
    }

    /// Reads the member out of `source` as an owned, boxed copy.
    ///
    /// Returns `None` if `source` is not an instance of the type this
    /// member belongs to, or if the member was registered as an object
    /// member rather than a value member.
    pub fn read_value(&self, source: &dyn Any) -> Option<Box<dyn Any>> {
        self.accessor.read_value(source)
    }

    /// Reads the member out of `source` as a projection source.
    ///
    /// Returns `None` if `source` is not an instance of the type this
    /// member belongs to, or if the member was registered as a value
    /// member.
    pub fn read_object<'a>(&self, source: &'a dyn Any) -> Option<ObjectHandle<'a>> {
        self.accessor.read_object(source)
    }
}

impl fmt::Debug for MemberInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberInfo")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("value_type_name", &self.value_type_name)
            .finish()
    }
}

/// Builder for the [`TypeInfo`] of the source type `T`.
///
/// Registration order is preserved and becomes the iteration order of
/// [`TypeInfo::members`]. Registering two members with the same name is
/// permitted; lookups prefer fields and otherwise take the first match.
pub struct TypeInfoBuilder<T> {
    type_name: &'static str,
    members: Vec<MemberInfo>,
    _source: PhantomData<fn(&T)>,
}

impl<T: 'static> TypeInfoBuilder<T> {
    /// Registers a stored field holding a plain value.
    ///
    /// Reads clone the field through the supplied borrow function.
    pub fn field<F: Clone + 'static>(mut self, name: &'static str, get: fn(&T) -> &F) -> Self {
        self.members.push(MemberInfo {
            name,
            kind: MemberKind::Field,
            value_type: TypeId::of::<F>(),
            value_type_name: core::any::type_name::<F>(),
            accessor: Box::new(FieldAccessor::new(get)),
        });
        self
    }

    /// Registers a computed member holding a plain value.
    ///
    /// Reads run the getter and take ownership of its result.
    pub fn property<F: 'static>(mut self, name: &'static str, get: fn(&T) -> F) -> Self {
        self.members.push(MemberInfo {
            name,
            kind: MemberKind::Property,
            value_type: TypeId::of::<F>(),
            value_type_name: core::any::type_name::<F>(),
            accessor: Box::new(PropertyAccessor::new(get)),
        });
        self
    }

    /// Registers a stored field whose type is itself a projection source.
    ///
    /// The member can only be read as an object; it has no value reading.
    pub fn object_field<F: Introspect>(mut self, name: &'static str, get: fn(&T) -> &F) -> Self {
        self.members.push(MemberInfo {
            name,
            kind: MemberKind::Field,
            value_type: TypeId::of::<F>(),
            value_type_name: core::any::type_name::<F>(),
            accessor: Box::new(ObjectFieldAccessor::new(get)),
        });
        self
    }

    /// Registers a computed member whose type is itself a projection
    /// source.
    ///
    /// The getter's result is boxed on every read, so nested projections
    /// through this member see a snapshot taken at read time.
    pub fn object_property<F: Introspect>(mut self, name: &'static str, get: fn(&T) -> F) -> Self {
        self.members.push(MemberInfo {
            name,
            kind: MemberKind::Property,
            value_type: TypeId::of::<F>(),
            value_type_name: core::any::type_name::<F>(),
            accessor: Box::new(ObjectPropertyAccessor::new(get)),
        });
        self
    }

    /// Finalizes the table.
    pub fn finish(self) -> TypeInfo {
        TypeInfo {
            type_id: TypeId::of::<T>(),
            type_name: self.type_name,
            members: self.members,
        }
    }
}
