//! Shape declarations: the target side of a projection.
//!
//! A *shape* is an ordinary Rust struct that has registered a
//! [`ShapeDescriptor`] describing which members it wants to pull out of a
//! source object, and how to assemble itself from the values that were
//! read. The descriptor is declarative: nothing is checked against any
//! particular source type until a projection is first attempted, at which
//! point the plan compiler pairs the descriptor with the source's member
//! table.

mod builder;
mod slots;

use alloc::boxed::Box;
use core::{
    any::{Any, TypeId},
    fmt,
};

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

pub use self::{builder::ShapeBuilder, slots::Slots};

/// A struct that can be filled in by projecting members out of a source
/// object.
///
/// Implementations publish a process-wide [`ShapeDescriptor`] and are
/// usually written with the [`impl_shape!`](crate::impl_shape) macro:
///
/// ```
/// use shapecast::{Shape, impl_shape};
///
/// struct CommandView {
///     command: String,
///     exit_code: i32,
/// }
///
/// impl_shape!(CommandView, "CommandView", |b| b
///     .value::<String>("command")
///     .value::<i32>("exit_code")
///     .finish(|slots| CommandView {
///         command: slots.take(),
///         exit_code: slots.take(),
///     }));
///
/// assert_eq!(CommandView::descriptor().shape_name(), "CommandView");
/// ```
///
/// # Contract
///
/// [`descriptor`](Shape::descriptor) must return the same `&'static
/// ShapeDescriptor` on every call, and that descriptor must have been
/// built with `ShapeDescriptor::builder::<Self>`, so that the constructor
/// stored in the descriptor produces `Self`.
pub trait Shape: Sized + 'static {
    /// Returns the process-wide descriptor of this shape.
    fn descriptor() -> &'static ShapeDescriptor;
}

/// How one declared member of a shape is to be filled in.
#[derive(Clone, Copy)]
pub enum TargetKind {
    /// Copy a plain value out of the source member.
    Value {
        /// Identity of the declared target type.
        type_id: TypeId,
        /// Name of the declared target type.
        type_name: &'static str,
    },
    /// Project another shape out of the source member.
    ///
    /// The nested shape's descriptor is reached through a function rather
    /// than a direct reference, so mutually recursive shape declarations
    /// can be written without initialization-order problems.
    Nested {
        /// Thunk returning the nested shape's descriptor.
        descriptor: fn() -> &'static ShapeDescriptor,
    },
}

impl fmt::Debug for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::Value { type_name, .. } => {
                f.debug_struct("Value").field("type_name", type_name).finish()
            }
            TargetKind::Nested { descriptor } => f
                .debug_struct("Nested")
                .field("shape_name", &descriptor().shape_name())
                .finish(),
        }
    }
}

/// One declared member of a shape.
#[derive(Debug, Clone, Copy)]
pub struct MemberDecl {
    source_name: &'static str,
    kind: TargetKind,
}

impl MemberDecl {
    pub(crate) fn new(source_name: &'static str, kind: TargetKind) -> Self {
        Self { source_name, kind }
    }

    /// The member name to look up on the source type.
    ///
    /// Usually the same as the target name, but declarations can override
    /// it to read from a differently named source member.
    pub fn source_name(&self) -> &'static str {
        self.source_name
    }

    /// How the member is to be filled in.
    pub fn kind(&self) -> TargetKind {
        self.kind
    }
}

/// The process-wide declaration of a shape: its members and its
/// constructor.
///
/// Built once per shape through [`ShapeDescriptor::builder`] and shared
/// by reference for the lifetime of the process. The engine keys its plan
/// cache on [`shape_id`](ShapeDescriptor::shape_id).
pub struct ShapeDescriptor {
    shape_id: TypeId,
    shape_name: &'static str,
    members: IndexMap<&'static str, MemberDecl, FxBuildHasher>,
    construct: Box<dyn Fn(&mut Slots) -> Box<dyn Any> + Send + Sync>,
}

impl ShapeDescriptor {
    /// Starts building the descriptor for the shape type `S`.
    ///
    /// The `shape_name` is only used in diagnostics and debug output; it
    /// does not participate in identity.
    pub fn builder<S: 'static>(shape_name: &'static str) -> ShapeBuilder<S> {
        ShapeBuilder::new(shape_name)
    }

    pub(crate) fn from_parts(
        shape_id: TypeId,
        shape_name: &'static str,
        members: IndexMap<&'static str, MemberDecl, FxBuildHasher>,
        construct: Box<dyn Fn(&mut Slots) -> Box<dyn Any> + Send + Sync>,
    ) -> Self {
        Self {
            shape_id,
            shape_name,
            members,
            construct,
        }
    }

    /// The [`TypeId`] of the shape type this descriptor was built for.
    pub fn shape_id(&self) -> TypeId {
        self.shape_id
    }

    /// The human-readable name of the shape.
    pub fn shape_name(&self) -> &'static str {
        self.shape_name
    }

    /// The declared members, in declaration order, as `(target_name,
    /// declaration)` pairs.
    pub fn members(&self) -> impl ExactSizeIterator<Item = (&'static str, &MemberDecl)> {
        self.members.iter().map(|(name, decl)| (*name, decl))
    }

    /// The number of declared members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the shape declares no members at all.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Runs the shape's constructor over a batch of values read from a
    /// source object.
    ///
    /// The returned box holds an instance of the shape type `S` the
    /// descriptor was built for.
    pub(crate) fn construct(&self, slots: &mut Slots) -> Box<dyn Any> {
        (self.construct)(slots)
    }
}

impl fmt::Debug for ShapeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeDescriptor")
            .field("shape_name", &self.shape_name)
            .field("members", &self.members)
            .finish()
    }
}
