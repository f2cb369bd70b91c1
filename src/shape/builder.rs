use alloc::boxed::Box;
use core::{
    any::{Any, TypeId},
    marker::PhantomData,
};

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::shape::{MemberDecl, Shape, ShapeDescriptor, Slots, TargetKind};

/// Builder for the [`ShapeDescriptor`] of the shape type `S`.
///
/// Members are recorded in declaration order, which is also the order in
/// which their values are later handed to the constructor given to
/// [`finish`](ShapeBuilder::finish).
///
/// # Panics
///
/// The builder panics when a member is declared with an empty name or when
/// the same target name is declared twice. Both are programming errors in
/// the shape declaration, not runtime conditions.
pub struct ShapeBuilder<S> {
    shape_name: &'static str,
    members: IndexMap<&'static str, MemberDecl, FxBuildHasher>,
    _shape: PhantomData<fn() -> S>,
}

impl<S: 'static> ShapeBuilder<S> {
    pub(crate) fn new(shape_name: &'static str) -> Self {
        Self {
            shape_name,
            members: IndexMap::default(),
            _shape: PhantomData,
        }
    }

    fn declare(mut self, target: &'static str, source: &'static str, kind: TargetKind) -> Self {
        assert!(
            !target.is_empty() && !source.is_empty(),
            "shape {} declares a member with an empty name",
            self.shape_name
        );
        let previous = self.members.insert(target, MemberDecl::new(source, kind));
        assert!(
            previous.is_none(),
            "shape {} declares member `{}` twice",
            self.shape_name,
            target
        );
        self
    }

    /// Declares a member holding a plain value of type `F`, read from the
    /// source member of the same name.
    pub fn value<F: 'static>(self, target: &'static str) -> Self {
        self.value_from::<F>(target, target)
    }

    /// Declares a member holding a plain value of type `F`, read from a
    /// differently named source member.
    ///
    /// This is the escape hatch for naming-convention mismatches, such as
    /// a `TestMethod` target member fed by a `testMethod` source member.
    pub fn value_from<F: 'static>(self, target: &'static str, source: &'static str) -> Self {
        self.declare(
            target,
            source,
            TargetKind::Value {
                type_id: TypeId::of::<F>(),
                type_name: core::any::type_name::<F>(),
            },
        )
    }

    /// Declares a member filled by projecting the nested shape `N` out of
    /// the source member of the same name.
    pub fn nested<N: Shape>(self, target: &'static str) -> Self {
        self.nested_from::<N>(target, target)
    }

    /// Declares a member filled by projecting the nested shape `N` out of
    /// a differently named source member.
    pub fn nested_from<N: Shape>(self, target: &'static str, source: &'static str) -> Self {
        self.declare(
            target,
            source,
            TargetKind::Nested {
                descriptor: N::descriptor,
            },
        )
    }

    /// Finalizes the descriptor with the shape's constructor.
    ///
    /// The constructor receives the values read from the source object and
    /// must consume them with [`Slots::take`], one call per declared
    /// member, in declaration order.
    pub fn finish<C>(self, construct: C) -> ShapeDescriptor
    where
        C: Fn(&mut Slots) -> S + Send + Sync + 'static,
    {
        ShapeDescriptor::from_parts(
            TypeId::of::<S>(),
            self.shape_name,
            self.members,
            Box::new(move |slots| Box::new(construct(slots)) as Box<dyn Any>),
        )
    }
}
