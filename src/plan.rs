//! Compiled projection plans.
//!
//! A [`Plan`] is the reusable result of checking one shape against one
//! source type: a flat list of member reads, resolved down to member table
//! indices, plus the shape's constructor. Executing a plan performs no
//! name lookups and no type checks beyond the accessor downcasts; all of
//! that work was spent once at compile time.

use alloc::{boxed::Box, vec::Vec};
use core::{any::Any, fmt};

use shapecast_internals::{Introspect, TypeInfo};
use triomphe::Arc;

use crate::shape::{ShapeDescriptor, Slots};

/// A single resolved member read.
pub(crate) enum ReadOp {
    /// Copy a plain value out of the member at this table index.
    Value { member: usize },
    /// Read the member at this table index as an object and execute a
    /// nested plan over it.
    Nested { member: usize, plan: Arc<Plan> },
}

/// A compiled, immutable recipe for projecting one shape out of one
/// source type.
///
/// Plans are created by the compiler, stored in the process-wide cache,
/// and shared behind [`Arc`]. A plan is only ever executed against objects
/// whose runtime type is the source type it was compiled for; the
/// projector guarantees this by looking plans up under the object's own
/// reported identity.
pub struct Plan {
    shape: &'static ShapeDescriptor,
    source: &'static TypeInfo,
    ops: Vec<ReadOp>,
}

impl Plan {
    pub(crate) fn new(
        shape: &'static ShapeDescriptor,
        source: &'static TypeInfo,
        ops: Vec<ReadOp>,
    ) -> Self {
        Self { shape, source, ops }
    }

    /// The shape this plan constructs.
    pub fn shape(&self) -> &'static ShapeDescriptor {
        self.shape
    }

    /// The source type this plan reads from.
    pub fn source(&self) -> &'static TypeInfo {
        self.source
    }

    /// Reads every declared member out of `source` and runs the shape's
    /// constructor over the results.
    ///
    /// All reads happen before the constructor runs, so the projected
    /// value is a point-in-time snapshot of the source object.
    ///
    /// # Panics
    ///
    /// Panics if `source` is not an instance of the type the plan was
    /// compiled for, which can only happen when an [`Introspect`]
    /// implementation violates its contract, or if the shape's
    /// constructor does not take exactly the values the shape declares.
    pub(crate) fn execute(&self, source: &dyn Introspect) -> Box<dyn Any> {
        let any = source.as_any();
        let mut values = Vec::with_capacity(self.ops.len());

        for op in &self.ops {
            match op {
                ReadOp::Value { member } => {
                    let value = self
                        .source
                        .member_at(*member)
                        .read_value(any)
                        .expect("source object does not match the member table it reported");
                    values.push(value);
                }
                ReadOp::Nested { member, plan } => {
                    let handle = self
                        .source
                        .member_at(*member)
                        .read_object(any)
                        .expect("source object does not match the member table it reported");
                    values.push(plan.execute(handle.as_introspect()));
                }
            }
        }

        let mut slots = Slots::new(values);
        let value = self.shape.construct(&mut slots);
        assert!(
            slots.is_drained(),
            "constructor of shape {} took fewer values than the shape declares",
            self.shape.shape_name()
        );
        value
    }
}

impl fmt::Debug for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plan")
            .field("shape", &self.shape.shape_name())
            .field("source", &self.source.type_name())
            .field("reads", &self.ops.len())
            .finish()
    }
}
