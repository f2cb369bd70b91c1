//! The plan compiler: pairing one shape with one source member table.
//!
//! Compilation walks every declared member of the shape, resolves it
//! against the source's member table, and either produces a [`Plan`] or a
//! [`Diagnosis`] covering every member that failed. Nested declarations
//! are compiled through the plan cache, so a sub-plan shared by several
//! outer shapes is only ever compiled once.

use alloc::vec::Vec;

use shapecast_internals::TypeInfo;
use triomphe::Arc;

use crate::{
    cache,
    diagnosis::{Diagnosis, FailureReason, ResolutionFailure},
    plan::{Plan, ReadOp},
    resolve::{Resolution, resolve_member},
    shape::ShapeDescriptor,
};

/// Upper bound on how deep nested projections may go.
///
/// Shape graphs are declared through descriptor thunks and may be cyclic;
/// the bound turns an otherwise endless compile recursion into a
/// [`FailureReason::DepthExceeded`] diagnosis.
pub(crate) const MAX_NESTING_DEPTH: usize = 32;

/// Compiles `shape` against `source` at the given nesting depth.
///
/// All members are checked before returning, so a failed compilation
/// reports every structural problem at once rather than the first one
/// encountered.
pub(crate) fn compile(
    shape: &'static ShapeDescriptor,
    source: &'static TypeInfo,
    depth: usize,
) -> Result<Arc<Plan>, Arc<Diagnosis>> {
    let mut ops = Vec::with_capacity(shape.len());
    let mut failures = Vec::new();

    for (target, decl) in shape.members() {
        match resolve_member(source, decl) {
            Ok(Resolution::Value { member }) => ops.push(ReadOp::Value { member }),
            Ok(Resolution::Object {
                member,
                object_info,
                descriptor,
            }) => {
                if depth >= MAX_NESTING_DEPTH {
                    failures.push(ResolutionFailure::new(
                        target,
                        FailureReason::DepthExceeded {
                            limit: MAX_NESTING_DEPTH,
                        },
                    ));
                    continue;
                }
                match cache::get_or_compile_at(descriptor(), object_info, depth + 1) {
                    Ok(plan) => ops.push(ReadOp::Nested { member, plan }),
                    Err(diagnosis) => failures.push(ResolutionFailure::new(
                        target,
                        FailureReason::NestedIncompatible(diagnosis),
                    )),
                }
            }
            Err(reason) => failures.push(ResolutionFailure::new(target, reason)),
        }
    }

    if failures.is_empty() {
        Ok(Arc::new(Plan::new(shape, source, ops)))
    } else {
        Err(Arc::new(Diagnosis::new(
            shape.shape_name(),
            source.type_name(),
            failures,
        )))
    }
}
