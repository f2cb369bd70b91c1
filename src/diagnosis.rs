//! Structural mismatch diagnostics.
//!
//! When a shape cannot be projected from a source type, the compiler does
//! not stop at the first problem: it checks every declared member and
//! collects everything that is wrong into a single [`Diagnosis`]. A
//! diagnosis reads like a checklist of the structural contract, which makes
//! the difference between "one member was renamed" and "this is an entirely
//! unrelated type" visible at a glance.

use alloc::vec::Vec;
use core::fmt;

use triomphe::Arc;

/// Why a single declared member could not be resolved against a source
/// type.
#[derive(Debug, Clone)]
pub enum FailureReason {
    /// The source type has no member with the requested name.
    NoSuchMember,
    /// The source member exists, but only as a nested object; it cannot
    /// produce a plain value.
    NotAValue {
        /// Name of the source member's actual type.
        found: &'static str,
    },
    /// The source member exists, but its value type is not the declared
    /// target type.
    ValueTypeMismatch {
        /// Name of the type the shape declares.
        expected: &'static str,
        /// Name of the type the source member actually holds.
        found: &'static str,
    },
    /// The target declares a nested projection, but the source member
    /// holds a plain value rather than an object.
    NotAnObject {
        /// Name of the source member's actual type.
        found: &'static str,
    },
    /// The source member is an object, but the nested shape could not be
    /// projected from it.
    NestedIncompatible(Arc<Diagnosis>),
    /// Resolving the member would nest projections deeper than the engine
    /// allows, which usually means the shape graph is cyclic.
    DepthExceeded {
        /// The nesting depth limit that was hit.
        limit: usize,
    },
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::NoSuchMember => write!(f, "no member with this name"),
            FailureReason::NotAValue { found } => {
                write!(f, "member is a nested object of type {found}, not a value")
            }
            FailureReason::ValueTypeMismatch { expected, found } => {
                write!(f, "expected a value of type {expected}, found {found}")
            }
            FailureReason::NotAnObject { found } => {
                write!(f, "member holds a plain {found} value, not an object")
            }
            FailureReason::NestedIncompatible(diagnosis) => {
                write!(
                    f,
                    "nested shape {} does not fit the member type {}",
                    diagnosis.shape_name(),
                    diagnosis.source_type_name()
                )
            }
            FailureReason::DepthExceeded { limit } => {
                write!(f, "projection nesting exceeds the depth limit of {limit}")
            }
        }
    }
}

/// One member of a shape that could not be resolved, together with the
/// reason.
#[derive(Debug, Clone)]
pub struct ResolutionFailure {
    member: &'static str,
    reason: FailureReason,
}

impl ResolutionFailure {
    pub(crate) fn new(member: &'static str, reason: FailureReason) -> Self {
        Self { member, reason }
    }

    /// The target member name, as declared by the shape.
    pub fn member(&self) -> &'static str {
        self.member
    }

    /// Why the member could not be resolved.
    pub fn reason(&self) -> &FailureReason {
        &self.reason
    }
}

impl fmt::Display for ResolutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "member `{}`: {}", self.member, self.reason)
    }
}

/// The complete account of why a shape does not fit a source type.
///
/// Produced by the plan compiler when at least one declared member of a
/// shape fails to resolve against a source type's member table. All
/// failures are collected before the diagnosis is returned, so a single
/// projection attempt reports every structural problem at once.
///
/// A diagnosis for a pair of types is computed at most once per process
/// and shared from the plan cache, except when it is
/// [depth-limited](Diagnosis::is_depth_limited).
#[derive(Debug, Clone)]
pub struct Diagnosis {
    shape_name: &'static str,
    source_type_name: &'static str,
    failures: Vec<ResolutionFailure>,
}

impl Diagnosis {
    pub(crate) fn new(
        shape_name: &'static str,
        source_type_name: &'static str,
        failures: Vec<ResolutionFailure>,
    ) -> Self {
        Self {
            shape_name,
            source_type_name,
            failures,
        }
    }

    /// Name of the shape that failed to project.
    pub fn shape_name(&self) -> &'static str {
        self.shape_name
    }

    /// Name of the source type the shape was checked against.
    pub fn source_type_name(&self) -> &'static str {
        self.source_type_name
    }

    /// Every member that failed to resolve.
    pub fn failures(&self) -> &[ResolutionFailure] {
        &self.failures
    }

    /// Whether any failure, at any nesting level, was caused by the
    /// nesting depth limit rather than by the types themselves.
    ///
    /// Depth-limited diagnoses are circumstantial: the same shape and
    /// source pair can succeed when reached through a shallower path, so
    /// the cache never stores them.
    pub fn is_depth_limited(&self) -> bool {
        self.failures.iter().any(|failure| match failure.reason() {
            FailureReason::DepthExceeded { .. } => true,
            FailureReason::NestedIncompatible(nested) => nested.is_depth_limited(),
            _ => false,
        })
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "shape {} cannot be projected from {}",
            self.shape_name, self.source_type_name
        )?;
        for failure in &self.failures {
            write!(f, "\n  - {failure}")?;
        }
        Ok(())
    }
}

impl core::error::Error for Diagnosis {}
