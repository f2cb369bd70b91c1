//! The projection entry points.

use core::fmt;

use shapecast_internals::Introspect;
use triomphe::Arc;

use crate::{Shape, cache, diagnosis::Diagnosis};

/// Error returned when a projection cannot produce a value.
#[derive(Debug, Clone)]
pub enum ProjectionError {
    /// The shape does not structurally fit the source object's runtime
    /// type. The diagnosis lists every member that failed to resolve.
    ShapeMismatch(Arc<Diagnosis>),
    /// The projection was attempted on an absent source object.
    NullSource,
}

impl fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionError::ShapeMismatch(diagnosis) => write!(
                f,
                "shape {} does not fit the source type {}",
                diagnosis.shape_name(),
                diagnosis.source_type_name()
            ),
            ProjectionError::NullSource => write!(f, "projection source is absent"),
        }
    }
}

impl core::error::Error for ProjectionError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            ProjectionError::ShapeMismatch(diagnosis) => {
                Some(diagnosis.as_ref() as &(dyn core::error::Error + 'static))
            }
            ProjectionError::NullSource => None,
        }
    }
}

/// Projects the shape `S` out of a source object.
///
/// Dispatch is on the *runtime* type of `source`: the engine looks up (or
/// compiles, on first encounter) the plan for the pair of `S` and the
/// member table the object itself reports, then copies every declared
/// member out in one pass. The returned value is a snapshot; later
/// mutation of the source object does not affect it.
///
/// Repeated projections of the same pair reuse the cached plan, including
/// the cached negative outcome: a mismatched pair fails quickly every
/// time after the first attempt.
///
/// # Errors
///
/// Returns [`ProjectionError::ShapeMismatch`] when the shape does not
/// structurally fit the source's runtime type. The diagnosis covers every
/// declared member that failed, not just the first.
///
/// # Panics
///
/// Panics if the constructor registered for `S` produces a value of a
/// different type, or if the source's [`Introspect`] implementation
/// violates its contract.
///
/// # Examples
///
/// ```
/// use shapecast::{impl_introspect, impl_shape, project};
///
/// struct Process {
///     pid: u32,
///     command: String,
/// }
///
/// impl_introspect!(Process, "Process", |b| b
///     .field("pid", |p: &Process| &p.pid)
///     .field("command", |p: &Process| &p.command)
///     .finish());
///
/// struct ProcessView {
///     command: String,
/// }
///
/// impl_shape!(ProcessView, "ProcessView", |b| b
///     .value::<String>("command")
///     .finish(|slots| ProcessView {
///         command: slots.take(),
///     }));
///
/// let process = Process {
///     pid: 4242,
///     command: "cargo doc".to_owned(),
/// };
///
/// let view: ProcessView = project(&process).unwrap();
/// assert_eq!(view.command, "cargo doc");
/// ```
pub fn project<S: Shape>(source: &dyn Introspect) -> Result<S, ProjectionError> {
    let plan = cache::get_or_compile(S::descriptor(), source.type_info())
        .map_err(ProjectionError::ShapeMismatch)?;

    let value = plan.execute(source);
    match value.downcast::<S>() {
        Ok(value) => Ok(*value),
        Err(_) => panic!(
            "constructor of shape {} produced a value of a different type",
            S::descriptor().shape_name()
        ),
    }
}

/// Projects the shape `S` out of an optional source object.
///
/// An absent source fails with [`ProjectionError::NullSource`] without
/// touching the plan cache; a present source behaves exactly like
/// [`project`].
pub fn project_opt<S: Shape>(source: Option<&dyn Introspect>) -> Result<S, ProjectionError> {
    match source {
        Some(source) => project(source),
        None => Err(ProjectionError::NullSource),
    }
}
