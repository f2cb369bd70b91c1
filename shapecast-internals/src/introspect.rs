//! The capability trait that turns a host type into a projection source.

use core::any::Any;

use crate::source::TypeInfo;

/// Capability trait for types whose instances can act as projection
/// sources.
///
/// Implementing this trait is how a host crate opts a type into duck-typed
/// projection: the implementation publishes an immutable member table
/// ([`TypeInfo`]) describing the fields and properties that can be read off
/// an instance, without the reading side ever naming the type.
///
/// The trait is object safe. The engine only ever sees `&dyn Introspect`
/// and dispatches on the *runtime* type identity reported by
/// [`type_info`](Introspect::type_info), so the static type of the handle a
/// caller happens to hold is irrelevant.
///
/// # Contract
///
/// Implementations must uphold two properties, which the engine relies on
/// when it pairs cached projection plans with incoming objects:
///
/// 1. [`type_info`](Introspect::type_info) returns the same `&'static
///    TypeInfo` as [`static_type_info`](Introspect::static_type_info), on
///    every call, for the lifetime of the process.
/// 2. [`as_any`](Introspect::as_any) returns `self`.
///
/// Violating the contract cannot cause memory unsafety (all downcasts are
/// checked), but it will make projections fail with invariant panics or
/// spurious mismatch diagnoses.
///
/// The `shapecast` crate provides an `impl_introspect!` macro that writes
/// a conforming implementation from a member-registration expression.
///
/// # Examples
///
/// A hand-written implementation:
///
/// ```
/// use core::any::Any;
///
/// use shapecast_internals::{Introspect, TypeInfo};
///
/// struct Ticket {
///     id: u64,
/// }
///
/// impl Introspect for Ticket {
///     fn static_type_info() -> &'static TypeInfo {
///         static INFO: std::sync::OnceLock<TypeInfo> = std::sync::OnceLock::new();
///         INFO.get_or_init(|| {
///             TypeInfo::builder::<Ticket>("Ticket")
///                 .field("id", |t: &Ticket| &t.id)
///                 .finish()
///         })
///     }
///
///     fn type_info(&self) -> &'static TypeInfo {
///         Self::static_type_info()
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
/// }
/// ```
pub trait Introspect: 'static {
    /// Returns the member table of this type.
    ///
    /// Used at registration time, when another type declares a member of
    /// this type as a nested projection source and the compiler needs the
    /// table without an instance in hand.
    fn static_type_info() -> &'static TypeInfo
    where
        Self: Sized;

    /// Returns the member table of the concrete runtime type of this
    /// instance.
    ///
    /// Implementations must return [`Self::static_type_info()`].
    ///
    /// [`Self::static_type_info()`]: Introspect::static_type_info
    fn type_info(&self) -> &'static TypeInfo;

    /// Returns `self` as a `&dyn Any`, so member accessors can downcast
    /// back to the concrete type.
    fn as_any(&self) -> &dyn Any;
}
