//! Per-type member tables and the type-erased accessors behind them.
//!
//! A [`TypeInfo`] is the engine's entire view of a concrete source type:
//! an ordered, immutable list of [`MemberInfo`] records, each pairing a
//! member name with an erased accessor that can read the member out of a
//! `&dyn Any`. Tables are built once per type through [`TypeInfoBuilder`]
//! and then shared, unsynchronized, for the lifetime of the process.
//!
//! The accessor records are the only place where typed getter functions
//! meet type-erased call sites; see [`access`] for how the dispatch works.

mod access;
mod info;

pub use access::ObjectHandle;
pub use info::{MemberInfo, MemberKind, TypeInfo, TypeInfoBuilder};
