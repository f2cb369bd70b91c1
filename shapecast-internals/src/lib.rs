#![no_std]
#![deny(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    unused_doc_comments
)]
//! Internal implementation crate for [`shapecast`].
//!
//! # Overview
//!
//! This crate contains the low-level, type-erased source-access layer that
//! powers the [`shapecast`] structural projection engine. It knows how to
//! describe the instance members of a concrete Rust type and how to read
//! them out of a `&dyn Any` at a call site that has no compile-time
//! knowledge of that type.
//!
//! **This crate is an implementation detail.** No semantic versioning
//! guarantees are provided. Users should depend on the [`shapecast`] crate,
//! not this one.
//!
//! # Architecture
//!
//! - **[`Introspect`]**: the capability trait a host type implements so its
//!   instances can act as projection sources. It exposes the type's member
//!   table ([`TypeInfo`]) keyed by *runtime* identity, which is what lets
//!   the engine duck-type against the actual object rather than its
//!   declared type.
//! - **[`TypeInfo`] / [`MemberInfo`]**: an immutable, ordered table of the
//!   readable instance members of one concrete type. Built once per type
//!   through [`TypeInfoBuilder`] and shared for the lifetime of the
//!   process.
//! - **Erased accessors** (private): each registered member stores a small
//!   monomorphized accessor behind a `dyn` trait, pairing a typed getter
//!   function with the downcast from `&dyn Any` back to the concrete type.
//!   This is the same typed-to-untyped dispatch shape used for vtable
//!   records elsewhere, except the downcast is checked: [`core::any`]
//!   already carries the type identity, so a mismatch surfaces as a `None`
//!   instead of requiring an unsafe contract.
//!
//! Member reads are copy-out: reading a member clones the value (or runs
//! the property getter), so projected values are snapshots that do not
//! observe later mutation of the source object.
//!
//! [`shapecast`]: https://docs.rs/shapecast/latest/shapecast/

extern crate alloc;

mod introspect;
mod source;

pub use introspect::Introspect;
pub use source::{MemberInfo, MemberKind, ObjectHandle, TypeInfo, TypeInfoBuilder};
