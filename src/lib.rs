#![cfg_attr(not(doc), no_std)]
#![deny(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::undocumented_unsafe_blocks,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    unused_doc_comments
)]
// Make docs.rs generate better docs
#![cfg_attr(docsrs, feature(doc_cfg))]

//! A cached, duck-typed structural projection engine for Rust.
//!
//! ## Overview
//!
//! This crate lets you copy a *shape* out of an object whose concrete type
//! you do not name at the call site. A shape is an ordinary struct that
//! declares which members it wants and how to build itself from them; a
//! *source* is any type that has published a table of its readable
//! members. Whether a shape fits a source is decided structurally, by
//! member names and types, against the **runtime** type of the object in
//! hand.
//!
//! The first projection of a shape from a source type compiles a
//! projection plan and stores it in a process-wide cache; every later
//! projection of the same pair reuses it. Incompatibility is cached the
//! same way, as a [`Diagnosis`] listing every member that failed to
//! resolve.
//!
//! ## Quick Example
//!
//! ```
//! use shapecast::{impl_introspect, impl_shape, project};
//!
//! // The source side: a type that publishes its members.
//! struct BuildJob {
//!     target: String,
//!     jobs: u32,
//!     verbose: bool,
//! }
//!
//! impl_introspect!(BuildJob, "BuildJob", |b| b
//!     .field("target", |j: &BuildJob| &j.target)
//!     .field("jobs", |j: &BuildJob| &j.jobs)
//!     .field("verbose", |j: &BuildJob| &j.verbose)
//!     .finish());
//!
//! // The target side: a shape that wants two of those members.
//! struct JobSummary {
//!     target: String,
//!     jobs: u32,
//! }
//!
//! impl_shape!(JobSummary, "JobSummary", |b| b
//!     .value::<String>("target")
//!     .value::<u32>("jobs")
//!     .finish(|slots| JobSummary {
//!         target: slots.take(),
//!         jobs: slots.take(),
//!     }));
//!
//! let job = BuildJob {
//!     target: "x86_64-unknown-linux-gnu".to_owned(),
//!     jobs: 16,
//!     verbose: false,
//! };
//!
//! let summary: JobSummary = project(&job).unwrap();
//! assert_eq!(summary.target, "x86_64-unknown-linux-gnu");
//! assert_eq!(summary.jobs, 16);
//! ```
//!
//! ## Core Concepts
//!
//! On a mechanical level, four pieces cooperate:
//!
//! - **Sources** implement [`Introspect`] and publish a [`TypeInfo`]: an
//!   immutable table of readable members. Members are either stored
//!   fields, read by cloning, or computed getters, read by calling.
//! - **Shapes** implement [`Shape`] and publish a [`ShapeDescriptor`]:
//!   the members they want (by name and type, optionally reading from a
//!   differently named source member) and a constructor that assembles
//!   the struct from the values read.
//! - **Plans** ([`Plan`]) are the compiled pairing of one shape with one
//!   source type, with every member resolved down to a table index.
//!   Plan execution copies all values out first and then runs the
//!   constructor, so projected values are snapshots.
//! - **The cache** ([`cache`]) stores one entry per (shape, source type)
//!   pair for the lifetime of the process, positive or negative, first
//!   writer wins.
//!
//! Shapes can nest: a member declared with
//! [`nested`](ShapeBuilder::nested) projects another shape out of an
//! object-valued member, and the nested pairing is cached independently
//! so it is shared between every outer shape that uses it.
//!
//! When a shape does not fit, the error carries a [`Diagnosis`] that
//! lists **every** member that failed to resolve, not just the first:
//!
//! ```
//! use shapecast::{ProjectionError, impl_introspect, impl_shape, project};
//!
//! struct Packet {
//!     length: u16,
//! }
//!
//! impl_introspect!(Packet, "Packet", |b| b
//!     .field("length", |p: &Packet| &p.length)
//!     .finish());
//!
//! #[derive(Debug)]
//! struct PacketView {
//!     length: u32,
//!     checksum: u32,
//! }
//!
//! impl_shape!(PacketView, "PacketView", |b| b
//!     .value::<u32>("length")
//!     .value::<u32>("checksum")
//!     .finish(|slots| PacketView {
//!         length: slots.take(),
//!         checksum: slots.take(),
//!     }));
//!
//! let packet = Packet { length: 512 };
//! let error = project::<PacketView>(&packet).unwrap_err();
//!
//! let ProjectionError::ShapeMismatch(diagnosis) = error else {
//!     panic!("expected a shape mismatch");
//! };
//! assert_eq!(diagnosis.failures().len(), 2);
//! ```
//!
//! For implementation details of the source-access layer, see the
//! [`shapecast-internals`] crate.
//!
//! [`shapecast-internals`]: shapecast_internals

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod macros;

pub mod cache;
pub mod prelude;

mod compile;
mod diagnosis;
mod plan;
mod project;
mod resolve;
mod shape;

pub use shapecast_internals::{
    Introspect, MemberInfo, MemberKind, ObjectHandle, TypeInfo, TypeInfoBuilder,
};

pub use self::{
    diagnosis::{Diagnosis, FailureReason, ResolutionFailure},
    plan::Plan,
    project::{ProjectionError, project, project_opt},
    shape::{MemberDecl, Shape, ShapeBuilder, ShapeDescriptor, Slots, TargetKind},
};

#[doc(hidden)]
pub mod __private {
    #[doc(hidden)]
    pub use spin::Once;
}
