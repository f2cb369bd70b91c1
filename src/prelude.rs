//! Commonly used items for convenient importing.
//!
//! The prelude re-exports the types, traits, and macros most projection
//! code needs, so a single use statement is enough:
//!
//! ```
//! use shapecast::prelude::*;
//! ```

pub use crate::{
    Introspect, ProjectionError, Shape, impl_introspect, impl_shape, project, project_opt,
};
