//! Catalog domain model.
//!
//! Entities mirror the store tables one to one. Associations are expressed
//! as typed keys on the referencing side, never as in-memory back-pointers;
//! reverse navigation ("history owners of this car") is a query concern and
//! lives in the repository and aggregate layers.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod car;
pub mod engine;
pub mod file;
pub mod ids;
pub mod owner;
pub mod post;
pub mod user;
