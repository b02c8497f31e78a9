//! Webfonts Repository
//!
//! Language-to-font mappings and font asset descriptors.
//!
//! A [`Repository`] is an owned, immutable-after-construction value. Caller
//! overrides are combined with [`Repository::merge`], which consumes both
//! sides and produces a new repository, so instances sharing a base
//! repository never observe each other's changes.

mod asset;
mod repository;

pub use asset::{FontAsset, FontFormat};
pub use repository::{Repository, RepositoryError};
