//! Font catalog domain
//!
//! The static set of fonts the gateway can serve and their stylesheet payloads.

#[allow(clippy::module_inception)]
mod catalog;
mod entity;

pub use catalog::{FontCatalog, FontCatalogBuilder, BUILTIN_FONT_ID};
pub use entity::{FontId, FontIdError, Stylesheet};
