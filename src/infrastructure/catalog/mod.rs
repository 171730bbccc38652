//! Font catalog loading

mod loader;

pub use loader::load_catalog;
