//! Core types for the Vinted catalog search client
//!
//! This crate defines the shared data structures used across the client,
//! including the unified catalog item model and the error taxonomy.

pub mod error;
pub mod item;

pub use error::{VintedError, VintedResult};
pub use item::CatalogItem;
