//! Shared types for the item API.

pub mod types;

pub use types::{Item, ItemId, ItemIdError};
