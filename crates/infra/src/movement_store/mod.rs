//! Append-only movement store boundary.
//!
//! This module defines an infrastructure-facing abstraction for appending
//! and querying the stock-movement log without making storage assumptions.

pub mod filter;
pub mod in_memory;
pub mod json_file;
pub mod r#trait;

pub use filter::MovementFilter;
pub use in_memory::InMemoryMovementStore;
pub use json_file::JsonFileMovementStore;
pub use r#trait::{MovementStore, MovementStoreError};
