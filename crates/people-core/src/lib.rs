//! # people-core
//!
//! Core types, traits, and abstractions for the people & notes service.
//!
//! This crate provides the domain data structures, their JSON output shapes,
//! the error type and the repository traits that the storage and HTTP crates
//! depend on.

pub mod error;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use traits::*;
