//! flavorstat-core
//!
//! Shared domain types, the error taxonomy and the Figment-backed configuration
//! used by every other flavorstat crate.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
