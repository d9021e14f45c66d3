//! Core domain types
//!
//! Pure types with no I/O dependencies: timing tokens, sample aliases,
//! configuration profiles and the error taxonomy.

pub mod config;
pub mod error;
pub mod types;

pub use config::*;
pub use error::*;
pub use types::*;
