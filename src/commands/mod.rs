//! Command handlers (driving adapters)
//!
//! Each command composes the core modules for one CLI operation and returns
//! a typed result; `main` only parses arguments and reports errors.

pub mod analyze;
pub mod encode;
pub mod keys;
