//! Port traits (interfaces)
//!
//! These traits define the boundaries between the core domain and external
//! primitives. Adapters implement these traits with concrete libraries.

pub mod kem;

pub use kem::*;
