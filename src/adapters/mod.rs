//! Adapters — concrete implementations of the port traits and file formats
//!
//! - `kyber`: Kyber-512 KEM via pqcrypto-kyber
//! - `key_file`: base64 key persistence

pub mod key_file;
pub mod kyber;

pub use kyber::Kyber512;
