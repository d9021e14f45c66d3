//! Post-quantum message envelope
//!
//! Kyber-512 key encapsulation, HKDF-SHA256 key derivation, AES-256-GCM
//! sealing, optional zlib compression and base64 text encoding.

pub mod envelope;

pub use envelope::CryptoEnvelope;
