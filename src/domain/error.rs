//! Domain error types

use thiserror::Error;

/// Errors that can occur while building envelopes, keying Morse or handling captures
#[derive(Error, Debug)]
pub enum SecCwError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Character not supported in Morse mapping: {0:?}")]
    UnsupportedCharacter(char),

    #[error("Format error: {0}")]
    Format(String),

    /// AEAD tag mismatch. Never carries partial plaintext.
    #[error("Authentication failed: ciphertext or key is invalid")]
    Authentication,

    #[error("Compression error: {0}")]
    Compression(String),

    #[error("Key generation error: {0}")]
    KeyGeneration(String),

    #[error("Encapsulation error: {0}")]
    Encapsulation(String),

    #[error("Decapsulation error: {0}")]
    Decapsulation(String),

    #[error("AEAD seal error: {0}")]
    AeadSeal(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for SecCW operations
pub type SecCwResult<T> = Result<T, SecCwError>;
