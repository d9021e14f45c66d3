//! Key encapsulation port trait

use crate::domain::SecCwResult;

/// Raw key material produced by a KEM
#[derive(Clone)]
pub struct KeyPair {
    pub public_key: Vec<u8>,
    pub secret_key: Vec<u8>,
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &format_args!("{} bytes", self.public_key.len()))
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Trait for a key encapsulation mechanism with a fixed ciphertext length
/// per parameter set.
pub trait Kem {
    /// Generate fresh key material
    fn keypair(&self) -> SecCwResult<KeyPair>;

    /// Encapsulate against a public key, returning `(ciphertext, shared_secret)`
    fn encapsulate(&self, public_key: &[u8]) -> SecCwResult<(Vec<u8>, Vec<u8>)>;

    /// Recover the shared secret from a ciphertext
    fn decapsulate(&self, ciphertext: &[u8], secret_key: &[u8]) -> SecCwResult<Vec<u8>>;

    /// Ciphertext length in bytes for this parameter set
    fn ciphertext_len(&self) -> usize;
}
