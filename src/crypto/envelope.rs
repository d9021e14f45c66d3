//! Hybrid KEM + AEAD envelope
//!
//! Layout: `kem_ciphertext(L) || nonce(12) || aead_ciphertext_with_tag`
//!
//! Every `encrypt` performs its own encapsulation, so each message is sealed
//! under a freshly derived AES-256-GCM key:
//!
//! 1. encapsulate against the recipient public key → (kem_ct, shared_secret)
//! 2. HKDF-SHA256(shared_secret, salt = none, info = `HKDF_INFO`) → 32-byte key
//! 3. draw a random 12-byte nonce
//! 4. (compressed variants) zlib-compress the plaintext
//! 5. seal with no associated data
//!
//! Compression is only ever applied to plaintext, before sealing.

use std::io::{Read, Write};

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use hkdf::Hkdf;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;

use crate::adapters::Kyber512;
use crate::domain::{SecCwError, SecCwResult};
use crate::ports::{Kem, KeyPair};

/// HKDF domain-separation string
pub const HKDF_INFO: &[u8] = b"SecCW-Kyber-AES256GCM";
pub const AES_KEY_LEN: usize = 32;
pub const NONCE_LEN: usize = 12;
pub const TAG_LEN: usize = 16;

/// Resolve the KEM ciphertext length for the default Kyber-512 envelope.
///
/// Call once at startup; `encrypt`/`decrypt` resolve it lazily otherwise.
pub fn init() -> usize {
    Kyber512::init()
}

/// Builds and parses envelopes on top of a KEM
#[derive(Debug, Clone, Default)]
pub struct CryptoEnvelope<K = Kyber512> {
    kem: K,
}

impl CryptoEnvelope<Kyber512> {
    pub fn new() -> Self {
        Self { kem: Kyber512 }
    }
}

impl<K: Kem> CryptoEnvelope<K> {
    pub fn with_kem(kem: K) -> Self {
        Self { kem }
    }

    /// Envelope header length: `L + 12`
    pub fn header_len(&self) -> usize {
        self.kem.ciphertext_len() + NONCE_LEN
    }

    /// Fresh key material for one recipient.
    pub fn keypair_generate(&self) -> SecCwResult<KeyPair> {
        self.kem.keypair()
    }

    pub fn encrypt(&self, message: &[u8], public_key: &[u8]) -> SecCwResult<Vec<u8>> {
        let (kem_ct, shared_secret) = self.kem.encapsulate(public_key)?;
        let key = derive_key(&shared_secret)?;

        let mut nonce = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce);

        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key));
        let sealed = cipher
            .encrypt(Nonce::from_slice(&nonce), message)
            .map_err(|e| SecCwError::AeadSeal(e.to_string()))?;

        let mut envelope = Vec::with_capacity(kem_ct.len() + NONCE_LEN + sealed.len());
        envelope.extend_from_slice(&kem_ct);
        envelope.extend_from_slice(&nonce);
        envelope.extend_from_slice(&sealed);
        Ok(envelope)
    }

    /// Open an envelope. Fails with `Authentication` if the tag does not
    /// verify; no plaintext is returned in that case.
    pub fn decrypt(&self, envelope: &[u8], secret_key: &[u8]) -> SecCwResult<Vec<u8>> {
        let kem_len = self.kem.ciphertext_len();
        let header_len = kem_len + NONCE_LEN;
        if envelope.len() < header_len {
            return Err(SecCwError::Format(format!(
                "envelope is {} bytes, shorter than its {header_len}-byte header",
                envelope.len()
            )));
        }

        let (kem_ct, rest) = envelope.split_at(kem_len);
        let (nonce, sealed) = rest.split_at(NONCE_LEN);

        let shared_secret = self.kem.decapsulate(kem_ct, secret_key)?;
        let key = derive_key(&shared_secret)?;

        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key));
        cipher
            .decrypt(Nonce::from_slice(nonce), sealed)
            .map_err(|_| SecCwError::Authentication)
    }

    pub fn encrypt_compressed(&self, message: &[u8], public_key: &[u8]) -> SecCwResult<Vec<u8>> {
        self.encrypt(&compress(message)?, public_key)
    }

    pub fn decrypt_compressed(&self, envelope: &[u8], secret_key: &[u8]) -> SecCwResult<Vec<u8>> {
        decompress(&self.decrypt(envelope, secret_key)?)
    }

    /// Compressed envelope as standard padded base64, ready for keying.
    pub fn encrypt_compressed_b64(&self, message: &[u8], public_key: &[u8]) -> SecCwResult<String> {
        Ok(to_base64(&self.encrypt_compressed(message, public_key)?))
    }

    pub fn decrypt_compressed_b64(&self, text: &str, secret_key: &[u8]) -> SecCwResult<Vec<u8>> {
        self.decrypt_compressed(&from_base64(text)?, secret_key)
    }
}

/// HKDF-SHA256 with no salt and the fixed info string
pub fn derive_key(shared_secret: &[u8]) -> SecCwResult<[u8; AES_KEY_LEN]> {
    let hkdf = Hkdf::<Sha256>::new(None, shared_secret);
    let mut key = [0u8; AES_KEY_LEN];
    hkdf.expand(HKDF_INFO, &mut key)
        .map_err(|e| SecCwError::KeyGeneration(format!("HKDF expand failed: {e}")))?;
    Ok(key)
}

pub fn compress(data: &[u8]) -> SecCwResult<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| SecCwError::Compression(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| SecCwError::Compression(e.to_string()))
}

pub fn decompress(data: &[u8]) -> SecCwResult<Vec<u8>> {
    let mut out = Vec::new();
    ZlibDecoder::new(data)
        .read_to_end(&mut out)
        .map_err(|e| SecCwError::Compression(e.to_string()))?;
    Ok(out)
}

pub fn to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub fn from_base64(text: &str) -> SecCwResult<Vec<u8>> {
    STANDARD
        .decode(text)
        .map_err(|e| SecCwError::Format(format!("invalid base64: {e}")))
}
