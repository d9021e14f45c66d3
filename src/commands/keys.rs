//! Key commands — generate, load and use Kyber key files

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::adapters::key_file::{load_key, save_key};
use crate::crypto::CryptoEnvelope;
use crate::domain::{SecCwError, SecCwResult};
use crate::ports::KeyPair;

pub const DEFAULT_PUBLIC_KEY_FILE: &str = "kyber_pk.b64";
pub const DEFAULT_PRIVATE_KEY_FILE: &str = "kyber_sk.b64";

/// Where a keypair lives on disk
#[derive(Debug, Clone)]
pub struct KeyPaths {
    pub public: PathBuf,
    pub private: PathBuf,
}

/// Generate a fresh keypair and write both halves.
pub fn keygen(paths: &KeyPaths) -> SecCwResult<KeyPair> {
    let keys = CryptoEnvelope::new().keypair_generate()?;
    save_key(&keys.public_key, &paths.public)?;
    save_key(&keys.secret_key, &paths.private)?;
    log::info!(
        "Generated keys in {} / {}",
        paths.public.display(),
        paths.private.display()
    );
    Ok(keys)
}

/// Load an existing keypair, or generate one if either file is missing.
pub fn load_or_create_keypair(paths: &KeyPaths) -> SecCwResult<KeyPair> {
    match load_keypair(paths) {
        Ok(keys) => {
            log::info!("Existing keys loaded");
            Ok(keys)
        }
        Err(SecCwError::Io(e)) if e.kind() == ErrorKind::NotFound => {
            log::info!("No pre-generated keys found, generating new keys");
            keygen(paths)
        }
        Err(e) => Err(e),
    }
}

fn load_keypair(paths: &KeyPaths) -> SecCwResult<KeyPair> {
    Ok(KeyPair {
        public_key: load_key(&paths.public)?,
        secret_key: load_key(&paths.private)?,
    })
}

/// Open a compressed base64 envelope with the private key at `private`.
pub fn decrypt_text(cipher_b64: &str, private: &Path) -> SecCwResult<Vec<u8>> {
    let secret_key = load_key(private)?;
    CryptoEnvelope::new().decrypt_compressed_b64(cipher_b64.trim(), &secret_key)
}
