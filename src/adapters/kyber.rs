//! Kyber-512 adapter — implements Kem using the pqcrypto-kyber crate

use std::sync::OnceLock;

use pqcrypto_kyber::kyber512;
use pqcrypto_traits::kem::{Ciphertext as _, PublicKey as _, SecretKey as _, SharedSecret as _};

use crate::domain::{SecCwError, SecCwResult};
use crate::ports::{Kem, KeyPair};

/// Ciphertext length, resolved once by a throwaway encapsulation
static CIPHERTEXT_LEN: OnceLock<usize> = OnceLock::new();

/// Kyber-512 (768-byte ciphertexts)
#[derive(Debug, Clone, Copy, Default)]
pub struct Kyber512;

impl Kyber512 {
    /// Resolve the ciphertext length for this parameter set.
    ///
    /// The first call performs one throwaway keypair + encapsulation; every
    /// later call, from any thread, reads the stored value.
    pub fn init() -> usize {
        *CIPHERTEXT_LEN.get_or_init(|| {
            let (pk, _sk) = kyber512::keypair();
            let (_ss, ct) = kyber512::encapsulate(&pk);
            let len = ct.as_bytes().len();
            debug_assert_eq!(len, kyber512::ciphertext_bytes());
            log::debug!("Kyber-512 ciphertext length resolved to {len} bytes");
            len
        })
    }
}

impl Kem for Kyber512 {
    fn keypair(&self) -> SecCwResult<KeyPair> {
        let (pk, sk) = kyber512::keypair();
        let keypair = KeyPair {
            public_key: pk.as_bytes().to_vec(),
            secret_key: sk.as_bytes().to_vec(),
        };

        if keypair.public_key.len() != kyber512::public_key_bytes()
            || keypair.secret_key.len() != kyber512::secret_key_bytes()
        {
            return Err(SecCwError::KeyGeneration(format!(
                "unexpected key sizes: public {} bytes, secret {} bytes",
                keypair.public_key.len(),
                keypair.secret_key.len()
            )));
        }
        Ok(keypair)
    }

    fn encapsulate(&self, public_key: &[u8]) -> SecCwResult<(Vec<u8>, Vec<u8>)> {
        let pk = kyber512::PublicKey::from_bytes(public_key)
            .map_err(|e| SecCwError::Encapsulation(format!("invalid public key: {e:?}")))?;
        let (ss, ct) = kyber512::encapsulate(&pk);
        Ok((ct.as_bytes().to_vec(), ss.as_bytes().to_vec()))
    }

    fn decapsulate(&self, ciphertext: &[u8], secret_key: &[u8]) -> SecCwResult<Vec<u8>> {
        let ct = kyber512::Ciphertext::from_bytes(ciphertext)
            .map_err(|e| SecCwError::Decapsulation(format!("invalid ciphertext: {e:?}")))?;
        let sk = kyber512::SecretKey::from_bytes(secret_key)
            .map_err(|e| SecCwError::Decapsulation(format!("invalid secret key: {e:?}")))?;
        let ss = kyber512::decapsulate(&ct, &sk);
        Ok(ss.as_bytes().to_vec())
    }

    fn ciphertext_len(&self) -> usize {
        Self::init()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ciphertext_len_matches_parameter_set() {
        assert_eq!(Kyber512::init(), 768);
        assert_eq!(Kyber512.ciphertext_len(), kyber512::ciphertext_bytes());
    }

    #[test]
    fn init_is_safe_from_many_threads() {
        let handles: Vec<_> = (0..8).map(|_| std::thread::spawn(Kyber512::init)).collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 768);
        }
    }

    #[test]
    fn encapsulate_then_decapsulate_agree() {
        let kem = Kyber512;
        let keys = kem.keypair().unwrap();
        let (ct, ss) = kem.encapsulate(&keys.public_key).unwrap();
        assert_eq!(ct.len(), 768);
        assert_eq!(ss.len(), 32);
        assert_eq!(kem.decapsulate(&ct, &keys.secret_key).unwrap(), ss);
    }

    #[test]
    fn wrong_length_public_key_is_rejected() {
        let err = Kyber512.encapsulate(&[0u8; 12]).unwrap_err();
        assert!(matches!(err, SecCwError::Encapsulation(_)));
    }

    #[test]
    fn wrong_length_secret_key_is_rejected() {
        let kem = Kyber512;
        let keys = kem.keypair().unwrap();
        let (ct, _) = kem.encapsulate(&keys.public_key).unwrap();
        let err = kem.decapsulate(&ct, &keys.public_key).unwrap_err();
        assert!(matches!(err, SecCwError::Decapsulation(_)));
    }

    #[test]
    fn keys_are_fresh_per_call() {
        let a = Kyber512.keypair().unwrap();
        let b = Kyber512.keypair().unwrap();
        assert_ne!(a.public_key, b.public_key);
    }
}
