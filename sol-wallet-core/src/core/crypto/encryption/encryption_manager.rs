use super::{EncryptedData, EncryptionAlgorithm};
use crate::shared::constants::{KEY_SIZE, NONCE_SIZE, TAG_SIZE};
use crate::shared::error::WalletError;
use crate::shared::WalletResult;
use aes_gcm::aead::{Aead, Payload};
use aes_gcm::{Aes256Gcm, Key, KeyInit, Nonce};
use chacha20poly1305::{ChaCha20Poly1305, Key as ChaChaKey, Nonce as ChaChaNonce};
use rand_core::OsRng;
use rand_core::RngCore;
use zeroize::Zeroizing;

/// Seals and opens secrets with an AEAD cipher.
///
/// The associated data binds a ciphertext to its owner, so a sealed blob
/// copied into another record fails authentication.
pub struct EncryptionManager {
    algorithm: EncryptionAlgorithm,
}

impl EncryptionManager {
    pub fn new(algorithm: EncryptionAlgorithm) -> Self {
        Self { algorithm }
    }

    /// Encrypt data with a key using the configured cipher
    pub fn encrypt(&self, data: &[u8], key: &[u8], aad: &[u8]) -> WalletResult<EncryptedData> {
        if key.len() != KEY_SIZE {
            return Err(WalletError::crypto("Cipher requires a 32-byte key"));
        }

        let nonce_bytes = self.generate_nonce();
        let payload = Payload { msg: data, aad };
        let mut sealed = match self.algorithm {
            EncryptionAlgorithm::AES256GCM => Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key))
                .encrypt(Nonce::from_slice(&nonce_bytes), payload)
                .map_err(|e| WalletError::crypto(format!("AES-GCM encryption failed: {}", e)))?,
            EncryptionAlgorithm::ChaCha20Poly1305 => ChaCha20Poly1305::new(ChaChaKey::from_slice(key))
                .encrypt(ChaChaNonce::from_slice(&nonce_bytes), payload)
                .map_err(|e| WalletError::crypto(format!("ChaCha20-Poly1305 encryption failed: {}", e)))?,
        };

        // Split ciphertext and tag
        let tag = sealed.split_off(sealed.len() - TAG_SIZE);

        Ok(EncryptedData {
            algorithm: self.algorithm,
            ciphertext: sealed,
            nonce: nonce_bytes.to_vec(),
            tag,
        })
    }

    /// Decrypt data with a key.
    ///
    /// The cipher is taken from the sealed data, not from this manager.
    /// Any authentication failure is reported as `InvalidPin`: a wrong key
    /// and a tampered blob are indistinguishable to the caller.
    pub fn decrypt(&self, encrypted_data: &EncryptedData, key: &[u8], aad: &[u8]) -> WalletResult<Zeroizing<Vec<u8>>> {
        if key.len() != KEY_SIZE {
            return Err(WalletError::crypto("Cipher requires a 32-byte key"));
        }
        if encrypted_data.nonce.len() != NONCE_SIZE || encrypted_data.tag.len() != TAG_SIZE {
            return Err(WalletError::InvalidPin);
        }

        // Combine ciphertext and tag
        let mut ciphertext_with_tag = encrypted_data.ciphertext.clone();
        ciphertext_with_tag.extend_from_slice(&encrypted_data.tag);
        let payload = Payload {
            msg: ciphertext_with_tag.as_slice(),
            aad,
        };

        let plaintext = match encrypted_data.algorithm {
            EncryptionAlgorithm::AES256GCM => Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key))
                .decrypt(Nonce::from_slice(&encrypted_data.nonce), payload),
            EncryptionAlgorithm::ChaCha20Poly1305 => ChaCha20Poly1305::new(ChaChaKey::from_slice(key))
                .decrypt(ChaChaNonce::from_slice(&encrypted_data.nonce), payload),
        }
        .map_err(|_| WalletError::InvalidPin)?;

        Ok(Zeroizing::new(plaintext))
    }

    fn generate_nonce(&self) -> [u8; NONCE_SIZE] {
        let mut nonce = [0u8; NONCE_SIZE];
        let mut rng = OsRng;
        rng.fill_bytes(&mut nonce);
        nonce
    }
}
