use super::EncryptionAlgorithm;
use crate::core::crypto::password::KdfParams;
use crate::shared::utils::base64_bytes;
use serde::{Deserialize, Serialize};

/// Encrypted data structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedData {
    pub algorithm: EncryptionAlgorithm,
    #[serde(with = "base64_bytes")]
    pub ciphertext: Vec<u8>,
    #[serde(with = "base64_bytes")]
    pub nonce: Vec<u8>,
    #[serde(with = "base64_bytes")]
    pub tag: Vec<u8>,
}

/// A PIN-sealed secret: the ciphertext plus everything needed to re-derive
/// its key except the PIN itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedSecret {
    pub kdf: KdfParams,
    #[serde(flatten)]
    pub data: EncryptedData,
}
