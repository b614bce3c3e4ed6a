use crate::shared::constants::*;
use ed25519_dalek::{Signature, Signer, SigningKey};
use zeroize::Zeroizing;

/// Ed25519 keypair for one wallet account.
///
/// The signing key is wiped when the keypair is dropped. No `Debug`, no
/// `Clone`: a keypair lives for a single operation and is never cached.
pub struct WalletKeypair {
    signing_key: SigningKey,
}

impl WalletKeypair {
    /// Build from a 32-byte Ed25519 seed (the derived private key)
    pub fn from_secret_bytes(secret: &[u8; PRIVATE_KEY_SIZE]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(secret),
        }
    }

    pub fn public_key_bytes(&self) -> [u8; PUBLIC_KEY_SIZE] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Base58 public key, the Solana address
    pub fn address(&self) -> String {
        bs58::encode(self.public_key_bytes()).into_string()
    }

    pub fn sign(&self, message: &[u8]) -> [u8; SIGNATURE_SIZE] {
        let signature: Signature = self.signing_key.sign(message);
        signature.to_bytes()
    }

    /// Base58 of secret || public, the 64-byte format Phantom and
    /// Solflare import
    pub fn to_base58_keypair(&self) -> Zeroizing<String> {
        let bytes = Zeroizing::new(self.signing_key.to_keypair_bytes());
        Zeroizing::new(bs58::encode(&bytes[..]).into_string())
    }
}
