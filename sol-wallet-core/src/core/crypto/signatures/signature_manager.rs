use super::TransactionSignature;
use crate::core::crypto::keys::WalletKeypair;
use crate::shared::constants::*;
use ed25519_dalek::{Signature, VerifyingKey};

/// Digital signature manager
#[derive(Debug, Default, Clone, Copy)]
pub struct SignatureManager;

impl SignatureManager {
    pub fn new() -> Self {
        Self
    }

    pub fn sign(&self, keypair: &WalletKeypair, message: &[u8]) -> TransactionSignature {
        TransactionSignature {
            signature: bs58::encode(keypair.sign(message)).into_string(),
            signer: keypair.address(),
        }
    }

    /// Check a Base58 signature against a Base58 address.
    ///
    /// Malformed addresses or signatures verify as `false`.
    pub fn verify(&self, address: &str, message: &[u8], signature: &str) -> bool {
        let Some(verifying_key) = decode_fixed::<PUBLIC_KEY_SIZE>(address)
            .and_then(|bytes| VerifyingKey::from_bytes(&bytes).ok())
        else {
            return false;
        };
        let Some(signature) = decode_fixed::<SIGNATURE_SIZE>(signature).map(|bytes| Signature::from_bytes(&bytes))
        else {
            return false;
        };

        verifying_key.verify_strict(message, &signature).is_ok()
    }
}

fn decode_fixed<const N: usize>(encoded: &str) -> Option<[u8; N]> {
    bs58::decode(encoded).into_vec().ok()?.try_into().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_and_verify() {
        let manager = SignatureManager::new();
        let keypair = WalletKeypair::from_secret_bytes(&[1u8; 32]);

        let signed = manager.sign(&keypair, b"transfer 1 SOL");
        assert_eq!(signed.signer, keypair.address());
        assert!(manager.verify(&signed.signer, b"transfer 1 SOL", &signed.signature));
        assert!(!manager.verify(&signed.signer, b"transfer 2 SOL", &signed.signature));
    }

    #[test]
    fn test_wrong_signer_rejected() {
        let manager = SignatureManager::new();
        let alice = WalletKeypair::from_secret_bytes(&[1u8; 32]);
        let bob = WalletKeypair::from_secret_bytes(&[2u8; 32]);

        let signed = manager.sign(&alice, b"msg");
        assert!(!manager.verify(&bob.address(), b"msg", &signed.signature));
    }

    #[test]
    fn test_malformed_inputs_are_false() {
        let manager = SignatureManager::new();
        let keypair = WalletKeypair::from_secret_bytes(&[1u8; 32]);
        let signed = manager.sign(&keypair, b"msg");

        assert!(!manager.verify("not-base58!", b"msg", &signed.signature));
        assert!(!manager.verify(&keypair.address(), b"msg", "abc"));
        assert!(!manager.verify("", b"msg", ""));
    }

    #[test]
    fn test_empty_and_large_messages() {
        let manager = SignatureManager::new();
        let keypair = WalletKeypair::from_secret_bytes(&[4u8; 32]);
        for message in [Vec::new(), b"x".repeat(1000)] {
            let signed = manager.sign(&keypair, &message);
            assert!(manager.verify(&signed.signer, &message, &signed.signature));
        }
    }
}
