//! Keypair factory
//!
//! Pure functions from (mnemonic, account index) to Ed25519 keypairs.
//! Nothing here touches storage.

use super::{mnemonic_to_seed, WalletKeypair};
use crate::core::crypto::derivation::derive_path;
use crate::shared::constants::*;
use crate::shared::WalletResult;

/// Key manager for Solana account keys
pub struct KeyManager;

impl KeyManager {
    /// Derive the keypair at `m/44'/501'/0'/{account_index}'`
    pub fn keypair_from_mnemonic(phrase: &str, account_index: u32) -> WalletResult<WalletKeypair> {
        let seed = mnemonic_to_seed(phrase, "")?;
        Self::keypair_from_seed(&seed[..], account_index)
    }

    pub fn keypair_from_seed(seed: &[u8], account_index: u32) -> WalletResult<WalletKeypair> {
        let secret = derive_path(seed, account_index)?;
        Ok(WalletKeypair::from_secret_bytes(&secret))
    }

    pub fn address_from_mnemonic(phrase: &str, account_index: u32) -> WalletResult<String> {
        Ok(Self::keypair_from_mnemonic(phrase, account_index)?.address())
    }

    /// Whether the string decodes to a 32-byte Base58 public key
    pub fn validate_address(address: &str) -> bool {
        matches!(
            bs58::decode(address).into_vec(),
            Ok(bytes) if bytes.len() == PUBLIC_KEY_SIZE
        )
    }
}
