//! SLIP-0010 Ed25519 derivation
//!
//! Only hardened children exist for Ed25519; every level of the path
//! carries the `0x8000_0000` bit.

use super::SolanaDerivationPath;
use crate::shared::constants::*;
use crate::shared::error::WalletError;
use crate::shared::WalletResult;
use hmac::{Hmac, Mac};
use sha2::Sha512;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

type HmacSha512 = Hmac<Sha512>;

/// A private key with its chain code
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ExtendedKey {
    key: [u8; PRIVATE_KEY_SIZE],
    chain_code: [u8; CHAIN_CODE_SIZE],
}

impl ExtendedKey {
    pub fn key(&self) -> &[u8; PRIVATE_KEY_SIZE] {
        &self.key
    }

    pub fn chain_code(&self) -> &[u8; CHAIN_CODE_SIZE] {
        &self.chain_code
    }

    fn from_hmac(mac: HmacSha512) -> Self {
        let mut output = mac.finalize().into_bytes();
        let mut extended = Self {
            key: [0u8; PRIVATE_KEY_SIZE],
            chain_code: [0u8; CHAIN_CODE_SIZE],
        };
        extended.key.copy_from_slice(&output[..PRIVATE_KEY_SIZE]);
        extended.chain_code.copy_from_slice(&output[PRIVATE_KEY_SIZE..]);
        output.as_mut_slice().zeroize();
        extended
    }
}

/// I = HMAC-SHA512(key = "ed25519 seed", data = seed)
pub fn derive_master_key(seed: &[u8]) -> WalletResult<ExtendedKey> {
    let mut mac = HmacSha512::new_from_slice(ED25519_SEED_KEY)
        .map_err(|e| WalletError::crypto(format!("HMAC init failed: {}", e)))?;
    mac.update(seed);
    Ok(ExtendedKey::from_hmac(mac))
}

/// I = HMAC-SHA512(key = parent chain code, data = 0x00 || parent key || be32(index))
pub fn derive_child_key(parent: &ExtendedKey, index: u32) -> WalletResult<ExtendedKey> {
    if index < HARDENED_OFFSET {
        return Err(WalletError::crypto(format!(
            "Ed25519 derivation requires hardened indices, got {}",
            index
        )));
    }

    let mut mac = HmacSha512::new_from_slice(&parent.chain_code)
        .map_err(|e| WalletError::crypto(format!("HMAC init failed: {}", e)))?;
    mac.update(&[0x00]);
    mac.update(&parent.key);
    mac.update(&index.to_be_bytes());
    Ok(ExtendedKey::from_hmac(mac))
}

/// Walk `m/44'/501'/0'/{account_index}'` and return the Ed25519 seed
pub fn derive_path(seed: &[u8], account_index: u32) -> WalletResult<Zeroizing<[u8; PRIVATE_KEY_SIZE]>> {
    let path = SolanaDerivationPath::new(account_index)?;

    let mut current = derive_master_key(seed)?;
    for index in path.indices() {
        // Previous level is wiped when it is replaced
        current = derive_child_key(&current, index)?;
    }

    Ok(Zeroizing::new(*current.key()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // SLIP-0010 test vector 1 for ed25519
    const VECTOR_SEED: &str = "000102030405060708090a0b0c0d0e0f";

    #[test]
    fn test_master_key_vector() {
        let seed = hex::decode(VECTOR_SEED).unwrap();
        let master = derive_master_key(&seed).unwrap();
        assert_eq!(
            hex::encode(master.key()),
            "2b4be7f19ee27bbf30c667b642d5f4aa69fd169872f8fc3059c08ebae2eb19e7"
        );
        assert_eq!(
            hex::encode(master.chain_code()),
            "90046a93de5380a72b5e45010748567d5ea02bbf6522f979e05c0d8d8ca9fffb"
        );
    }

    #[test]
    fn test_hardened_child_vector() {
        let seed = hex::decode(VECTOR_SEED).unwrap();
        let master = derive_master_key(&seed).unwrap();
        let child = derive_child_key(&master, HARDENED_OFFSET).unwrap();
        assert_eq!(
            hex::encode(child.key()),
            "68e0fe46dfb67e368c75379acec591dad19df3cde26e63b93a8e704f1dade7a3"
        );
        assert_eq!(
            hex::encode(child.chain_code()),
            "8b59aa11380b624e81507a27fedda59fea6d0b779a778918a2fd3590e16e9c69"
        );
    }

    #[test]
    fn test_non_hardened_child_rejected() {
        let master = derive_master_key(&[7u8; 64]).unwrap();
        assert!(matches!(derive_child_key(&master, 0), Err(WalletError::Crypto(_))));
        assert!(matches!(derive_child_key(&master, HARDENED_OFFSET - 1), Err(WalletError::Crypto(_))));
    }

    #[test]
    fn test_derive_path_is_deterministic_and_index_sensitive() {
        let seed = [42u8; 64];
        let a = derive_path(&seed, 0).unwrap();
        let b = derive_path(&seed, 0).unwrap();
        let c = derive_path(&seed, 1).unwrap();
        assert_eq!(*a, *b);
        assert_ne!(*a, *c);
    }

    #[test]
    fn test_derive_path_matches_manual_walk() {
        let seed = [9u8; 64];
        let mut key = derive_master_key(&seed).unwrap();
        for index in [44, 501, 0, 5] {
            key = derive_child_key(&key, index | HARDENED_OFFSET).unwrap();
        }
        assert_eq!(*derive_path(&seed, 5).unwrap(), *key.key());
    }

    #[test]
    fn test_derive_path_index_out_of_range() {
        assert!(matches!(derive_path(&[0u8; 64], 1 << 31), Err(WalletError::IndexOutOfRange(_))));
    }
}
