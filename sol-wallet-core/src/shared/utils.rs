//! Utility functions for the wallet core
//!
//! This module contains common utility functions used throughout the wallet core.

use crate::shared::constants::*;
use crate::shared::error::WalletError;
use rand_core::OsRng;
use rand_core::RngCore;

/// Generate a unique wallet ID
pub fn generate_id() -> String {
    format!("wallet_{}", uuid::Uuid::new_v4())
}

/// Validate and trim a wallet display name
pub fn validate_wallet_name(name: &str) -> Result<String, WalletError> {
    let trimmed = name.trim();
    let length = trimmed.chars().count();

    if length < WALLET_NAME_MIN_LENGTH {
        return Err(WalletError::validation("Wallet name cannot be empty"));
    }

    if length > WALLET_NAME_MAX_LENGTH {
        return Err(WalletError::validation(format!(
            "Wallet name must be at most {} characters long",
            WALLET_NAME_MAX_LENGTH
        )));
    }

    Ok(trimmed.to_string())
}

/// Validate PIN length
pub fn validate_pin(pin: &str) -> Result<(), WalletError> {
    if pin.chars().count() < PIN_MIN_LENGTH {
        return Err(WalletError::validation(format!(
            "PIN must be at least {} characters long",
            PIN_MIN_LENGTH
        )));
    }

    if pin.chars().count() > PIN_MAX_LENGTH {
        return Err(WalletError::validation(format!(
            "PIN must be at most {} characters long",
            PIN_MAX_LENGTH
        )));
    }

    Ok(())
}

/// Generate secure random bytes
pub fn generate_secure_random_bytes(length: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; length];
    let mut rng = OsRng;
    rng.fill_bytes(&mut bytes);
    bytes
}

/// Serde adapter storing byte vectors as standard base64 strings
pub mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id() {
        let id1 = generate_id();
        let id2 = generate_id();
        assert_ne!(id1, id2);
        assert!(id1.starts_with("wallet_"));
        assert_eq!(id1.len(), 7 + 36); // prefix + UUID length
    }

    #[test]
    fn test_validate_wallet_name() {
        assert_eq!(validate_wallet_name("  Main  ").unwrap(), "Main");
        assert_eq!(validate_wallet_name(&"a".repeat(50)).unwrap().len(), 50);

        assert!(validate_wallet_name("").is_err());
        assert!(validate_wallet_name("   ").is_err());
        assert!(validate_wallet_name(&"a".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_pin() {
        assert!(validate_pin("1234").is_ok());
        assert!(validate_pin("123456").is_ok());
        assert!(validate_pin(&"9".repeat(64)).is_ok());

        assert!(validate_pin("123").is_err());
        assert!(validate_pin("").is_err());
        assert!(validate_pin(&"9".repeat(65)).is_err());
    }

    #[test]
    fn test_random_bytes() {
        let bytes1 = generate_secure_random_bytes(32);
        let bytes2 = generate_secure_random_bytes(32);
        assert_eq!(bytes1.len(), 32);
        assert_ne!(bytes1, bytes2);
    }

    #[test]
    fn test_base64_bytes_adapter() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Holder {
            #[serde(with = "base64_bytes")]
            data: Vec<u8>,
        }

        let json = serde_json::to_string(&Holder { data: vec![0, 1, 2, 255] }).unwrap();
        assert_eq!(json, r#"{"data":"AAEC/w=="}"#);
        let holder: Holder = serde_json::from_str(&json).unwrap();
        assert_eq!(holder.data, vec![0, 1, 2, 255]);
    }
}
