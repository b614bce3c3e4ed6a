//! Runtime configuration for the wallet core
//!
//! Values come from the process environment (a `.env` file is honoured) and
//! fall back to safe defaults.

use crate::core::crypto::encryption::EncryptionAlgorithm;
use crate::core::crypto::keys::MnemonicStrength;
use crate::core::crypto::password::{PasswordAlgorithm, PasswordConfig};
use crate::shared::constants::*;
use crate::shared::error::WalletError;
use crate::shared::types::WalletResult;
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

pub const ENV_STORAGE_DIR: &str = "WALLET_CORE_STORAGE_DIR";
pub const ENV_KDF_ALGORITHM: &str = "WALLET_CORE_KDF_ALGORITHM";
pub const ENV_KDF_MEMORY_KIB: &str = "WALLET_CORE_KDF_MEMORY_KIB";
pub const ENV_KDF_ITERATIONS: &str = "WALLET_CORE_KDF_ITERATIONS";
pub const ENV_KDF_PARALLELISM: &str = "WALLET_CORE_KDF_PARALLELISM";
pub const ENV_PBKDF2_ROUNDS: &str = "WALLET_CORE_PBKDF2_ROUNDS";
pub const ENV_CIPHER: &str = "WALLET_CORE_CIPHER";
pub const ENV_MNEMONIC_STRENGTH: &str = "WALLET_CORE_MNEMONIC_STRENGTH";

/// Wallet core configuration
#[derive(Debug, Clone)]
pub struct WalletCoreConfig {
    /// Directory holding wallet records
    pub storage_dir: PathBuf,
    /// PIN-to-key derivation parameters for newly sealed secrets
    pub kdf: PasswordConfig,
    /// Cipher for newly sealed secrets
    pub encryption_algorithm: EncryptionAlgorithm,
    /// Strength of the master wallet mnemonic
    pub master_mnemonic_strength: MnemonicStrength,
}

impl Default for WalletCoreConfig {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
            kdf: PasswordConfig::default(),
            encryption_algorithm: EncryptionAlgorithm::AES256GCM,
            master_mnemonic_strength: MnemonicStrength::Bits128,
        }
    }
}

impl WalletCoreConfig {
    /// Load configuration from `.env` / environment variables
    pub fn from_env() -> WalletResult<Self> {
        dotenv().ok(); // Load .env if present
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> WalletResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup(ENV_STORAGE_DIR).filter(|v| !v.trim().is_empty()) {
            config.storage_dir = PathBuf::from(dir.trim());
        }

        if let Some(value) = lookup(ENV_KDF_ALGORITHM) {
            config.kdf.algorithm = value.parse()?;
        }
        if let Some(value) = lookup(ENV_KDF_MEMORY_KIB) {
            config.kdf.memory_cost = parse_number(ENV_KDF_MEMORY_KIB, &value)?;
        }
        if let Some(value) = lookup(ENV_KDF_ITERATIONS) {
            config.kdf.iterations = parse_number(ENV_KDF_ITERATIONS, &value)?;
        }
        if let Some(value) = lookup(ENV_KDF_PARALLELISM) {
            config.kdf.parallelism = parse_number(ENV_KDF_PARALLELISM, &value)?;
        }
        if let Some(value) = lookup(ENV_PBKDF2_ROUNDS) {
            config.kdf.pbkdf2_rounds = parse_number(ENV_PBKDF2_ROUNDS, &value)?;
        }
        if let Some(value) = lookup(ENV_CIPHER) {
            config.encryption_algorithm = value.parse()?;
        }
        if let Some(value) = lookup(ENV_MNEMONIC_STRENGTH) {
            let bits: usize = parse_number(ENV_MNEMONIC_STRENGTH, &value)?;
            config.master_mnemonic_strength = MnemonicStrength::try_from(bits)
                .map_err(|_| WalletError::config(format!("{} must be one of 128, 160, 192, 224, 256", ENV_MNEMONIC_STRENGTH)))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Use a specific storage directory
    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = dir.into();
        self
    }

    /// Use specific KDF parameters
    pub fn with_kdf(mut self, kdf: PasswordConfig) -> Self {
        self.kdf = kdf;
        self
    }

    pub fn validate(&self) -> WalletResult<()> {
        match self.kdf.algorithm {
            PasswordAlgorithm::Argon2 => {
                if self.kdf.parallelism == 0 || self.kdf.iterations == 0 {
                    return Err(WalletError::config("Argon2 iterations and parallelism must be positive"));
                }
                if self.kdf.memory_cost < 8 * self.kdf.parallelism {
                    return Err(WalletError::config("Argon2 memory must be at least 8 KiB per lane"));
                }
                if self.kdf.memory_cost > MAX_ARGON2_MEMORY_KIB
                    || self.kdf.iterations > MAX_ARGON2_ITERATIONS
                    || self.kdf.parallelism > MAX_ARGON2_PARALLELISM
                {
                    return Err(WalletError::config("Argon2 cost exceeds the supported maximum"));
                }
            }
            PasswordAlgorithm::PBKDF2 => {
                if self.kdf.pbkdf2_rounds == 0 || self.kdf.pbkdf2_rounds > MAX_PBKDF2_ROUNDS {
                    return Err(WalletError::config(format!(
                        "PBKDF2 rounds must be between 1 and {}",
                        MAX_PBKDF2_ROUNDS
                    )));
                }
            }
        }
        if self.kdf.salt_length < 8 {
            return Err(WalletError::config("KDF salt must be at least 8 bytes"));
        }
        Ok(())
    }
}

fn default_storage_dir() -> PathBuf {
    // Use OS-specific app data directory
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("./secure_storage"))
        .join(STORAGE_DIR_NAME)
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> WalletResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| WalletError::config(format!("{} has an invalid value: {}", key, value)))
}
