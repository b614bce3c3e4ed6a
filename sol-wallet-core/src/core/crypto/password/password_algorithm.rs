use crate::shared::error::WalletError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// PIN stretching algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PasswordAlgorithm {
    /// Argon2id (v0x13)
    Argon2,
    /// PBKDF2-HMAC-SHA256
    PBKDF2,
}

impl fmt::Display for PasswordAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Argon2 => write!(f, "argon2id"),
            Self::PBKDF2 => write!(f, "pbkdf2-sha256"),
        }
    }
}

impl FromStr for PasswordAlgorithm {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "argon2" | "argon2id" => Ok(Self::Argon2),
            "pbkdf2" | "pbkdf2-sha256" => Ok(Self::PBKDF2),
            other => Err(WalletError::config(format!("Unsupported KDF algorithm: {}", other))),
        }
    }
}
