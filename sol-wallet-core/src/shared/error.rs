//! Error handling for the wallet core
//!
//! This module defines the error types used throughout the wallet core.
//! Variants follow three families: cryptographic/derivation failures (fatal,
//! never retried), storage/authentication failures (user can correct the input
//! and retry) and policy violations (explicit product rules).

use thiserror::Error;

/// Wallet error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[error("Invalid mnemonic strength: {0} bits (expected 128, 160, 192, 224 or 256)")]
    InvalidStrength(usize),

    #[error("Wrong word count: {0} (expected 12, 15, 18, 21 or 24 words)")]
    InvalidWordCount(usize),

    #[error("Unknown word at position {position}: {word}")]
    UnknownWord { position: usize, word: String },

    #[error("Mnemonic checksum mismatch")]
    ChecksumMismatch,

    #[error("Invalid recovery phrase: {0}")]
    InvalidMnemonic(String),

    #[error("Account index out of range: {0} (must be below 2^31)")]
    IndexOutOfRange(u32),

    #[error("Invalid PIN")]
    InvalidPin,

    #[error("Wallet not found: {0}")]
    NotFound(String),

    #[error("A wallet named '{0}' already exists")]
    DuplicateName(String),

    #[error("Wallet with address {0} already exists")]
    DuplicatePublicKey(String),

    #[error("The master wallet cannot be deleted")]
    CannotDeleteMaster,

    #[error("A master wallet already exists")]
    MasterAlreadyExists,

    #[error("No master wallet has been created")]
    MasterNotFound,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cryptographic error: {0}")]
    Crypto(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error families surfaced to the UI layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Cryptographic,
    Storage,
    Policy,
    Internal,
}

impl WalletError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a cryptographic error
    pub fn crypto(message: impl Into<String>) -> Self {
        Self::Crypto(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Create a wallet not found error
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidStrength(_)
            | Self::InvalidWordCount(_)
            | Self::UnknownWord { .. }
            | Self::ChecksumMismatch
            | Self::InvalidMnemonic(_)
            | Self::IndexOutOfRange(_)
            | Self::Crypto(_) => ErrorCategory::Cryptographic,
            Self::InvalidPin
            | Self::NotFound(_)
            | Self::DuplicateName(_)
            | Self::DuplicatePublicKey(_)
            | Self::Validation(_)
            | Self::Storage(_) => ErrorCategory::Storage,
            Self::CannotDeleteMaster | Self::MasterAlreadyExists | Self::MasterNotFound => {
                ErrorCategory::Policy
            }
            Self::Config(_) | Self::Internal(_) => ErrorCategory::Internal,
        }
    }

    /// Whether the user can retry the operation with corrected input.
    ///
    /// Cryptographic errors, mnemonic problems included, are fatal for the
    /// operation and never retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Storage(_) => false,
            other => other.category() == ErrorCategory::Storage,
        }
    }

    /// Stable numeric code used across the FFI boundary
    pub fn code(&self) -> i32 {
        match self {
            Self::InvalidStrength(_) => 101,
            Self::InvalidWordCount(_) => 102,
            Self::UnknownWord { .. } => 103,
            Self::ChecksumMismatch => 104,
            Self::InvalidMnemonic(_) => 105,
            Self::IndexOutOfRange(_) => 106,
            Self::InvalidPin => 201,
            Self::NotFound(_) => 202,
            Self::DuplicateName(_) => 203,
            Self::DuplicatePublicKey(_) => 204,
            Self::CannotDeleteMaster => 301,
            Self::MasterAlreadyExists => 302,
            Self::MasterNotFound => 303,
            Self::Config(_) => 901,
            Self::Crypto(_) => 902,
            Self::Validation(_) => 903,
            Self::Storage(_) => 904,
            Self::Internal(_) => 905,
        }
    }
}

// Standard library error conversions
impl From<std::io::Error> for WalletError {
    fn from(err: std::io::Error) -> Self {
        Self::storage(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for WalletError {
    fn from(err: serde_json::Error) -> Self {
        Self::storage(format!("JSON error: {}", err))
    }
}

impl From<base64::DecodeError> for WalletError {
    fn from(err: base64::DecodeError) -> Self {
        Self::storage(format!("Base64 decoding error: {}", err))
    }
}

impl From<tokio::task::JoinError> for WalletError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::internal(format!("Task join error: {}", err))
    }
}

// Cryptographic error conversions
impl From<bip39::Error> for WalletError {
    fn from(err: bip39::Error) -> Self {
        match err {
            bip39::Error::BadWordCount(count) => Self::InvalidWordCount(count),
            bip39::Error::UnknownWord(position) => Self::UnknownWord {
                position,
                word: String::new(),
            },
            bip39::Error::BadEntropyBitCount(bits) => Self::InvalidStrength(bits),
            bip39::Error::InvalidChecksum => Self::ChecksumMismatch,
            other => Self::InvalidMnemonic(other.to_string()),
        }
    }
}

impl From<argon2::password_hash::Error> for WalletError {
    fn from(err: argon2::password_hash::Error) -> Self {
        Self::crypto(format!("Password hash error: {}", err))
    }
}

impl From<argon2::Error> for WalletError {
    fn from(err: argon2::Error) -> Self {
        Self::crypto(format!("Argon2 error: {}", err))
    }
}

impl From<ed25519_dalek::SignatureError> for WalletError {
    fn from(err: ed25519_dalek::SignatureError) -> Self {
        Self::crypto(format!("Ed25519 error: {}", err))
    }
}
