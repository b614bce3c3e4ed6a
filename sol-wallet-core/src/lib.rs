//! Solana Wallet Core
//!
//! Key-management core for a Solana mobile wallet.
//! Handles mnemonic generation, SLIP-0010 Ed25519 derivation and PIN-sealed
//! wallet storage in Rust.
//!
//! ## Architecture
//!
//! - **Core**: Crypto primitives, the secure wallet store and the lifecycle manager
//! - **Domain**: Wallet records and the storage repository seam
//! - **Infrastructure**: File and in-memory storage backends
//! - **Shared**: Errors, configuration, constants and utilities
//!
//! ## Security Features
//!
//! - Mnemonics and derived keys are zeroized on drop
//! - Secrets are sealed with AES-256-GCM or ChaCha20-Poly1305 under a PIN-derived key
//! - Argon2id (or PBKDF2-SHA256) key stretching with per-record salts
//!
//! ## Usage
//!
//! ```no_run
//! # async fn demo() -> sol_wallet_core::WalletResult<()> {
//! let manager = sol_wallet_core::init_wallet_core().await?;
//!
//! let master = manager.create_master_wallet("Main", "123456").await?;
//! let second = manager.create_derived_wallet("Savings", "123456").await?;
//! manager.switch_active_wallet(&second.id).await?;
//!
//! let signature = manager.sign_message(&master.id, "123456", b"hello").await?;
//! assert!(manager.verify_message(&master.public_key, b"hello", &signature.signature));
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod shared;

// Re-export specific components
pub use crate::core::crypto::derivation::SolanaDerivationPath;
pub use crate::core::crypto::keys::{
    check_mnemonic, generate_mnemonic, mnemonic_to_seed, validate_mnemonic, KeyManager, MnemonicStrength,
    SecureSeedPhrase, WalletKeypair,
};
pub use crate::core::crypto::signatures::{SignatureManager, TransactionSignature};
pub use crate::core::storage::SecureWalletStore;
pub use crate::core::wallet::WalletManager;

// Re-export domain entities
pub use domain::entities::WalletRecord;
pub use domain::repositories::StorageRepository;
pub use infrastructure::platform::{FileStorage, MemoryStorage};

// Re-export shared types
pub use shared::config::WalletCoreConfig;
pub use shared::error::{ErrorCategory, WalletError};
pub use shared::types::{WalletKind, WalletResult, WalletSummary};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(feature = "ffi")]
pub mod ffi;

#[cfg(feature = "ffi")]
pub use ffi::*;

/// Initialize logging; safe to call more than once
pub fn init_logging() {
    let _ = env_logger::try_init();
}

/// Initialize the wallet core with configuration from .env or safe defaults
pub async fn init_wallet_core() -> WalletResult<WalletManager> {
    let config = WalletCoreConfig::from_env()?;
    let storage = FileStorage::new(config.storage_dir.clone()).await?;
    init_wallet_core_with(config, Arc::new(storage)).await
}

/// Initialize the wallet core over a caller-supplied storage backend
pub async fn init_wallet_core_with(
    config: WalletCoreConfig,
    repository: Arc<dyn StorageRepository>,
) -> WalletResult<WalletManager> {
    config.validate()?;
    let store = SecureWalletStore::open(repository, &config).await?;
    log::info!("{} {} ready", NAME, VERSION);
    Ok(WalletManager::new(Arc::new(store), config))
}
