//! Storage repository for data access
//!
//! A flat key/value byte store. Wallet records, the active-wallet pointer
//! and the PIN verifier are each one entry.

use crate::shared::error::WalletError;
use async_trait::async_trait;

/// Storage repository trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageRepository: Send + Sync {
    /// Store data under `key`, replacing any previous value atomically
    async fn store(&self, key: &str, data: &[u8]) -> Result<(), WalletError>;

    /// Retrieve data, `None` if the key was never written
    async fn retrieve(&self, key: &str) -> Result<Option<Vec<u8>>, WalletError>;

    /// Delete stored data; deleting a missing key is not an error
    async fn delete(&self, key: &str) -> Result<(), WalletError>;

    /// All keys starting with `prefix`
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, WalletError>;
}
