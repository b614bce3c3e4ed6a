//! Wallet lifecycle management
//!
//! Orchestrates the mnemonic engine, the keypair factory and the secure
//! store: master creation, further accounts of the master mnemonic,
//! imports, activation and deletion.

use crate::core::crypto::keys::{
    check_mnemonic, generate_mnemonic_with, KeyManager, SecureSeedPhrase, WalletKeypair,
};
use crate::core::crypto::signatures::{SignatureManager, TransactionSignature};
use crate::core::storage::SecureWalletStore;
use crate::domain::entities::{NewWalletRecord, WalletRecord};
use crate::shared::config::WalletCoreConfig;
use crate::shared::error::WalletError;
use crate::shared::types::{AccountIndex, Address, WalletId, WalletKind, WalletSummary};
use crate::shared::WalletResult;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use zeroize::Zeroizing;

/// Wallet lifecycle manager
pub struct WalletManager {
    store: Arc<SecureWalletStore>,
    config: WalletCoreConfig,
    signatures: SignatureManager,
    // Serializes index allocation for derived accounts
    lifecycle_lock: Mutex<()>,
}

impl WalletManager {
    pub fn new(store: Arc<SecureWalletStore>, config: WalletCoreConfig) -> Self {
        Self {
            store,
            config,
            signatures: SignatureManager::new(),
            lifecycle_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &Arc<SecureWalletStore> {
        &self.store
    }

    pub fn config(&self) -> &WalletCoreConfig {
        &self.config
    }

    /// Generate the installation's master mnemonic and store account 0
    pub async fn create_master_wallet(&self, name: &str, pin: &str) -> WalletResult<WalletSummary> {
        let _guard = self.lifecycle_lock.lock().await;

        if self.store.master_record().await.is_some() {
            return Err(WalletError::MasterAlreadyExists);
        }

        let phrase = generate_mnemonic_with(self.config.master_mnemonic_strength)?;
        let phrase = Zeroizing::new(phrase.as_str().to_string());
        let address = derive_address(phrase.clone(), 0).await?;

        let record = self
            .store
            .create(NewWalletRecord::new(name, address, 0, WalletKind::Master), phrase.as_bytes(), pin)
            .await?;
        Ok(self.summarize(&record))
    }

    /// Store the next unused account of the master mnemonic
    pub async fn create_derived_wallet(&self, name: &str, pin: &str) -> WalletResult<WalletSummary> {
        let _guard = self.lifecycle_lock.lock().await;

        let master = self.store.master_record().await.ok_or(WalletError::MasterNotFound)?;
        let secret = self.store.unlock(&master.id, pin).await?;
        let phrase = secret_to_phrase(&secret)?;

        let account_index = self.next_account_index().await?;
        let address = derive_address(phrase.clone(), account_index).await?;

        let record = self
            .store
            .create(
                NewWalletRecord::new(name, address, account_index, WalletKind::Derived),
                phrase.as_bytes(),
                pin,
            )
            .await?;
        Ok(self.summarize(&record))
    }

    /// Store account 0 of a phrase from another wallet app
    pub async fn import_wallet(&self, name: &str, phrase: &str, pin: &str) -> WalletResult<WalletSummary> {
        check_mnemonic(phrase).map_err(|e| match e {
            WalletError::InvalidWordCount(count) => WalletError::InvalidWordCount(count),
            other => WalletError::InvalidMnemonic(other.to_string()),
        })?;
        let phrase = SecureSeedPhrase::parse(phrase)?;
        let phrase = Zeroizing::new(phrase.as_str().to_string());
        let address = derive_address(phrase.clone(), 0).await?;

        let record = self
            .store
            .create(NewWalletRecord::new(name, address, 0, WalletKind::Imported), phrase.as_bytes(), pin)
            .await?;
        Ok(self.summarize(&record))
    }

    pub async fn switch_active_wallet(&self, id: &str) -> WalletResult<()> {
        self.store.set_active(id).await
    }

    pub async fn delete_wallet(&self, id: &str) -> WalletResult<()> {
        self.store.remove(id).await
    }

    /// Decrypt the master mnemonic for backup display
    pub async fn unlock_and_reveal_mnemonic(&self, pin: &str) -> WalletResult<Zeroizing<String>> {
        let master = self.store.master_record().await.ok_or(WalletError::MasterNotFound)?;
        self.reveal_wallet_mnemonic(&master.id, pin).await
    }

    pub async fn reveal_wallet_mnemonic(&self, id: &str, pin: &str) -> WalletResult<Zeroizing<String>> {
        let secret = self.store.unlock(id, pin).await?;
        secret_to_phrase(&secret)
    }

    pub async fn get_active_wallet_public_key(&self) -> Option<Address> {
        let id = self.store.get_active_id()?;
        self.store.get(&id).await.ok().map(|record| record.public_key)
    }

    pub fn get_active_wallet_id(&self) -> Option<WalletId> {
        self.store.get_active_id()
    }

    pub async fn list_wallets(&self) -> Vec<WalletSummary> {
        self.store.list_all().await
    }

    /// Sign with the keypair of wallet `id`
    pub async fn sign_message(&self, id: &str, pin: &str, message: &[u8]) -> WalletResult<TransactionSignature> {
        let keypair = self.unlock_keypair(id, pin).await?;
        Ok(self.signatures.sign(&keypair, message))
    }

    pub fn verify_message(&self, address: &str, message: &[u8], signature: &str) -> bool {
        self.signatures.verify(address, message, signature)
    }

    /// Base58 64-byte keypair in the format other Solana wallets import
    pub async fn export_keypair(&self, id: &str, pin: &str) -> WalletResult<Zeroizing<String>> {
        let keypair = self.unlock_keypair(id, pin).await?;
        Ok(keypair.to_base58_keypair())
    }

    pub async fn rename_wallet(&self, id: &str, name: &str) -> WalletResult<WalletSummary> {
        let record = self.store.rename(id, name).await?;
        Ok(self.summarize(&record))
    }

    pub async fn change_pin(&self, old_pin: &str, new_pin: &str) -> WalletResult<()> {
        let _guard = self.lifecycle_lock.lock().await;
        self.store.change_pin(old_pin, new_pin).await
    }

    pub fn subscribe_active_wallet(&self) -> watch::Receiver<Option<WalletId>> {
        self.store.subscribe_active()
    }

    async fn unlock_keypair(&self, id: &str, pin: &str) -> WalletResult<WalletKeypair> {
        let record = self.store.get(id).await?;
        let secret = self.store.unlock(id, pin).await?;
        let phrase = secret_to_phrase(&secret)?;
        let account_index = record.account_index;

        let keypair =
            tokio::task::spawn_blocking(move || KeyManager::keypair_from_mnemonic(&phrase, account_index)).await??;
        if keypair.address() != record.public_key {
            log::error!("Wallet {} secret does not derive its stored public key", id);
            return Err(WalletError::internal("Stored public key does not match derived key"));
        }
        Ok(keypair)
    }

    /// max(account index over master-mnemonic wallets) + 1
    async fn next_account_index(&self) -> WalletResult<AccountIndex> {
        let records = self.store.records_by_age().await;
        match records
            .iter()
            .filter(|record| record.shares_master_mnemonic())
            .map(|record| record.account_index)
            .max()
        {
            Some(max) => max.checked_add(1).ok_or(WalletError::IndexOutOfRange(max)),
            None => Ok(0),
        }
    }

    fn summarize(&self, record: &WalletRecord) -> WalletSummary {
        record.summary(self.store.get_active_id().as_deref())
    }
}

/// Derive the address off the async executor
async fn derive_address(phrase: Zeroizing<String>, account_index: AccountIndex) -> WalletResult<Address> {
    tokio::task::spawn_blocking(move || KeyManager::address_from_mnemonic(&phrase, account_index)).await?
}

fn secret_to_phrase(secret: &[u8]) -> WalletResult<Zeroizing<String>> {
    let phrase = std::str::from_utf8(secret).map_err(|_| WalletError::crypto("Stored secret is not a phrase"))?;
    Ok(Zeroizing::new(phrase.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::crypto::password::PasswordConfig;
    use crate::infrastructure::platform::MemoryStorage;

    const TEST_PHRASE: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
    const TEST_ADDRESS: &str = "HAgk14JpMQLgt6rVgv7cBQFJWFto5Dqxi472uT3DKpqk";
    const PIN: &str = "123456";

    async fn manager() -> WalletManager {
        let config = WalletCoreConfig::default().with_kdf(PasswordConfig::low_cost());
        let store = SecureWalletStore::open(Arc::new(MemoryStorage::new()), &config)
            .await
            .unwrap();
        WalletManager::new(Arc::new(store), config)
    }

    #[tokio::test]
    async fn test_master_wallet() {
        let manager = manager().await;
        let master = manager.create_master_wallet("Main", PIN).await.unwrap();
        assert!(master.is_master_wallet);
        assert!(!master.is_active);

        let phrase = manager.unlock_and_reveal_mnemonic(PIN).await.unwrap();
        assert_eq!(phrase.split(' ').count(), 12);
        assert_eq!(KeyManager::address_from_mnemonic(&phrase, 0).unwrap(), master.public_key);

        assert_eq!(
            manager.create_master_wallet("Again", PIN).await,
            Err(WalletError::MasterAlreadyExists)
        );
    }

    #[tokio::test]
    async fn test_derived_wallets_take_next_index() {
        let manager = manager().await;
        assert_eq!(
            manager.create_derived_wallet("Early", PIN).await,
            Err(WalletError::MasterNotFound)
        );

        manager.create_master_wallet("Main", PIN).await.unwrap();
        let first = manager.create_derived_wallet("Savings", PIN).await.unwrap();
        let second = manager.create_derived_wallet("Trading", PIN).await.unwrap();

        assert_eq!(manager.store().get(&first.id).await.unwrap().account_index, 1);
        assert_eq!(manager.store().get(&second.id).await.unwrap().account_index, 2);
        assert!(!first.is_master_wallet);

        // The index of a deleted top account is handed out again
        manager.delete_wallet(&second.id).await.unwrap();
        let third = manager.create_derived_wallet("Spare", PIN).await.unwrap();
        assert_eq!(manager.store().get(&third.id).await.unwrap().account_index, 2);
    }

    #[tokio::test]
    async fn test_derived_wallet_wrong_pin() {
        let manager = manager().await;
        manager.create_master_wallet("Main", PIN).await.unwrap();
        assert_eq!(manager.create_derived_wallet("Savings", "000000").await, Err(WalletError::InvalidPin));
        assert_eq!(manager.list_wallets().await.len(), 1);
    }

    #[tokio::test]
    async fn test_import_wallet() {
        let manager = manager().await;
        let imported = manager
            .import_wallet("Phantom", &format!("  {}  ", TEST_PHRASE.to_uppercase()), PIN)
            .await
            .unwrap();
        assert_eq!(imported.public_key, TEST_ADDRESS);
        assert!(!imported.is_master_wallet);

        let revealed = manager.reveal_wallet_mnemonic(&imported.id, PIN).await.unwrap();
        assert_eq!(revealed.as_str(), TEST_PHRASE);

        assert!(matches!(
            manager.import_wallet("Again", TEST_PHRASE, PIN).await,
            Err(WalletError::DuplicatePublicKey(_))
        ));
    }

    #[tokio::test]
    async fn test_import_rejects_bad_phrases() {
        let manager = manager().await;
        let eleven = TEST_PHRASE.rsplit_once(' ').unwrap().0;
        assert_eq!(
            manager.import_wallet("Bad", eleven, PIN).await,
            Err(WalletError::InvalidWordCount(11))
        );

        let checksum = TEST_PHRASE.replace("about", "ability");
        assert!(matches!(
            manager.import_wallet("Bad", &checksum, PIN).await,
            Err(WalletError::InvalidMnemonic(_))
        ));

        let unknown = TEST_PHRASE.replace("about", "solana");
        assert!(matches!(
            manager.import_wallet("Bad", &unknown, PIN).await,
            Err(WalletError::InvalidMnemonic(_))
        ));
        assert!(manager.list_wallets().await.is_empty());
    }

    #[tokio::test]
    async fn test_switch_and_active_public_key() {
        let manager = manager().await;
        assert_eq!(manager.get_active_wallet_public_key().await, None);

        let master = manager.create_master_wallet("Main", PIN).await.unwrap();
        let imported = manager.import_wallet("Imported", TEST_PHRASE, PIN).await.unwrap();

        manager.switch_active_wallet(&imported.id).await.unwrap();
        assert_eq!(manager.get_active_wallet_public_key().await, Some(TEST_ADDRESS.to_string()));

        manager.switch_active_wallet(&master.id).await.unwrap();
        assert_eq!(manager.get_active_wallet_public_key().await, Some(master.public_key.clone()));

        let wallets = manager.list_wallets().await;
        assert_eq!(wallets.iter().filter(|w| w.is_active).count(), 1);
        assert!(wallets.iter().find(|w| w.id == master.id).unwrap().is_active);
    }

    #[tokio::test]
    async fn test_delete_active_wallet_clears_pointer() {
        let manager = manager().await;
        manager.create_master_wallet("Main", PIN).await.unwrap();
        let imported = manager.import_wallet("Imported", TEST_PHRASE, PIN).await.unwrap();
        let mut receiver = manager.subscribe_active_wallet();

        manager.switch_active_wallet(&imported.id).await.unwrap();
        manager.delete_wallet(&imported.id).await.unwrap();

        assert_eq!(manager.get_active_wallet_public_key().await, None);
        assert_eq!(*receiver.borrow_and_update(), None);
    }

    #[tokio::test]
    async fn test_sign_and_export() {
        let manager = manager().await;
        let imported = manager.import_wallet("Imported", TEST_PHRASE, PIN).await.unwrap();

        let signed = manager.sign_message(&imported.id, PIN, b"hello").await.unwrap();
        assert_eq!(signed.signer, TEST_ADDRESS);
        assert!(manager.verify_message(TEST_ADDRESS, b"hello", &signed.signature));

        let exported = manager.export_keypair(&imported.id, PIN).await.unwrap();
        assert_eq!(bs58::decode(exported.as_str()).into_vec().unwrap().len(), 64);

        assert_eq!(
            manager.sign_message(&imported.id, "000000", b"hello").await,
            Err(WalletError::InvalidPin)
        );
    }

    #[tokio::test]
    async fn test_rename_and_change_pin() {
        let manager = manager().await;
        let master = manager.create_master_wallet("Main", PIN).await.unwrap();

        let renamed = manager.rename_wallet(&master.id, "Everyday").await.unwrap();
        assert_eq!(renamed.name, "Everyday");

        manager.change_pin(PIN, "24680").await.unwrap();
        assert_eq!(manager.unlock_and_reveal_mnemonic(PIN).await, Err(WalletError::InvalidPin));
        assert!(manager.unlock_and_reveal_mnemonic("24680").await.is_ok());
        assert!(manager.create_derived_wallet("Next", "24680").await.is_ok());
    }
}
