//! Secure wallet store
//!
//! Owns the persisted wallet records, the PIN verifier and the active-wallet
//! pointer. Every mutation runs under one async mutex, so duplicate checks
//! and the write they guard are atomic with respect to each other.
//!
//! Secrets are sealed with a key stretched from the PIN using per-record
//! KDF parameters, and bound to the record id as AEAD associated data.

use crate::core::crypto::encryption::{EncryptedSecret, EncryptionAlgorithm, EncryptionManager};
use crate::core::crypto::password::WalletPasswordHasher;
use crate::domain::entities::{NewWalletRecord, WalletNameIndex, WalletRecord};
use crate::domain::repositories::StorageRepository;
use crate::shared::config::WalletCoreConfig;
use crate::shared::constants::*;
use crate::shared::error::WalletError;
use crate::shared::types::{WalletId, WalletSummary};
use crate::shared::utils::{generate_id, validate_pin, validate_wallet_name};
use crate::shared::WalletResult;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{watch, Mutex, RwLock};
use zeroize::Zeroizing;

fn record_key(id: &str) -> String {
    format!("{}{}", WALLET_RECORD_PREFIX, id)
}

/// PIN-sealed wallet record store
pub struct SecureWalletStore {
    repository: Arc<dyn StorageRepository>,
    hasher: Arc<WalletPasswordHasher>,
    cipher: EncryptionAlgorithm,
    records: RwLock<BTreeMap<WalletId, WalletRecord>>,
    write_lock: Mutex<()>,
    active: watch::Sender<Option<WalletId>>,
}

impl SecureWalletStore {
    /// Load every record and the active pointer from `repository`
    pub async fn open(repository: Arc<dyn StorageRepository>, config: &WalletCoreConfig) -> WalletResult<Self> {
        let mut records = BTreeMap::new();
        for key in repository.list_keys(WALLET_RECORD_PREFIX).await? {
            let Some(bytes) = repository.retrieve(&key).await? else {
                continue;
            };
            match serde_json::from_slice::<WalletRecord>(&bytes) {
                Ok(record) if record.version > RECORD_VERSION => {
                    log::warn!("Skipping wallet {} with unsupported record version {}", record.id, record.version);
                }
                Ok(record) => {
                    records.insert(record.id.clone(), record);
                }
                Err(e) => log::error!("Skipping unreadable wallet record {}: {}", key, e),
            }
        }

        let active_id = match repository.retrieve(ACTIVE_WALLET_KEY).await? {
            Some(bytes) => match String::from_utf8(bytes) {
                Ok(id) if records.contains_key(&id) => Some(id),
                Ok(id) => {
                    log::warn!("Active wallet {} no longer exists, leaving pointer unset", id);
                    None
                }
                Err(_) => {
                    log::warn!("Active wallet pointer is not valid UTF-8, leaving pointer unset");
                    None
                }
            },
            None => None,
        };

        log::info!(
            "Wallet store opened with {} wallet(s), active: {}",
            records.len(),
            active_id.as_deref().unwrap_or("none")
        );

        let (active, _) = watch::channel(active_id);
        Ok(Self {
            repository,
            hasher: Arc::new(WalletPasswordHasher::new(config.kdf.clone())),
            cipher: config.encryption_algorithm,
            records: RwLock::new(records),
            write_lock: Mutex::new(()),
            active,
        })
    }

    /// Seal `secret` under `pin` and persist a new record.
    ///
    /// Fails with `DuplicateName` (case-insensitive), `DuplicatePublicKey`,
    /// `MasterAlreadyExists`, or `InvalidPin` when a device PIN is already
    /// set and `pin` does not match it. Never changes the active pointer.
    pub async fn create(&self, new_record: NewWalletRecord, secret: &[u8], pin: &str) -> WalletResult<WalletRecord> {
        let name = validate_wallet_name(&new_record.name)?;
        validate_pin(pin)?;
        let new_record = NewWalletRecord { name, ..new_record };

        let _guard = self.write_lock.lock().await;

        {
            let records = self.records.read().await;
            if WalletNameIndex::from_records(records.values()).contains(&new_record.name) {
                return Err(WalletError::DuplicateName(new_record.name));
            }
            if records.values().any(|r| r.public_key == new_record.public_key) {
                return Err(WalletError::DuplicatePublicKey(new_record.public_key));
            }
            if new_record.kind.is_master() && records.values().any(|r| r.is_master_wallet) {
                return Err(WalletError::MasterAlreadyExists);
            }
        }

        let fresh_verifier = self.check_or_create_verifier(pin).await?;

        let id = generate_id();
        let sealed = self.seal(pin, secret, &id).await?;
        let record = new_record.into_record(id, sealed)?;
        let bytes = serde_json::to_vec(&record)?;

        if let Err(e) = self.repository.store(&record_key(&record.id), &bytes).await {
            if fresh_verifier {
                let _ = self.repository.delete(PIN_VERIFIER_KEY).await;
            }
            return Err(e);
        }

        log::info!(
            "Created {:?} wallet {} ({}) at {}",
            record.kind,
            record.id,
            record.public_key,
            record.derivation_path
        );
        self.records.write().await.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    /// Decrypt a record's secret
    pub async fn unlock(&self, id: &str, pin: &str) -> WalletResult<Zeroizing<Vec<u8>>> {
        let record = self.get(id).await?;
        let secret = self.open_secret(&record.encrypted_secret, pin, &record.id).await;
        if secret.is_err() {
            log::warn!("Unlock of wallet {} failed", id);
        }
        secret
    }

    /// Erase a record, clearing the active pointer if it referenced it.
    ///
    /// Nothing changes when the record delete fails.
    pub async fn remove(&self, id: &str) -> WalletResult<()> {
        let _guard = self.write_lock.lock().await;

        let record = self.get(id).await?;
        if record.is_master_wallet {
            return Err(WalletError::CannotDeleteMaster);
        }

        self.repository.delete(&record_key(id)).await?;
        self.records.write().await.remove(id);

        // A stale pointer is dropped on the next open
        if self.get_active_id().as_deref() == Some(id) {
            self.active.send_replace(None);
            if let Err(e) = self.repository.delete(ACTIVE_WALLET_KEY).await {
                log::warn!("Failed to clear active pointer for removed wallet {}: {}", id, e);
            }
        }

        log::info!("Removed wallet {} ({})", id, record.public_key);
        Ok(())
    }

    /// Public fields of every record, oldest first
    pub async fn list_all(&self) -> Vec<WalletSummary> {
        let active = self.get_active_id();
        self.records_by_age()
            .await
            .iter()
            .map(|record| record.summary(active.as_deref()))
            .collect()
    }

    /// Every record, oldest first
    pub async fn records_by_age(&self) -> Vec<WalletRecord> {
        let mut records: Vec<WalletRecord> = self.records.read().await.values().cloned().collect();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        records
    }

    pub async fn get(&self, id: &str) -> WalletResult<WalletRecord> {
        self.records
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| WalletError::not_found(id))
    }

    pub async fn master_record(&self) -> Option<WalletRecord> {
        self.records
            .read()
            .await
            .values()
            .find(|record| record.is_master_wallet)
            .cloned()
    }

    pub fn get_active_id(&self) -> Option<WalletId> {
        self.active.borrow().clone()
    }

    /// Point the active wallet at `id`; visible to readers immediately
    pub async fn set_active(&self, id: &str) -> WalletResult<()> {
        let _guard = self.write_lock.lock().await;

        if !self.records.read().await.contains_key(id) {
            return Err(WalletError::not_found(id));
        }
        self.repository.store(ACTIVE_WALLET_KEY, id.as_bytes()).await?;
        self.active.send_replace(Some(id.to_string()));

        log::info!("Active wallet set to {}", id);
        Ok(())
    }

    /// Receiver notified on every active-wallet change
    pub fn subscribe_active(&self) -> watch::Receiver<Option<WalletId>> {
        self.active.subscribe()
    }

    /// Check `pin` against the device PIN verifier.
    ///
    /// `false` when no PIN has been set yet.
    pub async fn verify_pin(&self, pin: &str) -> WalletResult<bool> {
        match self.load_verifier().await? {
            Some(verifier) => self.verify_against(pin, verifier).await,
            None => Ok(false),
        }
    }

    pub async fn rename(&self, id: &str, name: &str) -> WalletResult<WalletRecord> {
        let name = validate_wallet_name(name)?;
        let _guard = self.write_lock.lock().await;

        let mut record = self.get(id).await?;
        {
            let records = self.records.read().await;
            let others = WalletNameIndex::from_records(records.values().filter(|r| r.id != id));
            if others.contains(&name) {
                return Err(WalletError::DuplicateName(name));
            }
        }

        record.name = name;
        self.persist(&record).await?;
        log::info!("Renamed wallet {}", id);
        Ok(record)
    }

    /// Re-seal every record under a new PIN.
    ///
    /// All secrets are re-encrypted before anything is written. When a write
    /// fails, records already rewritten are put back under the old PIN. The
    /// in-memory view switches only after every write has landed.
    pub async fn change_pin(&self, old_pin: &str, new_pin: &str) -> WalletResult<()> {
        validate_pin(new_pin)?;
        let _guard = self.write_lock.lock().await;

        let verifier = self.load_verifier().await?.ok_or(WalletError::InvalidPin)?;
        if !self.verify_against(old_pin, verifier).await? {
            return Err(WalletError::InvalidPin);
        }

        let originals = self.records_by_age().await;
        let mut resealed = Vec::with_capacity(originals.len());
        for record in &originals {
            let secret = self.open_secret(&record.encrypted_secret, old_pin, &record.id).await?;
            let mut record = record.clone();
            record.encrypted_secret = self.seal(new_pin, &secret, &record.id).await?;
            resealed.push(record);
        }
        let new_verifier = self.hash_pin(new_pin).await?;

        for (written, record) in resealed.iter().enumerate() {
            if let Err(e) = self.write_record(record).await {
                log::error!("PIN change aborted writing wallet {}: {}", record.id, e);
                self.restore_records(&originals[..written]).await;
                return Err(e);
            }
        }
        if let Err(e) = self.repository.store(PIN_VERIFIER_KEY, new_verifier.as_bytes()).await {
            log::error!("PIN change aborted writing the verifier: {}", e);
            self.restore_records(&originals).await;
            return Err(e);
        }

        let count = resealed.len();
        let mut records = self.records.write().await;
        for record in resealed {
            records.insert(record.id.clone(), record);
        }

        log::info!("PIN changed, {} wallet(s) re-sealed", count);
        Ok(())
    }

    pub async fn name_index(&self) -> WalletNameIndex {
        WalletNameIndex::from_records(self.records.read().await.values())
    }

    async fn persist(&self, record: &WalletRecord) -> WalletResult<()> {
        self.write_record(record).await?;
        self.records.write().await.insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn write_record(&self, record: &WalletRecord) -> WalletResult<()> {
        let bytes = serde_json::to_vec(record)?;
        self.repository.store(&record_key(&record.id), &bytes).await
    }

    /// Best effort; a record that cannot be put back is logged
    async fn restore_records(&self, originals: &[WalletRecord]) {
        for record in originals {
            if let Err(e) = self.write_record(record).await {
                log::error!("Failed to restore wallet {} after aborted PIN change: {}", record.id, e);
            }
        }
    }

    /// Returns `true` when this call wrote the first verifier
    async fn check_or_create_verifier(&self, pin: &str) -> WalletResult<bool> {
        match self.load_verifier().await? {
            Some(verifier) => {
                if self.verify_against(pin, verifier).await? {
                    Ok(false)
                } else {
                    Err(WalletError::InvalidPin)
                }
            }
            None => {
                let verifier = self.hash_pin(pin).await?;
                self.repository.store(PIN_VERIFIER_KEY, verifier.as_bytes()).await?;
                log::debug!("Device PIN verifier created");
                Ok(true)
            }
        }
    }

    async fn load_verifier(&self) -> WalletResult<Option<String>> {
        match self.repository.retrieve(PIN_VERIFIER_KEY).await? {
            Some(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|_| WalletError::storage("PIN verifier is corrupted")),
            None => Ok(None),
        }
    }

    async fn verify_against(&self, pin: &str, verifier: String) -> WalletResult<bool> {
        let hasher = self.hasher.clone();
        let pin = Zeroizing::new(pin.to_string());
        tokio::task::spawn_blocking(move || hasher.verify_password(&pin, &verifier)).await?
    }

    async fn hash_pin(&self, pin: &str) -> WalletResult<String> {
        let hasher = self.hasher.clone();
        let pin = Zeroizing::new(pin.to_string());
        tokio::task::spawn_blocking(move || hasher.hash_password(&pin)).await?
    }

    async fn seal(&self, pin: &str, secret: &[u8], record_id: &str) -> WalletResult<EncryptedSecret> {
        let hasher = self.hasher.clone();
        let cipher = self.cipher;
        let pin = Zeroizing::new(pin.to_string());
        let secret = Zeroizing::new(secret.to_vec());
        let aad = record_id.to_string();

        tokio::task::spawn_blocking(move || -> WalletResult<EncryptedSecret> {
            let kdf = hasher.new_kdf_params();
            let key = hasher.derive_key(&pin, &kdf)?;
            let data = EncryptionManager::new(cipher).encrypt(&secret, &key[..], aad.as_bytes())?;
            Ok(EncryptedSecret { kdf, data })
        })
        .await?
    }

    async fn open_secret(&self, sealed: &EncryptedSecret, pin: &str, record_id: &str) -> WalletResult<Zeroizing<Vec<u8>>> {
        let hasher = self.hasher.clone();
        let cipher = self.cipher;
        let pin = Zeroizing::new(pin.to_string());
        let sealed = sealed.clone();
        let aad = record_id.to_string();

        tokio::task::spawn_blocking(move || -> WalletResult<Zeroizing<Vec<u8>>> {
            // Malformed KDF parameters in a stored record are indistinguishable from tampering
            let key = hasher.derive_key(&pin, &sealed.kdf).map_err(|_| WalletError::InvalidPin)?;
            EncryptionManager::new(cipher).decrypt(&sealed.data, &key[..], aad.as_bytes())
        })
        .await?
    }
}
