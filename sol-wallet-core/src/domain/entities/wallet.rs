//! Wallet entity and related value objects

use crate::core::crypto::derivation::SolanaDerivationPath;
use crate::core::crypto::encryption::EncryptedSecret;
use crate::shared::constants::RECORD_VERSION;
use crate::shared::types::{AccountIndex, Address, WalletId, WalletKind, WalletSummary};
use crate::shared::WalletResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Persisted wallet record.
///
/// Everything except `encrypted_secret` is public information. The secret
/// is the mnemonic for master, derived and imported wallets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletRecord {
    pub version: u32,
    pub id: WalletId,
    pub name: String,
    pub public_key: Address,
    pub encrypted_secret: EncryptedSecret,
    pub account_index: AccountIndex,
    pub derivation_path: String,
    pub kind: WalletKind,
    pub is_master_wallet: bool,
    pub created_at: DateTime<Utc>,
}

impl WalletRecord {
    pub fn summary(&self, active_id: Option<&str>) -> WalletSummary {
        WalletSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            public_key: self.public_key.clone(),
            is_active: active_id == Some(self.id.as_str()),
            is_master_wallet: self.is_master_wallet,
        }
    }

    /// Whether the secret is the installation's master mnemonic
    pub fn shares_master_mnemonic(&self) -> bool {
        self.kind.shares_master_mnemonic()
    }
}

/// Public half of a record about to be created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWalletRecord {
    pub name: String,
    pub public_key: Address,
    pub account_index: AccountIndex,
    pub kind: WalletKind,
}

impl NewWalletRecord {
    pub fn new(name: impl Into<String>, public_key: impl Into<Address>, account_index: AccountIndex, kind: WalletKind) -> Self {
        Self {
            name: name.into(),
            public_key: public_key.into(),
            account_index,
            kind,
        }
    }

    /// Attach id and sealed secret, producing the stored form
    pub fn into_record(self, id: WalletId, encrypted_secret: EncryptedSecret) -> WalletResult<WalletRecord> {
        let path = SolanaDerivationPath::new(self.account_index)?;
        Ok(WalletRecord {
            version: RECORD_VERSION,
            id,
            name: self.name,
            public_key: self.public_key,
            encrypted_secret,
            account_index: self.account_index,
            derivation_path: path.to_string(),
            is_master_wallet: self.kind.is_master(),
            kind: self.kind,
            created_at: Utc::now(),
        })
    }
}

/// Case-insensitive set of wallet names in use
#[derive(Debug, Clone, Default)]
pub struct WalletNameIndex {
    names: HashSet<String>,
}

impl WalletNameIndex {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a WalletRecord>) -> Self {
        Self {
            names: records.into_iter().map(|record| fold_name(&record.name)).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&fold_name(name))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn fold_name(name: &str) -> String {
    name.trim().to_lowercase()
}
