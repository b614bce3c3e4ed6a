use serde::{Deserialize, Serialize};

// Basic types for wallet operations
pub type Address = String;
pub type WalletId = String;
pub type AccountIndex = u32;

/// How a wallet's key material came into the installation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WalletKind {
    /// Holds the originally generated mnemonic, account index 0
    Master,
    /// Further account index of the master mnemonic
    Derived,
    /// Phrase brought in from another wallet app, always account index 0
    Imported,
}

impl WalletKind {
    pub fn is_master(&self) -> bool {
        matches!(self, WalletKind::Master)
    }

    /// Wallets whose secret is the master mnemonic
    pub fn shares_master_mnemonic(&self) -> bool {
        matches!(self, WalletKind::Master | WalletKind::Derived)
    }
}

/// Wallet entry as shown by the wallet switcher (public fields only)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WalletSummary {
    pub id: WalletId,
    pub name: String,
    pub public_key: Address,
    pub is_active: bool,
    pub is_master_wallet: bool,
}

// Result types for better error handling
pub type WalletResult<T> = Result<T, crate::shared::error::WalletError>;
