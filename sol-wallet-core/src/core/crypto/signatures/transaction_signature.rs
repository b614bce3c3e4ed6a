use serde::{Deserialize, Serialize};

/// Signature produced by a wallet keypair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSignature {
    /// Base58 64-byte Ed25519 signature
    pub signature: String,
    /// Base58 address of the signer
    pub signer: String,
}
