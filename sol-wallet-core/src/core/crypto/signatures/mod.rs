//! Digital signature functionality for the wallet core
//!
//! Ed25519 message signatures, Base58-encoded the way Solana tooling
//! prints them.

pub mod signature_manager;
pub mod transaction_signature;

// Re-export all public items from submodules
pub use signature_manager::*;
pub use transaction_signature::*;
