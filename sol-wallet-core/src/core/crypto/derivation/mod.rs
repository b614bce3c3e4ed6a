//! Hierarchical key derivation for the wallet core
//!
//! Hardened-only SLIP-0010 derivation over Ed25519 along the Solana
//! BIP-44 path used by Phantom and Solflare.

pub mod derivation_path;
pub mod hd_derivation;

// Re-export all public items from submodules
pub use derivation_path::*;
pub use hd_derivation::*;
