//! Key management for the wallet core
//!
//! Mnemonics, seeds and Ed25519 account keypairs.

pub mod key_manager;
pub mod secure_private_key;
pub mod secure_seed_phrase;

// Re-export all public items from submodules
pub use key_manager::*;
pub use secure_private_key::*;
pub use secure_seed_phrase::*;
