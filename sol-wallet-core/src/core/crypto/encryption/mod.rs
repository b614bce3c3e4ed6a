//! Encryption functionality for the wallet core
//!
//! AES-256-GCM and ChaCha20-Poly1305 sealing of wallet secrets.

pub mod encrypted_data;
pub mod encryption_algorithm;
pub mod encryption_manager;

// Re-export all public items from submodules
pub use encrypted_data::*;
pub use encryption_algorithm::*;
pub use encryption_manager::*;
