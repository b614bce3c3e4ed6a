//! PIN handling for the wallet core
//!
//! Stretches PINs into cipher keys and keeps a PHC-format verifier so a
//! wrong PIN can be rejected before any record is touched.

pub mod kdf_params;
pub mod password_algorithm;
pub mod password_config;
pub mod password_hasher;

// Re-export all public items from submodules
pub use kdf_params::*;
pub use password_algorithm::*;
pub use password_config::*;
pub use password_hasher::*;
