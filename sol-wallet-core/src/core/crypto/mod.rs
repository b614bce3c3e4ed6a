//! Cryptographic functionality for the wallet core
//!
//! Mnemonics, SLIP-0010 derivation, Ed25519 keys and signatures, and the
//! PIN-keyed AEAD used to seal wallet secrets at rest. Every buffer holding
//! a seed, private key or decrypted secret is zeroized when dropped.

pub mod derivation;
pub mod encryption;
pub mod keys;
pub mod password;
pub mod signatures;

// Re-export all public items from submodules
pub use derivation::*;
pub use encryption::*;
pub use keys::*;
pub use password::*;
pub use signatures::*;
