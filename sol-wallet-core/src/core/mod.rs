//! Core wallet functionality
//!
//! Cryptography, the secure wallet store and the lifecycle manager built
//! on top of them.

pub mod crypto;
pub mod storage;
pub mod wallet;
