//! Constants for the wallet core
//!
//! This module contains all constants used throughout the wallet core.

// Wallet constants
pub const RECORD_VERSION: u32 = 1;
pub const WALLET_NAME_MAX_LENGTH: usize = 50;
pub const WALLET_NAME_MIN_LENGTH: usize = 1;

// Mnemonic constants
pub const SUPPORTED_MNEMONIC_STRENGTHS: &[usize] = &[128, 160, 192, 224, 256];
pub const SUPPORTED_WORD_COUNTS: &[usize] = &[12, 15, 18, 21, 24];
pub const SEED_SIZE: usize = 64;

// Derivation constants (SLIP-0010, Solana BIP-44 layout)
pub const ED25519_SEED_KEY: &[u8] = b"ed25519 seed";
pub const HARDENED_OFFSET: u32 = 0x8000_0000;
pub const BIP44_PURPOSE: u32 = 44;
pub const SOLANA_COIN_TYPE: u32 = 501;

// Security constants
pub const PRIVATE_KEY_SIZE: usize = 32;
pub const PUBLIC_KEY_SIZE: usize = 32;
pub const CHAIN_CODE_SIZE: usize = 32;
pub const KEY_SIZE: usize = 32;
pub const NONCE_SIZE: usize = 12;
pub const TAG_SIZE: usize = 16;
pub const SALT_SIZE: usize = 16;
pub const SIGNATURE_SIZE: usize = 64;

// PIN constants
pub const PIN_MIN_LENGTH: usize = 4;
pub const PIN_MAX_LENGTH: usize = 64;

// KDF defaults
pub const DEFAULT_ARGON2_MEMORY_KIB: u32 = 65536; // 64 MiB
pub const DEFAULT_ARGON2_ITERATIONS: u32 = 3;
pub const DEFAULT_ARGON2_PARALLELISM: u32 = 1;
pub const DEFAULT_PBKDF2_ROUNDS: u32 = 600_000;

// Upper bounds on KDF costs read back from storage
pub const MAX_ARGON2_MEMORY_KIB: u32 = 1_048_576; // 1 GiB
pub const MAX_ARGON2_ITERATIONS: u32 = 64;
pub const MAX_ARGON2_PARALLELISM: u32 = 16;
pub const MAX_PBKDF2_ROUNDS: u32 = 10_000_000;

// Storage constants
pub const STORAGE_DIR_NAME: &str = "sol-wallet-core";
pub const WALLET_RECORD_PREFIX: &str = "wallet_record_";
pub const ACTIVE_WALLET_KEY: &str = "active_wallet";
pub const PIN_VERIFIER_KEY: &str = "pin_verifier";
