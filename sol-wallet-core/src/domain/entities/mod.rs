//! Domain entities and value objects

pub mod wallet;

// Re-export entities
pub use wallet::*;
