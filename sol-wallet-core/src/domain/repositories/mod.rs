//! Domain repositories
//!
//! Repository traits for persistence, implemented in `infrastructure`.

pub mod storage_repository;

// Re-export repositories
pub use storage_repository::*;
