//! Platform storage backends
//!
//! Implementations of [`StorageRepository`](crate::domain::StorageRepository):
//! a directory of small files for devices and an in-process map for tests
//! and embedding hosts that persist through their own keystore.

pub mod file_storage;
pub mod memory_storage;

pub use file_storage::*;
pub use memory_storage::*;
