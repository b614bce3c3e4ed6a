//! Domain layer - entities and repositories
//!
//! Wallet records and the persistence seam they are stored through.

pub mod entities;
pub mod repositories;

// Re-export domain components
pub use entities::*;
pub use repositories::*;
