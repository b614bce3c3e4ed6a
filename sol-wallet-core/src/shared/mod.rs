//! Shared types, utilities, and constants
//!
//! Common types, configuration, utilities and errors used throughout the
//! wallet core.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
pub mod utils;

// Re-export shared components
pub use config::*;
pub use constants::*;
pub use error::*;
pub use types::*;
pub use utils::*;
