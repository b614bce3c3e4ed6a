//! Infrastructure layer - storage backends

pub mod platform;

// Re-export infrastructure components
pub use platform::*;
