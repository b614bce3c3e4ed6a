use super::PasswordAlgorithm;
use crate::shared::constants::*;

/// PIN stretching configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordConfig {
    pub algorithm: PasswordAlgorithm,
    pub salt_length: usize,
    /// Argon2 time cost
    pub iterations: u32,
    /// Argon2 memory cost in KiB
    pub memory_cost: u32,
    pub parallelism: u32,
    pub pbkdf2_rounds: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            algorithm: PasswordAlgorithm::Argon2,
            salt_length: SALT_SIZE,
            iterations: DEFAULT_ARGON2_ITERATIONS,
            memory_cost: DEFAULT_ARGON2_MEMORY_KIB, // 64MB
            parallelism: DEFAULT_ARGON2_PARALLELISM,
            pbkdf2_rounds: DEFAULT_PBKDF2_ROUNDS,
        }
    }
}

impl PasswordConfig {
    /// Reduced-cost parameters for tests and local tooling.
    ///
    /// Never use these for wallets holding real funds.
    pub fn low_cost() -> Self {
        Self {
            iterations: 1,
            memory_cost: 1024,
            pbkdf2_rounds: 1_000,
            ..Self::default()
        }
    }

    /// Same cost parameters, different algorithm
    pub fn with_algorithm(mut self, algorithm: PasswordAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }
}
