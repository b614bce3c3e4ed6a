use super::{PasswordAlgorithm, PasswordConfig};
use crate::shared::utils::{base64_bytes, generate_secure_random_bytes};
use serde::{Deserialize, Serialize};

/// Key-derivation parameters stored next to every sealed secret.
///
/// Records keep their own parameters so the defaults can be raised later
/// without breaking existing wallets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum KdfParams {
    Argon2id {
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
        #[serde(with = "base64_bytes")]
        salt: Vec<u8>,
    },
    Pbkdf2Sha256 {
        rounds: u32,
        #[serde(with = "base64_bytes")]
        salt: Vec<u8>,
    },
}

impl KdfParams {
    /// Fresh parameters with a random salt
    pub fn generate(config: &PasswordConfig) -> Self {
        let salt = generate_secure_random_bytes(config.salt_length);
        match config.algorithm {
            PasswordAlgorithm::Argon2 => Self::Argon2id {
                memory_kib: config.memory_cost,
                iterations: config.iterations,
                parallelism: config.parallelism,
                salt,
            },
            PasswordAlgorithm::PBKDF2 => Self::Pbkdf2Sha256 {
                rounds: config.pbkdf2_rounds,
                salt,
            },
        }
    }
}
