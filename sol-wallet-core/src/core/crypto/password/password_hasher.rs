use super::{KdfParams, PasswordAlgorithm, PasswordConfig};
use crate::shared::constants::*;
use crate::shared::error::WalletError;
use crate::shared::WalletResult;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use base64::Engine;
use pbkdf2::pbkdf2;
use rand_core::OsRng;
use rand_core::RngCore;
use zeroize::{Zeroize, Zeroizing};

const PBKDF2_PHC_ID: &str = "pbkdf2-sha256";

/// PIN hasher and key stretcher
pub struct WalletPasswordHasher {
    config: PasswordConfig,
}

impl WalletPasswordHasher {
    pub fn new(config: PasswordConfig) -> Self {
        Self { config }
    }

    /// Fresh per-secret KDF parameters using the configured costs
    pub fn new_kdf_params(&self) -> KdfParams {
        KdfParams::generate(&self.config)
    }

    /// Stretch a PIN into a 256-bit cipher key
    pub fn derive_key(&self, pin: &str, params: &KdfParams) -> WalletResult<Zeroizing<[u8; KEY_SIZE]>> {
        let mut key = Zeroizing::new([0u8; KEY_SIZE]);
        match params {
            KdfParams::Argon2id {
                memory_kib,
                iterations,
                parallelism,
                salt,
            } => {
                let argon2 = build_argon2(*memory_kib, *iterations, *parallelism)?;
                argon2.hash_password_into(pin.as_bytes(), salt, &mut key[..])?;
            }
            KdfParams::Pbkdf2Sha256 { rounds, salt } => {
                check_pbkdf2_rounds(*rounds)?;
                pbkdf2::<hmac::Hmac<sha2::Sha256>>(pin.as_bytes(), salt, *rounds, &mut key[..])
                    .map_err(|e| WalletError::crypto(format!("PBKDF2 error: {:?}", e)))?;
            }
        }
        Ok(key)
    }

    /// Hash a PIN into a PHC string
    pub fn hash_password(&self, password: &str) -> WalletResult<String> {
        let salt = self.generate_salt();

        match self.config.algorithm {
            PasswordAlgorithm::Argon2 => self.hash_argon2(password, &salt),
            PasswordAlgorithm::PBKDF2 => self.hash_pbkdf2(password, &salt),
        }
    }

    /// Verify a PIN against a PHC string.
    ///
    /// The algorithm and costs are read from the hash itself, so verifiers
    /// written under older settings keep working.
    pub fn verify_password(&self, password: &str, hash: &str) -> WalletResult<bool> {
        if hash.starts_with(&format!("${}$", PBKDF2_PHC_ID)) {
            self.verify_pbkdf2(password, hash)
        } else {
            self.verify_argon2(password, hash)
        }
    }

    fn generate_salt(&self) -> Vec<u8> {
        let mut salt = vec![0u8; self.config.salt_length];
        let mut rng = OsRng;
        rng.fill_bytes(&mut salt);
        salt
    }

    fn hash_argon2(&self, password: &str, salt: &[u8]) -> WalletResult<String> {
        let argon2 = build_argon2(self.config.memory_cost, self.config.iterations, self.config.parallelism)?;
        let salt_str = SaltString::encode_b64(salt)?;
        let password_hash = argon2.hash_password(password.as_bytes(), &salt_str)?;

        Ok(password_hash.to_string())
    }

    fn verify_argon2(&self, password: &str, hash: &str) -> WalletResult<bool> {
        let password_hash = PasswordHash::new(hash)?;
        let cost = |name: &str| password_hash.params.get_decimal(name).unwrap_or(0);
        check_argon2_cost(cost("m"), cost("t"), cost("p"))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &password_hash)
            .is_ok())
    }

    /// PHC string format: $pbkdf2-sha256$<iterations>$<base64(salt)>$<base64(hash)>
    fn hash_pbkdf2(&self, password: &str, salt: &[u8]) -> WalletResult<String> {
        let mut key = vec![0u8; KEY_SIZE];
        pbkdf2::<hmac::Hmac<sha2::Sha256>>(password.as_bytes(), salt, self.config.pbkdf2_rounds, &mut key)
            .map_err(|e| WalletError::crypto(format!("PBKDF2 error: {:?}", e)))?;
        let hash = format!(
            "${}${}${}${}",
            PBKDF2_PHC_ID,
            self.config.pbkdf2_rounds,
            base64::engine::general_purpose::STANDARD.encode(salt),
            base64::engine::general_purpose::STANDARD.encode(&key)
        );
        key.zeroize();
        Ok(hash)
    }

    fn verify_pbkdf2(&self, password: &str, hash: &str) -> WalletResult<bool> {
        let parts: Vec<&str> = hash.split('$').collect();
        if parts.len() != 5 || parts[1] != PBKDF2_PHC_ID {
            return Err(WalletError::crypto("Invalid PBKDF2 PHC hash format"));
        }
        let iterations: u32 = parts[2]
            .parse()
            .map_err(|_| WalletError::crypto("Invalid iterations in hash"))?;
        check_pbkdf2_rounds(iterations)?;
        let salt = base64::engine::general_purpose::STANDARD
            .decode(parts[3])
            .map_err(|_| WalletError::crypto("Invalid salt encoding"))?;
        let stored_key = base64::engine::general_purpose::STANDARD
            .decode(parts[4])
            .map_err(|_| WalletError::crypto("Invalid key encoding"))?;
        let mut computed_key = vec![0u8; stored_key.len()];
        pbkdf2::<hmac::Hmac<sha2::Sha256>>(password.as_bytes(), &salt, iterations, &mut computed_key)
            .map_err(|e| WalletError::crypto(format!("PBKDF2 error: {:?}", e)))?;
        let result = constant_time_eq(&computed_key, &stored_key);
        computed_key.zeroize();
        Ok(result)
    }
}

fn build_argon2(memory_kib: u32, iterations: u32, parallelism: u32) -> WalletResult<Argon2<'static>> {
    check_argon2_cost(memory_kib, iterations, parallelism)?;
    let params = argon2::Params::new(memory_kib, iterations, parallelism, Some(KEY_SIZE))?;
    Ok(Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params))
}

/// Costs above these bounds only come from corrupted records
fn check_argon2_cost(memory_kib: u32, iterations: u32, parallelism: u32) -> WalletResult<()> {
    if memory_kib > MAX_ARGON2_MEMORY_KIB || iterations > MAX_ARGON2_ITERATIONS || parallelism > MAX_ARGON2_PARALLELISM {
        return Err(WalletError::crypto("Argon2 cost exceeds the supported maximum"));
    }
    Ok(())
}

fn check_pbkdf2_rounds(rounds: u32) -> WalletResult<()> {
    if rounds > MAX_PBKDF2_ROUNDS {
        return Err(WalletError::crypto("PBKDF2 rounds exceed the supported maximum"));
    }
    Ok(())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_hasher() -> WalletPasswordHasher {
        WalletPasswordHasher::new(PasswordConfig::low_cost())
    }

    #[test]
    fn test_hash_password() {
        let hasher = fast_hasher();
        let hash = hasher.hash_password("123456").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("123456"));
    }

    #[test]
    fn test_verify_password() {
        let hasher = fast_hasher();
        let hash = hasher.hash_password("123456").unwrap();
        assert!(hasher.verify_password("123456", &hash).unwrap());
        assert!(!hasher.verify_password("654321", &hash).unwrap());
    }

    #[test]
    fn test_pbkdf2_verifier() {
        let hasher = WalletPasswordHasher::new(PasswordConfig::low_cost().with_algorithm(PasswordAlgorithm::PBKDF2));
        let hash = hasher.hash_password("1234").unwrap();
        assert!(hash.starts_with("$pbkdf2-sha256$1000$"));
        assert!(hasher.verify_password("1234", &hash).unwrap());
        assert!(!hasher.verify_password("4321", &hash).unwrap());

        // An Argon2-configured hasher still reads PBKDF2 verifiers
        assert!(fast_hasher().verify_password("1234", &hash).unwrap());
    }

    #[test]
    fn test_different_salts_produce_different_hashes() {
        let hasher = fast_hasher();
        assert_ne!(hasher.hash_password("1234").unwrap(), hasher.hash_password("1234").unwrap());
    }

    #[test]
    fn test_derive_key_is_deterministic_per_params() {
        let hasher = fast_hasher();
        let params = hasher.new_kdf_params();
        let a = hasher.derive_key("123456", &params).unwrap();
        let b = hasher.derive_key("123456", &params).unwrap();
        let c = hasher.derive_key("123457", &params).unwrap();
        assert_eq!(*a, *b);
        assert_ne!(*a, *c);

        let other = hasher.new_kdf_params();
        assert_ne!(*a, *hasher.derive_key("123456", &other).unwrap());
    }

    #[test]
    fn test_derive_key_pbkdf2_vector() {
        // RFC 7914 section 11, first 32 bytes
        let params = KdfParams::Pbkdf2Sha256 {
            rounds: 1,
            salt: b"salt".to_vec(),
        };
        let key = fast_hasher().derive_key("passwd", &params).unwrap();
        assert_eq!(
            hex::encode(*key),
            "55ac046e56e3089fec1691c22544b605f94185216dde0465e68b9d57c20dacbc"
        );
    }

    #[test]
    fn test_invalid_argon2_params_rejected() {
        let params = KdfParams::Argon2id {
            memory_kib: 1,
            iterations: 1,
            parallelism: 1,
            salt: vec![0u8; 16],
        };
        assert!(matches!(fast_hasher().derive_key("1234", &params), Err(WalletError::Crypto(_))));
    }

    #[test]
    fn test_oversized_costs_rejected_before_hashing() {
        let memory = KdfParams::Argon2id {
            memory_kib: u32::MAX,
            iterations: 1,
            parallelism: 1,
            salt: vec![0u8; 16],
        };
        assert!(matches!(fast_hasher().derive_key("1234", &memory), Err(WalletError::Crypto(_))));

        let passes = KdfParams::Argon2id {
            memory_kib: 1024,
            iterations: u32::MAX,
            parallelism: 1,
            salt: vec![0u8; 16],
        };
        assert!(matches!(fast_hasher().derive_key("1234", &passes), Err(WalletError::Crypto(_))));

        let rounds = KdfParams::Pbkdf2Sha256 {
            rounds: u32::MAX,
            salt: b"salt".to_vec(),
        };
        assert!(matches!(fast_hasher().derive_key("1234", &rounds), Err(WalletError::Crypto(_))));
    }

    #[test]
    fn test_oversized_verifier_costs_rejected() {
        let salt = base64::engine::general_purpose::STANDARD.encode([0u8; 16]);
        let pbkdf2_hash = format!("$pbkdf2-sha256${}${}$AAAA", u32::MAX, salt);
        assert!(fast_hasher().verify_password("1234", &pbkdf2_hash).is_err());

        let argon2_hash = fast_hasher().hash_password("1234").unwrap().replace("m=1024", "m=4294967295");
        assert!(fast_hasher().verify_password("1234", &argon2_hash).is_err());
    }
}
