//! BIP-39 mnemonic generation, validation and seed derivation

use crate::shared::constants::*;
use crate::shared::error::WalletError;
use crate::shared::WalletResult;
use bip39::{Language, Mnemonic};
use rand_core::{OsRng, RngCore};
use std::convert::TryFrom;
use zeroize::{Zeroize, Zeroizing};

/// Supported mnemonic entropy sizes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MnemonicStrength {
    #[default]
    Bits128,
    Bits160,
    Bits192,
    Bits224,
    Bits256,
}

impl MnemonicStrength {
    pub fn bits(self) -> usize {
        match self {
            Self::Bits128 => 128,
            Self::Bits160 => 160,
            Self::Bits192 => 192,
            Self::Bits224 => 224,
            Self::Bits256 => 256,
        }
    }

    pub fn entropy_bytes(self) -> usize {
        self.bits() / 8
    }

    /// Entropy bits plus one checksum bit per 32, in 11-bit words
    pub fn word_count(self) -> usize {
        (self.bits() + self.bits() / 32) / 11
    }
}

impl TryFrom<usize> for MnemonicStrength {
    type Error = WalletError;

    fn try_from(bits: usize) -> Result<Self, Self::Error> {
        match bits {
            128 => Ok(Self::Bits128),
            160 => Ok(Self::Bits160),
            192 => Ok(Self::Bits192),
            224 => Ok(Self::Bits224),
            256 => Ok(Self::Bits256),
            other => Err(WalletError::InvalidStrength(other)),
        }
    }
}

/// Secure seed phrase wrapper.
///
/// Holds a normalized, checksum-valid phrase. The buffer is wiped on drop;
/// there is deliberately no `Debug` or `Clone`.
pub struct SecureSeedPhrase {
    phrase: String,
}

impl SecureSeedPhrase {
    /// Parse and validate a user-supplied phrase
    pub fn parse(phrase: &str) -> WalletResult<Self> {
        let normalized = Zeroizing::new(normalize_phrase(phrase));
        check_mnemonic(&normalized)?;
        Ok(Self {
            phrase: normalized.to_string(),
        })
    }

    fn from_mnemonic(mnemonic: &Mnemonic) -> Self {
        Self {
            phrase: mnemonic.to_string(),
        }
    }

    /// Get the seed phrase as a &str
    pub fn as_str(&self) -> &str {
        &self.phrase
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.phrase.split(' ')
    }

    pub fn word_count(&self) -> usize {
        self.words().count()
    }

    /// BIP-39 seed for this phrase
    pub fn to_seed(&self, passphrase: &str) -> WalletResult<Zeroizing<[u8; SEED_SIZE]>> {
        mnemonic_to_seed(&self.phrase, passphrase)
    }
}

impl Drop for SecureSeedPhrase {
    fn drop(&mut self) {
        self.phrase.zeroize();
    }
}

/// Generate a fresh English mnemonic from OS entropy
pub fn generate_mnemonic(strength_bits: usize) -> WalletResult<SecureSeedPhrase> {
    let strength = MnemonicStrength::try_from(strength_bits)?;
    generate_mnemonic_with(strength)
}

pub fn generate_mnemonic_with(strength: MnemonicStrength) -> WalletResult<SecureSeedPhrase> {
    let mut entropy = Zeroizing::new(vec![0u8; strength.entropy_bytes()]);
    OsRng.fill_bytes(&mut entropy);

    let mnemonic = Mnemonic::from_entropy_in(Language::English, &entropy)?;
    Ok(SecureSeedPhrase::from_mnemonic(&mnemonic))
}

/// Lowercase, trim and collapse runs of whitespace to single spaces
pub fn normalize_phrase(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether the phrase is a valid English BIP-39 mnemonic
pub fn validate_mnemonic(phrase: &str) -> bool {
    check_mnemonic(phrase).is_ok()
}

/// Validate a phrase, reporting the first problem found.
///
/// Word count is checked before vocabulary, vocabulary before checksum.
pub fn check_mnemonic(phrase: &str) -> WalletResult<()> {
    let normalized = Zeroizing::new(normalize_phrase(phrase));
    let words: Vec<&str> = if normalized.is_empty() {
        Vec::new()
    } else {
        normalized.split(' ').collect()
    };

    if !SUPPORTED_WORD_COUNTS.contains(&words.len()) {
        return Err(WalletError::InvalidWordCount(words.len()));
    }

    let language = Language::English;
    if let Some((position, word)) = words
        .iter()
        .enumerate()
        .find(|(_, word)| language.find_word(word).is_none())
    {
        return Err(WalletError::UnknownWord {
            position,
            word: word.to_string(),
        });
    }

    Mnemonic::parse_in_normalized(language, &normalized)?;
    Ok(())
}

/// PBKDF2-HMAC-SHA512 seed (2048 rounds, salt "mnemonic" + passphrase)
pub fn mnemonic_to_seed(phrase: &str, passphrase: &str) -> WalletResult<Zeroizing<[u8; SEED_SIZE]>> {
    check_mnemonic(phrase)?;
    let normalized = Zeroizing::new(normalize_phrase(phrase));
    let mnemonic = Mnemonic::parse_in_normalized(Language::English, &normalized)?;
    Ok(Zeroizing::new(mnemonic.to_seed(passphrase)))
}
