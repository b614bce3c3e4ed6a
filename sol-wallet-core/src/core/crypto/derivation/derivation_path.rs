use crate::shared::constants::*;
use crate::shared::error::WalletError;
use crate::shared::WalletResult;
use std::fmt;
use std::str::FromStr;

/// `m/44'/501'/0'/{account_index}'`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SolanaDerivationPath {
    account_index: u32,
}

impl SolanaDerivationPath {
    pub const PURPOSE: u32 = BIP44_PURPOSE;
    pub const COIN_TYPE: u32 = SOLANA_COIN_TYPE;
    pub const ACCOUNT: u32 = 0;

    pub fn new(account_index: u32) -> WalletResult<Self> {
        if account_index >= HARDENED_OFFSET {
            return Err(WalletError::IndexOutOfRange(account_index));
        }
        Ok(Self { account_index })
    }

    pub fn account_index(&self) -> u32 {
        self.account_index
    }

    /// Hardened child indices below the master key
    pub fn indices(&self) -> [u32; 4] {
        [
            Self::PURPOSE | HARDENED_OFFSET,
            Self::COIN_TYPE | HARDENED_OFFSET,
            Self::ACCOUNT | HARDENED_OFFSET,
            self.account_index | HARDENED_OFFSET,
        ]
    }
}

impl fmt::Display for SolanaDerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "m/{}'/{}'/{}'/{}'",
            Self::PURPOSE,
            Self::COIN_TYPE,
            Self::ACCOUNT,
            self.account_index
        )
    }
}

impl FromStr for SolanaDerivationPath {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || WalletError::validation(format!("Not a Solana derivation path: {}", s));

        let mut segments = s.trim().split('/');
        if segments.next() != Some("m") {
            return Err(invalid());
        }

        let mut levels = Vec::with_capacity(4);
        for segment in segments {
            let number = segment
                .strip_suffix('\'')
                .or_else(|| segment.strip_suffix('h'))
                .or_else(|| segment.strip_suffix('H'))
                .ok_or_else(invalid)?;
            levels.push(number.parse::<u32>().map_err(|_| invalid())?);
        }

        match levels.as_slice() {
            [purpose, coin, account, index]
                if *purpose == Self::PURPOSE && *coin == Self::COIN_TYPE && *account == Self::ACCOUNT =>
            {
                Self::new(*index)
            }
            _ => Err(invalid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(SolanaDerivationPath::new(0).unwrap().to_string(), "m/44'/501'/0'/0'");
        assert_eq!(SolanaDerivationPath::new(7).unwrap().to_string(), "m/44'/501'/0'/7'");
    }

    #[test]
    fn test_indices_are_hardened() {
        let path = SolanaDerivationPath::new(3).unwrap();
        assert_eq!(path.indices(), [0x8000_002C, 0x8000_01F5, 0x8000_0000, 0x8000_0003]);
    }

    #[test]
    fn test_index_out_of_range() {
        assert_eq!(SolanaDerivationPath::new(1 << 31), Err(WalletError::IndexOutOfRange(1 << 31)));
        assert_eq!(SolanaDerivationPath::new(u32::MAX), Err(WalletError::IndexOutOfRange(u32::MAX)));
        assert!(SolanaDerivationPath::new((1 << 31) - 1).is_ok());
    }

    #[test]
    fn test_parse() {
        let path: SolanaDerivationPath = "m/44'/501'/0'/12'".parse().unwrap();
        assert_eq!(path.account_index(), 12);
        let path: SolanaDerivationPath = "m/44h/501h/0h/1h".parse().unwrap();
        assert_eq!(path.account_index(), 1);

        assert!("m/44'/60'/0'/0'".parse::<SolanaDerivationPath>().is_err());
        assert!("m/44'/501'/0'/0".parse::<SolanaDerivationPath>().is_err());
        assert!("m/44'/501'/0'".parse::<SolanaDerivationPath>().is_err());
        assert!("44'/501'/0'/0'".parse::<SolanaDerivationPath>().is_err());
        assert_eq!(
            "m/44'/501'/0'/2147483648'".parse::<SolanaDerivationPath>(),
            Err(WalletError::IndexOutOfRange(2147483648))
        );
    }
}
