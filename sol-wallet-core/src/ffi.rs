//! FFI bindings for the wallet core
//!
//! C-compatible entry points for the stateless parts of the core: mnemonic
//! generation and validation plus address derivation. Stateful wallet
//! operations go through [`crate::WalletManager`] on the host side.
//!
//! SECURITY: strings handed out through [`SecureResult`] are wiped when freed
//! with [`wallet_core_free_result`] or [`wallet_core_free_string`].

use crate::core::crypto::keys::{check_mnemonic, generate_mnemonic, KeyManager};
use crate::shared::constants::SUPPORTED_WORD_COUNTS;
use crate::shared::error::WalletError;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;
use zeroize::Zeroize;

/// Error code for a malformed argument at the boundary
pub const FFI_INVALID_INPUT: i32 = 1;
/// Error code for a result string that cannot be represented in C
pub const FFI_STRING_CONVERSION: i32 = 15;

// Bound on a 24-word phrase with stray whitespace
const MAX_PHRASE_LENGTH: usize = 1024;

/// Secure FFI result wrapper
#[repr(C)]
pub struct SecureResult {
    pub success: bool,
    pub data: *mut c_char,
    pub error_code: i32,
}

impl SecureResult {
    fn success(data: String) -> Self {
        match CString::new(data) {
            Ok(c_string) => Self {
                success: true,
                data: c_string.into_raw(),
                error_code: 0,
            },
            Err(err) => {
                // Wipe the rejected bytes before they drop
                let mut bytes = err.into_vec();
                bytes.zeroize();
                Self::error(FFI_STRING_CONVERSION)
            }
        }
    }

    fn empty_success() -> Self {
        Self {
            success: true,
            data: ptr::null_mut(),
            error_code: 0,
        }
    }

    fn error(error_code: i32) -> Self {
        Self {
            success: false,
            data: ptr::null_mut(),
            error_code,
        }
    }

    fn from_error(err: &WalletError) -> Self {
        log::debug!("FFI call failed: {:?}", err.category());
        Self::error(err.code())
    }
}

/// Read a bounded UTF-8 argument
fn read_input(input: *const c_char, max_length: usize) -> Result<String, WalletError> {
    if input.is_null() {
        return Err(WalletError::validation("Null input pointer"));
    }

    // SAFETY: the caller passes a NUL-terminated string that outlives this call
    let input_str = unsafe { CStr::from_ptr(input) }
        .to_str()
        .map_err(|_| WalletError::validation("Invalid UTF-8 input"))?;

    if input_str.len() > max_length {
        return Err(WalletError::validation("Input too long"));
    }

    Ok(input_str.to_string())
}

/// Generate a mnemonic of `strength_bits` entropy (128, 160, 192, 224 or 256)
#[no_mangle]
pub extern "C" fn wallet_core_generate_mnemonic(strength_bits: u32) -> SecureResult {
    match generate_mnemonic(strength_bits as usize) {
        Ok(phrase) => SecureResult::success(phrase.as_str().to_string()),
        Err(err) => SecureResult::from_error(&err),
    }
}

/// Check a phrase; success carries no data, failures carry the mnemonic error code
#[no_mangle]
pub extern "C" fn wallet_core_validate_mnemonic(phrase: *const c_char) -> SecureResult {
    let mut phrase = match read_input(phrase, MAX_PHRASE_LENGTH) {
        Ok(p) => p,
        Err(_) => return SecureResult::error(FFI_INVALID_INPUT),
    };

    let result = match check_mnemonic(&phrase) {
        Ok(()) => SecureResult::empty_success(),
        Err(err) => SecureResult::from_error(&err),
    };
    phrase.zeroize();
    result
}

/// Derive the base58 address of account `account_index` of a phrase
#[no_mangle]
pub extern "C" fn wallet_core_derive_address(phrase: *const c_char, account_index: u32) -> SecureResult {
    let mut phrase = match read_input(phrase, MAX_PHRASE_LENGTH) {
        Ok(p) => p,
        Err(_) => return SecureResult::error(FFI_INVALID_INPUT),
    };

    let result = match KeyManager::address_from_mnemonic(&phrase, account_index) {
        Ok(address) => SecureResult::success(address),
        Err(err) => SecureResult::from_error(&err),
    };
    phrase.zeroize();
    result
}

/// Word counts accepted by [`wallet_core_validate_mnemonic`]
#[no_mangle]
pub extern "C" fn wallet_core_is_supported_word_count(count: u32) -> bool {
    SUPPORTED_WORD_COUNTS.contains(&(count as usize))
}

/// Free a C string with secure memory cleanup
#[no_mangle]
pub extern "C" fn wallet_core_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        // SAFETY: ptr came from CString::into_raw in this module
        let mut bytes = unsafe { CString::from_raw(ptr) }.into_bytes();
        bytes.zeroize();
    }
}

/// Free a SecureResult with secure memory cleanup
#[no_mangle]
pub extern "C" fn wallet_core_free_result(result: *mut SecureResult) {
    if !result.is_null() {
        // SAFETY: result points to a SecureResult produced by this module
        let result_ref = unsafe { &mut *result };
        wallet_core_free_string(result_ref.data);
        result_ref.data = ptr::null_mut();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_PHRASE: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    fn take_string(result: &mut SecureResult) -> String {
        assert!(result.success);
        assert!(!result.data.is_null());
        let value = unsafe { CStr::from_ptr(result.data) }.to_str().unwrap().to_string();
        wallet_core_free_result(result);
        assert!(result.data.is_null());
        value
    }

    #[test]
    fn test_generate_mnemonic() {
        let mut result = wallet_core_generate_mnemonic(256);
        let phrase = take_string(&mut result);
        assert_eq!(phrase.split(' ').count(), 24);

        let bad = wallet_core_generate_mnemonic(100);
        assert!(!bad.success);
        assert!(bad.data.is_null());
        assert_eq!(bad.error_code, WalletError::InvalidStrength(100).code());
    }

    #[test]
    fn test_validate_mnemonic() {
        let phrase = CString::new(TEST_PHRASE).unwrap();
        let ok = wallet_core_validate_mnemonic(phrase.as_ptr());
        assert!(ok.success);
        assert!(ok.data.is_null());

        let short = CString::new("abandon abandon").unwrap();
        let result = wallet_core_validate_mnemonic(short.as_ptr());
        assert!(!result.success);
        assert_eq!(result.error_code, WalletError::InvalidWordCount(2).code());

        let null = wallet_core_validate_mnemonic(ptr::null());
        assert_eq!(null.error_code, FFI_INVALID_INPUT);
    }

    #[test]
    fn test_derive_address() {
        let phrase = CString::new(TEST_PHRASE).unwrap();
        let mut result = wallet_core_derive_address(phrase.as_ptr(), 0);
        assert_eq!(take_string(&mut result), "HAgk14JpMQLgt6rVgv7cBQFJWFto5Dqxi472uT3DKpqk");

        let out_of_range = wallet_core_derive_address(phrase.as_ptr(), 0x8000_0000);
        assert!(!out_of_range.success);
        assert_eq!(out_of_range.error_code, WalletError::IndexOutOfRange(0x8000_0000).code());
    }

    #[test]
    fn test_supported_word_counts() {
        assert!(wallet_core_is_supported_word_count(12));
        assert!(wallet_core_is_supported_word_count(24));
        assert!(!wallet_core_is_supported_word_count(13));
    }

    #[test]
    fn test_free_null_is_noop() {
        wallet_core_free_string(ptr::null_mut());
        wallet_core_free_result(ptr::null_mut());
    }
}
