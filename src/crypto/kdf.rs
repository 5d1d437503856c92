//! PBKDF2-HMAC-SHA256 key derivation
//!
//! Stretches the user's password into an AES-256 key. The container format
//! carries no salt, so files are encrypted under an empty salt and the same
//! password always yields the same key.

use hmac::Hmac;
use pbkdf2::pbkdf2;
use sha2::Sha256;

use super::SecureBytes;
use crate::error::{CryptifyError, Result};

/// Derived key length in bytes (256 bits for AES-256)
pub const KEY_LEN: usize = 32;

/// PBKDF2 iteration count used by the container format
pub const PBKDF2_ITERATIONS: u32 = 15_000;

/// Salt used for container keys (empty)
pub const KDF_SALT: &[u8] = &[];

/// Derive `key_len` bytes from `password` with PBKDF2-HMAC-SHA256
///
/// # Arguments
/// * `password` - The user's password bytes
/// * `salt` - Salt bytes, may be empty
/// * `iterations` - PBKDF2 round count, at least 1
/// * `key_len` - Output length in bytes
///
/// Deterministic: identical inputs always produce the identical key, which
/// is what lets decryption reproduce the encryption key.
pub fn derive_key(
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    key_len: usize,
) -> Result<SecureBytes> {
    if iterations == 0 {
        return Err(CryptifyError::InvalidIterations(iterations));
    }

    let mut key = SecureBytes::zeroed(key_len);
    pbkdf2::<Hmac<Sha256>>(password, salt, iterations, &mut key)
        .map_err(|e| CryptifyError::KeyDerivation(e.to_string()))?;

    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex_key(password: &[u8], salt: &[u8], iterations: u32, key_len: usize) -> String {
        hex::encode(&*derive_key(password, salt, iterations, key_len).unwrap())
    }

    #[test]
    fn test_known_vectors() {
        assert_eq!(
            hex_key(b"password", b"salt", 1, 32),
            "120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b"
        );
        assert_eq!(
            hex_key(b"password", b"salt", 2, 32),
            "ae4d0c95af6b46d32d0adff928f06dd02a303f8ef3c251dfd6e2d85a95474c43"
        );
        assert_eq!(
            hex_key(b"password", b"salt", 4096, 32),
            "c5e478d59288c841aa530db6845c4c8d962893a001ce4e11a4963873aa98134a"
        );
    }

    #[test]
    fn test_derive_key_deterministic() {
        let key1 = derive_key(b"correct horse", KDF_SALT, PBKDF2_ITERATIONS, KEY_LEN).unwrap();
        let key2 = derive_key(b"correct horse", KDF_SALT, PBKDF2_ITERATIONS, KEY_LEN).unwrap();

        assert_eq!(key1.len(), KEY_LEN);
        assert_eq!(&*key1, &*key2);
    }

    #[test]
    fn test_different_passwords_differ() {
        let key1 = derive_key(b"correct horse", KDF_SALT, 100, KEY_LEN).unwrap();
        let key2 = derive_key(b"correct horsf", KDF_SALT, 100, KEY_LEN).unwrap();

        assert_ne!(&*key1, &*key2);
    }

    #[test]
    fn test_salt_changes_key() {
        let unsalted = derive_key(b"pw", KDF_SALT, 100, KEY_LEN).unwrap();
        let salted = derive_key(b"pw", b"file-salt", 100, KEY_LEN).unwrap();

        assert_ne!(&*unsalted, &*salted);
    }

    #[test]
    fn test_output_length_follows_key_len() {
        let long = derive_key(b"pw", KDF_SALT, 10, 64).unwrap();
        let short = derive_key(b"pw", KDF_SALT, 10, 16).unwrap();

        assert_eq!(long.len(), 64);
        assert_eq!(short.len(), 16);
        // PBKDF2 output is a prefix-stable stream of blocks
        assert_eq!(&long[..16], &*short);
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let result = derive_key(b"pw", KDF_SALT, 0, KEY_LEN);
        assert!(matches!(result, Err(CryptifyError::InvalidIterations(0))));
    }
}
