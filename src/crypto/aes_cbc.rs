//! AES-256-CBC container cipher
//!
//! A container is the random IV followed by the PKCS#7-padded CBC
//! ciphertext. There is no authentication tag: a wrong key is only noticed
//! when the padding fails to validate, and roughly 1 in 256 wrong keys
//! produce valid-looking padding and decrypt to garbage.

use aes::Aes256;
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::debug;

use super::{SecureBytes, KEY_LEN};
use crate::error::{CryptifyError, Result};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// IV length, one AES block (128 bits)
pub const IV_LEN: usize = 16;

/// AES block size
pub const BLOCK_LEN: usize = 16;

/// Encrypt `plaintext` into a container
///
/// # Arguments
/// * `key` - 32-byte AES-256 key
/// * `plaintext` - Data to encrypt, may be empty
///
/// # Returns
/// `IV || ciphertext`. The ciphertext is always 1 to 16 bytes longer than
/// the plaintext because of padding.
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    if key.len() != KEY_LEN {
        return Err(CryptifyError::EncryptionFailed(format!(
            "Invalid key length: expected {}, got {}",
            KEY_LEN,
            key.len()
        )));
    }

    // Fresh IV for every container
    let mut iv = [0u8; IV_LEN];
    OsRng.fill_bytes(&mut iv);
    debug!(iv = %hex::encode(iv), "generated IV");

    let cipher = Aes256CbcEnc::new_from_slices(key, &iv)
        .map_err(|e| CryptifyError::EncryptionFailed(e.to_string()))?;
    let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    let mut container = Vec::with_capacity(IV_LEN + ciphertext.len());
    container.extend_from_slice(&iv);
    container.extend_from_slice(&ciphertext);

    Ok(container)
}

/// Decrypt a container produced by [`encrypt`]
///
/// # Errors
/// - `MalformedContainer` if the container cannot hold an IV; checked
///   before any cryptographic work
/// - `DecryptionFailed` if the key has the wrong length, the ciphertext is
///   empty or not block-aligned, or the padding does not validate (wrong
///   password or corrupted file)
pub fn decrypt(key: &[u8], container: &[u8]) -> Result<SecureBytes> {
    if container.len() < IV_LEN {
        return Err(CryptifyError::MalformedContainer(container.len()));
    }

    if key.len() != KEY_LEN {
        return Err(CryptifyError::DecryptionFailed);
    }

    let (iv, ciphertext) = container.split_at(IV_LEN);
    debug!(iv = %hex::encode(iv), ciphertext_len = ciphertext.len(), "parsed container");

    if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
        return Err(CryptifyError::DecryptionFailed);
    }

    let cipher =
        Aes256CbcDec::new_from_slices(key, iv).map_err(|_| CryptifyError::DecryptionFailed)?;

    let plaintext = cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CryptifyError::DecryptionFailed)?;

    Ok(SecureBytes::new(plaintext))
}
