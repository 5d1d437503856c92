//! Cryptographic primitives for cryptify
//!
//! This module provides:
//! - PBKDF2-HMAC-SHA256 for password-based key derivation
//! - AES-256-CBC for the container cipher
//! - Secure memory handling with automatic zeroing

mod aes_cbc;
mod kdf;
mod secure_bytes;

pub use aes_cbc::{decrypt, encrypt, BLOCK_LEN, IV_LEN};
pub use kdf::{derive_key, KDF_SALT, KEY_LEN, PBKDF2_ITERATIONS};
pub use secure_bytes::SecureBytes;

/// Container layout:
/// [16 bytes: IV][N * 16 bytes: AES-256-CBC ciphertext, PKCS#7 padded]
///
/// Smallest valid container: IV plus one padding block.
pub const MIN_CONTAINER_LEN: usize = IV_LEN + BLOCK_LEN;
