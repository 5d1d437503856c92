//! Cryptify - password-based file encryption
//!
//! This crate encrypts a file under a password:
//! - The password is stretched with PBKDF2-HMAC-SHA256 into an AES-256 key
//! - The file is encrypted with AES-256-CBC under a fresh random IV
//! - The output container is the IV followed by the ciphertext
//!
//! The container carries no authentication tag and no salt, so it stays
//! byte-compatible with existing cryptify files.

pub mod cli;
pub mod config;
pub mod crypto;
pub mod error;
pub mod storage;

pub use error::{CryptifyError, Result};
