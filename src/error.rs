use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CryptifyError>;

#[derive(Debug, Error)]
pub enum CryptifyError {
    #[error("{0}")]
    Usage(String),

    #[error("Empty passwords are not allowed.")]
    EmptyPassword,

    #[error("Password input ended before the line was finished.")]
    UnterminatedPassword,

    #[error("Passwords do not match.")]
    PasswordMismatch,

    #[error("Could not read {path:?}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Bad file: {0} bytes is too short to hold an IV")]
    MalformedContainer(usize),

    #[error("Could not encrypt: {0}")]
    EncryptionFailed(String),

    #[error("Could not decrypt: wrong password or corrupted file")]
    DecryptionFailed,

    #[error("Could not write {path:?}: {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid iteration count {0} (must be at least 1)")]
    InvalidIterations(u32),

    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CryptifyError {
    /// Process exit status for this error. Usage errors follow the clap
    /// convention of 2, everything else is 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            CryptifyError::Usage(_) => 2,
            _ => 1,
        }
    }
}
