//! Runtime settings
//!
//! The only tunable is the PBKDF2 iteration count. It is taken from
//! `--iterations` or `CRYPTIFY_ITERATIONS`, and defaults to the value the
//! container format was defined with. A container only decrypts with the
//! iteration count it was encrypted with.

use crate::crypto::PBKDF2_ITERATIONS;
use crate::error::{CryptifyError, Result};

/// Environment variable overriding the iteration count
pub const ITERATIONS_ENV: &str = "CRYPTIFY_ITERATIONS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub iterations: u32,
}

impl Settings {
    pub fn new(iterations: u32) -> Result<Self> {
        if iterations == 0 {
            return Err(CryptifyError::InvalidIterations(iterations));
        }
        Ok(Self { iterations })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            iterations: PBKDF2_ITERATIONS,
        }
    }
}
