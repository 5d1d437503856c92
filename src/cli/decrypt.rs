//! Decrypt a container back into the original file

use std::path::Path;

use secrecy::ExposeSecret;
use tracing::info;

use crate::config::Settings;
use crate::crypto::{self, KDF_SALT, KEY_LEN};
use crate::error::Result;
use crate::storage;

use super::{prompt_password, Outcome, PasswordSource};

pub fn run(
    passwords: &mut impl PasswordSource,
    input: &Path,
    output: &Path,
    settings: &Settings,
) -> Result<Outcome> {
    let password = prompt_password(passwords)?;

    let container = storage::read_file(input)?;

    info!(iterations = settings.iterations, "deriving key");
    let key = crypto::derive_key(
        password.expose_secret().as_bytes(),
        KDF_SALT,
        settings.iterations,
        KEY_LEN,
    )?;
    drop(password);

    let plaintext = crypto::decrypt(&key, &container)?;
    drop(key);

    storage::write_file(output, &plaintext)?;
    info!(
        input = %input.display(),
        output = %output.display(),
        plaintext_len = plaintext.len(),
        "decrypted"
    );

    Ok(Outcome {
        bytes_in: container.len(),
        bytes_out: plaintext.len(),
    })
}
