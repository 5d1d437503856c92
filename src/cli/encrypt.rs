//! Encrypt a file into a container

use std::path::Path;

use secrecy::ExposeSecret;
use tracing::info;

use crate::config::Settings;
use crate::crypto::{self, KDF_SALT, KEY_LEN};
use crate::error::Result;
use crate::storage;

use super::{prompt_new_password, Outcome, PasswordSource};

pub fn run(
    passwords: &mut impl PasswordSource,
    input: &Path,
    output: &Path,
    settings: &Settings,
) -> Result<Outcome> {
    // Confirm before touching any file so a typo never produces output
    let password = prompt_new_password(passwords)?;

    let plaintext = storage::read_file(input)?;

    info!(iterations = settings.iterations, "deriving key");
    let key = crypto::derive_key(
        password.expose_secret().as_bytes(),
        KDF_SALT,
        settings.iterations,
        KEY_LEN,
    )?;
    drop(password);

    let container = crypto::encrypt(&key, &plaintext)?;
    drop(key);

    storage::write_file(output, &container)?;
    info!(
        input = %input.display(),
        output = %output.display(),
        container_len = container.len(),
        "encrypted"
    );

    Ok(Outcome {
        bytes_in: plaintext.len(),
        bytes_out: container.len(),
    })
}
