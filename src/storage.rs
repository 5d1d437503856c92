//! Whole-file input and atomic output
//!
//! Output goes to a temporary file next to the destination, is synced, and
//! is then renamed over the destination. A failed or interrupted run leaves
//! either the previous file or nothing, never a partial one.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::crypto::SecureBytes;
use crate::error::{CryptifyError, Result};

/// Read the whole file at `path` as raw bytes
pub fn read_file(path: &Path) -> Result<SecureBytes> {
    let data = fs::read(path).map_err(|source| CryptifyError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), len = data.len(), "read file");

    Ok(SecureBytes::new(data))
}

/// Replace the file at `path` with `data`
///
/// The temporary file is created with owner-only permissions on unix, and
/// the destination keeps them after the rename.
pub fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    let write_err = |source: std::io::Error| CryptifyError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(data).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    debug!(path = %path.display(), len = data.len(), "wrote file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");

        write_file(&path, &[0, 1, 2, 255]).unwrap();
        let data = read_file(&path).unwrap();

        assert_eq!(&*data, &[0, 1, 2, 255]);
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");
        fs::write(&path, b"a much longer previous content").unwrap();

        write_file(&path, b"short").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"short");
        // Only the destination remains, no stray temporary files
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.bin");

        let result = read_file(&path);
        assert!(matches!(result, Err(CryptifyError::FileRead { .. })));
    }

    #[test]
    fn test_write_into_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("out.bin");

        let result = write_file(&path, b"data");
        assert!(matches!(result, Err(CryptifyError::FileWrite { .. })));
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_output_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");
        write_file(&path, b"data").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0);
    }
}
