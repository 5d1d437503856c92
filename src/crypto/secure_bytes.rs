//! Byte buffer for secrets: derived keys and plaintext file contents.
//!
//! The buffer is overwritten with zeros, spare capacity included, before its
//! memory is released, on every exit path.
//!
//! Pinning in RAM is best effort. `mlock` can fail without privileges or
//! above RLIMIT_MEMLOCK, which is expected for large plaintext buffers.
//! Locks work on whole pages and do not nest, so dropping one buffer can
//! unlock a page that a live buffer shares with it.

use std::ops::{Deref, DerefMut};
use zeroize::Zeroize;

/// Owned sensitive bytes, zeroed on drop
pub struct SecureBytes {
    data: Vec<u8>,
    /// Bytes from the start of `data` that `mlock` accepted
    #[cfg_attr(not(unix), allow(dead_code))]
    locked: usize,
}

impl SecureBytes {
    /// Take ownership of `data` and try to lock it in memory
    pub fn new(data: Vec<u8>) -> Self {
        let mut secure = Self { data, locked: 0 };
        secure.lock_memory();
        secure
    }

    /// A zero-filled buffer of `len` bytes, used as a KDF output slot
    pub fn zeroed(len: usize) -> Self {
        Self::new(vec![0u8; len])
    }

    #[cfg(unix)]
    fn lock_memory(&mut self) {
        if self.data.is_empty() {
            return;
        }
        let rc = unsafe { libc::mlock(self.data.as_ptr() as *const libc::c_void, self.data.len()) };
        if rc == 0 {
            self.locked = self.data.len();
        }
    }

    #[cfg(not(unix))]
    fn lock_memory(&mut self) {}

    // The allocation outlives `zeroize`, which clears but never frees, so the
    // pointer still covers the range locked in `lock_memory`.
    #[cfg(unix)]
    fn unlock_memory(&mut self) {
        if self.locked == 0 {
            return;
        }
        unsafe {
            libc::munlock(self.data.as_ptr() as *const libc::c_void, self.locked);
        }
        self.locked = 0;
    }

    #[cfg(not(unix))]
    fn unlock_memory(&mut self) {}

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Zeroize for SecureBytes {
    /// Zeroes contents and spare capacity, leaving the buffer empty
    fn zeroize(&mut self) {
        self.data.zeroize();
    }
}

impl Drop for SecureBytes {
    fn drop(&mut self) {
        self.zeroize();
        self.unlock_memory();
    }
}

impl Deref for SecureBytes {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl DerefMut for SecureBytes {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

impl From<Vec<u8>> for SecureBytes {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl From<&[u8]> for SecureBytes {
    fn from(data: &[u8]) -> Self {
        Self::new(data.to_vec())
    }
}

// Never print secret contents
impl std::fmt::Debug for SecureBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecureBytes")
            .field("len", &self.data.len())
            .field("data", &"[REDACTED]")
            .finish()
    }
}
