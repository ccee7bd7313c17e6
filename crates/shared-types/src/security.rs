//! # Secret String
//!
//! Wrapper for credential secrets that zeroizes memory on drop.
//!
//! ## Security
//!
//! The wipe credential travels from the caller through validation into the
//! erase executor's argument vector and nowhere else. This wrapper:
//!
//! - zeroes the buffer when dropped
//! - renders as `***` in `Debug`
//! - has no `Serialize` / `Display` impl, so it cannot end up in
//!   a log line or an audit payload by accident

use zeroize::{Zeroize, ZeroizeOnDrop};

/// A credential secret that zeroizes on drop.
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct SecretString {
    inner: String,
}

impl SecretString {
    /// Wrap an owned string.
    pub fn new(value: String) -> Self {
        Self { inner: value }
    }

    /// Borrow the secret (use carefully!).
    ///
    /// Only the policy validator and the erase supervisor call this.
    pub fn expose(&self) -> &str {
        &self.inner
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.inner.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self::new(value.to_string())
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the actual secret
        f.write_str("SecretString(***)")
    }
}
