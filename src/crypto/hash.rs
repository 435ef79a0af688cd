//! SHA-256 helpers working on lowercase hex text.
//!
//! Every round of the address derivation hashes the *hex rendering* of the
//! previous digest, never the raw bytes. [`HexDigest`] keeps the raw bytes
//! around so the derivation can read hex pairs without reparsing text: the
//! pair at hex offset `2 * i` is simply byte `i`.

use sha2::{Digest, Sha256};

/// Length of a SHA-256 digest in bytes.
pub const DIGEST_LEN: usize = 32;

/// A SHA-256 digest whose canonical form is its lowercase hex string.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct HexDigest([u8; DIGEST_LEN]);

impl HexDigest {
    /// `H(x)`: hashes arbitrary input.
    #[inline]
    pub fn of(input: &[u8]) -> Self {
        Self(Sha256::digest(input).into())
    }

    /// `H2(x) = H(H(x))`.
    #[inline]
    pub fn double_of(input: &[u8]) -> Self {
        Self::of(input).rehash()
    }

    /// Hashes the hex rendering of this digest once.
    #[inline]
    pub fn rehash(&self) -> Self {
        Self::of(self.to_hex().as_bytes())
    }

    /// Hashes the hex rendering of this digest twice.
    #[inline]
    pub fn double_rehash(&self) -> Self {
        self.rehash().rehash()
    }

    /// Returns the value of the hex pair at hex offset `2 * index`.
    #[inline]
    pub fn pair(&self, index: usize) -> u8 {
        self.0[index]
    }

    /// Returns the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Returns the lowercase hex rendering (64 characters).
    #[inline]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl std::fmt::Debug for HexDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HexDigest({})", self.to_hex())
    }
}

/// Lowercase hex SHA-256 of `input`.
pub fn sha256_hex(input: &[u8]) -> String {
    HexDigest::of(input).to_hex()
}

/// Lowercase hex of SHA-256 applied to the hex SHA-256 of `input`.
pub fn double_sha256_hex(input: &[u8]) -> String {
    HexDigest::double_of(input).to_hex()
}
