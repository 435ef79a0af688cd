//! Random candidate keys.

use rand::{CryptoRng, RngCore};

/// Default candidate length in bytes.
pub const DEFAULT_CANDIDATE_BYTES: usize = 32;

/// A random key candidate. Only its hex rendering is ever fed to the
/// derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    bytes: Vec<u8>,
}

impl Candidate {
    /// Generates a new candidate of `len` bytes.
    ///
    /// The RNG must be cryptographically secure; candidates are passwords.
    #[inline]
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R, len: usize) -> Self {
        let mut bytes = vec![0u8; len];
        rng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Wraps existing bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Returns the candidate as lowercase hex.
    #[inline]
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    /// Returns the length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true for a zero-length candidate.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Returns true if `s` is the lowercase hex rendering of `len` bytes.
pub fn is_candidate_hex(s: &str, len: usize) -> bool {
    s.len() == len * 2 && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_length() {
        let mut rng = StdRng::seed_from_u64(7);
        let candidate = Candidate::generate(&mut rng, DEFAULT_CANDIDATE_BYTES);
        assert_eq!(candidate.len(), 32);
        assert_eq!(candidate.to_hex().len(), 64);
        assert!(is_candidate_hex(&candidate.to_hex(), 32));
    }

    #[test]
    fn test_fresh_each_call() {
        let mut rng = StdRng::seed_from_u64(7);
        let a = Candidate::generate(&mut rng, 16);
        let b = Candidate::generate(&mut rng, 16);
        assert_ne!(a, b);
    }

    #[test]
    fn test_hex_rendering() {
        let candidate = Candidate::from_bytes(vec![0x00, 0xab, 0xff]);
        assert_eq!(candidate.to_hex(), "00abff");
        assert!(!candidate.is_empty());
    }

    #[test]
    fn test_is_candidate_hex() {
        assert!(is_candidate_hex("00abff", 3));
        assert!(!is_candidate_hex("00ABFF", 3));
        assert!(!is_candidate_hex("00abf", 3));
        assert!(!is_candidate_hex("00abfg", 3));
    }
}
