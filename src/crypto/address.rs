//! Krist v2 address representation and derivation.

use std::fmt;

use super::hash::HexDigest;

/// Prefix used for every address on the main Krist network.
pub const ADDRESS_PREFIX: char = 'k';

/// Number of derived characters following the prefix.
pub const SLOT_COUNT: usize = 9;

/// Total address length (prefix + derived characters).
pub const ADDRESS_LEN: usize = SLOT_COUNT + 1;

/// Key of the startup self-test vector.
pub const SELF_TEST_KEY: &str = "abcdefghijklmnopqrstuvwxyz";

/// Address the self-test key must derive to under [`ADDRESS_PREFIX`].
pub const SELF_TEST_ADDRESS: &str = "k8860qxhvw";

/// Errors produced when reading an address from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("expected 10 characters, got {0}")]
    InvalidLength(usize),

    #[error("invalid character {0:?} at position {1}")]
    InvalidCharacter(char, usize),

    #[error("self-test failed: expected {expected:?}, got {actual:?}")]
    SelfTest { expected: String, actual: String },
}

/// A derived address: one prefix character followed by nine characters
/// drawn from `0-9a-z`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    /// Parses and validates an address string.
    ///
    /// The prefix may be any ASCII alphanumeric character; the remaining
    /// nine characters must be lowercase base36 digits.
    pub fn parse(s: &str) -> Result<Self, AddressError> {
        let len = s.chars().count();
        if len != ADDRESS_LEN {
            return Err(AddressError::InvalidLength(len));
        }

        for (pos, c) in s.chars().enumerate() {
            let valid = if pos == 0 {
                c.is_ascii_alphanumeric()
            } else {
                is_address_char(c)
            };
            if !valid {
                return Err(AddressError::InvalidCharacter(c, pos));
            }
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the address as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the prefix character.
    pub fn prefix(&self) -> char {
        self.0.chars().next().unwrap_or(ADDRESS_PREFIX)
    }

    /// Returns true if the address ends with `suffix`.
    #[inline]
    pub fn ends_with(&self, suffix: &str) -> bool {
        self.0.ends_with(suffix)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns true for characters that can appear after the prefix.
#[inline]
pub fn is_address_char(c: char) -> bool {
    c.is_ascii_digit() || c.is_ascii_lowercase()
}

/// Maps a byte to an address character.
///
/// `v = 48 + b / 7` lands in `48..=84`. Values up to 57 are the digits,
/// 58..=83 shift up by 39 into `a..=z`, and 84 (bytes 252..=255) clamps to
/// `'e'`. The mapping is biased and non-injective.
#[inline]
pub fn encode_byte(b: u8) -> char {
    let v = 48 + u32::from(b) / 7;
    let c = if v + 39 > 122 {
        101
    } else if v > 57 {
        v + 39
    } else {
        v
    };
    // 48..=57 or 97..=122, always ASCII
    char::from(c as u8)
}

/// Derives the Krist v2 address of `key` under `prefix`.
///
/// Process:
/// 1. Seed `digest = H2(key)` where `H2` is SHA-256 applied twice over hex text
/// 2. Fill nine slots with the first byte of `digest`, double-rehashing after each
/// 3. For each output position `i`, pick slot `pair(i) % 9`; a filled slot is
///    encoded and cleared, an empty one single-rehashes `digest` and retries `i`
pub fn derive(prefix: char, key: &str) -> Address {
    let mut digest = HexDigest::double_of(key.as_bytes());

    let mut slots = [None; SLOT_COUNT];
    for slot in slots.iter_mut() {
        *slot = Some(digest.pair(0));
        digest = digest.double_rehash();
    }

    let mut address = String::with_capacity(ADDRESS_LEN);
    address.push(prefix);

    let mut i = 0;
    while i < SLOT_COUNT {
        let index = usize::from(digest.pair(i)) % SLOT_COUNT;
        match slots[index].take() {
            Some(byte) => {
                address.push(encode_byte(byte));
                i += 1;
            }
            // Single hash only; the retry sequence is part of the format.
            None => digest = digest.rehash(),
        }
    }

    Address(address)
}

/// Checks the derivation against the known vector.
pub fn self_test() -> Result<(), AddressError> {
    check_self_test(&derive(ADDRESS_PREFIX, SELF_TEST_KEY))
}

/// Compares a derived address with [`SELF_TEST_ADDRESS`].
pub fn check_self_test(derived: &Address) -> Result<(), AddressError> {
    if derived.as_str() == SELF_TEST_ADDRESS {
        Ok(())
    } else {
        Err(AddressError::SelfTest {
            expected: SELF_TEST_ADDRESS.to_owned(),
            actual: derived.as_str().to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_test_vector() {
        assert_eq!(derive('k', SELF_TEST_KEY).as_str(), "k8860qxhvw");
        assert!(self_test().is_ok());
    }

    #[test]
    fn test_known_vectors() {
        assert_eq!(derive('k', "").as_str(), "krqtnrp18z");
        assert_eq!(derive('k', "password").as_str(), "kuf56v2ikn");
        assert_eq!(derive('k', "hello world").as_str(), "k4sg050wnq");
        assert_eq!(derive('k', &"00".repeat(32)).as_str(), "kzed76am5m");
    }

    #[test]
    fn test_prefix_only_affects_first_char() {
        let a = derive('k', SELF_TEST_KEY);
        let b = derive('x', SELF_TEST_KEY);
        assert_eq!(b.prefix(), 'x');
        assert_eq!(&a.as_str()[1..], &b.as_str()[1..]);
    }

    #[test]
    fn test_format() {
        for key in ["", "a", "password", "0123456789abcdef", SELF_TEST_KEY] {
            let addr = derive('k', key);
            assert_eq!(addr.as_str().len(), ADDRESS_LEN);
            assert_eq!(addr.prefix(), 'k');
            assert!(addr.as_str().chars().skip(1).all(is_address_char));
            assert_eq!(Address::parse(addr.as_str()), Ok(addr.clone()));
        }
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(derive('k', "determinism"), derive('k', "determinism"));
    }

    #[test]
    fn test_encode_boundaries() {
        assert_eq!(encode_byte(0), '0');
        assert_eq!(encode_byte(6), '0');
        assert_eq!(encode_byte(7), '1');
        assert_eq!(encode_byte(69), '9');
        assert_eq!(encode_byte(70), 'a');
        assert_eq!(encode_byte(251), 'z');
        assert_eq!(encode_byte(252), 'e');
        assert_eq!(encode_byte(255), 'e');
    }

    #[test]
    fn test_encode_covers_alphabet() {
        let produced: std::collections::HashSet<char> = (0..=255u8).map(encode_byte).collect();
        assert_eq!(produced.len(), 36);
        assert!(produced.iter().all(|&c| is_address_char(c)));
    }

    #[test]
    fn test_check_self_test_mismatch() {
        let wrong = Address::parse("k000000000").unwrap();
        assert_eq!(
            check_self_test(&wrong),
            Err(AddressError::SelfTest {
                expected: "k8860qxhvw".into(),
                actual: "k000000000".into(),
            })
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(Address::parse("k123"), Err(AddressError::InvalidLength(4)));
        assert_eq!(
            Address::parse("k12345678A"),
            Err(AddressError::InvalidCharacter('A', 9))
        );
        assert_eq!(
            Address::parse("-123456789"),
            Err(AddressError::InvalidCharacter('-', 0))
        );
    }
}
