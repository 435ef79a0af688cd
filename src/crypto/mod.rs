//! Cryptographic operations for Krist address derivation.
//!
//! This module provides:
//! - SHA-256 helpers over hex text
//! - The v2 address derivation and its startup self-test
//! - Random candidate generation

mod address;
mod candidate;
mod hash;

pub use address::{
    check_self_test, derive, encode_byte, is_address_char, self_test, Address, AddressError,
    ADDRESS_LEN, ADDRESS_PREFIX, SELF_TEST_ADDRESS, SELF_TEST_KEY, SLOT_COUNT,
};
pub use candidate::{is_candidate_hex, Candidate, DEFAULT_CANDIDATE_BYTES};
pub use hash::{double_sha256_hex, sha256_hex, HexDigest};
