//! Digest primitives for instruction stacks.
//!
//! The recorder treats the digest as an opaque pure function: a string goes
//! in, a short fixed-length hex string comes out. [`Sha256Hex`] is the
//! default; anything implementing [`DigestPrimitive`] can replace it.

use sha2::{Digest, Sha256};

/// A stable, deterministic `string -> string` fingerprint.
pub trait DigestPrimitive {
    /// Digest `input`. Equal inputs must always produce equal outputs.
    fn digest(&self, input: &str) -> String;
}

/// SHA-256, lowercase hex encoded (64 characters).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha256Hex;

impl DigestPrimitive for Sha256Hex {
    fn digest(&self, input: &str) -> String {
        compute_hash(input.as_bytes())
    }
}

impl<F> DigestPrimitive for F
where
    F: Fn(&str) -> String,
{
    fn digest(&self, input: &str) -> String {
        self(input)
    }
}

/// SHA-256 of `data` as lowercase hex
pub fn compute_hash(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}
