//! Blake2b hashing for Merkle leaves, inner nodes and role ids.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest as _};
use cohort_types::{Address, Digest};

type Blake2b256 = Blake2b<U32>;

/// Compute a 256-bit Blake2b hash of arbitrary data.
pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Hash multiple byte slices in sequence (avoids concatenation allocation).
pub fn blake2b_256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Merkle leaf for an address: the hash of its 20 raw bytes.
///
/// Hashing raw bytes rather than text makes the leaf independent of hex case.
pub fn hash_address(address: &Address) -> Digest {
    Digest::new(blake2b_256(address.as_bytes()))
}

/// Hash two sibling nodes in ascending order.
///
/// `hash_pair(a, b) == hash_pair(b, a)`, so a proof needs no side flags.
pub fn hash_pair(a: &Digest, b: &Digest) -> Digest {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    Digest::new(blake2b_256_multi(&[lo.as_bytes(), hi.as_bytes()]))
}
