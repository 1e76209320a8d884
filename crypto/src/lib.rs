//! Cryptographic primitives for cohort governance.
//!
//! - **Blake2b-256** is the single content hash: Merkle leaves, inner nodes and role ids
//! - **Sorted-pair Merkle trees**: children are ordered before hashing, so a proof
//!   carries sibling digests only, never left/right flags

pub mod hash;
pub mod merkle;

pub use hash::{blake2b_256, blake2b_256_multi, hash_address, hash_pair};
pub use merkle::{verify_proof, MerkleTree};
