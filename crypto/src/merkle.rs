//! Sorted-pair Merkle trees and proof verification.
//!
//! Construction: leaves are sorted and deduplicated, adjacent pairs are
//! combined with [`hash_pair`], and an unpaired last node is carried up to the
//! next level unchanged. A proof is the list of sibling digests from the leaf
//! level upward; levels where the node was carried contribute nothing.

use crate::hash::{hash_address, hash_pair};
use cohort_types::{Address, Digest};

/// Recompute a root from `leaf` and `proof` and compare it with `root`.
///
/// Never fails: a malformed or foreign proof simply yields `false`.
pub fn verify_proof(root: &Digest, leaf: &Digest, proof: &[Digest]) -> bool {
    let computed = proof
        .iter()
        .fold(*leaf, |node, sibling| hash_pair(&node, sibling));
    computed == *root
}

/// An in-memory sorted-pair Merkle tree.
#[derive(Clone, Debug)]
pub struct MerkleTree {
    /// `levels[0]` holds the sorted leaves, the last level holds the root.
    levels: Vec<Vec<Digest>>,
}

impl MerkleTree {
    /// Build a tree over arbitrary leaf digests.
    pub fn new(mut leaves: Vec<Digest>) -> Self {
        leaves.sort_unstable();
        leaves.dedup();

        let mut levels = vec![leaves];
        while levels.last().is_some_and(|level| level.len() > 1) {
            let below = &levels[levels.len() - 1];
            let above: Vec<Digest> = below
                .chunks(2)
                .map(|pair| match pair {
                    [left, right] => hash_pair(left, right),
                    [single] => *single,
                    _ => unreachable!("chunks(2) yields one or two nodes"),
                })
                .collect();
            levels.push(above);
        }
        Self { levels }
    }

    /// Build a tree whose leaves are the address hashes of `addresses`.
    pub fn from_addresses<'a>(addresses: impl IntoIterator<Item = &'a Address>) -> Self {
        Self::new(addresses.into_iter().map(hash_address).collect())
    }

    /// The root digest. An empty tree has the zero root, which matches nothing.
    pub fn root(&self) -> Digest {
        self.levels
            .last()
            .and_then(|top| top.first())
            .copied()
            .unwrap_or(Digest::ZERO)
    }

    /// Number of distinct leaves.
    pub fn len(&self) -> usize {
        self.levels[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels[0].is_empty()
    }

    /// Sorted leaves.
    pub fn leaves(&self) -> &[Digest] {
        &self.levels[0]
    }

    /// Inclusion proof for `leaf`, or `None` if it is not in the tree.
    pub fn proof(&self, leaf: &Digest) -> Option<Vec<Digest>> {
        let mut index = self.levels[0].binary_search(leaf).ok()?;
        let mut proof = Vec::with_capacity(self.levels.len());
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling = index ^ 1;
            if let Some(node) = level.get(sibling) {
                proof.push(*node);
            }
            index /= 2;
        }
        Some(proof)
    }

    /// Inclusion proof for an address leaf.
    pub fn proof_for_address(&self, address: &Address) -> Option<Vec<Digest>> {
        self.proof(&hash_address(address))
    }
}
