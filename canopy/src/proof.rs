// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

//! Inclusion proofs and their verification.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hash::{NodeHash, hash_pair};

/// Errors from proof derivation or verification.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProofError {
    /// The requested leaf index does not exist in the tree.
    #[error("leaf index {index} out of range for {leaves} leaves")]
    LeafIndexOutOfRange {
        /// The index that was requested.
        index: usize,
        /// Number of leaves in the tree.
        leaves: usize,
    },
    /// A sibling position that construction guarantees was missing. This is
    /// a programming-error-class failure, not a caller input problem.
    #[error("no node at index {index} of layer {layer}")]
    MalformedTree {
        /// Layer the missing node was expected in, leaves being layer 0.
        layer: usize,
        /// Index of the missing node within that layer.
        index: usize,
    },
    /// Replaying the proof did not reproduce the expected root.
    #[error("proof replays to {computed}, expected {expected}")]
    RootMismatch {
        /// Root obtained by replaying the proof.
        computed: NodeHash,
        /// Root the proof was checked against.
        expected: NodeHash,
    },
}

/// A proof that one leaf belongs to a tree with a known root: the chain of
/// sibling hashes from the leaf layer up, exclusive of the root layer. A
/// single-leaf tree has an empty chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Proof(
    /// The sibling chain, leaf layer first.
    pub Box<[NodeHash]>,
);

impl Proof {
    /// The sibling hashes, leaf layer first.
    pub fn siblings(&self) -> &[NodeHash] {
        &self.0
    }

    /// Whether the chain is empty (the leaf is the root).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fold the sibling chain onto `leaf` with sorted-pair hashing,
    /// producing the root this proof commits to.
    pub fn replay(&self, leaf: &NodeHash) -> NodeHash {
        self.0
            .iter()
            .fold(leaf.clone(), |node, sibling| hash_pair(&node, sibling))
    }

    /// Replay the proof against `leaf` and compare the result with
    /// `expected_root`.
    pub fn verify(&self, leaf: &NodeHash, expected_root: &NodeHash) -> Result<(), ProofError> {
        let computed = self.replay(leaf);
        if computed == *expected_root {
            Ok(())
        } else {
            Err(ProofError::RootMismatch {
                computed,
                expected: expected_root.clone(),
            })
        }
    }
}

impl From<Vec<NodeHash>> for Proof {
    fn from(siblings: Vec<NodeHash>) -> Self {
        Proof(siblings.into_boxed_slice())
    }
}

#[cfg(test)]
mod tests {
    #![expect(clippy::unwrap_used)]

    use super::*;
    use crate::hash::keccak256;

    #[test]
    fn empty_proof_commits_to_the_leaf_itself() {
        let leaf = keccak256(b"only");
        let proof = Proof::from(Vec::new());
        assert!(proof.is_empty());
        assert_eq!(proof.replay(&leaf), leaf);
        proof.verify(&leaf, &leaf).unwrap();
    }

    #[test]
    fn verify_detects_a_wrong_root() {
        let leaf = keccak256(b"leaf");
        let sibling = keccak256(b"sibling");
        let proof = Proof::from(vec![sibling.clone()]);
        let root = hash_pair(&leaf, &sibling);

        proof.verify(&leaf, &root).unwrap();

        let wrong = keccak256(b"wrong");
        assert_eq!(
            proof.verify(&leaf, &wrong).unwrap_err(),
            ProofError::RootMismatch {
                computed: root,
                expected: wrong,
            }
        );
    }

    #[test]
    fn verify_detects_a_tampered_sibling() {
        let leaf = keccak256(b"leaf");
        let sibling = keccak256(b"sibling");
        let root = hash_pair(&leaf, &sibling);

        let tampered = Proof::from(vec![keccak256(b"attacker")]);
        assert!(tampered.verify(&leaf, &root).is_err());
    }

    #[test]
    fn serde_is_a_bare_array_of_hex_strings() {
        let proof = Proof::from(vec![keccak256(b"a"), keccak256(b"b")]);
        let json = serde_json::to_string(&proof).unwrap();
        assert!(json.starts_with("[\"0x"));
        assert_eq!(serde_json::from_str::<Proof>(&json).unwrap(), proof);
    }
}
