// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

//! Bottom-up construction of the sorted-pair hash tree.

use crate::hash::{NodeHash, hash_pair, keccak256};
use crate::proof::{Proof, ProofError};

/// A fully materialized hash tree. Layer 0 is the leaves; each layer above
/// halves the one below (rounded up) until the single-node root layer.
///
/// The tree is a transient computation artifact: it is rebuilt from the
/// same leaf list whenever proofs are needed and never persisted, so
/// construction is deterministic in the leaf order given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    layers: Vec<Vec<NodeHash>>,
}

impl MerkleTree {
    /// Build a tree over the given leaf layer.
    ///
    /// An odd-length layer pairs its unmatched last node with itself rather
    /// than promoting it. An empty input produces a tree whose only layer
    /// holds the hash of the empty byte string; callers that reject empty
    /// batches do so before reaching this point, but the policy holds here
    /// regardless of the caller.
    pub fn from_leaves(leaves: Vec<NodeHash>) -> Self {
        if leaves.is_empty() {
            return MerkleTree {
                layers: vec![vec![keccak256(b"")]],
            };
        }

        let mut layers = vec![leaves];
        loop {
            let next: Vec<NodeHash> = match layers.last() {
                Some(prev) if prev.len() > 1 => prev
                    .chunks(2)
                    .map(|pair| match pair {
                        [a, b] => hash_pair(a, b),
                        [last] => hash_pair(last, last),
                        _ => unreachable!("chunks(2) yields one or two nodes"),
                    })
                    .collect(),
                _ => break,
            };
            layers.push(next);
        }
        MerkleTree { layers }
    }

    /// The root of the tree.
    pub fn root(&self) -> &NodeHash {
        self.layers
            .last()
            .and_then(|layer| layer.first())
            .expect("construction always leaves a root layer")
    }

    /// Number of nodes in the leaf layer.
    pub fn leaf_count(&self) -> usize {
        self.layers.first().map_or(0, Vec::len)
    }

    /// Derive the inclusion proof for the leaf at `index`.
    ///
    /// Walks every layer below the root recording the sibling at each step:
    /// `index + 1` for an even index with a right neighbor, the node itself
    /// when it is the unmatched last node of an odd-length layer (mirroring
    /// construction), `index - 1` for an odd index. The index halves at
    /// each layer up.
    pub fn proof(&self, index: usize) -> Result<Proof, ProofError> {
        let leaves = self.leaf_count();
        if index >= leaves {
            return Err(ProofError::LeafIndexOutOfRange { index, leaves });
        }

        let Some((_, below_root)) = self.layers.split_last() else {
            return Err(ProofError::MalformedTree { layer: 0, index });
        };

        let mut siblings = Vec::with_capacity(below_root.len());
        let mut index = index;
        for (level, layer) in below_root.iter().enumerate() {
            let sibling_index = if index % 2 == 0 {
                if index + 1 < layer.len() { index + 1 } else { index }
            } else {
                index - 1
            };
            let sibling = layer.get(sibling_index).ok_or(ProofError::MalformedTree {
                layer: level,
                index: sibling_index,
            })?;
            siblings.push(sibling.clone());
            index /= 2;
        }
        Ok(Proof::from(siblings))
    }
}
