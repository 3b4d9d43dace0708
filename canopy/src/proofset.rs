// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

//! The externally-facing batch operation and its JSON artifact.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::address::{Address, AddressError};
use crate::hash::NodeHash;
use crate::proof::{Proof, ProofError};
use crate::tree::MerkleTree;

/// How leaves were hashed and siblings paired, echoed into the artifact so
/// a consumer can tell what it is looking at without reading this code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashParams {
    /// Description of the leaf hash function and its input.
    pub hash: String,
    /// Whether sibling pairs were ordered by value before hashing. Sorted
    /// pairing is the only mode this crate constructs; the flag is carried
    /// through from the build request verbatim.
    pub sorted_pairs: bool,
}

const HASH_DESCRIPTION: &str = "keccak256(address)";

/// A batch build request was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// An entry failed validation. The whole batch is rejected; no partial
    /// artifact is produced from a mix of valid and invalid entries.
    #[error("invalid address {input:?}: {source}")]
    InvalidAddress {
        /// The offending input, trimmed, so the caller can correct it.
        input: String,
        /// What was wrong with it.
        source: AddressError,
    },
    /// Nothing was left to hash after validation and deduplication.
    #[error("no valid addresses after normalization")]
    Empty,
    /// Proof derivation failed. Construction guarantees this cannot happen
    /// for indexes produced by the build itself.
    #[error(transparent)]
    Proof(#[from] ProofError),
}

/// A stored artifact failed re-verification.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerifyError {
    /// `count` disagrees with the address list.
    #[error("count is {count} but {addresses} addresses are listed")]
    CountMismatch {
        /// The stored count.
        count: usize,
        /// Number of entries in `addresses`.
        addresses: usize,
    },
    /// The leaf list is not index-aligned with the address list.
    #[error("{leaves} leaves listed for {addresses} addresses")]
    LeafCountMismatch {
        /// Number of entries in `leaves`.
        leaves: usize,
        /// Number of entries in `addresses`.
        addresses: usize,
    },
    /// There are more or fewer proofs than addresses.
    #[error("{proofs} proofs listed for {addresses} addresses")]
    ProofCountMismatch {
        /// Number of entries in `proofs`.
        proofs: usize,
        /// Number of entries in `addresses`.
        addresses: usize,
    },
    /// A stored leaf does not hash from its address.
    #[error("leaf for {address} does not hash from the address")]
    LeafMismatch {
        /// The address whose leaf is wrong.
        address: Address,
    },
    /// An address has no proof entry.
    #[error("no proof for {address}")]
    MissingProof {
        /// The address without a proof.
        address: Address,
    },
    /// A proof does not replay to the stored root.
    #[error("proof for {address} does not replay to the root: {source}")]
    BadProof {
        /// The address whose proof failed.
        address: Address,
        /// The underlying mismatch.
        source: ProofError,
    },
}

/// The self-describing proofs artifact: everything a claimant needs to
/// verify inclusion against the published root, without the original
/// address list or this crate.
///
/// Serialized shape (all hashes `0x`-prefixed lowercase hex):
///
/// ```json
/// {
///   "root": "0x…64 digits",
///   "count": 2,
///   "addresses": ["0x…checksummed", …],
///   "leaves": ["0x…64 digits", …],
///   "proofs": { "0x…checksummed": ["0x…64 digits", …], … },
///   "params": { "hash": "keccak256(address)", "sortedPairs": true }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofSet {
    /// Root of the tree over all leaves.
    pub root: NodeHash,
    /// Number of unique addresses in the batch.
    pub count: usize,
    /// Checksummed addresses in leaf order (first occurrence wins).
    pub addresses: Vec<Address>,
    /// Leaf hashes, index-aligned with `addresses`.
    pub leaves: Vec<NodeHash>,
    /// Sibling chains keyed by checksummed address.
    pub proofs: BTreeMap<Address, Proof>,
    /// Echo of the hashing parameters.
    pub params: HashParams,
}

impl ProofSet {
    /// Build the artifact from raw address strings with the default
    /// sorted-pair parameters. See [`ProofSet::build_with`].
    pub fn build<I, S>(inputs: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::build_with(inputs, true)
    }

    /// Normalize, deduplicate, hash, build the tree, and derive one proof
    /// per address.
    ///
    /// The first invalid entry rejects the whole batch, and a batch with
    /// nothing left after deduplication is rejected too. `sorted_pairs` is
    /// echoed into [`HashParams`] for forward compatibility; construction
    /// sorts sibling pairs regardless, as that is the only scheme the
    /// on-chain verifier understands.
    pub fn build_with<I, S>(inputs: I, sorted_pairs: bool) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut addresses = Vec::new();
        for raw in inputs {
            let raw = raw.as_ref();
            let address: Address = raw.parse().map_err(|source| BuildError::InvalidAddress {
                input: raw.trim().to_owned(),
                source,
            })?;
            if seen.insert(address) {
                addresses.push(address);
            }
        }
        if addresses.is_empty() {
            return Err(BuildError::Empty);
        }

        log::debug!("building proof set over {} unique addresses", addresses.len());

        let leaves: Vec<NodeHash> = addresses.iter().map(Address::leaf_hash).collect();
        let tree = MerkleTree::from_leaves(leaves.clone());

        let mut proofs = BTreeMap::new();
        for (index, address) in addresses.iter().enumerate() {
            proofs.insert(*address, tree.proof(index)?);
        }

        Ok(ProofSet {
            root: tree.root().clone(),
            count: addresses.len(),
            addresses,
            leaves,
            proofs,
            params: HashParams {
                hash: HASH_DESCRIPTION.to_owned(),
                sorted_pairs,
            },
        })
    }

    /// The proof for one address, if it is in the set.
    pub fn proof(&self, address: &Address) -> Option<&Proof> {
        self.proofs.get(address)
    }

    /// Re-check the whole artifact: counts, index alignment, leaf hashes,
    /// and every proof against the root. Intended for artifacts read back
    /// from storage; a freshly built set always passes.
    pub fn verify_all(&self) -> Result<(), VerifyError> {
        if self.count != self.addresses.len() {
            return Err(VerifyError::CountMismatch {
                count: self.count,
                addresses: self.addresses.len(),
            });
        }
        if self.leaves.len() != self.addresses.len() {
            return Err(VerifyError::LeafCountMismatch {
                leaves: self.leaves.len(),
                addresses: self.addresses.len(),
            });
        }
        if self.proofs.len() != self.addresses.len() {
            return Err(VerifyError::ProofCountMismatch {
                proofs: self.proofs.len(),
                addresses: self.addresses.len(),
            });
        }
        for (address, leaf) in self.addresses.iter().zip(&self.leaves) {
            if address.leaf_hash() != *leaf {
                return Err(VerifyError::LeafMismatch { address: *address });
            }
            let proof = self
                .proofs
                .get(address)
                .ok_or(VerifyError::MissingProof { address: *address })?;
            proof
                .verify(leaf, &self.root)
                .map_err(|source| VerifyError::BadProof {
                    address: *address,
                    source,
                })?;
        }
        Ok(())
    }
}
