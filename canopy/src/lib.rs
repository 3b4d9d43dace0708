// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

#![warn(missing_debug_implementations, rust_2018_idioms, missing_docs)]
#![deny(unsafe_code)]

//! # canopy builds sorted-pair Merkle trees over account addresses
//!
//! An allowlist of raw address strings is normalized into [`Address`]
//! values (EIP-55 checksum casing, first-occurrence deduplication), hashed
//! into Keccak-256 leaves, and reduced pairwise into a [`MerkleTree`]. Each
//! leaf gets a [`Proof`] that an on-chain verifier can replay against the
//! published root without the full address list.
//!
//! [`ProofSet::build`] is the externally-facing operation: it runs the
//! whole pipeline and bundles the result in the JSON artifact the claim
//! flow consumes. The computation is pure and synchronous; a tree is cheap
//! enough to rebuild that nothing here is cached or persisted.

mod address;
mod hash;
mod proof;
mod proofset;
mod tree;

pub use address::{Address, AddressError};
pub use hash::{InvalidNodeHash, NodeHash, hash_pair, keccak256};
pub use proof::{Proof, ProofError};
pub use proofset::{BuildError, HashParams, ProofSet, VerifyError};
pub use tree::MerkleTree;
