// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

//! Keccak-256 helpers and the 32-byte node hash type.

use std::fmt::{self, Debug, Display};
use std::str::FromStr;

use serde::de::Visitor;
use serde::{Deserialize, Serialize};
use sha3::digest::{generic_array::GenericArray, typenum};
use sha3::{Digest, Keccak256};
use thiserror::Error;

/// A hash value inside the tree: a leaf, an interior node, or the root.
/// We use the same type as returned by sha3 here to avoid copies.
///
/// The textual form everywhere (display, parsing, serde) is the external
/// contract's `0x`-prefixed lowercase hex, 64 digits.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Default, Hash)]
pub struct NodeHash(GenericArray<u8, typenum::U32>);

impl NodeHash {
    /// The length of a hash in bytes.
    pub const LEN: usize = 32;
}

impl std::ops::Deref for NodeHash {
    type Target = GenericArray<u8, typenum::U32>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[u8]> for NodeHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for NodeHash {
    fn from(value: [u8; Self::LEN]) -> Self {
        NodeHash(value.into())
    }
}

impl From<GenericArray<u8, typenum::U32>> for NodeHash {
    fn from(value: GenericArray<u8, typenum::U32>) -> Self {
        NodeHash(value)
    }
}

impl Display for NodeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Debug for NodeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

/// A string failed to parse as a [`NodeHash`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidNodeHash {
    /// The `0x` prefix was missing.
    #[error("hash must start with 0x")]
    MissingPrefix,
    /// The digit count after the prefix was not 64.
    #[error("expected 64 hex digits after 0x, found {0}")]
    BadLength(usize),
    /// A character outside `[0-9a-fA-F]` appeared after the prefix.
    #[error("hash contains a non-hex character")]
    NotHex,
}

impl FromStr for NodeHash {
    type Err = InvalidNodeHash;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").ok_or(InvalidNodeHash::MissingPrefix)?;
        if digits.len() != 2 * Self::LEN {
            return Err(InvalidNodeHash::BadLength(digits.len()));
        }
        let mut bytes = [0u8; Self::LEN];
        hex::decode_to_slice(digits, &mut bytes).map_err(|_| InvalidNodeHash::NotHex)?;
        Ok(bytes.into())
    }
}

impl Serialize for NodeHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NodeHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_str(NodeHashVisitor)
    }
}

struct NodeHashVisitor;

impl Visitor<'_> for NodeHashVisitor {
    type Value = NodeHash;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a 0x-prefixed 64-digit hex string")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        value.parse().map_err(E::custom)
    }
}

/// Keccak-256 of `data`.
pub fn keccak256(data: impl AsRef<[u8]>) -> NodeHash {
    Keccak256::digest(data).into()
}

/// Hash of a sibling pair, ordering the two values ascending by byte value
/// before concatenation. The ordering makes verification independent of
/// which side of the tree a node sat on, so `hash_pair(a, b) ==
/// hash_pair(b, a)`.
pub fn hash_pair(a: &NodeHash, b: &NodeHash) -> NodeHash {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut hasher = Keccak256::new();
    hasher.update(lo);
    hasher.update(hi);
    hasher.finalize().into()
}
