// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

//! Account address parsing, checksum casing, and leaf hashing.

use std::fmt::{self, Debug, Display};
use std::str::FromStr;

use serde::de::Visitor;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hash::{NodeHash, keccak256};

/// A 20-byte account address.
///
/// Parsing accepts the `0x`-prefixed 40-digit hex form in any casing and
/// trims surrounding whitespace. [`Display`] renders the EIP-55 mixed-case
/// checksum form, which is the canonical string used everywhere downstream,
/// including as the `proofs` key of the artifact. Canonicalization is
/// idempotent: parsing the rendered form yields the same address.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; 20]);

impl Address {
    /// The length of an address in bytes.
    pub const LEN: usize = 20;

    /// The raw address bytes.
    pub const fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }

    /// Keccak-256 over exactly the 20 raw address bytes, no length prefix
    /// or domain tag. This is the leaf encoding the on-chain verifier
    /// expects (`keccak256(abi.encodePacked(address))`).
    pub fn leaf_hash(&self) -> NodeHash {
        keccak256(self.0)
    }

    /// EIP-55 rendering: the keccak256 digest of the lowercase hex digits
    /// selects, nibble by nibble, which letters are uppercased.
    fn checksum(&self) -> String {
        let lower = hex::encode(self.0);
        let digest = keccak256(lower.as_bytes());
        let nibbles = digest.iter().flat_map(|byte| [byte >> 4, byte & 0x0f]);

        let mut out = String::with_capacity(2 + 2 * Self::LEN);
        out.push_str("0x");
        for (digit, nibble) in lower.bytes().zip(nibbles) {
            if digit.is_ascii_lowercase() && nibble >= 8 {
                out.push(char::from(digit.to_ascii_uppercase()));
            } else {
                out.push(char::from(digit));
            }
        }
        out
    }
}

impl From<[u8; 20]> for Address {
    fn from(value: [u8; Self::LEN]) -> Self {
        Address(value)
    }
}

/// A string failed to validate as an [`Address`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    /// The `0x` prefix was missing.
    #[error("address must start with 0x")]
    MissingPrefix,
    /// The digit count after the prefix was not 40.
    #[error("expected 40 hex digits after 0x, found {found}")]
    BadLength {
        /// Number of characters found after the prefix.
        found: usize,
    },
    /// A character outside `[0-9a-fA-F]` appeared after the prefix.
    #[error("address contains a non-hex character")]
    NotHex,
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .trim()
            .strip_prefix("0x")
            .ok_or(AddressError::MissingPrefix)?;
        if digits.len() != 2 * Self::LEN {
            return Err(AddressError::BadLength {
                found: digits.len(),
            });
        }
        let mut bytes = [0u8; Self::LEN];
        hex::decode_to_slice(digits, &mut bytes).map_err(|_| AddressError::NotHex)?;
        Ok(Address(bytes))
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.checksum())
    }
}

impl Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_str(AddressVisitor)
    }
}

struct AddressVisitor;

impl Visitor<'_> for AddressVisitor {
    type Value = Address;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a 0x-prefixed 40-digit hex address")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        value.parse().map_err(E::custom)
    }
}
