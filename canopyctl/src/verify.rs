// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

use std::path::PathBuf;

use canopy::Address;
use clap::Args;

use crate::Error;

#[derive(Debug, Args)]
pub struct Options {
    /// The proofs artifact to check.
    #[arg(value_name = "PROOFS")]
    pub proofs: PathBuf,

    /// Verify only this address, recomputing its leaf from the address
    /// bytes the way the on-chain verifier does.
    #[arg(long, value_name = "ADDRESS")]
    pub address: Option<String>,
}

pub(super) fn run(opts: &Options) -> Result<(), Error> {
    log::debug!("verify {opts:?}");
    let set = crate::read_proof_set(&opts.proofs)?;

    match &opts.address {
        Some(raw) => {
            let address: Address = raw.parse()?;
            let proof = set.proof(&address).ok_or(Error::NotInSet(address))?;
            proof.verify(&address.leaf_hash(), &set.root)?;
            println!("OK {address}");
        }
        None => {
            set.verify_all()?;
            println!("OK {} proofs verify against {}", set.count, set.root);
        }
    }
    Ok(())
}
