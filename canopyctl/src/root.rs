// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

use std::path::PathBuf;

use clap::Args;

use crate::Error;

#[derive(Debug, Args)]
pub struct Options {
    /// The proofs artifact to read.
    #[arg(value_name = "PROOFS")]
    pub proofs: PathBuf,
}

pub(super) fn run(opts: &Options) -> Result<(), Error> {
    let set = crate::read_proof_set(&opts.proofs)?;
    println!("{}", set.root);
    Ok(())
}
