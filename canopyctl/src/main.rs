// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

//! canopyctl is the command-line front end for canopy: build a proofs
//! artifact from an allowlist, print its root, and verify its proofs.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use canopy::ProofSet;
use clap::{Parser, Subcommand};

mod build;
mod root;
mod verify;

#[derive(Debug, Parser)]
#[command(
    name = "canopyctl",
    version,
    about = "Merkle allowlist proof tooling",
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build a proofs artifact from a list of addresses
    Build(build::Options),
    /// Print the root of a proofs artifact
    Root(root::Options),
    /// Verify proofs in an artifact
    Verify(verify::Options),
}

/// Everything a subcommand can fail with.
#[derive(Debug, thiserror::Error)]
enum Error {
    #[error(transparent)]
    Build(#[from] canopy::BuildError),
    #[error(transparent)]
    Address(#[from] canopy::AddressError),
    #[error(transparent)]
    Verify(#[from] canopy::VerifyError),
    #[error(transparent)]
    Proof(#[from] canopy::ProofError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("row {row} has no column {column}")]
    MissingCsvColumn { row: usize, column: usize },
    #[error("no proof for {0} in the artifact")]
    NotInSet(canopy::Address),
}

fn read_proof_set(path: &Path) -> Result<ProofSet, Error> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Build(opts) => build::run(opts),
        Commands::Root(opts) => root::run(opts),
        Commands::Verify(opts) => verify::run(opts),
    };

    if let Err(err) = result {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
