// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use canopy::ProofSet;
use clap::{ArgAction, Args};

use crate::Error;

#[derive(Debug, Args)]
pub struct Options {
    /// File with one address per line, or - for stdin. Blank lines and
    /// lines starting with # are skipped.
    #[arg(value_name = "ADDRESSES")]
    pub input: String,

    /// Read addresses from this 0-based column of a headerless CSV file
    /// instead of one per line.
    #[arg(long, value_name = "COLUMN")]
    pub csv_column: Option<usize>,

    /// Echoed into params.sortedPairs. Sorted pairing is the only
    /// construction mode; the flag does not change the tree.
    #[arg(
        long,
        value_name = "BOOL",
        default_value_t = true,
        action = ArgAction::Set
    )]
    pub sorted_pairs: bool,

    /// Pretty-print the JSON artifact.
    #[arg(long)]
    pub pretty: bool,

    /// Write the artifact to this file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

pub(super) fn run(opts: &Options) -> Result<(), Error> {
    log::debug!("build {opts:?}");

    let raw = read_input(&opts.input)?;
    let addresses = match opts.csv_column {
        Some(column) => csv_column(&raw, column)?,
        None => raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_owned)
            .collect(),
    };

    let set = ProofSet::build_with(&addresses, opts.sorted_pairs)?;
    log::info!("built proofs for {} addresses, root {}", set.count, set.root);

    let json = if opts.pretty {
        serde_json::to_string_pretty(&set)?
    } else {
        serde_json::to_string(&set)?
    };

    match &opts.output {
        Some(path) => fs::write(path, json + "\n")?,
        None => println!("{json}"),
    }
    Ok(())
}

fn read_input(input: &str) -> Result<String, Error> {
    if input == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn csv_column(raw: &str, column: usize) -> Result<Vec<String>, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(raw.as_bytes());

    let mut addresses = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let field = record
            .get(column)
            .ok_or(Error::MissingCsvColumn { row, column })?;
        if !field.is_empty() {
            addresses.push(field.to_owned());
        }
    }
    Ok(addresses)
}
