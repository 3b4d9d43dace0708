// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

#![expect(clippy::unwrap_used)]

use predicates::prelude::*;
use std::fs;

const PRG: &str = "canopyctl";
const VERSION: &str = env!("CARGO_PKG_VERSION");

macro_rules! cargo_bin_cmd {
    () => {
        ::assert_cmd::cargo::cargo_bin_cmd!("canopyctl")
    };
}

const ALICE: &str = "0x5B38Da6a701c568545dCfcB03FcB875f56beddC4";
const BOB: &str = "0xAb8483F64d9C6d1EcF9b849Ae677dD3315835cb2";
const PAIR_ROOT: &str = "0x9d997719c0a5b5f6db9b8ac69a988be57cf324cb9fffd51dc2c37544bb520d65";

#[test]
fn canopyctl_prints_version() {
    let expected_version_output: String = format!("{PRG} {VERSION}");

    // version is defined and succeeds with the desired output
    cargo_bin_cmd!()
        .args(["-V"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected_version_output));
}

#[test]
fn canopyctl_builds_an_artifact() {
    let tmpdir = tempfile::tempdir().unwrap();
    let input = tmpdir.path().join("allowlist.txt");
    fs::write(&input, format!("{ALICE}\n{BOB}\n")).unwrap();

    cargo_bin_cmd!()
        .arg("build")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(PAIR_ROOT))
        .stdout(predicate::str::contains("\"count\":2"))
        .stdout(predicate::str::contains("keccak256(address)"));
}

#[test]
fn canopyctl_build_skips_blank_lines_and_comments() {
    let tmpdir = tempfile::tempdir().unwrap();
    let input = tmpdir.path().join("allowlist.txt");
    fs::write(&input, format!("# devnet accounts\n\n{ALICE}\n\n{BOB}\n")).unwrap();

    cargo_bin_cmd!()
        .arg("build")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"count\":2"));
}

#[test]
fn canopyctl_build_deduplicates_casings() {
    let tmpdir = tempfile::tempdir().unwrap();
    let input = tmpdir.path().join("allowlist.txt");
    fs::write(&input, format!("{ALICE}\n{}\n", ALICE.to_lowercase())).unwrap();

    cargo_bin_cmd!()
        .arg("build")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"count\":1"));
}

#[test]
fn canopyctl_build_rejects_invalid_addresses() {
    let tmpdir = tempfile::tempdir().unwrap();
    let input = tmpdir.path().join("allowlist.txt");
    fs::write(&input, format!("{ALICE}\nnot-an-address\n")).unwrap();

    cargo_bin_cmd!()
        .arg("build")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid address"))
        .stderr(predicate::str::contains("not-an-address"));
}

#[test]
fn canopyctl_build_reads_a_csv_column() {
    let tmpdir = tempfile::tempdir().unwrap();
    let input = tmpdir.path().join("allowlist.csv");
    fs::write(&input, format!("alice,{ALICE}\nbob,{BOB}\n")).unwrap();

    cargo_bin_cmd!()
        .arg("build")
        .arg(&input)
        .args(["--csv-column", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"count\":2"))
        .stdout(predicate::str::contains(PAIR_ROOT));
}

#[test]
fn canopyctl_root_prints_the_root() {
    let tmpdir = tempfile::tempdir().unwrap();
    let input = tmpdir.path().join("allowlist.txt");
    let proofs = tmpdir.path().join("proofs.json");
    fs::write(&input, format!("{ALICE}\n{BOB}\n")).unwrap();

    cargo_bin_cmd!()
        .arg("build")
        .arg(&input)
        .arg("--output")
        .arg(&proofs)
        .assert()
        .success();

    cargo_bin_cmd!()
        .arg("root")
        .arg(&proofs)
        .assert()
        .success()
        .stdout(predicate::str::contains(PAIR_ROOT));
}

#[test]
fn canopyctl_verifies_the_whole_artifact() {
    let tmpdir = tempfile::tempdir().unwrap();
    let input = tmpdir.path().join("allowlist.txt");
    let proofs = tmpdir.path().join("proofs.json");
    fs::write(&input, format!("{ALICE}\n{BOB}\n")).unwrap();

    cargo_bin_cmd!()
        .arg("build")
        .arg(&input)
        .arg("--output")
        .arg(&proofs)
        .assert()
        .success();

    cargo_bin_cmd!()
        .arg("verify")
        .arg(&proofs)
        .assert()
        .success()
        .stdout(predicate::str::contains("OK 2 proofs"));
}

#[test]
fn canopyctl_verifies_a_single_address() {
    let tmpdir = tempfile::tempdir().unwrap();
    let input = tmpdir.path().join("allowlist.txt");
    let proofs = tmpdir.path().join("proofs.json");
    fs::write(&input, format!("{ALICE}\n{BOB}\n")).unwrap();

    cargo_bin_cmd!()
        .arg("build")
        .arg(&input)
        .arg("--output")
        .arg(&proofs)
        .assert()
        .success();

    // lookup goes through canonicalization, so any casing works
    cargo_bin_cmd!()
        .arg("verify")
        .arg(&proofs)
        .args(["--address", &ALICE.to_lowercase()])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("OK {ALICE}")));

    cargo_bin_cmd!()
        .arg("verify")
        .arg(&proofs)
        .args(["--address", "0x0000000000000000000000000000000000000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no proof for"));
}

#[test]
fn canopyctl_verify_catches_a_tampered_artifact() {
    let tmpdir = tempfile::tempdir().unwrap();
    let input = tmpdir.path().join("allowlist.txt");
    let proofs = tmpdir.path().join("proofs.json");
    fs::write(&input, format!("{ALICE}\n{BOB}\n")).unwrap();

    cargo_bin_cmd!()
        .arg("build")
        .arg(&input)
        .arg("--output")
        .arg(&proofs)
        .assert()
        .success();

    let tampered = fs::read_to_string(&proofs).unwrap().replace(
        PAIR_ROOT,
        "0x0000000000000000000000000000000000000000000000000000000000000000",
    );
    fs::write(&proofs, tampered).unwrap();

    cargo_bin_cmd!()
        .arg("verify")
        .arg(&proofs)
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not replay to the root"));
}
