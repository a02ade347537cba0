mod common;

use assert_cmd::Command;
use assert_fs::{prelude::*, TempDir};
use common::*;
use predicates::prelude::*;
use std::error::Error;

const BIN_NAME: &str = "spendcast_cli";

/// A home directory whose data folder holds the rent fixture database.
fn seeded_home() -> Result<TempDir, Box<dyn Error>> {
    let home = TempDir::new()?;
    let json = serde_json::to_string_pretty(&rent_database())?;
    let data = home.child("db");
    data.create_dir_all()?;
    data.child("db.json").write_str(&json)?;
    Ok(home)
}

fn cli(home: &TempDir) -> Result<Command, Box<dyn Error>> {
    let mut cmd = Command::cargo_bin(BIN_NAME)?;
    cmd.env_remove("RUST_LOG").arg("--home").arg(home.path());
    Ok(cmd)
}

#[test]
fn version_prints_build_metadata() -> Result<(), Box<dyn Error>> {
    Command::cargo_bin(BIN_NAME)?
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")).and(
            predicate::str::contains("\"git_hash\""),
        ));
    Ok(())
}

#[test]
fn accounts_lists_summaries() -> Result<(), Box<dyn Error>> {
    let home = seeded_home()?;
    cli(&home)?
        .arg("accounts")
        .assert()
        .success()
        .stdout(
            predicate::str::contains(CHECKING_ID)
                .and(predicate::str::contains("\"recurrentPaymentCount\": 1")),
        );
    Ok(())
}

#[test]
fn outstanding_reports_unpaid_occurrences() -> Result<(), Box<dyn Error>> {
    let home = seeded_home()?;
    let output = cli(&home)?
        .args([
            "outstanding",
            "--account",
            CHECKING_ID,
            "--from",
            "2024-01-01",
            "--to",
            "2024-04-01T00:00:00Z",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output)?;
    let dates: Vec<i64> = report["outstanding"]
        .as_array()
        .ok_or("outstanding is not an array")?
        .iter()
        .filter_map(|item| item["date"].as_i64())
        .collect();
    assert_eq!(
        dates,
        vec![
            ts(2024, 1, 15).timestamp_millis(),
            ts(2024, 2, 15).timestamp_millis(),
            ts(2024, 3, 15).timestamp_millis(),
        ]
    );
    assert!(report.get("warnings").is_none());
    Ok(())
}

#[test]
fn outstanding_accepts_epoch_millis() -> Result<(), Box<dyn Error>> {
    let home = seeded_home()?;
    let from = ts(2024, 2, 1).timestamp_millis().to_string();
    let to = ts(2024, 3, 1).timestamp_millis().to_string();
    cli(&home)?
        .args(["outstanding", "--account", CHECKING_ID, "--from", &from, "--to", &to])
        .assert()
        .success()
        .stdout(predicate::str::contains(RENT_ID));
    Ok(())
}

#[test]
fn inverted_window_fails() -> Result<(), Box<dyn Error>> {
    let home = seeded_home()?;
    cli(&home)?
        .args([
            "outstanding",
            "--account",
            CHECKING_ID,
            "--from",
            "2024-04-01",
            "--to",
            "2024-01-01",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid window"));
    Ok(())
}

#[test]
fn unknown_account_fails() -> Result<(), Box<dyn Error>> {
    let home = seeded_home()?;
    cli(&home)?
        .args(["transactions", "--account", "not-an-account"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Account not found: not-an-account"));
    Ok(())
}

#[test]
fn unparseable_date_fails() -> Result<(), Box<dyn Error>> {
    let home = seeded_home()?;
    cli(&home)?
        .args([
            "outstanding",
            "--account",
            CHECKING_ID,
            "--from",
            "next tuesday",
            "--to",
            "2024-01-01",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date `next tuesday`"));
    Ok(())
}

#[test]
fn db_flag_overrides_the_data_directory() -> Result<(), Box<dyn Error>> {
    let home = TempDir::new()?;
    let data = TempDir::new()?;
    let json = serde_json::to_string_pretty(&rent_database())?;
    data.child("db.json").write_str(&json)?;

    cli(&home)?
        .arg("--db")
        .arg(data.path())
        .args(["recurring", "--account", CHECKING_ID])
        .assert()
        .success()
        .stdout(predicate::str::contains(RENT_ID).and(predicate::str::contains("\"monthly\"")));
    Ok(())
}

#[test]
fn missing_database_fails() -> Result<(), Box<dyn Error>> {
    let home = TempDir::new()?;
    cli(&home)?
        .arg("accounts")
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
    Ok(())
}
