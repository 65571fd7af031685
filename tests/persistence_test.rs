#![cfg(feature = "storage-rocksdb")]

use assert_cmd::cargo_bin;
use std::io::Write;
use std::process::Command;
use tempfile::{NamedTempFile, tempdir};

fn payload(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{json}").unwrap();
    file
}

#[test]
fn test_rocksdb_persistence_recovery() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("test_db");

    // 1. First run: seed two records and mark SO001 as paid
    let mut csv1 = NamedTempFile::new().unwrap();
    writeln!(csv1, "id,reference,acquirer_reference,state,amount,currency,date").unwrap();
    writeln!(csv1, "1,SO001,,draft,10.5,TND,").unwrap();
    writeln!(csv1, "2,SO002,,draft,4.0,TND,").unwrap();
    let paid = payload(r#"{"reference": "SO001", "paymee_tx_id": "PM-1", "status": "PAID"}"#);

    let mut cmd1 = Command::new(cargo_bin!("paymee"));
    cmd1.arg("notify")
        .arg("--transactions")
        .arg(csv1.path())
        .arg("--payload")
        .arg(paid.path())
        .arg("--db-path")
        .arg(&db_path);

    let output1 = cmd1.output().expect("Failed to execute command");
    assert!(output1.status.success());
    let stdout1 = String::from_utf8_lossy(&output1.stdout);
    assert!(stdout1.contains("1,SO001,PM-1,done,10.5,TND,"));

    // 2. Second run: no new records, notify SO002 against the same DB
    let mut csv2 = NamedTempFile::new().unwrap();
    writeln!(csv2, "id,reference,acquirer_reference,state,amount,currency,date").unwrap();
    let cancelled =
        payload(r#"{"reference": "SO002", "paymee_tx_id": "PM-2", "status": "CANCELLED"}"#);

    let mut cmd2 = Command::new(cargo_bin!("paymee"));
    cmd2.arg("notify")
        .arg("--transactions")
        .arg(csv2.path())
        .arg("--payload")
        .arg(cancelled.path())
        .arg("--db-path")
        .arg(&db_path);

    let output2 = cmd2.output().expect("Failed to execute command");
    assert!(output2.status.success());
    let stdout2 = String::from_utf8_lossy(&output2.stdout);

    // SO001 kept its state from the first run
    assert!(stdout2.contains("1,SO001,PM-1,done,10.5,TND,"));
    assert!(stdout2.contains("2,SO002,PM-2,cancel,4.0,TND,"));
}
