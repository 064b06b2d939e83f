use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

const HEADER: &str = "Campaign Name,Amount Spent (ZAR),Link Clicks,Impressions";

fn write_csv(dir: &Path, body: &str) -> std::path::PathBuf {
    let path = dir.join("meta_ads.csv");
    fs::write(&path, format!("{}\n{}", HEADER, body)).unwrap();
    path
}

fn reports_in(dir: &Path) -> Vec<String> {
    fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn generates_report_and_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(dir.path(), "Summer Sale,1000.00,50,2500\nWinter Push,500.00,5,100\n");
    let out = dir.path().join("reports");

    Command::cargo_bin("admetric_pro")
        .unwrap()
        .arg(&input)
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Report generated:"))
        .stdout(predicate::str::contains("Winter Push"))
        .stdout(predicate::str::contains("R 1,500.00"));

    let files = reports_in(&out);
    assert_eq!(files.len(), 1);
    assert!(files[0].starts_with("AdMetric_Pro_Report_"));
    assert!(files[0].ends_with(".xlsx"));
}

#[test]
fn header_only_input_still_produces_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(dir.path(), "");
    let out = dir.path().join("out");

    Command::cargo_bin("admetric_pro")
        .unwrap()
        .arg(&input)
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("R 0.00"));
    assert_eq!(reports_in(&out).len(), 1);
}

#[test]
fn missing_input_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");

    Command::cargo_bin("admetric_pro")
        .unwrap()
        .arg(dir.path().join("absent.csv"))
        .arg("-o")
        .arg(&out)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Input error"));
    assert!(reports_in(&out).is_empty());
}

#[test]
fn malformed_row_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(dir.path(), "A,100,10,1000\nB,lots,1,10\n");
    let out = dir.path().join("out");

    Command::cargo_bin("admetric_pro")
        .unwrap()
        .arg(&input)
        .arg("-o")
        .arg(&out)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Data validation error"));
    assert!(reports_in(&out).is_empty());
}

#[test]
fn negative_threshold_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(dir.path(), "A,100,10,1000\n");

    Command::cargo_bin("admetric_pro")
        .unwrap()
        .arg(&input)
        .args(["--cpc-threshold", "-5"])
        .assert()
        .code(2);
}

#[test]
fn overflowing_impression_totals_fail_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(
        dir.path(),
        "A,10,1,9223372036854775807\nB,10,1,9223372036854775807\n",
    );
    let out = dir.path().join("out");

    Command::cargo_bin("admetric_pro")
        .unwrap()
        .arg(&input)
        .arg("-o")
        .arg(&out)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Data validation error"))
        .stderr(predicate::str::contains("total impressions overflow"));
    assert!(reports_in(&out).is_empty());
}
