use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const EVENING_SALE: &str = "Evening Sale\n\
12 Jonas Wood\n\
Title: Untitled\n\
Medium: Oil on canvas\n\
Year of Work: 2015\n\
Size: Height 40 in.; Width 30 in. / Height 101.6 cm.; Width 76.2 cm.\n\
Sale of Christie's: 10 May 2022 [Lot 14A]\n\
Estimate 50,000-70,000 USD\n\
Sold For 65,000 USD\n";

const DAY_SALE: &str = "Day Sale\n\
Lucy Bull\n\
Title: Rise\n\
Sold For Bought In\n\
\x0C\
Scott Kahn\n\
Title: Moon\n\
Sold For Passed\n";

const HEADER: &str = "Artist,Title,Medium,Year,Height (in),Width (in),Height (cm),Width (cm),\
Auction House,Sale Date,Lot Number,Estimate Price,Sold Price";

/// A command isolated from the user's config directory.
fn lotscan(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("lotscan").unwrap();
    cmd.env("HOME", home).env("XDG_CONFIG_HOME", home.join("config"));
    cmd
}

fn catalog_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a_evening.txt"), EVENING_SALE).unwrap();
    fs::write(dir.path().join("b_day.txt"), DAY_SALE).unwrap();
    fs::write(dir.path().join("notes.md"), "Jonas Wood Title: Ignored").unwrap();
    dir
}

#[test]
fn test_extract_writes_csv_in_document_order() {
    let catalogs = catalog_dir();
    let out = TempDir::new().unwrap();
    let output = out.path().join("lots.csv");

    lotscan(out.path())
        .arg("extract")
        .arg(catalogs.path())
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 3 records"));

    let csv = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], HEADER);
    assert_eq!(
        lines[1],
        "Jonas Wood,Untitled,Oil on canvas,2015,40,30,101.6,76.2,Christie's,10 May 2022,14A,\
         \"50,000-70,000 USD\",\"65,000 USD\""
    );
    assert_eq!(lines[2], "Lucy Bull,Rise,,,,,,,,,,,Bought In");
    assert_eq!(lines[3], "Scott Kahn,Moon,,,,,,,,,,,Passed");
}

#[test]
fn test_parallel_matches_sequential() {
    let catalogs = catalog_dir();
    for i in 0..6 {
        fs::write(
            catalogs.path().join(format!("c_{}.txt", i)),
            format!("Hernan Bas\nTitle: Study {}\nSold For Withdrawn\n", i),
        )
        .unwrap();
    }
    let out = TempDir::new().unwrap();
    let sequential = out.path().join("sequential.csv");
    let parallel = out.path().join("parallel.csv");

    for (jobs, output) in [("1", &sequential), ("8", &parallel)] {
        lotscan(out.path())
            .arg("extract")
            .arg(catalogs.path())
            .args(["-j", jobs, "-o"])
            .arg(output)
            .assert()
            .success();
    }

    let sequential = fs::read_to_string(sequential).unwrap();
    assert_eq!(sequential, fs::read_to_string(parallel).unwrap());
    assert_eq!(sequential.lines().count(), 10);
}

#[test]
fn test_extract_json_with_loose_gate() {
    let catalogs = TempDir::new().unwrap();
    fs::write(
        catalogs.path().join("sale.txt"),
        "Lucas Arruda\nMedium: Oil on canvas\nSold For Not Sold\n",
    )
    .unwrap();
    let out = TempDir::new().unwrap();
    let output = out.path().join("lots.json");

    lotscan(out.path())
        .arg("extract")
        .arg(catalogs.path())
        .args(["-f", "json", "--gate", "artist-or-title", "-o"])
        .arg(&output)
        .assert()
        .success();

    let table: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(table["columns"][0], "Artist");
    assert_eq!(table["rows"][0]["Artist"], "Lucas Arruda");
    assert_eq!(table["rows"][0]["Title"], "");
    assert_eq!(table["rows"][0]["Sold Price"], "Not Sold");
}

#[test]
fn test_extract_zero_records_writes_header() {
    let catalogs = TempDir::new().unwrap();
    fs::write(catalogs.path().join("sale.txt"), "Nothing here by a roster artist\n").unwrap();
    let out = TempDir::new().unwrap();
    let output = out.path().join("lots.csv");

    lotscan(out.path())
        .arg("extract")
        .arg(catalogs.path())
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&output).unwrap(), format!("{}\n", HEADER));
}

#[test]
fn test_extract_custom_roster() {
    let catalogs = TempDir::new().unwrap();
    fs::write(catalogs.path().join("sale.txt"), "Jane Doe\nTitle: Field\nJonas Wood\nTitle: Pots\n").unwrap();
    let out = TempDir::new().unwrap();
    let output = out.path().join("lots.csv");

    lotscan(out.path())
        .arg("extract")
        .arg(catalogs.path())
        .args(["--artist", "Jane Doe", "-o"])
        .arg(&output)
        .assert()
        .success();

    let csv = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1], "Jane Doe,Field Jonas Wood,,,,,,,,,,,");
}

#[test]
fn test_extract_empty_directory_fails_before_writing() {
    let catalogs = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let output = out.path().join("lots.csv");

    lotscan(out.path())
        .arg("extract")
        .arg(catalogs.path())
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no documents to process"));

    assert!(!output.exists());
}

#[test]
fn test_extract_missing_directory() {
    let out = TempDir::new().unwrap();

    lotscan(out.path())
        .arg("extract")
        .arg(out.path().join("nope"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("input not found"));
}

#[test]
fn test_unreadable_document_is_reported() {
    let catalogs = catalog_dir();
    fs::write(catalogs.path().join("broken.pdf"), "not a pdf").unwrap();
    let out = TempDir::new().unwrap();
    let output = out.path().join("lots.csv");

    lotscan(out.path())
        .arg("extract")
        .arg(catalogs.path())
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Failed documents:"))
        .stdout(predicate::str::contains("broken.pdf"));

    assert_eq!(fs::read_to_string(&output).unwrap().lines().count(), 4);
}

#[test]
fn test_inspect_shows_rule_provenance() {
    let catalogs = catalog_dir();
    let out = TempDir::new().unwrap();

    lotscan(out.path())
        .arg("inspect")
        .arg(catalogs.path().join("a_evening.txt"))
        .arg("--normalized")
        .assert()
        .success()
        .stdout(predicate::str::contains("@@@@Jonas Wood ###TITLE### Untitled"))
        .stdout(predicate::str::contains("size_exact (tier 0)"))
        .stdout(predicate::str::contains("kept"));
}

#[test]
fn test_inspect_json() {
    let catalogs = catalog_dir();
    let out = TempDir::new().unwrap();

    let assert = lotscan(out.path())
        .arg("inspect")
        .arg(catalogs.path().join("b_day.txt"))
        .args(["-f", "json", "--segments"])
        .assert()
        .success();

    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["pages"], 2);
    assert_eq!(report["segments"][1]["record"]["sold_price"], "Passed");
    assert_eq!(report["segments"][1]["admitted"], true);
    assert!(report["segments"][0]["text"].as_str().unwrap().starts_with("Lucy Bull"));
}

#[test]
fn test_config_init_set_get() {
    let out = TempDir::new().unwrap();
    let config = out.path().join("lotscan.json");

    lotscan(out.path())
        .args(["config", "init", "-c"])
        .arg(&config)
        .assert()
        .success();

    lotscan(out.path())
        .args(["config", "set", "extraction.field_validity_gate", "artist_or_title", "-c"])
        .arg(&config)
        .assert()
        .success();

    lotscan(out.path())
        .args(["config", "get", "extraction.field_validity_gate", "-c"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("artist_or_title"));

    lotscan(out.path())
        .args(["config", "init", "-c"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
