//! E2E tests for the `mc` binary: `die`, `play`, `analyze`, `sweep`.
//!
//! Covers: JSON schemas, seeded reproducibility, game files, text output,
//! and error codes for invalid input.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test harness helpers
// ---------------------------------------------------------------------------

fn mc_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("mc"));
    cmd.current_dir(home);
    cmd.env("MONTECARLO_LOG", "error");
    cmd.env("HOME", home);
    cmd.env("XDG_CONFIG_HOME", home.join("config"));
    cmd.env_remove("FORMAT");
    cmd
}

fn json_output(home: &Path, args: &[&str]) -> Value {
    let output = mc_cmd(home)
        .args(args)
        .args(["--format", "json"])
        .output()
        .expect("mc should not crash");
    assert!(
        output.status.success(),
        "mc {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid JSON from mc")
}

fn write_game(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("game.toml");
    std::fs::write(
        &path,
        r#"
seed = 99
rolls = 30

[[dice]]
faces = [1, 2, 3, 4, 5, 6]
weights = { "6" = 4.0 }
copies = 2

[[dice]]
faces = [1, 2, 3, 4, 5, 6]
"#,
    )
    .expect("write game file");
    path
}

// ---------------------------------------------------------------------------
// mc die
// ---------------------------------------------------------------------------

#[test]
fn die_json_reports_weights_and_probabilities() {
    let dir = TempDir::new().expect("tempdir");
    let json = json_output(dir.path(), &["die", "--faces", "H,T", "--weight", "H=3"]);
    let faces = json["faces"].as_array().expect("faces array");
    assert_eq!(faces.len(), 2);
    assert_eq!(faces[0]["face"], "H");
    assert_eq!(faces[0]["weight"], 3.0);
    assert_eq!(faces[0]["probability"], 0.75);
    assert_eq!(json["total_weight"], 4.0);
    assert!(json.get("rolls").is_none());
}

#[test]
fn die_rolls_are_seeded() {
    let dir = TempDir::new().expect("tempdir");
    let args = ["die", "--faces", "1,2,3,4,5,6", "--rolls", "12", "--seed", "5"];
    let a = json_output(dir.path(), &args);
    let b = json_output(dir.path(), &args);
    assert_eq!(a["rolls"].as_array().expect("rolls").len(), 12);
    assert_eq!(a["rolls"], b["rolls"]);
}

#[test]
fn die_unknown_face_weight_fails_with_code() {
    let dir = TempDir::new().expect("tempdir");
    mc_cmd(dir.path())
        .args(["die", "--faces", "1,2,3", "--weight", "9=2", "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E1004]"));
}

#[test]
fn die_duplicate_faces_fail() {
    let dir = TempDir::new().expect("tempdir");
    mc_cmd(dir.path())
        .args(["die", "--faces", "1,2,2", "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E1002"));
}

#[test]
fn die_overflowing_weights_fail_with_code() {
    let dir = TempDir::new().expect("tempdir");
    mc_cmd(dir.path())
        .args([
            "die", "--faces", "1,2", "--weight", "1=1e308", "--weight", "2=1e308", "--rolls", "5",
            "--format", "text",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E1005]"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn verbose_flag_emits_debug_events() {
    let dir = TempDir::new().expect("tempdir");
    mc_cmd(dir.path())
        .args(["-v", "die", "--faces", "1,2,3", "--weight", "3=2", "--format", "json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("die weight changed"));

    mc_cmd(dir.path())
        .args(["die", "--faces", "1,2,3", "--weight", "3=2", "--format", "json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("die weight changed").not());
}

// ---------------------------------------------------------------------------
// mc play
// ---------------------------------------------------------------------------

#[test]
fn play_wide_json_is_rectangular() {
    let dir = TempDir::new().expect("tempdir");
    let json = json_output(
        dir.path(),
        &["play", "--faces", "1,2,3,4,5,6", "--dice", "3", "--rolls", "8", "--seed", "1"],
    );
    assert_eq!(json["columns"], serde_json::json!(["die1", "die2", "die3"]));
    let rows = json["rows"].as_array().expect("rows");
    assert_eq!(rows.len(), 8);
    assert!(rows.iter().all(|r| r.as_array().map(Vec::len) == Some(3)));
}

#[test]
fn play_narrow_json_has_record_per_cell() {
    let dir = TempDir::new().expect("tempdir");
    let json = json_output(
        dir.path(),
        &["play", "--faces", "H,T", "--dice", "2", "--rolls", "4", "--seed", "3", "--form", "narrow"],
    );
    let records = json.as_array().expect("records");
    assert_eq!(records.len(), 8);
    assert_eq!(records[0]["roll"], 1);
    assert_eq!(records[0]["die"], "die1");
    assert_eq!(records[7]["roll"], 4);
    assert_eq!(records[7]["die"], "die2");
}

#[test]
fn play_rejects_unknown_form() {
    let dir = TempDir::new().expect("tempdir");
    mc_cmd(dir.path())
        .args(["play", "--faces", "1,2", "--form", "tall"])
        .assert()
        .failure();
}

#[test]
fn play_zero_rolls_fails_with_code() {
    let dir = TempDir::new().expect("tempdir");
    mc_cmd(dir.path())
        .args(["play", "--faces", "1,2", "--rolls", "0", "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E1007]"));
}

#[test]
fn play_from_game_file_uses_file_rolls() {
    let dir = TempDir::new().expect("tempdir");
    let game = write_game(dir.path());
    let json = json_output(
        dir.path(),
        &["play", "--config", game.to_str().expect("utf8 path")],
    );
    assert_eq!(json["rows"].as_array().expect("rows").len(), 30);
    assert_eq!(json["columns"].as_array().expect("columns").len(), 3);
}

#[test]
fn play_huge_dice_count_fails_with_code() {
    let dir = TempDir::new().expect("tempdir");
    mc_cmd(dir.path())
        .args(["play", "--faces", "1,2", "--dice", "10000000000000", "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E3002]"));
}

#[test]
fn weight_flag_skips_dice_without_the_face() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("mixed.toml");
    std::fs::write(
        &path,
        "[[dice]]\nfaces = [1, 2, 3, 4, 5, 6]\n\n[[dice]]\nfaces = [\"H\", \"T\"]\n",
    )
    .expect("write game file");
    let json = json_output(
        dir.path(),
        &["play", "--config", path.to_str().expect("utf8 path"), "--weight", "6=5", "--rolls", "4"],
    );
    assert_eq!(json["rows"].as_array().expect("rows").len(), 4);
}

#[test]
fn play_text_output_lists_rolls() {
    let dir = TempDir::new().expect("tempdir");
    mc_cmd(dir.path())
        .args(["play", "--faces", "H,T", "--dice", "2", "--rolls", "3", "--seed", "2", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("roll=1 die1="))
        .stdout(predicate::str::contains("roll=3 die1="));
}

// ---------------------------------------------------------------------------
// mc analyze
// ---------------------------------------------------------------------------

#[test]
fn analyze_json_counts_are_consistent() {
    let dir = TempDir::new().expect("tempdir");
    let json = json_output(
        dir.path(),
        &["analyze", "--faces", "1,2,3", "--dice", "3", "--rolls", "60", "--seed", "11", "--per-roll"],
    );
    assert_eq!(json["rolls"], 60);
    assert_eq!(json["dice"], 3);

    let totals: u64 = json["face_totals"]
        .as_array()
        .expect("totals")
        .iter()
        .filter_map(Value::as_u64)
        .sum();
    assert_eq!(totals, 180);

    for key in ["combos", "perms"] {
        let sum: u64 = json[key]
            .as_array()
            .expect("counts")
            .iter()
            .filter_map(|c| c["count"].as_u64())
            .sum();
        assert_eq!(sum, 60, "{key} should sum to rolls");
    }

    let jackpots = json["jackpots"].as_u64().expect("jackpots");
    assert!(jackpots <= 60);
    assert_eq!(json["face_counts"]["rows"].as_array().expect("rows").len(), 60);
}

#[test]
fn analyze_top_truncates_counts() {
    let dir = TempDir::new().expect("tempdir");
    let json = json_output(
        dir.path(),
        &["analyze", "--faces", "1,2,3,4,5,6", "--dice", "2", "--rolls", "100", "--seed", "4", "--top", "3"],
    );
    assert_eq!(json["perms"].as_array().expect("perms").len(), 3);
    assert!(json.get("face_counts").is_none());
}

#[test]
fn analyze_single_die_is_all_jackpots() {
    let dir = TempDir::new().expect("tempdir");
    let json = json_output(
        dir.path(),
        &["analyze", "--faces", "1,2,3", "--dice", "1", "--rolls", "25", "--seed", "0"],
    );
    assert_eq!(json["jackpots"], 25);
}

#[test]
fn analyze_pretty_output_has_sections() {
    let dir = TempDir::new().expect("tempdir");
    mc_cmd(dir.path())
        .args(["analyze", "--faces", "H,T", "--dice", "2", "--rolls", "10", "--seed", "6", "--format", "pretty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jackpots:"))
        .stdout(predicate::str::contains("Combinations"))
        .stdout(predicate::str::contains("Permutations"));
}

// ---------------------------------------------------------------------------
// mc sweep
// ---------------------------------------------------------------------------

#[test]
fn sweep_json_totals() {
    let dir = TempDir::new().expect("tempdir");
    let json = json_output(
        dir.path(),
        &["sweep", "--faces", "H,T", "--dice", "2", "--rolls", "20", "--seeds", "10"],
    );
    assert_eq!(json["seeds_run"], 10);
    assert_eq!(json["total_rolls"], 200);
    assert_eq!(json["outcomes"].as_array().expect("outcomes").len(), 10);
    assert_eq!(json["expected_jackpot_rate"], 0.5);
}

#[test]
fn sweep_seed_start_defaults_to_file_seed() {
    let dir = TempDir::new().expect("tempdir");
    let game = write_game(dir.path());
    let json = json_output(
        dir.path(),
        &["sweep", "--config", game.to_str().expect("utf8 path"), "--seeds", "3"],
    );
    assert_eq!(json["outcomes"][0]["seed"], 99);
    assert_eq!(json["rolls_per_seed"], 30);
}

#[test]
fn missing_game_source_is_an_error() {
    let dir = TempDir::new().expect("tempdir");
    mc_cmd(dir.path())
        .args(["sweep", "--format", "json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"error\""));
}
