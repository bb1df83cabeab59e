//! CLI integration tests
//!
//! These run the painticle binary end-to-end on small generated scenes.

use assert_cmd::Command;
use predicates::prelude::*;

fn painticle() -> Command {
    Command::cargo_bin("painticle").unwrap()
}

#[test]
fn test_closest_reports_surface_point() {
    painticle()
        .args(["closest", "--resolution", "8", "--point", "0.1,0.2,3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Closest Point"))
        .stdout(predicate::str::contains("Barycentrics"));
}

#[test]
fn test_closest_rejects_bad_point() {
    painticle()
        .args(["closest", "--point", "1,2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 3 comma-separated coordinates"));
}

#[test]
fn test_grid_prints_statistics() {
    painticle()
        .args(["grid", "--points", "2000", "--voxel-size", "0.1", "--seed", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Populated buckets"))
        .stdout(predicate::str::contains("Mean occupancy"));
}

#[test]
fn test_grid_rejects_zero_voxel_size() {
    painticle()
        .args(["grid", "--points", "10", "--voxel-size", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid voxel size"));
}

#[test]
fn test_simulate_runs_seeded() {
    painticle()
        .args([
            "simulate",
            "--resolution",
            "8",
            "--rays",
            "200",
            "--ticks",
            "5",
            "--seed",
            "42",
            "--threads",
            "2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("5 ticks in"))
        .stdout(predicate::str::contains("Spawned"));
}

#[test]
fn test_simulate_quiet_prints_nothing() {
    painticle()
        .args([
            "--quiet",
            "simulate",
            "--resolution",
            "4",
            "--rays",
            "50",
            "--ticks",
            "2",
            "--seed",
            "7",
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_completions() {
    painticle()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("painticle"));
}
