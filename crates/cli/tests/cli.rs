use assert_cmd::Command;
use predicates::prelude::*;

const REFERENCE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../configs/scenario.toml");

fn formation() -> Command {
    Command::cargo_bin("formation").expect("formation bin")
}

#[test]
fn reports_deputy_orbit_for_reference_scenario() {
    formation()
        .args(["--config", REFERENCE])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Deputy Orbit ==="))
        .stdout(predicate::str::contains("Eccentricity    : 0.014286"))
        .stdout(predicate::str::contains("Inclination     : 98.0000 deg"))
        .stdout(predicate::str::contains("Samples         : 100"));
}

#[test]
fn writes_csv_and_summary_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv_path = dir.path().join("relative.csv");
    let summary_path = dir.path().join("summary.json");

    formation()
        .args([
            "--config",
            REFERENCE,
            "--duration",
            "600",
            "--timestep",
            "10",
            "--csv",
            csv_path.to_str().unwrap(),
            "--summary",
            summary_path.to_str().unwrap(),
        ])
        .assert()
        .success();

    let csv = std::fs::read_to_string(&csv_path).expect("csv output");
    assert_eq!(csv.lines().count(), 61, "header plus 60 samples");
    let summary = std::fs::read_to_string(&summary_path).expect("summary output");
    assert!(summary.contains("\"samples\": 60"), "summary: {summary}");
}

#[test]
fn csv_to_stdout_suppresses_report() {
    formation()
        .args(["--config", REFERENCE, "--duration", "120", "--csv", "-"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("time_s,pos_x_km"))
        .stdout(predicate::str::contains("Deputy Orbit").not());
}

#[test]
fn radial_override_derives_in_track_and_saves_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    let saved = dir.path().join("saved.yaml");

    formation()
        .args([
            "--config",
            REFERENCE,
            "--radial",
            "50",
            "--inc",
            "-98",
            "--save-config",
            saved.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Eccentricity    : 0.007143"));

    let config = formation_flight::config::load_scenario(&saved).expect("saved scenario");
    assert_eq!(config.formation.radial_km, 50.0);
    assert_eq!(config.formation.in_track_km, 100.0);
    assert_eq!(config.chief.inclination_deg, -98.0);
}

#[test]
fn invalid_override_is_rejected() {
    formation()
        .args(["--config", REFERENCE, "--ecc", "1.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("eccentricity must be below 1"));
}

#[test]
fn sample_cap_is_enforced() {
    formation()
        .args(["--config", REFERENCE, "--max-samples", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("limit is 10"));
}

#[test]
fn missing_config_names_the_file() {
    formation()
        .args(["--config", "does/not/exist.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does/not/exist.toml"));
}

#[test]
fn invalid_scenario_is_not_saved() {
    let dir = tempfile::tempdir().expect("tempdir");
    let saved = dir.path().join("rejected.toml");

    formation()
        .args([
            "--config",
            REFERENCE,
            "--ecc",
            "1.5",
            "--save-config",
            saved.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("eccentricity must be below 1"));

    assert!(!saved.exists(), "invalid scenario was written to disk");
}

#[test]
fn tiny_timestep_is_refused_instead_of_allocating() {
    formation()
        .args(["--config", REFERENCE, "--timestep", "0.0000001"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("limit is 1000000"));
}
