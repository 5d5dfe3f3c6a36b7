use approx::assert_abs_diff_eq;
use formation_flight::config::{
    BodyConfig, ConfigError, DEFAULT_MAX_SAMPLES, ScenarioConfig, load_scenario, save_scenario,
};
use formation_flight::relative::{FormationError, run_scenario};

fn reference() -> ScenarioConfig {
    load_scenario("configs/scenario.toml").expect("reference scenario")
}

fn issues(config: &ScenarioConfig) -> Vec<String> {
    match config.validate() {
        Err(ConfigError::Invalid(issues)) => issues,
        other => panic!("expected validation issues, got {other:?}"),
    }
}

#[test]
fn reference_scenario_loads_and_solves() {
    let config = reference();
    assert_eq!(config.body, BodyConfig::default());
    assert_eq!(config.chief.inclination_deg, 98.0);
    config.validate().expect("reference scenario is valid");

    let scenario = config.to_scenario().expect("scenario");
    assert_eq!(scenario.max_samples, Some(DEFAULT_MAX_SAMPLES));
    let solution = run_scenario(&scenario).expect("solution");
    let (a, e, i, w, raan, m) = solution.deputy_degrees();
    assert_eq!(a, 7000.0);
    assert_abs_diff_eq!(e, 0.014_285_714, epsilon = 1e-9);
    assert_abs_diff_eq!(i, 98.0, epsilon = 1e-9);
    assert_abs_diff_eq!(w, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(raan, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(m, 0.0, epsilon = 1e-9);
    assert_eq!(solution.trajectory.len(), 100);
}

#[test]
fn helix_scenario_keeps_requested_amplitudes() {
    let config = load_scenario("configs/helix.yaml").expect("helix scenario");
    assert_eq!(config.body.name, "EARTH");
    let solution = run_scenario(&config.to_scenario().expect("scenario")).expect("solution");
    assert_eq!(solution.trajectory.len(), 390);
    let [radial, _, cross_track] = solution.trajectory.position_extents();
    assert_abs_diff_eq!(radial, 0.5, epsilon = 0.01);
    assert_abs_diff_eq!(cross_track, 0.8, epsilon = 0.01);
}

#[test]
fn validation_reports_every_problem() {
    let mut config = reference();
    config.schedule.timestep_s = 7000.0;
    config.chief.eccentricity = 1.2;
    config.chief.mean_anomaly_deg = 200.0;
    config.formation.in_track_km = 150.0;
    config.formation.cross_track_km = -5.0;

    let found = issues(&config);
    for expected in [
        "timestep cannot be larger than the duration",
        "eccentricity must be below 1",
        "perigee below the EARTH surface",
        "mean anomaly must be between -180 and 180 degrees",
        "in-track amplitude must be twice the radial amplitude",
        "cross-track amplitude must be between 0",
    ] {
        assert!(
            found.iter().any(|issue| issue.contains(expected)),
            "missing {expected:?} in {found:?}"
        );
    }
    assert_eq!(found.len(), 6);
    assert!(matches!(config.to_scenario(), Err(ConfigError::Invalid(_))));
}

#[test]
fn validation_checks_orbit_against_body() {
    let mut config = reference();
    config.chief.semi_major_axis_km = 6000.0;
    let found = issues(&config);
    assert!(found.iter().any(|issue| issue == "semi-major axis below the EARTH surface"));

    let mut config = reference();
    config.chief.semi_major_axis_km = 400_000.0;
    assert!(issues(&config)
        .iter()
        .any(|issue| issue.contains("semi-major axis cannot exceed")));

    let mut config = reference();
    config.schedule.duration_s = 40_000_000.0;
    assert!(issues(&config)
        .iter()
        .any(|issue| issue.contains("longer than a year")));
}

#[test]
fn invalid_scenario_error_lists_issues() {
    let mut config = reference();
    config.schedule.duration_s = 0.0;
    let message = config.validate().expect_err("invalid").to_string();
    assert!(message.starts_with("invalid scenario:"));
    assert!(message.contains("scenario duration must be positive"));
}

#[test]
fn equatorial_chief_is_reported_as_singular() {
    let mut config = reference();
    config.chief.inclination_deg = 0.0;
    let scenario = config.to_scenario().expect("ranges are fine");
    assert!(matches!(
        run_scenario(&scenario),
        Err(FormationError::SingularGeometry { .. })
    ));
}

#[test]
fn sample_cap_stops_oversized_runs() {
    let mut scenario = reference().to_scenario().expect("scenario");
    scenario.max_samples = Some(10);
    assert_eq!(
        run_scenario(&scenario),
        Err(FormationError::SampleLimitExceeded {
            requested: 100,
            limit: 10
        })
    );
}

#[test]
fn scenarios_survive_save_and_load() {
    let dir = tempfile::tempdir().expect("tempdir");
    let original = load_scenario("configs/helix.yaml").expect("helix scenario");

    for name in ["nested/helix.toml", "helix.yaml"] {
        let path = dir.path().join(name);
        save_scenario(&path, &original).expect("save");
        let reloaded = load_scenario(&path).expect("reload");
        assert_eq!(reloaded, original, "{name}");
    }
}

#[test]
fn optional_sections_fall_back_to_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("minimal.toml");
    std::fs::write(
        &path,
        r#"
[schedule]
duration_s = 600.0
timestep_s = 10.0

[chief]
semi_major_axis_km = 7000.0
eccentricity = 0.0
inclination_deg = 45.0
arg_perigee_deg = 0.0
raan_deg = 0.0
mean_anomaly_deg = 0.0

[formation]
radial_km = 1.0
in_track_km = 2.0
"#,
    )
    .expect("write scenario");

    let config = load_scenario(&path).expect("minimal scenario");
    assert_eq!(config.body, BodyConfig::default());
    assert_eq!(config.formation.cross_track_km, 0.0);
    assert_eq!(config.formation.latitude_crossing_deg, 0.0);
    config.validate().expect("valid");
}

#[test]
fn unreadable_and_malformed_files_fail() {
    assert!(matches!(
        load_scenario("configs/does-not-exist.toml"),
        Err(ConfigError::Io(_))
    ));

    let dir = tempfile::tempdir().expect("tempdir");
    let toml_path = dir.path().join("broken.toml");
    std::fs::write(&toml_path, "[schedule\nduration_s = ").expect("write");
    assert!(matches!(load_scenario(&toml_path), Err(ConfigError::Toml(_))));

    let yaml_path = dir.path().join("broken.yaml");
    std::fs::write(&yaml_path, "schedule: [1, 2").expect("write");
    let err = load_scenario(&yaml_path).expect_err("malformed YAML");
    assert!(matches!(err, ConfigError::Parse(_)));
    assert!(err.to_string().starts_with("failed to parse YAML"), "{err}");
}

#[test]
fn tiny_timestep_is_refused_by_default_cap() {
    let mut config = reference();
    config.schedule.timestep_s = 1e-7;
    config.validate().expect("ranges are fine");
    let scenario = config.to_scenario().expect("scenario");
    assert!(matches!(
        run_scenario(&scenario),
        Err(FormationError::SampleLimitExceeded {
            limit: DEFAULT_MAX_SAMPLES,
            ..
        })
    ));
}
