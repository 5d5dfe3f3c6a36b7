//! Scenario configuration models, loaders, and range validation.

use std::path::Path;

use formation_core::constants::{EARTH_RADIUS_KM, MU_EARTH, SECONDS_PER_YEAR};
use formation_relative::orbits::OrbitalElements;
use formation_relative::{FormationGeometry, Scenario, Schedule};
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest chief semi-major axis accepted (km), roughly the lunar distance.
pub const MAX_SEMI_MAJOR_AXIS_KM: f64 = 385_000.0;
/// Largest radial amplitude accepted (km).
pub const MAX_RADIAL_KM: f64 = 1_000.0;
/// Largest in-track amplitude accepted (km).
pub const MAX_IN_TRACK_KM: f64 = 2_000.0;
/// Largest in-track offset magnitude accepted (km).
pub const MAX_IN_TRACK_OFFSET_KM: f64 = 1_000.0;
/// Largest cross-track amplitude accepted (km).
pub const MAX_CROSS_TRACK_KM: f64 = 2_000.0;
/// Sample cap applied by [`ScenarioConfig::to_scenario`].
pub const DEFAULT_MAX_SAMPLES: usize = 1_000_000;

/// Propagation timing.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ScheduleConfig {
    pub duration_s: f64,
    pub timestep_s: f64,
}

/// Chief orbit, angles in degrees.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChiefConfig {
    pub semi_major_axis_km: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
    pub arg_perigee_deg: f64,
    pub raan_deg: f64,
    pub mean_anomaly_deg: f64,
}

/// Formation geometry in the radial/in-track/cross-track frame, angles in degrees.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FormationConfig {
    pub radial_km: f64,
    pub in_track_km: f64,
    #[serde(default)]
    pub in_track_offset_km: f64,
    #[serde(default)]
    pub cross_track_km: f64,
    #[serde(default)]
    pub relative_pericenter_deg: f64,
    #[serde(default)]
    pub latitude_crossing_deg: f64,
}

/// Central body the chief orbits.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BodyConfig {
    pub name: String,
    pub mu_km3_s2: f64,
    pub radius_km: f64,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            name: "EARTH".to_string(),
            mu_km3_s2: MU_EARTH,
            radius_km: EARTH_RADIUS_KM,
        }
    }
}

/// Complete scenario file.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ScenarioConfig {
    pub schedule: ScheduleConfig,
    pub chief: ChiefConfig,
    pub formation: FormationConfig,
    #[serde(default)]
    pub body: BodyConfig,
}

/// Errors that can occur while loading, saving, or validating scenario files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to write YAML: {0}")]
    YamlSerialize(serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("failed to write TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("invalid scenario:\n{}", .0.join("\n"))]
    Invalid(Vec<String>),
}

/// Load a scenario from a TOML (`.toml`) or YAML (any other extension) file.
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<ScenarioConfig, ConfigError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    let config = if is_toml(path) {
        toml::from_str(&contents)?
    } else {
        serde_yaml::from_str(&contents)?
    };
    debug!("loaded scenario from {}", path.display());
    Ok(config)
}

/// Write a scenario to `path`, choosing the format from the extension like [`load_scenario`].
pub fn save_scenario<P: AsRef<Path>>(path: P, config: &ScenarioConfig) -> Result<(), ConfigError> {
    let path = path.as_ref();
    let contents = if is_toml(path) {
        toml::to_string_pretty(config)?
    } else {
        serde_yaml::to_string(config).map_err(ConfigError::YamlSerialize)?
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, contents)?;
    debug!("saved scenario to {}", path.display());
    Ok(())
}

fn is_toml(path: &Path) -> bool {
    path.extension().map(|ext| ext == "toml").unwrap_or(false)
}

impl ScenarioConfig {
    /// Check every field against its accepted range, reporting all problems at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut issues = Vec::new();
        let mut check = |ok: bool, message: String| {
            if !ok {
                issues.push(message);
            }
        };

        let ScheduleConfig {
            duration_s,
            timestep_s,
        } = self.schedule;
        check(duration_s > 0.0, "scenario duration must be positive".into());
        check(
            duration_s <= SECONDS_PER_YEAR,
            "scenario duration cannot be longer than a year".into(),
        );
        check(timestep_s > 0.0, "scenario timestep must be positive".into());
        check(
            timestep_s <= duration_s,
            "scenario timestep cannot be larger than the duration".into(),
        );

        let body = &self.body;
        check(
            body.mu_km3_s2 > 0.0,
            format!("{} gravitational parameter must be positive", body.name),
        );
        check(
            body.radius_km > 0.0,
            format!("{} radius must be positive", body.name),
        );

        let chief = &self.chief;
        check(
            chief.semi_major_axis_km >= body.radius_km,
            format!("semi-major axis below the {} surface", body.name),
        );
        check(
            chief.semi_major_axis_km <= MAX_SEMI_MAJOR_AXIS_KM,
            format!("semi-major axis cannot exceed {MAX_SEMI_MAJOR_AXIS_KM} km"),
        );
        check(chief.eccentricity >= 0.0, "eccentricity cannot be negative".into());
        check(chief.eccentricity < 1.0, "eccentricity must be below 1".into());
        check(
            (1.0 - chief.eccentricity) * chief.semi_major_axis_km >= body.radius_km,
            format!("perigee below the {} surface", body.name),
        );
        for (label, value) in [
            ("inclination", chief.inclination_deg),
            ("argument of perigee", chief.arg_perigee_deg),
            ("right ascension", chief.raan_deg),
            ("mean anomaly", chief.mean_anomaly_deg),
        ] {
            check(
                within_half_turn(value),
                format!("{label} must be between -180 and 180 degrees"),
            );
        }

        let formation = &self.formation;
        check(
            (0.0..=MAX_RADIAL_KM).contains(&formation.radial_km),
            format!("radial amplitude must be between 0 and {MAX_RADIAL_KM} km"),
        );
        check(
            (0.0..=MAX_IN_TRACK_KM).contains(&formation.in_track_km),
            format!("in-track amplitude must be between 0 and {MAX_IN_TRACK_KM} km"),
        );
        check(
            formation.in_track_km == 2.0 * formation.radial_km,
            "in-track amplitude must be twice the radial amplitude".into(),
        );
        check(
            (-MAX_IN_TRACK_OFFSET_KM..=MAX_IN_TRACK_OFFSET_KM)
                .contains(&formation.in_track_offset_km),
            format!("in-track offset must be within ±{MAX_IN_TRACK_OFFSET_KM} km"),
        );
        check(
            (0.0..=MAX_CROSS_TRACK_KM).contains(&formation.cross_track_km),
            format!("cross-track amplitude must be between 0 and {MAX_CROSS_TRACK_KM} km"),
        );
        check(
            within_half_turn(formation.relative_pericenter_deg),
            "relative pericenter must be between -180 and 180 degrees".into(),
        );
        check(
            within_half_turn(formation.latitude_crossing_deg),
            "latitude crossing must be between -180 and 180 degrees".into(),
        );

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(issues))
        }
    }

    /// Validate and convert into the core's [`Scenario`] (radians), capped at
    /// [`DEFAULT_MAX_SAMPLES`] samples.
    pub fn to_scenario(&self) -> Result<Scenario, ConfigError> {
        self.validate()?;
        let chief = &self.chief;
        let formation = &self.formation;
        let scenario = Scenario::new(
            Schedule {
                duration_s: self.schedule.duration_s,
                timestep_s: self.schedule.timestep_s,
            },
            OrbitalElements::from_degrees(
                chief.semi_major_axis_km,
                chief.eccentricity,
                chief.inclination_deg,
                chief.arg_perigee_deg,
                chief.raan_deg,
                chief.mean_anomaly_deg,
            ),
            FormationGeometry::from_degrees(
                formation.radial_km,
                formation.in_track_km,
                formation.in_track_offset_km,
                formation.cross_track_km,
                formation.relative_pericenter_deg,
                formation.latitude_crossing_deg,
            ),
        );
        Ok(Scenario {
            mu: self.body.mu_km3_s2,
            max_samples: Some(DEFAULT_MAX_SAMPLES),
            ..scenario
        })
    }
}

fn within_half_turn(deg: f64) -> bool {
    (-180.0..=180.0).contains(&deg)
}

#[cfg(test)]
mod tests {
    use super::ConfigError;

    #[test]
    fn yaml_write_errors_are_reported_as_writes() {
        let err = <serde_yaml::Error as serde::ser::Error>::custom("unsupported value");
        let message = ConfigError::YamlSerialize(err).to_string();
        assert!(message.starts_with("failed to write YAML"), "{message}");
    }
}
