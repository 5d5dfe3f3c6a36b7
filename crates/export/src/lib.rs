//! Export helpers for relative trajectory CSV files and JSON run summaries.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

/// Errors raised while writing exported artifacts.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export: {0}")]
    Io(#[from] io::Error),
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod trajectory {
    use std::io::Write;
    use std::path::Path;

    use formation_relative::{RelativeSample, RelativeTrajectory};
    use serde::Serialize;

    use super::{ExportError, writer_for_path};

    /// CSV row emitted by the trajectory exporter; field order is the header order.
    #[derive(Debug, Clone, Serialize)]
    pub struct Record {
        pub time_s: f64,
        pub pos_x_km: f64,
        pub pos_y_km: f64,
        pub pos_z_km: f64,
        pub vel_x_km_s: f64,
        pub vel_y_km_s: f64,
        pub vel_z_km_s: f64,
    }

    impl From<RelativeSample> for Record {
        fn from(sample: RelativeSample) -> Self {
            Self {
                time_s: sample.time_s,
                pos_x_km: sample.position[0],
                pos_y_km: sample.position[1],
                pos_z_km: sample.position[2],
                vel_x_km_s: sample.velocity[0],
                vel_y_km_s: sample.velocity[1],
                vel_z_km_s: sample.velocity[2],
            }
        }
    }

    /// Write samples as CSV with a header row. Returns the number of rows written.
    pub fn write_samples<W, I>(writer: W, samples: I) -> Result<usize, ExportError>
    where
        W: Write,
        I: IntoIterator<Item = RelativeSample>,
    {
        let mut csv_writer = csv::Writer::from_writer(writer);
        let mut rows = 0;
        for sample in samples {
            csv_writer.serialize(Record::from(sample))?;
            rows += 1;
        }
        if rows == 0 {
            csv_writer.write_record([
                "time_s",
                "pos_x_km",
                "pos_y_km",
                "pos_z_km",
                "vel_x_km_s",
                "vel_y_km_s",
                "vel_z_km_s",
            ])?;
        }
        csv_writer.flush()?;
        Ok(rows)
    }

    /// Write a whole trajectory as CSV.
    pub fn write_csv<W: Write>(
        writer: W,
        trajectory: &RelativeTrajectory,
    ) -> Result<usize, ExportError> {
        write_samples(writer, trajectory.samples())
    }

    /// Write a trajectory to `path` (`-` for stdout).
    pub fn write_csv_file(
        path: &Path,
        trajectory: &RelativeTrajectory,
    ) -> Result<usize, ExportError> {
        let writer = writer_for_path(path)?;
        write_csv(writer, trajectory)
    }
}

pub mod summary {
    use std::io::Write;
    use std::path::Path;

    use chrono::{SecondsFormat, Utc};
    use formation_relative::orbits::OrbitalElements;
    use formation_relative::{RelativeTrajectory, Schedule};
    use serde::Serialize;
    use serde_json::to_writer_pretty;

    use super::{ExportError, writer_for_path};

    /// Element set as exported, angles in degrees.
    #[derive(Debug, Clone, Serialize)]
    pub struct ElementsRecord {
        pub semi_major_axis_km: f64,
        pub eccentricity: f64,
        pub inclination_deg: f64,
        pub arg_perigee_deg: f64,
        pub raan_deg: f64,
        pub mean_anomaly_deg: f64,
    }

    impl From<&OrbitalElements> for ElementsRecord {
        fn from(elements: &OrbitalElements) -> Self {
            let (a, e, i, w, raan, m) = elements.to_degrees();
            Self {
                semi_major_axis_km: a,
                eccentricity: e,
                inclination_deg: i,
                arg_perigee_deg: w,
                raan_deg: raan,
                mean_anomaly_deg: m,
            }
        }
    }

    /// JSON sidecar describing one formation run.
    #[derive(Debug, Clone, Serialize)]
    pub struct RunSummary {
        pub generated_utc: String,
        pub duration_s: f64,
        pub timestep_s: f64,
        pub samples: usize,
        pub chief: ElementsRecord,
        pub deputy: ElementsRecord,
        /// Largest |radial|, |in-track|, |cross-track| separation (km).
        pub max_separation_km: [f64; 3],
    }

    impl RunSummary {
        /// Summarize a run, stamping the current UTC time.
        pub fn new(
            schedule: &Schedule,
            chief: &OrbitalElements,
            deputy: &OrbitalElements,
            trajectory: &RelativeTrajectory,
        ) -> Self {
            Self {
                generated_utc: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
                duration_s: schedule.duration_s,
                timestep_s: schedule.timestep_s,
                samples: trajectory.len(),
                chief: chief.into(),
                deputy: deputy.into(),
                max_separation_km: trajectory.position_extents(),
            }
        }
    }

    /// Write the summary as pretty JSON to `path` (`-` for stdout).
    pub fn write_summary(path: &Path, summary: &RunSummary) -> Result<(), ExportError> {
        let mut writer = writer_for_path(path)?;
        to_writer_pretty(&mut writer, summary)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}
