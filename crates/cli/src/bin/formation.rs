use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use formation_flight::config::{ScenarioConfig, load_scenario, save_scenario};
use formation_flight::export::summary::{RunSummary, write_summary};
use formation_flight::export::trajectory::write_csv_file;
use formation_flight::relative::run_scenario;
use log::info;

/// Design a chief/deputy formation and generate its Hill-frame relative trajectory.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Formation designer and relative trajectory generator",
    allow_negative_numbers = true
)]
struct Cli {
    /// Scenario file (TOML or YAML)
    #[arg(long, default_value = "configs/scenario.toml")]
    config: PathBuf,

    /// Propagation duration in seconds
    #[arg(long)]
    duration: Option<f64>,

    /// Propagation timestep in seconds
    #[arg(long)]
    timestep: Option<f64>,

    /// Chief semi-major axis in km
    #[arg(long)]
    sma: Option<f64>,

    /// Chief eccentricity
    #[arg(long)]
    ecc: Option<f64>,

    /// Chief inclination in degrees
    #[arg(long)]
    inc: Option<f64>,

    /// Chief argument of perigee in degrees
    #[arg(long)]
    aop: Option<f64>,

    /// Chief right ascension of the ascending node in degrees
    #[arg(long)]
    raan: Option<f64>,

    /// Chief mean anomaly in degrees
    #[arg(long)]
    mean_anomaly: Option<f64>,

    /// Radial amplitude in km (in-track follows at twice this unless given)
    #[arg(long)]
    radial: Option<f64>,

    /// In-track amplitude in km (radial follows at half this unless given)
    #[arg(long)]
    in_track: Option<f64>,

    /// In-track offset of the formation centre in km
    #[arg(long)]
    in_track_offset: Option<f64>,

    /// Cross-track amplitude in km
    #[arg(long)]
    cross_track: Option<f64>,

    /// Argument of relative pericenter in degrees
    #[arg(long)]
    relative_pericenter: Option<f64>,

    /// Argument of latitude crossing in degrees
    #[arg(long)]
    latitude_crossing: Option<f64>,

    /// Refuse schedules producing more samples than this (default 1000000)
    #[arg(long)]
    max_samples: Option<usize>,

    /// Write the relative trajectory as CSV (`-` for stdout)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write a JSON run summary
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Save the effective scenario (after overrides) to this path
    #[arg(long)]
    save_config: Option<PathBuf>,
}

impl Cli {
    fn apply_overrides(&self, config: &mut ScenarioConfig) {
        let set = |slot: &mut f64, value: Option<f64>| {
            if let Some(v) = value {
                *slot = v;
            }
        };
        set(&mut config.schedule.duration_s, self.duration);
        set(&mut config.schedule.timestep_s, self.timestep);
        set(&mut config.chief.semi_major_axis_km, self.sma);
        set(&mut config.chief.eccentricity, self.ecc);
        set(&mut config.chief.inclination_deg, self.inc);
        set(&mut config.chief.arg_perigee_deg, self.aop);
        set(&mut config.chief.raan_deg, self.raan);
        set(&mut config.chief.mean_anomaly_deg, self.mean_anomaly);
        set(&mut config.formation.in_track_offset_km, self.in_track_offset);
        set(&mut config.formation.cross_track_km, self.cross_track);
        set(
            &mut config.formation.relative_pericenter_deg,
            self.relative_pericenter,
        );
        set(
            &mut config.formation.latitude_crossing_deg,
            self.latitude_crossing,
        );

        match (self.radial, self.in_track) {
            (Some(radial), Some(in_track)) => {
                config.formation.radial_km = radial;
                config.formation.in_track_km = in_track;
            }
            (Some(radial), None) => {
                config.formation.radial_km = radial;
                config.formation.in_track_km = 2.0 * radial;
            }
            (None, Some(in_track)) => {
                config.formation.radial_km = 0.5 * in_track;
                config.formation.in_track_km = in_track;
            }
            (None, None) => {}
        }
    }
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let mut config = load_scenario(&cli.config)
        .with_context(|| format!("loading scenario {}", cli.config.display()))?;
    cli.apply_overrides(&mut config);

    if let Some(path) = &cli.save_config {
        config.validate()?;
        save_scenario(path, &config)
            .with_context(|| format!("saving scenario {}", path.display()))?;
        info!("scenario saved to {}", path.display());
    }

    let mut scenario = config.to_scenario()?;
    if cli.max_samples.is_some() {
        scenario.max_samples = cli.max_samples;
    }
    let solution = run_scenario(&scenario)?;

    let (a, e, i, w, raan, m) = solution.deputy_degrees();
    let extents = solution.trajectory.position_extents();
    // Keep stdout clean when the CSV itself goes there.
    let to_stdout = cli.csv.as_deref() == Some(std::path::Path::new("-"));
    if !to_stdout {
        println!("=== Deputy Orbit ===");
        println!("Semi-major axis : {a:.3} km");
        println!("Eccentricity    : {e:.6}");
        println!("Inclination     : {i:.4} deg");
        println!("Arg. of perigee : {w:.4} deg");
        println!("Right ascension : {raan:.4} deg");
        println!("Mean anomaly    : {m:.4} deg");
        println!("=== Relative Trajectory ===");
        println!("Samples         : {}", solution.trajectory.len());
        println!(
            "Max separation  : radial {:.3} km, in-track {:.3} km, cross-track {:.3} km",
            extents[0], extents[1], extents[2]
        );
    }

    if let Some(path) = &cli.csv {
        let rows = write_csv_file(path, &solution.trajectory)
            .with_context(|| format!("writing CSV {}", path.display()))?;
        info!("wrote {rows} rows to {}", path.display());
    }

    if let Some(path) = &cli.summary {
        let summary = RunSummary::new(
            &scenario.schedule,
            &scenario.chief,
            &solution.deputy,
            &solution.trajectory,
        );
        write_summary(path, &summary)
            .with_context(|| format!("writing summary {}", path.display()))?;
        info!("summary written to {}", path.display());
    }

    Ok(())
}
