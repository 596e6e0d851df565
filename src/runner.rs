//! The headless runner: drives an engine for a number of days and records
//! the per-day status counts as a CSV report.
//!
//! This is the seam between the engines and an outside caller. Animation
//! front ends drive the engines directly through their `advance` and
//! query methods; the runner covers the non-interactive case (batch runs,
//! parameter sweeps) without any rendering at all.

use std::path::{Path, PathBuf};

use clap::{Args, Command, FromArgMatches as _, ValueEnum};
use log::info;

use crate::error::EpisimError;
use crate::grid::GridEngine;
use crate::log::{set_log_level, LevelFilter};
use crate::parameters::{load_params, Params};
use crate::particle::ParticleEngine;
use crate::report::ReportWriter;

/// Which engine a run drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EngineKind {
    Grid,
    Particles,
}

/// Default cli arguments for the episim runner
#[derive(Args, Debug)]
pub struct BaseArgs {
    /// Random seed
    #[arg(short, long, default_value = "0")]
    pub random_seed: u64,

    /// Optional path for a parameters config file
    #[arg(short, long, default_value = "")]
    pub config: String,

    /// Optional path for report output
    #[arg(short, long, default_value = "")]
    pub output_dir: String,

    /// Which engine to run
    #[arg(short, long, value_enum, default_value_t = EngineKind::Grid)]
    pub engine: EngineKind,

    /// Number of days to simulate
    #[arg(short, long, default_value = "365")]
    pub days: u64,

    /// Enable logging at the given level
    #[arg(short, long)]
    pub log_level: Option<LevelFilter>,
}

fn create_episim_cli() -> Command {
    let cli = Command::new("episim");
    BaseArgs::augment_args(cli)
}

/// Runs a simulation from command line arguments.
///
/// # Errors
///
/// Returns an error if argument parsing, parameter loading, or report
/// output fails.
pub fn run_with_args() -> Result<(), Box<dyn std::error::Error>> {
    let cli = create_episim_cli();
    let matches = cli.get_matches();
    let args = BaseArgs::from_arg_matches(&matches)?;
    run_with_args_internal(args)?;
    Ok(())
}

fn run_with_args_internal(args: BaseArgs) -> Result<(), EpisimError> {
    if let Some(level) = args.log_level {
        set_log_level(level);
    }

    let params = if args.config.is_empty() {
        Params::default()
    } else {
        info!("Loading parameters from: {}", args.config);
        load_params(Path::new(&args.config))?
    };

    // A seed in the parameters file wins over the command line default.
    let seed = params.random_seed.unwrap_or(args.random_seed);
    let output_dir = PathBuf::from(&args.output_dir);

    match args.engine {
        EngineKind::Grid => run_grid(&params, seed, args.days, &output_dir),
        EngineKind::Particles => run_particles(&params, seed, args.days, &output_dir),
    }
}

fn run_grid(params: &Params, seed: u64, days: u64, output_dir: &Path) -> Result<(), EpisimError> {
    let config = &params.grid;
    let mut engine = GridEngine::with_seed(config.engine.clone(), seed);
    engine.populate(config.population);
    engine.infect_randomly(config.cases);

    let mut report = ReportWriter::new(&output_dir.join("grid_status_counts.csv"))?;
    // Record the seeded state before the first day, as the plots do.
    report.write_counts(engine.day(), &engine.status_counts())?;
    for _ in 0..days {
        engine.advance();
        report.write_counts(engine.day(), &engine.status_counts())?;
    }
    info!("grid run complete after {days} days: {:?}", engine.status_counts());
    Ok(())
}

fn run_particles(
    params: &Params,
    seed: u64,
    days: u64,
    output_dir: &Path,
) -> Result<(), EpisimError> {
    let mut engine = ParticleEngine::with_seed(params.particles.clone(), seed);

    let mut report = ReportWriter::new(&output_dir.join("particle_status_counts.csv"))?;
    report.write_counts(engine.day(), &engine.status_counts())?;
    for _ in 0..days {
        engine.advance();
        report.write_counts(engine.day(), &engine.status_counts())?;
    }
    info!(
        "particle run complete after {days} days: {:?}",
        engine.status_counts()
    );
    Ok(())
}
