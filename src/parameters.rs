//! Run parameters for the two engines, loadable from a JSON file.
//!
//! A parameters file is optional; any field left out falls back to the
//! defaults below, so a file needs to mention only what it overrides:
//!
//! ```json
//! {
//!     "random_seed": 123,
//!     "grid": { "width": 50, "height": 50, "population": 1500 },
//!     "particles": { "population": 100, "cases": 2 }
//! }
//! ```

use std::fs::File;
use std::path::Path;

use serde_derive::{Deserialize, Serialize};

use crate::error::EpisimError;
use crate::grid::GridParams;
use crate::particle::ParticleParams;

/// Grid engine construction parameters plus the seeding counts the runner
/// applies before the first day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridRunParams {
    #[serde(flatten)]
    pub engine: GridParams,
    /// Individuals placed by `populate` before the run.
    pub population: usize,
    /// Initial infections seeded by `infect_randomly`.
    pub cases: usize,
}

impl Default for GridRunParams {
    fn default() -> Self {
        GridRunParams {
            engine: GridParams::default(),
            population: 6000,
            cases: 2,
        }
    }
}

/// Everything a run needs: an optional seed override and the per-engine
/// parameter blocks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// When set, takes precedence over the runner's `--random-seed`.
    pub random_seed: Option<u64>,
    pub grid: GridRunParams,
    pub particles: ParticleParams,
}

/// Loads parameters from a JSON file.
///
/// # Errors
///
/// Returns an `EpisimError` if the file cannot be opened or parsed.
pub fn load_params(path: &Path) -> Result<Params, EpisimError> {
    let config_file = File::open(path)?;
    let params: Params = serde_json::from_reader(config_file)?;
    Ok(params)
}
