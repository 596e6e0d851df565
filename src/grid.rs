//! The grid engine: a cellular automaton in which infection spreads by
//! spatial adjacency.
//!
//! Individuals occupy cells of a W×H lattice and carry one of five
//! statuses. Each day every cell's next status is computed from a snapshot
//! of the current lattice, so a transition never observes another cell's
//! already-updated status within the same day. Two population-wide
//! policies modulate the run: free movement (a full shuffle of the
//! lattice) is suppressed once the infected count reaches the lockdown
//! threshold, and the infection/death probabilities are replaced by
//! elevated values while the infected count exceeds the healthcare
//! capacity.

use std::collections::HashMap;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::seq::{index, SliceRandom};
use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

use crate::random::{rng_for_stream, seed_from_entropy};

/// The status of a single cell of the lattice. `Space` marks an unoccupied
/// cell and never transitions; occupancy is fixed once the grid is
/// populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum CellStatus {
    Space,
    Susceptible,
    Infected,
    Recovered,
    Dead,
}

impl CellStatus {
    /// The status name used in count queries and reports.
    pub fn name(self) -> &'static str {
        match self {
            CellStatus::Space => "space",
            CellStatus::Susceptible => "susceptible",
            CellStatus::Infected => "infected",
            CellStatus::Recovered => "recovered",
            CellStatus::Dead => "dead",
        }
    }

    /// The colour name a renderer should use for this status.
    pub fn colour(self) -> &'static str {
        match self {
            CellStatus::Space => "gray",
            CellStatus::Susceptible => "green",
            CellStatus::Infected => "red",
            CellStatus::Recovered => "blue",
            CellStatus::Dead => "black",
        }
    }
}

/// RGB values for the colour names produced by [`CellStatus::colour`].
fn colour_rgb(name: &str) -> [u8; 3] {
    match name {
        "gray" => [211, 211, 211],
        "red" => [255, 0, 0],
        "green" => [0, 255, 0],
        "blue" => [0, 0, 255],
        _ => [0, 0, 0],
    }
}

/// Construction parameters for the grid engine. Immutable for the length
/// of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridParams {
    pub width: usize,
    pub height: usize,
    /// Probability that an infected cell recovers on a given day.
    pub recovery_probability: f64,
    /// Probability of infection per infected neighbour per day.
    pub infection_probability: f64,
    /// Probability that an infected cell dies on a given day.
    pub death_probability: f64,
    /// Number of simultaneous cases hospitals can absorb. Zero means
    /// unlimited capacity.
    pub healthcare_capacity: usize,
    /// Infected count that suppresses free movement. Zero disables
    /// lockdown entirely.
    pub lockdown_threshold: usize,
    /// Infection probability applied while healthcare is overwhelmed.
    pub infection_probability_overwhelmed: f64,
    /// Death probability applied while healthcare is overwhelmed. When
    /// zero, capacity-driven probability switching is disabled entirely.
    pub death_probability_overwhelmed: f64,
}

impl Default for GridParams {
    fn default() -> Self {
        GridParams {
            width: 100,
            height: 100,
            recovery_probability: 0.02,
            infection_probability: 0.03,
            death_probability: 0.002,
            healthcare_capacity: 2000,
            lockdown_threshold: 600,
            infection_probability_overwhelmed: 0.05,
            death_probability_overwhelmed: 0.005,
        }
    }
}

/// The cellular automaton itself: a lattice of [`CellStatus`] values, a
/// day counter, and the currently active transition probabilities.
pub struct GridEngine {
    params: GridParams,
    /// `width` rows of `height` cells each.
    cells: Vec<Vec<CellStatus>>,
    day: u64,
    /// Active infection probability; switches between the baseline and
    /// overwhelmed values with healthcare load.
    infection_probability: f64,
    /// Active death probability, switching as above.
    death_probability: f64,
    rng: StdRng,
}

impl GridEngine {
    /// Creates an empty grid seeded from OS entropy.
    pub fn new(params: GridParams) -> Self {
        Self::with_seed(params, seed_from_entropy())
    }

    /// Creates an empty grid with a reproducible rng stream.
    pub fn with_seed(params: GridParams, base_seed: u64) -> Self {
        let cells = vec![vec![CellStatus::Space; params.height]; params.width];
        GridEngine {
            infection_probability: params.infection_probability,
            death_probability: params.death_probability,
            rng: rng_for_stream(base_seed, "grid"),
            cells,
            day: 0,
            params,
        }
    }

    /// Places `num` individuals at distinct random cells, marking them
    /// susceptible.
    ///
    /// Callers must ensure `num` does not exceed the number of free cells;
    /// this loops forever otherwise.
    pub fn populate(&mut self, num: usize) {
        let mut placed = 0;
        while placed < num {
            let i = self.rng.random_range(0..self.params.width);
            let j = self.rng.random_range(0..self.params.height);
            if self.cells[i][j] == CellStatus::Space {
                self.cells[i][j] = CellStatus::Susceptible;
                placed += 1;
            }
        }
        debug!("populated grid with {num} individuals");
    }

    /// Marks `num` cells infected: one in each of `num` distinct rows, at
    /// a column drawn (with replacement across rows) from `0..num`.
    ///
    /// The chosen cells are infected regardless of their prior status, so
    /// seeding can land on an unoccupied or dead cell; callers that care
    /// should populate densely enough to make this unlikely.
    pub fn infect_randomly(&mut self, num: usize) {
        let rows = index::sample(&mut self.rng, self.params.width, num);
        for i in rows {
            let j = self.rng.random_range(0..num);
            self.cells[i][j] = CellStatus::Infected;
        }
        debug!("seeded {num} infections");
    }

    /// Overwrites the status of a single cell. Seeding hook for drivers
    /// and tests that need a deterministic starting state.
    pub fn set_status(&mut self, i: usize, j: usize, status: CellStatus) {
        self.cells[i][j] = status;
    }

    /// Advances the simulation by one day.
    pub fn advance(&mut self) {
        // Compute every transition from a snapshot of the old state so
        // that e.g. a cell recovering today still infects its neighbours
        // today.
        let old = self.cells.clone();
        for i in 0..self.params.width {
            for j in 0..self.params.height {
                let status = self.next_status(&old, i, j);
                self.cells[i][j] = status;
            }
        }

        let infected = self.count_status(CellStatus::Infected);

        // Free movement while cases stay below the lockdown threshold; a
        // threshold of zero means no lockdown ever takes effect. Must run
        // before the capacity check.
        if infected < self.params.lockdown_threshold || self.params.lockdown_threshold == 0 {
            for row in &mut self.cells {
                row.shuffle(&mut self.rng);
            }
            self.cells.shuffle(&mut self.rng);
        } else {
            trace!("day {}: lockdown active ({infected} cases)", self.day);
        }

        // Switch probabilities with healthcare load. The switch is only
        // live when an overwhelmed death probability was configured.
        if self.params.death_probability_overwhelmed != 0.0 {
            if self.params.healthcare_capacity != 0 && infected > self.params.healthcare_capacity {
                if self.death_probability != self.params.death_probability_overwhelmed {
                    debug!("day {}: healthcare capacity exceeded ({infected} cases)", self.day);
                }
                self.infection_probability = self.params.infection_probability_overwhelmed;
                self.death_probability = self.params.death_probability_overwhelmed;
            }
            if infected < self.params.healthcare_capacity || self.params.healthcare_capacity == 0 {
                self.infection_probability = self.params.infection_probability;
                self.death_probability = self.params.death_probability;
            }
        }

        self.day += 1;
    }

    fn next_status(&mut self, old: &[Vec<CellStatus>], i: usize, j: usize) -> CellStatus {
        let status = old[i][j];
        match status {
            CellStatus::Infected => {
                // Recovery is checked before death; at most one of the two
                // applies per day.
                if self.params.recovery_probability > self.rng.random::<f64>() {
                    return CellStatus::Recovered;
                }
                if self.death_probability > self.rng.random::<f64>() {
                    return CellStatus::Dead;
                }
            }
            CellStatus::Susceptible => {
                let around = infected_neighbours(old, i, j);
                #[allow(clippy::cast_precision_loss)]
                if around as f64 * self.infection_probability > self.rng.random::<f64>() {
                    return CellStatus::Infected;
                }
            }
            // Space, recovered and dead cells never transition.
            _ => {}
        }
        status
    }

    /// The current day, incremented once per [`advance`](Self::advance).
    pub fn day(&self) -> u64 {
        self.day
    }

    /// The number of cells currently in `status`.
    pub fn count_status(&self, status: CellStatus) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell == status)
            .count()
    }

    /// The number of occupied (non-space) cells. Constant across a run.
    pub fn occupied(&self) -> usize {
        self.params.width * self.params.height - self.count_status(CellStatus::Space)
    }

    /// Status-count summary with one entry per status, including zeroes.
    pub fn status_counts(&self) -> HashMap<&'static str, usize> {
        let mut counts: HashMap<&'static str, usize> =
            CellStatus::iter().map(|status| (status.name(), 0)).collect();
        for cell in self.cells.iter().flatten() {
            *counts.entry(cell.name()).or_insert(0) += 1;
        }
        counts
    }

    /// An RGB buffer representing the lattice, via the fixed
    /// status → colour-name → RGB lookup. Suitable for an image renderer.
    pub fn rgb_matrix(&self) -> Vec<Vec<[u8; 3]>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|cell| colour_rgb(cell.colour())).collect())
            .collect()
    }

    /// The currently active infection probability.
    pub fn infection_probability(&self) -> f64 {
        self.infection_probability
    }

    /// The currently active death probability.
    pub fn death_probability(&self) -> f64 {
        self.death_probability
    }
}

/// Counts infected cells in the Moore neighbourhood of `(i, j)`, clipped
/// at the lattice edges, self excluded.
fn infected_neighbours(cells: &[Vec<CellStatus>], i: usize, j: usize) -> usize {
    let imax = cells.len();
    let jmax = cells[0].len();
    let mut number = 0;
    for ip in i.saturating_sub(1)..(i + 2).min(imax) {
        for jp in j.saturating_sub(1)..(j + 2).min(jmax) {
            if (ip, jp) != (i, j) && cells[ip][jp] == CellStatus::Infected {
                number += 1;
            }
        }
    }
    number
}
