//! Simulation engines for modeling the spread of an infectious disease
//!
//! Episim models an epidemic moving through a population with two
//! independent engines that share a common lifecycle for an individual
//! (susceptible, then infected, then recovered or dead):
//!
//! * The [`grid`](crate::grid) engine is a cellular automaton. Individuals
//!   occupy cells of a 2-D lattice and infection spreads by spatial
//!   adjacency, with population-wide lockdown and healthcare-capacity
//!   policies modulating the transition probabilities.
//! * The [`particle`](crate::particle) engine is a continuous contact
//!   model. Individuals are moving circular bodies in a bounded plane and
//!   infection spreads by physical collision, with aging, a stochastic
//!   illness duration, and vaccination.
//!
//! The engines are driven one step at a time by an external caller (an
//! animation loop, a plotting script, or the headless
//! [`runner`](crate::runner)) and expose two kinds of read-only queries:
//! a per-step summary counting individuals in each status, and a
//! renderable snapshot (an RGB buffer for the grid, a position/radius/
//! style list for the particles). Figure setup, animation, and video
//! export are entirely the business of the caller.
//!
//! Supporting modules provide the surrounding services:
//! * [`parameters`](crate::parameters) loads run parameters from JSON.
//! * [`report`](crate::report) records per-step status counts as CSV.
//! * [`random`](crate::random) derives independent seeded RNG streams.
//! * [`log`](crate::log) configures the crate's logging output.
pub mod error;
pub mod grid;
pub mod log;
pub mod parameters;
pub mod particle;
pub mod random;
pub mod report;
pub mod runner;

pub use error::EpisimError;
