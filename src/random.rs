//! Seeded random number generation for the simulation engines.
//!
//! Each engine owns a [`StdRng`] for all of its draws. The rng for an
//! engine is derived from a base seed plus a hash of the engine's stream
//! name, so the grid and particle engines produce independent,
//! reproducible sequences even when they are constructed from the same
//! base seed. Callers that do not care about reproducibility seed from OS
//! entropy instead.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use xxhash_rust::xxh3::xxh3_64;

/// A convenience method to compute the hash of a `&str`.
pub fn hash_str(data: &str) -> u64 {
    xxh3_64(data.as_bytes())
}

/// Creates the rng for a named stream from a base seed. Streams with
/// different names yield independent sequences for the same base seed.
pub fn rng_for_stream(base_seed: u64, stream: &str) -> StdRng {
    StdRng::seed_from_u64(base_seed.wrapping_add(hash_str(stream)))
}

/// Draws a base seed from OS entropy, for callers that do not need a
/// reproducible run.
pub fn seed_from_entropy() -> u64 {
    StdRng::from_os_rng().next_u64()
}
