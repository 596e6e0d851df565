//! The particle engine: a continuous contact model in which infection
//! spreads by physical collision.
//!
//! Individuals are circular bodies moving in the square arena
//! `[0, 2] × [0, 2]`. Each step every body advances along its velocity,
//! bounces off the walls, and resolves overlaps with other bodies as
//! elastic collisions. Contact between an infected and a susceptible body
//! transmits the infection; infected bodies resolve to recovered or dead
//! after a stochastic illness duration; once the warm-up period has
//! passed, eligible bodies may be vaccinated, which blocks transmission in
//! both directions.

use std::collections::HashMap;
use std::f64::consts::TAU;
use std::ops::{Add, Mul, Sub};

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::random::{rng_for_stream, seed_from_entropy};

/// Extent of the square arena; bodies are confined to `[0, BOX_SIZE]` on
/// both axes.
pub const BOX_SIZE: f64 = 2.0;

/// First day on which vaccination is considered.
const VACCINATION_START_DAY: u64 = 50;
/// Vaccine acceptance rate for bodies aged 50 and over.
const ACCEPTANCE_OVER_50: f64 = 0.85;
/// Vaccine acceptance rate for bodies aged 10 to 49.
const ACCEPTANCE_UNDER_50: f64 = 0.15;

/// The five display categories, in legend order.
pub const STATUS_NAMES: [&str; 5] = ["non-infected", "infected", "recovered", "dead", "vaccinated"];

/// A 2-D vector; used for both positions and velocities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn norm(self) -> f64 {
        self.dot(self).sqrt()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, other: Vec2) -> Vec2 {
        Vec2 {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, other: Vec2) -> Vec2 {
        Vec2 {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, factor: f64) -> Vec2 {
        Vec2 {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

/// A body's disease status. Exactly one variant applies at any time, so a
/// body can never appear in two categories at once. `since` records the
/// day the infection was acquired.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum HealthStatus {
    NonInfected,
    Infected { since: u64 },
    Recovered,
    Dead,
    Vaccinated,
}

impl HealthStatus {
    /// The display-category name used in count queries and reports.
    pub fn name(&self) -> &'static str {
        match self {
            HealthStatus::NonInfected => "non-infected",
            HealthStatus::Infected { .. } => "infected",
            HealthStatus::Recovered => "recovered",
            HealthStatus::Dead => "dead",
            HealthStatus::Vaccinated => "vaccinated",
        }
    }

    /// The colour a renderer should use for this category's line in the
    /// summary plot.
    pub fn colour(&self) -> &'static str {
        match self {
            HealthStatus::NonInfected => "blue",
            HealthStatus::Infected { .. } => "red",
            HealthStatus::Recovered => "green",
            HealthStatus::Dead => "black",
            HealthStatus::Vaccinated => "purple",
        }
    }

    /// Circle styling for the body renderer. Derived from the status so
    /// the two can never disagree.
    pub fn style(&self) -> BodyStyle {
        let edgecolor = match self {
            HealthStatus::NonInfected => "C0",
            HealthStatus::Infected { .. } => "C3",
            HealthStatus::Recovered => "C2",
            HealthStatus::Dead => "0",
            HealthStatus::Vaccinated => "C4",
        };
        BodyStyle {
            edgecolor,
            linewidth: 2.0,
            fill: true,
        }
    }

    pub fn is_infected(&self) -> bool {
        matches!(self, HealthStatus::Infected { .. })
    }
}

/// How a renderer should draw one body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodyStyle {
    pub edgecolor: &'static str,
    pub linewidth: f64,
    pub fill: bool,
}

/// One individual: a circle with a velocity, an age and a disease status.
#[derive(Debug, Clone)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f64,
    pub age: u8,
    pub status: HealthStatus,
}

impl Body {
    /// Does this body's circle overlap that of `other`?
    pub fn overlaps(&self, other: &Body) -> bool {
        (self.position - other.position).norm() < self.radius + other.radius
    }

    /// Advances the body's position by `dt`, reflecting the velocity and
    /// clamping the position on wall contact, each axis independently.
    fn advance(&mut self, dt: f64) {
        self.position = self.position + self.velocity * dt;

        if self.position.x - self.radius < 0.0 {
            self.position.x = self.radius;
            self.velocity.x = -self.velocity.x;
        }
        if self.position.x + self.radius > BOX_SIZE {
            self.position.x = BOX_SIZE - self.radius;
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y - self.radius < 0.0 {
            self.position.y = self.radius;
            self.velocity.y = -self.velocity.y;
        }
        if self.position.y + self.radius > BOX_SIZE {
            self.position.y = BOX_SIZE - self.radius;
            self.velocity.y = -self.velocity.y;
        }
    }
}

/// Body radius configuration: one radius for the whole population, or one
/// per body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Radius {
    Uniform(f64),
    PerBody(Vec<f64>),
}

impl Radius {
    fn per_body(&self, population: usize) -> Vec<f64> {
        match self {
            Radius::Uniform(radius) => vec![*radius; population],
            Radius::PerBody(radii) => {
                assert_eq!(radii.len(), population, "one radius per body required");
                radii.clone()
            }
        }
    }
}

/// The age bands of the population, with their illness durations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeGroup {
    /// Ages 0 to 19.
    #[default]
    Child,
    /// Ages 20 to 29.
    Twenties,
    /// Ages 30 to 39.
    Thirties,
    /// Ages 40 to 49.
    Forties,
    /// Ages 50 to 100.
    Senior,
}

impl AgeGroup {
    /// Days an infected body of this band stays ill before resolving to
    /// recovered or dead.
    pub fn illness_duration(self) -> u64 {
        match self {
            AgeGroup::Child | AgeGroup::Twenties | AgeGroup::Thirties => 14,
            AgeGroup::Forties => 16,
            AgeGroup::Senior => 19,
        }
    }

    /// The band a body of the given age belongs to.
    pub fn from_age(age: u8) -> Self {
        match age {
            0..=19 => AgeGroup::Child,
            20..=29 => AgeGroup::Twenties,
            30..=39 => AgeGroup::Thirties,
            40..=49 => AgeGroup::Forties,
            _ => AgeGroup::Senior,
        }
    }
}

/// Construction parameters for the particle engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleParams {
    /// Total number of bodies.
    pub population: usize,
    /// Body radius, shared or per body.
    pub radius: Radius,
    /// Number of bodies infected at construction.
    pub cases: usize,
    /// Age band whose illness duration applies to every body. Ignored
    /// when `corrected_aging` is set.
    pub age_group: AgeGroup,
    /// Percent chance per step that an eligible body is offered the
    /// vaccine (before the age-dependent acceptance gate).
    pub vaccination_rate: f64,
    /// Time step for position updates.
    pub dt: f64,
    /// By default every body's age is redrawn on every step and illness
    /// duration comes from the single configured age band. Setting this
    /// assigns ages once at construction and uses each body's own band
    /// instead.
    pub corrected_aging: bool,
}

impl Default for ParticleParams {
    fn default() -> Self {
        ParticleParams {
            population: 200,
            radius: Radius::Uniform(0.01),
            cases: 4,
            age_group: AgeGroup::Child,
            vaccination_rate: 1.0,
            dt: 0.01,
            corrected_aging: false,
        }
    }
}

/// The contact model itself: a set of bodies, a day counter, and the rng
/// driving every stochastic process.
pub struct ParticleEngine {
    params: ParticleParams,
    bodies: Vec<Body>,
    day: u64,
    rng: StdRng,
}

impl ParticleEngine {
    /// Places the population seeded from OS entropy.
    pub fn new(params: ParticleParams) -> Self {
        Self::with_seed(params, seed_from_entropy())
    }

    /// Places the population with a reproducible rng stream. Positions are
    /// rejection-sampled so no two bodies start overlapping; every body
    /// gets unit speed at a uniformly random heading. The first `cases`
    /// bodies are infected from day zero.
    pub fn with_seed(params: ParticleParams, base_seed: u64) -> Self {
        let mut rng = rng_for_stream(base_seed, "particles");
        let radii = params.radius.per_body(params.population);
        let mut bodies: Vec<Body> = Vec::with_capacity(params.population);
        for (index, radius) in radii.into_iter().enumerate() {
            loop {
                let position = Vec2 {
                    x: rng.random_range(0.0..BOX_SIZE),
                    y: rng.random_range(0.0..BOX_SIZE),
                };
                let heading = rng.random_range(0.0..TAU);
                let velocity = Vec2 {
                    x: heading.cos(),
                    y: heading.sin(),
                };
                let status = if index < params.cases {
                    HealthStatus::Infected { since: 0 }
                } else {
                    HealthStatus::NonInfected
                };
                let candidate = Body {
                    position,
                    velocity,
                    radius,
                    age: initial_age(&mut rng),
                    status,
                };
                if bodies.iter().all(|other| !other.overlaps(&candidate)) {
                    bodies.push(candidate);
                    break;
                }
            }
        }
        debug!(
            "placed {} bodies ({} initially infected)",
            bodies.len(),
            params.cases
        );
        ParticleEngine {
            params,
            bodies,
            day: 0,
            rng,
        }
    }

    /// Builds an engine from pre-placed bodies, bypassing rejection
    /// sampling. Placement override for drivers and tests that need a
    /// deterministic starting state.
    pub fn with_bodies(params: ParticleParams, bodies: Vec<Body>, base_seed: u64) -> Self {
        ParticleEngine {
            rng: rng_for_stream(base_seed, "particles"),
            params,
            bodies,
            day: 0,
        }
    }

    /// Advances the simulation by one step.
    pub fn advance(&mut self) {
        let dt = self.params.dt;
        for body in &mut self.bodies {
            body.advance(dt);
        }
        self.resolve_contacts();
        self.resolve_illnesses();
        self.assign_ages();
        self.vaccinate();
        self.day += 1;
    }

    /// Resolves every overlapping pair once: an elastic collision, then
    /// possible transmission. Positions are fixed for the whole pass, so
    /// the set of overlapping pairs does not depend on iteration order.
    fn resolve_contacts(&mut self) {
        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                if !self.bodies[i].overlaps(&self.bodies[j]) {
                    continue;
                }
                self.collide(i, j);
                self.transmit(i, j);
            }
        }
    }

    /// Two-body elastic collision along the line connecting the centers,
    /// with masses proportional to radius squared.
    fn collide(&mut self, i: usize, j: usize) {
        let (r1, v1, rad1) = {
            let body = &self.bodies[i];
            (body.position, body.velocity, body.radius)
        };
        let (r2, v2, rad2) = {
            let body = &self.bodies[j];
            (body.position, body.velocity, body.radius)
        };

        let m1 = rad1 * rad1;
        let m2 = rad2 * rad2;
        let total = m1 + m2;
        let d = (r1 - r2).dot(r1 - r2);

        let u1 = v1 - (r1 - r2) * (2.0 * m2 / total * (v1 - v2).dot(r1 - r2) / d);
        let u2 = v2 - (r2 - r1) * (2.0 * m1 / total * (v2 - v1).dot(r2 - r1) / d);
        self.bodies[i].velocity = u1;
        self.bodies[j].velocity = u2;
    }

    /// Propagates infection across an overlapping pair. Pairs with a
    /// vaccinated member never transmit; otherwise, when exactly one
    /// member is infected and the other is still susceptible, the other
    /// becomes infected.
    fn transmit(&mut self, i: usize, j: usize) {
        let a = self.bodies[i].status;
        let b = self.bodies[j].status;
        if matches!(a, HealthStatus::Vaccinated) || matches!(b, HealthStatus::Vaccinated) {
            return;
        }
        match (a.is_infected(), b.is_infected()) {
            (true, false) => self.expose(j),
            (false, true) => self.expose(i),
            _ => {}
        }
    }

    fn expose(&mut self, index: usize) {
        let day = self.day;
        let body = &mut self.bodies[index];
        if matches!(body.status, HealthStatus::NonInfected) {
            body.status = HealthStatus::Infected { since: day };
            trace!("day {day}: body {index} infected by contact");
        }
    }

    /// Retires bodies whose illness has run its course: a 1-in-10 chance
    /// of death, recovery otherwise. Both outcomes are absorbing.
    fn resolve_illnesses(&mut self) {
        let day = self.day;
        let corrected = self.params.corrected_aging;
        let group = self.params.age_group;
        let rng = &mut self.rng;
        for (index, body) in self.bodies.iter_mut().enumerate() {
            let HealthStatus::Infected { since } = body.status else {
                continue;
            };
            let duration = if corrected {
                AgeGroup::from_age(body.age).illness_duration()
            } else {
                group.illness_duration()
            };
            if day - since > duration {
                if rng.random_range(1..=10) == 1 {
                    body.status = HealthStatus::Dead;
                    debug!("day {day}: body {index} died after {} days", day - since);
                } else {
                    body.status = HealthStatus::Recovered;
                    trace!("day {day}: body {index} recovered");
                }
            }
        }
    }

    /// Redraws every body's age from the three-band distribution. Runs on
    /// every step; in corrected mode ages are fixed at construction
    /// instead.
    fn assign_ages(&mut self) {
        if self.params.corrected_aging {
            return;
        }
        let rng = &mut self.rng;
        for body in &mut self.bodies {
            if let Some(age) = draw_age(rng) {
                body.age = age;
            }
        }
    }

    /// Offers the vaccine to every susceptible body once the warm-up
    /// period has passed, gated by the age-dependent acceptance rates.
    /// Bodies under 10 are never vaccinated.
    fn vaccinate(&mut self) {
        if self.day <= VACCINATION_START_DAY {
            return;
        }
        let rate = self.params.vaccination_rate / 100.0;
        let day = self.day;
        let rng = &mut self.rng;
        for (index, body) in self.bodies.iter_mut().enumerate() {
            if !matches!(body.status, HealthStatus::NonInfected) {
                continue;
            }
            if rng.random::<f64>() >= rate {
                continue;
            }
            let accepted = if body.age >= 50 {
                rng.random_bool(ACCEPTANCE_OVER_50)
            } else if body.age >= 10 {
                rng.random_bool(ACCEPTANCE_UNDER_50)
            } else {
                false
            };
            if accepted {
                body.status = HealthStatus::Vaccinated;
                trace!("day {day}: body {index} vaccinated at age {}", body.age);
            }
        }
    }

    /// The current day, incremented once per [`advance`](Self::advance).
    pub fn day(&self) -> u64 {
        self.day
    }

    /// The bodies themselves, for callers that need more than the
    /// renderable snapshot.
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Status-count summary across the five exclusive display categories,
    /// with one entry per category including zeroes.
    pub fn status_counts(&self) -> HashMap<&'static str, usize> {
        let mut counts: HashMap<&'static str, usize> =
            STATUS_NAMES.iter().map(|&name| (name, 0)).collect();
        for body in &self.bodies {
            *counts.entry(body.status.name()).or_insert(0) += 1;
        }
        counts
    }

    /// Renderable snapshot: position, radius and style of every body.
    pub fn snapshot(&self) -> Vec<(Vec2, f64, BodyStyle)> {
        self.bodies
            .iter()
            .map(|body| (body.position, body.radius, body.status.style()))
            .collect()
    }
}

/// One draw from the three-band age distribution: a percentile draw picks
/// the band, then the age is uniform within it. A percentile of exactly 82
/// falls between the adult and elder bands and leaves the current age in
/// place.
fn draw_age(rng: &mut StdRng) -> Option<u8> {
    let draw: u8 = rng.random_range(0..=100);
    if draw < 19 {
        Some(rng.random_range(0..=16))
    } else if draw < 82 {
        Some(rng.random_range(16..=65))
    } else if draw > 82 {
        Some(rng.random_range(65..=100))
    } else {
        None
    }
}

/// Redraws until a band hits, so every body starts with an age.
fn initial_age(rng: &mut StdRng) -> u8 {
    loop {
        if let Some(age) = draw_age(rng) {
            return age;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    const SEED: u64 = 42;

    fn still_body(x: f64, y: f64, status: HealthStatus) -> Body {
        Body {
            position: Vec2 { x, y },
            velocity: Vec2 { x: 0.0, y: 0.0 },
            radius: 0.01,
            age: 30,
            status,
        }
    }

    fn contact_params() -> ParticleParams {
        ParticleParams {
            population: 2,
            dt: 0.0,
            ..ParticleParams::default()
        }
    }

    #[test]
    fn seeding_places_bodies_without_overlap() {
        let params = ParticleParams {
            population: 30,
            radius: Radius::Uniform(0.05),
            cases: 3,
            ..ParticleParams::default()
        };
        let engine = ParticleEngine::with_seed(params, SEED);
        let bodies = engine.bodies();
        assert_eq!(bodies.len(), 30);
        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                assert!(!bodies[i].overlaps(&bodies[j]), "bodies {i} and {j} overlap");
            }
        }
    }

    #[test]
    fn first_cases_are_infected_from_day_zero() {
        let engine = ParticleEngine::with_seed(ParticleParams::default(), SEED);
        for (index, body) in engine.bodies().iter().enumerate() {
            if index < 4 {
                assert_eq!(body.status, HealthStatus::Infected { since: 0 });
            } else {
                assert_eq!(body.status, HealthStatus::NonInfected);
            }
        }
        // Unit speed regardless of heading.
        for body in engine.bodies() {
            assert_approx_eq!(body.velocity.norm(), 1.0, 1e-12);
        }
    }

    #[test]
    fn contact_infects_susceptible_then_resolves() {
        let bodies = vec![
            still_body(1.0, 1.0, HealthStatus::Infected { since: 0 }),
            still_body(1.005, 1.0, HealthStatus::NonInfected),
        ];
        let mut engine = ParticleEngine::with_bodies(contact_params(), bodies, SEED);

        engine.advance();
        assert_eq!(engine.bodies()[1].status, HealthStatus::Infected { since: 0 });

        // The illness duration for the default band is 14 days; by day 20
        // both bodies must have resolved, each to exactly one of
        // recovered or dead.
        for _ in 0..20 {
            engine.advance();
        }
        for body in engine.bodies() {
            assert!(
                matches!(body.status, HealthStatus::Recovered | HealthStatus::Dead),
                "unresolved status {:?}",
                body.status
            );
        }
    }

    #[test]
    fn recovered_bodies_are_never_reinfected() {
        let bodies = vec![
            still_body(1.0, 1.0, HealthStatus::Infected { since: 0 }),
            still_body(1.005, 1.0, HealthStatus::Recovered),
        ];
        let mut engine = ParticleEngine::with_bodies(contact_params(), bodies, SEED);
        for _ in 0..10 {
            engine.advance();
            assert_eq!(engine.bodies()[1].status, HealthStatus::Recovered);
        }
    }

    #[test]
    fn vaccinated_bodies_neither_acquire_nor_transmit() {
        let bodies = vec![
            still_body(1.0, 1.0, HealthStatus::Infected { since: 0 }),
            still_body(1.005, 1.0, HealthStatus::Vaccinated),
            still_body(0.5, 0.5, HealthStatus::Vaccinated),
            still_body(0.505, 0.5, HealthStatus::NonInfected),
        ];
        let mut engine = ParticleEngine::with_bodies(contact_params(), bodies, SEED);
        for _ in 0..10 {
            engine.advance();
            assert_eq!(engine.bodies()[1].status, HealthStatus::Vaccinated);
            assert_eq!(engine.bodies()[3].status, HealthStatus::NonInfected);
        }
    }

    #[test]
    fn elastic_collision_conserves_momentum_and_energy() {
        let mut first = still_body(1.0, 1.0, HealthStatus::NonInfected);
        first.radius = 0.1;
        first.velocity = Vec2 { x: 0.8, y: -0.2 };
        let mut second = still_body(1.05, 1.02, HealthStatus::NonInfected);
        second.radius = 0.07;
        second.velocity = Vec2 { x: -0.5, y: 0.3 };
        assert!(first.overlaps(&second));

        let m1 = first.radius * first.radius;
        let m2 = second.radius * second.radius;
        let momentum_before = first.velocity * m1 + second.velocity * m2;
        let energy_before =
            m1 * first.velocity.dot(first.velocity) + m2 * second.velocity.dot(second.velocity);

        let mut engine =
            ParticleEngine::with_bodies(contact_params(), vec![first, second], SEED);
        engine.advance();

        let (v1, v2) = (engine.bodies()[0].velocity, engine.bodies()[1].velocity);
        let momentum_after = v1 * m1 + v2 * m2;
        let energy_after = m1 * v1.dot(v1) + m2 * v2.dot(v2);

        assert_approx_eq!(momentum_before.x, momentum_after.x, 1e-12);
        assert_approx_eq!(momentum_before.y, momentum_after.y, 1e-12);
        assert_approx_eq!(energy_before, energy_after, 1e-12);
        // The collision actually did something.
        assert_ne!(v1, Vec2 { x: 0.8, y: -0.2 });
    }

    #[test]
    fn walls_reflect_velocity_and_clamp_position() {
        let mut body = still_body(0.005, 1.0, HealthStatus::NonInfected);
        body.velocity = Vec2 { x: -1.0, y: 0.0 };
        let params = ParticleParams {
            population: 1,
            dt: 0.01,
            ..ParticleParams::default()
        };
        let mut engine = ParticleEngine::with_bodies(params, vec![body], SEED);
        engine.advance();

        let body = &engine.bodies()[0];
        assert_approx_eq!(body.position.x, body.radius, 1e-12);
        assert_approx_eq!(body.velocity.x, 1.0, 1e-12);
        assert_approx_eq!(body.position.y, 1.0, 1e-12);
    }

    #[test]
    fn corrected_mode_fixes_ages_at_construction() {
        let params = ParticleParams {
            population: 50,
            corrected_aging: true,
            ..ParticleParams::default()
        };
        let mut engine = ParticleEngine::with_seed(params, SEED);
        let ages: Vec<u8> = engine.bodies().iter().map(|body| body.age).collect();
        for _ in 0..5 {
            engine.advance();
        }
        let after: Vec<u8> = engine.bodies().iter().map(|body| body.age).collect();
        assert_eq!(ages, after);
    }

    #[test]
    fn observed_mode_reassigns_ages_every_step() {
        let params = ParticleParams {
            population: 50,
            ..ParticleParams::default()
        };
        let mut engine = ParticleEngine::with_seed(params, SEED);
        let ages: Vec<u8> = engine.bodies().iter().map(|body| body.age).collect();
        for _ in 0..5 {
            engine.advance();
        }
        let after: Vec<u8> = engine.bodies().iter().map(|body| body.age).collect();
        assert_ne!(ages, after);
    }

    #[test]
    fn vaccination_waits_for_the_warm_up_period() {
        // A spread-out, motionless population with the offer rate at 100
        // percent: vaccination is impossible through day 50 and effectively
        // certain to have reached someone well before day 150.
        let mut bodies = Vec::new();
        for i in 0..5 {
            for j in 0..4 {
                #[allow(clippy::cast_precision_loss)]
                bodies.push(still_body(
                    0.2 + 0.3 * i as f64,
                    0.2 + 0.4 * j as f64,
                    HealthStatus::NonInfected,
                ));
            }
        }
        let params = ParticleParams {
            population: 20,
            vaccination_rate: 100.0,
            dt: 0.0,
            ..ParticleParams::default()
        };
        let mut engine = ParticleEngine::with_bodies(params, bodies, SEED);

        for _ in 0..51 {
            engine.advance();
        }
        assert_eq!(engine.status_counts()["vaccinated"], 0);

        for _ in 0..100 {
            engine.advance();
        }
        assert!(engine.status_counts()["vaccinated"] > 0);
    }

    #[test]
    fn status_counts_are_exclusive_complete_and_idempotent() {
        let engine = ParticleEngine::with_seed(ParticleParams::default(), SEED);
        let counts = engine.status_counts();
        assert_eq!(counts.len(), 5);
        assert_eq!(counts.values().sum::<usize>(), 200);
        assert_eq!(counts["infected"], 4);
        assert_eq!(counts["non-infected"], 196);
        assert_eq!(engine.status_counts(), counts);
    }

    #[test]
    fn snapshot_styles_follow_status() {
        let bodies = vec![
            still_body(1.0, 1.0, HealthStatus::Infected { since: 0 }),
            still_body(0.5, 0.5, HealthStatus::Vaccinated),
        ];
        let engine = ParticleEngine::with_bodies(contact_params(), bodies, SEED);
        let snapshot = engine.snapshot();
        assert_eq!(snapshot[0].2.edgecolor, "C3");
        assert_eq!(snapshot[1].2.edgecolor, "C4");
        assert_eq!(snapshot[0].1, 0.01);
    }

    #[test]
    fn same_seed_produces_identical_trajectories() {
        let mut a = ParticleEngine::with_seed(ParticleParams::default(), SEED);
        let mut b = ParticleEngine::with_seed(ParticleParams::default(), SEED);
        for _ in 0..25 {
            a.advance();
            b.advance();
        }
        assert_eq!(a.status_counts(), b.status_counts());
        for (left, right) in a.bodies().iter().zip(b.bodies()) {
            assert_eq!(left.position, right.position);
        }
    }
}
