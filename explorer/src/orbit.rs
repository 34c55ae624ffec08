//! Lazy orbits of the active map, for the overlay and sonification.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::system::SystemKind;

/// Constant used for an orbit when no Julia point is bound.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrbitConstant {
    /// The clicked point is both the seed and the constant.
    #[default]
    Seed,
    Fixed { x: f64, y: f64 },
}

impl OrbitConstant {
    pub fn resolve(self, seed: DVec2, julia: Option<DVec2>) -> DVec2 {
        match (julia, self) {
            (Some(point), _) => point,
            (None, OrbitConstant::Seed) => seed,
            (None, OrbitConstant::Fixed { x, y }) => DVec2::new(x, y),
        }
    }
}

/// Infinite sequence `s0 = seed`, `s(n+1) = step(s(n), c)`. No bailout is
/// applied.
#[derive(Clone, Debug)]
pub struct Orbit {
    system: SystemKind,
    constant: DVec2,
    next: DVec2,
}

impl Orbit {
    pub fn constant(&self) -> DVec2 {
        self.constant
    }
}

impl Iterator for Orbit {
    type Item = DVec2;

    fn next(&mut self) -> Option<DVec2> {
        let current = self.next;
        self.next = self.system.step(current, self.constant);
        Some(current)
    }
}

pub fn sample(seed: DVec2, system: SystemKind, julia: Option<DVec2>, rule: OrbitConstant) -> Orbit {
    Orbit {
        system,
        constant: rule.resolve(seed, julia),
        next: seed,
    }
}

/// Holds the current seed; every click or drag replaces it.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrbitSampler {
    seed: Option<DVec2>,
    rule: OrbitConstant,
}

impl OrbitSampler {
    pub fn new(rule: OrbitConstant) -> Self {
        Self { seed: None, rule }
    }

    pub fn seed(&self) -> Option<DVec2> {
        self.seed
    }

    pub fn reseed(&mut self, seed: DVec2) {
        self.seed = Some(seed);
    }

    pub fn orbit(&self, system: SystemKind, julia: Option<DVec2>) -> Option<Orbit> {
        self.seed.map(|seed| sample(seed, system, julia, self.rule))
    }
}

/// Terms up to (not including) the first non-finite one or the first one
/// outside `escape_radius_sq`, at most `limit` of them.
pub fn bounded(orbit: Orbit, escape_radius_sq: f64, limit: usize) -> impl Iterator<Item = DVec2> {
    orbit
        .take(limit)
        .take_while(move |z| z.is_finite() && z.length_squared() <= escape_radius_sq)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn test_first_term_is_seed() {
        let orbit = sample(dvec2(0.1, 0.2), SystemKind::Mandelbrot, None, OrbitConstant::Seed);
        assert_eq!(orbit.constant(), dvec2(0.1, 0.2));
        let terms: Vec<_> = orbit.take(2).collect();
        assert_eq!(terms[0], dvec2(0.1, 0.2));
        assert_eq!(terms[1], SystemKind::Mandelbrot.step(dvec2(0.1, 0.2), dvec2(0.1, 0.2)));
    }

    #[test]
    fn test_julia_point_wins_over_rule() {
        let julia = Some(dvec2(-0.8, 0.156));
        let orbit = sample(dvec2(0.0, 0.0), SystemKind::Henon, julia, OrbitConstant::Seed);
        assert_eq!(orbit.constant(), dvec2(-0.8, 0.156));
        let fixed = OrbitConstant::Fixed { x: 1.0, y: 2.0 };
        assert_eq!(fixed.resolve(dvec2(5.0, 5.0), None), dvec2(1.0, 2.0));
    }

    #[test]
    fn test_reseed_restarts_cleanly() {
        let mut sampler = OrbitSampler::new(OrbitConstant::Seed);
        assert!(sampler.orbit(SystemKind::Mandelbrot, None).is_none());

        sampler.reseed(dvec2(0.3, 0.5));
        let mut a = sampler.orbit(SystemKind::Mandelbrot, None).unwrap();
        for _ in 0..37 {
            a.next();
        }

        sampler.reseed(dvec2(-1.0, 0.25));
        let mut b = sampler.orbit(SystemKind::Mandelbrot, None).unwrap();
        assert_eq!(b.next(), Some(dvec2(-1.0, 0.25)));
        assert_eq!(b.constant(), dvec2(-1.0, 0.25));
    }

    #[test]
    fn test_orbit_is_infinite() {
        let orbit = sample(dvec2(2.0, 2.0), SystemKind::Mandelbrot, None, OrbitConstant::Seed);
        // diverges to NaN but keeps producing terms
        assert_eq!(orbit.take(5000).count(), 5000);
    }

    #[test]
    fn test_bounded_stops_at_escape() {
        let orbit = sample(dvec2(2.0, 2.0), SystemKind::Mandelbrot, None, OrbitConstant::Seed);
        let kept: Vec<_> = bounded(orbit, 1000.0, 200).collect();
        assert!(!kept.is_empty());
        assert!(kept.len() < 200);
        assert!(kept.iter().all(|z| z.length_squared() <= 1000.0));

        let inside = sample(dvec2(0.0, 0.0), SystemKind::Mandelbrot, None, OrbitConstant::Seed);
        assert_eq!(bounded(inside, 1000.0, 200).count(), 200);
    }
}
