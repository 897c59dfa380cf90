use crate::dynamics::state::{Bounds, WinCondition};
use crate::physics::gravity::Attractor;
use crate::physics::vec2::Vec2;
use crate::sim::body::OrbitingBody;

// ---------------------------------------------------------------------------
// Termination detectors
// ---------------------------------------------------------------------------
// The runner applies these in fixed priority order each tick:
// bounds exit, then collision, then objective.

/// Tracks continuous off-bounds time for one probe.
///
/// With zero grace the first off-bounds sample fires. With a positive grace
/// the probe may wander outside the playfield and come back; re-entering
/// resets the accumulator (the Lagrange scenario tolerates minutes of
/// off-screen flight).
#[derive(Debug, Clone)]
pub struct BoundsWatch {
    grace: f64,
    off_for: f64,
}

impl BoundsWatch {
    pub fn new(grace: f64) -> Self {
        Self { grace, off_for: 0.0 }
    }

    /// Feed one post-step position; returns true when the probe is lost.
    pub fn check(&mut self, pos: &Vec2, bounds: &Bounds, dt: f64) -> bool {
        if bounds.contains(pos) {
            self.off_for = 0.0;
            return false;
        }
        self.off_for += dt;
        self.off_for > self.grace
    }
}

/// Index of the first attractor whose combined radius overlaps the probe.
pub fn collision_with(
    pos: &Vec2,
    probe_radius: f64,
    attractors: &[Attractor],
) -> Option<usize> {
    attractors
        .iter()
        .position(|a| (a.pos - pos).norm() < a.radius + probe_radius)
}

/// Attractors within photo range of the probe: past the collision radius
/// but inside `combined radii + photo_margin`. Close passes, not crashes.
pub fn photo_candidates(
    pos: &Vec2,
    probe_radius: f64,
    photo_margin: f64,
    attractors: &[Attractor],
) -> Vec<usize> {
    attractors
        .iter()
        .enumerate()
        .filter(|(_, a)| {
            let d = (a.pos - pos).norm();
            d < a.radius + probe_radius + photo_margin
        })
        .map(|(i, _)| i)
        .collect()
}

/// Whether the scenario objective is met for this probe.
pub fn objective_met(
    win: &WinCondition,
    body: &OrbitingBody,
    photos_taken: usize,
    photos_total: usize,
) -> bool {
    match win {
        WinCondition::Revolutions(target) => body.revolutions() >= *target,
        WinCondition::SurviveFor(duration) => body.elapsed() >= *duration,
        WinCondition::PhotographAll => photos_total > 0 && photos_taken == photos_total,
    }
}
