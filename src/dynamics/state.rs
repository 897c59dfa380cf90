use crate::error::SimError;
use crate::physics::vec2::Vec2;

// ---------------------------------------------------------------------------
// Kinematic state: tagged RK4 / Verlet representation
// ---------------------------------------------------------------------------

/// Per-probe integration state.
///
/// Exactly one representation is active per integration method: RK4 carries
/// an explicit velocity, position-Verlet carries the previous position
/// instead. Conversion between the two happens only at launch
/// ([`KinematicState::verlet_from_launch`] synthesizes `prev_pos` from an
/// initial velocity).
#[derive(Debug, Clone)]
pub enum KinematicState {
    Rk4 { pos: Vec2, vel: Vec2 },
    Verlet { pos: Vec2, prev_pos: Vec2 },
}

impl KinematicState {
    pub fn rk4(pos: Vec2, vel: Vec2) -> Self {
        KinematicState::Rk4 { pos, vel }
    }

    /// Build a Verlet state from a launch vector using the half-step
    /// correction `prev = pos − v·dt + ½·a·dt²`, so the recursion starts
    /// with second-order accuracy matching the RK4 initial condition.
    pub fn verlet_from_launch(pos: Vec2, vel: Vec2, dt: f64, accel: Vec2) -> Self {
        KinematicState::Verlet {
            pos,
            prev_pos: pos - vel * dt + accel * (0.5 * dt * dt),
        }
    }

    pub fn pos(&self) -> Vec2 {
        match self {
            KinematicState::Rk4 { pos, .. } => *pos,
            KinematicState::Verlet { pos, .. } => *pos,
        }
    }

    /// Instantaneous velocity estimate from the stored representation:
    /// the explicit velocity for RK4, the one-step backward difference
    /// `(pos − prev_pos)/dt` for Verlet. During simulation the integrator
    /// reports a central-difference velocity instead (see
    /// [`crate::sim::integrator::verlet_step`]); this accessor is the
    /// pre-first-step estimate both variants share.
    pub fn velocity(&self, dt: f64) -> Vec2 {
        match self {
            KinematicState::Rk4 { vel, .. } => *vel,
            KinematicState::Verlet { pos, prev_pos } => (pos - prev_pos) / dt,
        }
    }
}

// ---------------------------------------------------------------------------
// Scenario configuration
// ---------------------------------------------------------------------------

/// Playfield, positions are valid in `[0, width] × [0, height]`.
#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn contains(&self, p: &Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

/// What the probe has to do to win the scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WinCondition {
    /// Sweep this many full revolutions around the primary attractor.
    Revolutions(f64),
    /// Stay alive for this many simulated seconds.
    SurviveFor(f64),
    /// Photograph every attractor (close pass within the photo margin).
    PhotographAll,
}

/// All tunables for one scenario, passed in at construction.
#[derive(Debug, Clone)]
pub struct ScenarioConfig {
    /// Gravitational constant in playfield units.
    pub g: f64,
    /// Fixed simulated timestep per tick, seconds.
    pub dt: f64,
    pub bounds: Bounds,
    pub win: WinCondition,
    /// Softening clamp on `r²` in the gravity sum. Stability knob, not
    /// physics; derive from body radii via
    /// [`crate::physics::gravity::recommended_softening_r2`].
    pub softening_r2: f64,
    /// Collision radius of the probe itself.
    pub probe_radius: f64,
    /// Trail recording starts once the probe has moved this far from its
    /// launch point (avoids a smudge of points at spawn).
    pub trail_min_distance: f64,
    /// When set, trail entries older than this many simulated seconds are
    /// pruned each tick (the Lagrange variant uses a long finite trail).
    pub trail_lifetime: Option<f64>,
    /// Continuous off-bounds simulated seconds tolerated before the probe
    /// counts as lost. Zero means leaving the bounds loses immediately.
    pub offscreen_grace: f64,
    /// Extra distance beyond the combined radii within which a close pass
    /// photographs an attractor.
    pub photo_margin: f64,
}

impl ScenarioConfig {
    /// Fail fast on values that would poison the simulation later.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.g <= 0.0 {
            return Err(SimError::InvalidConfiguration(format!(
                "gravitational constant must be positive, got {}",
                self.g
            )));
        }
        if self.dt <= 0.0 {
            return Err(SimError::InvalidConfiguration(format!(
                "timestep must be positive, got {}",
                self.dt
            )));
        }
        if self.bounds.width <= 0.0 || self.bounds.height <= 0.0 {
            return Err(SimError::InvalidConfiguration(format!(
                "bounds must be positive, got {}x{}",
                self.bounds.width, self.bounds.height
            )));
        }
        if self.softening_r2 <= 0.0 {
            return Err(SimError::InvalidConfiguration(format!(
                "softening r² must be positive, got {}",
                self.softening_r2
            )));
        }
        if self.probe_radius < 0.0 || self.offscreen_grace < 0.0 || self.photo_margin < 0.0 {
            return Err(SimError::InvalidConfiguration(
                "probe radius, grace, and photo margin must be non-negative".into(),
            ));
        }
        match self.win {
            WinCondition::Revolutions(n) if n <= 0.0 => {
                Err(SimError::InvalidConfiguration(format!(
                    "revolutions to win must be positive, got {}",
                    n
                )))
            }
            WinCondition::SurviveFor(t) if t <= 0.0 => {
                Err(SimError::InvalidConfiguration(format!(
                    "survival duration must be positive, got {}",
                    t
                )))
            }
            _ => Ok(()),
        }
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        // Satellite-photography scenario scale: 1280x720 playfield, 50 Hz.
        Self {
            g: 2000.0,
            dt: 0.02,
            bounds: Bounds { width: 1280.0, height: 720.0 },
            win: WinCondition::Revolutions(1.0),
            softening_r2: 1.0,
            probe_radius: 20.0,
            trail_min_distance: 50.0,
            trail_lifetime: None,
            offscreen_grace: 0.0,
            photo_margin: 100.0,
        }
    }
}
