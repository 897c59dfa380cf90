use crate::dynamics::state::{KinematicState, ScenarioConfig};
use crate::error::SimError;
use crate::physics::gravity::{self, Attractor};
use crate::physics::vec2::{heading_deg, wrap_degrees, Vec2};
use crate::sim::integrator::{self, IntegratorKind};

// ---------------------------------------------------------------------------
// Orbiting probe: one integrator + trail, swept angle, energy bookkeeping
// ---------------------------------------------------------------------------

/// Lifecycle of a probe. Monotonic: once non-Active, integration stops and
/// the terminal state sticks for the rest of the scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Active,
    /// Left the playfield (past any off-bounds grace).
    Lost,
    /// Came within the combined radii of an attractor.
    Collided,
    /// Met the scenario objective.
    Completed,
}

/// One recorded trail position.
#[derive(Debug, Clone, Copy)]
pub struct TrailPoint {
    pub t: f64,
    pub pos: Vec2,
}

/// One energy sample, unit probe mass, keyed by elapsed simulated time.
#[derive(Debug, Clone, Copy)]
pub struct EnergySample {
    pub t: f64,
    pub kinetic: f64,
    pub potential: f64,
    pub mechanical: f64,
}

/// A rocket or satellite advanced by one integrator instance.
///
/// The probe owns its trail and energy series exclusively; the integrator
/// never touches them. The scenario runner drives `tick` and flips status
/// through [`OrbitingBody::mark`].
#[derive(Debug, Clone)]
pub struct OrbitingBody {
    state: KinematicState,
    status: Status,
    launch_pos: Vec2,
    elapsed: f64,
    /// Velocity reported by the last integration step (launch velocity
    /// before the first step).
    vel: Vec2,
    accel: Vec2,
    trail: Vec<TrailPoint>,
    energies: Vec<EnergySample>,
    // Swept-angle tracking about the primary attractor, degrees
    prev_heading: f64,
    total_angle: f64,
    completed_revs: u64,
    revolution_periods: Vec<f64>,
    last_revolution_at: f64,
}

impl OrbitingBody {
    /// Launch a probe with the given state vector and integration method.
    ///
    /// A zero launch velocity is rejected: the initial heading (and every
    /// angle delta after it) would be undefined.
    pub fn launch(
        pos: Vec2,
        vel: Vec2,
        kind: IntegratorKind,
        attractors: &[Attractor],
        cfg: &ScenarioConfig,
    ) -> Result<Self, SimError> {
        if vel.norm() == 0.0 {
            return Err(SimError::DegenerateInput);
        }
        if attractors.is_empty() {
            return Err(SimError::InvalidConfiguration(
                "cannot launch without attractors".into(),
            ));
        }
        let accel = gravity::acceleration(&pos, attractors, cfg.g, cfg.softening_r2);
        let state = match kind {
            IntegratorKind::Rk4 => KinematicState::rk4(pos, vel),
            IntegratorKind::Verlet => {
                KinematicState::verlet_from_launch(pos, vel, cfg.dt, accel)
            }
        };
        let primary = &attractors[0];
        Ok(Self {
            state,
            status: Status::Active,
            launch_pos: pos,
            elapsed: 0.0,
            vel,
            accel,
            trail: Vec::new(),
            energies: Vec::new(),
            prev_heading: heading_deg(&(pos - primary.pos)),
            total_angle: 0.0,
            completed_revs: 0,
            revolution_periods: Vec::new(),
            last_revolution_at: 0.0,
        })
    }

    /// Advance one fixed step against a snapshot of attractor positions.
    /// No-op unless Active.
    pub fn tick(&mut self, attractors: &[Attractor], cfg: &ScenarioConfig) {
        if self.status != Status::Active {
            return;
        }
        let g = cfg.g;
        let min_r2 = cfg.softening_r2;
        let field = |p: &Vec2| gravity::acceleration(p, attractors, g, min_r2);

        let (new_state, reported_vel) = integrator::step(&self.state, cfg.dt, &field);
        self.state = new_state;
        self.vel = reported_vel;
        self.elapsed += cfg.dt;

        let pos = self.state.pos();
        self.accel = field(&pos);

        self.track_revolutions(&attractors[0]);
        self.record_trail(&pos, cfg);
        self.record_energy(&pos, attractors, cfg);
    }

    fn track_revolutions(&mut self, primary: &Attractor) {
        let heading = heading_deg(&(self.state.pos() - primary.pos));
        let delta = wrap_degrees(heading - self.prev_heading);
        self.total_angle += delta;
        self.prev_heading = heading;

        let whole = (self.total_angle.abs() / 360.0).floor() as u64;
        if whole > self.completed_revs {
            self.revolution_periods
                .push(self.elapsed - self.last_revolution_at);
            self.last_revolution_at = self.elapsed;
            self.completed_revs = whole;
        }
    }

    fn record_trail(&mut self, pos: &Vec2, cfg: &ScenarioConfig) {
        if (pos - self.launch_pos).norm() > cfg.trail_min_distance {
            self.trail.push(TrailPoint { t: self.elapsed, pos: *pos });
        }
        if let Some(lifetime) = cfg.trail_lifetime {
            let cutoff = self.elapsed - lifetime;
            self.trail.retain(|p| p.t >= cutoff);
        }
    }

    fn record_energy(&mut self, pos: &Vec2, attractors: &[Attractor], cfg: &ScenarioConfig) {
        let kinetic = 0.5 * self.vel.norm_squared();
        let potential = gravity::potential_energy(pos, attractors, cfg.g, cfg.softening_r2);
        self.energies.push(EnergySample {
            t: self.elapsed,
            kinetic,
            potential,
            mechanical: kinetic + potential,
        });
    }

    /// Terminal transition, runner-driven. Ignored once already terminal.
    pub fn mark(&mut self, status: Status) {
        if self.status == Status::Active {
            self.status = status;
        }
    }

    // --- read-only snapshot accessors ---

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn pos(&self) -> Vec2 {
        self.state.pos()
    }

    pub fn velocity(&self) -> Vec2 {
        self.vel
    }

    pub fn speed(&self) -> f64 {
        self.vel.norm()
    }

    pub fn accel_magnitude(&self) -> f64 {
        self.accel.norm()
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Full revolutions swept about the primary: `|total angle| / 360`.
    pub fn revolutions(&self) -> f64 {
        self.total_angle.abs() / 360.0
    }

    /// Simulated duration of each completed revolution.
    pub fn revolution_periods(&self) -> &[f64] {
        &self.revolution_periods
    }

    pub fn trail(&self) -> &[TrailPoint] {
        &self.trail
    }

    pub fn energy_series(&self) -> &[EnergySample] {
        &self.energies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::state::{Bounds, WinCondition};

    const GM: f64 = 500_000.0;

    fn central_setup(r: f64, dt: f64) -> (Vec<Attractor>, ScenarioConfig, Vec2, Vec2) {
        let center = Vec2::new(640.0, 360.0);
        let attractors = vec![Attractor { pos: center, mass: GM, radius: 40.0 }];
        let cfg = ScenarioConfig {
            g: 1.0,
            dt,
            bounds: Bounds { width: 1280.0, height: 720.0 },
            win: WinCondition::Revolutions(150.0),
            softening_r2: 1.0,
            trail_min_distance: 50.0,
            ..ScenarioConfig::default()
        };
        let pos = center + Vec2::new(r, 0.0);
        let vel = Vec2::new(0.0, (GM / r).sqrt());
        (attractors, cfg, pos, vel)
    }

    fn orbital_period(r: f64) -> f64 {
        2.0 * std::f64::consts::PI * (r.powi(3) / GM).sqrt()
    }

    #[test]
    fn zero_velocity_launch_is_degenerate() {
        let (attractors, cfg, pos, _) = central_setup(160.0, 0.1);
        let err = OrbitingBody::launch(pos, Vec2::zeros(), IntegratorKind::Rk4, &attractors, &cfg);
        assert!(matches!(err, Err(SimError::DegenerateInput)));
    }

    #[test]
    fn one_period_counts_one_revolution() {
        let r = 160.0;
        let dt = 0.05;
        let (attractors, cfg, pos, vel) = central_setup(r, dt);
        let mut body =
            OrbitingBody::launch(pos, vel, IntegratorKind::Rk4, &attractors, &cfg).unwrap();
        let steps = (orbital_period(r) / dt).round() as usize;
        for _ in 0..steps {
            body.tick(&attractors, &cfg);
        }
        assert!(
            (body.revolutions() - 1.0).abs() < 0.02,
            "after one period, revolutions = {:.4}",
            body.revolutions()
        );
        assert_eq!(body.revolution_periods().len(), 1);
        let measured = body.revolution_periods()[0];
        assert!(
            (measured / orbital_period(r) - 1.0).abs() < 0.02,
            "measured period {:.3} vs analytic {:.3}",
            measured,
            orbital_period(r)
        );
    }

    #[test]
    fn rk4_energy_drift_is_below_one_percent_over_1000_steps() {
        let (attractors, cfg, pos, vel) = central_setup(160.0, 0.1);
        let mut body =
            OrbitingBody::launch(pos, vel, IntegratorKind::Rk4, &attractors, &cfg).unwrap();
        for _ in 0..1_000 {
            body.tick(&attractors, &cfg);
        }
        let series = body.energy_series();
        let first = series.first().unwrap().mechanical;
        let last = series.last().unwrap().mechanical;
        assert!(
            ((last - first) / first).abs() < 0.01,
            "mechanical energy drifted {:.4}% ({} -> {})",
            100.0 * ((last - first) / first).abs(),
            first,
            last
        );
    }

    #[test]
    fn trail_starts_past_minimum_distance() {
        let (attractors, cfg, pos, vel) = central_setup(160.0, 0.05);
        let mut body =
            OrbitingBody::launch(pos, vel, IntegratorKind::Verlet, &attractors, &cfg).unwrap();
        body.tick(&attractors, &cfg);
        // One step moves ~v*dt ≈ 2.8 units, inside the 50-unit dead zone
        assert!(body.trail().is_empty());
        for _ in 0..100 {
            body.tick(&attractors, &cfg);
        }
        assert!(!body.trail().is_empty());
        for p in body.trail() {
            assert!((p.pos - pos).norm() > cfg.trail_min_distance);
        }
    }

    #[test]
    fn trail_lifetime_prunes_old_points() {
        let (attractors, mut cfg, pos, vel) = central_setup(160.0, 0.05);
        cfg.trail_min_distance = 0.0;
        cfg.trail_lifetime = Some(1.0);
        let mut body =
            OrbitingBody::launch(pos, vel, IntegratorKind::Rk4, &attractors, &cfg).unwrap();
        for _ in 0..200 {
            body.tick(&attractors, &cfg);
        }
        let oldest = body.trail().first().unwrap().t;
        assert!(
            body.elapsed() - oldest <= 1.0 + 1e-9,
            "oldest trail point is {:.2}s old",
            body.elapsed() - oldest
        );
    }

    #[test]
    fn terminal_status_freezes_the_probe() {
        let (attractors, cfg, pos, vel) = central_setup(160.0, 0.05);
        let mut body =
            OrbitingBody::launch(pos, vel, IntegratorKind::Rk4, &attractors, &cfg).unwrap();
        body.tick(&attractors, &cfg);
        body.mark(Status::Collided);
        let frozen_pos = body.pos();
        let frozen_elapsed = body.elapsed();
        for _ in 0..10 {
            body.tick(&attractors, &cfg);
        }
        assert_eq!(body.status(), Status::Collided);
        assert_eq!(body.pos(), frozen_pos);
        assert_eq!(body.elapsed(), frozen_elapsed);
        // Sticky: a later mark must not overwrite the terminal state
        body.mark(Status::Completed);
        assert_eq!(body.status(), Status::Collided);
    }

    #[test]
    fn diagnostics_track_the_orbit() {
        let r = 160.0;
        let (attractors, cfg, pos, vel) = central_setup(r, 0.05);
        let mut body =
            OrbitingBody::launch(pos, vel, IntegratorKind::Verlet, &attractors, &cfg).unwrap();
        for _ in 0..50 {
            body.tick(&attractors, &cfg);
        }
        // Circular orbit: speed stays near sqrt(GM/r), accel near GM/r²
        assert!((body.speed() / (GM / r).sqrt() - 1.0).abs() < 0.02);
        assert!((body.accel_magnitude() / (GM / (r * r)) - 1.0).abs() < 0.05);
    }
}
