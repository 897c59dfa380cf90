use crate::dynamics::state::KinematicState;
use crate::physics::vec2::Vec2;

// ---------------------------------------------------------------------------
// Fixed-step integrators: classical RK4 and position-Verlet
// ---------------------------------------------------------------------------

/// Which numerical method advances a probe. Selected per scenario; both
/// methods run against the same acceleration field and the same `dt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegratorKind {
    Rk4,
    Verlet,
}

/// Acceleration field sampled by the integrators at trial positions.
pub type AccelFn<'a> = &'a dyn Fn(&Vec2) -> Vec2;

/// Single RK4 step on the coupled (position, velocity) system.
///
/// Four field evaluations per step, fully deterministic: the same inputs
/// always produce the same trajectory.
pub fn rk4_step(pos: &Vec2, vel: &Vec2, dt: f64, field: AccelFn) -> (Vec2, Vec2) {
    let deriv = |p: &Vec2, v: &Vec2| -> (Vec2, Vec2) { (*v, field(p)) };

    let (k1_dp, k1_dv) = deriv(pos, vel);
    let (k2_dp, k2_dv) = deriv(&(pos + k1_dp * (dt * 0.5)), &(vel + k1_dv * (dt * 0.5)));
    let (k3_dp, k3_dv) = deriv(&(pos + k2_dp * (dt * 0.5)), &(vel + k2_dv * (dt * 0.5)));
    let (k4_dp, k4_dv) = deriv(&(pos + k3_dp * dt), &(vel + k3_dv * dt));

    (
        pos + (k1_dp + 2.0 * k2_dp + 2.0 * k3_dp + k4_dp) * (dt / 6.0),
        vel + (k1_dv + 2.0 * k2_dv + 2.0 * k3_dv + k4_dv) * (dt / 6.0),
    )
}

/// Single position-Verlet step: `new = 2·pos − prev + a(pos)·dt²`.
///
/// Internal state carries positions only. The returned velocity is the
/// central difference `(new_pos − prev_pos) / (2·dt)` and exists purely for
/// reporting (speed readouts, energy samples); it never feeds back into the
/// recursion. The `2·dt` divisor is the pinned convention for this crate.
pub fn verlet_step(pos: &Vec2, prev_pos: &Vec2, dt: f64, field: AccelFn) -> (Vec2, Vec2) {
    let new_pos = 2.0 * pos - prev_pos + field(pos) * (dt * dt);
    let reported_vel = (new_pos - prev_pos) / (2.0 * dt);
    (new_pos, reported_vel)
}

/// Advance one kinematic state by `dt`, dispatching on the representation.
///
/// Returns the new state plus the velocity to report for this step. No side
/// effects: trails, energy series, and status belong to the caller.
pub fn step(state: &KinematicState, dt: f64, field: AccelFn) -> (KinematicState, Vec2) {
    match state {
        KinematicState::Rk4 { pos, vel } => {
            let (new_pos, new_vel) = rk4_step(pos, vel, dt, field);
            (KinematicState::Rk4 { pos: new_pos, vel: new_vel }, new_vel)
        }
        KinematicState::Verlet { pos, prev_pos } => {
            let (new_pos, reported) = verlet_step(pos, prev_pos, dt, field);
            (
                KinematicState::Verlet { pos: new_pos, prev_pos: *pos },
                reported,
            )
        }
    }
}
