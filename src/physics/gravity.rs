use crate::physics::vec2::Vec2;

// ---------------------------------------------------------------------------
// Newtonian point-mass gravity with a softening clamp
// ---------------------------------------------------------------------------

/// A gravitational source. `pos` is mutated each tick by the scenario runner
/// when the attractor itself orbits (planet–moon pairs).
#[derive(Debug, Clone)]
pub struct Attractor {
    pub pos: Vec2,
    pub mass: f64,
    /// Collision radius, also used to derive the softening threshold.
    pub radius: f64,
}

/// Total gravitational acceleration at `pos` due to `attractors`.
///
/// Each contribution is `g * m / r²` along the unit separation vector. When
/// `r²` falls below `min_r2` the clamped value is substituted instead. The
/// clamp is a stability trade-off, not physics: near-miss trajectories are
/// expected gameplay and must not blow up the integrator. `min_r2` is a
/// configuration value derived from body radii (see
/// [`recommended_softening_r2`]), not a fixed pixel-scale literal.
///
/// The sum is a plain vector sum, so the attractor order never matters.
pub fn acceleration(pos: &Vec2, attractors: &[Attractor], g: f64, min_r2: f64) -> Vec2 {
    let mut a = Vec2::zeros();
    for body in attractors {
        let sep = body.pos - pos;
        let r2 = sep.norm_squared().max(min_r2);
        let r = r2.sqrt();
        a += sep * (g * body.mass / (r2 * r));
    }
    a
}

/// Softening threshold scaled to the cast of bodies: a quarter of the
/// smallest attractor radius, squared. Keeps the clamp well inside the
/// collision radius so it can only matter on trajectories that are about to
/// terminate anyway.
pub fn recommended_softening_r2(attractors: &[Attractor]) -> f64 {
    let min_radius = attractors
        .iter()
        .map(|b| b.radius)
        .fold(f64::INFINITY, f64::min);
    if min_radius.is_finite() && min_radius > 0.0 {
        (0.25 * min_radius).powi(2)
    } else {
        1.0
    }
}

/// Gravitational potential energy per unit probe mass at `pos`:
/// `Σ −g·mᵢ/rᵢ`, with the same clamp applied so the energy series stays
/// finite whenever the force does.
pub fn potential_energy(pos: &Vec2, attractors: &[Attractor], g: f64, min_r2: f64) -> f64 {
    attractors
        .iter()
        .map(|body| {
            let r = (body.pos - pos).norm_squared().max(min_r2).sqrt();
            -g * body.mass / r
        })
        .sum()
}
