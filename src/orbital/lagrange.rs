use crate::physics::vec2::{perpendicular, Vec2};

// ---------------------------------------------------------------------------
// Analytical Lagrange points for a circular two-body pair
// ---------------------------------------------------------------------------

/// Geometry of a planet–moon pair on a mutual circular orbit, described
/// relative to its barycenter.
#[derive(Debug, Clone, Copy)]
pub struct PairGeometry {
    /// Barycenter position in playfield coordinates.
    pub com: Vec2,
    /// Separation between the two bodies.
    pub separation: f64,
    pub primary_mass: f64,
    pub secondary_mass: f64,
}

impl PairGeometry {
    pub fn total_mass(&self) -> f64 {
        self.primary_mass + self.secondary_mass
    }

    /// Angular velocity of the mutual circular orbit,
    /// `ω = sqrt(G·M / d³)`.
    pub fn circular_omega(&self, g: f64) -> f64 {
        (g * self.total_mass() / self.separation.powi(3)).sqrt()
    }

    /// The five Lagrange points, `[L1, L2, L3, L4, L5]`, for the pair laid
    /// out along +x from the barycenter (primary on the −x side).
    ///
    /// Collinear points use the first-order `(m₂/3M)^⅓` Hill-sphere
    /// expansion for L1/L2 and the `b^(5/12)` fit for L3; triangular points
    /// come from the equilateral construction. Good to game accuracy for a
    /// heavy primary, not an ephemeris.
    pub fn lagrange_points(&self) -> [Vec2; 5] {
        let d = self.separation;
        let b = self.secondary_mass / self.total_mass();
        let c = self.primary_mass / self.total_mass();

        let l1 = self.com + Vec2::new(d * (1.0 - (b / 3.0).cbrt()), 0.0);
        let l2 = self.com + Vec2::new(d * (1.0 + (b / 3.0).cbrt()), 0.0);
        let l3 = self.com + Vec2::new(-d * (1.0 + b.powf(5.0 / 12.0)), 0.0);
        let l4 = self.com + Vec2::new(d / 2.0 * (c - b), d * 3.0_f64.sqrt() / 2.0);
        let l5 = self.com + Vec2::new(d / 2.0 * (c - b), -d * 3.0_f64.sqrt() / 2.0);

        [l1, l2, l3, l4, l5]
    }

    /// Velocity that keeps a probe at `point` co-rotating with the pair:
    /// perpendicular to the barycenter radius, magnitude `ω·r`. Zero at the
    /// barycenter itself.
    pub fn corotating_velocity(&self, point: &Vec2, g: f64) -> Vec2 {
        let r = point - self.com;
        let len = r.norm();
        if len == 0.0 {
            return Vec2::zeros();
        }
        perpendicular(&(r / len)) * (self.circular_omega(g) * len)
    }
}
