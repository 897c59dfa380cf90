pub mod dynamics;
pub mod error;
pub mod orbital;
pub mod physics;
pub mod sim;

// Convenience re-exports for the common entry points
pub mod integrator {
    pub use crate::sim::integrator::{rk4_step, step, verlet_step, IntegratorKind};
}

pub mod types {
    pub use crate::dynamics::state::{
        Bounds, KinematicState, ScenarioConfig, WinCondition,
    };
    pub use crate::error::SimError;
    pub use crate::physics::gravity::Attractor;
    pub use crate::physics::vec2::Vec2;
    pub use crate::sim::body::{EnergySample, OrbitingBody, Status, TrailPoint};
    pub use crate::sim::runner::{
        AttractorLayout, OutcomeSummary, Phase, Scenario, ScenarioOutcome, TickReport,
    };
}
