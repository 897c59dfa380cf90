pub mod body;
pub mod event;
pub mod integrator;
pub mod runner;

pub use body::{OrbitingBody, Status};
pub use integrator::IntegratorKind;
pub use runner::{Scenario, ScenarioOutcome, TickReport};
