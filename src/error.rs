use thiserror::Error;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Failures raised by the simulation core.
///
/// All variants are synchronous and local: they surface at the call that
/// detects them and are never retried. Once a scenario is constructed and
/// launched, per-tick operations are total and cannot fail.
#[derive(Debug, Error)]
pub enum SimError {
    /// A zero-length vector was passed where a direction is required
    /// (normalization and heading math would be undefined).
    #[error("zero-length vector where a direction is required")]
    DegenerateInput,

    /// Non-positive mass, timestep, bounds, or win threshold at setup.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A launch command arrived while the scenario was not waiting for one.
    #[error("launch rejected: scenario is not waiting for a launch")]
    LaunchRejected,
}
