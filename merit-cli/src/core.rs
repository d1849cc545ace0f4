pub mod allocation;
pub mod allocator;
pub mod cost_model;
pub mod decision;
pub mod error;
pub mod feasibility;
pub mod planner;
pub mod reconciler;
pub mod request;
pub mod search;
pub mod unit;

use merit_quantities::power::Megawatts;

/// Largest residual still accepted as an exact match: half of the reported precision.
pub const TOLERANCE: Megawatts = Megawatts::new(0.05);

/// Anything below this is floating-point noise rather than load.
pub const EPSILON: Megawatts = Megawatts::new(1e-9);

/// Whether the residual is small enough to count as an exact match.
#[must_use]
pub fn is_exact(residual: Megawatts) -> bool {
    residual.abs() < TOLERANCE
}
