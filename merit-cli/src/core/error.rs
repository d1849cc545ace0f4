use merit_quantities::power::Megawatts;
use thiserror::Error;

/// Terminal outcome of a failed allocation, retrying the same request reproduces it.
#[derive(Debug, Error)]
pub enum AllocationError {
    #[error("requested load {load} exceeds the total capacity {capacity}")]
    LoadExceedsCapacity { load: Megawatts, capacity: Megawatts },

    #[error(
        "requested load {load} is below the minimum output of every dispatchable unit (lowest is {lowest_min_output})"
    )]
    LoadBelowMinimum { load: Megawatts, lowest_min_output: Megawatts },

    /// Neither the full fleet nor any leave-one-out scenario lands on the load.
    #[error("no commitment scenario matches the load {load}, the full fleet misses it by {residual}")]
    UnallocatableLoad { load: Megawatts, residual: Megawatts },

    /// Internal invariant violation.
    #[error("residual {residual} cannot be placed on any committed unit")]
    RoundingUnresolvable { residual: Megawatts },

    #[error("unit `{unit}` cannot be priced: {reason}")]
    Configuration { unit: String, reason: String },
}

impl AllocationError {
    /// Whether the error signals a bug rather than an infeasible or malformed request.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::RoundingUnresolvable { .. })
    }
}
