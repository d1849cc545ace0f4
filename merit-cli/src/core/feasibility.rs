use merit_quantities::power::Megawatts;

use crate::core::{error::AllocationError, request::LoadRequest};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Feasibility {
    /// Nothing to allocate, every unit stays at zero.
    Idle,

    /// Coarse checks passed, the commitment search decides the rest.
    Proceed,
}

/// Cheap necessary conditions, checked before any allocation is attempted.
///
/// The lower bound only rejects loads that no single dispatchable unit could legally take.
/// Renewables are ignored here because they scale continuously from zero.
pub fn check(request: &LoadRequest) -> Result<Feasibility, AllocationError> {
    if request.units.is_empty() || request.load <= Megawatts::ZERO {
        return Ok(Feasibility::Idle);
    }

    let capacity = request.total_max_output();
    if request.load > capacity {
        return Err(AllocationError::LoadExceedsCapacity { load: request.load, capacity });
    }

    // Renewable-only fleets have no minimum to violate:
    if let Some(lowest_min_output) = request.dispatchable_units().map(|unit| unit.min_output).min()
        && request.load < lowest_min_output
    {
        return Err(AllocationError::LoadBelowMinimum { load: request.load, lowest_min_output });
    }

    Ok(Feasibility::Proceed)
}
