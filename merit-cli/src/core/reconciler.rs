use merit_quantities::power::Megawatts;

use crate::core::{
    EPSILON,
    TOLERANCE,
    allocator::{Candidate, MeritOrderAllocator},
    decision::{Decision, DecisionKind},
    error::AllocationError,
};

/// Move the leftover rounding residual onto a single committed dispatchable unit.
///
/// The unit with the largest output that stays within its bounds after the adjustment
/// takes the whole residual, ties going to the lower index. Renewable outputs are never touched.
pub fn reconcile(
    candidate: Candidate,
    allocator: &MeritOrderAllocator<'_>,
) -> Result<Candidate, AllocationError> {
    let residual = candidate.residual;
    if residual.abs() <= EPSILON {
        return Ok(candidate);
    }
    if residual.abs() >= TOLERANCE {
        return Err(AllocationError::RoundingUnresolvable { residual });
    }

    let (index, output) = candidate
        .outputs
        .iter()
        .copied()
        .enumerate()
        .filter(|(index, output)| {
            let unit = allocator.unit(*index).unit;
            let adjusted = *output + residual;
            unit.is_dispatchable()
                && *output > Megawatts::ZERO
                && adjusted > Megawatts::ZERO
                && unit.admits(adjusted)
        })
        .max_by(|(lhs_index, lhs), (rhs_index, rhs)| lhs.cmp(rhs).then(rhs_index.cmp(lhs_index)))
        .ok_or(AllocationError::RoundingUnresolvable { residual })?;

    let Candidate { scenario, mut outputs, total_cost, mut decisions, .. } = candidate;
    outputs[index] = output + residual;
    decisions.push(Decision::new(index, DecisionKind::Reconciled { adjustment: residual }));
    Ok(Candidate {
        scenario,
        outputs,
        residual: Megawatts::ZERO,
        total_cost: total_cost + residual * allocator.unit(index).marginal_cost,
        decisions,
    })
}
