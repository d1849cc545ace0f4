use merit_quantities::power::Megawatts;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::{
    allocator::{Candidate, MeritOrderAllocator, Scenario},
    error::AllocationError,
    reconciler::reconcile,
};

/// Leave-one-out search over the dispatchable fleet.
///
/// Only subsets with at most one unit removed are tried, so some feasible loads
/// that require idling two or more units are reported as unallocatable.
pub struct CommitmentSearch<'s, 'a> {
    allocator: &'s MeritOrderAllocator<'a>,
}

impl<'s, 'a> CommitmentSearch<'s, 'a> {
    pub const fn new(allocator: &'s MeritOrderAllocator<'a>) -> Self {
        Self { allocator }
    }

    /// Find the cheapest scenario that covers the load exactly, rounding residual included.
    ///
    /// The full fleet wins whenever it lands on the load and its residual can be placed.
    /// Otherwise, every leave-one-out scenario is evaluated, and the cheapest one that
    /// reconciles is picked, ties going to the lower excluded index.
    pub fn run(&self, load: Megawatts) -> Result<Candidate, AllocationError> {
        let full_fleet = self.allocator.allocate(Scenario::FullFleet, load);
        let residual = full_fleet.residual;
        if let Some(candidate) = self.accept(full_fleet) {
            return Ok(candidate);
        }

        let scenarios: Vec<Scenario> =
            self.allocator.dispatchable_indices().map(Scenario::Without).collect();
        self.evaluate(&scenarios, load)
            .into_iter()
            .filter_map(|candidate| self.accept(candidate))
            .min_by_key(|candidate| candidate.total_cost)
            .ok_or(AllocationError::UnallocatableLoad { load, residual })
    }

    /// Reconciled candidate, or [`None`] when it misses the load or its residual has nowhere to go.
    fn accept(&self, candidate: Candidate) -> Option<Candidate> {
        if candidate.is_exact() { reconcile(candidate, self.allocator).ok() } else { None }
    }

    #[cfg(not(feature = "parallel"))]
    fn evaluate(&self, scenarios: &[Scenario], load: Megawatts) -> Vec<Candidate> {
        scenarios.iter().map(|scenario| self.allocator.allocate(*scenario, load)).collect()
    }

    #[cfg(feature = "parallel")]
    fn evaluate(&self, scenarios: &[Scenario], load: Megawatts) -> Vec<Candidate> {
        scenarios.par_iter().map(|scenario| self.allocator.allocate(*scenario, load)).collect()
    }
}
