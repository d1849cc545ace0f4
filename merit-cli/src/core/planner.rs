use bon::Builder;

use crate::core::{
    allocation::Allocation,
    allocator::MeritOrderAllocator,
    cost_model::CostModel,
    error::AllocationError,
    feasibility::{self, Feasibility},
    request::LoadRequest,
    search::CommitmentSearch,
};

/// Single-interval economic dispatch of one [`LoadRequest`].
#[derive(Builder)]
pub struct Planner<'a> {
    request: &'a LoadRequest,

    #[builder(default)]
    cost_model: CostModel,
}

impl Planner<'_> {
    /// Cover the requested load at the lowest cost the leave-one-out search can find.
    ///
    /// Pure and deterministic: the same request always yields the same allocation or error.
    pub fn allocate(&self) -> Result<Allocation, AllocationError> {
        if feasibility::check(self.request)? == Feasibility::Idle {
            return Ok(Allocation::idle(self.request));
        }
        let allocator = MeritOrderAllocator::try_new(self.request, &self.cost_model)?;
        let candidate = CommitmentSearch::new(&allocator).run(self.request.load)?;
        Ok(Allocation::from_candidate(self.request, candidate))
    }
}

#[cfg(test)]
pub fn allocate(request: &LoadRequest) -> Result<Allocation, AllocationError> {
    Planner::builder().request(request).build().allocate()
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use approx::assert_abs_diff_eq;
    use merit_quantities::power::Megawatts;

    use super::*;
    use crate::core::{
        TOLERANCE,
        allocator::Scenario,
        decision::DecisionKind,
        request::FuelPrices,
        unit::GeneratingUnit,
    };

    fn outputs(allocation: &Allocation) -> Vec<f64> {
        allocation.assignments.iter().map(|assignment| assignment.output.into_inner()).collect()
    }

    #[test]
    fn load_exceeds_capacity() {
        let request = LoadRequest::new(
            500.0,
            vec![GeneratingUnit::gas("gas1", 0.5, 50, 100), GeneratingUnit::gas("gas2", 0.5, 50, 100)],
            FuelPrices::with_availability(50),
        );
        assert!(matches!(allocate(&request), Err(AllocationError::LoadExceedsCapacity { .. })));
    }

    #[test]
    fn load_below_minimum() {
        let request = LoadRequest::new(
            20.0,
            vec![GeneratingUnit::gas("gas", 0.5, 50, 100), GeneratingUnit::wind("wind", 50)],
            FuelPrices::with_availability(50),
        );
        assert!(matches!(allocate(&request), Err(AllocationError::LoadBelowMinimum { .. })));
    }

    #[test]
    fn renewable_covers_small_load() {
        let request = LoadRequest::new(
            25.0,
            vec![GeneratingUnit::gas("gas", 0.5, 10, 100), GeneratingUnit::wind("wind", 50)],
            FuelPrices::with_availability(50),
        );
        let allocation = allocate(&request).unwrap();
        assert_eq!(outputs(&allocation), [0.0, 25.0]);
    }

    #[test]
    fn renewable_and_dispatchable_share_load() {
        let request = LoadRequest::new(
            50.0,
            vec![GeneratingUnit::gas("gas", 0.5, 10, 100), GeneratingUnit::wind("wind", 50)],
            FuelPrices::with_availability(50),
        );
        let allocation = allocate(&request).unwrap();
        assert_eq!(outputs(&allocation), [25.0, 25.0]);
        // 25 × (15 / 0.5 + 6):
        assert_abs_diff_eq!(allocation.total_cost.into_inner(), 900.0);
    }

    fn five_gas_units() -> Vec<GeneratingUnit> {
        [0.5, 0.6, 0.8, 0.3, 0.45]
            .into_iter()
            .enumerate()
            .map(|(i, efficiency)| GeneratingUnit::gas(&format!("gas{}", i + 1), efficiency, 10, 100))
            .collect()
    }

    #[test]
    fn most_efficient_unit_takes_small_load() {
        let request = LoadRequest::new(20.0, five_gas_units(), FuelPrices::with_availability(50));
        let allocation = allocate(&request).unwrap();
        assert_eq!(outputs(&allocation), [0.0, 0.0, 20.0, 0.0, 0.0]);
    }

    #[test]
    fn least_efficient_unit_takes_the_tail() {
        let request = LoadRequest::new(490.0, five_gas_units(), FuelPrices::with_availability(50));
        let allocation = allocate(&request).unwrap();
        assert_eq!(outputs(&allocation), [100.0, 100.0, 100.0, 90.0, 100.0]);
    }

    fn high_and_low_minimum() -> Vec<GeneratingUnit> {
        vec![
            GeneratingUnit::gas("gas1", 0.5, 110, 200),
            GeneratingUnit::gas("gas2", 0.8, 80, 150),
            GeneratingUnit::wind("wind", 50),
        ]
    }

    /// Only the cheaper unit with the lower minimum runs when there is no wind.
    #[test]
    fn lower_minimum_unit_takes_everything() {
        let request = LoadRequest::new(125.0, high_and_low_minimum(), FuelPrices::with_availability(0));
        let allocation = allocate(&request).unwrap();
        assert_eq!(outputs(&allocation), [0.0, 125.0, 0.0]);
    }

    #[test]
    fn wind_displaces_gas() {
        let request = LoadRequest::new(125.0, high_and_low_minimum(), FuelPrices::with_availability(50));
        let allocation = allocate(&request).unwrap();
        assert_eq!(outputs(&allocation), [0.0, 100.0, 25.0]);
    }

    #[test]
    fn lookahead_splits_between_units() {
        let request = LoadRequest::new(200.0, high_and_low_minimum(), FuelPrices::with_availability(0));
        let allocation = allocate(&request).unwrap();
        assert_eq!(outputs(&allocation), [110.0, 90.0, 0.0]);
        assert!(allocation.events().any(|(name, kind)| {
            name == "gas2" && matches!(kind, DecisionKind::LookaheadCorrected { .. })
        }));
    }

    #[test]
    fn excluded_unit_is_reported() {
        let request = LoadRequest::new(
            105.0,
            vec![
                GeneratingUnit::gas("a", 0.8, 50, 100),
                GeneratingUnit::gas("b", 0.5, 60, 100),
                GeneratingUnit::turbojet("c", 0.3, 0, 10),
            ],
            FuelPrices::with_availability(50),
        );
        let allocation = allocate(&request).unwrap();
        assert_eq!(allocation.scenario, Some(Scenario::Without(1)));
        assert_eq!(outputs(&allocation), [100.0, 0.0, 5.0]);
        assert!(allocation.events().any(|event| event == ("b", DecisionKind::Excluded)));
    }

    #[test]
    fn unallocatable_load() {
        let request = LoadRequest::new(
            105.0,
            vec![GeneratingUnit::gas("a", 0.8, 50, 100), GeneratingUnit::gas("b", 0.5, 60, 100)],
            FuelPrices::with_availability(50),
        );
        assert!(matches!(allocate(&request), Err(AllocationError::UnallocatableLoad { .. })));
    }

    /// Wind is never adjusted and the only dispatchable unit is already at its maximum,
    /// so the 0.03 MW left over cannot be placed anywhere.
    #[test]
    fn unplaceable_residual_is_unallocatable() {
        let request = LoadRequest::new(
            125.03,
            vec![GeneratingUnit::wind("wind", 50), GeneratingUnit::gas("gas", 0.5, 10, 100)],
            FuelPrices::with_availability(50),
        );
        let error = allocate(&request).unwrap_err();
        assert!(matches!(error, AllocationError::UnallocatableLoad { .. }));
        assert!(!error.is_internal());
    }

    /// Neither gas unit alone nor both together land on the load once the residual is placed.
    #[test]
    fn load_just_above_reachable_is_unallocatable() {
        let request = LoadRequest::new(
            100.03,
            vec![GeneratingUnit::gas("a", 0.8, 50, 100), GeneratingUnit::gas("b", 0.5, 60, 100)],
            FuelPrices::with_availability(0),
        );
        assert!(matches!(allocate(&request), Err(AllocationError::UnallocatableLoad { .. })));
    }

    /// Every renewable costs a bounded number of walks, so dozens of them on an
    /// infeasible fleet fail fast.
    #[test]
    fn many_renewables_on_infeasible_fleet() {
        let mut units =
            vec![GeneratingUnit::gas("a", 0.8, 50, 100), GeneratingUnit::gas("b", 0.5, 60, 100)];
        units.extend((0..40).map(|i| GeneratingUnit::wind(&format!("wind{i}"), 1)));
        let request = LoadRequest::new(105.0, units, FuelPrices::with_availability(1));

        let start = Instant::now();
        let result = allocate(&request);
        assert!(start.elapsed() < Duration::from_secs(1), "took {:?}", start.elapsed());
        assert!(matches!(result, Err(AllocationError::UnallocatableLoad { .. })));
    }

    #[test]
    fn empty_fleet_is_idle() {
        let request = LoadRequest::new(100.0, vec![], FuelPrices::with_availability(50));
        let allocation = allocate(&request).unwrap();
        assert!(allocation.assignments.is_empty());
        assert_eq!(allocation.scenario, None);
    }

    #[test]
    fn zero_load_is_idle() {
        let request = LoadRequest::new(0.0, high_and_low_minimum(), FuelPrices::with_availability(50));
        let allocation = allocate(&request).unwrap();
        assert_eq!(outputs(&allocation), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn misconfigured_unit_fails() {
        let request = LoadRequest::new(
            50.0,
            vec![GeneratingUnit::gas("broken", f64::NAN, 10, 100)],
            FuelPrices::with_availability(50),
        );
        assert!(matches!(allocate(&request), Err(AllocationError::Configuration { .. })));
    }

    /// Exactness, bounds, completeness, all-or-nothing renewables, and determinism over
    /// a handful of fleets and loads.
    #[test]
    fn allocation_properties() {
        let fleets = [five_gas_units(), high_and_low_minimum(), {
            let mut units = five_gas_units();
            units.push(GeneratingUnit::wind("wind1", 150));
            units.push(GeneratingUnit::wind("wind2", 36));
            units.push(GeneratingUnit::turbojet("tj1", 0.3, 0, 16));
            units
        }];
        for units in fleets {
            for load in [10.0, 37.5, 99.9, 125.0, 260.4, 333.3, 480.0] {
                for availability in [0, 35, 100] {
                    let request = LoadRequest::new(
                        load,
                        units.clone(),
                        FuelPrices::with_availability(availability),
                    );
                    let Ok(allocation) = allocate(&request) else {
                        continue;
                    };
                    assert_eq!(allocation.assignments.len(), request.units.len());
                    let mut remaining = request.load;
                    for (unit, assignment) in request.units.iter().zip(&allocation.assignments) {
                        assert_eq!(unit.name, assignment.name);
                        assert!(unit.admits(assignment.output), "{}: {:?}", unit.name, assignment.output);
                        if unit.category.is_renewable() {
                            let available = unit.max_output
                                * request.fuel_prices.renewable_availability.to_proportion();
                            let committed = available.min(remaining.max(Megawatts::ZERO));
                            assert!(
                                assignment.output == Megawatts::ZERO || assignment.output == committed,
                                "{}: {:?} is neither curtailed nor {:?}",
                                unit.name,
                                assignment.output,
                                committed,
                            );
                            remaining -= assignment.output;
                        }
                    }
                    assert!(
                        (allocation.total_output() - request.load).abs() < TOLERANCE,
                        "load {load}, availability {availability}",
                    );
                    let again = allocate(&request).unwrap();
                    assert_eq!(allocation.assignments, again.assignments);
                }
            }
        }
    }

    #[test]
    fn custom_cost_model() {
        let request = LoadRequest::new(
            50.0,
            vec![GeneratingUnit::gas("gas", 0.5, 10, 100)],
            FuelPrices::with_availability(0),
        );
        let allocation = Planner::builder()
            .request(&request)
            .cost_model(CostModel::builder().gas_emission_intensity(0.0.into()).build())
            .build()
            .allocate()
            .unwrap();
        assert_abs_diff_eq!(allocation.total_cost.into_inner(), 1500.0);
        assert_eq!(allocation.total_output(), Megawatts::from(50));
    }
}
