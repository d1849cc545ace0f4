use std::fmt::{Display, Formatter};

use itertools::Itertools;
use merit_quantities::{
    cost::Cost,
    percentage::Percentage,
    power::Megawatts,
    price::MegawattHourPrice,
};

use crate::core::{
    EPSILON,
    cost_model::CostModel,
    decision::{Decision, DecisionKind},
    error::AllocationError,
    is_exact,
    request::LoadRequest,
    unit::GeneratingUnit,
};

/// Unit together with its position in the request and its marginal cost.
#[derive(Copy, Clone, Debug)]
pub struct PricedUnit<'a> {
    pub index: usize,
    pub unit: &'a GeneratingUnit,
    pub marginal_cost: MegawattHourPrice,
}

/// Subset of dispatchable units allowed to run.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Scenario {
    FullFleet,

    /// Every dispatchable unit except the one at the index.
    Without(usize),
}

impl Scenario {
    pub const fn includes(self, index: usize) -> bool {
        match self {
            Self::FullFleet => true,
            Self::Without(excluded) => excluded != index,
        }
    }
}

impl Display for Scenario {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FullFleet => write!(f, "full fleet"),
            Self::Without(index) => write!(f, "without unit #{index}"),
        }
    }
}

/// One attempt to cover the load under a given [`Scenario`].
#[derive(Clone, Debug)]
#[must_use]
pub struct Candidate {
    pub scenario: Scenario,

    /// Outputs in the request order, one per unit.
    pub outputs: Vec<Megawatts>,

    /// Load left uncovered, negative when over-allocated.
    pub residual: Megawatts,

    pub total_cost: Cost,
    pub decisions: Vec<Decision>,
}

impl Candidate {
    #[must_use]
    pub fn is_exact(&self) -> bool {
        is_exact(self.residual)
    }
}

/// Greedy merit-order walk with renewable settlement and lookahead correction.
///
/// Prices are computed once, upon construction, and shared across all scenarios.
pub struct MeritOrderAllocator<'a> {
    /// All units in the request order.
    units: Vec<PricedUnit<'a>>,

    /// Renewable indices in the request order.
    renewables: Vec<usize>,

    /// Dispatchable indices by ascending marginal cost, ties kept in the request order.
    merit_order: Vec<usize>,

    availability: Percentage,
}

impl<'a> MeritOrderAllocator<'a> {
    pub fn try_new(
        request: &'a LoadRequest,
        cost_model: &CostModel,
    ) -> Result<Self, AllocationError> {
        let units = request
            .units
            .iter()
            .enumerate()
            .map(|(index, unit)| {
                cost_model
                    .marginal_cost(unit, &request.fuel_prices)
                    .map(|marginal_cost| PricedUnit { index, unit, marginal_cost })
            })
            .collect::<Result<Vec<_>, AllocationError>>()?;
        let renewables = units
            .iter()
            .filter(|priced| priced.unit.category.is_renewable())
            .map(|priced| priced.index)
            .collect();
        let merit_order = units
            .iter()
            .filter(|priced| priced.unit.is_dispatchable())
            .sorted_by_key(|priced| priced.marginal_cost)
            .map(|priced| priced.index)
            .collect();
        Ok(Self {
            units,
            renewables,
            merit_order,
            availability: request.fuel_prices.renewable_availability,
        })
    }

    #[must_use]
    pub fn unit(&self, index: usize) -> &PricedUnit<'a> {
        &self.units[index]
    }

    #[cfg(test)]
    pub fn merit_order(&self) -> &[usize] {
        &self.merit_order
    }

    /// Dispatchable indices in the request order.
    pub fn dispatchable_indices(&self) -> impl Iterator<Item = usize> {
        self.units.iter().filter(|priced| priced.unit.is_dispatchable()).map(|priced| priced.index)
    }

    pub fn allocate(&self, scenario: Scenario, load: Megawatts) -> Candidate {
        let dispatchables: Vec<&PricedUnit<'a>> = self
            .merit_order
            .iter()
            .filter(|index| scenario.includes(**index))
            .map(|index| &self.units[*index])
            .collect();
        let mut outputs = vec![Megawatts::ZERO; self.units.len()];
        let mut decisions = Vec::with_capacity(self.units.len() + 1);

        let mut remaining = load;
        for &index in &self.renewables {
            let kind = self.settle(index, remaining, &dispatchables);
            outputs[index] = kind.renewable_output();
            remaining -= kind.renewable_output();
            decisions.push(Decision::new(index, kind));
        }

        let walk = dispatch(&dispatchables, remaining);
        for (index, output) in walk.outputs {
            outputs[index] = output;
        }
        decisions.extend(walk.decisions);
        if let Scenario::Without(index) = scenario {
            decisions.push(Decision::new(index, DecisionKind::Excluded));
        }

        let total_cost =
            self.units.iter().zip(&outputs).map(|(priced, output)| *output * priced.marginal_cost).sum();
        Candidate { scenario, outputs, residual: walk.residual, total_cost, decisions }
    }

    /// Decide whether the renewable at the index is committed or curtailed.
    ///
    /// It is curtailed only when the dispatchable units miss the load left after committing it
    /// but land on the load when it is curtailed. Later renewables are not looked at, so
    /// every renewable costs at most two walks.
    fn settle(
        &self,
        index: usize,
        remaining: Megawatts,
        dispatchables: &[&PricedUnit<'a>],
    ) -> DecisionKind {
        let available = self.units[index].unit.max_output * self.availability.to_proportion();
        let output = available.min(remaining.max(Megawatts::ZERO));
        if output > EPSILON
            && !is_exact(dispatch(dispatchables, remaining - output).residual)
            && is_exact(dispatch(dispatchables, remaining).residual)
        {
            DecisionKind::Curtailed { available }
        } else {
            DecisionKind::Committed { available, output }
        }
    }
}

struct Dispatch {
    outputs: Vec<(usize, Megawatts)>,
    residual: Megawatts,
    decisions: Vec<Decision>,
}

/// Walk the dispatchable units in merit order.
fn dispatch(units: &[&PricedUnit], load: Megawatts) -> Dispatch {
    let mut remaining = load;
    let mut outputs = Vec::with_capacity(units.len());
    let mut decisions = Vec::new();

    for (position, priced) in units.iter().enumerate() {
        let unit = priced.unit;
        if remaining <= EPSILON {
            outputs.push((priced.index, Megawatts::ZERO));
            continue;
        }
        if remaining < unit.min_output {
            decisions.push(Decision::new(priced.index, DecisionKind::BelowMinimum { remaining }));
            outputs.push((priced.index, Megawatts::ZERO));
            continue;
        }

        let tentative = unit.max_output.min(remaining);
        let mut output = tentative;
        if let Some(next) = units.get(position + 1) {
            let leftover = remaining - tentative;
            if leftover > EPSILON && leftover < next.unit.min_output {
                output = (remaining - next.unit.min_output).max(unit.min_output);
                decisions.push(Decision::new(
                    priced.index,
                    DecisionKind::LookaheadCorrected { tentative, output },
                ));
            }
        }

        outputs.push((priced.index, output));
        remaining -= output;
    }

    Dispatch { outputs, residual: remaining, decisions }
}
