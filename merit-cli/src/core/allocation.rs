use merit_quantities::{cost::Cost, power::Megawatts};

use crate::core::{
    allocator::{Candidate, Scenario},
    decision::{Decision, DecisionKind},
    request::LoadRequest,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    pub name: String,
    pub output: Megawatts,
}

/// Final per-unit outputs, one per requested unit and in the request order.
#[derive(Clone, Debug)]
#[must_use]
pub struct Allocation {
    pub assignments: Vec<Assignment>,
    pub total_cost: Cost,

    /// Winning commitment scenario, [`None`] when nothing had to be allocated.
    pub scenario: Option<Scenario>,

    pub decisions: Vec<Decision>,
}

impl Allocation {
    /// Every unit stays off.
    pub fn idle(request: &LoadRequest) -> Self {
        Self {
            assignments: request
                .units
                .iter()
                .map(|unit| Assignment { name: unit.name.clone(), output: Megawatts::ZERO })
                .collect(),
            total_cost: Cost::ZERO,
            scenario: None,
            decisions: Vec::new(),
        }
    }

    pub fn from_candidate(request: &LoadRequest, candidate: Candidate) -> Self {
        Self {
            assignments: request
                .units
                .iter()
                .zip(candidate.outputs)
                .map(|(unit, output)| Assignment { name: unit.name.clone(), output })
                .collect(),
            total_cost: candidate.total_cost,
            scenario: Some(candidate.scenario),
            decisions: candidate.decisions,
        }
    }

    pub fn total_output(&self) -> Megawatts {
        self.assignments.iter().map(|assignment| assignment.output).sum()
    }

    /// Decisions labelled with the unit names.
    pub fn events(&self) -> impl Iterator<Item = (&str, DecisionKind)> {
        self.decisions
            .iter()
            .map(|decision| (self.assignments[decision.unit].name.as_str(), decision.kind))
    }
}
