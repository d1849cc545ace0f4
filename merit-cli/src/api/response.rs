use merit_quantities::power::Megawatts;
use serde::{Deserialize, Serialize};

use crate::core::allocation::Allocation;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct PlantOutput {
    pub name: String,

    /// Output rounded to one decimal place.
    pub p: Megawatts,
}

/// Response body: one entry per plant in the request order.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ProductionPlan(pub Vec<PlantOutput>);

impl From<&Allocation> for ProductionPlan {
    fn from(allocation: &Allocation) -> Self {
        Self(
            allocation
                .assignments
                .iter()
                .map(|assignment| PlantOutput {
                    name: assignment.name.clone(),
                    // Adding zero turns `-0.0` into `0.0`:
                    p: assignment.output.round_to_tenths() + Megawatts::ZERO,
                })
                .collect(),
        )
    }
}
