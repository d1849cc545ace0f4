use bon::Builder;
use merit_quantities::{emission::EmissionIntensity, price::MegawattHourPrice};

use crate::core::{
    error::AllocationError,
    request::FuelPrices,
    unit::{Category, Fuel, GeneratingUnit},
};

/// Marginal cost of one megawatt-hour from a given unit.
#[derive(Copy, Clone, Debug, Builder)]
pub struct CostModel {
    /// CO₂ emitted by gas-fired units per megawatt-hour of output.
    #[builder(default = EmissionIntensity::GAS_FIRED)]
    gas_emission_intensity: EmissionIntensity,
}

impl Default for CostModel {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl CostModel {
    pub fn marginal_cost(
        &self,
        unit: &GeneratingUnit,
        prices: &FuelPrices,
    ) -> Result<MegawattHourPrice, AllocationError> {
        match unit.category {
            Category::Dispatchable(fuel) => {
                if !(unit.efficiency.is_finite() && unit.efficiency > 0.0 && unit.efficiency <= 1.0)
                {
                    return Err(AllocationError::Configuration {
                        unit: unit.name.clone(),
                        reason: format!("efficiency {} is outside (0, 1]", unit.efficiency),
                    });
                }
                Ok(match fuel {
                    Fuel::Gas => {
                        prices.gas / unit.efficiency + self.gas_emission_intensity * prices.carbon
                    }
                    Fuel::Kerosene => prices.kerosene / unit.efficiency,
                })
            }
            Category::Renewable => {
                if (unit.efficiency - 1.0).abs() > f64::EPSILON {
                    return Err(AllocationError::Configuration {
                        unit: unit.name.clone(),
                        reason: format!("renewable efficiency must be 1, got {}", unit.efficiency),
                    });
                }
                Ok(MegawattHourPrice::ZERO)
            }
        }
    }
}
