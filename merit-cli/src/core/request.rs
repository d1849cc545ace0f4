use bon::Builder;
use merit_quantities::{
    percentage::Percentage,
    power::Megawatts,
    price::{MegawattHourPrice, TonPrice},
};

use crate::core::unit::GeneratingUnit;

#[derive(Copy, Clone, Debug, Builder)]
#[must_use]
pub struct FuelPrices {
    pub gas: MegawattHourPrice,
    pub kerosene: MegawattHourPrice,
    pub carbon: TonPrice,

    /// Share of the nameplate output every renewable unit can deliver in this interval.
    pub renewable_availability: Percentage,
}

/// Validated demand for one planning interval.
#[derive(Clone, Debug, Builder)]
#[must_use]
pub struct LoadRequest {
    pub load: Megawatts,
    pub units: Vec<GeneratingUnit>,
    pub fuel_prices: FuelPrices,
}

impl LoadRequest {
    pub fn total_max_output(&self) -> Megawatts {
        self.units.iter().map(|unit| unit.max_output).sum()
    }

    pub fn dispatchable_units(&self) -> impl Iterator<Item = &GeneratingUnit> {
        self.units.iter().filter(|unit| unit.is_dispatchable())
    }
}

#[cfg(test)]
impl FuelPrices {
    /// Gas 15 €/MWh, kerosene 50 €/MWh, CO₂ 20 €/t, and the given wind availability.
    pub fn with_availability(availability: i32) -> Self {
        Self::builder()
            .gas(MegawattHourPrice::from(15))
            .kerosene(MegawattHourPrice::from(50))
            .carbon(TonPrice::from(20))
            .renewable_availability(Percentage::from(availability))
            .build()
    }
}

#[cfg(test)]
impl LoadRequest {
    pub fn new(load: f64, units: Vec<GeneratingUnit>, fuel_prices: FuelPrices) -> Self {
        Self { load: Megawatts::from(load), units, fuel_prices }
    }
}
