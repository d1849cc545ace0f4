use merit_quantities::{
    percentage::Percentage,
    power::Megawatts,
    price::{MegawattHourPrice, TonPrice},
};
use serde::{Deserialize, Serialize};

use crate::{
    api::validation::{ValidationErrors, validate},
    core::{
        request::{FuelPrices, LoadRequest},
        unit::{Category, Fuel, GeneratingUnit},
    },
};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Payload {
    pub load: Megawatts,
    pub fuels: Fuels,
    pub powerplants: Vec<Powerplant>,
}

#[derive(Copy, Clone, Debug, Deserialize, Serialize)]
pub struct Fuels {
    #[serde(rename = "gas(euro/MWh)")]
    pub gas: MegawattHourPrice,

    #[serde(rename = "kerosine(euro/MWh)")]
    pub kerosine: MegawattHourPrice,

    #[serde(rename = "co2(euro/ton)")]
    pub co2: TonPrice,

    #[serde(rename = "wind(%)")]
    pub wind: Percentage,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Powerplant {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: PowerplantType,

    pub efficiency: f64,
    pub pmin: Megawatts,
    pub pmax: Megawatts,
}

#[derive(Copy, Clone, Debug, Deserialize, Serialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum PowerplantType {
    GasFired,
    TurboJet,
    WindTurbine,
}

impl From<PowerplantType> for Category {
    fn from(kind: PowerplantType) -> Self {
        match kind {
            PowerplantType::GasFired => Self::Dispatchable(Fuel::Gas),
            PowerplantType::TurboJet => Self::Dispatchable(Fuel::Kerosene),
            PowerplantType::WindTurbine => Self::Renewable,
        }
    }
}

impl TryFrom<Payload> for LoadRequest {
    type Error = ValidationErrors;

    fn try_from(payload: Payload) -> Result<Self, Self::Error> {
        validate(&payload)?;
        let fuel_prices = FuelPrices::builder()
            .gas(payload.fuels.gas)
            .kerosene(payload.fuels.kerosine)
            .carbon(payload.fuels.co2)
            .renewable_availability(payload.fuels.wind)
            .build();
        let units = payload
            .powerplants
            .into_iter()
            .map(|plant| {
                GeneratingUnit::builder()
                    .name(plant.name)
                    .category(plant.kind.into())
                    .efficiency(plant.efficiency)
                    .min_output(plant.pmin)
                    .max_output(plant.pmax)
                    .build()
            })
            .collect();
        Ok(Self::builder().load(payload.load).units(units).fuel_prices(fuel_prices).build())
    }
}
