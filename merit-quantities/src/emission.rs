use std::{
    fmt::{Debug, Display, Formatter},
    ops::Mul,
};

use ordered_float::OrderedFloat;

use crate::{
    Quantity,
    price::{MegawattHourPrice, TonPrice},
};

/// Tonnes of CO₂ emitted per megawatt-hour of output.
pub type EmissionIntensity = Quantity<-1, 1, 0>;

impl EmissionIntensity {
    /// Typical intensity of a gas-fired unit.
    pub const GAS_FIRED: Self = Self(OrderedFloat(0.3));
}

impl Display for EmissionIntensity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} t/MWh", self.0)
    }
}

impl Debug for EmissionIntensity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}t/MWh", self.0)
    }
}

impl Mul<TonPrice> for EmissionIntensity {
    type Output = MegawattHourPrice;

    fn mul(self, rhs: TonPrice) -> Self::Output {
        Quantity(self.0 * rhs.0)
    }
}
