use std::fmt::{Debug, Display, Formatter};

use crate::Quantity;

/// Euro per megawatt-hour.
pub type MegawattHourPrice = Quantity<-1, 0, 1>;

impl Display for MegawattHourPrice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} €/MWh", self.0)
    }
}

impl Debug for MegawattHourPrice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}€/MWh", self.0)
    }
}

/// Euro per tonne of emitted CO₂.
pub type TonPrice = Quantity<0, -1, 1>;

impl Display for TonPrice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} €/t", self.0)
    }
}

impl Debug for TonPrice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}€/t", self.0)
    }
}
