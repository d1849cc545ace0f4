use std::{
    fmt::{Debug, Display, Formatter},
    ops::Mul,
};

use ordered_float::OrderedFloat;

use crate::{Quantity, cost::Cost, price::MegawattHourPrice};

pub type Megawatts = Quantity<1, 0, 0>;

impl Megawatts {
    /// Round to the reporting precision of one decimal place.
    pub fn round_to_tenths(self) -> Self {
        Self(OrderedFloat((self.0.0 * 10.0).round() / 10.0))
    }
}

impl Display for Megawatts {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} MW", self.0)
    }
}

impl Debug for Megawatts {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}MW", self.0)
    }
}

impl Mul<MegawattHourPrice> for Megawatts {
    type Output = Cost;

    fn mul(self, rhs: MegawattHourPrice) -> Self::Output {
        Quantity(self.0 * rhs.0)
    }
}
