use std::fmt::{Debug, Display, Formatter};

use crate::Quantity;

/// Dimensionless share expressed in percent.
pub type Percentage = Quantity<0, 0, 0>;

impl Percentage {
    pub const HUNDRED: Self = Self::new(100.0);

    #[must_use]
    pub const fn to_proportion(self) -> f64 {
        0.01 * self.0.0
    }
}

impl Display for Percentage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}%", self.0)
    }
}

impl Debug for Percentage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}
