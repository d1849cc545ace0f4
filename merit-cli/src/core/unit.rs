use std::fmt::{Display, Formatter};

use bon::Builder;
use merit_quantities::power::Megawatts;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Fuel {
    Gas,
    Kerosene,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Category {
    /// Output is chosen by the allocator and priced by the fuel it burns.
    Dispatchable(Fuel),

    /// Output is dictated by the availability factor and costs nothing.
    Renewable,
}

impl Category {
    pub const fn is_renewable(self) -> bool {
        matches!(self, Self::Renewable)
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dispatchable(Fuel::Gas) => write!(f, "Gas-fired"),
            Self::Dispatchable(Fuel::Kerosene) => write!(f, "Turbojet"),
            Self::Renewable => write!(f, "Wind"),
        }
    }
}

#[derive(Clone, Debug, Builder)]
#[must_use]
pub struct GeneratingUnit {
    #[builder(into)]
    pub name: String,

    pub category: Category,

    /// Lowest output at which the unit may run once committed.
    pub min_output: Megawatts,

    pub max_output: Megawatts,

    /// Fuel-to-power conversion efficiency, exactly 1 for renewables.
    #[builder(default = 1.0)]
    pub efficiency: f64,
}

impl GeneratingUnit {
    pub const fn is_dispatchable(&self) -> bool {
        !self.category.is_renewable()
    }

    /// Whether the output is either idle or within the operating bounds.
    #[must_use]
    pub fn admits(&self, output: Megawatts) -> bool {
        output == Megawatts::ZERO || (self.min_output <= output && output <= self.max_output)
    }
}

#[cfg(test)]
impl GeneratingUnit {
    pub fn gas(name: &str, efficiency: f64, min_output: i32, max_output: i32) -> Self {
        Self::builder()
            .name(name)
            .category(Category::Dispatchable(Fuel::Gas))
            .efficiency(efficiency)
            .min_output(Megawatts::from(min_output))
            .max_output(Megawatts::from(max_output))
            .build()
    }

    pub fn turbojet(name: &str, efficiency: f64, min_output: i32, max_output: i32) -> Self {
        Self::builder()
            .name(name)
            .category(Category::Dispatchable(Fuel::Kerosene))
            .efficiency(efficiency)
            .min_output(Megawatts::from(min_output))
            .max_output(Megawatts::from(max_output))
            .build()
    }

    pub fn wind(name: &str, max_output: i32) -> Self {
        Self::builder()
            .name(name)
            .category(Category::Renewable)
            .min_output(Megawatts::ZERO)
            .max_output(Megawatts::from(max_output))
            .build()
    }
}
