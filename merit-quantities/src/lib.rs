pub mod cost;
pub mod emission;
pub mod percentage;
pub mod power;
pub mod price;

use std::ops::{Div, Mul};

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Dimension-typed scalar.
///
/// The const parameters are the exponents of power (MW), mass (tonnes of CO₂) and money (€).
/// Everything is implicitly per one dispatch interval of one hour, so a megawatt is also
/// a megawatt-hour here.
#[derive(
    Clone,
    Copy,
    Deserialize,
    Eq,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::From,
    derive_more::FromStr,
    derive_more::Neg,
    derive_more::Sub,
    derive_more::SubAssign,
    derive_more::Sum,
)]
#[from(i32, f64, OrderedFloat<f64>)]
#[must_use]
pub struct Quantity<const POWER: isize, const MASS: isize, const COST: isize>(
    pub OrderedFloat<f64>,
);

impl<const POWER: isize, const MASS: isize, const COST: isize> Quantity<POWER, MASS, COST> {
    pub const ZERO: Self = Self(OrderedFloat(0.0));

    pub const fn new(value: f64) -> Self {
        Self(OrderedFloat(value))
    }

    #[must_use]
    pub const fn into_inner(self) -> f64 {
        self.0.0
    }

    pub const fn abs(mut self) -> Self {
        self.0 = OrderedFloat(self.0.0.abs());
        self
    }
}

impl<const POWER: isize, const MASS: isize, const COST: isize> Mul<f64>
    for Quantity<POWER, MASS, COST>
{
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl<const POWER: isize, const MASS: isize, const COST: isize> Div<f64>
    for Quantity<POWER, MASS, COST>
{
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        Self(self.0 / rhs)
    }
}

impl<const POWER: isize, const MASS: isize, const COST: isize> Div<Self>
    for Quantity<POWER, MASS, COST>
{
    type Output = OrderedFloat<f64>;

    fn div(self, rhs: Self) -> Self::Output {
        self.0 / rhs.0
    }
}
