use std::collections::{BTreeMap, HashSet};

use thiserror::Error;

use crate::api::payload::{Payload, PowerplantType};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Violation {
    /// Path to the offending field, in the wire names.
    pub field: String,

    pub message: String,
}

#[derive(Debug, Error)]
#[error("payload is invalid: {}", .0.iter().map(|violation| format!("{}: {}", violation.field, violation.message)).collect::<Vec<_>>().join("; "))]
pub struct ValidationErrors(pub Vec<Violation>);

impl ValidationErrors {
    /// Messages grouped by field.
    #[must_use]
    pub fn by_field(&self) -> BTreeMap<String, Vec<String>> {
        let mut fields: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for violation in &self.0 {
            fields.entry(violation.field.clone()).or_default().push(violation.message.clone());
        }
        fields
    }
}

#[derive(Default)]
struct Violations(Vec<Violation>);

impl Violations {
    fn ensure(&mut self, is_valid: bool, field: impl Into<String>, message: &str) {
        if !is_valid {
            self.0.push(Violation { field: field.into(), message: message.to_owned() });
        }
    }
}

const fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Check the payload structure, collecting every violation.
pub fn validate(payload: &Payload) -> Result<(), ValidationErrors> {
    let mut violations = Violations::default();

    violations.ensure(
        is_non_negative(payload.load.into_inner()),
        "load",
        "load must be a non-negative number",
    );

    let fuels = &payload.fuels;
    violations.ensure(
        is_non_negative(fuels.gas.into_inner()),
        "fuels.gas(euro/MWh)",
        "gas price cannot be negative",
    );
    violations.ensure(
        is_non_negative(fuels.kerosine.into_inner()),
        "fuels.kerosine(euro/MWh)",
        "kerosine price cannot be negative",
    );
    violations.ensure(
        is_non_negative(fuels.co2.into_inner()),
        "fuels.co2(euro/ton)",
        "CO₂ price cannot be negative",
    );
    violations.ensure(
        is_non_negative(fuels.wind.into_inner()) && fuels.wind.into_inner() <= 100.0,
        "fuels.wind(%)",
        "wind must be between 0 and 100",
    );

    let mut names = HashSet::with_capacity(payload.powerplants.len());
    for (i, plant) in payload.powerplants.iter().enumerate() {
        let field = |name: &str| format!("powerplants[{i}].{name}");
        let (pmin, pmax) = (plant.pmin.into_inner(), plant.pmax.into_inner());

        violations.ensure(!plant.name.trim().is_empty(), field("name"), "name must not be empty");
        violations.ensure(
            names.insert(plant.name.as_str()),
            field("name"),
            "name must be unique",
        );
        violations.ensure(is_non_negative(pmin), field("pmin"), "pmin must be >= 0");
        violations.ensure(pmax.is_finite() && pmax > 0.0, field("pmax"), "pmax must be > 0");
        violations.ensure(pmax > pmin, field("pmax"), "pmax must be > pmin");
        if plant.kind == PowerplantType::WindTurbine {
            violations.ensure(
                (plant.efficiency - 1.0).abs() <= f64::EPSILON,
                field("efficiency"),
                "efficiency of a wind turbine must be 1",
            );
        } else {
            violations.ensure(
                plant.efficiency.is_finite() && plant.efficiency > 0.0 && plant.efficiency <= 1.0,
                field("efficiency"),
                "efficiency must be within (0, 1]",
            );
        }
    }

    if violations.0.is_empty() { Ok(()) } else { Err(ValidationErrors(violations.0)) }
}
