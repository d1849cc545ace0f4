use std::fmt::{Display, Formatter};

use merit_quantities::power::Megawatts;

/// Structured explanation of what the allocator did with a unit.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Decision {
    /// Index of the unit in the request.
    pub unit: usize,

    pub kind: DecisionKind,
}

impl Decision {
    pub const fn new(unit: usize, kind: DecisionKind) -> Self {
        Self { unit, kind }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DecisionKind {
    /// Renewable output accepted as available, capped at the remaining load.
    Committed { available: Megawatts, output: Megawatts },

    /// Renewable output dropped to zero, committing it would strand the remainder.
    Curtailed { available: Megawatts },

    /// Dispatchable unit left idle because the remaining load is below its minimum output.
    BelowMinimum { remaining: Megawatts },

    /// Dispatchable output reduced so that the next unit in merit order can take the rest.
    LookaheadCorrected { tentative: Megawatts, output: Megawatts },

    /// Unit left out of the winning commitment scenario.
    Excluded,

    /// Rounding residual moved onto this unit.
    Reconciled { adjustment: Megawatts },
}

impl DecisionKind {
    /// Renewable output implied by the decision.
    pub const fn renewable_output(self) -> Megawatts {
        match self {
            Self::Committed { output, .. } => output,
            _ => Megawatts::ZERO,
        }
    }
}

impl Display for DecisionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Committed { available, output } => {
                write!(f, "committed {output} of {available} available")
            }
            Self::Curtailed { available } => {
                write!(f, "curtailed {available}, the remainder would not be dispatchable")
            }
            Self::BelowMinimum { remaining } => {
                write!(f, "idle, remaining {remaining} is below the minimum output")
            }
            Self::LookaheadCorrected { tentative, output } => {
                write!(f, "reduced from {tentative} to {output} to leave room for the next unit")
            }
            Self::Excluded => write!(f, "excluded by the commitment search"),
            Self::Reconciled { adjustment } => write!(f, "absorbed a residual of {adjustment:?}"),
        }
    }
}
