//! Wizard steps and phases

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ClaimError;

/// One screen of the declaration wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    /// Step 1: pick the kind of loss
    ClaimType,
    /// Step 2: when and where it happened
    DateAndLocation,
    /// Step 3: free-text account of the loss
    Description,
    /// Step 4: optional photos
    Photos,
    /// Step 5: review and send
    Confirmation,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::ClaimType,
        WizardStep::DateAndLocation,
        WizardStep::Description,
        WizardStep::Photos,
        WizardStep::Confirmation,
    ];

    pub const FIRST: WizardStep = WizardStep::ClaimType;
    pub const LAST: WizardStep = WizardStep::Confirmation;

    /// 1-based position shown in the stepper
    pub const fn number(self) -> u8 {
        match self {
            WizardStep::ClaimType => 1,
            WizardStep::DateAndLocation => 2,
            WizardStep::Description => 3,
            WizardStep::Photos => 4,
            WizardStep::Confirmation => 5,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::ClaimType => "Type de sinistre",
            WizardStep::DateAndLocation => "Date et Lieu",
            WizardStep::Description => "Description",
            WizardStep::Photos => "Photos",
            WizardStep::Confirmation => "Confirmation",
        }
    }

    /// The following step, or `self` on the last one
    pub fn next(self) -> WizardStep {
        Self::ALL
            .get(self.number() as usize)
            .copied()
            .unwrap_or(self)
    }

    /// The preceding step, or `self` on the first one
    pub fn previous(self) -> WizardStep {
        match self.number() {
            1 => self,
            n => Self::ALL[(n - 2) as usize],
        }
    }

    pub const fn is_first(self) -> bool {
        self.number() == Self::FIRST.number()
    }

    pub const fn is_last(self) -> bool {
        self.number() == Self::LAST.number()
    }
}

impl TryFrom<u8> for WizardStep {
    type Error = ClaimError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1..=5 => Ok(Self::ALL[(value - 1) as usize]),
            other => Err(ClaimError::InvalidStep(other)),
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.number(), self.title())
    }
}

/// Where the wizard currently is
///
/// ```text
/// Editing(1) <-> Editing(2) <-> ... <-> Editing(5) -> Submitting
///      ^                                                   |
///      +------------------- success -----------------------+
///                   failure -> Editing(5)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "step", rename_all = "snake_case")]
pub enum WizardPhase {
    Editing(WizardStep),
    Submitting,
}
