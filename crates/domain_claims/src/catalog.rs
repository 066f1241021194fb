//! Catalog of declarable claim types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ClaimError;

/// Line of business a claim type belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimCategory {
    Auto,
    Home,
}

/// Kind of loss the customer is declaring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClaimType {
    /// Road accident
    AutoAccident,
    /// Vehicle theft
    AutoTheft,
    /// Windscreen or window breakage
    AutoGlass,
    /// Water damage
    HomeWater,
    /// Fire
    HomeFire,
    /// Burglary
    HomeTheft,
}

impl ClaimType {
    const ALL: [ClaimType; 6] = [
        ClaimType::AutoAccident,
        ClaimType::AutoTheft,
        ClaimType::AutoGlass,
        ClaimType::HomeWater,
        ClaimType::HomeFire,
        ClaimType::HomeTheft,
    ];

    /// All claim types in display order
    pub fn all() -> &'static [ClaimType] {
        &Self::ALL
    }

    /// Stable wire identifier
    pub fn id(&self) -> &'static str {
        match self {
            ClaimType::AutoAccident => "auto-accident",
            ClaimType::AutoTheft => "auto-theft",
            ClaimType::AutoGlass => "auto-glass",
            ClaimType::HomeWater => "home-water",
            ClaimType::HomeFire => "home-fire",
            ClaimType::HomeTheft => "home-theft",
        }
    }

    /// Label shown to the customer
    pub fn label(&self) -> &'static str {
        match self {
            ClaimType::AutoAccident => "Accident de voiture",
            ClaimType::AutoTheft => "Vol de véhicule",
            ClaimType::AutoGlass => "Bris de glace",
            ClaimType::HomeWater => "Dégât des eaux",
            ClaimType::HomeFire => "Incendie",
            ClaimType::HomeTheft => "Cambriolage",
        }
    }

    pub fn category(&self) -> ClaimCategory {
        match self {
            ClaimType::AutoAccident | ClaimType::AutoTheft | ClaimType::AutoGlass => {
                ClaimCategory::Auto
            }
            ClaimType::HomeWater | ClaimType::HomeFire | ClaimType::HomeTheft => {
                ClaimCategory::Home
            }
        }
    }
}

impl fmt::Display for ClaimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ClaimType {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.id() == s)
            .ok_or_else(|| ClaimError::UnknownClaimType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        for claim_type in ClaimType::all() {
            assert_eq!(claim_type.id().parse::<ClaimType>().unwrap(), *claim_type);
        }
    }

    #[test]
    fn test_serde_uses_wire_id() {
        let json = serde_json::to_string(&ClaimType::HomeWater).unwrap();
        assert_eq!(json, "\"home-water\"");
    }

    #[test]
    fn test_unknown_id() {
        assert!(matches!(
            "pet-injury".parse::<ClaimType>(),
            Err(ClaimError::UnknownClaimType(id)) if id == "pet-injury"
        ));
        assert!("".parse::<ClaimType>().is_err());
    }

    #[test]
    fn test_categories() {
        assert_eq!(ClaimType::AutoGlass.category(), ClaimCategory::Auto);
        assert_eq!(ClaimType::HomeTheft.category(), ClaimCategory::Home);
    }
}
