//! # Global Settings
//!
//! Settings shared by every calculation: which code edition citations are
//! rendered against, the strength load factors used to build `Mu` from
//! service moments, and the precision used in the solution steps.
//!
//! Settings are plain JSON so they can live next to a project or be handed
//! over by an LLM tool call.
//!
//! ```rust
//! use flexure_core::settings::{DesignCode, GlobalSettings};
//!
//! let settings = GlobalSettings::from_json(r#"{ "code": "Nscp2015" }"#).unwrap();
//! assert_eq!(settings.code, DesignCode::Nscp2015);
//! assert_eq!(settings.load_factors.live, 1.6);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Building code edition used for citations.
///
/// NSCP 2015 adopts ACI 318-14 with a `4` prefix on chapter numbers
/// (ACI 22.2.2.4.3 is NSCP 422.2.2.4.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DesignCode {
    #[default]
    Aci318_14,
    Nscp2015,
}

impl DesignCode {
    /// Display name (e.g., "ACI 318-14")
    pub fn display_name(&self) -> &'static str {
        match self {
            DesignCode::Aci318_14 => "ACI 318-14",
            DesignCode::Nscp2015 => "NSCP 2015",
        }
    }

    /// Translate an ACI 318 section or table number into this code's numbering.
    pub fn section(&self, aci_section: &str) -> String {
        match self {
            DesignCode::Aci318_14 => aci_section.to_string(),
            DesignCode::Nscp2015 => format!("4{}", aci_section),
        }
    }

    /// Full citation for an ACI 318 section (e.g., "NSCP 2015 Section 421.2.2")
    pub fn citation(&self, aci_section: &str) -> String {
        format!("{} Section {}", self.display_name(), self.section(aci_section))
    }
}

/// Strength-design load factors (ACI 318-14 Table 5.3.1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadFactors {
    /// Factor on dead load acting alone (U = 1.4D)
    pub dead_only: f64,
    /// Factor on dead load combined with live load
    pub dead: f64,
    /// Factor on live load
    pub live: f64,
}

impl Default for LoadFactors {
    fn default() -> Self {
        LoadFactors {
            dead_only: 1.4,
            dead: 1.2,
            live: 1.6,
        }
    }
}

/// Global calculation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalSettings {
    /// Code edition for citations
    pub code: DesignCode,

    /// Load factors for service-moment demands
    pub load_factors: LoadFactors,

    /// Decimal places for moments, areas and lengths in solution steps
    pub display_decimals: usize,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        GlobalSettings {
            code: DesignCode::default(),
            load_factors: LoadFactors::default(),
            display_decimals: 2,
        }
    }
}

impl GlobalSettings {
    /// Parse settings from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let settings: GlobalSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate factor values.
    pub fn validate(&self) -> CalcResult<()> {
        let factors = [
            ("load_factors.dead_only", self.load_factors.dead_only),
            ("load_factors.dead", self.load_factors.dead),
            ("load_factors.live", self.load_factors.live),
        ];
        for (field, value) in factors {
            if !value.is_finite() || value < 1.0 {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Strength load factors must be at least 1.0",
                ));
            }
        }
        if self.display_decimals > 8 {
            return Err(CalcError::invalid_input(
                "display_decimals",
                self.display_decimals.to_string(),
                "At most 8 decimal places are supported",
            ));
        }
        Ok(())
    }
}
