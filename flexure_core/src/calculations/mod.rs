//! # Flexure Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results with a worked solution (JSON-serializable)
//! - a pure function `fn(&Input) -> Result<*Result, CalcError>`
//!
//! ## Available Calculations
//!
//! - [`analysis`] - Design moment capacity of a beam with known steel
//! - [`design`] - Required steel for an ultimate moment
//!
//! Supporting components:
//!
//! - [`section`] - Section limits and singly/doubly classification
//! - [`stress_state`] - Neutral axis by equilibrium and strain compatibility
//! - [`bisection`] - Bracketed root finding

pub mod analysis;
pub mod bisection;
pub mod design;
pub mod section;
pub mod stress_state;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::narration::SolutionStep;
use crate::settings::GlobalSettings;

pub use analysis::{analyze, analyze_with_settings, AnalysisInput, AnalysisResult};
pub use design::{design, design_with_settings, DesignInput, DesignRegion, DesignResult};

/// Whether a section carries compression steel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BeamType {
    SinglyReinforced,
    DoublyReinforced,
}

impl BeamType {
    pub fn display_name(&self) -> &'static str {
        match self {
            BeamType::SinglyReinforced => "Singly Reinforced",
            BeamType::DoublyReinforced => "Doubly Reinforced",
        }
    }
}

impl fmt::Display for BeamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Enum wrapper for both calculation modes.
///
/// Lets a caller pick the mode at runtime and hold either request in one value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum CalculationItem {
    /// Capacity of a beam with known steel
    Analysis(AnalysisInput),
    /// Steel required for a moment demand
    Design(DesignInput),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::Analysis(a) => &a.label,
            CalculationItem::Design(d) => &d.label,
        }
    }

    /// Get the calculation mode as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::Analysis(_) => "Analysis",
            CalculationItem::Design(_) => "Design",
        }
    }

    /// Run the calculation
    pub fn calculate(&self, settings: &GlobalSettings) -> CalcResult<CalculationOutput> {
        match self {
            CalculationItem::Analysis(input) => {
                analyze_with_settings(input, settings).map(CalculationOutput::Analysis)
            }
            CalculationItem::Design(input) => design_with_settings(input, settings).map(CalculationOutput::Design),
        }
    }
}

/// Result of a [`CalculationItem`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum CalculationOutput {
    Analysis(AnalysisResult),
    Design(DesignResult),
}

impl CalculationOutput {
    pub fn steps(&self) -> &[SolutionStep] {
        match self {
            CalculationOutput::Analysis(r) => &r.steps,
            CalculationOutput::Design(r) => &r.steps,
        }
    }

    pub fn final_answer(&self) -> &str {
        match self {
            CalculationOutput::Analysis(r) => &r.final_answer,
            CalculationOutput::Design(r) => &r.final_answer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::MomentDemand;

    #[test]
    fn test_beam_type_display() {
        assert_eq!(BeamType::SinglyReinforced.to_string(), "Singly Reinforced");
        assert_eq!(BeamType::DoublyReinforced.to_string(), "Doubly Reinforced");
    }

    #[test]
    fn test_item_from_json() {
        let json = r#"{
            "mode": "Design",
            "label": "B-4",
            "fc_mpa": 21.0,
            "fy_mpa": 420.0,
            "demand": { "kind": "Factored", "mu_knm": 120.0 },
            "b_mm": 300.0,
            "d_mm": 550.0,
            "d_prime_mm": 50.0
        }"#;
        let item: CalculationItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.label(), "B-4");
        assert_eq!(item.calc_type(), "Design");
        assert!(matches!(
            item,
            CalculationItem::Design(DesignInput {
                demand: MomentDemand::Factored { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_item_calculates() {
        let item = CalculationItem::Analysis(AnalysisInput {
            label: "B-1".to_string(),
            fc_mpa: 21.0,
            fy_mpa: 420.0,
            as_mm2: 1200.0,
            as_prime_mm2: 0.0,
            b_mm: 300.0,
            d_mm: 550.0,
            d_prime_mm: 0.0,
        });
        let output = item.calculate(&GlobalSettings::default()).unwrap();
        assert!(output.final_answer().starts_with("The beam is Singly Reinforced"));
        assert_eq!(output.steps().last().map(|s| s.text.as_str()), Some(output.final_answer()));
    }
}
