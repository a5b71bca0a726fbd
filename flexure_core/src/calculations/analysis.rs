//! # Flexural Capacity Analysis
//!
//! Computes the design moment capacity φMn of a rectangular reinforced
//! concrete beam with known tension (and optional compression) steel per
//! ACI 318-14 / NSCP 2015.
//!
//! ## Assumptions
//!
//! - Equivalent rectangular stress block, εcu = 0.003, Es = 200 GPa
//! - Elastic-perfectly-plastic steel
//! - Displaced concrete at the compression steel is neglected
//! - φ follows the strain in the tension steel at the computed neutral axis
//!
//! ## Example
//!
//! ```rust
//! use flexure_core::calculations::analysis::{analyze, AnalysisInput};
//! use flexure_core::calculations::BeamType;
//!
//! let input = AnalysisInput {
//!     label: "B-1".to_string(),
//!     fc_mpa: 21.0,
//!     fy_mpa: 420.0,
//!     as_mm2: 1200.0,
//!     as_prime_mm2: 0.0,
//!     b_mm: 300.0,
//!     d_mm: 550.0,
//!     d_prime_mm: 0.0,
//! };
//!
//! let result = analyze(&input).unwrap();
//! assert_eq!(result.beam_type, BeamType::SinglyReinforced);
//! assert_eq!(result.phi, 0.90);
//! println!("{}", result.final_answer);
//! for step in &result.steps {
//!     println!("{}", step.text);
//! }
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::section::{classify_for_analysis, section_limits};
use super::stress_state::{self, NeutralAxisMethod, SteelSection};
use super::BeamType;
use crate::equations::{
    concrete_compression, strength_reduction_factor, Equation, MAX_STEEL_STRESS_MPA,
    TENSION_CONTROLLED_STRESS_MPA,
};
use crate::errors::{require_positive, CalcError, CalcResult};
use crate::narration::{Narration, SolutionStep};
use crate::settings::GlobalSettings;
use crate::units::{nmm_to_knm, KilonewtonMeters, NewtonMillimeters};

/// Input parameters for a capacity analysis.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "B-2",
///   "fc_mpa": 21.0,
///   "fy_mpa": 420.0,
///   "as_mm2": 2500.0,
///   "as_prime_mm2": 400.0,
///   "b_mm": 300.0,
///   "d_mm": 550.0,
///   "d_prime_mm": 50.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisInput {
    /// User label for this beam (e.g., "B-1")
    #[serde(default)]
    pub label: String,

    /// Concrete compressive strength f'c (MPa)
    pub fc_mpa: f64,

    /// Steel yield strength fy (MPa)
    pub fy_mpa: f64,

    /// Tension steel area As (mm²)
    pub as_mm2: f64,

    /// Compression steel area As' (mm²); zero for a singly reinforced beam
    #[serde(default)]
    pub as_prime_mm2: f64,

    /// Beam width b (mm)
    pub b_mm: f64,

    /// Effective depth d to the tension steel centroid (mm)
    pub d_mm: f64,

    /// Depth d' to the compression steel centroid (mm)
    #[serde(default)]
    pub d_prime_mm: f64,
}

impl AnalysisInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("fc_mpa", self.fc_mpa, "Concrete strength must be positive")?;
        require_positive("fy_mpa", self.fy_mpa, "Steel yield strength must be positive")?;
        if self.fy_mpa >= TENSION_CONTROLLED_STRESS_MPA {
            return Err(CalcError::invalid_input(
                "fy_mpa",
                self.fy_mpa.to_string(),
                "Steel yield strength must be below 1000 MPa",
            ));
        }
        require_positive("as_mm2", self.as_mm2, "Tension steel area must be positive")?;
        if !self.as_prime_mm2.is_finite() || self.as_prime_mm2 < 0.0 {
            return Err(CalcError::invalid_input(
                "as_prime_mm2",
                self.as_prime_mm2.to_string(),
                "Compression steel area cannot be negative",
            ));
        }
        require_positive("b_mm", self.b_mm, "Width must be positive")?;
        require_positive("d_mm", self.d_mm, "Effective depth must be positive")?;
        validate_compression_depth(self.d_prime_mm, self.d_mm)
    }

    fn steel_section(&self, beta1: f64) -> SteelSection {
        SteelSection {
            fc: self.fc_mpa,
            fy: self.fy_mpa,
            beta1,
            b: self.b_mm,
            d: self.d_mm,
            d_prime: self.d_prime_mm,
            as_tension: self.as_mm2,
            as_compression: self.as_prime_mm2,
        }
    }
}

/// Shared d' check for analysis and design inputs.
pub(crate) fn validate_compression_depth(d_prime_mm: f64, d_mm: f64) -> CalcResult<()> {
    if !d_prime_mm.is_finite() || d_prime_mm < 0.0 {
        return Err(CalcError::invalid_input(
            "d_prime_mm",
            d_prime_mm.to_string(),
            "Compression steel depth cannot be negative",
        ));
    }
    if d_prime_mm >= d_mm {
        return Err(CalcError::invalid_input(
            "d_prime_mm",
            d_prime_mm.to_string(),
            "Compression steel must lie above the tension steel (d' < d)",
        ));
    }
    Ok(())
}

/// Results of a capacity analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub beam_type: BeamType,

    /// Stress-block depth factor β1
    pub beta1: f64,

    /// Strength reduction factor φ at the computed tension steel strain
    pub phi: f64,

    /// φ at the maximum-steel strain εt = 0.004
    pub phi_balanced: f64,

    /// Maximum tension steel of a singly reinforced section (mm²)
    pub as_max_mm2: f64,

    /// Maximum nominal moment of a singly reinforced section (kN·m)
    pub mn_max_knm: f64,

    /// Tension steel strain is below 0.004 (fs < 800 MPa)
    pub exceeds_max_steel: bool,

    /// Neutral-axis depth (mm)
    pub c_mm: f64,

    /// Stress-block depth (mm)
    pub a_mm: f64,

    /// Tension steel stress, strain-compatible (MPa)
    pub fs_mpa: f64,

    /// Compression steel stress, strain-compatible (MPa)
    pub fs_prime_mpa: Option<f64>,

    pub tension_steel_yields: bool,
    pub compression_steel_yields: Option<bool>,
    pub neutral_axis_method: NeutralAxisMethod,

    /// Nominal moment Mn (kN·m)
    pub mn_knm: f64,

    /// Design moment capacity φMn (kN·m)
    pub phi_mn_knm: f64,

    /// Worked solution in order
    pub steps: Vec<SolutionStep>,

    /// One-sentence summary
    pub final_answer: String,
}

impl AnalysisResult {
    /// Step texts only, in order
    pub fn step_texts(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.text.as_str()).collect()
    }

    /// εt ≥ 0.005
    pub fn is_tension_controlled(&self) -> bool {
        self.fs_mpa >= TENSION_CONTROLLED_STRESS_MPA
    }
}

/// Analyze a beam with default settings.
pub fn analyze(input: &AnalysisInput) -> CalcResult<AnalysisResult> {
    analyze_with_settings(input, &GlobalSettings::default())
}

/// Analyze a beam, citing and formatting per `settings`.
pub fn analyze_with_settings(input: &AnalysisInput, settings: &GlobalSettings) -> CalcResult<AnalysisResult> {
    input.validate()?;
    settings.validate()?;
    debug!(label = %input.label, ?input, "starting capacity analysis");

    let mut narration = Narration::new(settings);
    let limits = section_limits(input.fc_mpa, input.fy_mpa, input.b_mm, input.d_mm, &mut narration);
    let beam_type = classify_for_analysis(&limits, input.as_mm2, input.as_prime_mm2, &mut narration);

    let section = input.steel_section(limits.beta1);
    let state = stress_state::solve(&section, &mut narration)?;

    let fy = input.fy_mpa;
    let d = input.d_mm;
    let a = state.a_mm;
    let lever = d - a / 2.0;

    let mn_nmm = match beam_type {
        BeamType::SinglyReinforced => {
            let (steel_stress, symbol) = if state.tension_yields {
                (fy, "fy")
            } else {
                (state.fs_mpa, "fs")
            };
            let mn = input.as_mm2 * steel_stress * lever;
            narration.record(
                Equation::NominalMomentSingly,
                format!(
                    "Mn = As·{}·(d - a/2) = {} × {} × ({} - {}/2) = {} kN·m",
                    symbol,
                    narration.num(input.as_mm2),
                    narration.num(steel_stress),
                    narration.num(d),
                    narration.num(a),
                    narration.num(nmm_to_knm(mn))
                ),
            );
            mn
        }
        BeamType::DoublyReinforced => {
            let f_comp = state.compression_force_stress(fy);
            let steel_couple = input.as_prime_mm2 * f_comp * (d - input.d_prime_mm);
            let concrete_force = if state.tension_yields {
                input.as_mm2 * fy - input.as_prime_mm2 * f_comp
            } else {
                concrete_compression(input.fc_mpa, a, input.b_mm)
            };
            let mn = (NewtonMillimeters(concrete_force * lever) + NewtonMillimeters(steel_couple)).value();
            narration.record(
                Equation::NominalMomentDoubly,
                format!(
                    "Mn = T1·(d - a/2) + As'·fs'·(d - d') = {} × {} + {} × {} × {} = {} kN·m",
                    narration.num(concrete_force),
                    narration.num(lever),
                    narration.num(input.as_prime_mm2),
                    narration.num(f_comp),
                    narration.num(d - input.d_prime_mm),
                    narration.num(nmm_to_knm(mn))
                ),
            );
            mn
        }
    };
    let mn_knm = nmm_to_knm(mn_nmm);

    let phi = strength_reduction_factor(state.fs_mpa, fy);
    narration.record(
        Equation::StrengthReductionFactor,
        format!(
            "fs = {} MPa: φ = {}",
            narration.num(state.fs_mpa),
            Narration::factor(phi)
        ),
    );

    let phi_mn_knm = (KilonewtonMeters(mn_knm) * phi).value();
    narration.record(
        Equation::DesignMoment,
        format!(
            "φMn = {} × {} = {} kN·m",
            Narration::factor(phi),
            narration.num(mn_knm),
            narration.num(phi_mn_knm)
        ),
    );

    let exceeds_max_steel = state.fs_mpa < MAX_STEEL_STRESS_MPA;
    if exceeds_max_steel {
        warn!(
            label = %input.label,
            fs_mpa = state.fs_mpa,
            "tension steel strain below 0.004, section exceeds the beam steel limit"
        );
        narration.note(format!(
            "fs = {} MPa < 800 MPa (εt < 0.004): section exceeds the maximum steel permitted for beams",
            narration.num(state.fs_mpa)
        ));
    }

    let final_answer = format!(
        "The beam is {} with a design moment capacity of {:.2} kN·m.",
        beam_type, phi_mn_knm
    );
    narration.note(final_answer.clone());

    debug!(%beam_type, mn_knm, phi, phi_mn_knm, "capacity analysis complete");

    Ok(AnalysisResult {
        beam_type,
        beta1: limits.beta1,
        phi,
        phi_balanced: limits.phi_balanced,
        as_max_mm2: limits.as_max_mm2,
        mn_max_knm: limits.mn_max_knm,
        exceeds_max_steel,
        c_mm: state.c_mm,
        a_mm: state.a_mm,
        fs_mpa: state.fs_mpa,
        fs_prime_mpa: state.fs_prime_mpa,
        tension_steel_yields: state.tension_yields,
        compression_steel_yields: state.compression_yields,
        neutral_axis_method: state.method,
        mn_knm,
        phi_mn_knm,
        steps: narration.into_steps(),
        final_answer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn singly_input() -> AnalysisInput {
        AnalysisInput {
            label: "B-1".to_string(),
            fc_mpa: 21.0,
            fy_mpa: 420.0,
            as_mm2: 1200.0,
            as_prime_mm2: 0.0,
            b_mm: 300.0,
            d_mm: 550.0,
            d_prime_mm: 0.0,
        }
    }

    fn doubly_input() -> AnalysisInput {
        AnalysisInput {
            label: "B-2".to_string(),
            as_mm2: 2500.0,
            as_prime_mm2: 400.0,
            d_prime_mm: 50.0,
            ..singly_input()
        }
    }

    #[test]
    fn test_singly_reinforced_capacity() {
        let result = analyze(&singly_input()).unwrap();
        assert_eq!(result.beam_type, BeamType::SinglyReinforced);
        assert_relative_eq!(result.a_mm, 94.1176, epsilon = 1e-3);
        assert_relative_eq!(result.c_mm, 110.727, epsilon = 1e-3);
        assert_eq!(result.phi, 0.90);
        assert!(result.is_tension_controlled());
        assert_relative_eq!(result.mn_knm, 253.48, epsilon = 0.01);
        assert_relative_eq!(result.phi_mn_knm, 231.0, max_relative = 0.02);
        assert!(!result.exceeds_max_steel);
    }

    #[test]
    fn test_doubly_reinforced_capacity() {
        let result = analyze(&doubly_input()).unwrap();
        assert_eq!(result.beam_type, BeamType::DoublyReinforced);
        assert_relative_eq!(result.a_mm, 164.706, epsilon = 1e-3);
        assert_relative_eq!(result.c_mm, 193.772, epsilon = 1e-3);
        assert_eq!(result.compression_steel_yields, Some(true));
        assert_eq!(result.phi, 0.90);
        // Mn = 2100·420·(550 - 82.353) + 400·420·500
        let expected = (2100.0 * 420.0 * (550.0 - 164.706 / 2.0) + 400.0 * 420.0 * 500.0) / 1e6;
        assert_relative_eq!(result.mn_knm, expected, max_relative = 1e-6);
        assert!(result.final_answer.starts_with("The beam is Doubly Reinforced"));
    }

    #[test]
    fn test_over_reinforced_singly_uses_quadratic() {
        let input = AnalysisInput {
            as_mm2: 4000.0,
            ..singly_input()
        };
        let result = analyze(&input).unwrap();
        assert_eq!(result.beam_type, BeamType::SinglyReinforced);
        assert_eq!(result.neutral_axis_method, NeutralAxisMethod::Quadratic);
        assert!(!result.tension_steel_yields);
        assert_eq!(result.phi, 0.65);
        assert!(result.exceeds_max_steel);
        assert_relative_eq!(result.c_mm, 335.9, epsilon = 0.5);
        // Mn = As·fs·(d - a/2)
        let expected = 4000.0 * result.fs_mpa * (550.0 - result.a_mm / 2.0) / 1e6;
        assert_relative_eq!(result.mn_knm, expected, max_relative = 1e-9);
    }

    #[test]
    fn test_transition_zone_phi() {
        let input = AnalysisInput {
            as_mm2: 2300.0,
            ..singly_input()
        };
        let result = analyze(&input).unwrap();
        assert!(result.fs_mpa > 420.0 && result.fs_mpa < 1000.0);
        assert!(result.phi > 0.65 && result.phi < 0.90);
        assert_relative_eq!(
            result.phi,
            0.65 + 0.25 * (result.fs_mpa - 420.0) / 580.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_final_answer_format() {
        let result = analyze(&singly_input()).unwrap();
        assert_eq!(
            result.final_answer,
            format!(
                "The beam is Singly Reinforced with a design moment capacity of {:.2} kN·m.",
                result.phi_mn_knm
            )
        );
        assert_eq!(result.step_texts().last().copied(), Some(result.final_answer.as_str()));
    }

    #[test]
    fn test_steps_report_result_values() {
        let result = analyze(&singly_input()).unwrap();
        let texts = result.step_texts();
        assert!(texts[0].starts_with("β1 = 0.8500"));
        assert!(texts.iter().any(|t| t.contains(&format!("{:.2}", result.a_mm))));
        assert!(texts.iter().any(|t| t.contains(&format!("{:.2}", result.mn_knm))));
        assert!(texts.iter().any(|t| t.contains(&format!("{:.2}", result.phi_mn_knm))));
        assert!(texts.iter().any(|t| t.contains("Beam Type: Singly Reinforced")));
    }

    #[test]
    fn test_nscp_citations() {
        let settings = GlobalSettings {
            code: crate::settings::DesignCode::Nscp2015,
            ..GlobalSettings::default()
        };
        let result = analyze_with_settings(&singly_input(), &settings).unwrap();
        let cited: Vec<_> = result.steps.iter().filter_map(|s| s.reference.as_deref()).collect();
        assert!(cited.contains(&"NSCP 2015 Section 422.2.2.4.3"));
        assert!(cited
            .iter()
            .all(|r| r.starts_with("NSCP 2015") || *r == "Fundamental Mechanics"));
    }

    #[test]
    fn test_invalid_inputs() {
        let cases = [
            AnalysisInput { fc_mpa: 0.0, ..singly_input() },
            AnalysisInput { fy_mpa: -420.0, ..singly_input() },
            AnalysisInput { fy_mpa: 1000.0, ..singly_input() },
            AnalysisInput { as_mm2: 0.0, ..singly_input() },
            AnalysisInput { as_prime_mm2: -1.0, ..singly_input() },
            AnalysisInput { b_mm: f64::NAN, ..singly_input() },
            AnalysisInput { d_mm: -550.0, ..singly_input() },
            AnalysisInput { d_prime_mm: 550.0, ..doubly_input() },
            AnalysisInput { d_prime_mm: -5.0, ..doubly_input() },
        ];
        for input in cases {
            let err = analyze(&input).unwrap_err();
            assert_eq!(err.error_code(), "INVALID_INPUT", "{:?}", input);
        }
    }

    #[test]
    fn test_serialization_roundtrip() {
        let input = doubly_input();
        let json = serde_json::to_string(&input).unwrap();
        let back: AnalysisInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, back);

        let minimal = r#"{"fc_mpa":21,"fy_mpa":420,"as_mm2":1200,"b_mm":300,"d_mm":550}"#;
        let parsed: AnalysisInput = serde_json::from_str(minimal).unwrap();
        assert_eq!(parsed.as_prime_mm2, 0.0);
    }

    #[test]
    fn test_result_serialization() {
        let result = analyze(&doubly_input()).unwrap();
        let json = serde_json::to_string_pretty(&result).unwrap();
        assert!(json.contains("\"beam_type\": \"DoublyReinforced\""));
        assert!(json.contains("\"phi_mn_knm\""));
        assert!(json.contains("\"steps\""));
    }
}
