//! # Flexural Reinforcement Design
//!
//! Sizes the tension (and, when required, compression) steel of a
//! rectangular beam for an ultimate moment Mu per ACI 318-14 / NSCP 2015.
//!
//! ## Procedure
//!
//! 1. Resolve Mu, from service moments through the strength combinations if needed
//! 2. Compare Mu with φMn,max at the maximum-steel strain εt = 0.004
//! 3. Singly reinforced, tension-controlled (Mu ≤ φMtn): Rn → ρ → As with φ = 0.90
//! 4. Singly reinforced, transition zone: solve φ(c)·Mn(c) = Mu for 3d/8 < c ≤ 3d/7
//! 5. Doubly reinforced: As1 = As,max plus a steel couple As2 / As' for the excess
//!
//! ## Example
//!
//! ```rust
//! use flexure_core::calculations::design::{design, DesignInput, DesignRegion};
//! use flexure_core::loads::MomentDemand;
//!
//! let input = DesignInput {
//!     label: "B-1".to_string(),
//!     fc_mpa: 21.0,
//!     fy_mpa: 420.0,
//!     demand: MomentDemand::Factored { mu_knm: 120.0 },
//!     b_mm: 300.0,
//!     d_mm: 550.0,
//!     d_prime_mm: 50.0,
//! };
//!
//! let result = design(&input).unwrap();
//! assert_eq!(result.region, DesignRegion::TensionControlled);
//! assert_eq!(result.as_prime_mm2, 0.0);
//! println!("{}", result.final_answer);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::analysis::validate_compression_depth;
use super::bisection::{self, BisectionConfig};
use super::section::{classify_for_design, section_limits, SectionLimits};
use super::BeamType;
use crate::equations::{
    compression_steel_stress, concrete_compression, concrete_nominal_moment, max_steel_stress, reinforcement_ratio,
    resistance_coefficient, strength_reduction_factor, stress_block_depth, tension_controlled_design_moment,
    tension_controlled_neutral_axis_depth, tension_steel_stress, transition_neutral_axis_estimate, Equation,
    PHI_TENSION_CONTROLLED, TENSION_CONTROLLED_STRESS_MPA,
};
use crate::errors::{require_positive, CalcError, CalcResult};
use crate::loads::{MomentDemand, ResolvedDemand};
use crate::narration::{Narration, SolutionStep};
use crate::settings::GlobalSettings;
use crate::units::{knm_to_nmm, nmm_to_knm, KilonewtonMeters, NewtonMillimeters};

/// Input parameters for a reinforcement design.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "B-3",
///   "fc_mpa": 21.0,
///   "fy_mpa": 420.0,
///   "demand": { "kind": "Service", "dead_knm": 50.0, "live_knm": 30.0 },
///   "b_mm": 300.0,
///   "d_mm": 550.0,
///   "d_prime_mm": 50.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignInput {
    /// User label for this beam (e.g., "B-1")
    #[serde(default)]
    pub label: String,

    /// Concrete compressive strength f'c (MPa)
    pub fc_mpa: f64,

    /// Steel yield strength fy (MPa)
    pub fy_mpa: f64,

    /// Ultimate moment, or service moments to be factored
    pub demand: MomentDemand,

    /// Beam width b (mm)
    pub b_mm: f64,

    /// Effective depth d (mm)
    pub d_mm: f64,

    /// Depth d' to compression steel, used if compression steel is required (mm)
    #[serde(default)]
    pub d_prime_mm: f64,
}

impl DesignInput {
    /// Validate input parameters. The demand is validated when resolved.
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
        require_positive("b_mm", self.b_mm, "Width must be positive")?;
        require_positive("d_mm", self.d_mm, "Effective depth must be positive")?;
        validate_compression_depth(self.d_prime_mm, self.d_mm)
    }
}

/// Which design path sized the steel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DesignRegion {
    /// Singly reinforced with εt ≥ 0.005 and φ = 0.90
    TensionControlled,
    /// Singly reinforced with 0.004 ≤ εt < 0.005
    Transition,
    /// Mu exceeds φMn,max, compression steel added
    CompressionSteelRequired,
}

impl DesignRegion {
    pub fn display_name(&self) -> &'static str {
        match self {
            DesignRegion::TensionControlled => "Tension-Controlled",
            DesignRegion::Transition => "Transition Zone",
            DesignRegion::CompressionSteelRequired => "Compression Steel Required",
        }
    }
}

/// Results of a reinforcement design.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignResult {
    pub beam_type: BeamType,
    pub region: DesignRegion,

    /// Ultimate moment designed for (kN·m)
    pub mu_knm: f64,

    /// Governing strength combination, when Mu came from service moments
    pub governing_combination: Option<String>,

    /// Stress-block depth factor β1
    pub beta1: f64,

    /// Strength reduction factor of the designed section
    pub phi: f64,

    /// φ at the maximum-steel strain εt = 0.004
    pub phi_balanced: f64,

    /// Maximum nominal moment of a singly reinforced section (kN·m)
    pub mn_max_knm: f64,

    /// φMn,max (kN·m)
    pub phi_mn_max_knm: f64,

    /// Design moment at the tension-controlled limit, singly reinforced only (kN·m)
    pub phi_mtn_knm: Option<f64>,

    /// Required tension steel As (mm²)
    pub as_mm2: f64,

    /// Required compression steel As' (mm²); zero when singly reinforced
    pub as_prime_mm2: f64,

    /// Tension reinforcement ratio, tension-controlled path only
    pub rho: Option<f64>,

    /// Neutral-axis depth of the designed section (mm)
    pub c_mm: f64,

    /// Stress-block depth of the designed section (mm)
    pub a_mm: f64,

    /// Tension steel stress at the designed neutral axis (MPa)
    pub fs_mpa: f64,

    /// Compression steel stress at c = 3d/7, doubly reinforced only (MPa)
    pub fs_prime_mpa: Option<f64>,

    /// Worked solution in order
    pub steps: Vec<SolutionStep>,

    /// One-sentence summary
    pub final_answer: String,
}

impl DesignResult {
    /// Step texts only, in order
    pub fn step_texts(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Steel sizing produced by one design path.
struct Sizing {
    region: DesignRegion,
    phi: f64,
    phi_mtn_knm: Option<f64>,
    as_mm2: f64,
    as_prime_mm2: f64,
    rho: Option<f64>,
    c_mm: f64,
    fs_prime_mpa: Option<f64>,
}

/// Design a beam with default settings.
pub fn design(input: &DesignInput) -> CalcResult<DesignResult> {
    design_with_settings(input, &GlobalSettings::default())
}

/// Design a beam, with load factors, citations and formatting from `settings`.
pub fn design_with_settings(input: &DesignInput, settings: &GlobalSettings) -> CalcResult<DesignResult> {
    input.validate()?;
    settings.validate()?;
    let demand = input.demand.resolve(&settings.load_factors)?;
    debug!(label = %input.label, mu_knm = demand.mu_knm, "starting reinforcement design");

    let mut narration = Narration::new(settings);
    narrate_demand(&input.demand, &demand, &mut narration);

    let limits = section_limits(input.fc_mpa, input.fy_mpa, input.b_mm, input.d_mm, &mut narration);
    let beam_type = classify_for_design(&limits, demand.mu_knm, &mut narration);

    let sizing = match beam_type {
        BeamType::SinglyReinforced => size_singly(input, &limits, demand.mu_knm, &mut narration)?,
        BeamType::DoublyReinforced => size_doubly(input, &limits, demand.mu_knm, &mut narration)?,
    };

    let final_answer = if sizing.as_prime_mm2 > 0.0 {
        format!(
            "The beam requires {:.0} mm² of tension reinforcement and {:.0} mm² of compression reinforcement.",
            sizing.as_mm2, sizing.as_prime_mm2
        )
    } else {
        format!("The beam requires {:.0} mm² of tension reinforcement.", sizing.as_mm2)
    };
    narration.note(final_answer.clone());

    debug!(
        %beam_type,
        region = sizing.region.display_name(),
        as_mm2 = sizing.as_mm2,
        as_prime_mm2 = sizing.as_prime_mm2,
        "reinforcement design complete"
    );

    Ok(DesignResult {
        beam_type,
        region: sizing.region,
        mu_knm: demand.mu_knm,
        governing_combination: demand.governing_combination,
        beta1: limits.beta1,
        phi: sizing.phi,
        phi_balanced: limits.phi_balanced,
        mn_max_knm: limits.mn_max_knm,
        phi_mn_max_knm: limits.phi_mn_max_knm(),
        phi_mtn_knm: sizing.phi_mtn_knm,
        as_mm2: sizing.as_mm2,
        as_prime_mm2: sizing.as_prime_mm2,
        rho: sizing.rho,
        c_mm: sizing.c_mm,
        a_mm: limits.beta1 * sizing.c_mm,
        fs_mpa: tension_steel_stress(sizing.c_mm, input.d_mm),
        fs_prime_mpa: sizing.fs_prime_mpa,
        steps: narration.into_steps(),
        final_answer,
    })
}

fn narrate_demand(demand: &MomentDemand, resolved: &ResolvedDemand, narration: &mut Narration) {
    match (demand, &resolved.governing_combination) {
        (MomentDemand::Service { dead_knm, live_knm }, Some(combo)) => {
            narration.record(
                Equation::FactoredMoment,
                format!(
                    "MD = {} kN·m, ML = {} kN·m: Mu = {} kN·m ({} governs)",
                    narration.num(*dead_knm),
                    narration.num(*live_knm),
                    narration.num(resolved.mu_knm),
                    combo
                ),
            );
        }
        _ => narration.note(format!("Mu = {} kN·m", narration.num(resolved.mu_knm))),
    }
}

fn size_singly(
    input: &DesignInput,
    limits: &SectionLimits,
    mu_knm: f64,
    narration: &mut Narration,
) -> CalcResult<Sizing> {
    let (fc, fy, b, d) = (input.fc_mpa, input.fy_mpa, input.b_mm, input.d_mm);
    let mu = knm_to_nmm(mu_knm);
    let phi_mtn_knm = nmm_to_knm(tension_controlled_design_moment(limits.beta1, fc, b, d));
    let tension_controlled = mu_knm <= phi_mtn_knm;

    narration.record(
        Equation::TensionControlledMoment,
        format!(
            "φMtn = (459/1600)·β1·f'c·b·d²·(1 - (3/16)·β1) = {} kN·m; Mu {} φMtn: {}",
            narration.num(phi_mtn_knm),
            if tension_controlled { "≤" } else { ">" },
            if tension_controlled {
                "tension-controlled, φ = 0.90"
            } else {
                "transition zone"
            }
        ),
    );

    if tension_controlled {
        let phi = PHI_TENSION_CONTROLLED;
        let rn = resistance_coefficient(mu, phi, b, d);
        narration.record(
            Equation::ResistanceCoefficient,
            format!("Rn = Mu/(φ·b·d²) = {} MPa", Narration::factor(rn)),
        );

        let rho = reinforcement_ratio(rn, fc, fy).ok_or_else(|| {
            CalcError::no_real_solution(
                "reinforcement ratio",
                format!("1 - 2Rn/(0.85·f'c) is negative for Rn = {:.4} MPa", rn),
            )
        })?;
        let as_mm2 = rho * b * d;
        narration.record(
            Equation::ReinforcementRatio,
            format!(
                "ρ = (0.85·f'c/fy)(1 - √(1 - 2Rn/(0.85·f'c))) = {}, As = ρ·b·d = {} mm²",
                Narration::factor(rho),
                narration.num(as_mm2)
            ),
        );

        let c_mm = stress_block_depth(as_mm2 * fy, fc, b) / limits.beta1;
        return Ok(Sizing {
            region: DesignRegion::TensionControlled,
            phi,
            phi_mtn_knm: Some(phi_mtn_knm),
            as_mm2,
            as_prime_mm2: 0.0,
            rho: Some(rho),
            c_mm,
            fs_prime_mpa: None,
        });
    }

    match transition_neutral_axis_estimate(mu, fc, b, d) {
        Some(c0) => narration.record(
            Equation::TransitionNeutralAxis,
            format!(
                "k = Mu/(0.85·f'c·b·d²), c0 = d(1 - √(1 - 2k)) = {} mm",
                narration.num(c0)
            ),
        ),
        None => narration.note("2k > 1: no starting estimate, searching 3d/8 < c ≤ 3d/7"),
    }

    let beta1 = limits.beta1;
    let bracket = [tension_controlled_neutral_axis_depth(d), limits.c_max_mm];
    let config = BisectionConfig {
        x_abs_tol: 1e-9 * d,
        residual_tol: 1e-9 * mu,
        ..BisectionConfig::default()
    };
    let c_mm = bisection::solve(
        |c| strength_reduction_factor(tension_steel_stress(c, d), fy) * concrete_nominal_moment(beta1, fc, b, d, c) - mu,
        bracket,
        &config,
        "transition-zone neutral axis",
    )?;

    let fs = tension_steel_stress(c_mm, d);
    let phi = strength_reduction_factor(fs, fy);
    narration.record(
        Equation::TransitionNeutralAxis,
        format!(
            "φ(c)·Mn(c) = Mu on 3d/8 < c ≤ 3d/7: c = {} mm, fs = {} MPa, φ = {}",
            narration.num(c_mm),
            narration.num(fs),
            Narration::factor(phi)
        ),
    );

    let a = beta1 * c_mm;
    let as_mm2 = concrete_compression(fc, a, b) / fs.min(fy);
    narration.record(
        Equation::StressBlockDepth,
        format!(
            "a = β1·c = {} mm, As = 0.85·f'c·a·b/fy = {} mm²",
            narration.num(a),
            narration.num(as_mm2)
        ),
    );

    Ok(Sizing {
        region: DesignRegion::Transition,
        phi,
        phi_mtn_knm: Some(phi_mtn_knm),
        as_mm2,
        as_prime_mm2: 0.0,
        rho: None,
        c_mm,
        fs_prime_mpa: None,
    })
}

fn size_doubly(
    input: &DesignInput,
    limits: &SectionLimits,
    mu_knm: f64,
    narration: &mut Narration,
) -> CalcResult<Sizing> {
    let (fy, d, d_prime) = (input.fy_mpa, input.d_mm, input.d_prime_mm);
    let phi = limits.phi_balanced;

    let as1 = limits.as_max_mm2;
    narration.record(
        Equation::MaximumTensionSteel,
        format!("As1 = As,max = {} mm²", narration.num(as1)),
    );

    // Tension steel stress at c = 3d/7 is fy, or 800 MPa for fy above that
    let fs = max_steel_stress(fy);
    let excess = KilonewtonMeters(mu_knm) - KilonewtonMeters(limits.phi_mn_max_knm());
    let as2 = NewtonMillimeters::from(excess).value() / (fs * (d - d_prime) * phi);
    narration.record(
        Equation::CompressionSteelDemand,
        format!(
            "φMn2 = Mu - φMn,max = {} kN·m, fs = min(fy, 800) = {} MPa, As2 = φMn2/(φ·fs·(d - d')) = {} mm²",
            narration.num(excess.value()),
            narration.num(fs),
            narration.num(as2)
        ),
    );

    let fs_prime = compression_steel_stress(limits.c_max_mm, d_prime);
    if fs_prime <= 0.0 {
        return Err(CalcError::no_real_solution(
            "compression steel",
            format!(
                "d' = {:.3} mm lies below the neutral axis c = {:.3} mm",
                d_prime, limits.c_max_mm
            ),
        ));
    }
    let compression_yields = fs_prime >= fy;
    narration.record(
        Equation::CompressionSteelStress,
        format!(
            "fs' = 600(c - d')/c at c = 3d/7: {} MPa {} fy = {} MPa: compression steel {}",
            narration.num(fs_prime),
            if compression_yields { "≥" } else { "<" },
            narration.num(fy),
            if compression_yields { "yields" } else { "is elastic" }
        ),
    );

    // As'·min(fs', fy) balances the As2·fs tension couple
    let as_prime_mm2 = as2 * fs / fs_prime.min(fy);
    let as_mm2 = as1 + as2;
    narration.note(format!(
        "As' = As2·fs/min(fs', fy) = {} mm², As = As1 + As2 = {} mm²",
        narration.num(as_prime_mm2),
        narration.num(as_mm2)
    ));

    Ok(Sizing {
        region: DesignRegion::CompressionSteelRequired,
        phi,
        phi_mtn_knm: None,
        as_mm2,
        as_prime_mm2,
        rho: None,
        c_mm: limits.c_max_mm,
        fs_prime_mpa: Some(fs_prime),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::analysis::{analyze, AnalysisInput};
    use approx::assert_relative_eq;

    fn design_input(mu_knm: f64) -> DesignInput {
        DesignInput {
            label: "B-1".to_string(),
            fc_mpa: 21.0,
            fy_mpa: 420.0,
            demand: MomentDemand::Factored { mu_knm },
            b_mm: 300.0,
            d_mm: 550.0,
            d_prime_mm: 50.0,
        }
    }

    fn analyze_design(input: &DesignInput, result: &DesignResult) -> f64 {
        let analysis = analyze(&AnalysisInput {
            label: input.label.clone(),
            fc_mpa: input.fc_mpa,
            fy_mpa: input.fy_mpa,
            as_mm2: result.as_mm2,
            as_prime_mm2: result.as_prime_mm2,
            b_mm: input.b_mm,
            d_mm: input.d_mm,
            d_prime_mm: input.d_prime_mm,
        })
        .unwrap();
        analysis.phi_mn_knm
    }

    #[test]
    fn test_tension_controlled_design() {
        let input = design_input(120.0);
        let result = design(&input).unwrap();
        assert_eq!(result.beam_type, BeamType::SinglyReinforced);
        assert_eq!(result.region, DesignRegion::TensionControlled);
        assert_eq!(result.phi, 0.90);
        assert_relative_eq!(result.as_mm2, 603.1, epsilon = 0.5);
        assert_eq!(result.as_prime_mm2, 0.0);
        assert!(result.fs_mpa >= 1000.0);
        assert_eq!(
            result.final_answer,
            format!("The beam requires {:.0} mm² of tension reinforcement.", result.as_mm2)
        );
        assert_relative_eq!(analyze_design(&input, &result), 120.0, max_relative = 1e-6);
    }

    #[test]
    fn test_transition_zone_design() {
        let input = design_input(391.5);
        let result = design(&input).unwrap();
        assert_eq!(result.region, DesignRegion::Transition);
        assert!(result.phi > 0.8138 && result.phi < 0.90);
        assert!(result.c_mm > 550.0 * 3.0 / 8.0 && result.c_mm <= 550.0 * 3.0 / 7.0);
        assert_relative_eq!(analyze_design(&input, &result), 391.5, max_relative = 1e-6);
    }

    #[test]
    fn test_doubly_reinforced_design() {
        let input = design_input(500.0);
        let result = design(&input).unwrap();
        assert_eq!(result.beam_type, BeamType::DoublyReinforced);
        assert_eq!(result.region, DesignRegion::CompressionSteelRequired);
        assert_relative_eq!(result.phi, result.phi_balanced);
        // fs' at c = 3d/7 ≈ 472.7 MPa ≥ fy, so As' = As2
        assert!(result.fs_prime_mpa.unwrap() > 420.0);
        let as2 = result.as_mm2 - 2554.6;
        assert_relative_eq!(result.as_prime_mm2, as2, epsilon = 0.1);
        assert_relative_eq!(result.as_prime_mm2, 627.6, epsilon = 0.5);
        assert!(result.final_answer.contains("mm² of compression reinforcement"));
        assert_relative_eq!(analyze_design(&input, &result), 500.0, max_relative = 1e-6);
    }

    #[test]
    fn test_doubly_with_elastic_compression_steel() {
        let input = DesignInput {
            d_prime_mm: 120.0,
            ..design_input(500.0)
        };
        let result = design(&input).unwrap();
        let fs_prime = result.fs_prime_mpa.unwrap();
        assert!(fs_prime < 420.0);
        let as2 = result.as_mm2 - result.as_prime_mm2 * fs_prime / 420.0;
        assert_relative_eq!(as2, 2554.6, epsilon = 0.1);
        assert_relative_eq!(analyze_design(&input, &result), 500.0, max_relative = 1e-6);
    }

    #[test]
    fn test_doubly_with_high_strength_steel() {
        // Above 800 MPa the tension steel is elastic at c = 3d/7
        for fy in [850.0, 950.0] {
            let input = DesignInput {
                fy_mpa: fy,
                ..design_input(450.0)
            };
            let result = design(&input).unwrap();
            assert_eq!(result.region, DesignRegion::CompressionSteelRequired);
            assert_relative_eq!(result.phi, 0.65);
            assert_relative_eq!(analyze_design(&input, &result), 450.0, max_relative = 1e-6);
        }
    }

    #[test]
    fn test_compression_steel_below_neutral_axis() {
        let input = DesignInput {
            d_prime_mm: 300.0,
            ..design_input(500.0)
        };
        let err = design(&input).unwrap_err();
        assert_eq!(err.error_code(), "NO_REAL_SOLUTION");
    }

    #[test]
    fn test_service_moments_are_factored() {
        let input = DesignInput {
            demand: MomentDemand::Service {
                dead_knm: 50.0,
                live_knm: 30.0,
            },
            ..design_input(0.0)
        };
        let result = design(&input).unwrap();
        assert_relative_eq!(result.mu_knm, 108.0, epsilon = 1e-9);
        assert_eq!(result.governing_combination.as_deref(), Some("U-2: 1.2D + 1.6L"));
        assert!(result.step_texts()[0].contains("U-2: 1.2D + 1.6L governs"));
    }

    #[test]
    fn test_steps_follow_procedure() {
        let result = design(&design_input(120.0)).unwrap();
        let texts = result.step_texts();
        assert!(texts[0].starts_with("Mu = 120.00"));
        assert!(texts[1].starts_with("β1 = 0.8500"));
        assert!(texts.iter().any(|t| t.contains("Beam Type: Singly Reinforced")));
        assert!(texts.iter().any(|t| t.starts_with("Rn = ")));
        assert_eq!(texts.last().copied(), Some(result.final_answer.as_str()));
    }

    #[test]
    fn test_invalid_inputs() {
        let cases = [
            DesignInput { fc_mpa: -21.0, ..design_input(120.0) },
            DesignInput { fy_mpa: 1200.0, ..design_input(120.0) },
            DesignInput { b_mm: 0.0, ..design_input(120.0) },
            DesignInput { d_mm: f64::INFINITY, ..design_input(120.0) },
            DesignInput { d_prime_mm: 600.0, ..design_input(120.0) },
            design_input(-5.0),
        ];
        for input in cases {
            let err = design(&input).unwrap_err();
            assert_eq!(err.error_code(), "INVALID_INPUT", "{:?}", input);
        }
    }

    #[test]
    fn test_input_json() {
        let json = r#"{
            "label": "B-3",
            "fc_mpa": 21.0,
            "fy_mpa": 420.0,
            "demand": { "kind": "Factored", "mu_knm": 120.0 },
            "b_mm": 300.0,
            "d_mm": 550.0
        }"#;
        let input: DesignInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.d_prime_mm, 0.0);
        let result = design(&input).unwrap();
        let out = serde_json::to_string(&result).unwrap();
        assert!(out.contains("\"region\":\"TensionControlled\""));
    }
}
