//! # Section Classification
//!
//! Computes the code limits of a rectangular section (β1, φ at the
//! maximum-steel strain, Mn,max, As,max) and decides whether it is analyzed or
//! designed as singly or doubly reinforced.
//!
//! Analysis and design classify differently: analysis already knows the
//! steel, design must decide from the moment demand before any steel exists.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::BeamType;
use crate::equations::{
    balanced_phi, beta1, max_neutral_axis_depth, max_nominal_moment, max_tension_steel, Equation,
};
use crate::narration::Narration;
use crate::units::nmm_to_knm;

/// Code limits of a section, independent of the reinforcement provided.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionLimits {
    /// Stress-block depth factor β1
    pub beta1: f64,
    /// φ at the maximum-steel limit εt = 0.004
    pub phi_balanced: f64,
    /// Neutral-axis depth at the maximum-steel limit, 3d/7 (mm)
    pub c_max_mm: f64,
    /// Stress-block depth at the maximum-steel limit (mm)
    pub a_max_mm: f64,
    /// Maximum tension steel of a singly reinforced section (mm²)
    pub as_max_mm2: f64,
    /// Maximum nominal moment of a singly reinforced section (kN·m)
    pub mn_max_knm: f64,
}

impl SectionLimits {
    /// Design moment at the maximum-steel limit, φ·Mn,max (kN·m)
    pub fn phi_mn_max_knm(&self) -> f64 {
        self.phi_balanced * self.mn_max_knm
    }
}

/// Compute the limits of a section and narrate β1, φ and Mn,max.
pub fn section_limits(fc: f64, fy: f64, b: f64, d: f64, narration: &mut Narration) -> SectionLimits {
    let beta1 = beta1(fc);
    narration.record(
        Equation::StressBlockFactor,
        format!("β1 = {} (f'c = {} MPa)", Narration::factor(beta1), narration.num(fc)),
    );

    let phi_balanced = balanced_phi(fy);
    narration.record(
        Equation::BalancedStrengthReductionFactor,
        format!(
            "φ = 0.65 + 0.25(800 - fy)/(1000 - fy) = {}",
            Narration::factor(phi_balanced)
        ),
    );

    let mn_max_knm = nmm_to_knm(max_nominal_moment(beta1, fc, b, d));
    narration.record(
        Equation::MaximumNominalMoment,
        format!(
            "Mn,max = (51/140)·β1·f'c·b·d²·(1 - (3/14)·β1) = {} kN·m",
            narration.num(mn_max_knm)
        ),
    );

    let c_max_mm = max_neutral_axis_depth(d);
    let limits = SectionLimits {
        beta1,
        phi_balanced,
        c_max_mm,
        a_max_mm: beta1 * c_max_mm,
        as_max_mm2: max_tension_steel(beta1, fc, fy, b, d),
        mn_max_knm,
    };
    debug!(
        beta1 = limits.beta1,
        phi_balanced = limits.phi_balanced,
        mn_max_knm = limits.mn_max_knm,
        "section limits"
    );
    limits
}

/// Classify a section with known steel.
///
/// A section is doubly reinforced exactly when compression steel is
/// provided; As,max is narrated so the reader can see whether the tension
/// steel alone exceeds the singly reinforced limit.
pub fn classify_for_analysis(
    limits: &SectionLimits,
    as_mm2: f64,
    as_prime_mm2: f64,
    narration: &mut Narration,
) -> BeamType {
    narration.record(
        Equation::MaximumTensionSteel,
        format!(
            "c,max = 3d/7 = {} mm, a,max = β1·c,max = {} mm, As,max = 0.85·f'c·a,max·b/min(fy, 800) = {} mm²",
            narration.num(limits.c_max_mm),
            narration.num(limits.a_max_mm),
            narration.num(limits.as_max_mm2)
        ),
    );

    let comparison = if limits.as_max_mm2 > as_mm2 { ">" } else { "≤" };
    let beam_type = if as_prime_mm2 > 0.0 {
        BeamType::DoublyReinforced
    } else {
        BeamType::SinglyReinforced
    };

    let reason = match beam_type {
        BeamType::DoublyReinforced => format!(
            "As' = {} mm² is provided",
            narration.num(as_prime_mm2)
        ),
        BeamType::SinglyReinforced => "no compression steel is provided".to_string(),
    };
    narration.note(format!(
        "As,max = {} mm² {} As = {} mm²; {}: Beam Type: {}",
        narration.num(limits.as_max_mm2),
        comparison,
        narration.num(as_mm2),
        reason,
        beam_type
    ));

    debug!(%beam_type, as_mm2, as_max_mm2 = limits.as_max_mm2, "classified section for analysis");
    beam_type
}

/// Classify a section for a moment demand.
///
/// Singly reinforced when Mu ≤ φ·Mn,max, with φ taken at the maximum-steel limit.
pub fn classify_for_design(limits: &SectionLimits, mu_knm: f64, narration: &mut Narration) -> BeamType {
    let phi_mn_max = limits.phi_mn_max_knm();
    narration.record(
        Equation::DesignMoment,
        format!(
            "φMn,max = φ·Mn,max = {} × {} = {} kN·m",
            Narration::factor(limits.phi_balanced),
            narration.num(limits.mn_max_knm),
            narration.num(phi_mn_max)
        ),
    );

    let (beam_type, comparison) = if mu_knm <= phi_mn_max {
        (BeamType::SinglyReinforced, "≤")
    } else {
        (BeamType::DoublyReinforced, ">")
    };
    narration.note(format!(
        "Mu = {} kN·m {} φMn,max = {} kN·m: Beam Type: {}",
        narration.num(mu_knm),
        comparison,
        narration.num(phi_mn_max),
        beam_type
    ));

    debug!(%beam_type, mu_knm, phi_mn_max, "classified section for design");
    beam_type
}
