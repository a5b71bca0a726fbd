//! # Rectangular Section Flexure Formulas
//!
//! Strength-design equations for rectangular reinforced concrete sections
//! using the equivalent rectangular (Whitney) stress block.
//!
//! ## Notation
//!
//! - `fc` = Specified concrete compressive strength f'c (MPa)
//! - `fy` = Specified steel yield strength (MPa)
//! - `b` = Section width (mm)
//! - `d` = Depth to tension steel centroid (mm)
//! - `d'` = Depth to compression steel centroid (mm)
//! - `c` = Neutral-axis depth (mm)
//! - `a` = Stress-block depth, a = β1·c (mm)
//! - `fs`, `fs'` = Strain-compatible steel stresses (MPa), not capped at fy
//!
//! ## Strain Assumptions
//!
//! - Concrete crushing strain εcu = 0.003 (ACI 318-14 22.2.2.1)
//! - Steel modulus Es = 200 000 MPa (ACI 318-14 20.2.2.2), so Es·εcu = 600 MPa
//! - Tension-controlled limit εt = 0.005, i.e. fs = Es·εt = 1000 MPa
//! - Maximum steel for beams εt = 0.004 (ACI 318-14 9.3.3.1), i.e. c = 3d/7
//!
//! Moments are returned in N·mm; convert with [`crate::units`].

/// Es·εcu (MPa): stress in steel per unit of (distance / c) strain ratio
pub const ES_TIMES_ECU_MPA: f64 = 600.0;

/// Es·εt at the tension-controlled strain limit εt = 0.005 (MPa)
pub const TENSION_CONTROLLED_STRESS_MPA: f64 = 1000.0;

/// Es·εt at the maximum-steel limit for beams εt = 0.004 (MPa)
pub const MAX_STEEL_STRESS_MPA: f64 = 800.0;

/// Concrete stress-block intensity factor (0.85·f'c)
pub const STRESS_BLOCK_INTENSITY: f64 = 0.85;

/// φ for tension-controlled sections
pub const PHI_TENSION_CONTROLLED: f64 = 0.90;

/// φ for compression-controlled sections (other than spirally reinforced)
pub const PHI_COMPRESSION_CONTROLLED: f64 = 0.65;

/// Upper bound of β1
pub const BETA1_MAX: f64 = 0.85;

/// Lower bound of β1
pub const BETA1_MIN: f64 = 0.65;

// =============================================================================
// Code factors
// =============================================================================

/// Stress-block depth factor β1 (ACI 318-14 Table 22.2.2.4.3)
///
/// # Formulas
/// - β1 = 0.85                         for f'c ≤ 28 MPa
/// - β1 = 0.85 − (0.05/7)(f'c − 28)    for 28 < f'c < 55 MPa
/// - β1 = 0.65                         for f'c ≥ 55 MPa
#[inline]
pub fn beta1(fc: f64) -> f64 {
    if fc <= 28.0 {
        BETA1_MAX
    } else if fc < 55.0 {
        BETA1_MAX - (0.05 / 7.0) * (fc - 28.0)
    } else {
        BETA1_MIN
    }
}

/// Strength reduction factor φ for flexure (ACI 318-14 Table 21.2.2)
///
/// `fs` is the strain-compatible stress Es·εt in the extreme tension steel.
///
/// # Formulas
/// - φ = 0.90                                  for fs ≥ 1000 MPa
/// - φ = 0.65 + 0.25(fs − fy)/(1000 − fy)      for fy ≤ fs < 1000 MPa
/// - φ = 0.65                                  for fs < fy
#[inline]
pub fn strength_reduction_factor(fs: f64, fy: f64) -> f64 {
    let phi = if fs >= TENSION_CONTROLLED_STRESS_MPA {
        PHI_TENSION_CONTROLLED
    } else if fs >= fy {
        PHI_COMPRESSION_CONTROLLED + 0.25 * (fs - fy) / (TENSION_CONTROLLED_STRESS_MPA - fy)
    } else {
        PHI_COMPRESSION_CONTROLLED
    };
    phi.clamp(PHI_COMPRESSION_CONTROLLED, PHI_TENSION_CONTROLLED)
}

/// φ at the maximum-steel limit εt = 0.004 (fs = 800 MPa)
///
/// # Formula
/// φ = 0.65 + 0.25(800 − fy)/(1000 − fy)
#[inline]
pub fn balanced_phi(fy: f64) -> f64 {
    (PHI_COMPRESSION_CONTROLLED + 0.25 * (MAX_STEEL_STRESS_MPA - fy) / (TENSION_CONTROLLED_STRESS_MPA - fy))
        .clamp(PHI_COMPRESSION_CONTROLLED, PHI_TENSION_CONTROLLED)
}

// =============================================================================
// Limit states of a singly reinforced section
// =============================================================================

/// Neutral-axis depth at the maximum-steel limit: c_max = 3d/7
#[inline]
pub fn max_neutral_axis_depth(d: f64) -> f64 {
    3.0 * d / 7.0
}

/// Neutral-axis depth at the tension-controlled limit: c_t = 3d/8
#[inline]
pub fn tension_controlled_neutral_axis_depth(d: f64) -> f64 {
    3.0 * d / 8.0
}

/// Maximum nominal moment of a singly reinforced section (c = 3d/7), N·mm
///
/// # Formula
/// Mn,max = (51/140)·β1·f'c·b·d²·(1 − (3/14)·β1)
#[inline]
pub fn max_nominal_moment(beta1: f64, fc: f64, b: f64, d: f64) -> f64 {
    (51.0 / 140.0) * beta1 * fc * b * d * d * (1.0 - (3.0 / 14.0) * beta1)
}

/// Design moment at the tension-controlled limit (c = 3d/8, φ = 0.90), N·mm
///
/// # Formula
/// φMtn = (459/1600)·β1·f'c·b·d²·(1 − (3/16)·β1)
#[inline]
pub fn tension_controlled_design_moment(beta1: f64, fc: f64, b: f64, d: f64) -> f64 {
    (459.0 / 1600.0) * beta1 * fc * b * d * d * (1.0 - (3.0 / 16.0) * beta1)
}

/// Tension steel stress at the maximum-steel limit: min(fy, 800) MPa
///
/// Steel with fy above 800 MPa is still elastic at εt = 0.004.
#[inline]
pub fn max_steel_stress(fy: f64) -> f64 {
    fy.min(MAX_STEEL_STRESS_MPA)
}

/// Maximum tension steel of a singly reinforced section, mm²
///
/// # Formula
/// As,max = 0.85·f'c·a_max·b / min(fy, 800) with a_max = β1·(3d/7)
#[inline]
pub fn max_tension_steel(beta1: f64, fc: f64, fy: f64, b: f64, d: f64) -> f64 {
    let a_max = beta1 * max_neutral_axis_depth(d);
    concrete_compression(fc, a_max, b) / max_steel_stress(fy)
}

// =============================================================================
// Strain compatibility
// =============================================================================

/// Concrete compression resultant C = 0.85·f'c·a·b (N)
#[inline]
pub fn concrete_compression(fc: f64, a: f64, b: f64) -> f64 {
    STRESS_BLOCK_INTENSITY * fc * a * b
}

/// Stress-block depth that balances a tension force T: a = T/(0.85·f'c·b)
#[inline]
pub fn stress_block_depth(tension_force: f64, fc: f64, b: f64) -> f64 {
    tension_force / (STRESS_BLOCK_INTENSITY * fc * b)
}

/// Tension steel stress from strain compatibility: fs = 600(d − c)/c
#[inline]
pub fn tension_steel_stress(c: f64, d: f64) -> f64 {
    ES_TIMES_ECU_MPA * (d - c) / c
}

/// Compression steel stress from strain compatibility: fs' = 600(c − d')/c
#[inline]
pub fn compression_steel_stress(c: f64, d_prime: f64) -> f64 {
    ES_TIMES_ECU_MPA * (c - d_prime) / c
}

/// Nominal moment of a section at neutral-axis depth `c` carried by concrete alone, N·mm
///
/// # Formula
/// Mn = 0.85·f'c·β1·c·b·(d − β1·c/2)
#[inline]
pub fn concrete_nominal_moment(beta1: f64, fc: f64, b: f64, d: f64, c: f64) -> f64 {
    let a = beta1 * c;
    concrete_compression(fc, a, b) * (d - a / 2.0)
}

// =============================================================================
// Design aids
// =============================================================================

/// Flexural resistance coefficient Rn = Mu/(φ·b·d²) (MPa), `mu` in N·mm
#[inline]
pub fn resistance_coefficient(mu: f64, phi: f64, b: f64, d: f64) -> f64 {
    mu / (phi * b * d * d)
}

/// Required reinforcement ratio for a resistance coefficient
///
/// # Formula
/// ρ = (0.85·f'c/fy)·(1 − √(1 − 2Rn/(0.85·f'c)))
///
/// Returns `None` when the radicand is negative (section too small).
#[inline]
pub fn reinforcement_ratio(rn: f64, fc: f64, fy: f64) -> Option<f64> {
    let radicand = 1.0 - 2.0 * rn / (STRESS_BLOCK_INTENSITY * fc);
    if radicand < 0.0 {
        return None;
    }
    Some(STRESS_BLOCK_INTENSITY * fc / fy * (1.0 - radicand.sqrt()))
}

/// First estimate of c for a transition-zone design
///
/// # Formulas
/// - k = Mu/(0.85·f'c·b·d²)
/// - c₀ = d·(1 − √(1 − 2k))
///
/// Returns `None` when 2k > 1.
#[inline]
pub fn transition_neutral_axis_estimate(mu: f64, fc: f64, b: f64, d: f64) -> Option<f64> {
    let k = mu / (STRESS_BLOCK_INTENSITY * fc * b * d * d);
    let radicand = 1.0 - 2.0 * k;
    if radicand < 0.0 {
        return None;
    }
    Some(d * (1.0 - radicand.sqrt()))
}
