//! # Neutral-Axis Solver
//!
//! Finds the neutral-axis depth `c` of a section with known steel by
//! horizontal force equilibrium and strain compatibility.
//!
//! The solver starts by assuming every steel layer yields. That case has a
//! closed form. When a computed stress contradicts an assumption the
//! assumption is flipped and equilibrium is re-solved. An elastic layer
//! contributes a stress of 600(d - c)/c, which turns equilibrium into the
//! quadratic `A·c² + B·c - C = 0`. Passes repeat until the assumptions match
//! the stresses they produce. Each combination of yield states is tried at
//! most once; a section where none of them is consistent is an error.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::equations::{
    compression_steel_stress, stress_block_depth, tension_steel_stress, Equation, ES_TIMES_ECU_MPA,
    STRESS_BLOCK_INTENSITY,
};
use crate::errors::{CalcError, CalcResult};
use crate::narration::Narration;

/// Section data the solver needs. Stresses in MPa, lengths in mm, areas in mm².
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteelSection {
    pub fc: f64,
    pub fy: f64,
    pub beta1: f64,
    pub b: f64,
    pub d: f64,
    pub d_prime: f64,
    pub as_tension: f64,
    pub as_compression: f64,
}

impl SteelSection {
    fn has_compression_steel(&self) -> bool {
        self.as_compression > 0.0
    }
}

/// How the final neutral-axis depth was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NeutralAxisMethod {
    /// Closed form with all steel at fy
    AllSteelYields,
    /// Quadratic with at least one elastic steel layer
    Quadratic,
}

/// Equilibrium `A·c² + B·c - C = 0` in N, N/mm and N·mm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeutralAxisQuadratic {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl NeutralAxisQuadratic {
    /// Build the equilibrium for a set of yield assumptions.
    ///
    /// A yielding layer contributes a constant force As·fy to `B`. An elastic
    /// layer contributes 600·As to `B` and 600·As·depth to `C`.
    pub fn from_assumptions(section: &SteelSection, tension_yields: bool, compression_yields: bool) -> Self {
        let a = STRESS_BLOCK_INTENSITY * section.fc * section.beta1 * section.b;
        let mut b = 0.0;
        let mut c = 0.0;

        if tension_yields {
            b -= section.as_tension * section.fy;
        } else {
            b += ES_TIMES_ECU_MPA * section.as_tension;
            c += ES_TIMES_ECU_MPA * section.as_tension * section.d;
        }

        if section.has_compression_steel() {
            if compression_yields {
                b += section.as_compression * section.fy;
            } else {
                b += ES_TIMES_ECU_MPA * section.as_compression;
                c += ES_TIMES_ECU_MPA * section.as_compression * section.d_prime;
            }
        }

        NeutralAxisQuadratic { a, b, c }
    }

    /// Discriminant of `A·c² + B·c - C = 0`, i.e. B² + 4AC
    pub fn discriminant(&self) -> f64 {
        self.b * self.b + 4.0 * self.a * self.c
    }

    /// Both roots, larger first. `None` when the discriminant is negative.
    pub fn roots(&self) -> Option<(f64, f64)> {
        let disc = self.discriminant();
        if disc < 0.0 || !disc.is_finite() {
            return None;
        }
        let sqrt = disc.sqrt();
        let r1 = (-self.b + sqrt) / (2.0 * self.a);
        let r2 = (-self.b - sqrt) / (2.0 * self.a);
        Some((r1.max(r2), r1.min(r2)))
    }

    /// Select the physical root for an effective depth `d`.
    ///
    /// The larger root is used when it lies in (0, d], otherwise the smaller
    /// root when it lies in (0, d].
    pub fn solve(&self, d: f64) -> CalcResult<f64> {
        let (larger, smaller) = self.roots().ok_or_else(|| {
            CalcError::no_real_solution(
                "neutral axis",
                format!("discriminant {:.3e} is negative", self.discriminant()),
            )
        })?;

        let within = |root: f64| root > 0.0 && root <= d;
        if within(larger) {
            Ok(larger)
        } else if within(smaller) {
            Ok(smaller)
        } else {
            Err(CalcError::no_real_solution(
                "neutral axis",
                format!(
                    "roots {:.3} and {:.3} mm both lie outside 0 < c ≤ d = {:.3} mm",
                    larger, smaller, d
                ),
            ))
        }
    }
}

/// Strain-compatible state of a section at equilibrium.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressState {
    /// Neutral-axis depth (mm)
    pub c_mm: f64,
    /// Stress-block depth a = β1·c (mm)
    pub a_mm: f64,
    /// Tension steel stress Es·εs (MPa), not capped at fy
    pub fs_mpa: f64,
    /// Compression steel stress Es·εs' (MPa), when compression steel exists
    pub fs_prime_mpa: Option<f64>,
    /// fs ≥ fy
    pub tension_yields: bool,
    /// fs' ≥ fy, when compression steel exists
    pub compression_yields: Option<bool>,
    pub method: NeutralAxisMethod,
    /// Assumption passes used
    pub passes: usize,
}

impl StressState {
    /// Stress used for the compression steel force: fy when yielding, else fs'
    pub fn compression_force_stress(&self, fy: f64) -> f64 {
        match self.fs_prime_mpa {
            Some(fs_prime) if fs_prime >= fy => fy,
            Some(fs_prime) => fs_prime,
            None => 0.0,
        }
    }
}

fn yield_word(yields: bool) -> &'static str {
    if yields {
        "yields"
    } else {
        "is elastic"
    }
}

/// Yield assumptions `(tension, compression)` a section can be solved under,
/// starting with all steel yielding.
fn candidate_assumptions(has_compression: bool) -> &'static [(bool, bool)] {
    if has_compression {
        &[(true, true), (true, false), (false, true), (false, false)]
    } else {
        &[(true, false), (false, false)]
    }
}

/// The state a trial computed when it has not been tried yet, else the first
/// untried candidate.
fn next_assumption(
    candidates: &[(bool, bool)],
    tried: &[(bool, bool)],
    computed: Option<(bool, bool)>,
) -> Option<(bool, bool)> {
    computed
        .filter(|state| !tried.contains(state))
        .or_else(|| candidates.iter().copied().find(|state| !tried.contains(state)))
}

/// Solve for the neutral axis, narrating each trial.
///
/// # Errors
///
/// `NoRealSolution` when a trial quadratic has no root in (0, d], and
/// `CalculationFailed` when every combination of yield states contradicts
/// the stresses it produces.
pub fn solve(section: &SteelSection, narration: &mut Narration) -> CalcResult<StressState> {
    let has_compression = section.has_compression_steel();
    let candidates = candidate_assumptions(has_compression);
    let mut tried: Vec<(bool, bool)> = Vec::with_capacity(candidates.len());
    let mut next = candidates.first().copied();

    while let Some(assumption) = next {
        tried.push(assumption);
        let pass = tried.len();
        let (assume_tension, assume_compression) = assumption;
        let all_yield = assume_tension && (assume_compression || !has_compression);

        let (c, method) = if all_yield {
            let net_force = (section.as_tension - section.as_compression) * section.fy;
            if net_force <= 0.0 {
                narration.note(format!(
                    "(As - As')·fy = {} N ≤ 0: compression steel cannot yield, assume it is elastic",
                    narration.num(net_force)
                ));
                debug!(pass, net_force, "compression steel cannot yield");
                next = next_assumption(candidates, &tried, None);
                continue;
            }
            let a = stress_block_depth(net_force, section.fc, section.b);
            let c = a / section.beta1;
            let formula = if has_compression {
                "Assume all steel yields: a = (As - As')·fy/(0.85·f'c·b)"
            } else {
                "Assume tension steel yields: a = As·fy/(0.85·f'c·b)"
            };
            narration.record(
                Equation::StressBlockDepth,
                format!(
                    "{} = {} mm, c = a/β1 = {} mm",
                    formula,
                    narration.num(a),
                    narration.num(c)
                ),
            );
            (c, NeutralAxisMethod::AllSteelYields)
        } else {
            let quadratic = NeutralAxisQuadratic::from_assumptions(section, assume_tension, assume_compression);
            let c = quadratic.solve(section.d)?;
            let mut stated = format!("Assume tension steel {}", yield_word(assume_tension));
            if has_compression {
                stated.push_str(&format!(" and compression steel {}", yield_word(assume_compression)));
            }
            narration.record(
                Equation::NeutralAxisQuadratic,
                format!(
                    "{}: {}·c² + ({})·c - {} = 0, c = {} mm",
                    stated,
                    narration.num(quadratic.a),
                    narration.num(quadratic.b),
                    narration.num(quadratic.c),
                    narration.num(c)
                ),
            );
            (c, NeutralAxisMethod::Quadratic)
        };

        let fs = tension_steel_stress(c, section.d);
        let tension_yields = fs >= section.fy;
        narration.record(
            Equation::TensionSteelStress,
            format!(
                "fs = 600(d - c)/c = {} MPa {} fy = {} MPa: tension steel {}",
                narration.num(fs),
                if tension_yields { "≥" } else { "<" },
                narration.num(section.fy),
                yield_word(tension_yields)
            ),
        );

        let (fs_prime, compression_yields) = if has_compression {
            let fs_prime = compression_steel_stress(c, section.d_prime);
            let yields = fs_prime >= section.fy;
            narration.record(
                Equation::CompressionSteelStress,
                format!(
                    "fs' = 600(c - d')/c = {} MPa {} fy = {} MPa: compression steel {}",
                    narration.num(fs_prime),
                    if yields { "≥" } else { "<" },
                    narration.num(section.fy),
                    yield_word(yields)
                ),
            );
            (Some(fs_prime), Some(yields))
        } else {
            (None, None)
        };

        debug!(pass, c, fs, ?fs_prime, ?method, "neutral axis trial");
        let computed = (tension_yields, compression_yields.unwrap_or(false));
        if computed == assumption {
            return Ok(StressState {
                c_mm: c,
                a_mm: section.beta1 * c,
                fs_mpa: fs,
                fs_prime_mpa: fs_prime,
                tension_yields,
                compression_yields,
                method,
                passes: pass,
            });
        }
        next = next_assumption(candidates, &tried, Some(computed));
    }

    warn!(tried = tried.len(), "no yield state is consistent with equilibrium");
    Err(CalcError::calculation_failed(
        "neutral axis",
        format!(
            "none of the {} steel yield states agrees with the stresses it produces",
            tried.len()
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GlobalSettings;

    fn section(as_tension: f64, as_compression: f64) -> SteelSection {
        SteelSection {
            fc: 21.0,
            fy: 420.0,
            beta1: 0.85,
            b: 300.0,
            d: 550.0,
            d_prime: 50.0,
            as_tension,
            as_compression,
        }
    }

    fn narration() -> Narration {
        Narration::new(&GlobalSettings::default())
    }

    #[test]
    fn test_singly_yielding_closed_form() {
        let mut n = narration();
        let state = solve(&section(1200.0, 0.0), &mut n).unwrap();
        assert_eq!(state.method, NeutralAxisMethod::AllSteelYields);
        assert_eq!(state.passes, 1);
        assert!((state.a_mm - 94.118).abs() < 1e-3);
        assert!((state.c_mm - 110.727).abs() < 1e-3);
        assert!(state.tension_yields);
        assert!(state.fs_prime_mpa.is_none());
    }

    #[test]
    fn test_singly_heavy_steel_uses_quadratic() {
        let mut n = narration();
        let state = solve(&section(4000.0, 0.0), &mut n).unwrap();
        assert_eq!(state.method, NeutralAxisMethod::Quadratic);
        assert!(!state.tension_yields);
        assert!((state.c_mm - 335.9).abs() < 0.5);
        assert!((state.fs_mpa - 382.0).abs() < 1.0);
        // Equilibrium: 0.85·f'c·a·b = As·fs
        let cc = 0.85 * 21.0 * state.a_mm * 300.0;
        assert!((cc - 4000.0 * state.fs_mpa).abs() / cc < 1e-9);
    }

    #[test]
    fn test_doubly_both_yield() {
        let mut n = narration();
        let state = solve(&section(2500.0, 400.0), &mut n).unwrap();
        assert_eq!(state.method, NeutralAxisMethod::AllSteelYields);
        assert!((state.a_mm - 164.706).abs() < 1e-3);
        assert!((state.c_mm - 193.772).abs() < 1e-3);
        assert_eq!(state.compression_yields, Some(true));
        assert!((state.fs_mpa - 1103.0).abs() < 1.0);
        assert!((state.fs_prime_mpa.unwrap() - 445.2).abs() < 0.5);
    }

    #[test]
    fn test_doubly_elastic_compression_steel() {
        let mut n = narration();
        let state = solve(&section(1200.0, 600.0), &mut n).unwrap();
        assert_eq!(state.method, NeutralAxisMethod::Quadratic);
        assert_eq!(state.compression_yields, Some(false));
        assert!(state.tension_yields);
        // Equilibrium with compression steel at fs'
        let cc = 0.85 * 21.0 * state.a_mm * 300.0;
        let cs = 600.0 * state.fs_prime_mpa.unwrap();
        assert!((cc + cs - 1200.0 * 420.0).abs() / (1200.0 * 420.0) < 1e-9);
    }

    #[test]
    fn test_compression_steel_exceeding_tension_steel() {
        let mut n = narration();
        let state = solve(&section(800.0, 1000.0), &mut n).unwrap();
        assert_eq!(state.compression_yields, Some(false));
        assert!(state.c_mm > 0.0 && state.c_mm <= 550.0);
        assert!(n.steps()[0].text.contains("cannot yield"));
    }

    #[test]
    fn test_each_yield_state_is_tried_once() {
        let candidates = candidate_assumptions(true);
        // A computed state that was not tried yet comes next
        assert_eq!(
            next_assumption(candidates, &[(true, true)], Some((false, true))),
            Some((false, true))
        );
        // Otherwise the first untried candidate, so the search cannot cycle
        assert_eq!(
            next_assumption(candidates, &[(true, true), (false, true)], Some((true, true))),
            Some((true, false))
        );
        assert_eq!(next_assumption(candidates, candidates, Some((false, false))), None);
        assert_eq!(candidate_assumptions(false).len(), 2);
    }

    #[test]
    fn test_passes_never_exceed_yield_states() {
        for (as_tension, as_compression) in [(1200.0, 0.0), (4000.0, 0.0), (2500.0, 400.0), (1200.0, 600.0), (800.0, 1000.0), (6000.0, 300.0)] {
            let mut n = narration();
            let state = solve(&section(as_tension, as_compression), &mut n).unwrap();
            let limit = if as_compression > 0.0 { 4 } else { 2 };
            assert!(state.passes <= limit);
            // The returned state is consistent with its own stresses
            assert_eq!(state.tension_yields, state.fs_mpa >= 420.0);
            if let Some(fs_prime) = state.fs_prime_mpa {
                assert_eq!(state.compression_yields, Some(fs_prime >= 420.0));
            }
        }
    }

    #[test]
    fn test_negative_discriminant_is_no_real_solution() {
        let quadratic = NeutralAxisQuadratic { a: 1.0, b: 1.0, c: -10.0 };
        assert!(quadratic.discriminant() < 0.0);
        let err = quadratic.solve(550.0).unwrap_err();
        assert_eq!(err.error_code(), "NO_REAL_SOLUTION");
    }

    #[test]
    fn test_roots_outside_section_are_rejected() {
        // c² - 1000c + 0 = 0 → roots 1000 and 0
        let quadratic = NeutralAxisQuadratic { a: 1.0, b: -1000.0, c: 0.0 };
        let err = quadratic.solve(550.0).unwrap_err();
        assert!(matches!(err, CalcError::NoRealSolution { .. }));
    }

    #[test]
    fn test_root_selection_prefers_larger_within_depth() {
        // (c - 100)(c + 50) = c² - 50c - 5000
        let quadratic = NeutralAxisQuadratic { a: 1.0, b: -50.0, c: 5000.0 };
        assert!((quadratic.solve(550.0).unwrap() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_trials_are_narrated() {
        let mut n = narration();
        solve(&section(4000.0, 0.0), &mut n).unwrap();
        let equations = n.equations_used();
        assert!(equations.contains(&Equation::StressBlockDepth));
        assert!(equations.contains(&Equation::NeutralAxisQuadratic));
        assert!(equations.contains(&Equation::TensionSteelStress));
    }
}
