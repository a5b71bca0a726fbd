//! Moment demand for beam design
//!
//! A design is sized for an ultimate moment `Mu`. Callers either supply `Mu`
//! directly or give unfactored dead and live moments, in which case the
//! governing strength combination is applied.
//!
//! # Example
//!
//! ```
//! use flexure_core::loads::MomentDemand;
//! use flexure_core::settings::LoadFactors;
//!
//! let demand = MomentDemand::Service { dead_knm: 50.0, live_knm: 30.0 };
//! let resolved = demand.resolve(&LoadFactors::default()).unwrap();
//! assert!((resolved.mu_knm - 108.0).abs() < 1e-9);
//! ```

pub mod combinations;
pub mod load_types;

pub use combinations::{find_governing_combination, strength_combinations, LoadCombination};
pub use load_types::LoadType;

use serde::{Deserialize, Serialize};

use crate::errors::{require_positive, CalcError, CalcResult};
use crate::settings::LoadFactors;

/// Moment demand on the section, in kN·m.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum MomentDemand {
    /// Ultimate (factored) moment
    Factored { mu_knm: f64 },
    /// Unfactored dead and live moments
    Service { dead_knm: f64, live_knm: f64 },
}

/// Ultimate moment together with the combination that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedDemand {
    /// Ultimate moment Mu (kN·m)
    pub mu_knm: f64,
    /// Governing combination as "name: equation", when built from service moments
    pub governing_combination: Option<String>,
}

impl MomentDemand {
    /// Reduce the demand to a single ultimate moment.
    pub fn resolve(&self, factors: &LoadFactors) -> CalcResult<ResolvedDemand> {
        match *self {
            MomentDemand::Factored { mu_knm } => {
                require_positive("mu_knm", mu_knm, "Ultimate moment must be positive")?;
                Ok(ResolvedDemand {
                    mu_knm,
                    governing_combination: None,
                })
            }
            MomentDemand::Service { dead_knm, live_knm } => {
                for (field, value) in [("dead_knm", dead_knm), ("live_knm", live_knm)] {
                    if !value.is_finite() || value < 0.0 {
                        return Err(CalcError::invalid_input(
                            field,
                            value.to_string(),
                            "Service moments cannot be negative",
                        ));
                    }
                }

                let combos = strength_combinations(factors);
                let (mu_knm, combo) = find_governing_combination(dead_knm, live_knm, &combos)
                    .ok_or_else(|| CalcError::calculation_failed("load combination", "No combinations defined"))?;
                require_positive("mu_knm", mu_knm, "Factored moment from service loads must be positive")?;

                Ok(ResolvedDemand {
                    mu_knm,
                    governing_combination: Some(format!("{}: {}", combo.name, combo.equation)),
                })
            }
        }
    }
}
