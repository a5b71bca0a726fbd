//! Strength-design load combinations (ACI 318-14 Table 5.3.1 / NSCP 2015 Table 405.3.1)
//!
//! Only the gravity combinations that involve dead and live load are relevant
//! to a beam flexure check:
//! - U = 1.4D
//! - U = 1.2D + 1.6L

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::load_types::LoadType;
use crate::settings::LoadFactors;

/// A load combination with factors for each load type
///
/// # Example
/// ```
/// use flexure_core::loads::{LoadCombination, LoadType};
///
/// let combo = LoadCombination::new("U-2", "1.2D + 1.6L")
///     .with_factor(LoadType::Dead, 1.2)
///     .with_factor(LoadType::Live, 1.6);
///
/// let mu = combo.apply(50.0, 30.0);
/// assert!((mu - 108.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadCombination {
    /// Combination identifier (e.g., "U-1")
    pub name: String,

    /// Human-readable equation for display (e.g., "1.2D + 1.6L")
    pub equation: String,

    /// Load factors keyed by load type
    pub factors: HashMap<LoadType, f64>,
}

impl LoadCombination {
    /// Create a new load combination
    pub fn new(name: impl Into<String>, equation: impl Into<String>) -> Self {
        LoadCombination {
            name: name.into(),
            equation: equation.into(),
            factors: HashMap::new(),
        }
    }

    /// Add a load factor (builder pattern)
    pub fn with_factor(mut self, load_type: LoadType, factor: f64) -> Self {
        self.factors.insert(load_type, factor);
        self
    }

    /// Get the factor for a specific load type (0.0 if not in combination)
    pub fn get_factor(&self, load_type: LoadType) -> f64 {
        self.factors.get(&load_type).copied().unwrap_or(0.0)
    }

    /// Apply this combination to dead and live service moments
    pub fn apply(&self, dead: f64, live: f64) -> f64 {
        self.get_factor(LoadType::Dead) * dead + self.get_factor(LoadType::Live) * live
    }
}

/// Generate the strength combinations for the given load factors.
///
/// # Example
/// ```
/// use flexure_core::loads::strength_combinations;
/// use flexure_core::settings::LoadFactors;
///
/// let combos = strength_combinations(&LoadFactors::default());
/// assert_eq!(combos.len(), 2);
/// assert_eq!(combos[1].equation, "1.2D + 1.6L");
/// ```
pub fn strength_combinations(factors: &LoadFactors) -> Vec<LoadCombination> {
    vec![
        LoadCombination::new("U-1", format!("{}D", factors.dead_only))
            .with_factor(LoadType::Dead, factors.dead_only),
        LoadCombination::new("U-2", format!("{}D + {}L", factors.dead, factors.live))
            .with_factor(LoadType::Dead, factors.dead)
            .with_factor(LoadType::Live, factors.live),
    ]
}

/// Find the combination producing the largest factored moment.
///
/// Returns `(factored_moment, combination)`.
pub fn find_governing_combination(
    dead: f64,
    live: f64,
    combinations: &[LoadCombination],
) -> Option<(f64, &LoadCombination)> {
    combinations
        .iter()
        .map(|combo| (combo.apply(dead, live), combo))
        .max_by(|a, b| a.0.total_cmp(&b.0))
}
