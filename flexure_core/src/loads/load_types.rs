//! Load type definitions for beam moment demands

use serde::{Deserialize, Serialize};

/// Load types that contribute to a beam's service moment.
///
/// # Example
/// ```
/// use flexure_core::loads::LoadType;
///
/// let dead = LoadType::Dead;
/// assert_eq!(dead.code(), "D");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadType {
    /// D - Dead load (self-weight and superimposed permanent load)
    Dead,
    /// L - Live load (occupancy)
    Live,
}

impl LoadType {
    /// Standard abbreviation code used in combination equations
    pub fn code(&self) -> &'static str {
        match self {
            LoadType::Dead => "D",
            LoadType::Live => "L",
        }
    }
}

impl std::fmt::Display for LoadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
