//! # flexure_core - Reinforced Concrete Beam Flexure Engine
//!
//! `flexure_core` analyzes and designs rectangular reinforced concrete beams in
//! flexure per ACI 318-14 and NSCP 2015 (SI units). All inputs and outputs are
//! JSON-serializable, and every result carries an ordered worked solution.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Traceable**: Each solution step cites the code equation it applies
//!
//! ## Quick Start
//!
//! ```rust
//! use flexure_core::{analyze, design, AnalysisInput, DesignInput};
//! use flexure_core::loads::MomentDemand;
//!
//! let capacity = analyze(&AnalysisInput {
//!     label: "B-1".to_string(),
//!     fc_mpa: 21.0,
//!     fy_mpa: 420.0,
//!     as_mm2: 1200.0,
//!     as_prime_mm2: 0.0,
//!     b_mm: 300.0,
//!     d_mm: 550.0,
//!     d_prime_mm: 0.0,
//! })
//! .unwrap();
//! println!("{}", capacity.final_answer);
//!
//! let steel = design(&DesignInput {
//!     label: "B-1".to_string(),
//!     fc_mpa: 21.0,
//!     fy_mpa: 420.0,
//!     demand: MomentDemand::Service { dead_knm: 50.0, live_knm: 30.0 },
//!     b_mm: 300.0,
//!     d_mm: 550.0,
//!     d_prime_mm: 50.0,
//! })
//! .unwrap();
//! println!("{}", steel.final_answer);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Analysis and design engines
//! - [`equations`] - Code formulas and the equation registry
//! - [`loads`] - Moment demand and strength combinations
//! - [`narration`] - Worked-solution steps
//! - [`settings`] - Code edition, load factors, display precision
//! - [`units`] - Type-safe moment units
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod loads;
pub mod narration;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{
    analyze, analyze_with_settings, design, design_with_settings, AnalysisInput, AnalysisResult, BeamType,
    CalculationItem, CalculationOutput, DesignInput, DesignRegion, DesignResult,
};
pub use errors::{CalcError, CalcResult};
pub use settings::{DesignCode, GlobalSettings};
