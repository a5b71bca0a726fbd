//! # Flexure Equations
//!
//! This module contains the code equations used by the analysis and design
//! engines. Having equations in one place enables:
//! - Easy verification against ACI 318-14 / NSCP 2015
//! - Documentation of assumptions and units
//! - A single φ and β1 rule shared by both engines
//!
//! ## Modules
//!
//! - [`flexure`] - Rectangular section strength-design formulas
//! - [`registry`] - Equation metadata for solution steps and EQUATIONS.md
//!
//! ## Conventions
//!
//! - Compression is measured from the extreme compression fiber
//! - Steel stresses are strain-compatible (Es·ε) and may exceed fy; they are
//!   capped at fy only where a force is computed
//!
//! ## References
//!
//! - ACI 318-14: Building Code Requirements for Structural Concrete
//! - NSCP 2015 Volume I, Chapter 4

pub mod flexure;
pub mod registry;

pub use flexure::{
    balanced_phi,
    beta1,
    compression_steel_stress,
    concrete_compression,
    concrete_nominal_moment,
    max_neutral_axis_depth,
    max_nominal_moment,
    max_steel_stress,
    max_tension_steel,
    reinforcement_ratio,
    resistance_coefficient,
    strength_reduction_factor,
    stress_block_depth,
    tension_controlled_design_moment,
    tension_controlled_neutral_axis_depth,
    tension_steel_stress,
    transition_neutral_axis_estimate,
    ES_TIMES_ECU_MPA,
    MAX_STEEL_STRESS_MPA,
    PHI_COMPRESSION_CONTROLLED,
    PHI_TENSION_CONTROLLED,
    STRESS_BLOCK_INTENSITY,
    TENSION_CONTROLLED_STRESS_MPA,
};

pub use registry::{
    CodeReference,
    Equation,
    EquationCategory,
    EquationMetadata,
    Variable,
    ALL_EQUATIONS,
    generate_equations_markdown,
};
