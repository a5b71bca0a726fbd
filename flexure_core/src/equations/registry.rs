//! # Equation Registry
//!
//! Central registry of every code equation the flexure engines apply.
//! Each equation has metadata including its code section, formula, and
//! variable definitions.
//!
//! ## Usage
//!
//! ```rust
//! use flexure_core::equations::registry::Equation;
//! use flexure_core::settings::DesignCode;
//!
//! let meta = Equation::StressBlockFactor.metadata();
//! println!("Formula: {}", meta.formula_plain);
//! assert_eq!(meta.reference.citation(DesignCode::Nscp2015), "NSCP 2015 Section 422.2.2.4.3");
//! ```

use serde::{Deserialize, Serialize};

use crate::settings::DesignCode;

// ============================================================================
// Code References
// ============================================================================

/// Where an equation comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeReference {
    /// A section of ACI 318-14, rendered in the numbering of the selected code
    Code { section: &'static str },
    /// Fundamental mechanics (equilibrium, strain compatibility)
    Mechanics,
}

impl CodeReference {
    /// Format the reference for display
    pub fn citation(&self, code: DesignCode) -> String {
        match self {
            CodeReference::Code { section } => code.citation(section),
            CodeReference::Mechanics => "Fundamental Mechanics".to_string(),
        }
    }
}

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for organizing equations in the reference document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Factored moment from service moments
    LoadCombinations,
    /// β1 and φ
    CodeFactors,
    /// Maximum-steel and tension-controlled limits
    SectionLimits,
    /// Strain compatibility and equilibrium
    StrainCompatibility,
    /// Nominal and design moment capacity
    Capacity,
    /// Reinforcement sizing
    Reinforcement,
}

impl EquationCategory {
    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::LoadCombinations => "Load Combinations",
            EquationCategory::CodeFactors => "Code Factors",
            EquationCategory::SectionLimits => "Section Limits",
            EquationCategory::StrainCompatibility => "Strain Compatibility",
            EquationCategory::Capacity => "Moment Capacity",
            EquationCategory::Reinforcement => "Reinforcement Design",
        }
    }

    /// Sort order for the reference document (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::LoadCombinations => 1,
            EquationCategory::CodeFactors => 2,
            EquationCategory::SectionLimits => 3,
            EquationCategory::StrainCompatibility => 4,
            EquationCategory::Capacity => 5,
            EquationCategory::Reinforcement => 6,
        }
    }

    /// All categories in sort order
    pub fn all() -> Vec<EquationCategory> {
        use EquationCategory::*;
        let mut cats = vec![
            LoadCombinations,
            CodeFactors,
            SectionLimits,
            StrainCompatibility,
            Capacity,
            Reinforcement,
        ];
        cats.sort_by_key(|c| c.sort_order());
        cats
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Symbol (e.g., "c", "fs")
    pub symbol: &'static str,
    /// Description
    pub description: &'static str,
    /// Units (e.g., "mm", "MPa")
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for a code equation.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name
    pub name: &'static str,
    /// Brief description of what this equation calculates
    pub description: &'static str,
    /// The formula in plain text
    pub formula_plain: &'static str,
    /// Code/standard reference
    pub reference: CodeReference,
    /// Variable definitions
    pub variables: Vec<Variable>,
    /// Category for grouping
    pub category: EquationCategory,
    /// Function implementing the equation
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All equations used by the flexure engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    /// Mu = max(1.4D, 1.2D + 1.6L)
    FactoredMoment,
    /// β1 piecewise in f'c
    StressBlockFactor,
    /// φ from extreme tension steel stress
    StrengthReductionFactor,
    /// φ at εt = 0.004
    BalancedStrengthReductionFactor,
    /// Mn,max at c = 3d/7
    MaximumNominalMoment,
    /// φMtn at c = 3d/8
    TensionControlledMoment,
    /// As,max = 0.85 f'c a_max b / fy
    MaximumTensionSteel,
    /// a = T / (0.85 f'c b), c = a / β1
    StressBlockDepth,
    /// fs = 600 (d - c) / c
    TensionSteelStress,
    /// fs' = 600 (c - d') / c
    CompressionSteelStress,
    /// 0.85 f'c β1 b c² + B c - C = 0
    NeutralAxisQuadratic,
    /// Mn = As fy (d - a/2)
    NominalMomentSingly,
    /// Mn = T1 (d - a/2) + As' f's (d - d')
    NominalMomentDoubly,
    /// φMn
    DesignMoment,
    /// Rn = Mu / (φ b d²)
    ResistanceCoefficient,
    /// ρ from Rn
    ReinforcementRatio,
    /// c from φ(c) Mn(c) = Mu in the transition zone
    TransitionNeutralAxis,
    /// As2 = (Mu - φMn,max) / (φ fy (d - d'))
    CompressionSteelDemand,
}

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::FactoredMoment => EquationMetadata {
                name: "Factored Moment",
                description: "Ultimate moment from the governing strength load combination",
                formula_plain: "Mu = max(1.4 MD, 1.2 MD + 1.6 ML)",
                reference: CodeReference::Code { section: "5.3.1" },
                variables: vec![
                    Variable::new("Mu", "Ultimate moment", "kN·m"),
                    Variable::new("MD", "Service dead-load moment", "kN·m"),
                    Variable::new("ML", "Service live-load moment", "kN·m"),
                ],
                category: EquationCategory::LoadCombinations,
                source_function: "loads::MomentDemand::resolve",
            },

            Equation::StressBlockFactor => EquationMetadata {
                name: "Stress Block Factor",
                description: "Ratio of stress-block depth to neutral-axis depth",
                formula_plain: "β1 = 0.85 (f'c ≤ 28); 0.85 - 0.05(f'c - 28)/7 (28 < f'c < 55); 0.65 (f'c ≥ 55)",
                reference: CodeReference::Code { section: "22.2.2.4.3" },
                variables: vec![
                    Variable::new("β1", "Stress-block depth factor", "-"),
                    Variable::new("f'c", "Concrete compressive strength", "MPa"),
                ],
                category: EquationCategory::CodeFactors,
                source_function: "equations::flexure::beta1",
            },

            Equation::StrengthReductionFactor => EquationMetadata {
                name: "Strength Reduction Factor",
                description: "φ interpolated on the net tensile strain of the extreme tension steel",
                formula_plain: "φ = 0.90 (fs ≥ 1000); 0.65 + 0.25(fs - fy)/(1000 - fy) (fy ≤ fs < 1000); 0.65 (fs < fy)",
                reference: CodeReference::Code { section: "21.2.2" },
                variables: vec![
                    Variable::new("φ", "Strength reduction factor", "-"),
                    Variable::new("fs", "Strain-compatible tension steel stress Es·εt", "MPa"),
                    Variable::new("fy", "Steel yield strength", "MPa"),
                ],
                category: EquationCategory::CodeFactors,
                source_function: "equations::flexure::strength_reduction_factor",
            },

            Equation::BalancedStrengthReductionFactor => EquationMetadata {
                name: "Strength Reduction Factor at Maximum Steel",
                description: "φ at the beam maximum-steel strain limit εt = 0.004",
                formula_plain: "φ = 0.65 + 0.25(800 - fy)/(1000 - fy)",
                reference: CodeReference::Code { section: "21.2.2" },
                variables: vec![Variable::new("fy", "Steel yield strength", "MPa")],
                category: EquationCategory::CodeFactors,
                source_function: "equations::flexure::balanced_phi",
            },

            Equation::MaximumNominalMoment => EquationMetadata {
                name: "Maximum Nominal Moment",
                description: "Nominal moment of a singly reinforced section at c = 3d/7",
                formula_plain: "Mn,max = (51/140) β1 f'c b d² (1 - (3/14) β1)",
                reference: CodeReference::Code { section: "9.3.3.1" },
                variables: vec![
                    Variable::new("b", "Section width", "mm"),
                    Variable::new("d", "Effective depth", "mm"),
                ],
                category: EquationCategory::SectionLimits,
                source_function: "equations::flexure::max_nominal_moment",
            },

            Equation::TensionControlledMoment => EquationMetadata {
                name: "Tension-Controlled Design Moment",
                description: "Design moment of a singly reinforced section at c = 3d/8 with φ = 0.90",
                formula_plain: "φMtn = (459/1600) β1 f'c b d² (1 - (3/16) β1)",
                reference: CodeReference::Code { section: "21.2.2" },
                variables: vec![
                    Variable::new("b", "Section width", "mm"),
                    Variable::new("d", "Effective depth", "mm"),
                ],
                category: EquationCategory::SectionLimits,
                source_function: "equations::flexure::tension_controlled_design_moment",
            },

            Equation::MaximumTensionSteel => EquationMetadata {
                name: "Maximum Tension Steel",
                description: "Tension steel that puts the neutral axis at c = 3d/7",
                formula_plain: "As,max = 0.85 f'c β1 (3d/7) b / min(fy, 800)",
                reference: CodeReference::Code { section: "9.3.3.1" },
                variables: vec![Variable::new("As,max", "Maximum tension steel area", "mm²")],
                category: EquationCategory::SectionLimits,
                source_function: "equations::flexure::max_tension_steel",
            },

            Equation::StressBlockDepth => EquationMetadata {
                name: "Stress Block Depth",
                description: "Depth of the equivalent stress block balancing the steel force",
                formula_plain: "a = T / (0.85 f'c b), c = a / β1",
                reference: CodeReference::Code { section: "22.2.2.4.1" },
                variables: vec![
                    Variable::new("a", "Stress-block depth", "mm"),
                    Variable::new("c", "Neutral-axis depth", "mm"),
                    Variable::new("T", "Net tension force", "N"),
                ],
                category: EquationCategory::StrainCompatibility,
                source_function: "equations::flexure::stress_block_depth",
            },

            Equation::TensionSteelStress => EquationMetadata {
                name: "Tension Steel Stress",
                description: "Strain-compatible stress in the tension steel",
                formula_plain: "fs = 600 (d - c) / c",
                reference: CodeReference::Mechanics,
                variables: vec![Variable::new("fs", "Tension steel stress", "MPa")],
                category: EquationCategory::StrainCompatibility,
                source_function: "equations::flexure::tension_steel_stress",
            },

            Equation::CompressionSteelStress => EquationMetadata {
                name: "Compression Steel Stress",
                description: "Strain-compatible stress in the compression steel",
                formula_plain: "fs' = 600 (c - d') / c",
                reference: CodeReference::Mechanics,
                variables: vec![Variable::new("fs'", "Compression steel stress", "MPa")],
                category: EquationCategory::StrainCompatibility,
                source_function: "equations::flexure::compression_steel_stress",
            },

            Equation::NeutralAxisQuadratic => EquationMetadata {
                name: "Neutral Axis from Equilibrium",
                description: "Force equilibrium with elastic steel, solved for c",
                formula_plain: "0.85 f'c β1 b c² + B c - C = 0, c = (-B + √(B² + 4AC)) / 2A",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("B", "Σ(600 As | -As fy) + Σ(600 As' | As' fy)", "N"),
                    Variable::new("C", "600 As d (elastic tension) + 600 As' d' (elastic compression)", "N·mm"),
                ],
                category: EquationCategory::StrainCompatibility,
                source_function: "calculations::stress_state::NeutralAxisQuadratic::solve",
            },

            Equation::NominalMomentSingly => EquationMetadata {
                name: "Nominal Moment (Singly Reinforced)",
                description: "Nominal moment of a section with tension steel only",
                formula_plain: "Mn = As fs (d - a/2), fs ≤ fy",
                reference: CodeReference::Code { section: "22.3" },
                variables: vec![Variable::new("Mn", "Nominal moment", "kN·m")],
                category: EquationCategory::Capacity,
                source_function: "calculations::analysis::analyze",
            },

            Equation::NominalMomentDoubly => EquationMetadata {
                name: "Nominal Moment (Doubly Reinforced)",
                description: "Concrete couple plus compression steel couple",
                formula_plain: "Mn = T1 (d - a/2) + As' f's (d - d')",
                reference: CodeReference::Code { section: "22.3" },
                variables: vec![
                    Variable::new("T1", "Tension force balanced by concrete", "N"),
                    Variable::new("f's", "Compression steel stress, ≤ fy", "MPa"),
                ],
                category: EquationCategory::Capacity,
                source_function: "calculations::analysis::analyze",
            },

            Equation::DesignMoment => EquationMetadata {
                name: "Design Moment Strength",
                description: "Nominal moment reduced by φ",
                formula_plain: "φMn = φ · Mn",
                reference: CodeReference::Code { section: "21.2.1" },
                variables: vec![Variable::new("φMn", "Design moment strength", "kN·m")],
                category: EquationCategory::Capacity,
                source_function: "calculations::analysis::analyze",
            },

            Equation::ResistanceCoefficient => EquationMetadata {
                name: "Flexural Resistance Coefficient",
                description: "Required strength per unit b·d²",
                formula_plain: "Rn = Mu / (φ b d²)",
                reference: CodeReference::Mechanics,
                variables: vec![Variable::new("Rn", "Resistance coefficient", "MPa")],
                category: EquationCategory::Reinforcement,
                source_function: "equations::flexure::resistance_coefficient",
            },

            Equation::ReinforcementRatio => EquationMetadata {
                name: "Required Reinforcement Ratio",
                description: "Tension steel ratio delivering Rn with yielding steel",
                formula_plain: "ρ = (0.85 f'c / fy)(1 - √(1 - 2Rn / (0.85 f'c))), As = ρ b d",
                reference: CodeReference::Mechanics,
                variables: vec![Variable::new("ρ", "Tension reinforcement ratio", "-")],
                category: EquationCategory::Reinforcement,
                source_function: "equations::flexure::reinforcement_ratio",
            },

            Equation::TransitionNeutralAxis => EquationMetadata {
                name: "Transition-Zone Neutral Axis",
                description: "Neutral axis between 3d/8 and 3d/7 where φ(c)·Mn(c) equals Mu",
                formula_plain: "k = Mu / (0.85 f'c b d²), c0 = d(1 - √(1 - 2k)); refine φ(c) Mn(c) = Mu",
                reference: CodeReference::Code { section: "21.2.2" },
                variables: vec![Variable::new("c0", "Starting estimate of c", "mm")],
                category: EquationCategory::Reinforcement,
                source_function: "calculations::design::design",
            },

            Equation::CompressionSteelDemand => EquationMetadata {
                name: "Compression Steel Demand",
                description: "Steel couple carrying the moment in excess of φMn,max",
                formula_plain: "As2 = (Mu - φMn,max) / (φ fs (d - d')), As' = As2 fs / min(f's, fy), fs = min(fy, 800)",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("As2", "Tension steel paired with compression steel", "mm²"),
                    Variable::new("As'", "Compression steel area", "mm²"),
                ],
                category: EquationCategory::Reinforcement,
                source_function: "calculations::design::design",
            },
        }
    }

    /// Get all equations in a given category
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .filter(|eq| eq.metadata().category == category)
            .copied()
            .collect()
    }
}

/// All equations in the registry (for iteration)
pub static ALL_EQUATIONS: &[Equation] = &[
    Equation::FactoredMoment,
    Equation::StressBlockFactor,
    Equation::StrengthReductionFactor,
    Equation::BalancedStrengthReductionFactor,
    Equation::MaximumNominalMoment,
    Equation::TensionControlledMoment,
    Equation::MaximumTensionSteel,
    Equation::StressBlockDepth,
    Equation::TensionSteelStress,
    Equation::CompressionSteelStress,
    Equation::NeutralAxisQuadratic,
    Equation::NominalMomentSingly,
    Equation::NominalMomentDoubly,
    Equation::DesignMoment,
    Equation::ResistanceCoefficient,
    Equation::ReinforcementRatio,
    Equation::TransitionNeutralAxis,
    Equation::CompressionSteelDemand,
];

// ============================================================================
// Markdown Generation for EQUATIONS.md
// ============================================================================

/// Generate a complete EQUATIONS.md document for the selected code.
///
/// # Example
///
/// ```rust
/// use flexure_core::equations::registry::generate_equations_markdown;
/// use flexure_core::settings::DesignCode;
///
/// let markdown = generate_equations_markdown(DesignCode::Aci318_14);
/// assert!(markdown.contains("Flexure Equations Reference"));
/// assert!(markdown.contains("Strain Compatibility"));
/// ```
pub fn generate_equations_markdown(code: DesignCode) -> String {
    let mut output = String::with_capacity(16_000);

    output.push_str(&format!(
        r#"# Flexure Equations Reference ({})

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-equations`

Units: f'c, fy, fs in MPa; b, d, d', a, c in mm; areas in mm²; moments in kN·m.

---

"#,
        code.display_name()
    ));

    let categories = EquationCategory::all();

    for category in &categories {
        let equations = Equation::in_category(*category);
        if equations.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for equation in equations {
            let meta = equation.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!("| {} | {} | {} |\n", var.symbol, var.description, var.units));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation(code)));
            output.push_str(&format!("**Source:** `{}`\n\n", meta.source_function));
            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Equations:** {}\n- **Categories:** {}\n",
        ALL_EQUATIONS.len(),
        categories.len()
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_equations_have_metadata() {
        assert_eq!(ALL_EQUATIONS.len(), 18);

        for eq in ALL_EQUATIONS {
            let meta = eq.metadata();
            assert!(!meta.name.is_empty(), "Equation {:?} has no name", eq);
            assert!(!meta.formula_plain.is_empty(), "Equation {:?} has no formula", eq);
            assert!(!meta.source_function.is_empty(), "Equation {:?} has no source", eq);
        }
    }

    #[test]
    fn test_every_category_populated() {
        for category in EquationCategory::all() {
            assert!(!Equation::in_category(category).is_empty(), "{:?} is empty", category);
        }
    }

    #[test]
    fn test_code_reference_citation() {
        let reference = Equation::StrengthReductionFactor.metadata().reference;
        assert_eq!(reference.citation(DesignCode::Aci318_14), "ACI 318-14 Section 21.2.2");
        assert_eq!(reference.citation(DesignCode::Nscp2015), "NSCP 2015 Section 421.2.2");
        assert_eq!(CodeReference::Mechanics.citation(DesignCode::Nscp2015), "Fundamental Mechanics");
    }

    #[test]
    fn test_generate_equations_markdown() {
        let markdown = generate_equations_markdown(DesignCode::Nscp2015);
        assert!(markdown.contains("NSCP 2015"));
        assert!(markdown.contains("### Stress Block Factor"));
        assert!(markdown.contains("NSCP 2015 Section 422.2.2.4.3"));
        assert!(markdown.contains("**Total Equations:** 18"));
    }
}
