//! # Solution Steps
//!
//! Every engine step appends one human-readable derivation line. The lines are
//! returned in order with the result so a UI can show the worked solution,
//! and each line remembers which registry equation produced it.
//!
//! ```rust
//! use flexure_core::equations::Equation;
//! use flexure_core::narration::Narration;
//! use flexure_core::settings::GlobalSettings;
//!
//! let mut narration = Narration::new(&GlobalSettings::default());
//! narration.record(Equation::StressBlockFactor, format!("β1 = {}", Narration::factor(0.85)));
//! narration.note("Section is singly reinforced");
//!
//! let steps = narration.into_steps();
//! assert_eq!(steps[0].text, "β1 = 0.8500");
//! assert_eq!(steps[0].reference.as_deref(), Some("ACI 318-14 Section 22.2.2.4.3"));
//! assert!(steps[1].equation.is_none());
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::equations::Equation;
use crate::settings::{DesignCode, GlobalSettings};

/// One line of the worked solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionStep {
    /// Derivation text shown to the user
    pub text: String,
    /// Equation applied in this step, if any
    pub equation: Option<Equation>,
    /// Citation of that equation in the selected code
    pub reference: Option<String>,
}

/// Collector for solution steps during one calculation.
///
/// Pass this to the classifier and solver so they can narrate their branch
/// decisions in the order they are made.
#[derive(Debug, Clone)]
pub struct Narration {
    steps: Vec<SolutionStep>,
    code: DesignCode,
    decimals: usize,
}

impl Narration {
    pub fn new(settings: &GlobalSettings) -> Self {
        Narration {
            steps: Vec::new(),
            code: settings.code,
            decimals: settings.display_decimals,
        }
    }

    /// Record a step produced by a registry equation
    pub fn record(&mut self, equation: Equation, text: impl Into<String>) {
        let reference = equation.metadata().reference.citation(self.code);
        self.steps.push(SolutionStep {
            text: text.into(),
            equation: Some(equation),
            reference: Some(reference),
        });
    }

    /// Record a decision or remark that applies no equation
    pub fn note(&mut self, text: impl Into<String>) {
        self.steps.push(SolutionStep {
            text: text.into(),
            equation: None,
            reference: None,
        });
    }

    /// Format a length, area, stress or moment at the configured precision
    pub fn num(&self, value: f64) -> String {
        format!("{:.*}", self.decimals, value)
    }

    /// Format a dimensionless factor (β1, φ, ρ) at four decimals
    pub fn factor(value: f64) -> String {
        format!("{:.4}", value)
    }

    /// Steps recorded so far
    pub fn steps(&self) -> &[SolutionStep] {
        &self.steps
    }

    /// Unique equations used, in first-use order
    pub fn equations_used(&self) -> Vec<Equation> {
        let mut seen = HashSet::new();
        self.steps
            .iter()
            .filter_map(|step| step.equation)
            .filter(|eq| seen.insert(*eq))
            .collect()
    }

    /// Finish and hand the steps to a result
    pub fn into_steps(self) -> Vec<SolutionStep> {
        self.steps
    }
}
