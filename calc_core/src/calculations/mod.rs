//! # Diagnostic Calculations
//!
//! Every calculator follows the same pattern:
//!
//! - a raw `*Form` holding user input exactly as typed
//! - a validated `*Inputs` type the engine accepts
//! - a `*Result` (JSON-serializable)
//! - `calculate(inputs) -> *Result`, a pure total function
//!
//! The [`Calculator`] trait captures that shape so shells can drive any
//! calculator generically.
//!
//! ## Available Calculations
//!
//! - [`phase_rotation`] - Phase sequence from meter, motor or voltage readings

pub mod phase_rotation;

pub use phase_rotation::{DiagnosticResult, MethodInputs, TestMethod};

use crate::errors::CalcResult;
use crate::validation::{self, PhaseRotationForm};

/// Contract shared by the calculator family.
pub trait Calculator {
    /// Raw form state
    type Form;
    /// Validated engine input
    type Inputs;
    /// Engine output
    type Output;

    /// Short name used in logs and headings
    const NAME: &'static str;

    /// Validate a form, explaining what is missing when it is not ready.
    fn parse(form: &Self::Form) -> CalcResult<Self::Inputs>;

    /// Pure calculation. Total on validated input.
    fn calculate(inputs: &Self::Inputs) -> Self::Output;

    /// Whether the Calculate control should be enabled
    fn can_calculate(form: &Self::Form) -> bool {
        Self::parse(form).is_ok()
    }

    /// Validate then calculate in one step
    fn run(form: &Self::Form) -> CalcResult<Self::Output> {
        Self::parse(form).map(|inputs| Self::calculate(&inputs))
    }
}

/// Phase rotation / voltage balance analyser
pub struct PhaseRotationCalculator;

impl Calculator for PhaseRotationCalculator {
    type Form = PhaseRotationForm;
    type Inputs = MethodInputs;
    type Output = DiagnosticResult;

    const NAME: &'static str = "Phase Rotation Analysis";

    fn parse(form: &PhaseRotationForm) -> CalcResult<MethodInputs> {
        validation::parse(form)
    }

    fn calculate(inputs: &MethodInputs) -> DiagnosticResult {
        phase_rotation::calculate(inputs)
    }
}
