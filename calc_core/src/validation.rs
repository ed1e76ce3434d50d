//! # Input Validation
//!
//! Gatekeeper between what the user has typed and what the engine accepts.
//! [`PhaseRotationForm`] holds raw form state exactly as entered; [`parse`]
//! turns it into [`MethodInputs`] or explains what is missing.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::phase_rotation::TestMethod;
//! use calc_core::validation::{can_calculate, PhaseRotationForm};
//!
//! let mut form = PhaseRotationForm::for_method(TestMethod::VoltageMeasurement);
//! form.l1l2 = "400".into();
//! form.l2l3 = "400".into();
//! assert!(!can_calculate(&form));
//!
//! form.l3l1 = "408".into();
//! assert!(can_calculate(&form));
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::phase_rotation::{
    LineVoltage, LineVoltages, MeterReading, MethodInputs, RotationDirection, TestMethod,
};
use crate::errors::{CalcError, CalcResult};

/// Raw form state. Empty strings mean "not chosen / not entered".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseRotationForm {
    /// Selected method, if any
    pub method: Option<TestMethod>,
    /// Meter reading option value (e.g., "l1-l2-l3")
    #[serde(default)]
    pub reading: String,
    /// Motor direction option value (e.g., "clockwise")
    #[serde(default)]
    pub direction: String,
    #[serde(default)]
    pub l1l2: String,
    #[serde(default)]
    pub l2l3: String,
    #[serde(default)]
    pub l3l1: String,
}

impl PhaseRotationForm {
    /// Empty form with a method already selected
    pub fn for_method(method: TestMethod) -> Self {
        PhaseRotationForm {
            method: Some(method),
            ..Default::default()
        }
    }
}

/// Whether the Calculate control should be enabled.
pub fn can_calculate(form: &PhaseRotationForm) -> bool {
    parse(form).is_ok()
}

/// Convert the form into engine input.
///
/// Only the fields relevant to the selected method are inspected; stale
/// values left in other fields are ignored.
pub fn parse(form: &PhaseRotationForm) -> CalcResult<MethodInputs> {
    let method = form.method.ok_or_else(|| CalcError::missing_field("method"))?;

    match method {
        TestMethod::PhaseRotationMeter => {
            let reading = parse_choice("reading", &form.reading, MeterReading::from_code)?;
            Ok(MethodInputs::PhaseRotationMeter { reading })
        }
        TestMethod::MotorBehaviour => {
            let direction = parse_choice("direction", &form.direction, RotationDirection::from_code)?;
            Ok(MethodInputs::MotorBehaviour { direction })
        }
        TestMethod::VoltageMeasurement => Ok(MethodInputs::VoltageMeasurement(LineVoltages {
            l1l2: parse_voltage("l1l2", &form.l1l2)?,
            l2l3: parse_voltage("l2l3", &form.l2l3)?,
            l3l1: parse_voltage("l3l1", &form.l3l1)?,
        })),
    }
}

fn parse_choice<T>(field: &str, raw: &str, from_code: fn(&str) -> Option<T>) -> CalcResult<T> {
    if raw.is_empty() {
        return Err(CalcError::missing_field(field));
    }
    from_code(raw).ok_or_else(|| CalcError::invalid_input(field, raw, "Not a recognised option"))
}

/// Parse one voltage field: trimmed, finite, in range.
pub fn parse_voltage(field: &str, raw: &str) -> CalcResult<LineVoltage> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CalcError::missing_field(field));
    }
    let volts: f64 = trimmed
        .parse()
        .map_err(|_| CalcError::invalid_input(field, trimmed, "Not a number"))?;
    LineVoltage::new(field, volts)
}
