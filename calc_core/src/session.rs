//! # Diagnostic Session
//!
//! The mutable state a calculator screen owns between user events: the raw
//! form and the last result. Events arrive one at a time, the way a GUI
//! update loop delivers messages, and each one leaves the session in a
//! consistent state.
//!
//! ## Lifecycle
//!
//! - Selecting a method clears every input and the last result.
//! - Editing an input keeps the last result on screen until the next Calculate.
//! - Calculate replaces the result; a form that is not ready leaves it alone.
//! - Reset clears everything.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::phase_rotation::TestMethod;
//! use calc_core::session::{DiagnosticSession, SessionEvent};
//!
//! let mut session = DiagnosticSession::new();
//! session.apply(SessionEvent::MethodSelected(TestMethod::MotorBehaviour));
//! session.apply(SessionEvent::DirectionChanged("clockwise".into()));
//! assert!(session.can_calculate());
//!
//! let result = session.calculate().unwrap();
//! assert!(result.is_correct);
//! ```

use tracing::debug;

use crate::calculations::phase_rotation::{self, DiagnosticResult, TestMethod};
use crate::errors::CalcResult;
use crate::report;
use crate::validation::{self, PhaseRotationForm};

/// Which voltage box an edit targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoltageField {
    L1L2,
    L2L3,
    L3L1,
}

/// User events a shell forwards to the session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    MethodSelected(TestMethod),
    ReadingChanged(String),
    DirectionChanged(String),
    VoltageChanged(VoltageField, String),
    CalculatePressed,
    ResetPressed,
}

/// Form plus last result for one calculator screen.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticSession {
    form: PhaseRotationForm,
    result: Option<DiagnosticResult>,
}

impl DiagnosticSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &PhaseRotationForm {
        &self.form
    }

    pub fn method(&self) -> Option<TestMethod> {
        self.form.method
    }

    pub fn result(&self) -> Option<&DiagnosticResult> {
        self.result.as_ref()
    }

    /// Dispatch a single event. A Calculate on an incomplete form is logged
    /// and leaves the previous result in place; use
    /// [`DiagnosticSession::calculate`] to get the error itself.
    pub fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::MethodSelected(method) => self.select_method(method),
            SessionEvent::ReadingChanged(value) => self.form.reading = value,
            SessionEvent::DirectionChanged(value) => self.form.direction = value,
            SessionEvent::VoltageChanged(field, value) => self.set_voltage(field, value),
            SessionEvent::CalculatePressed => {
                if let Err(e) = self.calculate() {
                    debug!(error = %e, code = e.error_code(), "calculate pressed on incomplete form");
                }
            }
            SessionEvent::ResetPressed => self.reset(),
        }
    }

    /// Switch method, discarding inputs and any previous result.
    pub fn select_method(&mut self, method: TestMethod) {
        debug!(method = method.code(), "method selected, clearing session");
        self.form = PhaseRotationForm::for_method(method);
        self.result = None;
    }

    pub fn set_reading(&mut self, value: impl Into<String>) {
        self.form.reading = value.into();
    }

    pub fn set_direction(&mut self, value: impl Into<String>) {
        self.form.direction = value.into();
    }

    pub fn set_voltage(&mut self, field: VoltageField, value: impl Into<String>) {
        let slot = match field {
            VoltageField::L1L2 => &mut self.form.l1l2,
            VoltageField::L2L3 => &mut self.form.l2l3,
            VoltageField::L3L1 => &mut self.form.l3l1,
        };
        *slot = value.into();
    }

    pub fn can_calculate(&self) -> bool {
        validation::can_calculate(&self.form)
    }

    /// Validate and run the engine, replacing the stored result.
    pub fn calculate(&mut self) -> CalcResult<&DiagnosticResult> {
        let inputs = validation::parse(&self.form)?;
        Ok(&*self.result.insert(phase_rotation::calculate(&inputs)))
    }

    pub fn reset(&mut self) {
        self.form = PhaseRotationForm::default();
        self.result = None;
    }

    /// Clipboard text for the current result, if there is one
    pub fn clipboard_text(&self) -> Option<String> {
        self.result.as_ref().map(report::clipboard_summary)
    }
}
