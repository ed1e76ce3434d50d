//! # calc_core - Electrical Diagnostic Calculation Engine
//!
//! `calc_core` is the computational heart of Elec-Mate's calculators. It
//! decides whether a three-phase supply has the standard UK phase sequence
//! from a rotation meter reading, an observed motor direction, or three
//! line-to-line voltages, and says how far that conclusion can be trusted.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take validated input and return results
//! - **Valid by construction**: the engine only accepts already-parsed input,
//!   so it has no failure mode of its own
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types explain why a form is not ready
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::calculations::{Calculator, PhaseRotationCalculator, TestMethod};
//! use calc_core::report::clipboard_summary;
//! use calc_core::validation::PhaseRotationForm;
//!
//! let mut form = PhaseRotationForm::for_method(TestMethod::VoltageMeasurement);
//! form.l1l2 = "400".into();
//! form.l2l3 = "400".into();
//! form.l3l1 = "408".into();
//!
//! let result = PhaseRotationCalculator::run(&form).unwrap();
//! assert!(clipboard_summary(&result).contains("Balance: Excellent"));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Calculator contract and the phase rotation engine
//! - [`validation`] - Raw form parsing and Calculate gating
//! - [`report`] - Clipboard and export text
//! - [`diagram`] - Phasor diagram geometry
//! - [`session`] - Per-screen form and result state
//! - [`schedule`] - Schedule of tests records
//! - [`procedure`] - On-site test procedure
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - Schedule files with atomic saves and locking

pub mod calculations;
pub mod diagram;
pub mod errors;
#[cfg(not(target_arch = "wasm32"))]
pub mod file_io;
pub mod guidance;
pub mod procedure;
pub mod report;
pub mod schedule;
pub mod session;
pub mod units;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use calculations::phase_rotation::{calculate, DiagnosticResult, MethodInputs, TestMethod};
pub use errors::{CalcError, CalcResult};
#[cfg(not(target_arch = "wasm32"))]
pub use file_io::{load_schedule, save_schedule, FileLock};
pub use schedule::{ScheduleSettings, TestSchedule};
pub use session::DiagnosticSession;
pub use validation::{can_calculate, PhaseRotationForm};
