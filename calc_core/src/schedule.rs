//! # Schedule of Tests
//!
//! A `TestSchedule` records the phase rotation outcome for each circuit on a
//! job, the way it is entered on a Minor Works or EIC schedule of test
//! results. Schedules serialize to `.ems` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! TestSchedule
//! ├── meta: ScheduleMetadata (version, electrician, job info, timestamps)
//! ├── settings: ScheduleSettings (standard, nominal voltage, regulation)
//! └── entries: HashMap<Uuid, CircuitTestEntry>
//! ```
//!
//! ## Example
//!
//! ```rust
//! use calc_core::schedule::{CircuitTestEntry, PhaseRotationOutcome, SupplyPhases, TestSchedule};
//!
//! let mut schedule = TestSchedule::new("Sam Spark", "J-1042", "Unit 4 Workshop");
//! let id = schedule.add_entry(CircuitTestEntry::new("DB2/3 Compressor", SupplyPhases::Three));
//! assert_eq!(schedule.get_entry(&id).unwrap().outcome, PhaseRotationOutcome::Pending);
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::phase_rotation::{ConfidenceLevel, DiagnosticResult, TestMethod};

/// Current schema version for .ems files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Supply arrangement of the circuit under test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupplyPhases {
    #[serde(rename = "1")]
    Single,
    #[serde(rename = "3")]
    Three,
}

/// Phase rotation column of the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PhaseRotationOutcome {
    /// Not yet tested
    #[default]
    #[serde(rename = "")]
    Pending,
    #[serde(rename = "correct")]
    Correct,
    #[serde(rename = "incorrect")]
    Incorrect,
    /// Single-phase circuit
    #[serde(rename = "na")]
    NotApplicable,
}

impl PhaseRotationOutcome {
    /// Keep the outcome consistent with the supply.
    ///
    /// Single-phase circuits are always N/A. A three-phase circuit that was
    /// marked N/A goes back to pending; any real result is kept.
    pub fn for_supply(phases: SupplyPhases, current: PhaseRotationOutcome) -> Self {
        match (phases, current) {
            (SupplyPhases::Single, _) => PhaseRotationOutcome::NotApplicable,
            (SupplyPhases::Three, PhaseRotationOutcome::NotApplicable) => PhaseRotationOutcome::Pending,
            (SupplyPhases::Three, other) => other,
        }
    }

    /// Outcome a diagnostic result supports.
    ///
    /// A Low-confidence result never proves the sequence, so the voltage
    /// method leaves the test pending.
    pub fn from_result(result: &DiagnosticResult) -> Self {
        match (result.method, result.confidence_level) {
            (TestMethod::VoltageMeasurement, _) | (_, ConfidenceLevel::Low) => PhaseRotationOutcome::Pending,
            _ if result.is_correct => PhaseRotationOutcome::Correct,
            _ => PhaseRotationOutcome::Incorrect,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PhaseRotationOutcome::Pending => "Not tested",
            PhaseRotationOutcome::Correct => "✓ Correct (L1-L2-L3)",
            PhaseRotationOutcome::Incorrect => "✗ Incorrect",
            PhaseRotationOutcome::NotApplicable => "N/A (Single Phase)",
        }
    }
}

/// One circuit row on the schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitTestEntry {
    /// Circuit reference (e.g., "DB1/7", "Lift motor")
    pub circuit_ref: String,
    pub supply_phases: SupplyPhases,
    pub outcome: PhaseRotationOutcome,
    /// Result the outcome was derived from. Held for the current session
    /// only; schedule files carry the outcome and timestamp.
    #[serde(skip)]
    pub diagnostic: Option<DiagnosticResult>,
    pub recorded_at: Option<DateTime<Utc>>,
}

impl CircuitTestEntry {
    pub fn new(circuit_ref: impl Into<String>, supply_phases: SupplyPhases) -> Self {
        CircuitTestEntry {
            circuit_ref: circuit_ref.into(),
            supply_phases,
            outcome: PhaseRotationOutcome::for_supply(supply_phases, PhaseRotationOutcome::Pending),
            diagnostic: None,
            recorded_at: None,
        }
    }

    /// Change the supply, re-deriving the outcome column.
    pub fn set_supply_phases(&mut self, phases: SupplyPhases) {
        self.supply_phases = phases;
        self.outcome = PhaseRotationOutcome::for_supply(phases, self.outcome);
        if phases == SupplyPhases::Single {
            self.diagnostic = None;
        }
    }

    /// Attach a diagnostic result and derive the outcome from it.
    ///
    /// Ignored for single-phase circuits, which stay N/A.
    pub fn record(&mut self, result: DiagnosticResult) {
        if self.supply_phases == SupplyPhases::Single {
            return;
        }
        self.outcome = PhaseRotationOutcome::from_result(&result);
        self.diagnostic = Some(result);
        self.recorded_at = Some(Utc::now());
    }
}

/// Root schedule container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSchedule {
    pub meta: ScheduleMetadata,
    pub settings: ScheduleSettings,
    /// Circuit rows keyed by UUID, so references survive reordering
    pub entries: HashMap<Uuid, CircuitTestEntry>,
}

impl TestSchedule {
    pub fn new(electrician: impl Into<String>, job_ref: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        TestSchedule {
            meta: ScheduleMetadata {
                version: SCHEMA_VERSION.to_string(),
                electrician: electrician.into(),
                job_ref: job_ref.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            settings: ScheduleSettings::default(),
            entries: HashMap::new(),
        }
    }

    /// Add a circuit row. Returns the UUID assigned to it.
    pub fn add_entry(&mut self, entry: CircuitTestEntry) -> Uuid {
        let id = Uuid::new_v4();
        self.entries.insert(id, entry);
        self.touch();
        id
    }

    pub fn remove_entry(&mut self, id: &Uuid) -> Option<CircuitTestEntry> {
        let entry = self.entries.remove(id);
        if entry.is_some() {
            self.touch();
        }
        entry
    }

    pub fn get_entry(&self, id: &Uuid) -> Option<&CircuitTestEntry> {
        self.entries.get(id)
    }

    /// Record a diagnostic against a circuit. Returns false if the id is unknown.
    pub fn record_result(&mut self, id: &Uuid, result: DiagnosticResult) -> bool {
        match self.entries.get_mut(id) {
            Some(entry) => {
                entry.record(result);
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Three-phase circuits still awaiting a conclusive test
    pub fn pending_circuits(&self) -> Vec<&CircuitTestEntry> {
        let mut pending: Vec<_> = self
            .entries
            .values()
            .filter(|e| e.outcome == PhaseRotationOutcome::Pending)
            .collect();
        pending.sort_by(|a, b| a.circuit_ref.cmp(&b.circuit_ref));
        pending
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

impl Default for TestSchedule {
    fn default() -> Self {
        TestSchedule::new("", "", "")
    }
}

/// Schedule metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,
    pub electrician: String,
    /// Job reference
    pub job_ref: String,
    pub client: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// Schedule-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleSettings {
    /// Wiring regulations edition
    pub standard: String,
    /// Nominal line-to-line voltage of the installation (V)
    pub nominal_line_voltage: f64,
    /// Regulation requiring the phase sequence check
    pub regulation: String,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        ScheduleSettings {
            standard: "BS 7671:2018+A2:2022".to_string(),
            nominal_line_voltage: 400.0,
            regulation: "612.12".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::phase_rotation::{
        calculate, LineVoltage, LineVoltages, MeterReading, MethodInputs, RotationDirection,
    };

    fn meter(reading: MeterReading) -> DiagnosticResult {
        calculate(&MethodInputs::PhaseRotationMeter { reading })
    }

    #[test]
    fn test_outcome_wire_values() {
        assert_eq!(serde_json::to_string(&PhaseRotationOutcome::Pending).unwrap(), "\"\"");
        assert_eq!(serde_json::to_string(&PhaseRotationOutcome::NotApplicable).unwrap(), "\"na\"");
        assert_eq!(serde_json::to_string(&SupplyPhases::Three).unwrap(), "\"3\"");
    }

    #[test]
    fn test_single_phase_forces_na() {
        for current in [
            PhaseRotationOutcome::Pending,
            PhaseRotationOutcome::Correct,
            PhaseRotationOutcome::Incorrect,
        ] {
            assert_eq!(
                PhaseRotationOutcome::for_supply(SupplyPhases::Single, current),
                PhaseRotationOutcome::NotApplicable
            );
        }
    }

    #[test]
    fn test_three_phase_clears_na_only() {
        assert_eq!(
            PhaseRotationOutcome::for_supply(SupplyPhases::Three, PhaseRotationOutcome::NotApplicable),
            PhaseRotationOutcome::Pending
        );
        assert_eq!(
            PhaseRotationOutcome::for_supply(SupplyPhases::Three, PhaseRotationOutcome::Correct),
            PhaseRotationOutcome::Correct
        );
    }

    #[test]
    fn test_outcome_from_results() {
        assert_eq!(
            PhaseRotationOutcome::from_result(&meter(MeterReading::L1L2L3)),
            PhaseRotationOutcome::Correct
        );
        assert_eq!(
            PhaseRotationOutcome::from_result(&meter(MeterReading::L1L3L2)),
            PhaseRotationOutcome::Incorrect
        );
        let motor = calculate(&MethodInputs::MotorBehaviour {
            direction: RotationDirection::Anticlockwise,
        });
        assert_eq!(PhaseRotationOutcome::from_result(&motor), PhaseRotationOutcome::Incorrect);
    }

    #[test]
    fn test_balanced_voltages_do_not_prove_sequence() {
        let v = LineVoltage::new("v", 400.0).unwrap();
        let result = calculate(&MethodInputs::VoltageMeasurement(LineVoltages {
            l1l2: v,
            l2l3: v,
            l3l1: v,
        }));
        assert!(result.is_correct);
        assert_eq!(PhaseRotationOutcome::from_result(&result), PhaseRotationOutcome::Pending);
    }

    #[test]
    fn test_record_and_pending() {
        let mut schedule = TestSchedule::new("Sam", "J-1", "Client");
        let lift = schedule.add_entry(CircuitTestEntry::new("Lift motor", SupplyPhases::Three));
        let lights = schedule.add_entry(CircuitTestEntry::new("Lighting", SupplyPhases::Single));
        let comp = schedule.add_entry(CircuitTestEntry::new("Compressor", SupplyPhases::Three));

        assert_eq!(schedule.get_entry(&lights).unwrap().outcome, PhaseRotationOutcome::NotApplicable);
        assert_eq!(schedule.pending_circuits().len(), 2);

        assert!(schedule.record_result(&lift, meter(MeterReading::L1L2L3)));
        let entry = schedule.get_entry(&lift).unwrap();
        assert_eq!(entry.outcome, PhaseRotationOutcome::Correct);
        assert!(entry.recorded_at.is_some());

        let pending = schedule.pending_circuits();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].circuit_ref, "Compressor");

        assert!(schedule.remove_entry(&comp).is_some());
        assert!(!schedule.record_result(&comp, meter(MeterReading::L1L2L3)));
    }

    #[test]
    fn test_single_phase_ignores_record() {
        let mut entry = CircuitTestEntry::new("Sockets", SupplyPhases::Single);
        entry.record(meter(MeterReading::L1L3L2));
        assert_eq!(entry.outcome, PhaseRotationOutcome::NotApplicable);
        assert!(entry.diagnostic.is_none());
    }

    #[test]
    fn test_switching_to_single_phase_drops_diagnostic() {
        let mut entry = CircuitTestEntry::new("Heater", SupplyPhases::Three);
        entry.record(meter(MeterReading::L1L2L3));
        entry.set_supply_phases(SupplyPhases::Single);
        assert_eq!(entry.outcome, PhaseRotationOutcome::NotApplicable);
        assert!(entry.diagnostic.is_none());

        entry.set_supply_phases(SupplyPhases::Three);
        assert_eq!(entry.outcome, PhaseRotationOutcome::Pending);
    }

    #[test]
    fn test_schedule_serialization() {
        let mut schedule = TestSchedule::new("Jo Sparks", "J-2042", "Mill Lane Dairy");
        let id = schedule.add_entry(CircuitTestEntry::new("Pump", SupplyPhases::Three));
        schedule.record_result(&id, meter(MeterReading::L1L3L2));

        let json = serde_json::to_string_pretty(&schedule).unwrap();
        assert!(json.contains("BS 7671:2018+A2:2022"));
        assert!(json.contains("\"incorrect\""));

        assert!(!json.contains("diagnostic"));
        assert!(!json.contains("recommendationText"));

        let back: TestSchedule = serde_json::from_str(&json).unwrap();
        let original = schedule.get_entry(&id).unwrap();
        let reloaded = back.get_entry(&id).unwrap();
        assert_eq!(reloaded.outcome, PhaseRotationOutcome::Incorrect);
        assert_eq!(reloaded.recorded_at, original.recorded_at);
        assert!(original.diagnostic.is_some());
        assert!(reloaded.diagnostic.is_none());
    }

    #[test]
    fn test_settings_defaults_fill_missing_fields() {
        let settings: ScheduleSettings = serde_json::from_str(r#"{"nominal_line_voltage": 415.0}"#).unwrap();
        assert_eq!(settings.nominal_line_voltage, 415.0);
        assert_eq!(settings.regulation, "612.12");
    }
}
