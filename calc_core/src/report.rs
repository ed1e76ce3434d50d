//! # Text Reports
//!
//! Plain-text renderings of a [`DiagnosticResult`] for the clipboard and
//! for export. Sections appear in a fixed order; optional sections are only
//! written when their data exists.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::phase_rotation::{calculate, MethodInputs, RotationDirection};
//! use calc_core::report::clipboard_summary;
//!
//! let result = calculate(&MethodInputs::MotorBehaviour {
//!     direction: RotationDirection::Clockwise,
//! });
//! let text = clipboard_summary(&result);
//! assert!(text.starts_with("Phase Rotation Analysis\n"));
//! assert!(!text.contains("Balance:"));
//! ```

use std::fmt::Write;

use crate::calculations::phase_rotation::DiagnosticResult;
use crate::schedule::TestSchedule;
use crate::units::Volts;

pub const HEADING: &str = "Phase Rotation Analysis";
pub const SCHEDULE_HEADING: &str = "Schedule of Tests";

/// Newline-separated summary in the clipboard export format.
pub fn clipboard_summary(result: &DiagnosticResult) -> String {
    summary_lines(result).join("\n")
}

/// Clipboard summary followed by guidance and, for the voltage method, the
/// readings behind the balance figure.
pub fn detailed_summary(result: &DiagnosticResult) -> String {
    let mut out = clipboard_summary(result);

    let _ = write!(out, "\nMethod: {}", result.method);
    let _ = write!(out, "\nRecommendation: {}", result.recommendation_text);
    let _ = write!(out, "\nCorrection: {}", result.correction_text);

    if let Some(summary) = &result.voltage_summary {
        let _ = write!(
            out,
            "\nVoltages: L1-L2 {:.1}, L2-L3 {:.1}, L3-L1 {:.1}",
            summary.ab, summary.bc, summary.ca
        );
        let _ = write!(out, "\nAverage: {:.1}", summary.average);
        let _ = write!(out, "\nMax Deviation: {:.2}", summary.max_deviation_pct);
    }

    out
}

/// Job header, schedule settings and one outcome line per circuit, sorted
/// by circuit reference.
pub fn schedule_summary(schedule: &TestSchedule) -> String {
    let meta = &schedule.meta;
    let settings = &schedule.settings;

    let mut out = String::from(SCHEDULE_HEADING);
    let _ = write!(out, "\nJob: {} ({})", meta.job_ref, meta.client);
    let _ = write!(out, "\nElectrician: {}", meta.electrician);
    let _ = write!(
        out,
        "\nStandard: {}, Regulation {}",
        settings.standard, settings.regulation
    );
    let _ = write!(out, "\nNominal Voltage: {}", Volts(settings.nominal_line_voltage));

    let mut entries: Vec<_> = schedule.entries.values().collect();
    entries.sort_by(|a, b| a.circuit_ref.cmp(&b.circuit_ref));
    for entry in entries {
        let _ = write!(out, "\n{}: {}", entry.circuit_ref, entry.outcome.display_name());
    }
    out
}

fn summary_lines(result: &DiagnosticResult) -> Vec<String> {
    let mut lines = vec![
        HEADING.to_string(),
        format!("Sequence: {}", result.sequence_label),
        format!("Rotation: {}", result.rotation_direction),
        format!("Confidence: {}", result.confidence_level),
        format!("Motor Direction: {}", result.motor_direction),
    ];
    if let Some(summary) = &result.voltage_summary {
        lines.push(format!("Balance: {}", summary.balance_status));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::phase_rotation::{
        calculate, LineVoltage, LineVoltages, MeterReading, MethodInputs,
    };

    fn voltage_result(a: f64, b: f64, c: f64) -> DiagnosticResult {
        calculate(&MethodInputs::VoltageMeasurement(LineVoltages {
            l1l2: LineVoltage::new("l1l2", a).unwrap(),
            l2l3: LineVoltage::new("l2l3", b).unwrap(),
            l3l1: LineVoltage::new("l3l1", c).unwrap(),
        }))
    }

    #[test]
    fn test_meter_summary_exact_text() {
        let result = calculate(&MethodInputs::PhaseRotationMeter {
            reading: MeterReading::L1L3L2,
        });
        assert_eq!(
            clipboard_summary(&result),
            "Phase Rotation Analysis\n\
             Sequence: L1–L3–L2 (Reversed Sequence)\n\
             Rotation: anticlockwise\n\
             Confidence: High\n\
             Motor Direction: Reverse (anticlockwise)"
        );
    }

    #[test]
    fn test_voltage_summary_has_balance_line() {
        let text = clipboard_summary(&voltage_result(400.0, 400.0, 408.0));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[1], "Sequence: L1–L2–L3 (Assumed Standard UK)");
        assert_eq!(lines[3], "Confidence: Low");
        assert_eq!(lines[5], "Balance: Excellent balance (≤2% deviation)");
    }

    #[test]
    fn test_balance_line_only_with_summary() {
        for reading in MeterReading::ALL {
            let result = calculate(&MethodInputs::PhaseRotationMeter { reading });
            assert!(!clipboard_summary(&result).contains("Balance:"));
        }
        assert!(clipboard_summary(&voltage_result(430.0, 385.0, 385.0)).contains("Balance: Poor"));
    }

    #[test]
    fn test_detailed_summary_includes_readings() {
        let text = detailed_summary(&voltage_result(400.0, 400.0, 408.0));
        assert!(text.contains("Method: Voltage Measurement"));
        assert!(text.contains("Voltages: L1-L2 400.0 V, L2-L3 400.0 V, L3-L1 408.0 V"));
        assert!(text.contains("Average: 402.7 V"));
        assert!(text.contains("Max Deviation: 1.32%"));
    }

    #[test]
    fn test_schedule_summary_lists_settings_and_circuits() {
        use crate::schedule::{CircuitTestEntry, SupplyPhases};

        let mut schedule = TestSchedule::new("Sam Spark", "J-1042", "Unit 4 Workshop");
        schedule.settings.nominal_line_voltage = 415.0;
        let lathe = schedule.add_entry(CircuitTestEntry::new("DB2/3 Lathe", SupplyPhases::Three));
        schedule.add_entry(CircuitTestEntry::new("DB1/1 Lights", SupplyPhases::Single));
        schedule.record_result(
            &lathe,
            calculate(&MethodInputs::PhaseRotationMeter {
                reading: MeterReading::L1L3L2,
            }),
        );

        assert_eq!(
            schedule_summary(&schedule),
            "Schedule of Tests\n\
             Job: J-1042 (Unit 4 Workshop)\n\
             Electrician: Sam Spark\n\
             Standard: BS 7671:2018+A2:2022, Regulation 612.12\n\
             Nominal Voltage: 415 V\n\
             DB1/1 Lights: N/A (Single Phase)\n\
             DB2/3 Lathe: ✗ Incorrect"
        );
    }

    #[test]
    fn test_detailed_summary_without_voltages() {
        let result = calculate(&MethodInputs::PhaseRotationMeter {
            reading: MeterReading::L1L2L3,
        });
        let text = detailed_summary(&result);
        assert!(text.contains("Correction: No correction required."));
        assert!(!text.contains("Voltages:"));
    }
}
