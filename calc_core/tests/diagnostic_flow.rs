//! End-to-end flow: form entry, gating, calculation, export and recording.

use calc_core::calculations::phase_rotation::{ConfidenceLevel, RotationDirection};
use calc_core::calculations::{Calculator, PhaseRotationCalculator};
use calc_core::diagram::{phasors, DiagramSettings};
use calc_core::report::clipboard_summary;
use calc_core::schedule::{CircuitTestEntry, PhaseRotationOutcome, SupplyPhases};
use calc_core::session::{SessionEvent, VoltageField};
use calc_core::{DiagnosticSession, PhaseRotationForm, TestMethod, TestSchedule};

#[test]
fn voltage_check_then_meter_confirmation() {
    let mut schedule = TestSchedule::new("Sam Spark", "J-1042", "Unit 4 Workshop");
    let lathe = schedule.add_entry(CircuitTestEntry::new("DB2/3 Lathe", SupplyPhases::Three));

    let mut session = DiagnosticSession::new();
    session.apply(SessionEvent::MethodSelected(TestMethod::VoltageMeasurement));
    session.apply(SessionEvent::VoltageChanged(VoltageField::L1L2, "415".into()));
    session.apply(SessionEvent::VoltageChanged(VoltageField::L2L3, "99".into()));
    session.apply(SessionEvent::VoltageChanged(VoltageField::L3L1, "412".into()));
    assert!(!session.can_calculate());

    session.apply(SessionEvent::VoltageChanged(VoltageField::L2L3, "409".into()));
    let balance = session.calculate().unwrap().clone();
    assert_eq!(balance.confidence_level, ConfidenceLevel::Low);
    assert!(balance.is_correct);

    schedule.record_result(&lathe, balance);
    assert_eq!(
        schedule.get_entry(&lathe).unwrap().outcome,
        PhaseRotationOutcome::Pending
    );

    // Balance alone is not enough; confirm with the meter
    session.apply(SessionEvent::MethodSelected(TestMethod::PhaseRotationMeter));
    assert!(session.result().is_none());
    session.apply(SessionEvent::ReadingChanged("l1-l3-l2".into()));
    session.apply(SessionEvent::CalculatePressed);

    let meter = session.result().unwrap().clone();
    assert_eq!(meter.rotation_direction, RotationDirection::Anticlockwise);
    assert!(session
        .clipboard_text()
        .unwrap()
        .contains("Rotation: anticlockwise"));

    schedule.record_result(&lathe, meter);
    assert_eq!(
        schedule.get_entry(&lathe).unwrap().outcome,
        PhaseRotationOutcome::Incorrect
    );
    assert!(schedule.pending_circuits().is_empty());
}

#[test]
fn calculator_contract_matches_direct_engine() {
    let mut form = PhaseRotationForm::for_method(TestMethod::MotorBehaviour);
    form.direction = "clockwise".into();

    let inputs = PhaseRotationCalculator::parse(&form).unwrap();
    let via_trait = PhaseRotationCalculator::calculate(&inputs);
    let direct = calc_core::calculate(&inputs);
    assert_eq!(via_trait, direct);

    let text = clipboard_summary(&direct);
    assert!(text.contains("Confidence: Medium"));

    let [l1, l2, l3] = phasors(&direct, &DiagramSettings::default());
    assert_eq!(
        [l1.angle.0, l2.angle.0, l3.angle.0],
        [0.0, 120.0, 240.0]
    );
}

#[test]
fn result_json_uses_camel_case_fields() {
    let mut form = PhaseRotationForm::for_method(TestMethod::VoltageMeasurement);
    form.l1l2 = "430".into();
    form.l2l3 = "385".into();
    form.l3l1 = "385".into();

    let result = PhaseRotationCalculator::run(&form).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["method"], "voltage-measurement");
    assert_eq!(json["isCorrect"], false);
    assert_eq!(json["voltageSummary"]["maxDeviationPct"], 7.5);
    assert_eq!(json["voltageSummary"]["balanceGrade"], "Poor");
    assert_eq!(json["phaseAngles"]["p3"], 240.0);
}
