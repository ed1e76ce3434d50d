//! # Diagnostic Copy
//!
//! All user-facing wording produced by the phase rotation engine lives here,
//! so the literal text is tested in one place and the engine only decides
//! *which* message applies.

use crate::calculations::phase_rotation::{BalanceGrade, TestMethod};
use crate::units::Percent;

/// Sequence label for a confirmed standard sequence
pub const LABEL_STANDARD: &str = "L1–L2–L3 (Correct UK Standard)";

/// Sequence label for a reversed sequence
pub const LABEL_REVERSED: &str = "L1–L3–L2 (Reversed Sequence)";

/// Sequence label for the voltage method. "Assumed" matters: balance never
/// proves the sequence.
pub const LABEL_ASSUMED: &str = "L1–L2–L3 (Assumed Standard UK)";

pub const NO_CORRECTION: &str = "No correction required.";

pub const BALANCE_EXCELLENT: &str = "Excellent balance (≤2% deviation)";
pub const BALANCE_ACCEPTABLE: &str = "Acceptable balance (≤5% deviation)";

/// Human-readable balance status for a graded deviation.
///
/// Poor balance embeds the deviation rounded to one decimal place.
pub fn balance_status(grade: BalanceGrade, max_deviation: Percent) -> String {
    match grade {
        BalanceGrade::Excellent => BALANCE_EXCELLENT.to_string(),
        BalanceGrade::Acceptable => BALANCE_ACCEPTABLE.to_string(),
        BalanceGrade::Poor => format!(
            "Poor balance ({:.1} deviation — investigate supply)",
            max_deviation
        ),
    }
}

/// Sequence label for the instrumented and observed methods
pub fn sequence_label(is_correct: bool) -> &'static str {
    if is_correct {
        LABEL_STANDARD
    } else {
        LABEL_REVERSED
    }
}

/// What a connected three-phase motor will do
pub fn motor_direction(method: TestMethod, is_correct: bool) -> &'static str {
    match (method, is_correct) {
        (TestMethod::VoltageMeasurement, _) => "Not determined (assumed forward)",
        (_, true) => "Forward (clockwise)",
        (_, false) => "Reverse (anticlockwise)",
    }
}

pub fn recommendation(method: TestMethod, is_correct: bool) -> &'static str {
    match (method, is_correct) {
        (TestMethod::PhaseRotationMeter, true) => {
            "Phase rotation meter indication confirms the standard UK L1–L2–L3 sequence. \
             Three-phase motors will run in their intended direction. \
             Record the result on the schedule of tests."
        }
        (TestMethod::PhaseRotationMeter, false) => {
            "Phase rotation meter indication shows a reversed L1–L3–L2 sequence. \
             Do not energise three-phase motors or phase-sensitive equipment \
             until the sequence has been corrected."
        }
        (TestMethod::MotorBehaviour, true) => {
            "Motor rotation observed in the intended (clockwise) direction indicates the \
             standard L1–L2–L3 sequence. Confirm with a phase rotation meter where one is \
             available, and check the motor nameplate for the designed direction."
        }
        (TestMethod::MotorBehaviour, false) => {
            "Motor rotation observed anticlockwise indicates a reversed sequence. \
             Stop the motor to prevent mechanical damage to driven equipment."
        }
        (TestMethod::VoltageMeasurement, true) => {
            "Line voltages are balanced, but voltage balance alone cannot determine phase \
             sequence. Confirm the sequence with a phase rotation meter before connecting \
             rotating machinery."
        }
        (TestMethod::VoltageMeasurement, false) => {
            "Line voltages are unbalanced. Investigate the supply for loose or failed \
             connections and unequal loading. Voltage balance alone cannot determine phase \
             sequence; confirm it with a phase rotation meter."
        }
    }
}

pub fn correction(method: TestMethod, is_correct: bool) -> &'static str {
    match (method, is_correct) {
        (TestMethod::PhaseRotationMeter, true) | (TestMethod::MotorBehaviour, true) => NO_CORRECTION,
        (TestMethod::PhaseRotationMeter, false) => {
            "Isolate the supply and prove it dead, then swap any two phases \
             (conventionally L2 and L3) at the supply point. Re-test with the rotation \
             meter to confirm the correction."
        }
        (TestMethod::MotorBehaviour, false) => {
            "Isolate the supply and prove it dead, then swap any two phases \
             (conventionally L2 and L3) at the motor terminal box. Restart briefly and \
             confirm the motor rotation observed is now clockwise."
        }
        (TestMethod::VoltageMeasurement, true) => {
            "No balance correction required. Re-test with a phase rotation meter to \
             establish the actual sequence."
        }
        (TestMethod::VoltageMeasurement, false) => {
            "Find and remedy the cause of the imbalance before energising three-phase \
             loads, then re-test with a phase rotation meter to establish the actual \
             sequence."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poor_balance_rounds_to_one_decimal() {
        let status = balance_status(BalanceGrade::Poor, Percent(7.2649));
        assert_eq!(status, "Poor balance (7.3% deviation — investigate supply)");
    }

    #[test]
    fn test_fixed_balance_messages() {
        assert_eq!(
            balance_status(BalanceGrade::Excellent, Percent(0.4)),
            "Excellent balance (≤2% deviation)"
        );
        assert_eq!(
            balance_status(BalanceGrade::Acceptable, Percent(4.9)),
            "Acceptable balance (≤5% deviation)"
        );
    }

    #[test]
    fn test_correction_recommends_swapping_two_phases() {
        for method in [TestMethod::PhaseRotationMeter, TestMethod::MotorBehaviour] {
            let text = correction(method, false);
            assert!(text.contains("swap any two phases"));
            assert!(text.contains("prove it dead"));
            assert_eq!(correction(method, true), NO_CORRECTION);
        }
    }

    #[test]
    fn test_voltage_copy_states_limitation() {
        for ok in [true, false] {
            assert!(recommendation(TestMethod::VoltageMeasurement, ok)
                .contains("cannot determine phase sequence"));
            assert!(correction(TestMethod::VoltageMeasurement, ok).contains("phase rotation meter"));
        }
    }

    #[test]
    fn test_motor_wording_mentions_observation() {
        assert!(recommendation(TestMethod::MotorBehaviour, true).contains("Motor rotation observed"));
        assert!(recommendation(TestMethod::PhaseRotationMeter, true).contains("meter indication"));
    }

    #[test]
    fn test_motor_direction_text() {
        assert_eq!(motor_direction(TestMethod::PhaseRotationMeter, false), "Reverse (anticlockwise)");
        assert_eq!(
            motor_direction(TestMethod::VoltageMeasurement, false),
            "Not determined (assumed forward)"
        );
    }
}
