//! # Phase Rotation Analysis
//!
//! Determines the phase sequence of a three-phase supply from one of three
//! test methods and grades how far the result can be trusted.
//!
//! | Method | Evidence | Confidence |
//! |--------|----------|------------|
//! | `phase-rotation-meter` | Dedicated rotation meter reading | High |
//! | `motor-behaviour` | Observed motor shaft rotation | Medium |
//! | `voltage-measurement` | Three line-to-line voltages | Low |
//!
//! Voltage balance is invariant under relabelling the phases, so the voltage
//! method never detects a sequence. It reports the balance of the supply and
//! *assumes* the standard UK sequence.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::phase_rotation::{calculate, MeterReading, MethodInputs, ConfidenceLevel};
//!
//! let result = calculate(&MethodInputs::PhaseRotationMeter {
//!     reading: MeterReading::L1L3L2,
//! });
//!
//! assert!(!result.is_correct);
//! assert_eq!(result.confidence_level, ConfidenceLevel::High);
//! assert_eq!(result.phase_angles.p2.0, 240.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::guidance;
use crate::units::{Degrees, Percent, Volts};

/// The three ways a phase sequence can be tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TestMethod {
    /// Dedicated phase rotation meter
    PhaseRotationMeter,
    /// Line-to-line voltage magnitudes
    VoltageMeasurement,
    /// Observed direction of a connected motor
    MotorBehaviour,
}

impl TestMethod {
    /// All methods, in the order a UI should offer them
    pub const ALL: [TestMethod; 3] = [
        TestMethod::PhaseRotationMeter,
        TestMethod::VoltageMeasurement,
        TestMethod::MotorBehaviour,
    ];

    /// Wire value (e.g., "phase-rotation-meter")
    pub fn code(&self) -> &'static str {
        match self {
            TestMethod::PhaseRotationMeter => "phase-rotation-meter",
            TestMethod::VoltageMeasurement => "voltage-measurement",
            TestMethod::MotorBehaviour => "motor-behaviour",
        }
    }

    /// Parse an exact wire value
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.code() == code)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TestMethod::PhaseRotationMeter => "Phase Rotation Meter",
            TestMethod::VoltageMeasurement => "Voltage Measurement",
            TestMethod::MotorBehaviour => "Motor Behaviour",
        }
    }

    /// Confidence attached to any result produced by this method.
    pub fn confidence(&self) -> ConfidenceLevel {
        match self {
            TestMethod::PhaseRotationMeter => ConfidenceLevel::High,
            TestMethod::MotorBehaviour => ConfidenceLevel::Medium,
            TestMethod::VoltageMeasurement => ConfidenceLevel::Low,
        }
    }
}

impl std::fmt::Display for TestMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Sequence shown by a phase rotation meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeterReading {
    #[serde(rename = "l1-l2-l3")]
    L1L2L3,
    #[serde(rename = "l1-l3-l2")]
    L1L3L2,
}

impl MeterReading {
    pub const ALL: [MeterReading; 2] = [MeterReading::L1L2L3, MeterReading::L1L3L2];

    pub fn code(&self) -> &'static str {
        match self {
            MeterReading::L1L2L3 => "l1-l2-l3",
            MeterReading::L1L3L2 => "l1-l3-l2",
        }
    }

    /// Parse an exact (case-sensitive) wire value
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.code() == code)
    }
}

/// Direction of rotation, used both for motor observations and results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationDirection {
    Clockwise,
    Anticlockwise,
}

impl RotationDirection {
    pub const ALL: [RotationDirection; 2] = [RotationDirection::Clockwise, RotationDirection::Anticlockwise];

    pub fn code(&self) -> &'static str {
        match self {
            RotationDirection::Clockwise => "clockwise",
            RotationDirection::Anticlockwise => "anticlockwise",
        }
    }

    /// Parse an exact (case-sensitive) wire value
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.code() == code)
    }
}

impl std::fmt::Display for RotationDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// How directly the chosen method proves the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ConfidenceLevel::High => "High",
            ConfidenceLevel::Medium => "Medium",
            ConfidenceLevel::Low => "Low",
        };
        write!(f, "{}", s)
    }
}

/// A line-to-line voltage already checked against the accepted range.
///
/// The only constructor enforces `MIN..=MAX`, so the engine never sees a
/// zero or non-finite reading.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct LineVoltage(Volts);

impl LineVoltage {
    /// Lowest accepted reading (V)
    pub const MIN: f64 = 100.0;
    /// Highest accepted reading (V)
    pub const MAX: f64 = 1000.0;

    /// Validate a reading for `field`.
    pub fn new(field: &str, volts: f64) -> CalcResult<Self> {
        if !volts.is_finite() {
            return Err(CalcError::invalid_input(field, volts.to_string(), "Voltage must be a finite number"));
        }
        if !(Self::MIN..=Self::MAX).contains(&volts) {
            return Err(CalcError::invalid_input(
                field,
                volts.to_string(),
                format!("Voltage must be between {} V and {} V", Self::MIN, Self::MAX),
            ));
        }
        Ok(LineVoltage(Volts(volts)))
    }

    pub fn volts(&self) -> Volts {
        self.0
    }
}

impl TryFrom<f64> for LineVoltage {
    type Error = CalcError;

    fn try_from(volts: f64) -> CalcResult<Self> {
        LineVoltage::new("voltage", volts)
    }
}

impl From<LineVoltage> for f64 {
    fn from(v: LineVoltage) -> f64 {
        v.0 .0
    }
}

/// The three line-to-line readings of the voltage method.
///
/// Deserialization validates each reading under its own field name.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLineVoltages")]
pub struct LineVoltages {
    /// L1 to L2 (V)
    pub l1l2: LineVoltage,
    /// L2 to L3 (V)
    pub l2l3: LineVoltage,
    /// L3 to L1 (V)
    pub l3l1: LineVoltage,
}

impl LineVoltages {
    /// Validate three readings, naming the first one out of range.
    pub fn new(l1l2: f64, l2l3: f64, l3l1: f64) -> CalcResult<Self> {
        Ok(LineVoltages {
            l1l2: LineVoltage::new("l1l2", l1l2)?,
            l2l3: LineVoltage::new("l2l3", l2l3)?,
            l3l1: LineVoltage::new("l3l1", l3l1)?,
        })
    }

    pub fn as_array(&self) -> [Volts; 3] {
        [self.l1l2.volts(), self.l2l3.volts(), self.l3l1.volts()]
    }
}

/// Unchecked wire shape of [`LineVoltages`]
#[derive(Deserialize)]
struct RawLineVoltages {
    l1l2: f64,
    l2l3: f64,
    l3l1: f64,
}

impl TryFrom<RawLineVoltages> for LineVoltages {
    type Error = CalcError;

    fn try_from(raw: RawLineVoltages) -> CalcResult<Self> {
        LineVoltages::new(raw.l1l2, raw.l2l3, raw.l3l1)
    }
}

/// Validated engine input, one variant per [`TestMethod`].
///
/// ## JSON Example
///
/// ```json
/// { "method": "voltage-measurement", "l1l2": 400.0, "l2l3": 400.0, "l3l1": 408.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "kebab-case")]
pub enum MethodInputs {
    PhaseRotationMeter { reading: MeterReading },
    MotorBehaviour { direction: RotationDirection },
    VoltageMeasurement(LineVoltages),
}

impl MethodInputs {
    pub fn method(&self) -> TestMethod {
        match self {
            MethodInputs::PhaseRotationMeter { .. } => TestMethod::PhaseRotationMeter,
            MethodInputs::MotorBehaviour { .. } => TestMethod::MotorBehaviour,
            MethodInputs::VoltageMeasurement(_) => TestMethod::VoltageMeasurement,
        }
    }
}

/// Phasor angles in degrees, L1 fixed at 0°.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseAngles {
    pub p1: Degrees,
    pub p2: Degrees,
    pub p3: Degrees,
}

impl PhaseAngles {
    /// L1–L2–L3
    pub const STANDARD: PhaseAngles = PhaseAngles {
        p1: Degrees(0.0),
        p2: Degrees(120.0),
        p3: Degrees(240.0),
    };

    /// Two phases physically swapped (L1–L3–L2)
    pub const SWAPPED: PhaseAngles = PhaseAngles {
        p1: Degrees(0.0),
        p2: Degrees(240.0),
        p3: Degrees(120.0),
    };

    pub fn for_sequence(is_correct: bool) -> Self {
        if is_correct {
            Self::STANDARD
        } else {
            Self::SWAPPED
        }
    }

    pub fn as_array(&self) -> [Degrees; 3] {
        [self.p1, self.p2, self.p3]
    }
}

/// Step grade of the worst voltage deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BalanceGrade {
    /// ≤ 2 %
    Excellent,
    /// ≤ 5 %
    Acceptable,
    /// > 5 %
    Poor,
}

impl BalanceGrade {
    pub const EXCELLENT_LIMIT: Percent = Percent(2.0);
    pub const ACCEPTABLE_LIMIT: Percent = Percent(5.0);

    pub fn from_deviation(max_deviation: Percent) -> Self {
        if max_deviation <= Self::EXCELLENT_LIMIT {
            BalanceGrade::Excellent
        } else if max_deviation <= Self::ACCEPTABLE_LIMIT {
            BalanceGrade::Acceptable
        } else {
            BalanceGrade::Poor
        }
    }

    /// Excellent and Acceptable both pass
    pub fn is_acceptable(&self) -> bool {
        !matches!(self, BalanceGrade::Poor)
    }
}

/// Balance analysis attached to voltage-method results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoltageSummary {
    /// L1–L2 reading
    pub ab: Volts,
    /// L2–L3 reading
    pub bc: Volts,
    /// L3–L1 reading
    pub ca: Volts,
    pub average: Volts,
    /// Largest `|v - average| / average * 100` of the three readings
    pub max_deviation_pct: Percent,
    pub balance_grade: BalanceGrade,
    pub balance_status: String,
}

/// Output of [`calculate`].
///
/// ## JSON Example
///
/// ```json
/// {
///   "method": "phase-rotation-meter",
///   "sequenceLabel": "L1–L2–L3 (Correct UK Standard)",
///   "isCorrect": true,
///   "confidenceLevel": "High",
///   "recommendationText": "...",
///   "correctionText": "No correction required.",
///   "rotationDirection": "clockwise",
///   "motorDirection": "Forward (clockwise)",
///   "phaseAngles": { "p1": 0.0, "p2": 120.0, "p3": 240.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticResult {
    pub method: TestMethod,
    pub sequence_label: String,
    pub is_correct: bool,
    pub confidence_level: ConfidenceLevel,
    pub recommendation_text: String,
    pub correction_text: String,
    pub rotation_direction: RotationDirection,
    pub motor_direction: String,
    pub phase_angles: PhaseAngles,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voltage_summary: Option<VoltageSummary>,
}

impl DiagnosticResult {
    /// Check if the sequence is (or is assumed) correct
    pub fn passes(&self) -> bool {
        self.is_correct
    }
}

/// Run the analysis for an already-validated set of inputs.
///
/// Total on its input type: every [`MethodInputs`] value yields a well-formed
/// result, and the same inputs always yield the same result.
pub fn calculate(inputs: &MethodInputs) -> DiagnosticResult {
    let result = match *inputs {
        MethodInputs::PhaseRotationMeter { reading } => {
            sequence_result(TestMethod::PhaseRotationMeter, reading == MeterReading::L1L2L3)
        }
        MethodInputs::MotorBehaviour { direction } => {
            sequence_result(TestMethod::MotorBehaviour, direction == RotationDirection::Clockwise)
        }
        MethodInputs::VoltageMeasurement(ref voltages) => voltage_result(voltages),
    };

    debug!(
        method = result.method.code(),
        is_correct = result.is_correct,
        confidence = %result.confidence_level,
        "phase rotation calculated"
    );

    result
}

/// Meter and motor branches share everything except method-specific copy.
fn sequence_result(method: TestMethod, is_correct: bool) -> DiagnosticResult {
    DiagnosticResult {
        method,
        sequence_label: guidance::sequence_label(is_correct).to_string(),
        is_correct,
        confidence_level: method.confidence(),
        recommendation_text: guidance::recommendation(method, is_correct).to_string(),
        correction_text: guidance::correction(method, is_correct).to_string(),
        rotation_direction: if is_correct {
            RotationDirection::Clockwise
        } else {
            RotationDirection::Anticlockwise
        },
        motor_direction: guidance::motor_direction(method, is_correct).to_string(),
        phase_angles: PhaseAngles::for_sequence(is_correct),
        voltage_summary: None,
    }
}

fn voltage_result(voltages: &LineVoltages) -> DiagnosticResult {
    let method = TestMethod::VoltageMeasurement;
    let summary = analyse_balance(voltages);
    let is_correct = summary.balance_grade.is_acceptable();

    DiagnosticResult {
        method,
        sequence_label: guidance::LABEL_ASSUMED.to_string(),
        is_correct,
        confidence_level: method.confidence(),
        recommendation_text: guidance::recommendation(method, is_correct).to_string(),
        correction_text: guidance::correction(method, is_correct).to_string(),
        // Standard sequence is assumed, never detected
        rotation_direction: RotationDirection::Clockwise,
        motor_direction: guidance::motor_direction(method, is_correct).to_string(),
        phase_angles: PhaseAngles::STANDARD,
        voltage_summary: Some(summary),
    }
}

/// Balance of three line-to-line voltages.
///
/// The mean is anchored on the first reading, `v1 + ((v2 - v1) + (v3 - v1)) / 3`,
/// which equals `(v1 + v2 + v3) / 3` but is exact when all readings agree.
pub fn analyse_balance(voltages: &LineVoltages) -> VoltageSummary {
    let [ab, bc, ca] = voltages.as_array();
    let average = ab + ((bc - ab) + (ca - ab)) / 3.0;

    let max_deviation_pct = [ab, bc, ca]
        .into_iter()
        .map(|v| Percent::from_fraction((v - average).abs() / average))
        .fold(Percent(0.0), |max, d| if d > max { d } else { max });

    let balance_grade = BalanceGrade::from_deviation(max_deviation_pct);

    VoltageSummary {
        ab,
        bc,
        ca,
        average,
        max_deviation_pct,
        balance_grade,
        balance_status: guidance::balance_status(balance_grade, max_deviation_pct),
    }
}
