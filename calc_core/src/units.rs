//! # Unit Types
//!
//! Type-safe wrappers for electrical units. These provide compile-time
//! safety against unit confusion while remaining lightweight (just f64 wrappers).
//!
//! ## Design Philosophy
//!
//! We use simple newtype wrappers rather than a full units library because:
//! - Installation testing uses a small, consistent set of units
//! - We want JSON serialization to be clean (just numbers)
//! - Minimal runtime overhead
//!
//! ## Units
//!
//! - Voltage: volts (V)
//! - Angle: degrees (phasor diagrams), radians (trigonometry)
//! - Ratio: percent (%)
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::{Degrees, Radians, Volts};
//!
//! let quarter: Radians = Degrees(90.0).into();
//! assert!((quarter.0 - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
//!
//! let supply = Volts(400.0);
//! assert_eq!(supply + Volts(8.0), Volts(408.0));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

/// Write a rendered value honouring the formatter's width and alignment.
///
/// Precision is applied to the number before this point, so `f.pad` (which
/// would treat it as a truncation length) is not used.
fn pad_rendered(f: &mut fmt::Formatter<'_>, rendered: &str) -> fmt::Result {
    let Some(width) = f.width() else {
        return f.write_str(rendered);
    };
    match f.align() {
        Some(fmt::Alignment::Left) => write!(f, "{rendered:<width$}"),
        Some(fmt::Alignment::Center) => write!(f, "{rendered:^width$}"),
        _ => write!(f, "{rendered:>width$}"),
    }
}

/// `value` with optional precision, followed by `suffix`
fn render(f: &fmt::Formatter<'_>, value: f64, suffix: &str) -> String {
    match f.precision() {
        Some(p) => format!("{:.*}{}", p, value, suffix),
        None => format!("{}{}", value, suffix),
    }
}

// ============================================================================
// Voltage
// ============================================================================

/// Electrical potential in volts
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Volts(pub f64);

impl Volts {
    /// Absolute magnitude
    pub fn abs(self) -> Self {
        Volts(self.0.abs())
    }
}

impl Add for Volts {
    type Output = Volts;
    fn add(self, rhs: Volts) -> Volts {
        Volts(self.0 + rhs.0)
    }
}

impl Sub for Volts {
    type Output = Volts;
    fn sub(self, rhs: Volts) -> Volts {
        Volts(self.0 - rhs.0)
    }
}

impl Mul<f64> for Volts {
    type Output = Volts;
    fn mul(self, rhs: f64) -> Volts {
        Volts(self.0 * rhs)
    }
}

impl Div<f64> for Volts {
    type Output = Volts;
    fn div(self, rhs: f64) -> Volts {
        Volts(self.0 / rhs)
    }
}

/// Ratio of two voltages (dimensionless)
impl Div for Volts {
    type Output = f64;
    fn div(self, rhs: Volts) -> f64 {
        self.0 / rhs.0
    }
}

impl fmt::Display for Volts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = render(f, self.0, " V");
        pad_rendered(f, &rendered)
    }
}

// ============================================================================
// Angle
// ============================================================================

/// Angle in degrees, measured clockwise from "up" on phasor diagrams
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

/// Angle in radians
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Radians(pub f64);

impl From<Degrees> for Radians {
    fn from(deg: Degrees) -> Self {
        Radians(deg.0 * std::f64::consts::PI / 180.0)
    }
}

impl From<Radians> for Degrees {
    fn from(rad: Radians) -> Self {
        Degrees(rad.0 * 180.0 / std::f64::consts::PI)
    }
}

impl fmt::Display for Degrees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = render(f, self.0, "°");
        pad_rendered(f, &rendered)
    }
}

// ============================================================================
// Ratio
// ============================================================================

/// Percentage (5.0 means 5 %)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(pub f64);

impl Percent {
    /// Build a percentage from a fraction (0.05 -> 5 %)
    pub fn from_fraction(fraction: f64) -> Self {
        Percent(fraction * 100.0)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = render(f, self.0, "%");
        pad_rendered(f, &rendered)
    }
}
