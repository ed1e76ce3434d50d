//! # Phasor Diagram Geometry
//!
//! Projects phase angles onto a circle so any renderer (canvas, SVG,
//! terminal) can draw the vector diagram. 0° points up and positive angles
//! turn clockwise, matching how rotation meters present the sequence.
//! Screen coordinates are assumed, so y grows downwards.

use serde::{Deserialize, Serialize};

use crate::calculations::phase_rotation::DiagnosticResult;
use crate::units::{Degrees, Radians};

/// Geometry of the diagram circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramSettings {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
}

impl Default for DiagramSettings {
    fn default() -> Self {
        DiagramSettings {
            center_x: 100.0,
            center_y: 100.0,
            radius: 80.0,
        }
    }
}

/// A point in diagram coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// One phase vector from the centre to its endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Phasor {
    pub label: &'static str,
    pub angle: Degrees,
    pub start: Point,
    pub end: Point,
}

/// Endpoint of a vector at `angle` on the settings circle.
///
/// `x = cx + r·sin θ`, `y = cy − r·cos θ`
pub fn endpoint(angle: Degrees, settings: &DiagramSettings) -> Point {
    let theta: Radians = angle.into();
    Point {
        x: settings.center_x + settings.radius * theta.0.sin(),
        y: settings.center_y - settings.radius * theta.0.cos(),
    }
}

/// The three phasors of a result, in L1, L2, L3 order.
pub fn phasors(result: &DiagnosticResult, settings: &DiagramSettings) -> [Phasor; 3] {
    let center = Point {
        x: settings.center_x,
        y: settings.center_y,
    };
    let [p1, p2, p3] = result.phase_angles.as_array();
    let phasor = |label: &'static str, angle: Degrees| Phasor {
        label,
        angle,
        start: center,
        end: endpoint(angle, settings),
    };
    [phasor("L1", p1), phasor("L2", p2), phasor("L3", p3)]
}
