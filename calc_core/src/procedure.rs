//! Three-phase sequence test procedure, in the order it is carried out on site.

use serde::Serialize;

/// One numbered step of a test procedure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProcedureStep {
    pub step: u8,
    pub action: &'static str,
}

pub const PHASE_SEQUENCE_STEPS: [ProcedureStep; 6] = [
    ProcedureStep { step: 1, action: "Use phase sequence tester/rotation indicator" },
    ProcedureStep { step: 2, action: "Connect to L1, L2, L3 at supply point" },
    ProcedureStep { step: 3, action: "Verify clockwise rotation indication (standard UK)" },
    ProcedureStep { step: 4, action: "If anti-clockwise, swap any two phases at source" },
    ProcedureStep { step: 5, action: "Re-test to confirm correction" },
    ProcedureStep { step: 6, action: "Document phase sequence on circuit chart" },
];

pub const PHASE_SEQUENCE_NOTES: [&str; 4] = [
    "Standard UK phase sequence: L1-L2-L3 clockwise (formerly R-Y-B)",
    "Test at each three-phase DB or equipment connection",
    "Some motors designed for anti-clockwise - check nameplate",
    "Phase sequence testers available as standalone or multifunction",
];

/// Numbered steps followed by notes, one per line
pub fn render() -> String {
    let steps = PHASE_SEQUENCE_STEPS
        .iter()
        .map(|s| format!("{}. {}", s.step, s.action));
    let notes = PHASE_SEQUENCE_NOTES.iter().map(|n| format!("- {}", n));
    steps.chain(notes).collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_are_numbered_in_order() {
        for (i, step) in PHASE_SEQUENCE_STEPS.iter().enumerate() {
            assert_eq!(step.step as usize, i + 1);
        }
    }

    #[test]
    fn test_render_layout() {
        let text = render();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "1. Use phase sequence tester/rotation indicator");
        assert!(lines[6].starts_with("- Standard UK phase sequence"));
    }
}
