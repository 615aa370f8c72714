//! Conversion between seconds and quantization steps.

/// Absorbs float error when a time falls exactly on a step boundary.
const STEP_EPSILON: f64 = 1e-9;

/// Converts wall-clock seconds to whole steps at a fixed resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeStepConverter {
    steps_per_quarter: u32,
}

impl TimeStepConverter {
    pub fn new(steps_per_quarter: u32) -> Self {
        Self { steps_per_quarter }
    }

    pub fn steps_per_quarter(&self) -> u32 {
        self.steps_per_quarter
    }

    /// Returns `floor(seconds * qpm / 60 * steps_per_quarter)`.
    ///
    /// Truncates: a time between two steps maps to the earlier one.
    /// Negative times map to step 0.
    pub fn seconds_to_steps(&self, seconds: f64, qpm: f64) -> usize {
        let steps = seconds * (qpm / 60.0) * self.steps_per_quarter as f64;
        (steps + STEP_EPSILON).floor().max(0.0) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_note_is_steps_per_quarter() {
        let converter = TimeStepConverter::new(4);
        assert_eq!(converter.steps_per_quarter(), 4);
        for qpm in [7.0, 30.0, 33.3, 60.0, 72.0, 90.0, 100.0, 120.0, 144.0, 200.0] {
            assert_eq!(converter.seconds_to_steps(60.0 / qpm, qpm), 4, "qpm {}", qpm);
        }
    }

    #[test]
    fn truncates_between_steps() {
        let converter = TimeStepConverter::new(4);
        assert_eq!(converter.seconds_to_steps(0.9, 60.0), 3);
        assert_eq!(converter.seconds_to_steps(1.0, 60.0), 4);
        assert_eq!(converter.seconds_to_steps(2.0, 120.0), 16);
    }

    #[test]
    fn negative_and_zero_times() {
        let converter = TimeStepConverter::new(4);
        assert_eq!(converter.seconds_to_steps(0.0, 120.0), 0);
        assert_eq!(converter.seconds_to_steps(-1.0, 120.0), 0);
    }
}
