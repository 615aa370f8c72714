//! Generation requests: time windows and named generator arguments.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, Result};

/// Name of the sampling temperature argument.
pub const TEMPERATURE_ARG: &str = "temperature";

/// A time range in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start_time: f64,
    pub end_time: f64,
}

impl TimeWindow {
    pub fn new(start_time: f64, end_time: f64) -> Self {
        Self {
            start_time,
            end_time,
        }
    }
}

/// A typed value for a named generator argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorArg {
    Float(f64),
    Int(i64),
    Bool(bool),
    Text(String),
}

/// A request to extend a sequence into an output window.
///
/// Requests may carry any number of windows; the validator rejects
/// anything other than zero or one input window and exactly one output
/// window before generation starts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Windows restricting which part of the input is considered.
    #[serde(default)]
    pub input_windows: Vec<TimeWindow>,

    /// Windows to generate.
    #[serde(default)]
    pub output_windows: Vec<TimeWindow>,

    /// Free-form named arguments such as `temperature`.
    #[serde(default)]
    pub args: BTreeMap<String, GeneratorArg>,
}

impl GenerationRequest {
    /// Creates a request generating a single output window.
    pub fn new(output: TimeWindow) -> Self {
        Self {
            output_windows: vec![output],
            ..Self::default()
        }
    }

    /// Adds an input window.
    pub fn with_input_window(mut self, window: TimeWindow) -> Self {
        self.input_windows.push(window);
        self
    }

    /// Adds an output window.
    pub fn with_output_window(mut self, window: TimeWindow) -> Self {
        self.output_windows.push(window);
        self
    }

    /// Sets a named argument.
    pub fn with_arg(mut self, name: impl Into<String>, value: GeneratorArg) -> Self {
        self.args.insert(name.into(), value);
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(self, temperature: f64) -> Self {
        self.with_arg(TEMPERATURE_ARG, GeneratorArg::Float(temperature))
    }

    /// Resolves the sampling temperature, falling back to `default`.
    ///
    /// Integer values are accepted as floats. Any other argument kind is
    /// rejected.
    pub fn temperature(&self, default: f64) -> Result<f64> {
        match self.args.get(TEMPERATURE_ARG) {
            None => Ok(default),
            Some(GeneratorArg::Float(value)) => Ok(*value),
            Some(GeneratorArg::Int(value)) => Ok(*value as f64),
            Some(other) => Err(GenerationError::invalid_argument(
                TEMPERATURE_ARG,
                format!("expected a number, got {:?}", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn temperature_defaults_when_absent() {
        let request = GenerationRequest::new(TimeWindow::new(2.0, 4.0));
        assert_eq!(request.temperature(1.0).unwrap(), 1.0);
    }

    #[test]
    fn temperature_accepts_float_and_int() {
        let request = GenerationRequest::new(TimeWindow::new(2.0, 4.0)).with_temperature(0.5);
        assert_eq!(request.temperature(1.0).unwrap(), 0.5);

        let request = GenerationRequest::new(TimeWindow::new(2.0, 4.0))
            .with_arg(TEMPERATURE_ARG, GeneratorArg::Int(2));
        assert_eq!(request.temperature(1.0).unwrap(), 2.0);
    }

    #[test]
    fn temperature_rejects_text() {
        let request = GenerationRequest::new(TimeWindow::new(2.0, 4.0))
            .with_arg(TEMPERATURE_ARG, GeneratorArg::Text("hot".to_string()));
        let err = request.temperature(1.0).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
    }

    #[test]
    fn request_round_trips_through_json() {
        let request = GenerationRequest::new(TimeWindow::new(2.0, 4.0))
            .with_input_window(TimeWindow::new(0.0, 2.0))
            .with_temperature(1.2);
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"temperature\":{\"float\":1.2}"));
        let parsed: GenerationRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, request);
    }
}
