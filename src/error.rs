//! Error types for the accompaniment generator.
//!
//! Every failure in the generation pipeline is reported as a
//! [`GenerationError`] tagged with an [`ErrorCode`], so callers can tell a
//! rejected request apart from a model or configuration failure.

use std::fmt;

/// Error codes identifying why a generation request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Wrong number of input or output windows.
    /// Trigger: more than one input window, or not exactly one output window.
    InvalidSections,

    /// Output window starts before the existing accompaniment ends.
    /// Trigger: an instrument-1 note ends after the requested start time.
    OverlapsAccompaniment,

    /// Output window starts before the model has enough priming context.
    /// Trigger: start step lower than the model's predict-ahead steps.
    BeforePredictahead,

    /// Melody extraction yielded a count outside {1, 2}.
    UnsupportedMelodyCount,

    /// A named generator argument has an unusable type or value.
    InvalidArgument,

    /// The music library could not quantize or extract the input.
    SequenceProcessing,

    /// The paired sequence model failed during inference.
    ModelInference,

    /// The model configuration table is malformed.
    InvalidConfig,
}

impl ErrorCode {
    /// Returns the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidSections => "INVALID_SECTIONS",
            ErrorCode::OverlapsAccompaniment => "OVERLAPS_ACCOMPANIMENT",
            ErrorCode::BeforePredictahead => "BEFORE_PREDICTAHEAD",
            ErrorCode::UnsupportedMelodyCount => "UNSUPPORTED_MELODY_COUNT",
            ErrorCode::InvalidArgument => "INVALID_ARGUMENT",
            ErrorCode::SequenceProcessing => "SEQUENCE_PROCESSING",
            ErrorCode::ModelInference => "MODEL_INFERENCE",
            ErrorCode::InvalidConfig => "INVALID_CONFIG",
        }
    }

    /// Returns a human-readable description of the error.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::InvalidSections => {
                "Requests take at most one input window and exactly one output window"
            }
            ErrorCode::OverlapsAccompaniment => {
                "The model can only extend sequences past the end of the accompaniment"
            }
            ErrorCode::BeforePredictahead => {
                "The output window starts before the earliest possible prediction step"
            }
            ErrorCode::UnsupportedMelodyCount => {
                "The input sequence must contain one or two extractable melodies"
            }
            ErrorCode::InvalidArgument => "A generator argument has an unusable value",
            ErrorCode::SequenceProcessing => "The input sequence could not be quantized",
            ErrorCode::ModelInference => "Model inference failed during generation",
            ErrorCode::InvalidConfig => "The model configuration table is malformed",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for generation operations.
#[derive(Debug)]
pub struct GenerationError {
    /// The error code identifying the type of error.
    pub code: ErrorCode,
    /// Human-readable error message with the offending values.
    pub message: String,
    /// Optional underlying cause of the error.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl GenerationError {
    /// Creates a new GenerationError with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new GenerationError with an underlying cause.
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates an INVALID_SECTIONS error for too many input windows.
    pub fn too_many_input_windows(count: usize) -> Self {
        Self::new(
            ErrorCode::InvalidSections,
            format!(
                "This model supports at most one input window, but got {}",
                count
            ),
        )
    }

    /// Creates an INVALID_SECTIONS error for a wrong output window count.
    pub fn wrong_output_window_count(count: usize) -> Self {
        Self::new(
            ErrorCode::InvalidSections,
            format!(
                "This model supports exactly one output window, but got {}",
                count
            ),
        )
    }

    /// Creates an OVERLAPS_ACCOMPANIMENT error.
    pub fn overlaps_accompaniment(start_time: f64, accompaniment_end_time: f64) -> Self {
        Self::new(
            ErrorCode::OverlapsAccompaniment,
            format!(
                "Output window starts before the end of the accompaniment; this model can \
                 only extend sequences. Requested start time: {}, final note end time: {}",
                start_time, accompaniment_end_time
            ),
        )
    }

    /// Creates a BEFORE_PREDICTAHEAD error.
    pub fn before_predictahead(predictahead_steps: usize, start_step: usize) -> Self {
        Self::new(
            ErrorCode::BeforePredictahead,
            format!(
                "Output window starts before the earliest possible prediction time. This model \
                 can only extend sequences after {} steps, but step {} was requested",
                predictahead_steps, start_step
            ),
        )
    }

    /// Creates an UNSUPPORTED_MELODY_COUNT error.
    pub fn unsupported_melody_count(count: usize) -> Self {
        Self::new(
            ErrorCode::UnsupportedMelodyCount,
            format!(
                "Input sequence should have between 1 and 2 extractable melodies, got {}",
                count
            ),
        )
    }

    /// Creates an INVALID_ARGUMENT error.
    pub fn invalid_argument(name: &str, reason: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InvalidArgument,
            format!("Invalid argument '{}': {}", name, reason.into()),
        )
    }

    /// Creates a SEQUENCE_PROCESSING error.
    pub fn sequence_processing(reason: impl Into<String>) -> Self {
        Self::new(ErrorCode::SequenceProcessing, reason)
    }

    /// Creates a MODEL_INFERENCE error.
    pub fn model_inference(reason: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ModelInference,
            format!("Inference failed: {}", reason.into()),
        )
    }

    /// Creates an INVALID_CONFIG error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InvalidConfig,
            format!("Invalid configuration: {}", reason.into()),
        )
    }
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for GenerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Result type alias using GenerationError.
pub type Result<T> = std::result::Result<T, GenerationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_as_str() {
        assert_eq!(ErrorCode::InvalidSections.as_str(), "INVALID_SECTIONS");
        assert_eq!(ErrorCode::OverlapsAccompaniment.as_str(), "OVERLAPS_ACCOMPANIMENT");
        assert_eq!(ErrorCode::BeforePredictahead.as_str(), "BEFORE_PREDICTAHEAD");
        assert_eq!(ErrorCode::UnsupportedMelodyCount.as_str(), "UNSUPPORTED_MELODY_COUNT");
        assert_eq!(ErrorCode::InvalidArgument.as_str(), "INVALID_ARGUMENT");
        assert_eq!(ErrorCode::SequenceProcessing.as_str(), "SEQUENCE_PROCESSING");
        assert_eq!(ErrorCode::ModelInference.as_str(), "MODEL_INFERENCE");
        assert_eq!(ErrorCode::InvalidConfig.as_str(), "INVALID_CONFIG");
    }

    #[test]
    fn descriptions_not_empty() {
        for code in [
            ErrorCode::InvalidSections,
            ErrorCode::OverlapsAccompaniment,
            ErrorCode::BeforePredictahead,
            ErrorCode::UnsupportedMelodyCount,
            ErrorCode::InvalidArgument,
            ErrorCode::SequenceProcessing,
            ErrorCode::ModelInference,
            ErrorCode::InvalidConfig,
        ] {
            assert!(!code.description().is_empty());
        }
    }

    #[test]
    fn error_display_carries_values() {
        let err = GenerationError::before_predictahead(8, 3);
        let text = err.to_string();
        assert!(text.contains("BEFORE_PREDICTAHEAD"));
        assert!(text.contains("after 8 steps"));
        assert!(text.contains("step 3"));

        let err = GenerationError::unsupported_melody_count(3);
        assert!(err.to_string().contains("got 3"));
    }

    #[test]
    fn error_source_is_exposed() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = GenerationError::with_source(ErrorCode::InvalidConfig, "read failed", io);
        assert!(std::error::Error::source(&err).is_some());
        assert!(std::error::Error::source(&GenerationError::invalid_config("x")).is_none());
    }
}
