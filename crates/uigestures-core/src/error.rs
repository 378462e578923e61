use crate::recognizer::RecognizerId;

/// API misuse detected by a delegate or a recognizer setter.
///
/// Gesture outcomes are never errors: they are reported as
/// [`State::Failed`](crate::State::Failed) or
/// [`State::Cancelled`](crate::State::Cancelled).
#[derive(Debug, Clone, PartialEq)]
pub enum GestureError {
    DuplicateRecognizer {
        id: RecognizerId,
    },
    UnknownRecognizer {
        id: RecognizerId,
    },
    InvalidTouchRange {
        minimum: usize,
        maximum: usize,
    },
    InvalidConfiguration {
        field: &'static str,
        reason: &'static str,
    },
}

impl std::fmt::Display for GestureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GestureError::DuplicateRecognizer { id } => {
                write!(f, "recognizer {id} is already attached")
            }
            GestureError::UnknownRecognizer { id } => {
                write!(f, "recognizer {id} is not attached to this delegate")
            }
            GestureError::InvalidTouchRange { minimum, maximum } => {
                write!(f, "invalid touch range {minimum}..={maximum}")
            }
            GestureError::InvalidConfiguration { field, reason } => {
                write!(f, "invalid configuration for {field}: {reason}")
            }
        }
    }
}

impl std::error::Error for GestureError {}
