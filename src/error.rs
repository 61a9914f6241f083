//! # Error reporting
//!
//! A single error type covers the whole crate. Arithmetic and parsing failures are returned to
//! the immediate caller, a derivation that does not converge is reported as a value and an
//! inconsistent calendar (or a project file that can't be read) is rejected as a whole.
use crate::algorithm::derivation::Solution;

/// Shorthand for results in this crate.
pub type Result<T> = std::result::Result<T, CalendarError>;

/// Everything that can go wrong while deriving, editing or simulating a calendar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// A rational number was constructed with, or divided by, zero.
    #[error("denominator can't be equal to zero")]
    InvalidRational,

    /// Text could not be read as a number in the requested notation.
    #[error("could not read \"{text}\" as a {format} number")]
    UnparseableNumber {
        /// The rejected input.
        text: String,
        /// Name of the notation that was expected.
        format: &'static str,
    },

    /// The leap scheme search did not converge within its bound.
    #[error("unable to compute a {solution} leap scheme for this input")]
    UnableToComputeScheme {
        /// The derivation algorithm that gave up.
        solution: Solution,
    },

    /// The calendar, or the input it was made from, is not in a usable state.
    #[error("invalid calendar state: {0}")]
    InvalidCalendarState(String),
}

impl CalendarError {
    pub(crate) fn unparseable(text: &str, format: &'static str) -> Self {
        Self::UnparseableNumber { text: text.to_string(), format }
    }

    pub(crate) fn invalid_state(description: impl Into<String>) -> Self {
        Self::InvalidCalendarState(description.into())
    }
}
