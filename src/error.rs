//! Error type shared by every algorithm in the crate.

use thiserror::Error;

/// Errors raised while validating inputs or configurations.
///
/// All of these are precondition violations: they are reported before any
/// search state is created, so a run either fails up front or completes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TspError {
    /// Both an iteration budget and a time budget were supplied.
    #[error("exactly one of iterations or max_seconds must be set, got both")]
    ConflictingTermination,

    /// Neither an iteration budget nor a time budget was supplied.
    #[error("exactly one of iterations or max_seconds must be set, got neither")]
    MissingTermination,

    /// A numeric parameter is outside its admissible range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name as it appears on the config type.
        name: &'static str,
        /// Human-readable constraint that was violated.
        reason: String,
    },

    /// A coordinate range for tour generation has `min > max`.
    #[error("empty {axis} range: {min}..={max}")]
    EmptyRange {
        /// `"x"` or `"y"`.
        axis: &'static str,
        min: i32,
        max: i32,
    },
}

impl TspError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TspError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            TspError::ConflictingTermination.to_string(),
            "exactly one of iterations or max_seconds must be set, got both"
        );
        assert_eq!(
            TspError::invalid("tabu_size", "must be positive").to_string(),
            "invalid parameter `tabu_size`: must be positive"
        );
        assert_eq!(
            TspError::EmptyRange {
                axis: "x",
                min: 5,
                max: 1
            }
            .to_string(),
            "empty x range: 5..=1"
        );
    }
}
