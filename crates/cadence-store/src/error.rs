//! Error types for the sequence store.

use crate::outcome::GapReport;
use thiserror::Error;

/// Result type for submissions.
pub type Result<T> = std::result::Result<T, SubmitError>;

/// A submission the store did not turn into progress.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Terminator arrived but earlier positions are missing. The run stays
    /// live; send the missing fragments and a fresh terminator.
    #[error("sequence incomplete: {} position(s) missing before {}", .0.missing_count, .0.final_seq)]
    SequenceGap(GapReport),

    /// The run is frozen. Only a reset accepts writes again.
    #[error("already finalized")]
    AlreadyFinalized { final_seq: i64 },
}

impl SubmitError {
    /// Short machine-readable reason.
    pub fn reason(&self) -> &'static str {
        match self {
            SubmitError::SequenceGap(_) => "sequence incomplete",
            SubmitError::AlreadyFinalized { .. } => "already finalized",
        }
    }

    /// Whether the same run can still complete.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SubmitError::SequenceGap(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finalized_reason_matches_display() {
        let err = SubmitError::AlreadyFinalized { final_seq: 3 };
        assert_eq!(err.reason(), "already finalized");
        assert_eq!(err.to_string(), "already finalized");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn gap_is_recoverable() {
        let err = SubmitError::SequenceGap(GapReport {
            final_seq: 3,
            missing_count: 1,
            missing_first: vec![1],
            message_length: 1,
        });
        assert!(err.is_recoverable());
        assert_eq!(err.to_string(), "sequence incomplete: 1 position(s) missing before 3");
    }
}
