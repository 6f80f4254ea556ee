//! Error types for roster editing, CSV import, and the exchange service.
//!
//! The matcher itself never fails with an error: an unsatisfiable input is
//! reported as [`MatchOutcome::NoSolution`](crate::matcher::MatchOutcome).
//! [`SantaError`] covers everything around it.

use thiserror::Error;

/// Central error enum for `u-santa` operations.
#[derive(Debug, Error)]
pub enum SantaError {
    // =================================================================
    // Malformed input
    // =================================================================
    /// A participant name was empty after trimming.
    #[error("participant name must not be empty")]
    EmptyName,

    /// A participant with this exact name is already on the roster.
    #[error("participant already exists: {0}")]
    DuplicateParticipant(String),

    /// A name was referenced that is not on the roster.
    #[error("unknown participant: {0}")]
    UnknownParticipant(String),

    /// An exclusion rule names the same person as giver and receiver.
    #[error("a participant cannot be excluded from giving to themselves: {0}")]
    SelfExclusion(String),

    /// An email address without an `@`.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    // =================================================================
    // Generation
    // =================================================================
    /// Fewer participants than a gift exchange needs.
    #[error("need at least {required} participants, have {actual}")]
    InsufficientParticipants { required: usize, actual: usize },

    /// The exclusion rules could not be satisfied.
    #[error(
        "cannot assign everyone under the current exclusion rules \
         (gave up after {attempts} attempts); try removing some rules"
    )]
    InfeasibleConstraints { attempts: usize },

    // =================================================================
    // CSV import
    // =================================================================
    /// The CSV content is structurally unusable.
    #[error("invalid CSV: {0}")]
    InvalidCsv(String),

    /// The CSV reader failed.
    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    // =================================================================
    // Viewing
    // =================================================================
    /// The email is not on the authorized list.
    #[error("email not authorized: {0}")]
    NotAuthorized(String),

    /// Nothing has been generated yet.
    #[error("no assignments have been generated yet")]
    NoAssignments,

    // =================================================================
    // Infrastructure
    // =================================================================
    /// A configuration failed validation.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The backing store failed.
    #[error("store error: {0}")]
    Store(String),
}

impl SantaError {
    /// Whether the caller can recover by adjusting input and retrying.
    ///
    /// Only infrastructure failures (store, CSV reader I/O) are not.
    pub fn is_recoverable(&self) -> bool {
        match self {
            SantaError::Store(_) => false,
            SantaError::Csv(err) => !matches!(err.kind(), csv::ErrorKind::Io(_)),
            _ => true,
        }
    }
}

pub type Result<T> = std::result::Result<T, SantaError>;
