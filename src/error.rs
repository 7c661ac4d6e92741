//! Error types shared by persistence and the tour pipeline.

use crate::types::TourGroup;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by editor operations.
///
/// Conditions the editor treats as no-ops (zoom out of range, empty hit tests,
/// delete without a selection, tours over two or fewer points) are not errors.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Reading or writing a file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File the operation targeted
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },
    /// A persisted record could not be parsed; the whole load is rejected
    #[error("malformed record on line {line}: {reason}")]
    Format {
        /// 1-based line number of the offending record
        line: usize,
        /// What was wrong with it
        reason: String,
    },
    /// The tour solver returned something that is not a permutation of the group
    #[error("invalid tour for {group}: {reason}")]
    InvalidTour {
        /// Group whose tour was rejected
        group: TourGroup,
        /// What was wrong with the solver output
        reason: String,
    },
}

impl EditorError {
    /// Builds a [`EditorError::Format`] for the given 1-based line.
    pub fn format(line: usize, reason: impl Into<String>) -> Self {
        Self::Format {
            line,
            reason: reason.into(),
        }
    }

    /// Builds a [`EditorError::Io`] for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;
