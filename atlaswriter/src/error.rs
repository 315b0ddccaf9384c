//! Error types for atlaswriter

use thiserror::Error;

use std::path::PathBuf;

/// Result type alias for atlaswriter operations
pub type Result<T> = std::result::Result<T, AtlasError>;

/// Every failure is a user-input problem and terminates the run.
#[derive(Debug, Error)]
pub enum AtlasError {
    /// Input FASTA missing or unreadable
    #[error("ERROR: cannot read FASTA {}: {source}", .path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed or out-of-range selection token
    #[error("ERROR: invalid segment selection '{token}': {reason}")]
    Selection { token: String, reason: String },

    /// Position out of bounds, inverted window or unselected segment
    #[error("ERROR: {0}")]
    Range(String),

    /// Malformed truncation or tail expression
    #[error("ERROR: invalid format '{expr}', {usage}")]
    Format { expr: String, usage: &'static str },

    /// Output destination could not be written
    #[error("ERROR: cannot write {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AtlasError {
    pub(crate) fn selection(token: &str, reason: impl Into<String>) -> Self {
        AtlasError::Selection {
            token: token.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn format(expr: &str, usage: &'static str) -> Self {
        AtlasError::Format {
            expr: expr.to_string(),
            usage,
        }
    }
}
