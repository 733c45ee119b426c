//! Error types for the pool audit.
//!
//! Structural problems (missing files, a `range` outside any `subnet`, unreadable
//! lease times) abort the run. Incomplete lease blocks are not errors and never
//! show up here.

use std::path::PathBuf;

/// Errors that can stop an audit run.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    /// An input file named on the command line does not exist.
    #[error("Input file does not exist: {}", path.display())]
    InputMissing { path: PathBuf },

    /// Reading an input stream failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error (report output).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A parse error, tagged with the file it came from.
    #[error("{}: {source}", path.display())]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<AuditError>,
    },

    /// A `range` declaration appeared before any `subnet` declaration.
    #[error("line {line}: range declared outside any subnet")]
    RangeOutsideSubnet { line: usize },

    /// A lease `starts`/`ends` value is not a known timestamp format.
    #[error("malformed lease timestamp '{value}'")]
    MalformedTimestamp { value: String },

    /// A lease ends `never` while the never-policy is `fatal`.
    #[error("lease {address} has an unbounded end time (ends never)")]
    UnboundedLease { address: String },

    /// Text that is not a dotted-quad address.
    #[error("invalid IPv4 address '{value}'")]
    InvalidAddress { value: String },

    /// A command line or environment setting could not be used.
    #[error("Invalid setting: {0}")]
    InvalidSetting(String),
}

impl AuditError {
    /// Attach the originating file to a parse error.
    pub fn in_file(self, path: impl Into<PathBuf>) -> AuditError {
        AuditError::InFile {
            path: path.into(),
            source: Box::new(self),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AuditError>;
