//! Error types for gridbatch core.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur anywhere in the load / execute / save pipeline.
///
/// Each variant maps to one process exit code; see
/// [`GridbatchError::exit_code`].
#[derive(Error, Debug)]
pub enum GridbatchError {
    #[error("missing required arguments")]
    MissingArgs,

    #[error("invalid delimiter set {0:?}")]
    InvalidDelimiter(String),

    #[error("cannot open {}: {source}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("allocation failed")]
    AllocationFailed,

    #[error("internal invariant violated: {0}")]
    Internal(String),

    #[error("invalid argument {argument:?} for {function}")]
    BadArgument {
        function: &'static str,
        argument: String,
    },

    #[error("value out of range: {0}")]
    InvalidValue(String),

    #[error("malformed command: {0}")]
    BadCommand(String),

    #[error("malformed selector: {0}")]
    BadSelector(String),

    #[error("cannot convert {0:?} to a number")]
    NumericConversion(String),
}

impl GridbatchError {
    /// Process exit code reported for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            GridbatchError::MissingArgs => 1,
            GridbatchError::InvalidDelimiter(_) => 2,
            GridbatchError::FileOpen { .. } => 3,
            GridbatchError::AllocationFailed => 4,
            GridbatchError::Internal(_) => 5,
            GridbatchError::BadArgument { .. } => 6,
            GridbatchError::InvalidValue(_) => 7,
            GridbatchError::BadCommand(_) => 8,
            GridbatchError::BadSelector(_) => 9,
            GridbatchError::NumericConversion(_) => 10,
        }
    }
}

pub type Result<T> = std::result::Result<T, GridbatchError>;
