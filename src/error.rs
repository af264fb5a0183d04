//! Error types for fixture reading and writing.
//!
//! The error taxonomy mirrors the failure modes of the format:
//!
//! - [`Error::EmptyHandle`]: a handle was constructed with neither a stream
//!   nor a path
//! - [`Error::ClosedHandle`]: an operation was attempted after `close()`
//! - [`Error::Read`]: malformed fixture data, or an I/O failure while
//!   reading or seeking
//! - [`Error::Write`]: an I/O failure while writing, or a row that cannot
//!   be projected onto the fixed column set
//!
//! Read and write errors carry the filesystem path of the handle when one
//! is known, plus the underlying [`Cause`] when there is one. Scalar syntax
//! problems surface as [`ScalarError`] wrapped in `Cause::Parse`.
//!
//! ## Examples
//!
//! ```rust
//! use fixie::{read_str, Error};
//!
//! let result = read_str("data: [\n[qux, doom\n]");
//! assert!(matches!(result, Err(Error::Read { .. })));
//! ```

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// All errors that can occur while reading or writing fixture data.
#[derive(Debug, Error)]
pub enum Error {
    /// Neither a stream nor a path was supplied at construction.
    #[error("neither a stream nor a path was supplied for the handle")]
    EmptyHandle,

    /// An operation was attempted on a handle after `close()`.
    #[error("handle for {} is closed", display_path(.path))]
    ClosedHandle {
        /// The filesystem path, if known.
        path: Option<PathBuf>,
    },

    /// Fixture data could not be read.
    #[error("unable to read fixture data from {}", display_path(.path))]
    Read {
        /// The filesystem path, if known.
        path: Option<PathBuf>,
        /// The underlying failure, if any.
        #[source]
        cause: Option<Cause>,
    },

    /// Fixture data could not be written.
    #[error("unable to write fixture data to {}", display_path(.path))]
    Write {
        /// The filesystem path, if known.
        path: Option<PathBuf>,
        /// The underlying failure, if any.
        #[source]
        cause: Option<Cause>,
    },
}

/// The underlying cause of a read or write error.
#[derive(Debug, Error)]
pub enum Cause {
    /// An I/O failure on the underlying stream.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// A scalar or sequence fragment could not be parsed.
    #[error(transparent)]
    Parse(#[from] ScalarError),

    /// A structural violation of the fixture grammar.
    #[error("{0}")]
    Structure(String),
}

/// A syntax error in a single inline scalar or sequence fragment.
///
/// Produced by the scalar codec; the offset is a byte position within the
/// fragment that was being parsed, not within the whole document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid scalar syntax at offset {offset}: {message}")]
pub struct ScalarError {
    /// Byte offset into the fragment where parsing failed.
    pub offset: usize,
    /// Description of the problem.
    pub message: String,
}

impl ScalarError {
    pub(crate) fn new(offset: usize, message: impl Into<String>) -> Self {
        ScalarError {
            offset,
            message: message.into(),
        }
    }
}

impl Error {
    /// Creates a `ClosedHandle` error for the given path.
    #[must_use]
    pub fn closed(path: Option<&Path>) -> Self {
        Error::ClosedHandle {
            path: path.map(Path::to_path_buf),
        }
    }

    /// Creates a `Read` error with an underlying cause.
    #[must_use]
    pub fn read(path: Option<&Path>, cause: impl Into<Cause>) -> Self {
        Error::Read {
            path: path.map(Path::to_path_buf),
            cause: Some(cause.into()),
        }
    }

    /// Creates a `Read` error describing a structural violation.
    #[must_use]
    pub fn read_structure(path: Option<&Path>, message: impl Into<String>) -> Self {
        Error::Read {
            path: path.map(Path::to_path_buf),
            cause: Some(Cause::Structure(message.into())),
        }
    }

    /// Creates a `Write` error with an underlying cause.
    #[must_use]
    pub fn write(path: Option<&Path>, cause: impl Into<Cause>) -> Self {
        Error::Write {
            path: path.map(Path::to_path_buf),
            cause: Some(cause.into()),
        }
    }

    /// Creates a `Write` error describing a row that cannot be projected.
    #[must_use]
    pub fn write_structure(path: Option<&Path>, message: impl Into<String>) -> Self {
        Error::Write {
            path: path.map(Path::to_path_buf),
            cause: Some(Cause::Structure(message.into())),
        }
    }

    /// The filesystem path associated with the failing handle, if known.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Error::EmptyHandle => None,
            Error::ClosedHandle { path }
            | Error::Read { path, .. }
            | Error::Write { path, .. } => path.as_deref(),
        }
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!("file '{}'", path.display()),
        None => "stream".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, Error>;
