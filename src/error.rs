//! Error types for signing, verification, and marker removal.
//!
//! Every failure that touches the file system carries the offending path so
//! callers can report it without extra bookkeeping:
//!
//! ```
//! use filesigner::error::{ErrorKind, SignerError};
//! use std::path::PathBuf;
//!
//! fn describe(err: &SignerError) -> &'static str {
//!     match err.kind() {
//!         ErrorKind::NotFound => "pick another file",
//!         ErrorKind::Encoding => "only UTF-8 text can be signed",
//!         ErrorKind::Io | ErrorKind::Config => "see the log for details",
//!     }
//! }
//!
//! let err = SignerError::NotFound {
//!     path: PathBuf::from("missing.py"),
//! };
//! assert_eq!(describe(&err), "pick another file");
//! ```
//!
//! An unsigned or tampered file is NOT an error: those are ordinary
//! [`VerificationOutcome`](crate::integrity::VerificationOutcome) values.

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for filesigner operations.
#[derive(Debug)]
pub enum SignerError {
    /// Path does not resolve to an existing regular file
    NotFound { path: PathBuf },

    /// File content is not valid UTF-8
    Encoding {
        path: PathBuf,
        source: std::str::Utf8Error,
    },

    /// Read or write failure (permissions, disk full, ...)
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Invalid user configuration
    Config(String),
}

/// Fieldless error category, for callers that only branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Encoding,
    Io,
    Config,
}

impl SignerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Encoding { .. } => ErrorKind::Encoding,
            Self::Io { .. } => ErrorKind::Io,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// The file the error refers to, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::NotFound { path } | Self::Encoding { path, .. } | Self::Io { path, .. } => {
                Some(path)
            }
            Self::Config(_) => None,
        }
    }

    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl fmt::Display for SignerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => write!(f, "File not found: {}", path.display()),
            Self::Encoding { path, source } => {
                write!(f, "File is not valid UTF-8: {} ({source})", path.display())
            }
            Self::Io { path, source } => write!(f, "I/O error on {}: {source}", path.display()),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for SignerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Encoding { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::NotFound { .. } | Self::Config(_) => None,
        }
    }
}

/// Result type alias for filesigner operations.
pub type Result<T> = std::result::Result<T, SignerError>;
