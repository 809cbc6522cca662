//! Error types for packaging operations.

use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `PackagingError`.
pub type Result<T> = std::result::Result<T, PackagingError>;

/// Errors that can occur while packaging a build output tree.
#[derive(Error, Debug)]
pub enum PackagingError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory enumeration failed (including a missing source root).
    #[error("cannot walk {path}: {source}")]
    Walk {
        /// Path the walker was visiting when it failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The ZIP writer rejected an operation.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// A path cannot be represented as an archive entry name.
    #[error("path is not valid UTF-8: {path}")]
    NonUtf8Path {
        /// The offending path.
        path: PathBuf,
    },

    /// Two source files map to the same entry name after renaming.
    #[error("duplicate archive entry {name}: {first} and {second}")]
    DuplicateEntry {
        /// The colliding entry name.
        name: String,
        /// File that claimed the name first.
        first: PathBuf,
        /// File that collided with it.
        second: PathBuf,
    },

    /// Compression level outside the supported range.
    #[error("invalid compression level {level}, expected 1-9")]
    InvalidCompressionLevel {
        /// The rejected level.
        level: u8,
    },

    /// Packaging request is incomplete or contradictory.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// What is wrong with the request.
        reason: String,
    },
}

impl PackagingError {
    /// Returns `true` if the error was caused by a missing file or directory.
    ///
    /// # Examples
    ///
    /// ```
    /// use distpack_core::PackagingError;
    /// use std::io;
    ///
    /// let err = PackagingError::Io(io::Error::from(io::ErrorKind::NotFound));
    /// assert!(err.is_not_found());
    ///
    /// let err = PackagingError::InvalidCompressionLevel { level: 0 };
    /// assert!(!err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Io(e) | Self::Walk { source: e, .. } => e.kind() == std::io::ErrorKind::NotFound,
            Self::Zip(zip::result::ZipError::Io(e)) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }

    /// Returns the filesystem path associated with this error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Walk { path, .. }
            | Self::NonUtf8Path { path }
            | Self::DuplicateEntry { second: path, .. } => Some(path),
            _ => None,
        }
    }
}

impl From<walkdir::Error> for PackagingError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(Path::to_path_buf).unwrap_or_default();
        let source = err
            .into_io_error()
            .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
        Self::Walk { path, source }
    }
}
