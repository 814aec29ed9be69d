//! Error types for index loading, grid construction and session I/O

use std::fmt;
use std::path::PathBuf;

/// Main error type for all mosaic operations
#[derive(Debug)]
pub enum MosaicError {
    /// Failed to load an image from filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a rendered image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Corpus signature file is missing or cannot be read
    ///
    /// Fatal for session start: without an index there is nothing to match against.
    SignatureFile {
        /// Expected location of the signature file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A signature record does not follow the `<id> <6 hex bytes>` layout
    MalformedRecord {
        /// One-based line number in the signature file
        line: usize,
        /// Description of what's wrong with the record
        reason: String,
    },

    /// The signature file holds no usable entry
    EmptyIndex {
        /// Corpus directory the index was loaded from
        corpus: PathBuf,
    },

    /// Target image doesn't meet grid construction requirements
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Pending weight input does not parse as three positive integers
    MalformedWeights {
        /// Raw buffer content
        input: String,
    },

    /// Mosaic descriptor file is inconsistent
    Descriptor {
        /// Path of the descriptor file
        path: PathBuf,
        /// Description of the inconsistency
        reason: String,
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::SignatureFile { path, source } => {
                write!(
                    f,
                    "Cannot read corpus signature file '{}': {source}",
                    path.display()
                )
            }
            Self::MalformedRecord { line, reason } => {
                write!(f, "Malformed signature record at line {line}: {reason}")
            }
            Self::EmptyIndex { corpus } => {
                write!(f, "Corpus index at '{}' has no entries", corpus.display())
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::MalformedWeights { input } => {
                write!(
                    f,
                    "Weight input '{input}' is not three positive integers"
                )
            }
            Self::Descriptor { path, reason } => {
                write!(
                    f,
                    "Invalid mosaic descriptor '{}': {reason}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } | Self::SignatureFile { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for mosaic results
pub type Result<T> = std::result::Result<T, MosaicError>;

impl From<std::io::Error> for MosaicError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Wrap an I/O error with the path and operation that produced it
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
) -> impl FnOnce(std::io::Error) -> MosaicError {
    let path = path.into();
    move |source| MosaicError::FileSystem {
        path,
        operation,
        source,
    }
}
