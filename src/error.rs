use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for image operations
pub type Result<T> = std::result::Result<T, IsoError>;

/// Errors that can occur while building or reading an image
#[derive(Debug, Error)]
pub enum IsoError {
    /// I/O error on the output image; fatal to the build
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid invocation (for example, no input files)
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The output image could not be opened for writing
    #[error("Failed to create image {}: {source}", path.display())]
    OutputCreate {
        /// Output path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// An input file could not be opened or read
    #[error("Unable to open file {}: {source}", path.display())]
    InputOpen {
        /// Input path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A file name does not fit in a directory record
    #[error("Name too long ({len} bytes, max {max}): {name}")]
    NameTooLong {
        /// Offending name (lossy UTF-8)
        name: String,
        /// Name length in bytes
        len: usize,
        /// Maximum accepted length
        max: usize,
    },

    /// A file is too large to be described by a 32-bit data length
    #[error("File too large ({size} bytes): {}", path.display())]
    FileTooLarge {
        /// Input path
        path: PathBuf,
        /// File size in bytes
        size: u64,
    },

    /// Invalid or unrecognized image contents
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Parse error at specific offset
    #[error("Parse error at offset {offset}: {message}")]
    ParseError {
        /// Byte offset where error occurred
        offset: usize,
        /// Error message
        message: String,
    },
}

impl IsoError {
    /// Create a parse error with context
    pub fn parse<S: Into<String>>(offset: usize, message: S) -> Self {
        IsoError::ParseError {
            offset,
            message: message.into(),
        }
    }

    /// Create an invalid format error
    pub fn invalid_format<S: Into<String>>(message: S) -> Self {
        IsoError::InvalidFormat(message.into())
    }

    /// Create an invalid arguments error
    pub fn invalid_arguments<S: Into<String>>(message: S) -> Self {
        IsoError::InvalidArguments(message.into())
    }

    /// Whether this error only affects a single input file.
    ///
    /// Per-file errors are recovered by skipping the file; everything else
    /// aborts the build.
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            IsoError::InputOpen { .. } | IsoError::NameTooLong { .. } | IsoError::FileTooLarge { .. }
        )
    }
}
