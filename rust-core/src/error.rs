//! Error taxonomy for seismogram processing

use thiserror::Error;

/// Errors raised by the processing core
///
/// The first three variants are the numeric kinds every operation can
/// report; `Io` and `Parse` only come from the text readers in [`crate::io`].
#[derive(Error, Debug)]
pub enum ProcessingError {
    /// Malformed input: wrong array count, unknown units, angle out of range
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation incompatible with the current data type or orientation
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Operation would divide by zero or produce empty output
    #[error("numerically degenerate: {0}")]
    NumericDegenerate(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ProcessingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ProcessingError::InvalidState("cannot integrate displacement".into());
        assert_eq!(err.to_string(), "invalid state: cannot integrate displacement");

        let err = ProcessingError::Parse {
            line: 7,
            message: "expected 4 columns".into(),
        };
        assert_eq!(err.to_string(), "parse error on line 7: expected 4 columns");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.bbp");
        let err: ProcessingError = io.into();
        assert!(matches!(err, ProcessingError::Io(_)));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<ProcessingError>();
    }
}
