//! Error types for ASV encoding and decoding.
//!
//! ## Error Categories
//!
//! - **I/O Errors**: failures reported by the underlying reader or writer
//! - **Short Writes**: the sink accepted fewer bytes than a flush asked it to
//! - **Delimiter Collisions**: a field contains `0x1F` or `0x1E` (only when
//!   validation is enabled, see [`EncoderOptions`](crate::EncoderOptions))
//! - **Serde Errors**: a value has no single-record shape, or a field could
//!   not be parsed into the requested type
//!
//! Running out of records is not an error: [`Decoder::read_record`] returns
//! `Ok(None)` at end of input.
//!
//! [`Decoder::read_record`]: crate::Decoder::read_record
//!
//! ## Examples
//!
//! ```rust
//! use serde_asv::Error;
//!
//! let err = Error::short_write(12, 5, "sink accepted no more bytes");
//! assert!(err.to_string().contains("expected to write 12 bytes"));
//! assert!(err.to_string().contains("wrote 5"));
//! ```

use std::fmt;
use std::io;
use thiserror::Error;

/// Represents all possible errors that can occur while encoding or decoding ASV data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {msg}")]
    Io { kind: io::ErrorKind, msg: String },

    /// A flush could not hand every byte to the sink
    #[error("short write: expected to write {expected} bytes but wrote {actual}: {reason}")]
    ShortWrite {
        expected: usize,
        actual: usize,
        reason: String,
    },

    /// A field contains one of the reserved delimiter bytes
    ///
    /// `record` is the record's position within a batch passed to
    /// [`Encoder::write_all`](crate::Encoder::write_all), and 0 otherwise.
    #[error("record {record}, field {field} contains reserved delimiter byte 0x{byte:02X}")]
    DelimiterInField { record: usize, field: usize, byte: u8 },

    /// A field could not be converted to the requested type
    #[error("invalid field {field}: {msg}")]
    InvalidField { field: usize, msg: String },

    /// Unsupported type for the record model
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a short-write error describing expected vs. actual byte counts.
    pub fn short_write(expected: usize, actual: usize, reason: &str) -> Self {
        Error::ShortWrite {
            expected,
            actual,
            reason: reason.to_string(),
        }
    }

    /// Creates a delimiter-collision error for field `field` of record `record`.
    pub fn delimiter_in_field(record: usize, field: usize, byte: u8) -> Self {
        Error::DelimiterInField {
            record,
            field,
            byte,
        }
    }

    /// Creates an invalid-field error for the zero-based field index `field`.
    pub fn invalid_field<T: fmt::Display>(field: usize, msg: T) -> Self {
        Error::InvalidField {
            field,
            msg: msg.to_string(),
        }
    }

    /// Creates an unsupported type error for values that have no record representation.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Returns `true` for errors raised by the underlying stream.
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io { .. } | Error::ShortWrite { .. })
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io {
            kind: err.kind(),
            msg: err.to_string(),
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_conversion_keeps_kind() {
        let err: Error = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed").into();
        match &err {
            Error::Io { kind, msg } => {
                assert_eq!(*kind, io::ErrorKind::BrokenPipe);
                assert!(msg.contains("pipe closed"));
            }
            other => panic!("Expected Io, got {:?}", other),
        }
        assert!(err.is_io());
    }

    #[test]
    fn test_delimiter_message_is_hex() {
        let err = Error::delimiter_in_field(3, 2, 0x1E);
        assert_eq!(
            err.to_string(),
            "record 3, field 2 contains reserved delimiter byte 0x1E"
        );
        assert!(!err.is_io());
    }
}
