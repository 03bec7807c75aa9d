//! The two reserved control bytes of the ASV format.
//!
//! ```rust
//! use serde_asv::{FIELD_DELIMITER, RECORD_DELIMITER};
//!
//! assert_eq!(FIELD_DELIMITER, 0x1F);
//! assert_eq!(RECORD_DELIMITER, 0x1E);
//! ```

/// ASCII Unit Separator. Separates fields within a record.
pub const FIELD_DELIMITER: u8 = 0x1F;

/// ASCII Record Separator. Separates records within a stream.
pub const RECORD_DELIMITER: u8 = 0x1E;

/// Returns `true` if `byte` is one of the two reserved delimiters.
#[inline]
#[must_use]
pub const fn is_delimiter(byte: u8) -> bool {
    byte == FIELD_DELIMITER || byte == RECORD_DELIMITER
}

/// Returns the position and value of the first reserved byte in `bytes`.
#[inline]
#[must_use]
pub fn find_delimiter(bytes: &[u8]) -> Option<(usize, u8)> {
    bytes
        .iter()
        .position(|&b| is_delimiter(b))
        .map(|pos| (pos, bytes[pos]))
}
