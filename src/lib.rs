//! # serde_asv
//!
//! A streaming codec for ASCII-separated values (ASV): sequences of records,
//! each an ordered list of byte-string fields.
//!
//! ## The format
//!
//! - Fields are separated by the Unit Separator, byte `0x1F`
//! - Records are separated by the Record Separator, byte `0x1E`
//! - The last record may omit its trailing `0x1E`
//! - Nothing is escaped or quoted, and field bytes are never interpreted
//!
//! ```text
//! hello 0x1F world 0x1E foo 0x1F bar
//! ```
//!
//! Field contents must not contain either delimiter byte. The encoder does
//! not check this unless asked to (see [`EncoderOptions::with_validation`]).
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_asv::{Decoder, Encoder, Record};
//!
//! let mut encoder = Encoder::new(Vec::new());
//! encoder.write_all([["hello", "world"], ["foo", "bar"]]).unwrap();
//! let bytes = encoder.into_inner();
//! assert_eq!(bytes, b"hello\x1Fworld\x1Efoo\x1Fbar");
//!
//! let mut decoder = Decoder::new(&bytes[..]);
//! let records = decoder.read_all().unwrap();
//! assert_eq!(records, vec![Record::from(["hello", "world"]), Record::from(["foo", "bar"])]);
//! ```
//!
//! ### Typed records with Serde
//!
//! Flat structs and tuples map onto one record, field by field:
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_asv::{Decoder, Encoder};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Quote { symbol: String, bid: f64, ask: f64 }
//!
//! let mut encoder = Encoder::new(Vec::new());
//! encoder.serialize(&Quote { symbol: "ACME".into(), bid: 9.5, ask: 10.0 }).unwrap();
//! encoder.flush();
//! let bytes = encoder.into_inner();
//!
//! let mut decoder = Decoder::new(&bytes[..]);
//! let quote: Option<Quote> = decoder.deserialize().unwrap();
//! assert_eq!(quote.unwrap().symbol, "ACME");
//! ```
//!
//! ## Edge cases
//!
//! - [`Decoder::read_record`] returns `Ok(None)` on empty input, while
//!   [`Decoder::read_all`] returns one record with one empty field
//! - A record with zero fields encodes to zero bytes and decodes as one
//!   empty field
//! - [`Encoder::flush`] stores its error instead of returning it; query it with
//!   [`Encoder::error`]
//!
//! ## Logging
//!
//! The crate emits `trace`/`debug`/`warn` events through the [`log`] facade
//! and never installs a logger itself.

pub mod de;
pub mod decode;
pub mod delimiter;
pub mod encode;
pub mod error;
pub mod macros;
pub mod options;
pub mod record;
pub mod ser;

pub use decode::{Decoder, Records};
pub use delimiter::{FIELD_DELIMITER, RECORD_DELIMITER};
pub use encode::Encoder;
pub use error::{Error, Result};
pub use options::EncoderOptions;
pub use record::Record;

use serde::{Deserialize, Serialize};
use std::io;

/// Encodes records into a byte vector.
///
/// Records are joined with the record delimiter, without a trailing one.
///
/// # Examples
///
/// ```rust
/// let bytes = serde_asv::to_vec([["a", "b"], ["c", "d"]]);
/// assert_eq!(bytes, b"a\x1Fb\x1Ec\x1Fd");
/// ```
#[must_use]
pub fn to_vec<I, R, T>(records: I) -> Vec<u8>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    records
        .into_iter()
        .map(record::join_fields)
        .collect::<Vec<_>>()
        .join(&RECORD_DELIMITER)
}

/// Encodes records to a writer and flushes it.
///
/// # Errors
///
/// Returns the write or flush failure, if any.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, I, R, T>(writer: W, records: I) -> Result<()>
where
    W: io::Write,
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    Encoder::new(writer).write_all(records)
}

/// Splits a complete ASV buffer into records.
///
/// Behaves like [`Decoder::read_all`]: empty input gives one record with one
/// empty field.
///
/// # Examples
///
/// ```rust
/// use serde_asv::{from_slice, Record};
///
/// let records = from_slice(b"hello\x1Fworld\x1Efoo\x1Fbar");
/// assert_eq!(records[1], Record::from(["foo", "bar"]));
/// assert_eq!(from_slice(b""), vec![Record::from([""])]);
/// ```
#[must_use]
pub fn from_slice(bytes: &[u8]) -> Vec<Record> {
    bytes
        .split(|&b| b == RECORD_DELIMITER)
        .map(Record::from_bytes)
        .collect()
}

/// Reads every record from `reader`.
///
/// # Errors
///
/// Returns the first read error from the reader.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(reader: R) -> Result<Vec<Record>>
where
    R: io::Read,
{
    Decoder::new(reader).read_all()
}

/// Converts a flat `T: Serialize` into one record.
///
/// # Examples
///
/// ```rust
/// use serde_asv::{to_record, Record};
///
/// let record = to_record(&("id", 7, Some(true))).unwrap();
/// assert_eq!(record, Record::from(["id", "7", "true"]));
/// ```
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] for maps, nested compounds and enum
/// variants that carry data.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_record<T>(value: &T) -> Result<Record>
where
    T: ?Sized + Serialize,
{
    let mut serializer = ser::Serializer::new();
    value.serialize(&mut serializer)?;
    Ok(serializer.into_inner())
}

/// Deserializes an instance of `T` from the fields of one record.
///
/// # Errors
///
/// Returns [`Error::InvalidField`] naming the first field that fails to parse,
/// or a custom error when the field count does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_record<'de, T>(record: &'de Record) -> Result<T>
where
    T: Deserialize<'de>,
{
    T::deserialize(de::Deserializer::new(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Reading {
        sensor: String,
        celsius: f32,
        ok: bool,
    }

    #[test]
    fn test_to_vec_from_slice() {
        let records = vec![record!["x", "y"], record![""], record!["z"]];
        let bytes = to_vec(&records);
        assert_eq!(bytes, b"x\x1Fy\x1E\x1Ez");
        assert_eq!(from_slice(&bytes), records);
    }

    #[test]
    fn test_to_writer_from_reader() {
        let mut out = Vec::new();
        to_writer(&mut out, [["1", "2"], ["3", "4"]]).unwrap();
        let records = from_reader(&out[..]).unwrap();
        assert_eq!(records, vec![record!["1", "2"], record!["3", "4"]]);
    }

    #[test]
    fn test_serialize_deserialize_reading() {
        let reading = Reading {
            sensor: "north-3".to_string(),
            celsius: -4.25,
            ok: true,
        };
        let record = to_record(&reading).unwrap();
        assert_eq!(record, record!["north-3", "-4.25", "true"]);
        let back: Reading = from_record(&record).unwrap();
        assert_eq!(back, reading);
    }
}
