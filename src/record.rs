//! The in-memory record type.
//!
//! A [`Record`] is an ordered list of fields, each an arbitrary byte string.
//! The codec never interprets field bytes; helpers for UTF-8 access are
//! provided for convenience.
//!
//! ```rust
//! use serde_asv::Record;
//!
//! let record = Record::from(vec!["hello", "world"]);
//! assert_eq!(record.len(), 2);
//! assert_eq!(record.get_str(1), Some("world"));
//! assert_eq!(record.as_bytes(), b"hello\x1Fworld");
//! ```

use crate::delimiter::{find_delimiter, FIELD_DELIMITER};
use crate::{Error, Result};
use std::fmt;

/// An ordered sequence of byte-string fields.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Record {
    fields: Vec<Vec<u8>>,
}

impl Record {
    /// Creates a record with zero fields.
    ///
    /// A zero-field record encodes to zero bytes, which decodes back as one
    /// empty field.
    #[must_use]
    pub fn new() -> Self {
        Record { fields: Vec::new() }
    }

    /// Splits the bytes of one record on the field delimiter.
    ///
    /// The result always has `count(0x1F) + 1` fields, so an empty slice
    /// yields a single empty field.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Record {
            fields: bytes
                .split(|&b| b == FIELD_DELIMITER)
                .map(<[u8]>::to_vec)
                .collect(),
        }
    }

    /// Joins the fields with the field delimiter.
    #[must_use]
    pub fn as_bytes(&self) -> Vec<u8> {
        join_fields(&self.fields)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` for a record with no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the raw bytes of field `index`.
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        self.fields.get(index).map(Vec::as_slice)
    }

    /// Returns field `index` as text, or `None` if it is missing or not UTF-8.
    pub fn get_str(&self, index: usize) -> Option<&str> {
        self.get(index).and_then(|f| std::str::from_utf8(f).ok())
    }

    /// Appends a field, copying its bytes.
    ///
    /// ```rust
    /// use serde_asv::Record;
    ///
    /// let mut record = Record::new();
    /// record.push_field("id");
    /// record.push_field([0xFFu8]);
    /// assert_eq!(record.len(), 2);
    /// assert_eq!(record.iter().last(), Some(&[0xFFu8][..]));
    /// assert_eq!(record.into_fields(), vec![b"id".to_vec(), vec![0xFF]]);
    /// ```
    pub fn push_field<T: AsRef<[u8]>>(&mut self, field: T) {
        self.fields.push(field.as_ref().to_vec());
    }

    /// Iterates over the raw field bytes in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[u8]> + '_ {
        self.fields.iter().map(Vec::as_slice)
    }

    /// Consumes the record, returning its fields.
    pub fn into_fields(self) -> Vec<Vec<u8>> {
        self.fields
    }

    /// Converts every field to a `String`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidField`] naming the first field that is not valid UTF-8.
    pub fn to_strings(&self) -> Result<Vec<String>> {
        self.fields
            .iter()
            .enumerate()
            .map(|(i, f)| {
                String::from_utf8(f.clone()).map_err(|e| Error::invalid_field(i, e.utf8_error()))
            })
            .collect()
    }

    /// Converts every field to a `String`, replacing invalid UTF-8 sequences.
    pub fn to_strings_lossy(&self) -> Vec<String> {
        self.fields
            .iter()
            .map(|f| String::from_utf8_lossy(f).into_owned())
            .collect()
    }

    /// Checks that no field contains a reserved delimiter byte.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DelimiterInField`] for the first offending field.
    pub fn validate(&self) -> Result<()> {
        validate_fields(0, self.iter())
    }
}

pub(crate) fn join_fields<I, T>(fields: I) -> Vec<u8>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let mut out = Vec::new();
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            out.push(FIELD_DELIMITER);
        }
        out.extend_from_slice(field.as_ref());
    }
    out
}

pub(crate) fn validate_fields<I, T>(record: usize, fields: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    for (i, field) in fields.into_iter().enumerate() {
        if let Some((_, byte)) = find_delimiter(field.as_ref()) {
            return Err(Error::delimiter_in_field(record, i, byte));
        }
    }
    Ok(())
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.fields.iter().map(|b| String::from_utf8_lossy(b)))
            .finish()
    }
}

impl<T: AsRef<[u8]>> From<Vec<T>> for Record {
    fn from(fields: Vec<T>) -> Self {
        fields.into_iter().collect()
    }
}

impl<T: AsRef<[u8]>, const N: usize> From<[T; N]> for Record {
    fn from(fields: [T; N]) -> Self {
        fields.into_iter().collect()
    }
}

impl<T: AsRef<[u8]>> FromIterator<T> for Record {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Record {
            fields: iter.into_iter().map(|f| f.as_ref().to_vec()).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = &'a [u8];
    type IntoIter = std::iter::Map<std::slice::Iter<'a, Vec<u8>>, fn(&'a Vec<u8>) -> &'a [u8]>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields
            .iter()
            .map(Vec::as_slice as fn(&'a Vec<u8>) -> &'a [u8])
    }
}

impl IntoIterator for Record {
    type Item = Vec<u8>;
    type IntoIter = std::vec::IntoIter<Vec<u8>>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_field_count() {
        assert_eq!(Record::from_bytes(b"").len(), 1);
        assert_eq!(Record::from_bytes(b"\x1F").len(), 2);
        assert_eq!(Record::from_bytes(b"a\x1Fb\x1Fc").len(), 3);
        assert_eq!(Record::from_bytes(b"\x1F"), Record::from(vec!["", ""]));
    }

    #[test]
    fn test_zero_fields_join_to_nothing() {
        assert!(Record::new().as_bytes().is_empty());
        assert!(join_fields(Vec::<&[u8]>::new()).is_empty());
    }

    #[test]
    fn test_non_utf8_field() {
        let record = Record::from(vec![&b"ok"[..], &[0xFF, 0xFE][..]]);
        assert_eq!(record.get_str(0), Some("ok"));
        assert_eq!(record.get_str(1), None);
        assert!(matches!(
            record.to_strings(),
            Err(Error::InvalidField { field: 1, .. })
        ));
        assert_eq!(record.to_strings_lossy()[1], "\u{FFFD}\u{FFFD}");
    }

    #[test]
    fn test_validate() {
        assert!(Record::from(["a", "b"]).validate().is_ok());
        assert_eq!(
            Record::from(["a", "b\x1Ec"]).validate(),
            Err(Error::delimiter_in_field(0, 1, 0x1E))
        );
    }

    #[test]
    fn test_debug_is_readable() {
        let record = Record::from(["hello", "world"]);
        assert_eq!(format!("{:?}", record), r#"["hello", "world"]"#);
    }
}
