//! ASV decoding.
//!
//! The [`Decoder`] pulls records out of any [`std::io::Read`] source. It reads
//! through an internal buffer but accounts for every byte as if the source
//! were consumed one byte at a time: after each record the
//! [offset](Decoder::offset) points just past that record's delimiter.
//!
//! ## Usage
//!
//! ```rust
//! use serde_asv::{Decoder, Record};
//!
//! let input = b"hello\x1Fworld\x1Efoo\x1Fbar";
//! let mut decoder = Decoder::new(&input[..]);
//!
//! let first = decoder.read_record().unwrap();
//! assert_eq!(first, Some(Record::from(["hello", "world"])));
//! assert_eq!(decoder.offset(), 12);
//!
//! let second = decoder.read_record().unwrap();
//! assert_eq!(second, Some(Record::from(["foo", "bar"])));
//!
//! // End of input is not an error
//! assert_eq!(decoder.read_record().unwrap(), None);
//! ```
//!
//! ## Empty input
//!
//! [`Decoder::read_record`] reports end of input straight away on an empty
//! source, while [`Decoder::read_all`] returns one record holding one empty
//! field. Both follow from how each path splits its bytes and existing
//! consumers rely on them.

use crate::delimiter::RECORD_DELIMITER;
use crate::{Record, Result};
use log::{debug, trace};
use serde::de::DeserializeOwned;
use std::io::{BufRead, BufReader, Read};

/// Reads ASV records from a byte source.
///
/// A decoder must not be shared between concurrent callers; wrap it in a
/// lock if you need to.
pub struct Decoder<R> {
    reader: BufReader<R>,
    record: Vec<u8>,
    offset: u64,
}

impl<R: Read> Decoder<R> {
    /// Creates a decoder reading from `reader`, with the offset at 0.
    pub fn new(reader: R) -> Self {
        Decoder {
            reader: BufReader::new(reader),
            record: Vec::new(),
            offset: 0,
        }
    }

    /// Reads the next record.
    ///
    /// Returns `Ok(None)` once the source is exhausted and no bytes are left
    /// over. A final record without a trailing record delimiter is still
    /// returned.
    ///
    /// # Errors
    ///
    /// Any read error from the source other than `Interrupted` is returned
    /// immediately. The decoder should not be used after that.
    pub fn read_record(&mut self) -> Result<Option<Record>> {
        self.record.clear();
        let consumed = match self.reader.read_until(RECORD_DELIMITER, &mut self.record) {
            Ok(n) => n,
            Err(e) => {
                self.offset += self.record.len() as u64;
                return Err(e.into());
            }
        };
        self.offset += consumed as u64;

        if consumed == 0 {
            trace!("end of input at offset {}", self.offset);
            return Ok(None);
        }
        if self.record.last() == Some(&RECORD_DELIMITER) {
            self.record.pop();
        }

        let record = Record::from_bytes(&self.record);
        trace!(
            "decoded record with {} fields, offset {}",
            record.len(),
            self.offset
        );
        Ok(Some(record))
    }

    /// Reads everything left in the source and splits it into records.
    ///
    /// Unlike [`read_record`](Self::read_record), an empty remainder yields a
    /// single record with one empty field, and a trailing record delimiter
    /// produces a final empty record. The offset advances by the number of
    /// bytes read.
    ///
    /// # Errors
    ///
    /// Returns the first read error; no partial result is produced.
    pub fn read_all(&mut self) -> Result<Vec<Record>> {
        let mut data = Vec::new();
        let read = self.reader.read_to_end(&mut data);
        self.offset += data.len() as u64;
        read?;

        let records: Vec<Record> = data
            .split(|&b| b == RECORD_DELIMITER)
            .map(Record::from_bytes)
            .collect();
        debug!(
            "read {} bytes into {} records",
            data.len(),
            records.len()
        );
        Ok(records)
    }

    /// Reads the next record and deserializes it into `T`.
    ///
    /// See [`from_record`](crate::from_record) for how fields map onto `T`.
    ///
    /// # Errors
    ///
    /// Returns read errors as [`read_record`](Self::read_record) does, and
    /// conversion errors from deserialization.
    pub fn deserialize<T>(&mut self) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        match self.read_record()? {
            Some(record) => crate::from_record(&record).map(Some),
            None => Ok(None),
        }
    }

    /// Returns an iterator over the remaining records.
    ///
    /// The iterator stops after end of input or after yielding the first error.
    pub fn records(&mut self) -> Records<'_, R> {
        Records {
            decoder: self,
            done: false,
        }
    }

    /// Number of bytes consumed from the source so far. Performs no I/O.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns a reference to the underlying source.
    pub fn get_ref(&self) -> &R {
        self.reader.get_ref()
    }

    /// Unwraps the source. Bytes already buffered but not yet decoded are lost.
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }
}

/// Iterator returned by [`Decoder::records`].
pub struct Records<'a, R> {
    decoder: &'a mut Decoder<R>,
    done: bool,
}

impl<R: Read> Iterator for Records<'_, R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.decoder.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: Read> std::iter::FusedIterator for Records<'_, R> {}

impl<R> std::fmt::Debug for Decoder<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Decoder")
            .field("offset", &self.offset)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::io;

    /// Fails once its data runs out.
    struct FailingReader {
        data: io::Cursor<Vec<u8>>,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.data.read(buf)? {
                0 => Err(io::Error::new(io::ErrorKind::ConnectionReset, "source went away")),
                n => Ok(n),
            }
        }
    }

    /// Hands out one byte per read call.
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.0.split_first() {
                Some((&b, rest)) if !buf.is_empty() => {
                    buf[0] = b;
                    self.0 = rest;
                    Ok(1)
                }
                _ => Ok(0),
            }
        }
    }

    #[test]
    fn test_trickling_source_matches_offsets() {
        let input = b"hello\x1Fworld\x1Efoo\x1Fbar\x1Ebaz\x1Fqux";
        let mut decoder = Decoder::new(Trickle(input));
        let mut offsets = vec![decoder.offset()];
        while decoder.read_record().unwrap().is_some() {
            offsets.push(decoder.offset());
        }
        assert_eq!(offsets, vec![0, 12, 20, 27]);
    }

    #[test]
    fn test_trailing_delimiter_ends_cleanly() {
        let mut decoder = Decoder::new(&b"a\x1Fb\x1E"[..]);
        assert_eq!(decoder.read_record().unwrap(), Some(Record::from(["a", "b"])));
        assert_eq!(decoder.read_record().unwrap(), None);
        assert_eq!(decoder.offset(), 4);
        // Still exhausted on repeated calls
        assert_eq!(decoder.read_record().unwrap(), None);
        assert_eq!(decoder.offset(), 4);
    }

    #[test]
    fn test_empty_records_between_delimiters() {
        let mut decoder = Decoder::new(&b"\x1E\x1Ex"[..]);
        let records: Vec<Record> = decoder.records().map(|r| r.unwrap()).collect();
        assert_eq!(
            records,
            vec![Record::from([""]), Record::from([""]), Record::from(["x"])]
        );
    }

    #[test]
    fn test_read_error_propagates() {
        let reader = FailingReader {
            data: io::Cursor::new(b"abc".to_vec()),
        };
        let mut decoder = Decoder::new(reader);
        match decoder.read_record() {
            Err(Error::Io { kind, .. }) => assert_eq!(kind, io::ErrorKind::ConnectionReset),
            other => panic!("Expected Io error, got {:?}", other),
        }
        assert_eq!(decoder.offset(), 3);
    }

    #[test]
    fn test_read_all_error_has_no_partial_result() {
        let reader = FailingReader {
            data: io::Cursor::new(b"a\x1Eb".to_vec()),
        };
        let mut decoder = Decoder::new(reader);
        assert!(decoder.read_all().is_err());
    }

    #[test]
    fn test_records_iterator_stops_after_error() {
        let reader = FailingReader {
            data: io::Cursor::new(b"a\x1Eb".to_vec()),
        };
        let mut decoder = Decoder::new(reader);
        let mut iter = decoder.records();
        assert_eq!(iter.next().unwrap().unwrap(), Record::from(["a"]));
        assert!(iter.next().unwrap().is_err());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_read_all_after_read_record() {
        let mut decoder = Decoder::new(&b"a\x1Eb\x1Fc\x1Ed"[..]);
        decoder.read_record().unwrap();
        let rest = decoder.read_all().unwrap();
        assert_eq!(rest, vec![Record::from(["b", "c"]), Record::from(["d"])]);
        assert_eq!(decoder.offset(), 7);
    }

    #[test]
    fn test_bytes_are_not_interpreted() {
        let mut decoder = Decoder::new(&b"\xFF\x00\n\x1F\r,\""[..]);
        let record = decoder.read_record().unwrap().unwrap();
        assert_eq!(record.get(0), Some(&b"\xFF\x00\n"[..]));
        assert_eq!(record.get(1), Some(&b"\r,\""[..]));
    }
}
