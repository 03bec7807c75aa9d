//! ASV encoding.
//!
//! The [`Encoder`] buffers serialized records in memory and hands them to
//! the sink only on [`flush`](Encoder::flush). Records are joined with the
//! record delimiter; no trailing delimiter is written after the last one.
//!
//! ## Usage
//!
//! ```rust
//! use serde_asv::Encoder;
//!
//! let mut encoder = Encoder::new(Vec::new());
//! encoder.write_record(["hello", "world"]).unwrap();
//! encoder.write_record(["foo", "bar"]).unwrap();
//! encoder.flush();
//!
//! assert!(encoder.error().is_none());
//! assert_eq!(encoder.into_inner(), b"hello\x1Fworld\x1Efoo\x1Fbar");
//! ```
//!
//! ## Errors from flush
//!
//! [`Encoder::flush`] does not return its failure. The error is kept in a
//! sticky slot, overwritten only by a later failure, and read back with
//! [`Encoder::error`]. [`Encoder::write_all`] is the exception: it returns
//! the outcome of its own flush.
//!
//! A flush that fails part way keeps the bytes the sink did not accept. The
//! next flush writes that tail first, so a sink that recovers receives the
//! stream exactly once. The records of the failed flush no longer count as
//! pending; [`Encoder::unsent_len`] reports the size of the tail.

use crate::delimiter::RECORD_DELIMITER;
use crate::record::{join_fields, validate_fields};
use crate::{EncoderOptions, Error, Result};
use log::{debug, trace, warn};
use serde::Serialize;
use std::io::{self, Write};

/// Writes ASV records to a byte sink.
///
/// Nothing reaches the sink until [`flush`](Self::flush) or
/// [`write_all`](Self::write_all) is called; dropping an encoder discards
/// anything still pending.
pub struct Encoder<W> {
    writer: W,
    pending: Vec<Vec<u8>>,
    unsent: Vec<u8>,
    error: Option<Error>,
    options: EncoderOptions,
}

impl<W: Write> Encoder<W> {
    /// Creates an encoder with default options.
    pub fn new(writer: W) -> Self {
        Self::with_options(writer, EncoderOptions::default())
    }

    /// Creates an encoder that writes to `writer` using `options`.
    pub fn with_options(writer: W, options: EncoderOptions) -> Self {
        Encoder {
            writer,
            pending: Vec::new(),
            unsent: Vec::new(),
            error: None,
            options,
        }
    }

    /// Serializes one record into the pending buffer. No I/O happens.
    ///
    /// Fields are joined with the field delimiter as-is. A record with no
    /// fields contributes an empty segment.
    ///
    /// # Errors
    ///
    /// Only fails when [`EncoderOptions::validate_fields`] is set and a field
    /// contains a reserved delimiter byte; the record is then not buffered.
    pub fn write_record<I, T>(&mut self, record: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        self.buffer_record(0, record)
    }

    /// Serializes `value` as one record. See [`to_record`](crate::to_record).
    ///
    /// # Errors
    ///
    /// Returns serialization errors and, with validation enabled, delimiter
    /// collisions.
    pub fn serialize<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let record = crate::to_record(value)?;
        self.write_record(&record)
    }

    /// Buffers every record, then flushes.
    ///
    /// The batch is all or nothing: when a record fails validation, the
    /// records of this batch buffered before it are dropped again and nothing
    /// is written.
    ///
    /// # Errors
    ///
    /// Returns the error produced by this flush (also stored in the sticky
    /// slot), or the first validation error. A validation error names the
    /// record's position within `records`.
    pub fn write_all<I, R, T>(&mut self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let start = self.pending.len();
        for (i, record) in records.into_iter().enumerate() {
            if let Err(e) = self.buffer_record(i, record) {
                self.pending.truncate(start);
                return Err(e);
            }
        }
        self.flush_pending()
    }

    /// Writes all pending records to the sink and flushes it.
    ///
    /// Failures are stored and reported by [`error`](Self::error). The pending
    /// buffer is cleared unless [`EncoderOptions::retain_after_flush`] is set;
    /// bytes the sink refused are kept and written first by the next flush.
    pub fn flush(&mut self) {
        // The outcome is kept in `self.error`.
        let _ = self.flush_pending();
    }

    /// Returns the most recent flush error, if any flush has failed.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Takes the stored flush error, clearing the slot.
    pub fn take_error(&mut self) -> Option<Error> {
        self.error.take()
    }

    /// Number of records waiting for the next flush.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Number of bytes left over from a failed flush. The next flush writes
    /// them before any pending record.
    pub fn unsent_len(&self) -> usize {
        self.unsent.len()
    }

    /// Returns the options this encoder was built with.
    pub fn options(&self) -> &EncoderOptions {
        &self.options
    }

    /// Returns a reference to the underlying sink.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Unwraps the sink without flushing.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn buffer_record<I, T>(&mut self, index: usize, record: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let fields: Vec<T> = record.into_iter().collect();
        if self.options.validate_fields {
            validate_fields(index, &fields)?;
        }
        let bytes = join_fields(&fields);
        trace!(
            "buffered record with {} fields ({} bytes)",
            fields.len(),
            bytes.len()
        );
        self.pending.push(bytes);
        Ok(())
    }

    fn flush_pending(&mut self) -> Result<()> {
        let mut payload = std::mem::take(&mut self.unsent);
        let resumed = payload.len();
        if !self.pending.is_empty() {
            if resumed > 0 {
                payload.push(RECORD_DELIMITER);
            }
            payload.extend_from_slice(&self.pending.join(&RECORD_DELIMITER));
        }

        let records = self.pending.len();
        let mut written = 0;
        let result = self.write_payload(&payload, &mut written);
        // Every record of this payload now lives in the sink or in `unsent`
        if !self.options.retain_after_flush {
            self.pending.clear();
        }

        match result {
            Ok(()) => {
                debug!(
                    "flushed {} records ({} bytes, {} resumed)",
                    records,
                    payload.len(),
                    resumed
                );
                Ok(())
            }
            Err(e) => {
                warn!(
                    "flush failed after {} of {} bytes: {}",
                    written,
                    payload.len(),
                    e
                );
                self.unsent = payload.split_off(written);
                self.error = Some(e.clone());
                Err(e)
            }
        }
    }

    fn write_payload(&mut self, payload: &[u8], written: &mut usize) -> Result<()> {
        if payload.is_empty() {
            return Ok(());
        }

        let expected = payload.len();
        while *written < expected {
            match self.writer.write(&payload[*written..]) {
                Ok(0) => {
                    return Err(Error::short_write(
                        expected,
                        *written,
                        "sink accepted no more bytes",
                    ))
                }
                Ok(n) => *written += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(Error::short_write(expected, *written, &e.to_string())),
            }
        }
        self.writer.flush()?;
        Ok(())
    }
}

impl<W> std::fmt::Debug for Encoder<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Encoder")
            .field("pending", &self.pending.len())
            .field("unsent", &self.unsent.len())
            .field("error", &self.error)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
