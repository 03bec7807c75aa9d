//! Configuration options for the [`Encoder`](crate::Encoder).
//!
//! ## Examples
//!
//! ```rust
//! use serde_asv::{Encoder, EncoderOptions};
//!
//! // Reject fields that contain 0x1F or 0x1E instead of corrupting the stream
//! let options = EncoderOptions::new().with_validation(true);
//! let mut encoder = Encoder::with_options(Vec::new(), options);
//! assert!(encoder.write_record(["ok", "bad\x1Ffield"]).is_err());
//! ```

/// Configuration options for ASV encoding.
///
/// The defaults produce the plain wire format with no checks: fields are
/// joined as-is and the pending buffer is drained by every successful flush.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EncoderOptions {
    /// Reject fields containing a reserved delimiter byte.
    pub validate_fields: bool,
    /// Keep already-flushed records buffered, so every flush re-emits them.
    pub retain_after_flush: bool,
}

impl EncoderOptions {
    /// Creates default options (no validation, pending records drained on flush).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_asv::EncoderOptions;
    ///
    /// let options = EncoderOptions::new();
    /// assert!(!options.validate_fields);
    /// assert!(!options.retain_after_flush);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables delimiter validation on [`Encoder::write_record`](crate::Encoder::write_record).
    #[must_use]
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate_fields = validate;
        self
    }

    /// Keeps flushed records in the pending buffer.
    ///
    /// Each subsequent flush writes the whole history again. Only useful when a
    /// consumer depends on that re-emission behavior.
    #[must_use]
    pub fn with_retain_after_flush(mut self, retain: bool) -> Self {
        self.retain_after_flush = retain;
        self
    }
}
