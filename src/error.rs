//! # Error Types
//!
//! This module defines the error types used throughout the library.
//!
//! Failures are split by how far a sentence got through the pipeline:
//! [`ValidationError`] for framing and checksum problems, [`DecodeError`] for
//! field-level problems in an otherwise valid sentence, and [`SessionError`]
//! for transport failures that end a reading session. Reassembly itself
//! cannot fail, so there is no framing error type.

use std::time::Duration;

/// A sentence was rejected by the validator.
///
/// Every variant carries the offending raw text so it can be reported
/// without keeping the original chunk around.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The sentence does not start with the `$GP` talker.
    #[error("sentence does not start with `$GP`: {raw:?}")]
    BadTalker {
        /// The rejected sentence
        raw: String,
    },

    /// The sentence exceeds the maximum sentence length.
    #[error("sentence is {len} characters long, the maximum is {max}: {raw:?}")]
    TooLong {
        /// The rejected sentence
        raw: String,
        /// Length of the sentence
        len: usize,
        /// Configured maximum length
        max: usize,
    },

    /// There is no `*` or nothing follows it.
    #[error("sentence has no checksum: {raw:?}")]
    MissingChecksum {
        /// The rejected sentence
        raw: String,
    },

    /// The declared checksum does not match the data.
    #[error("checksum is {found:?} but calculated {expected:02x}: {raw:?}")]
    ChecksumMismatch {
        /// The rejected sentence
        raw: String,
        /// The checksum calculated from the sentence content
        expected: u8,
        /// The checksum text found after the `*`
        found: String,
    },
}

impl ValidationError {
    /// Returns the raw sentence that failed validation.
    pub fn raw(&self) -> &str {
        match self {
            ValidationError::BadTalker { raw }
            | ValidationError::TooLong { raw, .. }
            | ValidationError::MissingChecksum { raw }
            | ValidationError::ChecksumMismatch { raw, .. } => raw,
        }
    }
}

/// A validated sentence could not be decoded into a record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The sentence has fewer fields than its grammar requires.
    #[error("{sentence_type} needs at least {expected} fields, found {found}")]
    ShortFieldList {
        /// Three-letter sentence type
        sentence_type: &'static str,
        /// Minimum number of fields, counting the address field
        expected: usize,
        /// Number of fields present
        found: usize,
    },

    /// A satellite ID is outside every known constellation range.
    #[error("satellite id {id} in field {index} is not a GPS, SBAS or GLONASS id")]
    InvalidSatelliteId {
        /// Field index of the satellite slot
        index: usize,
        /// The satellite ID
        id: u32,
    },

    /// A numeric field (or a structured field such as time or position) is
    /// malformed.
    #[error("field {index} is malformed: {raw:?}")]
    MalformedNumeric {
        /// Field index
        index: usize,
        /// Raw field content
        raw: String,
    },

    /// A single-character indicator field holds an unknown value.
    #[error("field {index} holds an unknown indicator: {raw:?}")]
    InvalidIndicator {
        /// Field index
        index: usize,
        /// Raw field content
        raw: String,
    },
}

/// A single sentence failed somewhere between validation and decoding.
///
/// These never end a session: the session reports them and moves on to the
/// next sentence.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SentenceError {
    /// The sentence failed framing or checksum validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The sentence was valid but a field could not be decoded.
    #[error("cannot decode {raw:?}: {source}")]
    Decode {
        /// The raw sentence
        raw: String,
        /// The underlying decode error
        #[source]
        source: DecodeError,
    },
}

impl SentenceError {
    /// Returns the raw sentence the error refers to.
    pub fn raw(&self) -> &str {
        match self {
            SentenceError::Validation(e) => e.raw(),
            SentenceError::Decode { raw, .. } => raw,
        }
    }
}

/// A reading session ended because of its transport.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The transport returned an I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No data arrived within the idle timeout.
    #[error("no data received for {0:?}")]
    Stalled(Duration),
}
