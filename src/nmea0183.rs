//! # NMEA 0183 Sentence Validator
//!
//! Checks a single reassembled line against the framing rules of the
//! `$GP<TYPE>,<field>,...,<field>*<hex>` wire format and turns it into a
//! [`Sentence`].
//!
//! The checks run in a fixed order and the first failure wins:
//!
//! 1. the line starts with the `$GP` talker,
//! 2. it is at most [`MAX_SENTENCE_LENGTH`] bytes long (or less, if
//!    configured),
//! 3. it contains a `*` followed by a non-empty checksum field,
//! 4. the declared checksum equals the XOR of everything between `$` and the
//!    first `*`.
//!
//! Validation is pure and fails closed: there is no partially validated
//! sentence.

use nom::{
    IResult, Parser,
    bytes::complete::take_until,
    character::complete::char,
    sequence::terminated,
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    ValidationError,
    convert::{checksum, declared_checksum},
};

/// The only talker this crate accepts.
pub const TALKER: &str = "$GP";

/// Maximum length of a sentence, in bytes, excluding the line terminator.
pub const MAX_SENTENCE_LENGTH: usize = 82;

/// Validates a line with the default settings.
///
/// Equivalent to `Validator::default().validate(raw)`.
///
/// # Examples
///
/// ```rust
/// use nmea0183_stream::{ValidationError, validate};
///
/// let sentence = validate("$GPGGA,092725.00,4717.11399,N,00833.91590,E,1,08,1.01,499.6,M,48.0,M,,*5b").unwrap();
/// assert_eq!(sentence.sentence_type(), "GGA");
/// assert_eq!(sentence.checksum(), 0x5b);
///
/// assert!(matches!(
///     validate("$GPGGA,data*00"),
///     Err(ValidationError::ChecksumMismatch { expected: 0x6a, .. })
/// ));
/// ```
pub fn validate(raw: &str) -> Result<Sentence, ValidationError> {
    Validator::default().validate(raw)
}

/// How the hex digits of a declared checksum may be written.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ChecksumCase {
    /// Accept `5b` and `5B` alike.
    #[default]
    Insensitive,

    /// Accept lowercase hex digits only; `5B` is a mismatch.
    ///
    /// Use this for receivers known to emit lowercase checksums, where an
    /// uppercase one points at a corrupted or foreign line.
    Lowercase,
}

/// A configured sentence validator.
///
/// Build one with [`Validator::builder`], or use [`Validator::default`] for
/// the standard 82-byte limit and case-insensitive checksums.
///
/// # Examples
///
/// ```rust
/// use nmea0183_stream::{ChecksumCase, Validator};
///
/// let validator = Validator::builder()
///     .checksum_case(ChecksumCase::Lowercase)
///     .build();
///
/// assert!(validator.validate("$GPGGA,data*6a").is_ok());
/// assert!(validator.validate("$GPGGA,data*6A").is_err());
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validator {
    max_length: usize,
    checksum_case: ChecksumCase,
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            max_length: MAX_SENTENCE_LENGTH,
            checksum_case: ChecksumCase::default(),
        }
    }
}

impl Validator {
    /// Creates a builder starting from the default settings.
    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::new()
    }

    /// The effective maximum sentence length in bytes.
    pub fn max_length(&self) -> usize {
        self.max_length.min(MAX_SENTENCE_LENGTH)
    }

    /// How declared checksums may be written.
    pub fn checksum_case(&self) -> ChecksumCase {
        self.checksum_case
    }

    /// Validates one line, without its CR LF terminator.
    pub fn validate(&self, raw: &str) -> Result<Sentence, ValidationError> {
        if !raw.starts_with(TALKER) {
            return Err(ValidationError::BadTalker { raw: raw.into() });
        }

        let max = self.max_length();
        if raw.len() > max {
            return Err(ValidationError::TooLong {
                raw: raw.into(),
                len: raw.len(),
                max,
            });
        }

        // raw starts with the ASCII talker, so index 1 is a char boundary
        let (declared, data) = match split_checksum(&raw[1..]) {
            Ok((declared, data)) if !declared.is_empty() => (declared, data),
            _ => return Err(ValidationError::MissingChecksum { raw: raw.into() }),
        };

        let expected = checksum(data);
        let found = declared_checksum(declared)
            .filter(|_| self.case_matches(declared))
            .filter(|found| *found == expected);

        if found.is_none() {
            return Err(ValidationError::ChecksumMismatch {
                raw: raw.into(),
                expected,
                found: declared.into(),
            });
        }

        let mut text = heapless::String::new();
        if text.push_str(raw).is_err() {
            return Err(ValidationError::TooLong {
                raw: raw.into(),
                len: raw.len(),
                max,
            });
        }

        Ok(Sentence {
            raw: text,
            data_end: 1 + data.len(),
            checksum: expected,
        })
    }

    fn case_matches(&self, declared: &str) -> bool {
        match self.checksum_case {
            ChecksumCase::Insensitive => true,
            ChecksumCase::Lowercase => !declared.bytes().any(|b| b.is_ascii_uppercase()),
        }
    }
}

/// Splits `data*cs` at the first `*`, returning `(cs, data)`.
fn split_checksum(i: &str) -> IResult<&str, &str> {
    terminated(take_until("*"), char('*')).parse(i)
}

/// Builder for [`Validator`].
#[must_use]
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatorBuilder {
    validator: Validator,
}

impl ValidatorBuilder {
    /// Starts from the default settings: 82 bytes, any checksum case.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum sentence length in bytes.
    ///
    /// Values above [`MAX_SENTENCE_LENGTH`] are clamped to it.
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.validator.max_length = max_length.min(MAX_SENTENCE_LENGTH);
        self
    }

    /// Sets how declared checksums may be written.
    pub fn checksum_case(mut self, checksum_case: ChecksumCase) -> Self {
        self.validator.checksum_case = checksum_case;
        self
    }

    /// Finishes the configuration.
    pub fn build(self) -> Validator {
        self.validator
    }
}

/// A validated sentence.
///
/// Holds the original text, so it can be logged or re-sent verbatim, and
/// exposes its parts by fixed offset.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sentence {
    raw: heapless::String<MAX_SENTENCE_LENGTH>,
    /// Byte offset of the `*` delimiter
    data_end: usize,
    checksum: u8,
}

impl Sentence {
    /// The original sentence text.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The talker prefix, always `$GP`.
    pub fn talker(&self) -> &str {
        &self.raw[..TALKER.len()]
    }

    /// The three-letter sentence type code, e.g. `GGA`.
    ///
    /// Taken from the fixed offset after the talker. A sentence too short to
    /// have one returns an empty string.
    pub fn sentence_type(&self) -> &str {
        self.raw[..self.data_end]
            .get(TALKER.len()..TALKER.len() + 3)
            .unwrap_or("")
    }

    /// Everything between `$` and `*`.
    pub fn data(&self) -> &str {
        &self.raw[1..self.data_end]
    }

    /// The comma-separated fields of [`Sentence::data`].
    ///
    /// Field 0 is the address field, e.g. `GPGGA`. The checksum is never part
    /// of the last field.
    pub fn fields(&self) -> std::str::Split<'_, char> {
        self.data().split(',')
    }

    /// The verified checksum.
    pub fn checksum(&self) -> u8 {
        self.checksum
    }
}

impl std::fmt::Display for Sentence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}
