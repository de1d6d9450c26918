//! # NMEA 0183 Stream
//!
//! This library turns the byte stream of a serial GPS receiver into typed
//! NMEA 0183 records:
//!
//! 1. [`FrameReassembler`] splits arbitrarily chunked input into CR LF
//!    terminated lines,
//! 2. [`validate`] checks the `$GP` talker, the length limit and the
//!    checksum of each line,
//! 3. [`decode`] turns a validated [`Sentence`] into a [`DecodedRecord`].
//!
//! [`Session`] runs all three over any [`std::io::Read`].
//!
//! ## Usage
//!
//! ```rust
//! use nmea0183_stream::{DecodedRecord, FrameReassembler, decode, validate};
//!
//! let mut reassembler = FrameReassembler::new();
//! let chunks = [
//!     "$GPGGA,092725.00,4717.11399,N,00833.91590,E,1,08,1.01,",
//!     "499.6,M,48.0,M,,*5b\r\n$GPVTG,054.7,T,034.4,M,005.5,N,010.2,K,A*25\r",
//!     "\n",
//! ];
//!
//! for chunk in chunks {
//!     for line in reassembler.feed(chunk) {
//!         let sentence = validate(&line).unwrap();
//!
//!         match decode(&sentence).unwrap() {
//!             Some(DecodedRecord::PositionFix(gga)) => println!("{gga}"),
//!             Some(record) => println!("{:?}", record.sentence_type()),
//!             None => {}
//!         }
//!     }
//! }
//! ```
//!
//! ## Features
//!
//! - `serde`: `Serialize` and `Deserialize` for records and configuration.

pub mod convert;
pub mod error;
mod nmea0183;
pub mod nmea_content;
pub mod parsing;
pub mod reassembler;
pub mod session;

pub use error::{DecodeError, SentenceError, SessionError, ValidationError};
pub use nmea0183::{
    ChecksumCase, MAX_SENTENCE_LENGTH, Sentence, TALKER, Validator, ValidatorBuilder, validate,
};
pub use nmea_content::{
    Coordinate, DecodedRecord, FixDate, Measurement, SentenceType, UtcTime, decode,
};
pub use reassembler::{FrameReassembler, Frames};
pub use session::{CancelHandle, Event, Session, SessionConfig};
