//! # Frame Reassembler
//!
//! Turns arbitrarily sized chunks of a serial stream into complete lines.
//!
//! A chunk may hold any number of CR LF terminators and may start or end in
//! the middle of a sentence, or between the `\r` and the `\n` of a
//! terminator. The reassembler keeps the unterminated tail of the stream
//! between calls, so the lines it produces do not depend on how the stream
//! was chunked.
//!
//! ```rust
//! use nmea0183_stream::FrameReassembler;
//!
//! let mut reassembler = FrameReassembler::new();
//!
//! assert_eq!(reassembler.feed("$GPGGA,075909").count(), 0);
//! assert!(reassembler.needs_continuation());
//!
//! let frames: Vec<_> = reassembler.feed(".00,data*cc\r\n$GPGLL").collect();
//! assert_eq!(frames, ["$GPGGA,075909.00,data*cc"]);
//! assert_eq!(reassembler.pending(), "$GPGLL");
//! ```

use std::iter::FusedIterator;

use tracing::{trace, warn};

/// Line terminator of the wire format.
pub const TERMINATOR: &str = "\r\n";

/// Default bound on the length of a buffered line.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 1024;

/// Longest incomplete UTF-8 sequence that can end a chunk.
const MAX_CARRY: usize = 3;

/// Reassembles CR LF terminated lines from a chunked stream.
#[derive(Debug, Clone)]
pub struct FrameReassembler {
    buffer: String,
    /// Leading bytes of a UTF-8 character split across byte chunks
    carry: heapless::Vec<u8, MAX_CARRY>,
    max_line_length: usize,
    /// Set after an overlong line; everything up to the next terminator is
    /// dropped.
    discarding: bool,
}

impl Default for FrameReassembler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameReassembler {
    /// Creates a reassembler with the default line bound of
    /// [`DEFAULT_MAX_LINE_LENGTH`] bytes.
    pub fn new() -> Self {
        Self::with_max_line_length(DEFAULT_MAX_LINE_LENGTH)
    }

    /// Creates a reassembler that drops lines longer than `max_line_length`
    /// bytes, terminator excluded.
    pub fn with_max_line_length(max_line_length: usize) -> Self {
        Self {
            buffer: String::new(),
            carry: heapless::Vec::new(),
            max_line_length,
            discarding: false,
        }
    }

    /// The longest line, in bytes, that is still emitted.
    pub fn max_line_length(&self) -> usize {
        self.max_line_length
    }

    /// Appends a text chunk and returns the lines it completes.
    ///
    /// Lines are yielded in receipt order without their terminator. Empty
    /// lines are skipped. Lines the returned iterator does not get to are
    /// kept and come out of the next call.
    pub fn feed(&mut self, chunk: &str) -> Frames<'_> {
        self.buffer.push_str(chunk);
        Frames { reassembler: self }
    }

    /// Appends a byte chunk and returns the lines it completes.
    ///
    /// Bytes are decoded as UTF-8. A character split across two chunks is
    /// carried over to the next call; invalid sequences are replaced with
    /// U+FFFD, which later fails validation of the sentence it ends up in.
    pub fn feed_bytes(&mut self, chunk: &[u8]) -> Frames<'_> {
        let joined;
        let mut bytes = if self.carry.is_empty() {
            chunk
        } else {
            joined = [self.carry.as_slice(), chunk].concat();
            self.carry.clear();
            joined.as_slice()
        };

        loop {
            match std::str::from_utf8(bytes) {
                Ok(text) => {
                    self.buffer.push_str(text);
                    break;
                }
                Err(e) => {
                    let (valid, rest) = bytes.split_at(e.valid_up_to());
                    self.buffer.push_str(&String::from_utf8_lossy(valid));

                    match e.error_len() {
                        Some(len) => {
                            self.buffer.push(char::REPLACEMENT_CHARACTER);
                            bytes = &rest[len..];
                        }
                        None => {
                            // an incomplete sequence at the end is at most 3 bytes
                            if self.carry.extend_from_slice(rest).is_err() {
                                self.buffer.push(char::REPLACEMENT_CHARACTER);
                            }
                            break;
                        }
                    }
                }
            }
        }

        Frames { reassembler: self }
    }

    /// Discards all buffered data.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.carry.clear();
        self.discarding = false;
    }

    /// The unterminated tail of the stream.
    pub fn pending(&self) -> &str {
        match self.buffer.rfind(TERMINATOR) {
            Some(end) => &self.buffer[end + TERMINATOR.len()..],
            None => &self.buffer,
        }
    }

    /// Whether a partial line is waiting for more data.
    pub fn needs_continuation(&self) -> bool {
        self.discarding || !self.pending().is_empty() || !self.carry.is_empty()
    }

    fn next_frame(&mut self) -> Option<String> {
        while let Some(end) = self.buffer.find(TERMINATOR) {
            let mut line: String = self.buffer.drain(..end + TERMINATOR.len()).collect();
            line.truncate(end);

            if self.discarding {
                self.discarding = false;
                continue;
            }

            if line.is_empty() {
                continue;
            }

            if line.len() > self.max_line_length {
                warn!(
                    len = line.len(),
                    max = self.max_line_length,
                    "dropping overlong line"
                );
                continue;
            }

            trace!(%line, "frame complete");
            return Some(line);
        }

        self.limit_pending();
        None
    }

    /// Drops the partial line once it can no longer become a valid frame.
    ///
    /// A trailing `\r` is not counted and is kept, since it may be the first
    /// half of a terminator.
    fn limit_pending(&mut self) {
        let carriage_return = self.buffer.ends_with('\r');
        let len = self.buffer.len() - usize::from(carriage_return);

        if !self.discarding && len <= self.max_line_length {
            return;
        }

        if !self.discarding {
            warn!(
                len,
                max = self.max_line_length,
                "dropping overlong partial line"
            );
            self.discarding = true;
        }

        self.buffer.clear();
        if carriage_return {
            self.buffer.push('\r');
        }
    }
}

/// The lines completed by one [`FrameReassembler::feed`] call.
#[derive(Debug)]
pub struct Frames<'a> {
    reassembler: &'a mut FrameReassembler,
}

impl Iterator for Frames<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.reassembler.next_frame()
    }
}

impl FusedIterator for Frames<'_> {}
