//! # Reading Session
//!
//! Drives the pipeline over a transport: bytes are read from any
//! [`std::io::Read`], reassembled into lines, validated and decoded, and
//! handed out as [`Event`]s in the order they were received.
//!
//! A [`Session`] owns its transport and releases it exactly once, when the
//! session ends, is closed, or is dropped, whichever comes first.
//!
//! ```rust
//! use nmea0183_stream::{Event, Session, SessionConfig};
//!
//! let input: &[u8] = b"$GPGGA,075909.00,6451.53390,N,14749.78748,W,1,04,8.23,149.4,M,5.8,M,,*75\r\n\
//!                      $GPGSA,A,3,27,70,,,,,,,,,,,2.50,1.30,2.14*00\r\n";
//!
//! let events: Vec<_> = Session::new(input, SessionConfig::default())
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//!
//! assert!(matches!(events[0], Event::Record(_)));
//! assert!(matches!(events[1], Event::Rejected(_)));
//! ```

use std::{
    collections::VecDeque,
    io::{ErrorKind, Read},
    iter::FusedIterator,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
    time::{Duration, Instant},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::{
    DecodedRecord, SentenceError, SessionError, Validator, decode,
    reassembler::{DEFAULT_MAX_LINE_LENGTH, FrameReassembler},
};

/// Settings of a [`Session`].
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
///
/// use nmea0183_stream::{ChecksumCase, SessionConfig, Validator};
///
/// let config = SessionConfig::default()
///     .idle_timeout(Some(Duration::from_secs(2)))
///     .validator(Validator::builder().checksum_case(ChecksumCase::Lowercase).build());
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    read_buffer_size: usize,
    idle_timeout: Option<Duration>,
    poll_interval: Duration,
    max_line_length: usize,
    validator: Validator,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            read_buffer_size: 256,
            idle_timeout: Some(Duration::from_secs(5)),
            poll_interval: Duration::from_millis(10),
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            validator: Validator::default(),
        }
    }
}

impl SessionConfig {
    /// Sets the number of bytes requested per read. Zero is treated as one.
    #[must_use]
    pub fn read_buffer_size(mut self, read_buffer_size: usize) -> Self {
        self.read_buffer_size = read_buffer_size;
        self
    }

    /// Sets how long the transport may report no data before the session
    /// ends with [`SessionError::Stalled`]. `None` waits forever.
    ///
    /// Only transports whose reads return [`ErrorKind::TimedOut`] or
    /// [`ErrorKind::WouldBlock`] while idle can stall.
    #[must_use]
    pub fn idle_timeout(mut self, idle_timeout: Option<Duration>) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// Sets how long to wait before reading again after a read returned
    /// [`ErrorKind::WouldBlock`]. Defaults to 10 ms.
    ///
    /// A blocking transport with a read timeout (a serial port, a socket with
    /// `set_read_timeout`) reports [`ErrorKind::TimedOut`] after it has
    /// already waited, so it is read again immediately. A non-blocking
    /// transport returns `WouldBlock` at once and is polled at this
    /// interval. The wait never runs past the idle timeout.
    #[must_use]
    pub fn poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Sets the bound on a buffered line, see [`FrameReassembler`].
    #[must_use]
    pub fn max_line_length(mut self, max_line_length: usize) -> Self {
        self.max_line_length = max_line_length;
        self
    }

    /// Sets the validator applied to every line.
    #[must_use]
    pub fn validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }
}

/// Stops a [`Session`] from another thread.
///
/// The session checks the handle before every read. Lines that were already
/// complete when it was cancelled are still delivered; the partial line is
/// discarded.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    /// Requests the session to stop before its next read.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether [`CancelHandle::cancel`] has been called.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// The outcome of one received sentence.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A decoded sentence
    Record(DecodedRecord),
    /// A sentence that failed validation or decoding
    Rejected(SentenceError),
}

/// A reading session over one transport.
///
/// Iterating yields one [`Event`] per received sentence of a supported
/// type; other sentence types are skipped. A [`SessionError`] ends the
/// session, and so does end of input or cancellation. After that the
/// iterator only returns `None`.
pub struct Session<R: Read> {
    reader: Option<R>,
    reassembler: FrameReassembler,
    validator: Validator,
    buffer: Vec<u8>,
    frames: VecDeque<String>,
    cancel: CancelHandle,
    idle_timeout: Option<Duration>,
    poll_interval: Duration,
    last_data: Instant,
    finished: bool,
}

impl<R: Read> Session<R> {
    /// Starts a session that owns `reader`.
    pub fn new(reader: R, config: SessionConfig) -> Self {
        let mut reassembler = FrameReassembler::with_max_line_length(config.max_line_length);
        reassembler.reset();

        debug!(
            read_buffer_size = config.read_buffer_size,
            idle_timeout = ?config.idle_timeout,
            poll_interval = ?config.poll_interval,
            "session started"
        );

        Self {
            reader: Some(reader),
            reassembler,
            validator: config.validator,
            buffer: vec![0; config.read_buffer_size.max(1)],
            frames: VecDeque::new(),
            cancel: CancelHandle::default(),
            idle_timeout: config.idle_timeout,
            poll_interval: config.poll_interval,
            last_data: Instant::now(),
            finished: false,
        }
    }

    /// A handle that cancels this session.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Whether the session has ended.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Ends the session and releases the transport.
    pub fn close(mut self) {
        self.finish();
    }

    /// Ends the session and returns the transport, unless it was already
    /// released.
    pub fn into_inner(mut self) -> Option<R> {
        let reader = self.reader.take();
        self.finish();
        reader
    }

    fn finish(&mut self) {
        if !self.finished {
            debug!(
                partial = self.reassembler.pending().len(),
                queued = self.frames.len(),
                "session finished"
            );
        }

        self.finished = true;
        self.frames.clear();
        self.reassembler.reset();

        if let Some(reader) = self.reader.take() {
            drop(reader);
            debug!("transport released");
        }
    }

    fn process(&self, line: String) -> Option<Event> {
        let sentence = match self.validator.validate(&line) {
            Ok(sentence) => sentence,
            Err(e) => {
                warn!(error = %e, "sentence rejected");
                return Some(Event::Rejected(e.into()));
            }
        };

        match decode(&sentence) {
            Ok(Some(record)) => Some(Event::Record(record)),
            Ok(None) => {
                trace!(
                    sentence_type = sentence.sentence_type(),
                    "skipping unsupported sentence"
                );
                None
            }
            Err(source) => {
                let error = SentenceError::Decode { raw: line, source };
                warn!(%error, "sentence rejected");
                Some(Event::Rejected(error))
            }
        }
    }

    /// Reads one chunk into the frame queue.
    ///
    /// Returns `Ok(false)` once the session is over.
    fn fill(&mut self) -> Result<bool, SessionError> {
        loop {
            if self.cancel.is_cancelled() {
                debug!("session cancelled");
                return Ok(false);
            }

            let Some(reader) = self.reader.as_mut() else {
                return Ok(false);
            };

            match reader.read(&mut self.buffer) {
                Ok(0) => {
                    debug!("end of input");
                    return Ok(false);
                }
                Ok(n) => {
                    self.last_data = Instant::now();
                    self.frames
                        .extend(self.reassembler.feed_bytes(&self.buffer[..n]));
                    return Ok(true);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                    let idle = self.last_data.elapsed();
                    if let Some(timeout) = self.idle_timeout
                        && idle >= timeout
                    {
                        warn!(?timeout, "no data received, session stalled");
                        return Err(SessionError::Stalled(timeout));
                    }

                    if e.kind() == ErrorKind::WouldBlock {
                        let wait = match self.idle_timeout {
                            Some(timeout) => self.poll_interval.min(timeout - idle),
                            None => self.poll_interval,
                        };
                        trace!(?wait, "transport idle");
                        thread::sleep(wait);
                    }
                }
                Err(e) => {
                    warn!(error = %e, "transport error");
                    return Err(SessionError::Io(e));
                }
            }
        }
    }
}

impl<R: Read> Iterator for Session<R> {
    type Item = Result<Event, SessionError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            while let Some(line) = self.frames.pop_front() {
                if let Some(event) = self.process(line) {
                    return Some(Ok(event));
                }
            }

            if self.finished {
                return None;
            }

            match self.fill() {
                Ok(true) => {}
                Ok(false) => {
                    self.finish();
                    return None;
                }
                Err(e) => {
                    self.finish();
                    return Some(Err(e));
                }
            }
        }
    }
}

impl<R: Read> FusedIterator for Session<R> {}

impl<R: Read> Drop for Session<R> {
    fn drop(&mut self) {
        self.finish();
    }
}

impl<R: Read> std::fmt::Debug for Session<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("reassembler", &self.reassembler)
            .field("validator", &self.validator)
            .field("queued", &self.frames.len())
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}
