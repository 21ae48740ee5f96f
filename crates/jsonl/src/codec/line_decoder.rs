//! Decoder splitting a byte stream into newline delimited line payloads.
//!
//! Only `\n` is a delimiter. It is stripped from the payload, everything else, `\r` included,
//! is handed out untouched. Blank lines are emitted as empty payloads, filtering them is left
//! to the consumer.
//!
//! The decoder keeps a scan cursor into the buffer so bytes that were already searched for a
//! delimiter are not searched again when more data arrives, and complete lines are split off
//! the front of the `BytesMut` without copying the remainder.
//!
//! A line exceeding the maximum length is dropped as it arrives until its delimiter, or the end
//! of the stream, is seen. The error then reports the full length of the line, whatever the
//! chunking of the source was, without ever holding more than one read worth of it.

use std::cmp;

use bytes::{Buf, Bytes, BytesMut};
use tokio_util::codec::Decoder;
use tracing::trace;

use crate::protocol::{DEFAULT_MAX_LINE_BYTES, FramingError};

const LF: u8 = b'\n';

/// A decoder producing one [`Bytes`] payload per line.
///
/// At end of stream a non-empty unterminated remainder is emitted as the final line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDecoder {
    /// Number of bytes at the front of the buffer known to contain no delimiter
    next_index: usize,
    /// Longest accepted line, delimiter excluded
    max_length: usize,
    /// Number of lines emitted so far
    lines: u64,
    /// Bytes of an oversized line dropped so far, `None` unless such a line is being skipped
    discarded: Option<usize>,
}

impl LineDecoder {
    /// Creates a new LineDecoder limited to [`DEFAULT_MAX_LINE_BYTES`] per line.
    pub fn new() -> Self {
        Self::with_max_length(DEFAULT_MAX_LINE_BYTES)
    }

    /// Creates a new LineDecoder rejecting lines longer than `max_length` bytes.
    pub fn with_max_length(max_length: usize) -> Self {
        Self { next_index: 0, max_length, lines: 0, discarded: None }
    }

    #[inline]
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Returns the number of lines emitted so far, which is also the 1-based number of the
    /// last emitted line.
    #[inline]
    pub fn line_number(&self) -> u64 {
        self.lines
    }

    fn emit(&mut self, line: BytesMut) -> Bytes {
        self.next_index = 0;
        self.lines += 1;
        trace!(line = self.lines, len = line.len(), "decoded line");
        line.freeze()
    }

    /// Drops the oversized line at the front of `src`, failing once its length is known.
    fn discard(&mut self, src: &mut BytesMut, discarded: usize) -> Result<Option<Bytes>, FramingError> {
        match src.iter().position(|b| *b == LF) {
            Some(offset) => {
                src.advance(offset + 1);
                Err(self.too_long(discarded + offset))
            }
            None => {
                self.discarded = Some(discarded + src.len());
                src.clear();
                Ok(None)
            }
        }
    }

    fn too_long(&mut self, line_length: usize) -> FramingError {
        self.discarded = None;
        self.lines += 1;
        trace!(line = self.lines, len = line_length, max = self.max_length, "line too long");
        FramingError::line_too_long(line_length, self.max_length)
    }
}

impl Default for LineDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for LineDecoder {
    type Item = Bytes;
    type Error = FramingError;

    /// Attempts to split the next complete line off the buffer.
    ///
    /// # Returns
    /// - `Ok(Some(bytes))` with the line content when a delimiter was found
    /// - `Ok(None)` when more data is needed
    /// - `Err(FramingError::LineTooLong)` once the whole of a line exceeding the limit was seen
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(discarded) = self.discarded {
            return self.discard(src, discarded);
        }

        // a delimiter beyond `max_length` would already make the line too long
        let read_to = cmp::min(self.max_length.saturating_add(1), src.len());

        let newline_offset = src[self.next_index.min(read_to)..read_to].iter().position(|b| *b == LF);

        match newline_offset {
            Some(offset) => {
                let newline_index = self.next_index + offset;
                let mut line = src.split_to(newline_index + 1);
                line.truncate(newline_index);
                Ok(Some(self.emit(line)))
            }
            None if src.len() > self.max_length => {
                self.next_index = 0;
                self.discard(src, 0)
            }
            None => {
                self.next_index = src.len();
                Ok(None)
            }
        }
    }

    /// Flushes the last, unterminated line once the source is exhausted.
    ///
    /// # Returns
    /// - `Ok(Some(bytes))` for each remaining line, the last one possibly without delimiter
    /// - `Ok(None)` when the buffer is drained
    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(line) = self.decode(src)? {
            return Ok(Some(line));
        }

        if let Some(discarded) = self.discarded {
            return Err(self.too_long(discarded));
        }

        if src.is_empty() {
            trace!(lines = self.lines, "finished reading lines");
            return Ok(None);
        }

        let line = src.split_to(src.len());
        Ok(Some(self.emit(line)))
    }
}
