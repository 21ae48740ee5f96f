use std::io::{self, ErrorKind, Read};
use std::marker::PhantomData;
use std::ptr;

use bytes::{Bytes, BytesMut};
use tokio_util::codec::Decoder;
use tracing::{debug, error, trace, warn};

use super::State;
use crate::codec::LineDecoder;
use crate::protocol::{FramingError, JsonDecoder, JsonLinesConfig, JsonLinesError, LineDecode};

/// A blocking iterator of values decoded from JSON Lines.
///
/// The blocking counterpart of [`JsonLines`](crate::JsonLines): same framing, same blank line
/// and error handling, driven by `std::io::Read` instead of `FramedRead`. Reads interrupted by
/// a signal are retried.
pub struct JsonLinesIter<R, T, D = JsonDecoder> {
    reader: R,
    buffer: BytesMut,
    line_decoder: LineDecoder,
    decoder: D,
    read_capacity: usize,
    /// Bytes at the front of the spare capacity known to be initialized
    initialized: usize,
    eof: bool,
    state: State,
    _marker: PhantomData<fn() -> T>,
}

impl<R, T> JsonLinesIter<R, T, JsonDecoder>
where
    R: Read,
{
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, JsonLinesConfig::default())
    }

    pub fn with_config(reader: R, config: JsonLinesConfig) -> Self {
        Self::with_decoder(reader, JsonDecoder, config)
    }
}

impl<R, T, D> JsonLinesIter<R, T, D>
where
    R: Read,
{
    pub fn with_decoder(reader: R, decoder: D, config: JsonLinesConfig) -> Self {
        Self {
            reader,
            buffer: BytesMut::with_capacity(config.read_capacity()),
            line_decoder: LineDecoder::with_max_length(config.max_line_length()),
            decoder,
            // a zero sized read would look like end of stream
            read_capacity: config.read_capacity().max(1),
            initialized: 0,
            eof: false,
            state: State::Ready,
            _marker: PhantomData,
        }
    }

    /// Returns the 1-based number of the last line read from the source, blank lines included.
    pub fn line_number(&self) -> u64 {
        self.line_decoder.line_number()
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Consumes the iterator, returning the underlying reader.
    ///
    /// Bytes already buffered but not yet decoded are lost.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Pulls the next line payload, reading from the source until one is complete.
    fn next_line(&mut self) -> Result<Option<Bytes>, FramingError> {
        loop {
            if self.eof {
                return self.line_decoder.decode_eof(&mut self.buffer);
            }

            if let Some(line) = self.line_decoder.decode(&mut self.buffer)? {
                return Ok(Some(line));
            }

            self.fill_buffer()?;
        }
    }

    /// Appends at most `read_capacity` bytes from the source to the buffer.
    ///
    /// The source writes straight into the spare capacity of the buffer. Only spare bytes no
    /// earlier read has initialized are zeroed first.
    fn fill_buffer(&mut self) -> io::Result<()> {
        let filled = self.buffer.len();
        let spare_start = self.buffer.spare_capacity_mut().as_ptr();
        self.buffer.reserve(self.read_capacity);

        let spare = self.buffer.spare_capacity_mut();
        if spare.as_ptr() != spare_start {
            self.initialized = 0;
        }

        let window = &mut spare[..self.read_capacity];
        for byte in window.iter_mut().skip(self.initialized) {
            byte.write(0);
        }
        self.initialized = self.initialized.max(window.len());
        // SAFETY: every byte of `window` is initialized, either above or by an earlier read
        let window = unsafe { &mut *(ptr::from_mut(window) as *mut [u8]) };

        loop {
            match self.reader.read(window) {
                Ok(n) => {
                    // SAFETY: the first `n` spare bytes are initialized and hold what `read` wrote
                    unsafe { self.buffer.set_len(filled + n) };
                    self.initialized -= n;
                    if n == 0 {
                        self.eof = true;
                    }
                    trace!(len = n, "read bytes");
                    return Ok(());
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
    }
}

impl<R, T, D> Iterator for JsonLinesIter<R, T, D>
where
    R: Read,
    D: LineDecode<T>,
{
    type Item = Result<T, JsonLinesError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state == State::Exhausted {
            return None;
        }

        loop {
            let line = match self.next_line() {
                Ok(Some(line)) => line,

                Ok(None) => {
                    debug!(lines = self.line_number(), "source exhausted");
                    self.state = State::Exhausted;
                    return None;
                }

                Err(e) => {
                    error!(cause = %e, "can't read next line, stop decoding");
                    self.state = State::Exhausted;
                    return Some(Err(e.into()));
                }
            };

            let line_number = self.line_number();
            if line.is_empty() {
                trace!(line = line_number, "skip blank line");
                continue;
            }

            let item = self.decoder.decode_line(&line).map_err(|e| {
                warn!(line = line_number, cause = %e, "failed to decode line");
                JsonLinesError::decode(line_number, e)
            });

            return Some(item);
        }
    }
}

impl<R, T, D> std::iter::FusedIterator for JsonLinesIter<R, T, D>
where
    R: Read,
    D: LineDecode<T>,
{
}

impl<R, T, D> std::fmt::Debug for JsonLinesIter<R, T, D>
where
    R: std::fmt::Debug,
    D: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonLinesIter")
            .field("reader", &self.reader)
            .field("line_decoder", &self.line_decoder)
            .field("decoder", &self.decoder)
            .field("eof", &self.eof)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
