use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use futures::Stream;
use futures::stream::FusedStream;
use pin_project_lite::pin_project;
use tokio::io::AsyncRead;
use tokio_util::codec::FramedRead;
use tracing::{debug, error, trace, warn};

use super::State;
use crate::codec::LineDecoder;
use crate::protocol::{JsonDecoder, JsonLinesConfig, JsonLinesError, LineDecode};

pin_project! {
    /// An asynchronous stream of values decoded from JSON Lines.
    ///
    /// Bytes are read from `R` through a [`FramedRead`] driving a [`LineDecoder`], blank lines
    /// are skipped and every other line is handed to the decoder `D`.
    ///
    /// # Type Parameters
    ///
    /// * `R`: The async readable byte source
    /// * `T`: The type every line is decoded to
    /// * `D`: The line decoder, [`JsonDecoder`] unless overridden
    pub struct JsonLines<R, T, D = JsonDecoder> {
        #[pin]
        framed_read: FramedRead<R, LineDecoder>,
        decoder: D,
        state: State,
        _marker: PhantomData<fn() -> T>,
    }
}

impl<R, T> JsonLines<R, T, JsonDecoder>
where
    R: AsyncRead,
{
    /// Creates a stream decoding every line with `serde_json`, using the default config.
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, JsonLinesConfig::default())
    }

    pub fn with_config(reader: R, config: JsonLinesConfig) -> Self {
        Self::with_decoder(reader, JsonDecoder, config)
    }
}

impl<R, T, D> JsonLines<R, T, D>
where
    R: AsyncRead,
{
    /// Creates a stream decoding every line with a custom decoder.
    pub fn with_decoder(reader: R, decoder: D, config: JsonLinesConfig) -> Self {
        let line_decoder = LineDecoder::with_max_length(config.max_line_length());
        Self {
            framed_read: FramedRead::with_capacity(reader, line_decoder, config.read_capacity()),
            decoder,
            state: State::Ready,
            _marker: PhantomData,
        }
    }
}

impl<R, T, D> JsonLines<R, T, D> {
    /// Returns the 1-based number of the last line read from the source, blank lines included.
    pub fn line_number(&self) -> u64 {
        self.framed_read.decoder().line_number()
    }

    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    pub fn get_ref(&self) -> &R {
        self.framed_read.get_ref()
    }

    /// Returns a mutable reference to the underlying reader.
    ///
    /// Reading from it directly corrupts the line framing.
    pub fn get_mut(&mut self) -> &mut R {
        self.framed_read.get_mut()
    }

    pub fn get_pin_mut(self: Pin<&mut Self>) -> Pin<&mut R> {
        self.project().framed_read.get_pin_mut()
    }

    /// Consumes the stream, returning the underlying reader.
    ///
    /// Bytes already buffered but not yet decoded are lost.
    pub fn into_inner(self) -> R {
        self.framed_read.into_inner()
    }
}

impl<R, T, D> Stream for JsonLines<R, T, D>
where
    R: AsyncRead,
    D: LineDecode<T>,
{
    type Item = Result<T, JsonLinesError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.state == State::Exhausted {
            return Poll::Ready(None);
        }

        loop {
            let line = match ready!(this.framed_read.as_mut().poll_next(cx)) {
                Some(Ok(line)) => line,

                Some(Err(e)) => {
                    error!(cause = %e, "can't read next line, stop decoding");
                    *this.state = State::Exhausted;
                    return Poll::Ready(Some(Err(e.into())));
                }

                None => {
                    debug!(lines = this.framed_read.decoder().line_number(), "source exhausted");
                    *this.state = State::Exhausted;
                    return Poll::Ready(None);
                }
            };

            let line_number = this.framed_read.decoder().line_number();
            if line.is_empty() {
                trace!(line = line_number, "skip blank line");
                continue;
            }

            let item = this.decoder.decode_line(&line).map_err(|e| {
                warn!(line = line_number, cause = %e, "failed to decode line");
                JsonLinesError::decode(line_number, e)
            });

            return Poll::Ready(Some(item));
        }
    }
}

impl<R, T, D> FusedStream for JsonLines<R, T, D>
where
    R: AsyncRead,
    D: LineDecode<T>,
{
    fn is_terminated(&self) -> bool {
        self.state == State::Exhausted
    }
}

impl<R, T, D> std::fmt::Debug for JsonLines<R, T, D>
where
    R: std::fmt::Debug,
    D: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonLines")
            .field("framed_read", &self.framed_read)
            .field("decoder", &self.decoder)
            .field("state", &self.state)
            .finish()
    }
}
