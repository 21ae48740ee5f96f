//! Line decoding sequences over byte sources.
//!
//! Both sequences pull line payloads from a [`LineDecoder`](crate::codec::LineDecoder),
//! silently skip blank lines and hand every other line to a [`LineDecode`](crate::LineDecode)
//! implementation:
//!
//! - [`JsonLines`]: a `futures::Stream` over any `tokio::io::AsyncRead`
//! - [`JsonLinesIter`]: a blocking `Iterator` over any `std::io::Read`
//!
//! The extension traits [`AsyncReadJsonLinesExt`] and [`StreamJsonLinesExt`] are the usual
//! way to build a [`JsonLines`] from a reader or from a stream of byte chunks.
//!
//! # Error handling
//!
//! A line that fails to decode is reported as [`JsonLinesError::Decode`](crate::JsonLinesError)
//! for that pull only, the next pull continues with the following line. A source failure or
//! an oversized line is reported once, after which the sequence is exhausted.

mod blocking;
mod ext;
mod json_lines;

pub use blocking::JsonLinesIter;
pub use ext::AsyncReadJsonLinesExt;
pub use ext::StreamJsonLinesExt;
pub use json_lines::JsonLines;

/// Lifecycle of a decoding sequence between two pulls.
///
/// Waiting for bytes, holding a line and decoding it all happen within a single pull, so the
/// only state that survives a pull is whether the sequence can still produce values. A decode
/// failure leaves the sequence `Ready`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum State {
    Ready,
    /// The source ended or failed, no more values will be produced
    Exhausted,
}
