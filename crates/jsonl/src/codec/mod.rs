//! JSON Lines codec module for framing and encoding newline delimited records
//!
//! This module holds the byte level half of the crate, implemented on top of the
//! `tokio_util::codec` traits so it can be driven by `FramedRead` / `FramedWrite` as well as
//! called directly on a `BytesMut`.
//!
//! - [`LineDecoder`]: Splits incoming bytes into line payloads, straddling arbitrary chunk
//!   boundaries and flushing an unterminated last line at end of stream
//! - [`JsonLinesEncoder`]: Writes serializable values one per line
//!
//! # Example
//!
//! ```
//! use micro_jsonl::codec::LineDecoder;
//! use tokio_util::codec::Decoder;
//! use bytes::BytesMut;
//!
//! let mut decoder = LineDecoder::new();
//! let mut buffer = BytesMut::from(&b"{\"id\":1}\n{\"id\""[..]);
//!
//! let line = decoder.decode(&mut buffer).unwrap();
//! assert_eq!(line.as_deref(), Some(&b"{\"id\":1}"[..]));
//!
//! // the second line is incomplete, more data is needed
//! assert!(decoder.decode(&mut buffer).unwrap().is_none());
//! ```

mod json_lines_encoder;
mod line_decoder;

pub use json_lines_encoder::JsonLinesEncoder;
pub use line_decoder::LineDecoder;
