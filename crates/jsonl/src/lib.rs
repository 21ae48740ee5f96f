//! A streaming JSON Lines decoder
//!
//! This crate turns a continuous byte stream, delivered in chunks of any size, into a sequence
//! of values: one JSON document per newline delimited line. It is built on top of
//! `tokio_util::codec`, so the line framing is a plain synchronous state machine that is
//! resumed every time the byte source has produced more data.
//!
//! # Features
//!
//! - Lines may straddle any number of read or chunk boundaries
//! - Blank lines are skipped, a final line without trailing newline is still decoded
//! - A malformed line fails only its own pull, decoding continues with the next line
//! - Pluggable line decoders, `serde_json` by default
//! - Async (`futures::Stream`) and blocking (`Iterator`) front ends sharing the same framing
//! - Bounded memory usage through a configurable maximum line length
//!
//! # Example
//!
//! ```
//! use futures::{StreamExt, stream};
//! use micro_jsonl::StreamJsonLinesExt;
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize, PartialEq)]
//! struct Todo {
//!     id: u64,
//!     title: String,
//!     completed: bool,
//! }
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! // the second record is split in the middle of a key
//! let chunks = stream::iter([
//!     Ok::<_, std::io::Error>(&b"{\"id\":1,\"title\":\"a\",\"completed\":false}\n{\"id\":2,\"title\":\"b\",\"comp"[..]),
//!     Ok(&b"leted\":true}\n"[..]),
//! ]);
//!
//! let todos: Vec<Todo> = chunks.json_lines().map(Result::unwrap).collect().await;
//!
//! assert_eq!(todos.len(), 2);
//! assert_eq!(todos[1], Todo { id: 2, title: "b".into(), completed: true });
//! # });
//! ```
//!
//! # Architecture
//!
//! - [`codec`]: [`LineDecoder`](codec::LineDecoder) splits bytes into line payloads,
//!   [`JsonLinesEncoder`](codec::JsonLinesEncoder) writes values one per line
//! - [`protocol`]: the [`LineDecode`] capability, [`JsonLinesConfig`] and the error types
//! - [`stream`]: [`JsonLines`] and [`JsonLinesIter`], the decoding sequences consumers pull from
//!
//! # Error Handling
//!
//! - [`JsonLinesError`]: Top-level error type, [`JsonLinesError::is_fatal`] tells whether the
//!   sequence can go on
//! - [`FramingError`]: The byte source failed or a line exceeded the configured maximum length
//! - [`DecodeError`]: A single line is not a valid document of the requested type
//!
//! # Limitations
//!
//! - Only `\n` separates records, a `\r` before it is handed to the decoder
//! - Maximum line length: 8MB unless configured otherwise

pub mod codec;
pub mod protocol;
pub mod stream;

pub use protocol::{DecodeError, EncodeError, FramingError, JsonDecoder, JsonLinesConfig, JsonLinesError, LineDecode};
pub use stream::{AsyncReadJsonLinesExt, JsonLines, JsonLinesIter, StreamJsonLinesExt};
