//! Core JSON Lines abstractions shared by the codec and the decoding streams.
//!
//! - **Decoding** ([`decoder`]): the pluggable [`LineDecode`] capability
//!   - [`JsonDecoder`]: `serde_json` backed default implementation
//!
//! - **Configuration** ([`config`]): [`JsonLinesConfig`] with the line length limit and
//!   the initial read buffer capacity
//!
//! - **Error Handling** ([`error`]):
//!   - [`JsonLinesError`]: Top-level error type
//!   - [`FramingError`]: Source and line framing errors, always fatal
//!   - [`DecodeError`]: Per line decoding errors
//!   - [`EncodeError`]: Errors writing values as JSON Lines

mod config;
pub use config::DEFAULT_MAX_LINE_BYTES;
pub use config::DEFAULT_READ_CAPACITY;
pub use config::JsonLinesConfig;

mod decoder;
pub use decoder::JsonDecoder;
pub use decoder::LineDecode;

mod error;
pub use error::DecodeError;
pub use error::EncodeError;
pub use error::FramingError;
pub use error::JsonLinesError;
