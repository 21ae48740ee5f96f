//! The structured decoder capability applied to every non-blank line.
//!
//! The line framer never inspects the decoder: anything that turns a line payload into a `T`
//! can be plugged in, be it the default [`JsonDecoder`], a decoder carrying its own options,
//! or a plain closure.

use serde::de::DeserializeOwned;

use crate::protocol::DecodeError;

/// Converts one line payload, delimiter already stripped, into a value of type `T`.
///
/// The payload is never empty, blank lines are skipped before the decoder is called.
/// It may end with a `\r` when the source uses CRLF line endings.
pub trait LineDecode<T> {
    fn decode_line(&self, line: &[u8]) -> Result<T, DecodeError>;
}

impl<T, F> LineDecode<T> for F
where
    F: Fn(&[u8]) -> Result<T, DecodeError>,
{
    fn decode_line(&self, line: &[u8]) -> Result<T, DecodeError> {
        self(line)
    }
}

/// The default decoder, backed by `serde_json`.
///
/// JSON treats `\r` as whitespace, so CRLF terminated lines decode without extra handling.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct JsonDecoder;

impl JsonDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl<T: DeserializeOwned> LineDecode<T> for JsonDecoder {
    fn decode_line(&self, line: &[u8]) -> Result<T, DecodeError> {
        Ok(serde_json::from_slice(line)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::{Value, json};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Todo {
        id: u64,
        title: String,
        completed: bool,
    }

    #[test]
    fn test_json_decoder() {
        let todo: Todo = JsonDecoder.decode_line(br#"{"id":1,"title":"a","completed":false}"#).unwrap();
        assert_eq!(todo, Todo { id: 1, title: "a".into(), completed: false });
    }

    #[test]
    fn test_json_decoder_tolerates_cr() {
        let value: Value = JsonDecoder::new().decode_line(b"[1,2]\r").unwrap();
        assert_eq!(value, json!([1, 2]));
    }

    #[test]
    fn test_json_decoder_rejects_wrong_shape() {
        let result: Result<Todo, _> = JsonDecoder.decode_line(br#"{"id":"one"}"#);
        let error = result.unwrap_err();
        assert!(error.as_json().is_some_and(serde_json::Error::is_data));
    }

    #[test]
    fn test_closure_decoder() {
        let decoder = |line: &[u8]| -> Result<usize, DecodeError> {
            std::str::from_utf8(line).map(str::len).map_err(DecodeError::invalid)
        };

        assert_eq!(decoder.decode_line(b"abc").unwrap(), 3);
        assert!(matches!(decoder.decode_line(&[0xff]), Err(DecodeError::Invalid { .. })));
    }
}
