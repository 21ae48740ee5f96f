//! Encoder writing values as JSON Lines.
//!
//! Every value is serialized as compact JSON followed by a single `\n`. Compact `serde_json`
//! output escapes control characters inside strings, so an encoded value never contains a raw
//! delimiter and each value always occupies exactly one line.

use std::marker::PhantomData;

use bytes::{BufMut, BytesMut};
use serde::Serialize;
use tokio_util::codec::Encoder;
use tracing::{error, trace};

use crate::protocol::EncodeError;

/// An encoder for values of type `T`, usable with `FramedWrite`.
///
/// Values can be passed by reference or by value.
#[derive(Debug)]
pub struct JsonLinesEncoder<T> {
    _marker: PhantomData<fn(&T)>,
}

impl<T> JsonLinesEncoder<T> {
    pub fn new() -> Self {
        Default::default()
    }
}

impl<T> Default for JsonLinesEncoder<T> {
    fn default() -> Self {
        Self { _marker: PhantomData }
    }
}

impl<T> Clone for JsonLinesEncoder<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T: Serialize> Encoder<&T> for JsonLinesEncoder<T> {
    type Error = EncodeError;

    fn encode(&mut self, item: &T, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let start = dst.len();

        if let Err(e) = serde_json::to_writer((&mut *dst).writer(), item) {
            error!(cause = %e, "failed to serialize json line");
            // drop the partially written value
            dst.truncate(start);
            return Err(e.into());
        }

        dst.put_u8(b'\n');
        trace!(len = dst.len() - start, "encoded line");
        Ok(())
    }
}

impl<T: Serialize> Encoder<T> for JsonLinesEncoder<T> {
    type Error = EncodeError;

    fn encode(&mut self, item: T, dst: &mut BytesMut) -> Result<(), Self::Error> {
        Encoder::<&T>::encode(self, &item, dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::Error as _;
    use serde::{Serialize, Serializer};
    use serde_json::{Value, json};

    #[test]
    fn test_basic() {
        let mut encoder = JsonLinesEncoder::<Value>::new();
        let mut buffer = BytesMut::new();

        encoder.encode(&json!({"id": 1, "title": "a"}), &mut buffer).unwrap();
        encoder.encode(json!([1, 2]), &mut buffer).unwrap();

        assert_eq!(&buffer[..], b"{\"id\":1,\"title\":\"a\"}\n[1,2]\n");
    }

    #[test]
    fn test_newline_in_string_is_escaped() {
        let mut encoder = JsonLinesEncoder::<Value>::new();
        let mut buffer = BytesMut::new();

        encoder.encode(&json!("two\nlines"), &mut buffer).unwrap();

        assert_eq!(&buffer[..], b"\"two\\nlines\"\n");
        assert_eq!(buffer.iter().filter(|&&b| b == b'\n').count(), 1);
    }

    struct Broken;

    impl Serialize for Broken {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("broken value"))
        }
    }

    #[test]
    fn test_failed_value_leaves_buffer_untouched() {
        let mut encoder = JsonLinesEncoder::<Broken>::new();
        let mut buffer = BytesMut::from(&b"[0]\n"[..]);

        let result = encoder.encode(&Broken, &mut buffer);

        assert!(matches!(result, Err(EncodeError::Json { .. })));
        assert_eq!(&buffer[..], b"[0]\n");
    }
}
