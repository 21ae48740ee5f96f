use std::io;
use thiserror::Error;

/// Top level error yielded by [`JsonLines`](crate::JsonLines) and
/// [`JsonLinesIter`](crate::JsonLinesIter).
///
/// Framing errors end the sequence, decode errors only affect the line they were raised for.
#[derive(Debug, Error)]
pub enum JsonLinesError {
    #[error("framing error: {source}")]
    Framing {
        #[from]
        source: FramingError,
    },

    #[error("decode error at line {line}: {source}")]
    Decode { line: u64, source: DecodeError },
}

impl JsonLinesError {
    pub fn decode(line: u64, source: DecodeError) -> Self {
        Self::Decode { line, source }
    }

    /// Returns true if no more values can be read after this error
    #[inline]
    pub fn is_fatal(&self) -> bool {
        matches!(self, JsonLinesError::Framing { .. })
    }

    /// Returns the line number of the malformed line, if this is a decode error
    pub fn line(&self) -> Option<u64> {
        match self {
            JsonLinesError::Decode { line, .. } => Some(*line),
            JsonLinesError::Framing { .. } => None,
        }
    }
}

impl From<io::Error> for JsonLinesError {
    fn from(e: io::Error) -> Self {
        FramingError::io(e).into()
    }
}

#[derive(Error, Debug)]
pub enum FramingError {
    #[error("line size too large, current: {current_size} exceed the limit {max_size}")]
    LineTooLong { current_size: usize, max_size: usize },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl FramingError {
    pub fn line_too_long(current_size: usize, max_size: usize) -> Self {
        Self::LineTooLong { current_size, max_size }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("invalid json: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    #[error("invalid line: {reason}")]
    Invalid { reason: String },
}

impl DecodeError {
    pub fn invalid<S: ToString>(str: S) -> Self {
        Self::Invalid { reason: str.to_string() }
    }

    /// Returns the underlying `serde_json` error, if any
    pub fn as_json(&self) -> Option<&serde_json::Error> {
        match self {
            DecodeError::Json { source } => Some(source),
            DecodeError::Invalid { .. } => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("serialize json error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framing_errors_are_fatal() {
        let error: JsonLinesError = io::Error::new(io::ErrorKind::BrokenPipe, "closed").into();
        assert!(error.is_fatal());
        assert_eq!(error.line(), None);

        let error: JsonLinesError = FramingError::line_too_long(10, 4).into();
        assert!(error.is_fatal());
        assert_eq!(error.to_string(), "framing error: line size too large, current: 10 exceed the limit 4");
    }

    #[test]
    fn test_decode_error_keeps_line() {
        let json_error = serde_json::from_slice::<u32>(b"nope").unwrap_err();
        let error = JsonLinesError::decode(3, json_error.into());

        assert!(!error.is_fatal());
        assert_eq!(error.line(), Some(3));
        assert!(error.to_string().starts_with("decode error at line 3: invalid json:"));
    }

    #[test]
    fn test_invalid_reason() {
        let error = DecodeError::invalid("empty title");
        assert!(error.as_json().is_none());
        assert_eq!(error.to_string(), "invalid line: empty title");
    }
}
