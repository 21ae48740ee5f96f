/// Maximum size in bytes of a single line, delimiter excluded
pub const DEFAULT_MAX_LINE_BYTES: usize = 8 * 1024 * 1024;

/// Initial capacity of the read buffer
pub const DEFAULT_READ_CAPACITY: usize = 8 * 1024;

/// Framing options for [`JsonLines`](crate::JsonLines) and [`JsonLinesIter`](crate::JsonLinesIter).
///
/// Decoder options are not part of this config, they travel with the decoder itself.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct JsonLinesConfig {
    max_line_length: usize,
    read_capacity: usize,
}

impl JsonLinesConfig {
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the longest accepted line. Longer lines abort the stream with
    /// [`FramingError::LineTooLong`](crate::FramingError::LineTooLong).
    pub fn with_max_line_length(mut self, max_line_length: usize) -> Self {
        self.max_line_length = max_line_length;
        self
    }

    pub fn with_read_capacity(mut self, read_capacity: usize) -> Self {
        self.read_capacity = read_capacity;
        self
    }

    #[inline]
    pub fn max_line_length(&self) -> usize {
        self.max_line_length
    }

    #[inline]
    pub fn read_capacity(&self) -> usize {
        self.read_capacity
    }
}

impl Default for JsonLinesConfig {
    fn default() -> Self {
        Self { max_line_length: DEFAULT_MAX_LINE_BYTES, read_capacity: DEFAULT_READ_CAPACITY }
    }
}
