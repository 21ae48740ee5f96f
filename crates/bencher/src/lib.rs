/// A benchmark input: a JSON Lines file and the chunk size it is delivered with.
#[derive(Debug, Copy, Clone)]
pub struct TestCase {
    name: &'static str,
    delivery: Delivery,
    file: TestFile,
}

impl TestCase {
    pub fn new(name: &'static str, delivery: Delivery, file: TestFile) -> Self {
        Self { name, delivery, file }
    }

    pub fn whole(name: &'static str, file: TestFile) -> Self {
        Self::new(name, Delivery::Whole, file)
    }

    pub fn chunked(name: &'static str, chunk_size: usize, file: TestFile) -> Self {
        Self::new(name, Delivery::Chunked(chunk_size), file)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn delivery(&self) -> Delivery {
        self.delivery
    }

    pub fn file(&self) -> &TestFile {
        &self.file
    }

    pub fn file_name(&self) -> &'static str {
        self.file().file_name
    }

    /// Splits the file content the way the source would deliver it.
    pub fn chunks(&self) -> Vec<&'static [u8]> {
        let content = self.file.content().as_bytes();
        match self.delivery {
            Delivery::Whole => vec![content],
            Delivery::Chunked(chunk_size) => content.chunks(chunk_size.max(1)).collect(),
        }
    }
}

#[derive(Debug, Copy, Clone)]
pub struct TestFile {
    file_name: &'static str,
    content: &'static str,
}

impl TestFile {
    pub const fn new(file_name: &'static str, content: &'static str) -> Self {
        Self { file_name, content }
    }

    pub fn content(&self) -> &'static str {
        self.content
    }

    pub fn file_name(&self) -> &'static str {
        self.file_name
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delivery {
    /// The whole file arrives at once
    Whole,
    /// The file arrives in chunks of at most this many bytes
    Chunked(usize),
}
