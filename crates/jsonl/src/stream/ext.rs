use std::io;

use bytes::Buf;
use futures::Stream;
use serde::de::DeserializeOwned;
use tokio::io::AsyncRead;
use tokio_util::io::StreamReader;

use super::JsonLines;
use crate::protocol::{JsonDecoder, JsonLinesConfig, LineDecode};

/// Decodes JSON Lines from any [`AsyncRead`].
///
/// # Example
///
/// ```
/// use futures::StreamExt;
/// use micro_jsonl::AsyncReadJsonLinesExt;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Todo {
///     id: u64,
///     completed: bool,
/// }
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let source: &[u8] = b"{\"id\":1,\"completed\":false}\n\n{\"id\":2,\"completed\":true}";
/// let mut todos = source.json_lines::<Todo>();
///
/// while let Some(todo) = todos.next().await {
///     let todo = todo?;
///     println!("{} completed: {}", todo.id, todo.completed);
/// }
/// # Ok::<(), micro_jsonl::JsonLinesError>(())
/// # }).unwrap();
/// ```
pub trait AsyncReadJsonLinesExt: AsyncRead + Sized {
    fn json_lines<T>(self) -> JsonLines<Self, T, JsonDecoder>
    where
        T: DeserializeOwned,
    {
        JsonLines::new(self)
    }

    /// Decodes every line with `decoder` instead of the default [`JsonDecoder`].
    fn json_lines_with<T, D>(self, decoder: D) -> JsonLines<Self, T, D>
    where
        D: LineDecode<T>,
    {
        JsonLines::with_decoder(self, decoder, JsonLinesConfig::default())
    }

    fn json_lines_with_config<T, D>(self, decoder: D, config: JsonLinesConfig) -> JsonLines<Self, T, D>
    where
        D: LineDecode<T>,
    {
        JsonLines::with_decoder(self, decoder, config)
    }
}

impl<R: AsyncRead> AsyncReadJsonLinesExt for R {}

/// Decodes JSON Lines from a stream of byte chunks, such as an HTTP response body.
///
/// Chunk boundaries are irrelevant: a line may span any number of chunks and a chunk may hold
/// any number of lines. Stream errors are converted into `std::io::Error` and end the sequence.
pub trait StreamJsonLinesExt<B, E>: Stream<Item = Result<B, E>> + Sized
where
    B: Buf,
    E: Into<io::Error>,
{
    fn json_lines<T>(self) -> JsonLines<StreamReader<Self, B>, T, JsonDecoder>
    where
        T: DeserializeOwned,
    {
        JsonLines::new(StreamReader::new(self))
    }

    /// Decodes every line with `decoder` instead of the default [`JsonDecoder`].
    fn json_lines_with<T, D>(self, decoder: D) -> JsonLines<StreamReader<Self, B>, T, D>
    where
        D: LineDecode<T>,
    {
        JsonLines::with_decoder(StreamReader::new(self), decoder, JsonLinesConfig::default())
    }

    fn json_lines_with_config<T, D>(self, decoder: D, config: JsonLinesConfig) -> JsonLines<StreamReader<Self, B>, T, D>
    where
        D: LineDecode<T>,
    {
        JsonLines::with_decoder(StreamReader::new(self), decoder, config)
    }
}

impl<S, B, E> StreamJsonLinesExt<B, E> for S
where
    S: Stream<Item = Result<B, E>>,
    B: Buf,
    E: Into<io::Error>,
{
}
