#![warn(clippy::pedantic)]

pub mod chunk_queue;
pub mod decoder;
pub mod error;
pub mod reader;
pub mod streaming;

mod record_parser;

pub use chunk_queue::{ChunkQueue, QueueCursor};
pub use decoder::{BlobDecoder, decode};
pub use error::DecodeError;
pub use reader::{InsufficientData, SliceReader, TakeBytes};
pub use streaming::{ChunkStream, DEFAULT_READ_CHUNK_SIZE, StreamingDecoder, reader_chunks};
