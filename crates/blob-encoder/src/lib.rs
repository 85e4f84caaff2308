#![warn(clippy::pedantic)]

pub mod encoder;
pub mod error;
pub mod record_writer;

pub use encoder::{BlobEncoder, EncodeOptions, encode};
pub use error::EncodeError;
