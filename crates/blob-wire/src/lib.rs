#![warn(clippy::pedantic)]

pub mod byte_order;
pub mod dtype;
pub mod error;
pub mod extra_flag;
pub mod half;
pub mod header;

pub use byte_order::ByteOrder;
pub use dtype::DType;
pub use error::WireError;
pub use extra_flag::ExtraFlag;
pub use header::{HEADER_SIZE, MAX_DIMS, RECORD_SEPARATOR, RecordHeader, ShapeWidth};
