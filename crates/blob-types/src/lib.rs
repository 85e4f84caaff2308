#![warn(clippy::pedantic)]

pub mod array;
pub mod error;
pub mod extra;
pub mod record;

pub use array::{ArrayData, ArrayRecord, shape_product};
pub use blob_wire::{ByteOrder, DType};
pub use error::TypeError;
pub use extra::Extra;
pub use record::Record;
