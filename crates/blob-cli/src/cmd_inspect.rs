/// Implementation of `blob inspect`.
///
/// Decodes a blob and prints one line per record. With `--record N` only
/// that record is shown.
///
/// # Output format
///
/// ```text
/// Blob: 3 records, 71 bytes
/// Record 0: float32 [2, 3] (6 elements, 24 bytes) extra=json (21 bytes)
/// Record 1: uint8 [2] (2 elements, 2 bytes)
/// Record 2: int32 scalar (1 element, 4 bytes) extra=bytes (4 bytes)
/// ```
use anyhow::{Result, bail};
use blob_types::{Extra, Record};

use crate::InspectArgs;
use crate::source;

/// Run the `blob inspect` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded, or if
/// `--record` is out of range.
pub fn run(args: &InspectArgs) -> Result<()> {
    let loaded = source::load(&args.source)?;
    let count = loaded.records.len();

    println!(
        "Blob: {count} record{}, {} bytes",
        if count == 1 { "" } else { "s" },
        loaded.size
    );

    if let Some(target) = args.record
        && target >= count
    {
        bail!("record {target} out of range ({count} records)");
    }

    for (idx, record) in loaded.records.iter().enumerate() {
        if let Some(target) = args.record
            && idx != target
        {
            continue;
        }
        println!("Record {idx}: {}", describe(record));
    }

    Ok(())
}

/// One-line summary of a record, without the index prefix.
pub fn describe(record: &Record) -> String {
    use std::fmt::Write as _;

    let array = &record.array;
    let shape = if array.shape.is_empty() {
        "scalar".to_string()
    } else {
        format!("{:?}", array.shape)
    };
    let elements = array.data.len();

    let mut line = format!(
        "{} {shape} ({elements} element{}, {} bytes)",
        array.dtype(),
        if elements == 1 { "" } else { "s" },
        array.data.byte_len()
    );

    match &record.extra {
        None => {}
        Some(Extra::Bytes(bytes)) => {
            let _ = write!(line, " extra=bytes ({} bytes)", bytes.len());
        }
        Some(extra @ Extra::Json(_)) => match extra.to_payload() {
            Ok(payload) => {
                let _ = write!(line, " extra=json ({} bytes)", payload.len());
            }
            Err(_) => line.push_str(" extra=json"),
        },
    }
    line
}
