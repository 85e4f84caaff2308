/// Implementation of `blob encode`.
///
/// Parses a JSON manifest (format documented in [`crate::manifest`]) and
/// writes the encoded blob to `-o`.
///
/// ```text
/// ┌─────────────────┬──────────────────────────────────────────────┐
/// │ Flag            │ Effect                                       │
/// ├─────────────────┼──────────────────────────────────────────────┤
/// │ --big-endian    │ Write multi-byte values big-endian           │
/// │ --little-endian │ Write multi-byte values little-endian        │
/// │ (neither)       │ Host byte order                              │
/// └─────────────────┴──────────────────────────────────────────────┘
/// ```
use std::fs;

use anyhow::{Context, Result};
use blob_encoder::BlobEncoder;
use blob_types::ByteOrder;

use crate::EncodeArgs;
use crate::manifest::Manifest;

/// Run the `blob encode` command.
///
/// # Errors
///
/// Returns an error if the manifest cannot be read or parsed, any record
/// entry is invalid, or the output cannot be written.
pub fn run(args: &EncodeArgs) -> Result<()> {
    let manifest_src = fs::read_to_string(&args.input)
        .with_context(|| format!("cannot read {}", args.input.display()))?;

    let manifest: Manifest = serde_json::from_str(&manifest_src)
        .with_context(|| format!("failed to parse manifest {}", args.input.display()))?;

    let mut encoder = BlobEncoder::new();
    encoder.byte_order(byte_order(args));

    for (idx, entry) in manifest.records.iter().enumerate() {
        let record = entry
            .to_record()
            .with_context(|| format!("record {idx}: invalid entry"))?;
        encoder.add_record(record);
    }

    let bytes = encoder.encode().context("failed to encode blob")?;

    fs::write(&args.output, &bytes)
        .with_context(|| format!("cannot write {}", args.output.display()))?;

    println!(
        "Wrote {} records ({} bytes) to {}",
        encoder.len(),
        bytes.len(),
        args.output.display()
    );
    Ok(())
}

fn byte_order(args: &EncodeArgs) -> ByteOrder {
    if args.big_endian {
        ByteOrder::Big
    } else if args.little_endian {
        ByteOrder::Little
    } else {
        ByteOrder::native()
    }
}
