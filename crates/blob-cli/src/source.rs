//! Reading records out of a blob file, whole or streamed.

use std::fs;

use anyhow::{Context, Result};
use blob_decoder::{BlobDecoder, StreamingDecoder, reader_chunks};
use blob_types::Record;

use crate::SourceArgs;

/// Decoded contents of a blob file.
pub struct Loaded {
    pub records: Vec<Record>,
    /// Size of the file in bytes.
    pub size: u64,
}

/// Decode every record in `args.file`.
///
/// With `--stream` the file is fed through [`StreamingDecoder`] in
/// `--chunk-size` reads on a current-thread runtime; otherwise it is read
/// into memory and decoded in one pass. Both paths yield the same records.
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails to decode.
pub fn load(args: &SourceArgs) -> Result<Loaded> {
    let path = &args.file;
    if !args.stream {
        let bytes = fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
        let records = BlobDecoder::decode(&bytes)
            .with_context(|| format!("failed to decode {}", path.display()))?;
        return Ok(Loaded {
            records,
            size: bytes.len() as u64,
        });
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("cannot start async runtime")?;

    runtime.block_on(async {
        let file = tokio::fs::File::open(path)
            .await
            .with_context(|| format!("cannot open {}", path.display()))?;
        let size = file
            .metadata()
            .await
            .with_context(|| format!("cannot stat {}", path.display()))?
            .len();

        let mut decoder = StreamingDecoder::new(reader_chunks(file, args.chunk_size));
        let mut records = Vec::new();
        while let Some(item) = decoder.next().await {
            let record = item.with_context(|| {
                format!(
                    "failed to decode {} (record {})",
                    path.display(),
                    records.len()
                )
            })?;
            records.push(record);
        }
        tracing::debug!(records = records.len(), size, "streamed blob file");
        Ok(Loaded { records, size })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // float64, 5 dims of 1, then only 4 of the 8 data bytes
    const TRUNCATED: [u8; 16] = [
        0x0B, 0x05, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 0xAA, 0xBB, 0xCC, 0xDD,
    ];

    #[test]
    fn truncated_file_reports_decoder_message() {
        let path = std::env::temp_dir().join(format!("blob-source-{}.blob", std::process::id()));
        fs::write(&path, TRUNCATED).unwrap();
        let args = SourceArgs {
            file: path.clone(),
            stream: false,
            chunk_size: blob_decoder::DEFAULT_READ_CHUNK_SIZE,
        };
        let message = format!("{:#}", load(&args).err().unwrap());
        fs::remove_file(&path).unwrap();

        assert_eq!(
            message,
            format!(
                "failed to decode {}: truncated buffer at offset 12: needed 8 bytes, 4 available",
                path.display()
            )
        );
    }
}
