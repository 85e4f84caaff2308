/// Implementation of `blob validate`.
///
/// Decodes the whole blob and prints either success checkmarks (`✓`) or a
/// diagnostic failure line (`✗`). Exit code 1 on failure comes from the
/// dispatcher in `main.rs`.
///
/// # Success output
///
/// ```text
/// ✓ Records: 3 records parsed successfully
/// ✓ Extras: 2 records carry an extra payload
/// ✓ Size: 71 bytes consumed
/// ```
///
/// # Failure output
///
/// ```text
/// ✗ Error: failed to decode data.blob: truncated buffer at offset 12: needed 8 bytes, 4 available
/// ```
use anyhow::{Result, anyhow};

use crate::ValidateArgs;
use crate::source;

/// Run the `blob validate` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails to decode.
pub fn run(args: &ValidateArgs) -> Result<()> {
    match source::load(&args.source) {
        Ok(loaded) => {
            let count = loaded.records.len();
            let with_extra = loaded.records.iter().filter(|r| r.extra.is_some()).count();
            println!(
                "✓ Records: {count} record{} parsed successfully",
                if count == 1 { "" } else { "s" }
            );
            println!(
                "✓ Extras: {with_extra} record{} an extra payload",
                if with_extra == 1 { " carries" } else { "s carry" }
            );
            println!("✓ Size: {} bytes consumed", loaded.size);
            Ok(())
        }
        Err(e) => {
            println!("✗ Error: {e:#}");
            Err(anyhow!("validation failed"))
        }
    }
}
