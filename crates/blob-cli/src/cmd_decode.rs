/// Implementation of `blob decode`.
///
/// Decodes a blob and writes its records as a pretty-printed JSON manifest,
/// the same format `blob encode` reads. Float16 records come back as
/// float32, so they re-encode as float32.
use std::fs;
use std::io::{self, Write};

use anyhow::{Context, Result};

use crate::DecodeArgs;
use crate::manifest::Manifest;
use crate::source;

/// Run the `blob decode` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded, or the output
/// cannot be written.
pub fn run(args: &DecodeArgs) -> Result<()> {
    let loaded = source::load(&args.source)?;
    let manifest = Manifest::from_records(&loaded.records);
    let mut rendered =
        serde_json::to_string_pretty(&manifest).context("failed to serialize manifest")?;
    rendered.push('\n');

    if let Some(path) = &args.output {
        fs::write(path, rendered.as_bytes())
            .with_context(|| format!("cannot write {}", path.display()))?;
    } else {
        io::stdout()
            .lock()
            .write_all(rendered.as_bytes())
            .context("cannot write to stdout")?;
    }

    Ok(())
}
