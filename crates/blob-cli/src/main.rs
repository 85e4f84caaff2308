/// Blob command-line tool. Inspect, validate, encode, and decode binary
/// array blobs.
///
/// # Command overview
///
/// ```text
/// blob <COMMAND> [OPTIONS]
///
/// Commands:
///   inspect    Print a one-line summary of every record in a blob
///   validate   Check a blob for structural correctness
///   encode     Create a blob from a JSON manifest
///   decode     Convert a blob back into a JSON manifest
///   help       Print help information
///
/// Global options:
///   -v, --verbose    Log decode/encode details to stderr
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                 |
/// |------|-----------------------------------------|
/// | 0    | Success                                 |
/// | 1    | Error (I/O failure, invalid blob, etc.) |
///
/// Diagnostics and logs go to stderr so stdout can be piped cleanly.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod cmd_decode;
mod cmd_encode;
mod cmd_inspect;
mod cmd_validate;
mod logging;
mod manifest;
mod source;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// Command-line tool for the binary array blob format.
#[derive(Parser)]
#[command(name = "blob", version, about = "Binary array blob CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log at debug level instead of warn (overridden by `RUST_LOG`).
    #[arg(short, long, global = true)]
    verbose: bool,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Print a one-line summary of every record in a blob.
    Inspect(InspectArgs),
    /// Check a blob for structural correctness.
    Validate(ValidateArgs),
    /// Create a blob from a JSON manifest.
    Encode(EncodeArgs),
    /// Convert a blob back into a JSON manifest.
    Decode(DecodeArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// How a blob file is read: whole, or as a chunked stream.
#[derive(clap::Args)]
pub struct SourceArgs {
    /// Path to the blob file.
    pub file: PathBuf,

    /// Decode incrementally with the streaming decoder instead of reading
    /// the whole file first.
    #[arg(long)]
    pub stream: bool,

    /// Read size in bytes for `--stream`.
    #[arg(long, default_value_t = blob_decoder::DEFAULT_READ_CHUNK_SIZE)]
    pub chunk_size: usize,
}

/// Arguments for `blob inspect`.
///
/// ```text
/// ┌──────────────────┬───────────────────────────────────────────────┐
/// │ Flag             │ Effect                                        │
/// ├──────────────────┼───────────────────────────────────────────────┤
/// │ --stream         │ Decode through the streaming decoder          │
/// │ --chunk-size N   │ Bytes per read when streaming (default 8192)  │
/// │ --record N       │ Show only the record at index N               │
/// └──────────────────┴───────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Inspect only the record at this zero-based index.
    #[arg(long)]
    pub record: Option<usize>,
}

/// Arguments for `blob validate`.
#[derive(clap::Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for `blob encode`.
///
/// Reads a JSON manifest (see [`manifest`]) and writes the encoded blob.
/// Without a byte-order flag the host's native order is used.
#[derive(clap::Args)]
pub struct EncodeArgs {
    /// Path to the JSON manifest describing the records to encode.
    pub input: PathBuf,

    /// Output blob path.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Write multi-byte values big-endian.
    #[arg(long, conflicts_with = "little_endian")]
    pub big_endian: bool,

    /// Write multi-byte values little-endian.
    #[arg(long)]
    pub little_endian: bool,
}

/// Arguments for `blob decode`.
#[derive(clap::Args)]
pub struct DecodeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Write the manifest to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("warning: {e:#}");
    }

    let result = match cli.command {
        Commands::Inspect(args) => cmd_inspect::run(&args),
        Commands::Validate(args) => cmd_validate::run(&args),
        Commands::Encode(args) => cmd_encode::run(&args),
        Commands::Decode(args) => cmd_decode::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
