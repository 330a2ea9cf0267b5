use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{bail, Result, WrapErr};
use console::style;
use huffpack::container;
use huffpack::decoding::TextDecoder;
use huffpack::encoding::TextEncoder;
use huffpack::io::{read_text, FileReport, TextFallback};
use huffpack::{CodeTable, CodecError, HuffmanTree};
use tracing::{info, warn};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[path = "huffpack/progress.rs"]
mod progress;

use progress::{describe, fmt_size, Progress, Stage};

const CONTAINER_EXTENSION: &str = "huff";

#[derive(Parser)]
#[command(version, about = "Compress and decompress text files with a Huffman code")]
struct Cli {
    /// Print more log output, repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a text file into a container
    Compress {
        input: PathBuf,
        /// Where to write the container, defaults to <INPUT>.huff
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Fail on input that is not UTF-8 instead of reading it as Latin-1
        #[arg(long)]
        strict_utf8: bool,
        /// Overwrite the output if it exists
        #[arg(short, long)]
        force: bool,
    },
    /// Restore the text stored in a container
    Decompress {
        input: PathBuf,
        /// Where to write the text, defaults to <INPUT> without .huff
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Overwrite the output if it exists
        #[arg(short, long)]
        force: bool,
    },
    /// Print the header and code table of a container
    Inspect { input: PathBuf },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Compress {
            input,
            output,
            strict_utf8,
            force,
        } => {
            let output = output.unwrap_or_else(|| compressed_path(&input));
            let fallback = if strict_utf8 {
                TextFallback::Strict
            } else {
                TextFallback::Latin1
            };
            compress(&input, &output, fallback, force)
        }
        Commands::Decompress {
            input,
            output,
            force,
        } => {
            let output = output.unwrap_or_else(|| decompressed_path(&input));
            decompress(&input, &output, force)
        }
        Commands::Inspect { input } => inspect(&input),
    }
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let indicatif_layer = IndicatifLayer::new();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(indicatif_layer.get_stderr_writer()),
        )
        .with(indicatif_layer)
        .with(level)
        .init();
}

fn compress(input: &Path, output: &Path, fallback: TextFallback, force: bool) -> Result<()> {
    check_output(output, force)?;
    let (source, size) = open_input(input)?;
    let progress = Progress::new(size);
    let bytes = progress
        .read_all(source)
        .wrap_err_with(|| format!("failed to read {}", input.display()))?;
    let input_bytes = bytes.len() as u64;

    progress.stage(Stage::Counting);
    let text = read_text(bytes, fallback)
        .wrap_err_with(|| format!("failed to read {} as text", input.display()))?;
    let encoder = match TextEncoder::new(&text) {
        Ok(encoder) => encoder,
        Err(err) if err.is_empty_input() => {
            warn!("{} is empty, nothing was written", input.display());
            return Ok(());
        }
        Err(err) => {
            return Err(err).wrap_err_with(|| format!("failed to compress {}", input.display()))
        }
    };

    progress.stage(Stage::Packing {
        bits: encoder.encoded_bits(),
    });
    let packed = encoder
        .encode()
        .wrap_err_with(|| format!("failed to compress {}", input.display()))?;

    progress.stage(Stage::Writing);
    write_output(output, &packed)?;
    let elapsed = progress.finish();
    let report = FileReport {
        input_bytes,
        output_bytes: packed.len() as u64,
    };
    summary("compressed", input, output, &report, elapsed);
    Ok(())
}

fn decompress(input: &Path, output: &Path, force: bool) -> Result<()> {
    check_output(output, force)?;
    let (source, size) = open_input(input)?;
    let progress = Progress::new(size);
    let bytes = progress
        .read_all(source)
        .wrap_err_with(|| format!("failed to read {}", input.display()))?;

    progress.stage(Stage::Parsing);
    let decoder = match TextDecoder::new(&bytes) {
        Ok(decoder) => decoder,
        Err(err) if err.is_empty_input() => {
            warn!("{} holds no symbols, nothing was written", input.display());
            return Ok(());
        }
        Err(err) => {
            return Err(err).wrap_err_with(|| format!("failed to decompress {}", input.display()))
        }
    };

    progress.stage(Stage::Decoding {
        symbols: decoder.header().frequencies.total(),
    });
    let text = decoder
        .decode()
        .map_err(CodecError::from)
        .wrap_err_with(|| format!("failed to decompress {}", input.display()))?;

    progress.stage(Stage::Writing);
    write_output(output, text.as_bytes())?;
    let elapsed = progress.finish();
    let report = FileReport {
        input_bytes: bytes.len() as u64,
        output_bytes: text.len() as u64,
    };
    summary("decompressed", input, output, &report, elapsed);
    Ok(())
}

fn inspect(input: &Path) -> Result<()> {
    let bytes = fs::read(input).wrap_err_with(|| format!("failed to read {}", input.display()))?;
    let parsed = container::deserialize(&bytes)
        .map_err(CodecError::from)
        .wrap_err_with(|| format!("{} is not a valid container", input.display()))?;
    let frequencies = &parsed.header.frequencies;

    println!("{}", style(input.display()).bold());
    println!("  header length  {} bytes", parsed.header_length);
    println!("  padding        {} bits", parsed.header.padding_bits);
    println!("  payload        {}", fmt_size(parsed.payload.len() as u64));
    println!("  symbols        {} ({} distinct)", frequencies.total(), frequencies.len());

    let tree = HuffmanTree::build(frequencies);
    let table = CodeTable::from_tree(tree.as_ref());
    if table.is_empty() {
        warn!("{} has an empty frequency table", input.display());
        return Ok(());
    }
    println!();
    println!("  {:<10} {:>12}  {}", "symbol", "count", "code");
    for (symbol, code) in table.iter() {
        let count = frequencies.get(*symbol).unwrap_or(0);
        println!(
            "  {:<10} {:>12}  {}",
            format!("{:?}", symbol),
            count,
            style(code).cyan()
        );
    }
    Ok(())
}

fn open_input(input: &Path) -> Result<(File, u64)> {
    let file = File::open(input).wrap_err_with(|| format!("failed to open {}", input.display()))?;
    let size = file
        .metadata()
        .wrap_err_with(|| format!("failed to stat {}", input.display()))?
        .len();
    Ok((file, size))
}

fn check_output(output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        bail!(
            "{} already exists, pass --force to overwrite it",
            output.display()
        );
    }
    Ok(())
}

fn write_output(output: &Path, data: &[u8]) -> Result<()> {
    fs::write(output, data).map_err(|source| CodecError::Io {
        path: output.to_path_buf(),
        source,
    })?;
    Ok(())
}

fn summary(action: &str, input: &Path, output: &Path, report: &FileReport, elapsed: Duration) {
    info!(
        input = %input.display(),
        output = %output.display(),
        elapsed_ms = elapsed.as_millis() as u64,
        "{}",
        action
    );
    println!(
        "{} {} -> {}  {}",
        style(action).green().bold(),
        input.display(),
        output.display(),
        style(describe(report)).dim()
    );
}

/// `<INPUT>.huff`
fn compressed_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".");
    name.push(CONTAINER_EXTENSION);
    PathBuf::from(name)
}

/// `<INPUT>` without the `.huff` extension, or `<INPUT>.txt` if it has none
fn decompressed_path(input: &Path) -> PathBuf {
    match input.extension() {
        Some(ext) if ext == CONTAINER_EXTENSION => input.with_extension(""),
        _ => {
            let mut name = input.as_os_str().to_owned();
            name.push(".txt");
            PathBuf::from(name)
        }
    }
}
