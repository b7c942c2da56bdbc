use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use huffcode::{compress_with, Archive, CompressOptions, CompressionStats, Compressed, Symbol};

#[derive(Parser)]
#[command(name = "huff", version)]
#[command(about = "Huffman-code text, show the code tables, and read or write archives.", long_about = None)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace). HUFF_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress text and report frequencies, codes and sizes
    Compress {
        /// Text to compress
        #[arg(short, long, conflicts_with = "input")]
        text: Option<String>,
        /// File to compress (stdin when neither --text nor --input is given)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Treat input as raw bytes instead of UTF-8 characters
        #[arg(long)]
        bytes: bool,
        /// Width of one uncompressed symbol, for the size statistics
        #[arg(
            long,
            default_value_t = huffcode::compress::DEFAULT_BITS_PER_SYMBOL,
            value_parser = clap::value_parser!(u32).range(1..)
        )]
        bits_per_symbol: u32,
        /// Write an archive to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
        /// Include the encoded bit string in the report
        #[arg(long)]
        show_bits: bool,
    },
    /// Decode an archive
    Decode {
        archive: PathBuf,
        /// Write the decoded data here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// The archive was written with --bytes
        #[arg(long)]
        bytes: bool,
    },
    /// List the alphabet and canonical codes stored in an archive
    Inspect {
        archive: PathBuf,
        /// The archive was written with --bytes
        #[arg(long)]
        bytes: bool,
    },
}

#[derive(Serialize)]
struct FrequencyRow {
    symbol: String,
    count: u64,
}

#[derive(Serialize)]
struct CodeRow {
    symbol: String,
    code: String,
}

#[derive(Serialize)]
struct Report {
    frequencies: Vec<FrequencyRow>,
    codes: Vec<CodeRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    encoded: Option<String>,
    tree_depth: usize,
    average_code_length: f64,
    stats: CompressionStats,
}

impl Report {
    fn new<S: Symbol>(c: &Compressed<S>, show_bits: bool) -> Self {
        Self {
            frequencies: c
                .frequency_table
                .iter()
                .map(|(s, count)| FrequencyRow {
                    symbol: s.label(),
                    count,
                })
                .collect(),
            codes: c
                .code_table
                .iter()
                .map(|(s, code)| CodeRow {
                    symbol: s.label(),
                    code: code.to_string(),
                })
                .collect(),
            encoded: show_bits.then(|| c.encoded.to_string()),
            tree_depth: c.tree.depth(),
            average_code_length: c.average_code_length(),
            stats: c.stats,
        }
    }

    fn print<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Frequency Table")?;
        writeln!(out, "{:<12}{}", "Character", "Frequency")?;
        for row in &self.frequencies {
            writeln!(out, "{:<12}{}", row.symbol, row.count)?;
        }
        writeln!(out)?;

        writeln!(out, "Huffman Code Table")?;
        writeln!(out, "{:<12}{}", "Character", "Code")?;
        for row in &self.codes {
            writeln!(out, "{:<12}{}", row.symbol, row.code)?;
        }
        writeln!(out)?;

        if let Some(bits) = &self.encoded {
            writeln!(out, "Encoded Data")?;
            writeln!(out, "{}", bits)?;
            writeln!(out)?;
        }

        writeln!(out, "File Stats")?;
        writeln!(out, "Original Size: {} bits", self.stats.original_bits)?;
        writeln!(out, "Compressed Size: {} bits", self.stats.compressed_bits)?;
        writeln!(out, "Compression Ratio: {:.2}", self.stats.ratio)?;
        writeln!(out, "Compression Percentage: {:.2}%", self.stats.savings_percent)?;
        writeln!(out, "Average Code Length: {:.3} bits/symbol", self.average_code_length)?;
        writeln!(out, "Tree Depth: {}", self.tree_depth)?;
        Ok(())
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("HUFF_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(text: Option<String>, input: Option<&Path>) -> io::Result<Vec<u8>> {
    match (text, input) {
        (Some(text), _) => Ok(text.into_bytes()),
        (None, Some(path)) => fs::read(path),
        (None, None) => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

fn into_chars(data: Vec<u8>) -> io::Result<Vec<char>> {
    let text = String::from_utf8(data).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("input is not UTF-8 ({e}); use --bytes"),
        )
    })?;
    Ok(text.chars().collect())
}

fn run_compress<S: Symbol>(
    symbols: &[S],
    options: &CompressOptions,
    output: Option<&Path>,
    json: bool,
    show_bits: bool,
) -> huffcode::Result<()> {
    let compressed = compress_with(symbols, options)?;

    if let Some(path) = output {
        let archive = Archive::from_compressed(&compressed)?;
        let mut writer = BufWriter::new(File::create(path)?);
        archive.write_to(&mut writer)?;
        writer.flush()?;
        info!(path = %path.display(), bits = archive.payload().len(), "archive written");
    }

    let report = Report::new(&compressed, show_bits);
    let mut out = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &report).map_err(io::Error::from)?;
        writeln!(out)?;
    } else {
        report.print(&mut out)?;
    }
    Ok(())
}

fn load_archive<S: Symbol>(path: &Path) -> huffcode::Result<Archive<S>> {
    let mut reader = BufReader::new(File::open(path)?);
    Archive::read_from(&mut reader)
}

fn write_output(data: &[u8], output: Option<&Path>) -> io::Result<()> {
    match output {
        Some(path) => fs::write(path, data),
        None => {
            let mut out = io::stdout().lock();
            out.write_all(data)?;
            out.flush()
        }
    }
}

fn run_inspect<S: Symbol>(path: &Path) -> huffcode::Result<()> {
    let archive = load_archive::<S>(path)?;
    let mut out = io::stdout().lock();
    writeln!(out, "Symbols: {}", archive.symbol_count())?;
    writeln!(out, "Alphabet: {}", archive.code_lengths().len())?;
    writeln!(out, "Payload: {} bits", archive.payload().len())?;
    writeln!(out)?;
    writeln!(out, "{:<12}{:<8}{}", "Character", "Length", "Code")?;
    let table = archive.code_table();
    for &(symbol, len) in archive.code_lengths() {
        let code = table.get(symbol).map(|c| c.to_string()).unwrap_or_default();
        writeln!(out, "{:<12}{:<8}{}", symbol.label(), len, code)?;
    }
    Ok(())
}

fn run(cli: Cli) -> huffcode::Result<()> {
    match cli.command {
        Commands::Compress {
            text,
            input,
            bytes,
            bits_per_symbol,
            output,
            json,
            show_bits,
        } => {
            let data = read_input(text, input.as_deref())?;
            let options = CompressOptions { bits_per_symbol };
            if bytes {
                run_compress(&data, &options, output.as_deref(), json, show_bits)
            } else {
                let chars = into_chars(data)?;
                run_compress(&chars, &options, output.as_deref(), json, show_bits)
            }
        }
        Commands::Decode {
            archive,
            output,
            bytes,
        } => {
            let data = if bytes {
                load_archive::<u8>(&archive)?.decode()?
            } else {
                let chars = load_archive::<char>(&archive)?.decode()?;
                chars.into_iter().collect::<String>().into_bytes()
            };
            write_output(&data, output.as_deref())?;
            Ok(())
        }
        Commands::Inspect { archive, bytes } => {
            if bytes {
                run_inspect::<u8>(&archive)
            } else {
                run_inspect::<char>(&archive)
            }
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let span = tracing::info_span!("command_execution", command = ?std::env::args().collect::<Vec<_>>());
    let _enter = span.enter();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
