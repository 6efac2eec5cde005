//! pnrgov CLI - split PNRGOV messages and extract passengers from DOCS free text

use clap::{Parser, Subcommand};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use pnrgov::pnr::{split_pnrs_with, HEADER_TAG};
use pnrgov::{
    EdifactLexer, MessageEnvelope, NameNormalizer, NameTables, NdjsonWriter, PassengerBuilder,
    Record, SegmentLexer, Ssr, Tif, TravelerDetails,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pnrgov")]
#[command(version, about = "PNRGOV message splitting and passenger extraction", long_about = None)]
struct Cli {
    /// YAML file with honorific/suffix tables (falls back to PNRGOV_NAMES)
    #[arg(long, global = true)]
    names: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a composite message into single-PNR messages (NDJSON envelopes)
    Split {
        /// Path to the composite PNRGOV message
        file: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build a passenger from SSR DOCS free text
    Docs {
        /// One or more DOCS free-text payloads for the same traveler
        #[arg(required = true)]
        free_text: Vec<String>,

        /// TIF surname
        #[arg(long)]
        surname: Option<String>,

        /// TIF given name
        #[arg(long)]
        given_name: Option<String>,

        /// TIF traveler reference number
        #[arg(long)]
        reference: Option<String>,
    },
}

fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let normalizer = match load_normalizer(cli.names) {
        Ok(n) => n,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Split { file, output } => run_split(&file, output.as_deref()),
        Commands::Docs {
            free_text,
            surname,
            given_name,
            reference,
        } => run_docs(&normalizer, free_text, surname, given_name, reference),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Load name tables with precedence: CLI > PNRGOV_NAMES > built-in defaults
fn load_normalizer(cli_path: Option<PathBuf>) -> Result<NameNormalizer, Box<dyn std::error::Error>> {
    let path = cli_path.or_else(|| std::env::var("PNRGOV_NAMES").ok().map(PathBuf::from));

    match path {
        Some(path) => {
            tracing::info!("Loading name tables from {}", path.display());
            Ok(NameNormalizer::new(NameTables::load_from_file(&path)?))
        }
        None => Ok(NameNormalizer::default()),
    }
}

fn run_split(file: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let message = fs::read_to_string(file)
        .map_err(|e| format!("Failed to read {}: {}", file.display(), e))?;

    let lexer = EdifactLexer::new(message)?;
    lexer.require_segment(HEADER_TAG)?;
    let pnrs = split_pnrs_with(&lexer);
    let source = file.display().to_string();
    let envelopes = MessageEnvelope::wrap_all(pnrs, Some(&source));

    let sink: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };

    let mut writer = NdjsonWriter::new(sink);
    let count = writer.write_all(&envelopes)?;
    writer.finish()?;

    tracing::info!("Wrote {} PNRs from {}", count, source);
    Ok(())
}

fn run_docs(
    normalizer: &NameNormalizer,
    free_text: Vec<String>,
    surname: Option<String>,
    given_name: Option<String>,
    reference: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let docs: Vec<Ssr> = free_text.iter().map(|text| Ssr::docs(text)).collect();

    let details = if given_name.is_some() || reference.is_some() {
        vec![TravelerDetails {
            reference_number: reference,
            given_name,
        }]
    } else {
        Vec::new()
    };
    let tif = Tif { surname, details };

    match PassengerBuilder::new(normalizer).build(&docs, &tif) {
        Some(passenger) => {
            println!("{}", passenger.to_json_pretty()?);
            Ok(())
        }
        None => Err("No passenger could be built from the given segments".into()),
    }
}
