//! Lehua - Main entrypoint.
//!
//! Loads configuration, sets up logging on stderr, and either serves JSON-RPC
//! over stdin/stdout or runs one of the maintenance subcommands.

use clap::{Parser, Subcommand};
use lehua_lib::config::{global_config, ConfigLoader, LehuaConfig, LogConfig, ENV_PREFIX};
use lehua_lib::data_structures::LehuaTrie;
use lehua_lib::error::{report_error, ErrorContext, LehuaError, LehuaResult};
use lehua_lib::protocol::jsonrpc::create_handler;
use lehua_lib::search::ContactIndex;
use lehua_lib::transport::serve_stdio;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line arguments for Lehua.
#[derive(Parser, Debug)]
#[clap(name = "lehua", version, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Serve newline-delimited JSON-RPC on stdin/stdout (default)
    Serve,

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },

    /// Print the words of a word list that start with a prefix
    Complete {
        /// Word list, one word per line, optionally followed by a tab and a payload
        #[clap(short, long, value_parser)]
        words: PathBuf,

        /// Prefix to complete
        prefix: String,
    },
}

/// Initialize the logging system.
///
/// `RUST_LOG` wins over the configured level. Output goes to stderr because
/// stdout carries protocol traffic.
fn init_logging(log: &LogConfig) -> LehuaResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&log.level))
        .map_err(|e| LehuaError::Custom(format!("Invalid log filter: {e}")))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(log.source_location)
        .with_line_number(log.source_location);

    let result = if log.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    result.map_err(|e| LehuaError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

/// Main entry point for the application.
fn main() {
    let args = Args::parse();

    if let Err(error) = run(args) {
        report_error(ErrorContext::new(error, "lehua"));
        process::exit(1);
    }
}

fn run(args: Args) -> LehuaResult<()> {
    let loaded = ConfigLoader::new(args.config.as_deref(), ENV_PREFIX).load();

    // Log with the defaults when the configuration itself is broken.
    let log = loaded
        .as_ref()
        .map(|config| config.log.clone())
        .unwrap_or_default();
    init_logging(&log)?;

    lehua_lib::init(loaded?);

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(global_config()),
        Command::Validate => {
            info!("Configuration validated successfully");
            Ok(())
        }
        Command::GenConfig { output } => gen_config(&output),
        Command::Complete { words, prefix } => complete(&words, &prefix),
    }
}

fn serve(config: &LehuaConfig) -> LehuaResult<()> {
    let mut index = ContactIndex::new(&config.search);
    if let Some(seed) = &config.search.seed_file {
        index.reload(ContactIndex::read_records(seed)?);
    }

    let handler = create_handler(&config.server, index);
    info!(
        name = %config.server.name,
        version = lehua_lib::VERSION,
        methods = handler.method_names().len(),
        "Serving JSON-RPC on stdio"
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(serve_stdio(&handler, config.server.max_message_size))?;
    Ok(())
}

fn gen_config(output: &Path) -> LehuaResult<()> {
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let toml = toml::to_string_pretty(&LehuaConfig::default())
        .map_err(|e| LehuaError::Custom(format!("Failed to serialize config: {e}")))?;
    std::fs::write(output, toml)?;

    info!(path = %output.display(), "Default configuration written");
    Ok(())
}

fn complete(words: &Path, prefix: &str) -> LehuaResult<()> {
    let file = std::fs::File::open(words)?;

    let mut trie = LehuaTrie::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        let (word, payload) = line.split_once('\t').unwrap_or((line.as_str(), ""));
        trie.insert(word.trim(), payload);
    }
    info!(words = trie.len(), "Word list loaded");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for (word, payload) in trie.entries_with_prefix(prefix) {
        if payload.is_empty() {
            writeln!(out, "{word}")?;
        } else {
            writeln!(out, "{word}\t{payload}")?;
        }
    }
    Ok(())
}
