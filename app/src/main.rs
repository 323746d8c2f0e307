#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod command;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use flowscan_config::Config;
use flowscan_core::{EntityType, KeywordGroup};
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use command::{
    CommandStrategy, ExtractInput, ExtractStrategy, InfoInput, InfoStrategy, InitStrategy,
    ScanInput, ScanStrategy, SearchInput, SearchStrategy, TokenizeInput, TokenizeStrategy,
    VersionStrategy, read_text,
};

#[derive(Parser)]
#[command(name = "flowscan")]
#[command(about = "Multi-pattern text scanning and entity extraction", long_about = None)]
struct Cli {
    /// Config file (defaults to ~/flowscan/config.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find every occurrence of literal patterns
    Scan {
        /// Pattern to look for; ids follow argument order
        #[arg(short, long = "pattern", required = true)]
        patterns: Vec<String>,

        /// Compare bytes exactly
        #[arg(long)]
        case_sensitive: bool,

        /// Only keep matches bounded by non-word bytes
        #[arg(long)]
        whole_word: bool,

        /// Print only the number of matches
        #[arg(long)]
        count: bool,

        /// Text to scan (reads stdin when omitted)
        text: Option<String>,
    },
    /// Search with the keyword automaton
    Search {
        /// Keyword to look for; ids follow argument order
        #[arg(short, long = "pattern", required = true)]
        patterns: Vec<String>,

        /// Text to search (reads stdin when omitted)
        text: Option<String>,
    },
    /// Split text into typed tokens
    Tokenize {
        /// Print only word tokens
        #[arg(long)]
        words: bool,

        /// Text to tokenize (reads stdin when omitted)
        text: Option<String>,
    },
    /// Extract dates, amounts, emails and keywords
    Extract {
        /// Only extract entities of this type
        #[arg(short = 't', long = "type")]
        entity_type: Option<EntityType>,

        /// Run the three regex categories concurrently
        #[arg(long, conflicts_with_all = ["entity_type", "lines"])]
        parallel: bool,

        /// Treat each input line as a separate text (one result list per line)
        #[arg(long)]
        lines: bool,

        /// Extra keyword group, e.g. `org=Acme Corp,Globex`
        #[arg(short, long = "keywords", value_parser = command::parse_keyword_group)]
        keywords: Vec<KeywordGroup>,

        /// Text to extract from (reads stdin when omitted)
        text: Option<String>,
    },
    /// Show the effective configuration
    Info,
    /// Initialize configuration
    Init,
    /// Show version
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Scan {
            patterns,
            case_sensitive,
            whole_word,
            count,
            text,
        } => {
            let config = Config::resolve(cli.config.as_deref())?;
            let mut scanner = config.scanner;
            scanner.case_sensitive |= case_sensitive;
            scanner.whole_word |= whole_word;

            ScanStrategy.execute(ScanInput {
                config: scanner,
                patterns,
                count,
                text: read_text(text)?,
            })?;
        }
        Commands::Search { patterns, text } => {
            SearchStrategy.execute(SearchInput {
                patterns,
                text: read_text(text)?,
            })?;
        }
        Commands::Tokenize { words, text } => {
            TokenizeStrategy.execute(TokenizeInput {
                words,
                text: read_text(text)?,
            })?;
        }
        Commands::Extract {
            entity_type,
            parallel,
            lines,
            keywords,
            text,
        } => {
            let config = Config::resolve(cli.config.as_deref())?;
            debug!(extra_keyword_groups = keywords.len(), "starting extraction");

            ExtractStrategy.execute(ExtractInput {
                config: config.extractor,
                entity_type,
                parallel,
                lines,
                keywords,
                text: read_text(text)?,
            })?;
        }
        Commands::Info => {
            let config = Config::resolve(cli.config.as_deref())?;
            InfoStrategy.execute(InfoInput {
                source: cli.config,
                config,
            })?;
        }
        Commands::Init => {
            InitStrategy.execute(())?;
        }
        Commands::Version => {
            VersionStrategy.execute(())?;
        }
    }

    Ok(())
}
