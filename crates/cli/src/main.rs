//! Market Module Command Line Interface
//!
//! Initializes a market home from genesis, queries the governed parameters
//! and builds, inspects and executes parameter-change proposals.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;

use config::{CliConfig, LogFormat, OutputFormat, Overrides};

#[derive(Parser)]
#[command(name = "market-cli")]
#[command(about = "Market Module Command Line Interface", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to <home>/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Market home directory
    #[arg(long, global = true, value_name = "DIR")]
    home: Option<PathBuf>,

    /// Log filter, e.g. `info` or `market::params=debug`
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    output: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write genesis market parameters into the home store
    Init {
        /// Genesis JSON file (`{"params": {...}}`); defaults are used if absent
        #[arg(long, value_name = "FILE")]
        genesis: Option<PathBuf>,
        /// Overwrite parameters that are already present
        #[arg(long)]
        force: bool,
    },
    /// Query stored state
    Query {
        #[command(subcommand)]
        action: QueryCommands,
    },
    /// Build transactions and proposals
    Tx {
        #[command(subcommand)]
        action: TxCommands,
    },
    /// Governance operations
    Gov {
        #[command(subcommand)]
        action: GovCommands,
    },
    /// Inspect the module codec
    Codec {
        #[command(subcommand)]
        action: CodecCommands,
    },
}

#[derive(Subcommand)]
enum QueryCommands {
    /// Show the full parameter set
    Params,
    /// Show one parameter by its store key (e.g. `tobintax`)
    Param { key: String },
}

#[derive(Subcommand)]
enum TxCommands {
    /// Encode a parameter-change proposal and print it as hex
    ParamsProposal {
        /// JSON file holding the complete replacement parameter set
        #[arg(long, value_name = "FILE")]
        file: PathBuf,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
    },
}

#[derive(Subcommand)]
enum GovCommands {
    /// Execute an accepted proposal against the home store
    Execute {
        /// Hex-encoded proposal bytes
        proposal: String,
    },
}

#[derive(Subcommand)]
enum CodecCommands {
    /// Decode hex-encoded message bytes to tagged JSON
    Decode { bytes: String },
    /// List registered type tags
    Tags,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::load(&Overrides {
        config_path: cli.config,
        home: cli.home,
        log_level: cli.log_level,
        log_format: cli.log_format,
        output: cli.output,
    })?;
    init_logging(&config);

    let output = match cli.command {
        Commands::Init { genesis, force } => commands::init(&config, genesis.as_deref(), force)?,
        Commands::Query { action } => match action {
            QueryCommands::Params => commands::query_params(&config)?,
            QueryCommands::Param { key } => commands::query_param(&config, &key)?,
        },
        Commands::Tx { action } => match action {
            TxCommands::ParamsProposal {
                file,
                title,
                description,
            } => commands::params_proposal(&file, &title, &description)?,
        },
        Commands::Gov { action } => match action {
            GovCommands::Execute { proposal } => commands::gov_execute(&config, &proposal)?,
        },
        Commands::Codec { action } => match action {
            CodecCommands::Decode { bytes } => commands::codec_decode(&config, &bytes)?,
            CodecCommands::Tags => commands::codec_tags(),
        },
    };

    println!("{output}");
    Ok(())
}

/// Logs go to stderr so rendered output on stdout stays machine readable.
fn init_logging(config: &CliConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    match config.log_format {
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}
