//! snaprecord CLI
//!
//! Command-line access to one record collection stored in a local file.
//!
//! # Commands
//!
//! - `list` - Print every stored record, or the first/last few
//! - `show` - Print one record by id
//! - `find` - Print the first record whose attribute matches a value
//! - `create` - Create a record from `key=value` pairs
//! - `update` - Assign `key=value` pairs to a stored record
//! - `destroy` - Remove a record by id

mod commands;

use clap::{Parser, Subcommand};
use commands::Context;
use snaprecord_codec::Format;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Inspect and edit snaprecord collections.
#[derive(Parser)]
#[command(name = "snaprecord")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory the source is resolved against
    #[arg(global = true, short, long)]
    root: Option<PathBuf>,

    /// Collection source name, without extension
    #[arg(global = true, short, long, default_value = "records")]
    source: String,

    /// Declared property (repeatable); stored keys are added automatically
    #[arg(global = true, short, long = "property")]
    properties: Vec<String>,

    /// Collection encoding (json, cbor)
    #[arg(global = true, short, long, default_value = "json")]
    format: Format,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print stored records
    List {
        /// Only the first N records
        #[arg(long, conflicts_with = "last")]
        first: Option<usize>,

        /// Only the last N records
        #[arg(long)]
        last: Option<usize>,
    },

    /// Print one record by id
    Show {
        /// Record id
        id: String,
    },

    /// Print the first record whose attribute matches a value
    ///
    /// Array attributes match when they contain the value.
    Find {
        /// Attribute name
        attribute: String,

        /// Expected value (JSON, or plain text)
        value: String,
    },

    /// Create a record
    Create {
        /// Attributes as key=value (value is JSON, or plain text)
        #[arg(value_name = "KEY=VALUE")]
        assignments: Vec<String>,
    },

    /// Assign attributes to a stored record and save it
    Update {
        /// Record id
        id: String,

        /// Attributes as key=value (value is JSON, or plain text)
        #[arg(value_name = "KEY=VALUE", required = true)]
        assignments: Vec<String>,
    },

    /// Remove a record by id
    Destroy {
        /// Record id
        id: String,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let ctx = Context {
        root: cli.root,
        source: cli.source,
        properties: cli.properties,
        format: cli.format,
    };

    match cli.command {
        Commands::List { first, last } => commands::query::list(&ctx, first, last)?,
        Commands::Show { id } => commands::query::show(&ctx, &id)?,
        Commands::Find { attribute, value } => commands::query::find(&ctx, &attribute, &value)?,
        Commands::Create { assignments } => commands::mutate::create(&ctx, &assignments)?,
        Commands::Update { id, assignments } => commands::mutate::update(&ctx, &id, &assignments)?,
        Commands::Destroy { id } => commands::mutate::destroy(&ctx, &id)?,
        Commands::Version => {
            println!("snaprecord CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("snaprecord core v{}", snaprecord_core::VERSION);
        }
    }

    Ok(())
}
