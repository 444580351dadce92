#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::needless_pass_by_value)]

mod commands;
mod config;
mod logging;

use clap::Parser;
use miette::Result;
use std::path::PathBuf;

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "esload")]
#[command(author, version, about = "Inspect how module specifiers are classified and handed to a bundler", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Override the working directory
    #[arg(long, global = true, value_name = "PATH")]
    cwd: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print version information
    Version,

    /// Classify a specifier and show the bundler loader for it
    MediaType {
        /// URL or local path to classify
        specifier: String,

        /// Content-type header the module was served with
        #[arg(long, value_name = "TYPE")]
        content_type: Option<String>,
    },

    /// Encode a specifier as a bundler (namespace, path) pair
    Resolution {
        /// URL or local path to encode
        specifier: String,
    },

    /// Decode a bundler (namespace, path) pair back into a URL
    Url {
        /// Bundler namespace (e.g. "file", "https", "npm")
        namespace: String,

        /// Bundler path
        path: String,
    },

    /// Load a local module the way the bundler would receive it
    Load {
        /// file: URL or local path to load
        specifier: String,
    },

    /// Validate a deno.json / deno.jsonc config file
    Config {
        /// Config path (defaults to deno.json or deno.jsonc in the working directory)
        path: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cwd = cli
        .cwd
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let config = Config::new(cwd)
        .with_verbosity(cli.verbose)
        .with_json_logs(cli.json);

    logging::init(&config)?;

    match &cli.command {
        Commands::Version => commands::version::run(cli.json),
        Commands::MediaType {
            specifier,
            content_type,
        } => commands::media_type::run(&config, specifier, content_type.as_deref(), cli.json),
        Commands::Resolution { specifier } => {
            commands::resolution::encode(&config, specifier, cli.json)
        }
        Commands::Url { namespace, path } => commands::resolution::decode(namespace, path, cli.json),
        Commands::Load { specifier } => commands::load::run(&config, specifier, cli.json),
        Commands::Config { path } => commands::config::run(&config, path.as_deref(), cli.json),
    }
}
