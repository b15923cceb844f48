//! Command-line interface for rdp
//! This binary runs the parsers built on the rdp toolkit over files.
//!
//! Usage:
//!   rdp ini `<path>`  [--config `<file>`] [--format json|yaml|text]  - Read an INI document
//!   rdp scan `<path>` [--config `<file>`] [--format json|yaml|text]  - List the literals in a file
//!
//! Configuration is read from the built-in defaults, then `./rdp.toml` if present, then the
//! file given with `--config`. `--format` overrides `output.format`.

mod error;
mod ini;
mod scan;

use clap::{Parser, Subcommand};
use error::CliError;
use rdp_config::{Loader, OutputFormat, RdpConfig};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "rdp")]
#[command(version, about = "Parse INI files and scan literals with the rdp toolkit")]
struct Args {
    /// Configuration file layered over the defaults
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Output format, overriding the configuration
    #[arg(long, short, global = true, value_parser = ["json", "yaml", "text"])]
    format: Option<String>,

    /// Log parser diagnostics (same as RUST_LOG=debug)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read an INI document and print it as a nested map
    Ini {
        /// Path to the INI file
        path: PathBuf,
    },
    /// Split a file into literal tokens
    Scan {
        /// Path to the file to scan
        path: PathBuf,
    },
}

fn main() -> ExitCode {
    use env_logger::{Builder, Env};

    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    match run(&args) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<String, CliError> {
    let config = load_config(args)?;
    log::debug!("output format: {:?}", config.output.format);

    match &args.command {
        Command::Ini { path } => handle_ini_command(path, &config),
        Command::Scan { path } => handle_scan_command(path, &config),
    }
}

fn load_config(args: &Args) -> Result<RdpConfig, CliError> {
    let mut loader = Loader::new().with_optional_file("rdp.toml");

    if let Some(path) = &args.config {
        loader = loader.with_file(path);
    }

    if let Some(format) = &args.format {
        loader = loader.set_override("output.format", format.as_str())?;
    }

    Ok(loader.build()?)
}

/// Handle the ini command
fn handle_ini_command(path: &Path, config: &RdpConfig) -> Result<String, CliError> {
    let text = fs::read_to_string(path)?;
    let filename = path.display().to_string();
    let document = ini::parse_ini(&text, &filename, &config.scan)?;
    render(&document, config.output.format, ini::to_ini)
}

/// Handle the scan command
fn handle_scan_command(path: &Path, config: &RdpConfig) -> Result<String, CliError> {
    let text = fs::read_to_string(path)?;
    let filename = path.display().to_string();
    let tokens = scan::scan(&text, &filename, config)?;
    render(tokens.as_slice(), config.output.format, scan::to_text)
}

fn render<T>(value: &T, format: OutputFormat, to_text: fn(&T) -> String) -> Result<String, CliError>
where
    T: Serialize + ?Sized,
{
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)? + "\n"),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
        OutputFormat::Text => Ok(to_text(value)),
    }
}
