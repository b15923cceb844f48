//! Errors surfaced by the `rdp` binary

use rdp_config::ConfigError;
use rdp_parser::rdp::ParseError;

/// Error that can occur while running a command
#[derive(Debug)]
pub enum CliError {
    /// Reading the input file failed
    Io(String),
    /// The configuration could not be loaded
    Config(ConfigError),
    /// The input is malformed
    Parse(ParseError),
    /// The result could not be written in the requested format
    Output(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Io(msg) => write!(f, "IO error: {}", msg),
            CliError::Config(err) => write!(f, "Configuration error: {}", err),
            CliError::Parse(err) => write!(f, "{}", err.render()),
            CliError::Output(msg) => write!(f, "Output error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io(err.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Config(err)
    }
}

impl From<ParseError> for CliError {
    fn from(err: ParseError) -> Self {
        CliError::Parse(err)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Output(err.to_string())
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(err: serde_yaml::Error) -> Self {
        CliError::Output(err.to_string())
    }
}
