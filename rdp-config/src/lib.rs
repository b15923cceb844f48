//! Configuration for the rdp tools
//!
//! The documented defaults live in `defaults/rdp.default.toml`, which is compiled in. Files
//! and single-key overrides stack on top of it through [`Loader`]; the merged result is read
//! into [`RdpConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, FileSourceFile, ValueKind};
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/rdp.default.toml");

/// Top-level configuration consumed by rdp tools.
#[derive(Debug, Clone, Deserialize)]
pub struct RdpConfig {
    pub literals: LiteralsConfig,
    pub scan: ScanConfig,
    pub output: OutputConfig,
}

/// Prefixes for radix literals.
#[derive(Debug, Clone, Deserialize)]
pub struct LiteralsConfig {
    pub hex_prefix: String,
    pub binary_prefix: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    pub skip_byte_order_marker: bool,
    pub comment_marker: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Yaml,
    Text,
}

/// Builds an [`RdpConfig`] from the compiled-in defaults plus any number of layers.
///
/// Later layers win. Keys a layer leaves out keep the value from the layers below.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

fn toml_file(path: &Path, required: bool) -> File<FileSourceFile, FileFormat> {
    File::from(path).format(FileFormat::Toml).required(required)
}

impl Loader {
    pub fn new() -> Self {
        Self {
            builder: Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml)),
        }
    }

    /// Adds `path` as a layer. [`Loader::build`] fails if it does not exist.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.builder = self.builder.add_source(toml_file(path.as_ref(), true));
        self
    }

    /// Adds `path` as a layer when it exists, as for `./rdp.toml`.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        self.builder = self.builder.add_source(toml_file(path.as_ref(), false));
        self
    }

    /// Sets one dotted key, e.g. `output.format` from `--format`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merges the layers. Unknown enum values such as an unsupported output format are
    /// reported here.
    pub fn build(self) -> Result<RdpConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The compiled-in defaults with no layers.
pub fn load_defaults() -> Result<RdpConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.literals.hex_prefix, "0x");
        assert_eq!(config.literals.binary_prefix, "0b");
        assert!(config.scan.skip_byte_order_marker);
        assert_eq!(config.scan.comment_marker, ";");
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("output.format", "yaml")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, OutputFormat::Yaml);
    }

    #[test]
    fn layers_files_over_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[literals]\nhex_prefix = \"$\"").expect("write config");

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert_eq!(config.literals.hex_prefix, "$");
        assert_eq!(config.literals.binary_prefix, "0b");
    }

    #[test]
    fn optional_file_may_be_missing() {
        let config = Loader::new()
            .with_optional_file("definitely/not/here/rdp.toml")
            .build()
            .expect("missing optional file is ignored");
        assert_eq!(config.output.format, OutputFormat::Json);

        let result = Loader::new()
            .with_file("definitely/not/here/rdp.toml")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn rejects_unknown_output_format() {
        let result = Loader::new()
            .set_override("output.format", "xml")
            .expect("override to apply")
            .build();
        assert!(result.is_err());
    }
}
