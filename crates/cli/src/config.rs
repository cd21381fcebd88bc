//! CLI configuration: TOML file, then `MARKET_*` environment, then flags.

use anyhow::{Context, Result};
use clap::ValueEnum;
use config::{Config, Environment, File as ConfigFile};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

pub const ENV_PREFIX: &str = "MARKET";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DATA_DIR_NAME: &str = "data";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Compact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Yaml,
    Text,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Text => "text",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CliConfig {
    pub home: PathBuf,
    pub log_level: String,
    pub log_format: LogFormat,
    pub output: OutputFormat,
}

/// Values given on the command line; `None` leaves lower layers in effect.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config_path: Option<PathBuf>,
    pub home: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
    pub output: Option<OutputFormat>,
}

pub fn default_home() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".market"))
        .unwrap_or_else(|| PathBuf::from(".market"))
}

impl CliConfig {
    pub fn load(overrides: &Overrides) -> Result<Self> {
        // The home directory decides where the default config file lives, so
        // resolve it ahead of the layered build.
        let home = overrides
            .home
            .clone()
            .or_else(|| std::env::var_os(format!("{ENV_PREFIX}_HOME")).map(PathBuf::from))
            .unwrap_or_else(default_home);

        let (file, required) = match &overrides.config_path {
            Some(path) => (path.clone(), true),
            None => (home.join(CONFIG_FILE_NAME), false),
        };
        if required && !file.exists() {
            anyhow::bail!(
                "Configuration file {} not found (specified via --config)",
                file.display()
            );
        }

        let config = Config::builder()
            .set_default("home", path_string(&home))?
            .set_default("log_level", "info")?
            .set_default("log_format", "pretty")?
            .set_default("output", "json")?
            .add_source(ConfigFile::from(file.as_path()).required(required))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .set_override_option("home", overrides.home.as_deref().map(path_string))?
            .set_override_option("log_level", overrides.log_level.clone())?
            .set_override_option(
                "log_format",
                overrides.log_format.map(|f| format!("{f:?}").to_lowercase()),
            )?
            .set_override_option("output", overrides.output.map(|o| o.to_string()))?
            .build()
            .context("failed to assemble configuration")?;

        config
            .try_deserialize()
            .context("invalid market-cli configuration")
    }

    pub fn data_dir(&self) -> PathBuf {
        self.home.join(DATA_DIR_NAME)
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
