//! Layered settings: built-in defaults, an optional TOML file, then
//! `SOZLUK_*` environment variables. Command-line flags are applied on top
//! by `main`.

use std::path::{Path, PathBuf};

use ::config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;

pub const ENV_PREFIX: &str = "SOZLUK";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Word list to load; the bundled list when unset.
    pub dictionary: Option<PathBuf>,

    /// Match words exactly as typed instead of upper-casing them.
    pub case_sensitive: bool,

    /// Maximum number of matches printed per query, 0 for no limit.
    pub max_results: usize,

    pub sort_results: bool,

    /// Input line that ends the session.
    pub exit_command: String,

    pub prompt: String
}

impl Default for Settings {
    fn default () -> Self {
        Self {
            dictionary: None,
            case_sensitive: false,
            max_results: 0,
            sort_results: true,
            exit_command: "EXIT".to_string(),
            prompt: "Type a word and press Enter (EXIT to quit): ".to_string()
        }
    }
}

impl Settings {
    pub fn validate (&self) -> ConfigResult<()> {
        if self.exit_command.trim().is_empty() {
            return Err(ConfigError::Validation("exit_command must not be empty".to_string()));
        }

        Ok(())
    }
}

#[derive(Debug)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_prefix: String
}

impl ConfigLoader {
    pub fn new <P: AsRef<Path>>(config_path: Option<P>, env_prefix: &str) -> Self {
        Self {
            config_path: config_path.map(|p| p.as_ref().to_path_buf()),
            env_prefix: env_prefix.to_string()
        }
    }

    pub fn load (&self) -> ConfigResult<Settings> {
        let mut builder = Config::builder();

        if let Some(path) = &self.config_path {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.clone()));
            }

            debug!(path = %path.display(), "reading configuration file");
            builder = builder.add_source(File::from(path.as_path()).format(FileFormat::Toml));
        }

        builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .prefix_separator("_")
                .try_parsing(true),
        );

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;

        debug!(?settings, "configuration loaded");
        Ok(settings)
    }
}
