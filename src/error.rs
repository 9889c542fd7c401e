use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("dictionary not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {} at line {line}", .path.display())]
    Read {
        path: PathBuf,
        line: usize,
        #[source]
        source: io::Error,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] ::config::ConfigError),

    #[error("invalid configuration: {0}")]
    Validation(String),
}
