mod config;
mod dictionary;
mod error;
mod interpreter;
mod readline;
mod trie;
mod utils;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::{ConfigLoader, Settings, ENV_PREFIX};
use crate::dictionary::Source;
use crate::interpreter::Interpreter;
use crate::readline::Reader;
use crate::trie::Trie;

const STDIN_FD: i32 = 0;

/// Prefix completion over a word list.
#[derive(Parser, Debug)]
#[command(name = "sozluk", version, about)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Word list to load instead of the bundled one
    #[arg(short, long)]
    dictionary: Option<PathBuf>,

    /// Match words exactly as typed
    #[arg(long, overrides_with = "no_case_sensitive")]
    case_sensitive: bool,

    /// Upper-case words and queries even if the configuration says otherwise
    #[arg(long, overrides_with = "case_sensitive")]
    no_case_sensitive: bool,

    /// Maximum number of matches to print per query (0 for no limit)
    #[arg(short = 'n', long)]
    max_results: Option<usize>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String
}

impl Cli {
    fn apply (&self, settings: &mut Settings) {
        if let Some(path) = &self.dictionary {
            settings.dictionary = Some(path.clone());
        }
        if self.case_sensitive {
            settings.case_sensitive = true;
        } else if self.no_case_sensitive {
            settings.case_sensitive = false;
        }
        if let Some(n) = self.max_results {
            settings.max_results = n;
        }
    }
}

/// Builds the log filter from `RUST_LOG` when it is set, else from `level`.
fn log_filter (rust_log: Option<&str>, level: &str) -> Result<EnvFilter> {
    match rust_log {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid {} value {directives:?}", EnvFilter::DEFAULT_ENV)),
        None => EnvFilter::try_new(level)
            .with_context(|| format!("invalid log level {level:?}")),
    }
}

fn init_logging (level: &str) -> Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = log_filter(rust_log.as_deref(), level)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to set tracing subscriber: {e}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    let mut settings = ConfigLoader::new(cli.config.as_deref(), ENV_PREFIX)
        .load()
        .context("failed to load configuration")?;
    cli.apply(&mut settings);

    let interactive = utils::is_terminal(STDIN_FD);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if interactive {
        writeln!(out, "Loading dictionary, please wait...")?;
    }

    let source = Source::from_option(settings.dictionary.clone());
    let mut trie = Trie::new();
    if let Err(err) = dictionary::load(&source, &mut trie, !settings.case_sensitive) {
        error!(error = %err, "dictionary load failed");
        return Err(err).context("failed to load dictionary");
    }

    if interactive {
        writeln!(out, "Dictionary loaded ({} words).", trie.len())?;
    }

    let interpreter = Interpreter::new(trie, settings);
    let mut reader = Reader::new(io::stdin().lock());

    interpreter.run(&mut reader, &mut out, interactive)?;
    info!("session finished");

    Ok(())
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    fn parse (args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("sozluk").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn flags_override_settings () {
        let cli = parse(&["-n", "3", "--case-sensitive", "-d", "/tmp/words.txt"]);
        let mut settings = Settings::default();

        cli.apply(&mut settings);

        assert_eq!(settings.max_results, 3);
        assert!(settings.case_sensitive);
        assert_eq!(settings.dictionary, Some(PathBuf::from("/tmp/words.txt")));
    }

    #[test]
    fn no_flags_keep_settings () {
        let cli = parse(&[]);
        let mut settings = Settings { case_sensitive: true, max_results: 9, ..Settings::default() };

        cli.apply(&mut settings);

        assert!(settings.case_sensitive);
        assert_eq!(settings.max_results, 9);
        assert_eq!(settings.dictionary, None);
    }

    #[test]
    fn case_sensitivity_can_be_turned_off () {
        let mut settings = Settings { case_sensitive: true, ..Settings::default() };

        parse(&["--no-case-sensitive"]).apply(&mut settings);
        assert!(!settings.case_sensitive);

        // The last of the two flags wins.
        parse(&["--no-case-sensitive", "--case-sensitive"]).apply(&mut settings);
        assert!(settings.case_sensitive);

        parse(&["--case-sensitive", "--no-case-sensitive"]).apply(&mut settings);
        assert!(!settings.case_sensitive);
    }

    #[test]
    fn rust_log_takes_precedence () {
        assert!(log_filter(None, "warn").is_ok());
        assert!(log_filter(Some("sozluk=debug"), "warn").is_ok());
        assert!(log_filter(None, "sozluk=loudest").is_err());

        let err = log_filter(Some("sozluk=loudest"), "warn").unwrap_err();
        assert!(err.to_string().contains("RUST_LOG"));
    }
}
