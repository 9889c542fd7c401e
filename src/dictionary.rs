use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::error::DictionaryError;
use crate::trie::Trie;
use crate::utils::normalize;

/// Word list shipped inside the binary.
const BUNDLED: &str = include_str!("../resources/sozluk.txt");
const BUNDLED_NAME: &str = "<bundled>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Bundled,
    File(PathBuf),
}

impl Source {
    pub fn from_option (path: Option<PathBuf>) -> Self {
        path.map_or(Source::Bundled, Source::File)
    }

    fn name (&self) -> &Path {
        match self {
            Source::Bundled => Path::new(BUNDLED_NAME),
            Source::File(path) => path.as_path(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub inserted: usize,
    pub skipped: usize,
    pub elapsed: Duration,
}

/// Reads `source` one word per line into `trie`.
///
/// On a read error the words inserted so far stay in the trie.
pub fn load (source: &Source, trie: &mut Trie, fold_case: bool) -> Result<LoadReport, DictionaryError> {
    info!(source = %source.name().display(), "loading dictionary");

    let report = match source {
        Source::Bundled => load_from(BUNDLED.as_bytes(), source.name(), trie, fold_case)?,
        Source::File(path) => {
            let file = File::open(path).map_err(|err| match err.kind() {
                io::ErrorKind::NotFound => DictionaryError::NotFound(path.clone()),
                _ => DictionaryError::Read { path: path.clone(), line: 0, source: err },
            })?;

            load_from(BufReader::new(file), path, trie, fold_case)?
        }
    };

    info!(
        inserted = report.inserted,
        skipped = report.skipped,
        words = trie.len(),
        "dictionary loaded in {:.3}s",
        report.elapsed.as_secs_f64()
    );

    Ok(report)
}

pub fn load_from <R: BufRead>(reader: R, origin: &Path, trie: &mut Trie, fold_case: bool) -> Result<LoadReport, DictionaryError> {
    let start = Instant::now();
    let mut inserted = 0;
    let mut skipped = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| DictionaryError::Read {
            path: origin.to_path_buf(),
            line: idx + 1,
            source,
        })?;

        let word = normalize(&line, fold_case);
        if word.is_empty() {
            skipped += 1;
            continue;
        }

        trie.insert(&word);
        inserted += 1;
    }

    if skipped > 0 {
        debug!(skipped, origin = %origin.display(), "skipped blank lines");
    }

    Ok(LoadReport { inserted, skipped, elapsed: start.elapsed() })
}
