use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use bytes::{BufMut, Bytes, BytesMut};
use tracing::debug;

use crate::config::Settings;
use crate::readline::Reader;
use crate::trie::Trie;
use crate::utils::{longest_common_prefix, normalize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Exit,
    Matches { prefix: String, words: Vec<String> },
    NoMatches { prefix: String },
}

#[derive(Debug)]
pub struct Interpreter {
    trie: Trie,
    settings: Settings
}

impl Interpreter {
    pub fn new (trie: Trie, settings: Settings) -> Self {
        Self { trie, settings }
    }

    pub fn interpret (&self, line: &str) -> Outcome {
        let prefix = normalize(line, !self.settings.case_sensitive);

        if self.is_exit(&prefix) {
            return Outcome::Exit;
        }

        let mut words = self.trie.with_prefix(&prefix);
        debug!(prefix = %prefix, matches = words.len(), exact = self.trie.contains(&prefix), "prefix query");

        if words.is_empty() {
            return Outcome::NoMatches { prefix: prefix.into_owned() };
        }

        if self.settings.sort_results {
            words.sort_unstable();
        }

        Outcome::Matches { prefix: prefix.into_owned(), words }
    }

    pub fn render (&self, outcome: &Outcome) -> Bytes {
        let mut buf = BytesMut::new();

        match outcome {
            Outcome::Exit => {}
            Outcome::NoMatches { .. } => buf.put_slice(b"No results found.\n"),
            Outcome::Matches { prefix, words } => {
                buf.put_slice(b"Possible words:\n");

                let limit = match self.settings.max_results {
                    0 => words.len(),
                    n => n.min(words.len()),
                };

                for word in &words[..limit] {
                    buf.put_slice(word.as_bytes());
                    buf.put_u8(b'\n');
                }

                if limit < words.len() {
                    buf.put_slice(format!("... and {} more\n", words.len() - limit).as_bytes());
                }

                if words.len() > 1 {
                    let lcp = longest_common_prefix(prefix, words);
                    if lcp.len() > prefix.len() {
                        buf.put_slice(format!("Common prefix: {lcp}\n").as_bytes());
                    }
                }
            }
        }

        buf.freeze()
    }

    /// Runs the query loop until the exit command or end of input.
    pub fn run <R: BufRead, W: Write>(&self, reader: &mut Reader<R>, out: &mut W, interactive: bool) -> Result<()> {
        let prompt = interactive.then_some(self.settings.prompt.as_str());

        loop {
            let Some(line) = reader.read_line(prompt, out).context("failed to read input")? else {
                debug!("end of input");
                break;
            };

            let outcome = self.interpret(&line);
            if outcome == Outcome::Exit {
                break;
            }

            out.write_all(&self.render(&outcome)).context("failed to write results")?;
            out.flush()?;
        }

        Ok(())
    }

    fn is_exit (&self, input: &str) -> bool {
        let exit = normalize(&self.settings.exit_command, !self.settings.case_sensitive);
        input == exit
    }
}

#[cfg(test)]
mod interpreter_tests {
    use super::*;

    fn interpreter (settings: Settings) -> Interpreter {
        let trie = ["CAT", "CAR", "CARD", "DOG"].into_iter().collect();
        Interpreter::new(trie, settings)
    }

    fn run_session (inter: &Interpreter, input: &str) -> String {
        let mut reader = Reader::new(input.as_bytes());
        let mut out = Vec::new();

        inter.run(&mut reader, &mut out, false).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn folds_query_case () {
        let inter = interpreter(Settings::default());

        assert_eq!(inter.interpret("  ca "), Outcome::Matches {
            prefix: "CA".to_string(),
            words: vec!["CAR".to_string(), "CARD".to_string(), "CAT".to_string()],
        });
    }

    #[test]
    fn case_sensitive_query () {
        let settings = Settings { case_sensitive: true, ..Settings::default() };
        let inter = interpreter(settings);

        assert_eq!(inter.interpret("ca"), Outcome::NoMatches { prefix: "ca".to_string() });
        assert_eq!(inter.interpret("exit"), Outcome::NoMatches { prefix: "exit".to_string() });
        assert_eq!(inter.interpret("EXIT"), Outcome::Exit);
    }

    #[test]
    fn exit_sentinel () {
        let inter = interpreter(Settings::default());

        assert_eq!(inter.interpret("exit"), Outcome::Exit);
        assert_eq!(inter.interpret(" Exit \n"), Outcome::Exit);
        assert_ne!(inter.interpret("EXITS"), Outcome::Exit);
    }

    #[test]
    fn empty_line_lists_everything () {
        let inter = interpreter(Settings::default());

        let Outcome::Matches { words, .. } = inter.interpret("") else {
            panic!("expected matches");
        };
        assert_eq!(words, vec!["CAR", "CARD", "CAT", "DOG"]);
    }

    #[test]
    fn renders_matches_with_hint () {
        let inter = interpreter(Settings::default());

        let out = inter.render(&inter.interpret("C"));

        assert_eq!(&out[..], b"Possible words:\nCAR\nCARD\nCAT\nCommon prefix: CA\n");
    }

    #[test]
    fn truncates_long_results () {
        let settings = Settings { max_results: 2, ..Settings::default() };
        let inter = interpreter(settings);

        let out = inter.render(&inter.interpret("CA"));

        assert_eq!(&out[..], b"Possible words:\nCAR\nCARD\n... and 1 more\n");
    }

    #[test]
    fn renders_no_matches () {
        let inter = interpreter(Settings::default());

        let out = inter.render(&inter.interpret("CARDS"));

        assert_eq!(&out[..], b"No results found.\n");
    }

    #[test]
    fn session_stops_at_exit () {
        let inter = interpreter(Settings::default());

        let out = run_session(&inter, "d\nzzz\nexit\ncat\n");

        assert_eq!(out, "Possible words:\nDOG\nNo results found.\n");
    }

    #[test]
    fn session_stops_at_eof () {
        let inter = interpreter(Settings::default());

        let out = run_session(&inter, "cat");

        assert_eq!(out, "Possible words:\nCAT\n");
    }

    #[test]
    fn interactive_session_prompts () {
        let settings = Settings { prompt: "> ".to_string(), ..Settings::default() };
        let inter = interpreter(settings);
        let mut reader = Reader::new("dog\nexit\n".as_bytes());
        let mut out = Vec::new();

        inter.run(&mut reader, &mut out, true).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "> Possible words:\nDOG\n> ");
    }
}
