use std::io::{self, BufRead, Write};

pub struct Reader<R> {
    input: R,
    line: String
}

impl<R: BufRead> Reader<R> {
    pub fn new (input: R) -> Self {
        Self { input, line: String::new() }
    }

    /// Shows `prompt` (when given) and reads one line without its terminator.
    ///
    /// Returns `None` once the input is exhausted.
    pub fn read_line <W: Write>(&mut self, prompt: Option<&str>, out: &mut W) -> io::Result<Option<String>> {
        if let Some(prompt) = prompt {
            write!(out, "{prompt}")?;
            out.flush()?;
        }

        self.line.clear();
        if self.input.read_line(&mut self.line)? == 0 {
            return Ok(None);
        }

        let line = self.line.trim_end_matches(['\n', '\r']);
        Ok(Some(line.to_string()))
    }
}
