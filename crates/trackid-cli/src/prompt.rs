// SPDX-License-Identifier: GPL-3.0-or-later
use std::io::{self, BufRead, Write};

use trackid_metadata::InteractivePrompt;

/// Terminal prompt: messages go to stderr, answers come from stdin.
pub struct ConsolePrompt;

impl InteractivePrompt for ConsolePrompt {
    fn message(&self, text: &str) {
        eprintln!("{}", text);
    }

    fn read_line(&self, question: &str) -> io::Result<String> {
        let mut stderr = io::stderr().lock();
        write!(stderr, "{}", question)?;
        stderr.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}
