//! Line input for the shell prompt.
//!
//! Wraps `rustyline` for reading, in-memory history, and filename
//! completion. Overlong lines are rejected here, before the parser ever
//! sees them.

use failure::Fail;
use rustyline::{
    self,
    completion::{Completer, FilenameCompleter, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    validate::Validator,
    CompletionType, Config, Helper,
};

use crate::errors::{ErrorKind, Result};

/// Longest accepted input line, in bytes. Longer lines are rejected and the
/// user is prompted again.
const MAX_INPUT_LEN: usize = 2048;

struct EditorHelper(FilenameCompleter);

impl Completer for EditorHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &rustyline::Context<'_>,
    ) -> ::std::result::Result<(usize, Vec<Pair>), ReadlineError> {
        self.0.complete(line, pos, ctx)
    }
}

impl Hinter for EditorHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &rustyline::Context<'_>) -> Option<Self::Hint> {
        None
    }
}

impl Highlighter for EditorHelper {}

impl Helper for EditorHelper {}

impl Validator for EditorHelper {}

pub struct Editor {
    internal: rustyline::Editor<EditorHelper>,
    history_capacity: usize,
}

impl Editor {
    /// Constructs an editor keeping at most `history_capacity` entries of
    /// in-memory history; zero disables history entirely.
    pub fn with_capacity(history_capacity: usize) -> Editor {
        let config = Config::builder()
            .max_history_size(history_capacity)
            .history_ignore_space(true)
            .completion_type(CompletionType::Circular)
            .build();

        let mut internal = rustyline::Editor::with_config(config);
        internal.set_helper(Some(EditorHelper(FilenameCompleter::new())));

        Editor {
            internal,
            history_capacity,
        }
    }

    /// Reads one command line.
    ///
    /// Returns `Ok(None)` at end of file. A Ctrl-C at the prompt yields an
    /// empty line rather than an error, so the main loop simply prompts
    /// again.
    pub fn read_command(&mut self, prompt: &str) -> Result<Option<String>> {
        loop {
            match self.internal.readline(prompt) {
                Ok(line) => {
                    if line.len() > MAX_INPUT_LEN {
                        eprintln!("smsh: input exceeds {} bytes, ignored", MAX_INPUT_LEN);
                        continue;
                    }
                    if self.history_capacity > 0 && !line.trim().is_empty() {
                        self.internal.add_history_entry(line.as_str());
                    }
                    return Ok(Some(line));
                }
                Err(ReadlineError::Interrupted) => return Ok(Some(String::new())),
                Err(ReadlineError::Eof) => return Ok(None),
                Err(e) => return Err(e.context(ErrorKind::Readline).into()),
            }
        }
    }
}
