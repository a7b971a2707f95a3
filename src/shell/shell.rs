//! Smsh - Shell Module
//!
//! The Shell itself ties everything together: it reaps finished background
//! jobs, reads one command per iteration, and routes it to a builtin or the
//! process launcher.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::process;

use failure::ResultExt;
use nix::unistd;

use crate::builtins;
use crate::editor::Editor;
use crate::errors::{ErrorKind, Result};
use crate::exitstatus::TerminationStatus;
use crate::parse::Command;
use crate::shell::execute_command::launch_job;
use crate::shell::job_control::JobManager;
use crate::shell::{signals, ShellConfig};

const PROMPT: &str = ": ";

/// Smsh Shell
pub struct Shell {
    editor: Editor,
    pub(crate) job_manager: JobManager,
    /// Termination record of the last foreground or reaped command.
    pub(crate) last_status: TerminationStatus,
    config: ShellConfig,
}

impl Shell {
    /// Constructs a new Shell and installs the parent signal policy.
    ///
    /// Handler installation failure is fatal: without the policy the shell
    /// would die on Ctrl-C and be suspended by Ctrl-Z.
    pub fn new(config: ShellConfig) -> Result<Shell> {
        signals::install_parent_policy()?;

        let shell = Shell {
            editor: Editor::with_capacity(config.command_history_capacity),
            job_manager: Default::default(),
            last_status: Default::default(),
            config,
        };

        info!("smsh started up");
        Ok(shell)
    }

    /// Runs commands from stdin until end of file, which behaves like the
    /// `exit` builtin.
    pub fn execute_from_stdin(&mut self) -> ! {
        loop {
            log_if_err!(signals::allow_toggle(), "allow_toggle");
            self.job_manager.reap_one(&mut self.last_status);

            let input = match self.editor.read_command(PROMPT) {
                Ok(Some(line)) => line,
                Ok(None) => break,
                e => {
                    log_if_err!(e, "read_command");
                    continue;
                }
            };

            let temp_result = self.execute_command_string(&input);
            log_if_err!(temp_result, "execute_command_string");
        }

        self.exit()
    }

    /// Dispatches a single input line. Every `$$` is expanded to the
    /// shell's own pid first. Blank lines and comments are no-ops; syntax
    /// errors are reported and swallowed.
    pub fn execute_command_string(&mut self, input: &str) -> Result<()> {
        let input = input.trim();
        if input.is_empty() || input.starts_with('#') {
            return Ok(());
        }

        let input = expand_process_id(input);
        let command = match Command::parse(&input) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(()),
            Err(e) => {
                if let ErrorKind::Syntax(ref line) = *e.kind() {
                    eprintln!("smsh: syntax error near: {}", line);
                    return Ok(());
                }

                return Err(e);
            }
        };

        self.execute_command(&command)
    }

    /// Runs a smsh script from a file, one command per line, with the same
    /// per-iteration reaping as the interactive loop.
    pub fn execute_commands_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let mut f = File::open(path).context(ErrorKind::Io)?;
        let mut buffer = String::new();
        f.read_to_string(&mut buffer).context(ErrorKind::Io)?;

        for line in buffer.split('\n') {
            log_if_err!(signals::allow_toggle(), "allow_toggle");
            self.job_manager.reap_one(&mut self.last_status);
            self.execute_command_string(line)?;
        }

        Ok(())
    }

    fn execute_command(&mut self, command: &Command) -> Result<()> {
        if builtins::is_builtin(&command.argv) {
            if let Err(e) = builtins::run(self, &command.argv) {
                eprintln!("smsh: {}", e);
            }
            return Ok(());
        }

        // While foreground-only mode is active the background marker is
        // ineffective, not an error.
        let background = command.background && !signals::foreground_only();
        launch_job(self, command, background)
    }

    /// Terminates every tracked background job (best effort), sweeps the
    /// results, and exits the shell with status 0.
    pub fn exit(&mut self) -> ! {
        if self.config.display_messages {
            println!("exit");
        }

        self.job_manager.kill_all();

        info!("smsh has shut down");
        process::exit(0);
    }
}

/// Replaces each `$$` in `line` with the shell's process id.
fn expand_process_id(line: &str) -> String {
    if !line.contains("$$") {
        return line.to_owned();
    }

    line.replace("$$", &unistd::getpid().to_string())
}

impl fmt::Debug for Shell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}, last status: {}", self.job_manager, self.last_status)
    }
}
