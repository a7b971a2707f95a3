//! Smsh Shell
//!
//! The shell module: the dispatch loop, background job bookkeeping, signal
//! policy, and the fork/exec machinery.

mod execute_command;
mod job_control;
mod redirect;
#[allow(clippy::module_inception)]
mod shell;
pub(crate) mod signals;

pub use self::shell::Shell;

/// Policy object controlling run-specific behavior of a shell.
#[derive(Debug, Copy, Clone)]
pub struct ShellConfig {
    /// Number of entries to retain in the interactive command history.
    pub(crate) command_history_capacity: usize,

    /// Whether the shell announces itself on shutdown.
    pub(crate) display_messages: bool,
}

impl ShellConfig {
    /// Creates an interactive shell, e.g. command history and shutdown
    /// messages are enabled.
    pub fn interactive(command_history_capacity: usize) -> Self {
        Self {
            command_history_capacity,
            display_messages: true,
        }
    }

    /// Creates a noninteractive shell, e.g. command history and shutdown
    /// messages are disabled.
    pub fn noninteractive() -> Self {
        Self {
            command_history_capacity: 0,
            display_messages: false,
        }
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self::noninteractive()
    }
}

/// Lib tests share one process; any test that spawns or waits on a child
/// must hold this lock so a stray waitpid cannot collect another test's
/// child.
#[cfg(test)]
pub(crate) static CHILD_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
