//! Smsh - a small job-control shell.
//!
//! The shell reads one command per prompt, runs it in the foreground or the
//! background, tracks live background jobs until they are reaped, and keeps a
//! record of the most recent foreground termination for the `status` builtin.

#[macro_use]
extern crate log;

macro_rules! log_if_err {
    ($result:expr, $($arg:tt)*) => {{
        if let Err(ref e) = $result {
            error!("{}: {}", format_args!($($arg)*), e);
        }
    }};
}

pub use crate::exitstatus::TerminationStatus;
pub use crate::shell::{Shell, ShellConfig};

mod builtins;
mod editor;
pub mod errors;
mod exitstatus;
mod parse;
mod shell;
