//! Process launching: fork, child-side setup, exec, and the parent-side
//! foreground wait or background registration.

use std::ffi::CString;
use std::process;

use failure::ResultExt;
use nix::sys::signal::Signal;
use nix::sys::wait::{self, WaitStatus};
use nix::unistd::{self, ForkResult, Pid};

use crate::errors::{ErrorKind, Result};
use crate::parse::Command;
use crate::shell::shell::Shell;
use crate::shell::{redirect, signals};

/// Creates exactly one child process for `command`.
///
/// `background` is the effective placement after the foreground-only flag
/// has been consulted; the launcher itself never reads the flag.
pub fn launch_job(shell: &mut Shell, command: &Command, background: bool) -> Result<()> {
    // A toggle arriving while the fork straddles parent and child signal
    // setup could be lost or misrouted. Defer it; the dispatcher lifts the
    // mask at the top of the next cycle.
    signals::defer_toggle()?;

    match unsafe { unistd::fork().context(ErrorKind::Nix)? } {
        ForkResult::Child => run_child(command, background),
        ForkResult::Parent { child } => run_parent(shell, child, background),
    }
}

/// Child side: adjust signal dispositions, apply redirections, replace the
/// process image. Never returns. Every failure exits with status 1, because
/// after the fork the parent can observe nothing richer than an exit status.
fn run_child(command: &Command, background: bool) -> ! {
    signals::install_child_policy();

    if let Err(message) = redirect::apply(command, background) {
        eprintln!("smsh: {}", message);
        process::exit(1);
    }

    let argv: Vec<CString> = match command
        .argv
        .iter()
        .map(|arg| CString::new(arg.as_str()))
        .collect()
    {
        Ok(argv) => argv,
        Err(_) => {
            eprintln!("smsh: {}: invalid argument", command.argv[0]);
            process::exit(1);
        }
    };

    // Only returns on failure; the exec'd image reports its own errors.
    let err = unistd::execvp(&argv[0], &argv).unwrap_err();
    eprintln!("{}: {}", command.argv[0], err.desc());
    process::exit(1);
}

fn run_parent(shell: &mut Shell, child: Pid, background: bool) -> Result<()> {
    if background {
        shell.job_manager.register(child);
        println!("Background PID is {}", child);
        return Ok(());
    }

    debug!("waiting for foreground child {}", child);
    let wait_status = wait::waitpid(child, None).context(ErrorKind::Nix)?;
    shell.last_status.record(&wait_status);

    // A foreground job cut down by Ctrl-C announces itself; normal exits
    // stay quiet and are available through `status`.
    if let WaitStatus::Signaled(_, Signal::SIGINT, _) = wait_status {
        println!("{}", shell.last_status);
    }

    Ok(())
}
