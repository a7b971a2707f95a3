//! Child-side file descriptor setup, applied after fork and before exec.

use std::os::unix::io::RawFd;

use nix::fcntl::{self, OFlag};
use nix::libc;
use nix::sys::stat::Mode;
use nix::unistd;

use crate::parse::Command;

const DEV_NULL: &str = "/dev/null";

/// Applies the command's redirections inside the child.
///
/// A background job gets the null device on any stream the command does not
/// redirect explicitly: stdin when there is no `<` target, stdout and stderr
/// when there is no `>` target. Because this runs after the fork, a failure
/// here can never block the parent: the caller prints the returned message
/// and exits the child with a non-zero status.
pub fn apply(command: &Command, background: bool) -> ::std::result::Result<(), String> {
    if background && (command.infile.is_none() || command.outfile.is_none()) {
        let null = fcntl::open(DEV_NULL, OFlag::O_RDWR, Mode::empty())
            .map_err(|e| format!("cannot open {}: {}", DEV_NULL, e.desc()))?;
        if command.infile.is_none() {
            dup_onto(null, libc::STDIN_FILENO)?;
        }
        if command.outfile.is_none() {
            dup_onto(null, libc::STDOUT_FILENO)?;
            dup_onto(null, libc::STDERR_FILENO)?;
        }
    }

    if let Some(ref infile) = command.infile {
        let fd = fcntl::open(infile.as_str(), OFlag::O_RDONLY, Mode::empty())
            .map_err(|e| format!("cannot open {} for input: {}", infile, e.desc()))?;
        dup_onto(fd, libc::STDIN_FILENO)?;
    }

    if let Some(ref outfile) = command.outfile {
        // rw for the owner, read-only for everyone else
        let mode = Mode::S_IRUSR | Mode::S_IWUSR | Mode::S_IRGRP | Mode::S_IROTH;
        let fd = fcntl::open(
            outfile.as_str(),
            OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_TRUNC,
            mode,
        )
        .map_err(|e| format!("cannot open {} for output: {}", outfile, e.desc()))?;
        dup_onto(fd, libc::STDOUT_FILENO)?;
    }

    Ok(())
}

fn dup_onto(fd: RawFd, target: RawFd) -> ::std::result::Result<(), String> {
    unistd::dup2(fd, target).map_err(|e| format!("dup2 failed: {}", e.desc()))?;
    Ok(())
}
