//! Process-wide signal policy and the foreground-only toggle.
//!
//! The parent shell must survive Ctrl-C and turn Ctrl-Z into a mode toggle,
//! while each child gets the opposite treatment before exec: SIGINT back to
//! default so foreground jobs can be interrupted, SIGTSTP ignored so no job
//! is ever suspended.

use std::sync::atomic::{AtomicBool, Ordering};

use failure::ResultExt;
use nix::libc;
use nix::sys::signal::{self, SaFlags, SigAction, SigHandler, SigSet, SigmaskHow, Signal};
use nix::unistd;

use crate::errors::{ErrorKind, Result};

/// Flipped by the SIGTSTP handler, read once per dispatch. This is the only
/// state shared with the asynchronous signal context.
static FOREGROUND_ONLY: AtomicBool = AtomicBool::new(false);

const ENTER_NOTICE: &[u8] = b"\nEntering foreground-only mode (& is now ignored)\n: ";
const EXIT_NOTICE: &[u8] = b"\nExiting foreground-only mode\n: ";

/// SIGTSTP handler. May interrupt the main loop at any point, so it is
/// restricted to reentrant-safe operations: one atomic flip and one write(2)
/// of a pre-sized message. No allocation, no buffered formatting.
extern "C" fn handle_sigtstp(_: libc::c_int) {
    let was_foreground_only = FOREGROUND_ONLY.fetch_xor(true, Ordering::SeqCst);
    let notice = if was_foreground_only {
        EXIT_NOTICE
    } else {
        ENTER_NOTICE
    };
    let _ = unistd::write(libc::STDOUT_FILENO, notice);
}

/// Installs the parent dispositions: SIGINT, SIGHUP, and SIGQUIT ignored,
/// SIGTSTP routed to the toggle handler (restarting interrupted reads).
///
/// The shell cannot run safely without these, so the caller treats any
/// failure as fatal.
pub fn install_parent_policy() -> Result<()> {
    let toggle = SigAction::new(
        SigHandler::Handler(handle_sigtstp),
        SaFlags::SA_RESTART,
        SigSet::all(),
    );

    unsafe {
        signal::sigaction(Signal::SIGTSTP, &toggle).context(ErrorKind::Nix)?;
        signal::signal(Signal::SIGINT, SigHandler::SigIgn).context(ErrorKind::Nix)?;
        signal::signal(Signal::SIGHUP, SigHandler::SigIgn).context(ErrorKind::Nix)?;
        signal::signal(Signal::SIGQUIT, SigHandler::SigIgn).context(ErrorKind::Nix)?;
    }

    Ok(())
}

/// Child-side dispositions, applied between fork and exec.
pub fn install_child_policy() {
    unsafe {
        // signal(3) only fails for an invalid signal number
        signal::signal(Signal::SIGINT, SigHandler::SigDfl).expect("failed to reset SIGINT");
        signal::signal(Signal::SIGTSTP, SigHandler::SigIgn).expect("failed to ignore SIGTSTP");
    }
}

/// Defers SIGTSTP delivery so a toggle cannot land while a fork is
/// straddling parent and child signal setup. Lifted by [`allow_toggle`] at
/// the top of the next dispatch cycle.
pub fn defer_toggle() -> Result<()> {
    mask_toggle(SigmaskHow::SIG_BLOCK)
}

/// Lifts the deferral installed by [`defer_toggle`]; pending toggles are
/// delivered here, between commands.
pub fn allow_toggle() -> Result<()> {
    mask_toggle(SigmaskHow::SIG_UNBLOCK)
}

fn mask_toggle(how: SigmaskHow) -> Result<()> {
    let mut set = SigSet::empty();
    set.add(Signal::SIGTSTP);
    signal::sigprocmask(how, Some(&set), None).context(ErrorKind::Nix)?;
    Ok(())
}

/// True while foreground-only mode is active; background requests are
/// silently run in the foreground instead.
pub fn foreground_only() -> bool {
    FOREGROUND_ONLY.load(Ordering::SeqCst)
}

#[cfg(test)]
pub(crate) fn set_foreground_only(value: bool) {
    FOREGROUND_ONLY.store(value, Ordering::SeqCst);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_twice_restores_normal_mode() {
        set_foreground_only(false);
        handle_sigtstp(libc::SIGTSTP);
        assert!(foreground_only());
        handle_sigtstp(libc::SIGTSTP);
        assert!(!foreground_only());
    }
}
