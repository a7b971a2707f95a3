//! Record of the most recent foreground or reaped-background termination.

use std::fmt;

use nix::sys::wait::WaitStatus;

/// How the last waited-for child ended. Exactly one record is live at a
/// time; it is overwritten after every foreground wait and every background
/// reap, and builtins never touch it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TerminationStatus {
    /// The child called `exit` with the given code.
    Exited(i32),
    /// The child was terminated by the given signal number.
    Signaled(i32),
}

impl TerminationStatus {
    /// Extracts a record from a wait status, if the status describes a
    /// termination (stops and still-alive reports carry no record).
    pub fn from_wait_status(status: &WaitStatus) -> Option<TerminationStatus> {
        match *status {
            WaitStatus::Exited(_, code) => Some(TerminationStatus::Exited(code)),
            WaitStatus::Signaled(_, signal, _) => {
                Some(TerminationStatus::Signaled(signal as i32))
            }
            _ => None,
        }
    }

    /// Overwrites the record if `status` describes a termination.
    pub fn record(&mut self, status: &WaitStatus) {
        if let Some(outcome) = TerminationStatus::from_wait_status(status) {
            *self = outcome;
        }
    }
}

impl Default for TerminationStatus {
    fn default() -> TerminationStatus {
        TerminationStatus::Exited(0)
    }
}

impl fmt::Display for TerminationStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            TerminationStatus::Exited(code) => write!(f, "exit value {}", code),
            TerminationStatus::Signaled(signal) => write!(f, "terminated by signal {}", signal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nix::sys::signal::Signal;
    use nix::unistd::Pid;

    #[test]
    fn default_reports_exit_value_zero() {
        assert_eq!(TerminationStatus::default(), TerminationStatus::Exited(0));
        assert_eq!(TerminationStatus::default().to_string(), "exit value 0");
    }

    #[test]
    fn records_exit_code() {
        let mut status = TerminationStatus::default();
        status.record(&WaitStatus::Exited(Pid::from_raw(100), 7));
        assert_eq!(status, TerminationStatus::Exited(7));
        assert_eq!(status.to_string(), "exit value 7");
    }

    #[test]
    fn records_terminating_signal() {
        let mut status = TerminationStatus::default();
        status.record(&WaitStatus::Signaled(
            Pid::from_raw(100),
            Signal::SIGKILL,
            false,
        ));
        assert_eq!(status, TerminationStatus::Signaled(9));
        assert_eq!(status.to_string(), "terminated by signal 9");
    }

    #[test]
    fn record_is_overwritten_not_appended() {
        let mut status = TerminationStatus::default();
        status.record(&WaitStatus::Signaled(
            Pid::from_raw(100),
            Signal::SIGINT,
            false,
        ));
        status.record(&WaitStatus::Exited(Pid::from_raw(101), 0));
        assert_eq!(status, TerminationStatus::Exited(0));
    }

    #[test]
    fn non_terminal_status_leaves_record_unchanged() {
        let mut status = TerminationStatus::Exited(3);
        status.record(&WaitStatus::StillAlive);
        assert_eq!(status, TerminationStatus::Exited(3));
    }
}
