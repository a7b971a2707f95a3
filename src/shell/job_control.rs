//! Background job tracking and reaping.

use std::fmt;

use nix::errno::Errno;
use nix::sys::signal::{self, Signal};
use nix::sys::wait::{self, WaitPidFlag, WaitStatus};
use nix::unistd::Pid;

use crate::exitstatus::TerminationStatus;

/// Tracks the pids of live background jobs.
///
/// Owned by the shell's main loop and never touched from signal context, so
/// it needs no locking. Entries are unique by construction: the OS never
/// reuses a pid while the previous holder is unreaped.
#[derive(Default)]
pub struct JobManager {
    jobs: Vec<Pid>,
}

impl JobManager {
    /// Starts tracking a freshly spawned background child.
    pub fn register(&mut self, pid: Pid) {
        debug!("registered background job {}", pid);
        self.jobs.push(pid);
    }

    pub fn has_jobs(&self) -> bool {
        !self.jobs.is_empty()
    }

    /// Performs one non-blocking wait for any background child, announcing
    /// and untracking the job if one has terminated.
    ///
    /// At most one job is collected per call. When several jobs finish at
    /// once the remaining completions are reported on subsequent prompts;
    /// this keeps the per-prompt work bounded at the cost of delayed
    /// notification.
    pub fn reap_one(&mut self, last_status: &mut TerminationStatus) {
        if self.jobs.is_empty() {
            return;
        }

        let wait_status = match wait::waitpid(None, Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::StillAlive) | Err(Errno::ECHILD) => return,
            Ok(status) => status,
            Err(e) => {
                warn!("waitpid failed while reaping: {}", e);
                return;
            }
        };

        let (pid, outcome) = match wait_status {
            WaitStatus::Exited(pid, code) => (pid, format!("exit status {}", code)),
            WaitStatus::Signaled(pid, sig, _) => {
                (pid, format!("terminated by signal {}", sig as i32))
            }
            status => {
                debug!("ignoring wait status while reaping: {:?}", status);
                return;
            }
        };

        if self.remove(pid) {
            last_status.record(&wait_status);
            println!("background pid {} is done: {}", pid, outcome);
        } else {
            debug!("reaped untracked child {}", pid);
        }
    }

    /// Sends SIGKILL to every tracked job, then sweeps the results without
    /// blocking. Used on the `exit` path; children that have not yet died by
    /// the end of the sweep are abandoned to the OS.
    pub fn kill_all(&mut self) {
        for &pid in &self.jobs {
            log_if_err!(signal::kill(pid, Signal::SIGKILL), "kill({})", pid);
        }

        loop {
            match wait::waitpid(None, Some(WaitPidFlag::WNOHANG)) {
                Ok(WaitStatus::StillAlive) | Err(_) => break,
                Ok(_) => continue,
            }
        }

        self.jobs.clear();
    }

    fn remove(&mut self, pid: Pid) -> bool {
        match self.jobs.iter().position(|&p| p == pid) {
            Some(index) => {
                self.jobs.remove(index);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for JobManager {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} background jobs: {:?}", self.jobs.len(), self.jobs)
    }
}
