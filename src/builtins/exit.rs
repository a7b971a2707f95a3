use crate::builtins::{self, BuiltinCommand};
use crate::errors::Result;
use crate::shell::Shell;

pub struct Exit;

impl BuiltinCommand for Exit {
    const NAME: &'static str = builtins::EXIT_NAME;

    const HELP: &'static str = "\
exit: exit
    Exit the shell with a status of 0, terminating any background jobs
    that are still running.";

    fn run(shell: &mut Shell, _args: Vec<String>) -> Result<()> {
        shell.exit()
    }
}
