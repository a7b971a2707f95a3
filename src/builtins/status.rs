use crate::builtins::{self, BuiltinCommand};
use crate::errors::Result;
use crate::shell::Shell;

pub struct Status;

impl BuiltinCommand for Status {
    const NAME: &'static str = builtins::STATUS_NAME;

    const HELP: &'static str = "\
status: status
    Print the exit value or terminating signal of the last foreground
    command. Before any foreground command has run, reports exit value 0.";

    fn run(shell: &mut Shell, _args: Vec<String>) -> Result<()> {
        println!("{}", shell.last_status);
        Ok(())
    }
}
