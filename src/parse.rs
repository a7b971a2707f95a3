//! Smsh command parser.
//!
//! Splits an expanded input line into argument words, optional `<` / `>`
//! redirection targets, and a trailing `&` background marker. No quoting,
//! globbing, or pipeline grammar is supported.

use crate::errors::{Error, Result};

/// Everything the launcher needs to run one command. Immutable once built.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Command {
    /// Original command line, used for messages.
    pub input: String,
    /// The program and its arguments, in order.
    pub argv: Vec<String>,
    /// The name of the input file, if one is specified.
    pub infile: Option<String>,
    /// The file to write stdout to, if one is specified.
    pub outfile: Option<String>,
    /// Request to run the command in the background, defaults to false.
    pub background: bool,
}

impl Command {
    /// Parses an input line into a `Command`.
    ///
    /// Redirection operators may be attached to their target (`<in`) or
    /// separated by whitespace (`< in`). Only a trailing `&` marks the
    /// command as a background request; anywhere else it is an ordinary
    /// argument word.
    ///
    /// Returns `Ok(None)` for blank input and an error for a dangling
    /// redirection operator or a line with no program word.
    pub fn parse(input: &str) -> Result<Option<Command>> {
        let trimmed = input.trim();
        let words: Vec<&str> = trimmed.split_whitespace().collect();
        if words.is_empty() {
            return Ok(None);
        }

        let mut command = Command {
            input: trimmed.to_owned(),
            ..Default::default()
        };

        let mut i = 0;
        while i < words.len() {
            let word = words[i];
            if word == "<" || word == ">" {
                i += 1;
                let target = words
                    .get(i)
                    .ok_or_else(|| Error::syntax(trimmed))?
                    .to_string();
                if word == "<" {
                    command.infile = Some(target);
                } else {
                    command.outfile = Some(target);
                }
            } else if word.starts_with('<') && word.len() > 1 {
                command.infile = Some(word[1..].to_owned());
            } else if word.starts_with('>') && word.len() > 1 {
                command.outfile = Some(word[1..].to_owned());
            } else if word == "&" && i == words.len() - 1 {
                command.background = true;
            } else {
                command.argv.push(word.to_owned());
            }
            i += 1;
        }

        if command.argv.is_empty() {
            return Err(Error::syntax(trimmed));
        }

        Ok(Some(command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty() {
        assert!(Command::parse("").unwrap().is_none());
        assert!(Command::parse("   \t ").unwrap().is_none());
    }

    #[test]
    fn single_cmd() {
        let command = Command::parse("cmd").unwrap().unwrap();
        assert_eq!(command.argv, vec!["cmd"]);
        assert!(command.infile.is_none());
        assert!(command.outfile.is_none());
        assert!(!command.background);
    }

    #[test]
    fn single_cmd_with_args() {
        let command = Command::parse("cmd var1 var2 var3").unwrap().unwrap();
        assert_eq!(command.argv, vec!["cmd", "var1", "var2", "var3"]);
    }

    #[test]
    fn infile_valid() {
        let no_space = Command::parse("cmd <infile").unwrap().unwrap();
        let with_space = Command::parse("cmd < infile").unwrap().unwrap();
        assert_eq!(no_space.infile.as_deref(), Some("infile"));
        assert_eq!(no_space.infile, with_space.infile);
        assert_eq!(no_space.argv, vec!["cmd"]);
    }

    #[test]
    fn infile_invalid() {
        assert!(Command::parse("cmd <").is_err());
    }

    #[test]
    fn outfile_valid() {
        let no_space = Command::parse("cmd >outfile").unwrap().unwrap();
        let with_space = Command::parse("cmd > outfile").unwrap().unwrap();
        assert_eq!(no_space.outfile.as_deref(), Some("outfile"));
        assert_eq!(no_space.outfile, with_space.outfile);
        assert_eq!(no_space.argv, vec!["cmd"]);
    }

    #[test]
    fn outfile_invalid() {
        assert!(Command::parse("cmd >").is_err());
    }

    #[test]
    fn both_redirections() {
        let command = Command::parse("sort < in > out").unwrap().unwrap();
        assert_eq!(command.argv, vec!["sort"]);
        assert_eq!(command.infile.as_deref(), Some("in"));
        assert_eq!(command.outfile.as_deref(), Some("out"));
    }

    #[test]
    fn trailing_ampersand_marks_background() {
        let command = Command::parse("sleep 10 &").unwrap().unwrap();
        assert_eq!(command.argv, vec!["sleep", "10"]);
        assert!(command.background);
    }

    #[test]
    fn non_trailing_ampersand_is_an_argument() {
        let command = Command::parse("echo & done").unwrap().unwrap();
        assert_eq!(command.argv, vec!["echo", "&", "done"]);
        assert!(!command.background);
    }

    #[test]
    fn redirection_only_line_is_an_error() {
        assert!(Command::parse("< in > out").is_err());
        assert!(Command::parse("&").is_err());
    }
}
