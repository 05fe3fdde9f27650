use crate::{Field, UnknownField};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

pub const HELP: &str = "\
commands:
  list                  show the user table
  form                  show the draft form
  set <field> <value>   change a form input (firstName, lastName, email, department)
  edit <id>             load a user into the form
  delete <id>           delete a user
  submit                add or update the drafted user
  pending               show requests still in flight
  export <path>         write the current list as JSON
  help                  show this text
  quit                  leave";

/// One line typed at the dashboard prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Form,
    Set { field: Field, value: String },
    Edit(u64),
    Delete(u64),
    Submit,
    Pending,
    Export(PathBuf),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`, type `help`")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("`{0}` is not a user id")]
    BadId(String),
    #[error(transparent)]
    Field(#[from] UnknownField),
}

fn parse_id(arg: Option<&str>, usage: &'static str) -> Result<u64, ParseCommandError> {
    let arg = arg.ok_or(ParseCommandError::Usage(usage))?;
    arg.parse()
        .map_err(|_| ParseCommandError::BadId(arg.to_string()))
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };
        let arg = Some(rest).filter(|r| !r.is_empty());

        match verb {
            "" => Err(ParseCommandError::Empty),
            "list" | "ls" => Ok(Command::List),
            "form" | "draft" => Ok(Command::Form),
            "set" => {
                let (field, value) = rest
                    .split_once(char::is_whitespace)
                    .ok_or(ParseCommandError::Usage("set <field> <value>"))?;
                Ok(Command::Set {
                    field: field.parse()?,
                    value: value.trim().to_string(),
                })
            }
            "edit" => parse_id(arg, "edit <id>").map(Command::Edit),
            "delete" | "rm" => parse_id(arg, "delete <id>").map(Command::Delete),
            "submit" | "save" => Ok(Command::Submit),
            "pending" => Ok(Command::Pending),
            "export" => arg
                .map(|path| Command::Export(PathBuf::from(path)))
                .ok_or(ParseCommandError::Usage("export <path>")),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(ParseCommandError::Unknown(other.to_string())),
        }
    }
}
