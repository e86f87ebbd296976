//! Shell commands, one per input line.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Push(String),
    Pop(Option<Value>),
    PopFrom { path: String, value: Option<Value> },
    PopUntil(String),
    Replace(String),
    /// Back navigation the app did not ask for (browser back button).
    Back(usize),
    ExitFinished,
    Show,
    State,
    Help,
    Quit,
}

impl Command {
    /// True for commands that move the stack.
    pub fn navigates(&self) -> bool {
        matches!(
            self,
            Command::Push(_)
                | Command::Pop(_)
                | Command::PopFrom { .. }
                | Command::PopUntil(_)
                | Command::Replace(_)
                | Command::Back(_)
                | Command::ExitFinished
        )
    }
}

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("invalid JSON value: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("invalid step count `{0}`")]
    InvalidCount(String),
}

pub const HELP: &str = "\
commands:
  push <to>                 push a screen (path, may carry ?search and #hash)
  pop [json]                pop the top screen, returning an optional JSON value
  pop-from <path> [json]    pop the screen owning <path> and everything above it
  pop-until <pathname>      go back to the first screen at <pathname>
  replace <to>              replace the top screen
  back [n]                  external back navigation by n entries (default 1)
  exit-finished             report that exit transitions are done
  show                      print the stack and the activity tree
  state                     print the navigator state as JSON
  help                      this text
  quit                      leave";

/// Parses one line. Blank lines and `#` comments are `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    let command = match name {
        "push" => Command::Push(required("push", rest)?),
        "pop" => Command::Pop(optional_json(rest)?),
        "pop-from" => {
            let (path, value) = match rest.split_once(char::is_whitespace) {
                Some((path, value)) => (path, value),
                None => (rest, ""),
            };
            Command::PopFrom {
                path: required("pop-from", path)?,
                value: optional_json(value)?,
            }
        }
        "pop-until" => Command::PopUntil(required("pop-until", rest)?),
        "replace" => Command::Replace(required("replace", rest)?),
        "back" => Command::Back(if rest.is_empty() {
            1
        } else {
            rest.parse()
                .map_err(|_| CommandError::InvalidCount(rest.to_string()))?
        }),
        "exit-finished" => Command::ExitFinished,
        "show" => Command::Show,
        "state" => Command::State,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn required(command: &'static str, arg: &str) -> Result<String, CommandError> {
    let arg = arg.trim();
    if arg.is_empty() {
        return Err(CommandError::MissingArgument(command));
    }
    Ok(arg.to_string())
}

fn optional_json(raw: &str) -> Result<Option<Value>, CommandError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(raw)?))
}
