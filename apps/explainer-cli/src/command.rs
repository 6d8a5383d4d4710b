//! REPL input parsing

use std::path::PathBuf;

use crate::session::{SessionError, Tab};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Upload(PathBuf),
    Tab(Tab),
    Info,
    /// Print the chat transcript so far
    History,
    Health,
    Help,
    Quit,
    /// Anything that is not a slash command
    Chat(String),
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Unknown command '/{0}'; type /help for a list")]
    Unknown(String),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl Command {
    pub fn parse(line: &str) -> Result<Command, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Command::Empty);
        }

        let Some(rest) = line.strip_prefix('/') else {
            return Ok(Command::Chat(line.to_string()));
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        match name.to_ascii_lowercase().as_str() {
            "upload" if arg.is_empty() => Err(CommandError::Usage("/upload <path-to-pdf>")),
            "upload" => Ok(Command::Upload(PathBuf::from(arg))),
            "tab" if arg.is_empty() => Err(CommandError::Usage(
                "/tab <summary|clauses|obligations|risks>",
            )),
            "tab" => Ok(Command::Tab(arg.parse()?)),
            "info" => Ok(Command::Info),
            "history" => Ok(Command::History),
            "health" => Ok(Command::Health),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}
