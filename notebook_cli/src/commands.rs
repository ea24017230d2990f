//! Text commands understood by the notebook console

use services_model_editor::EditorError;
use thiserror::Error;

/// A console command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotebookCommand {
    /// Run a cell constructor, e.g. `new Attribute type`
    New { constructor: String },
    /// Add a prose cell
    Note { text: String },
    /// Rename the active object or morphism
    Name { name: String },
    /// Point the active morphism's domain at a named object
    Dom { object: String },
    /// Point the active morphism's codomain at a named object
    Cod { object: String },
    Up,
    Down,
    Focus { index: usize },
    /// Delete the active cell, focusing the one above
    Delete,
    /// Delete the active cell, focusing the one below
    DeleteForward,
    List,
    Check,
    /// Constructors available at the active cell
    Commands,
    Search { query: String },
    Theories,
    Theory { id: String },
    Save { path: String },
    Load { path: String },
    Help,
    Quit,
}

/// Console errors
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    InvalidCommand(String),

    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error("No object named '{0}'")]
    UnknownObject(String),

    #[error("Invalid notebook file: {0}")]
    InvalidNotebook(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub const HELP: &str = "\
Commands:
  new <constructor>     add a cell (see `commands`)
  note <text>           add a text cell
  name <name>           rename the active object or morphism
  dom <object>          set the domain of the active morphism
  cod <object>          set the codomain of the active morphism
  up | down | focus <i> move the active cell
  delete | delete-fwd   delete the active cell
  list                  show the notebook
  check                 show validation results
  commands              constructors available here
  search <query>        find constructors
  theories | theory <id>
  save <path> | load <path>
  help | quit";

/// Parses one console line
///
/// Examples:
/// - "new Entity" -> New { constructor: "Entity" }
/// - "dom Person" -> Dom { object: "Person" }
/// - "focus 2" -> Focus { index: 2 }
pub fn parse_command(input: &str) -> Result<NotebookCommand, CliError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::InvalidCommand("Empty command".to_string()));
    }
    let (word, rest) = match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (input, ""),
    };

    match word {
        "new" => required(rest, "new <constructor>")
            .map(|constructor| NotebookCommand::New { constructor }),
        "note" => Ok(NotebookCommand::Note {
            text: rest.to_string(),
        }),
        "name" => required(rest, "name <name>").map(|name| NotebookCommand::Name { name }),
        "dom" => required(rest, "dom <object>").map(|object| NotebookCommand::Dom { object }),
        "cod" => required(rest, "cod <object>").map(|object| NotebookCommand::Cod { object }),
        "up" => Ok(NotebookCommand::Up),
        "down" => Ok(NotebookCommand::Down),
        "focus" => {
            let index = required(rest, "focus <index>")?;
            index
                .parse()
                .map(|index| NotebookCommand::Focus { index })
                .map_err(|_| CliError::InvalidCommand(format!("Not a cell index: {}", index)))
        }
        "delete" | "del" => Ok(NotebookCommand::Delete),
        "delete-fwd" => Ok(NotebookCommand::DeleteForward),
        "list" | "ls" => Ok(NotebookCommand::List),
        "check" => Ok(NotebookCommand::Check),
        "commands" => Ok(NotebookCommand::Commands),
        "search" => required(rest, "search <query>").map(|query| NotebookCommand::Search { query }),
        "theories" => Ok(NotebookCommand::Theories),
        "theory" => required(rest, "theory <id>").map(|id| NotebookCommand::Theory { id }),
        "save" => required(rest, "save <path>").map(|path| NotebookCommand::Save { path }),
        "load" => required(rest, "load <path>").map(|path| NotebookCommand::Load { path }),
        "help" | "?" => Ok(NotebookCommand::Help),
        "quit" | "exit" => Ok(NotebookCommand::Quit),
        unknown => Err(CliError::InvalidCommand(format!(
            "Unknown command: {}",
            unknown
        ))),
    }
}

fn required(arg: &str, usage: &str) -> Result<String, CliError> {
    if arg.is_empty() {
        Err(CliError::InvalidCommand(format!("Usage: {}", usage)))
    } else {
        Ok(arg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_multiword_argument() {
        assert_eq!(
            parse_command("new Attribute type").unwrap(),
            NotebookCommand::New {
                constructor: "Attribute type".to_string()
            }
        );
        assert_eq!(
            parse_command("  note   some prose ").unwrap(),
            NotebookCommand::Note {
                text: "some prose".to_string()
            }
        );
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_command("up").unwrap(), NotebookCommand::Up);
        assert_eq!(parse_command("ls").unwrap(), NotebookCommand::List);
        assert_eq!(parse_command("delete-fwd").unwrap(), NotebookCommand::DeleteForward);
        assert_eq!(
            parse_command("focus 3").unwrap(),
            NotebookCommand::Focus { index: 3 }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_command(""), Err(CliError::InvalidCommand(_))));
        assert!(matches!(
            parse_command("new"),
            Err(CliError::InvalidCommand(msg)) if msg.contains("Usage")
        ));
        assert!(matches!(parse_command("focus x"), Err(CliError::InvalidCommand(_))));
        assert!(matches!(
            parse_command("frobnicate"),
            Err(CliError::InvalidCommand(msg)) if msg.contains("frobnicate")
        ));
    }

    #[test]
    fn test_note_may_be_empty() {
        assert_eq!(
            parse_command("note").unwrap(),
            NotebookCommand::Note {
                text: String::new()
            }
        );
    }
}
