//! Line commands typed at the prompt.

/// One command in list mode. Item numbers are 1-based positions in the
/// list as last rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Toggle(usize),
    Remove(usize),
    Edit(usize),
    ToggleAll,
    ClearCompleted,
    /// A fragment such as `#/?filter=active`.
    Route(String),
    Refresh,
    Help,
    Quit,
}

/// Input while an item is being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditInput {
    /// Enter with this text.
    Submit(String),
    /// Leave the field, optionally typing `text` first.
    Blur(Option<String>),
    Cancel,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("`{0}` needs an item number")]
    MissingIndex(&'static str),
    #[error("`{0}` is not an item number")]
    BadIndex(String),
    #[error("nothing to add")]
    EmptyAdd,
}

pub const HELP: &str = "\
add <text>        add a todo
toggle <n>        flip item n
rm <n>            delete item n
edit <n>          edit item n: type the new text, /blur [text] to leave, /cancel to abort
all               toggle every item
clear             delete completed items
filter <name>     show all | active | completed (or type a #/?filter=... fragment)
ls                reload the list
quit              exit";

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        if line.starts_with('#') {
            return Ok(Command::Route(line.to_string()));
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        match word {
            "add" | "a" => {
                if rest.is_empty() {
                    Err(CommandError::EmptyAdd)
                } else {
                    Ok(Command::Add(rest.to_string()))
                }
            }
            "toggle" | "t" => index("toggle", rest).map(Command::Toggle),
            "rm" | "remove" => index("rm", rest).map(Command::Remove),
            "edit" | "e" => index("edit", rest).map(Command::Edit),
            "all" => Ok(Command::ToggleAll),
            "clear" => Ok(Command::ClearCompleted),
            "filter" | "f" => Ok(Command::Route(format!("#/?filter={rest}"))),
            "ls" | "" => Ok(Command::Refresh),
            "help" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

impl EditInput {
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        match line.trim() {
            "/cancel" => EditInput::Cancel,
            "/blur" => EditInput::Blur(None),
            trimmed => match trimmed.strip_prefix("/blur ") {
                Some(text) => EditInput::Blur(Some(text.to_string())),
                None => EditInput::Submit(line.to_string()),
            },
        }
    }
}

fn index(command: &'static str, arg: &str) -> Result<usize, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingIndex(command));
    }
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CommandError::BadIndex(arg.to_string())),
    }
}
