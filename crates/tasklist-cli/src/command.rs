/// A line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Toggle(usize),
    Delete(usize),
    Reload,
    Health,
    Version,
    Help,
    Quit,
    /// Blank line; just re-render.
    Nothing,
}

pub const HELP: &str = "\
commands:
  add <title>    create a task
  toggle <n>     flip done/open of row n
  delete <n>     delete row n
  reload         fetch the list again
  health         check the server health
  version        show the server version
  help           show this help
  quit           exit";

pub fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "" => Ok(Command::Nothing),
        // Blank titles are passed through; the controller reports them.
        "add" | "a" => Ok(Command::Add(rest.to_string())),
        "toggle" | "t" | "done" => row(rest).map(Command::Toggle),
        "delete" | "del" | "rm" => row(rest).map(Command::Delete),
        "reload" | "r" | "ls" => Ok(Command::Reload),
        "health" => Ok(Command::Health),
        "version" => Ok(Command::Version),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(format!("unknown command '{other}', type 'help'")),
    }
}

fn row(arg: &str) -> Result<usize, String> {
    if arg.is_empty() {
        return Err("missing row number".to_string());
    }
    arg.parse()
        .map_err(|_| format!("'{arg}' is not a row number"))
}
