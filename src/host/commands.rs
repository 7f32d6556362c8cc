use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    List,
    Wheel,
    Sort,
    Shuffle,
    Spin,
    Remove,
    Dismiss,
    Clear,
    Lists,
    Users,
    NewUser(String),
    NewList { user_id: String, title: String },
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  add <name>                 add a name to the wheel
  list                       show the names
  wheel                      show the wheel slices
  sort                       sort names A-Z
  shuffle                    shuffle names
  spin                       spin the wheel
  remove                     remove the selected name and close the result
  dismiss                    close the result
  clear                      clear all names
  lists                      show saved wheels
  users                      show users
  new-user <username>        create a user
  new-list <user-id> <title> create a saved wheel
  help                       show this help
  quit                       exit";

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "add" => Command::Add(rest.to_string()),
            "list" | "ls" => Command::List,
            "wheel" => Command::Wheel,
            "sort" => Command::Sort,
            "shuffle" => Command::Shuffle,
            "spin" => Command::Spin,
            "remove" => Command::Remove,
            "dismiss" | "close" => Command::Dismiss,
            "clear" => Command::Clear,
            "lists" => Command::Lists,
            "users" => Command::Users,
            "new-user" => Command::NewUser(rest.to_string()),
            "new-list" => {
                let (user_id, title) = rest
                    .split_once(char::is_whitespace)
                    .map(|(user, title)| (user.to_string(), title.trim().to_string()))
                    .unwrap_or_else(|| (rest.to_string(), String::new()));
                Command::NewList { user_id, title }
            }
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "" => return Err("Type `help` for a list of commands".to_string()),
            other => return Err(format!("Unknown command: {}", other)),
        };
        Ok(command)
    }
}
