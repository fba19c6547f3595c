//! Command parsing
//!
//! Turns a cleaned input line into a [`Command`].

use crate::error::{PokedexError, Result};

/// Every REPL command with its help text, in the order `help` lists them.
pub const COMMANDS: &[(&str, &str)] = &[
    ("help", "Displays a help message"),
    ("exit", "Exit the Pokedex"),
    ("map", "Displays the names of the next 20 location areas in the Pokemon world"),
    ("mapb", "Displays the names of the previous 20 location areas in the Pokemon world"),
    ("explore", "Lists the pokemon that can be encountered in a location area: explore <area>"),
    ("catch", "Tries to catch a named pokemon: catch <pokemon>"),
    ("inspect", "Shows details of a caught pokemon: inspect <pokemon>"),
    ("pokedex", "Lists caught pokemon"),
    ("cache", "Shows response cache statistics"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Map,
    MapBack,
    Explore(String),
    Catch(String),
    Inspect(String),
    Pokedex,
    Cache,
}

impl Command {
    /// Parses cleaned input words. Returns `Ok(None)` for blank input.
    ///
    /// Only the first argument is used; any further words are ignored.
    pub fn parse(words: &[String]) -> Result<Option<Self>> {
        let Some(name) = words.first() else {
            return Ok(None);
        };
        let arg = words.get(1).cloned();

        let command = match name.as_str() {
            "help" => Self::Help,
            "exit" => Self::Exit,
            "map" => Self::Map,
            "mapb" => Self::MapBack,
            "explore" => Self::Explore(required(arg, "explore", "location area name")?),
            "catch" => Self::Catch(required(arg, "catch", "pokemon name")?),
            "inspect" => Self::Inspect(required(arg, "inspect", "pokemon name")?),
            "pokedex" => Self::Pokedex,
            "cache" => Self::Cache,
            other => return Err(PokedexError::UnknownCommand(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn required(arg: Option<String>, command: &'static str, argument: &'static str) -> Result<String> {
    arg.ok_or(PokedexError::MissingArgument { command, argument })
}

/// Lower-cases `text` and splits it on whitespace.
pub fn clean_input(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Option<Command>> {
        Command::parse(&clean_input(line))
    }

    #[test]
    fn test_clean_input() {
        assert!(clean_input("").is_empty());
        assert!(clean_input("   \t ").is_empty());
        assert_eq!(clean_input("\tHello, World!"), vec!["hello,", "world!"]);
        assert_eq!(clean_input("  Catch   PIKACHU  "), vec!["catch", "pikachu"]);
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse("").unwrap(), None);
        assert_eq!(parse("HELP").unwrap(), Some(Command::Help));
        assert_eq!(parse("mapb").unwrap(), Some(Command::MapBack));
        assert_eq!(
            parse("explore pastoria-city-area").unwrap(),
            Some(Command::Explore("pastoria-city-area".to_string()))
        );
        assert_eq!(
            parse("catch Pidgey extra words").unwrap(),
            Some(Command::Catch("pidgey".to_string()))
        );
    }

    #[test]
    fn test_parse_unknown_command() {
        let err = parse("fly away").unwrap_err();
        assert!(matches!(err, PokedexError::UnknownCommand(ref name) if name == "fly"));
    }

    #[test]
    fn test_parse_missing_argument() {
        for line in ["explore", "catch", "inspect"] {
            let err = parse(line).unwrap_err();
            assert!(
                matches!(err, PokedexError::MissingArgument { command, .. } if command == line),
                "{} should require an argument",
                line
            );
        }
    }

    #[test]
    fn test_every_listed_command_parses() {
        for (name, _) in COMMANDS {
            let line = format!("{} arg", name);
            assert!(parse(&line).unwrap().is_some(), "{} should parse", name);
        }
    }
}
