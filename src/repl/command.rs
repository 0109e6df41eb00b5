//! REPL Command Parsing
//!
//! Turns one line of user input into a [`Command`].

use thiserror::Error;

/// Errors produced while parsing a command line
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Usage: {0}")]
    MissingArgument(&'static str),
}

/// Every command the explorer understands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    /// Show the next page of location areas
    Map,
    /// Show the previous page of location areas
    MapBack,
    Explore { area: String },
    Catch { pokemon: String },
    Inspect { pokemon: String },
    Pokedex,
    CacheStats,
}

/// Lowercase, trim and split a line into words
pub fn clean_input(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

impl Command {
    /// Parse a line; an empty line yields `Ok(None)`
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let words = clean_input(line);
        let Some((name, args)) = words.split_first() else {
            return Ok(None);
        };
        let arg = args.first().cloned();

        let cmd = match name.as_str() {
            "help" => Command::Help,
            "exit" | "quit" => Command::Exit,
            "map" => Command::Map,
            "mapb" => Command::MapBack,
            "explore" => Command::Explore {
                area: arg.ok_or(ParseError::MissingArgument("explore <location-area>"))?,
            },
            "catch" => Command::Catch {
                pokemon: arg.ok_or(ParseError::MissingArgument("catch <pokemon>"))?,
            },
            "inspect" => Command::Inspect {
                pokemon: arg.ok_or(ParseError::MissingArgument("inspect <pokemon>"))?,
            },
            "pokedex" => Command::Pokedex,
            "cachestats" => Command::CacheStats,
            other => return Err(ParseError::Unknown(other.to_string())),
        };

        Ok(Some(cmd))
    }
}

pub const HELP_TEXT: &str = "\
Welcome to the Pokedex!
help              - show this message
exit              - quit
map               - show next 20 location areas
mapb              - show previous 20 location areas
explore <area>    - inspect a specific location-area
catch <pokemon>   - try to catch a Pokemon (only if present in your current area)
inspect <pokemon> - view details of a Pokemon you've caught
pokedex           - list the Pokemon you've caught
cachestats        - show response cache counters";
