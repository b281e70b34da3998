//! Input processing for the CLI client.
//!
//! Turns one line of text into a [`Command`]. Directions accept the full
//! name or its first letter.

use std::str::FromStr;

use game_core::Direction;
use thiserror::Error;

/// High-level outcome of parsing an input line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Walk(Direction),
    Dodge(Direction),
    Rest,
    Teleport { x: i32, y: i32 },
    Cursor { x: i32, y: i32 },
    ClearCursor,
    /// Describe what stands under the cursor.
    Look,
    /// Advance the tile type at a cell.
    Cycle { x: i32, y: i32 },
    /// Run turns without input.
    Wait,
    Restart,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown command \"{0}\" (try \"help\")")]
    UnknownCommand(String),

    #[error("\"{0}\" is not a direction")]
    InvalidDirection(String),

    #[error("\"{command}\" expects {expected}")]
    MissingArguments {
        command: &'static str,
        expected: &'static str,
    },

    #[error("\"{0}\" is not a number")]
    InvalidNumber(String),
}

pub const HELP: &str = "\
commands:
  walk <dir> | <dir>    step or attack (n/e/s/w)
  dodge <dir>           leap two cells, costs stamina
  rest                  skip a turn
  teleport <x> <y>      move to a cell (alias: tp)
  cursor <x> <y>        place the inspection cursor (no args clears it)
  look                  describe what is under the cursor
  cycle <x> <y>         change the tile type of a cell
  wait                  run turns without input
  restart               rebuild the world
  quit";

impl FromStr for Command {
    type Err = InputError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(Command::Wait);
        };
        let args: Vec<&str> = words.collect();

        let command = match name.to_ascii_lowercase().as_str() {
            "walk" | "w" if !args.is_empty() => Command::Walk(direction(args[0])?),
            "walk" => {
                return Err(InputError::MissingArguments {
                    command: "walk",
                    expected: "a direction",
                });
            }
            "dodge" | "d" => Command::Dodge(direction(args.first().copied().ok_or(
                InputError::MissingArguments {
                    command: "dodge",
                    expected: "a direction",
                },
            )?)?),
            "rest" | "r" => Command::Rest,
            "teleport" | "tp" => {
                let (x, y) = coordinates("teleport", &args)?;
                Command::Teleport { x, y }
            }
            "cursor" if args.is_empty() => Command::ClearCursor,
            "cursor" => {
                let (x, y) = coordinates("cursor", &args)?;
                Command::Cursor { x, y }
            }
            "look" | "l" => Command::Look,
            "cycle" => {
                let (x, y) = coordinates("cycle", &args)?;
                Command::Cycle { x, y }
            }
            "wait" => Command::Wait,
            "restart" => Command::Restart,
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            other => match direction(other) {
                Ok(direction) => Command::Walk(direction),
                Err(_) => return Err(InputError::UnknownCommand(other.to_string())),
            },
        };
        Ok(command)
    }
}

fn direction(word: &str) -> Result<Direction, InputError> {
    let expanded = match word.to_ascii_lowercase().as_str() {
        "n" => "north",
        "e" => "east",
        "s" => "south",
        "w" => "west",
        _ => word,
    };
    Direction::from_str(expanded).map_err(|_| InputError::InvalidDirection(word.to_string()))
}

fn coordinates(command: &'static str, args: &[&str]) -> Result<(i32, i32), InputError> {
    let [x, y] = args else {
        return Err(InputError::MissingArguments {
            command,
            expected: "<x> <y>",
        });
    };
    Ok((number(x)?, number(y)?))
}

fn number(word: &str) -> Result<i32, InputError> {
    word.parse()
        .map_err(|_| InputError::InvalidNumber(word.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Command, InputError> {
        line.parse()
    }

    #[test]
    fn directions_take_short_and_long_forms() {
        assert_eq!(parse("walk n"), Ok(Command::Walk(Direction::North)));
        assert_eq!(parse("WALK West"), Ok(Command::Walk(Direction::West)));
        assert_eq!(parse("s"), Ok(Command::Walk(Direction::South)));
        assert_eq!(parse("dodge e"), Ok(Command::Dodge(Direction::East)));
        assert_eq!(
            parse("walk up"),
            Err(InputError::InvalidDirection("up".into()))
        );
    }

    #[test]
    fn lone_w_means_west() {
        assert_eq!(parse("w"), Ok(Command::Walk(Direction::West)));
    }

    #[test]
    fn coordinates_are_checked() {
        assert_eq!(parse("tp 4 -2"), Ok(Command::Teleport { x: 4, y: -2 }));
        assert_eq!(parse("cursor 1 1"), Ok(Command::Cursor { x: 1, y: 1 }));
        assert_eq!(parse("cursor"), Ok(Command::ClearCursor));
        assert_eq!(parse("cycle 2 x"), Err(InputError::InvalidNumber("x".into())));
        assert!(matches!(
            parse("teleport 3"),
            Err(InputError::MissingArguments { command: "teleport", .. })
        ));
    }

    #[test]
    fn blank_lines_wait_and_unknown_words_fail() {
        assert_eq!(parse("   "), Ok(Command::Wait));
        assert_eq!(parse("dance"), Err(InputError::UnknownCommand("dance".into())));
        assert_eq!(parse("q"), Ok(Command::Quit));
    }
}
