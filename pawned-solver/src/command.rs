//! Human input at the move prompt.

use std::str::FromStr;

use pawned_core::{Label, Move, ParseLabelError};
use thiserror::Error;

pub const HELP: &str = "\
help - Displays Help
   q - Quit Program
   m - All possible moves for the player
   p - Prints the current board";

/// One line typed at the prompt.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Quit,
    Print,
    ListMoves,
    Help,
    /// `label row col`
    Move(Move),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty input")]
    Empty,

    #[error("unknown command {0:?}")]
    Unknown(String),

    #[error(transparent)]
    Label(#[from] ParseLabelError),

    #[error("invalid {axis} {text:?}")]
    Coordinate { axis: &'static str, text: String },

    #[error("expected 1 or 3 words, got {0}")]
    TokenCount(usize),
}

fn parse_coordinate(axis: &'static str, text: &str) -> Result<usize, CommandError> {
    text.parse()
        .map_err(|_| CommandError::Coordinate { axis, text: text.to_string() })
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = s.split_whitespace().collect();
        match words.as_slice() {
            [] => Err(CommandError::Empty),
            ["q"] => Ok(Command::Quit),
            ["p"] => Ok(Command::Print),
            ["m"] => Ok(Command::ListMoves),
            ["help"] => Ok(Command::Help),
            [other] => Err(CommandError::Unknown(other.to_string())),
            [label, row, col] => {
                let label: Label = label.parse()?;
                let row = parse_coordinate("row", row)?;
                let col = parse_coordinate("column", col)?;
                Ok(Command::Move(Move::new(label, row, col)))
            }
            words => Err(CommandError::TokenCount(words.len())),
        }
    }
}
