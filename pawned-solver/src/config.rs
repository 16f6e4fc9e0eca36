//! Command-line options and the game settings resolved from them.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use pawned_core::{Position, Side, DEFAULT_COLS, DEFAULT_ROWS};

use crate::session::Controller;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play Pawned against the computer", long_about = None)]
pub struct Args {
    /// Who plays white
    #[arg(long, value_enum, default_value = "computer")]
    pub white: Controller,

    /// Who plays black
    #[arg(long, value_enum, default_value = "computer")]
    pub black: Controller,

    /// Search depth in plies
    #[arg(short, long, default_value_t = 12)]
    pub depth: u32,

    /// Board rows
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    pub rows: usize,

    /// Board columns (one pawn per column for each side)
    #[arg(long, default_value_t = DEFAULT_COLS)]
    pub cols: usize,

    /// Plain minimax instead of alpha-beta
    #[arg(long)]
    pub no_prune: bool,

    /// Start from a JSON position instead of the initial setup
    #[arg(long, value_name = "FILE", conflicts_with_all = ["rows", "cols"])]
    pub position: Option<PathBuf>,

    /// Side to move first
    #[arg(long, default_value = "white")]
    pub to_move: Side,
}

/// Everything needed to start a game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub start: Position,
    pub to_move: Side,
    pub white: Controller,
    pub black: Controller,
    pub depth: u32,
    pub prune: bool,
}

impl Args {
    pub fn into_config(self) -> Result<GameConfig> {
        let start = match &self.position {
            Some(path) => load_position(path)?,
            None => Position::new(self.rows, self.cols)
                .with_context(|| format!("cannot set up a {}x{} board", self.rows, self.cols))?,
        };

        Ok(GameConfig {
            start,
            to_move: self.to_move,
            white: self.white,
            black: self.black,
            depth: self.depth,
            prune: !self.no_prune,
        })
    }
}

/// Read a position saved as JSON.
pub fn load_position(path: &Path) -> Result<Position> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read position file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("invalid position in {}", path.display()))
}
