//! Pawned game logic: a pawn race on a small rectangular board.
//!
//! # Board Layout (default 6 rows × 5 columns)
//!
//! ```text
//!      0  1  2  3  4
//!   0 B0 B1 B2 B3 B4     black home row, white goal row
//!   1
//!   2
//!   3
//!   4
//!   5 W0 W1 W2 W3 W4     white home row, black goal row
//! ```
//!
//! White moves toward row 0 and black toward higher rows. A piece either
//! steps straight forward onto an empty cell, or steps diagonally forward onto
//! an opposing piece and captures it. There are no other moves.
//!
//! Labels are fixed when the board is set up (side marker + starting column)
//! and follow the piece for the rest of the game.
//!
//! # Black's Goal Row
//!
//! Black wins on the row whose index equals the *column* count, not on the
//! last row. On the default 6×5 board the two coincide (row 5). On other
//! shapes they do not: with `cols >= rows` black can never win by reaching a
//! row, and a black piece on the last row simply has no moves left.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of rows.
pub const DEFAULT_ROWS: usize = 6;
/// Default number of columns (and pieces per side).
pub const DEFAULT_COLS: usize = 5;

/// Largest accepted row or column count. Labels carry a `u16` index.
pub const MAX_DIMENSION: usize = u16::MAX as usize + 1;
/// Largest accepted board area.
pub const MAX_CELLS: usize = 1 << 20;

/// Value of a decided game, positive when white wins.
///
/// Dominates any static evaluation, which is bounded by the piece count.
pub const WIN_SCORE: i32 = 100_000;
/// Value of a drawn game.
pub const DRAW_SCORE: i32 = 0;

/// Errors raised while building or loading a position.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    /// Board too small to hold both home rows, or too wide to label.
    #[error("invalid board dimensions {rows}x{cols}: need 2 to 65536 rows, 1 to 65536 columns and at most 1048576 cells")]
    InvalidConfiguration { rows: usize, cols: usize },

    /// Piece placed outside the grid.
    #[error("piece {label} at ({row}, {col}) is off the {rows}x{cols} board")]
    OffBoard {
        label: Label,
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Two pieces on the same cell.
    #[error("cell ({row}, {col}) holds both {first} and {second}")]
    Overlap {
        row: usize,
        col: usize,
        first: Label,
        second: Label,
    },

    /// The same label appears twice.
    #[error("duplicate piece label {0}")]
    DuplicateLabel(Label),

    /// A piece listed under the other side's collection.
    #[error("piece {label} listed with the {side} pieces")]
    WrongSide { label: Label, side: Side },
}

/// Text that is not a piece label such as `W3`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid piece label {0:?}")]
pub struct ParseLabelError(pub String);

/// Text that is not a side name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid side {0:?} (expected white or black)")]
pub struct ParseSideError(pub String);

/// Side identifier.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl Side {
    /// Get the opposing side.
    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Leading character of this side's labels.
    #[inline]
    pub fn marker(self) -> char {
        match self {
            Side::White => 'W',
            Side::Black => 'B',
        }
    }

    /// Convert a label marker back to a side.
    #[inline]
    pub fn from_marker(marker: char) -> Option<Side> {
        match marker {
            'W' => Some(Side::White),
            'B' => Some(Side::Black),
            _ => None,
        }
    }

    /// Capitalised name for messages ("White", "Black").
    pub fn name(self) -> &'static str {
        match self {
            Side::White => "White",
            Side::Black => "Black",
        }
    }

    /// Both sides, white first.
    pub fn all() -> impl Iterator<Item = Side> {
        [Side::White, Side::Black].into_iter()
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => f.write_str("white"),
            Side::Black => f.write_str("black"),
        }
    }
}

impl FromStr for Side {
    type Err = ParseSideError;

    fn from_str(s: &str) -> Result<Side, ParseSideError> {
        match s.to_ascii_lowercase().as_str() {
            "white" | "w" => Ok(Side::White),
            "black" | "b" => Ok(Side::Black),
            _ => Err(ParseSideError(s.to_string())),
        }
    }
}

/// Stable piece identity: side marker plus the column the piece started on.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Label {
    side: Side,
    index: u16,
}

impl Label {
    #[inline]
    pub const fn new(side: Side, index: u16) -> Label {
        Label { side, index }
    }

    #[inline]
    pub fn side(self) -> Side {
        self.side
    }

    /// Starting column of the piece.
    #[inline]
    pub fn index(self) -> u16 {
        self.index
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.side.marker(), self.index)
    }
}

impl FromStr for Label {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Label, ParseLabelError> {
        let err = || ParseLabelError(s.to_string());
        let mut chars = s.chars();
        let side = chars.next().and_then(Side::from_marker).ok_or_else(err)?;
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }
        let index = digits.parse().map_err(|_| err())?;
        Ok(Label::new(side, index))
    }
}

impl TryFrom<String> for Label {
    type Error = ParseLabelError;

    fn try_from(s: String) -> Result<Label, ParseLabelError> {
        s.parse()
    }
}

impl From<Label> for String {
    fn from(label: Label) -> String {
        label.to_string()
    }
}

/// A piece on the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Piece {
    pub label: Label,
    pub row: usize,
    pub col: usize,
}

/// Move a labelled piece to a destination cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Move {
    pub label: Label,
    pub row: usize,
    pub col: usize,
}

impl Move {
    #[inline]
    pub fn new(label: Label, row: usize, col: usize) -> Move {
        Move { label, row, col }
    }

    /// Side that owns the moving piece.
    #[inline]
    pub fn side(&self) -> Side {
        self.label.side()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.label, self.row, self.col)
    }
}

/// Result of a finished game.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Outcome {
    WhiteWins,
    BlackWins,
    Draw,
}

impl Outcome {
    /// The winning side, or None for a draw.
    pub fn winner(self) -> Option<Side> {
        match self {
            Outcome::WhiteWins => Some(Side::White),
            Outcome::BlackWins => Some(Side::Black),
            Outcome::Draw => None,
        }
    }

    /// Search value of this outcome (white positive).
    pub fn value(self) -> i32 {
        match self {
            Outcome::WhiteWins => WIN_SCORE,
            Outcome::BlackWins => -WIN_SCORE,
            Outcome::Draw => DRAW_SCORE,
        }
    }

    fn win_for(side: Side) -> Outcome {
        match side {
            Side::White => Outcome::WhiteWins,
            Side::Black => Outcome::BlackWins,
        }
    }
}

/// Serialized shape of a [`Position`]: dimensions plus both piece lists.
///
/// Loading goes through [`Position::from_pieces`], so a record that breaks
/// the grid invariants is rejected instead of producing a corrupt board.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PositionRecord {
    pub rows: usize,
    pub cols: usize,
    pub white: Vec<Piece>,
    pub black: Vec<Piece>,
}

/// Board state: the grid plus each side's pieces in setup order.
///
/// The grid and the piece lists always agree: every piece sits in the grid
/// cell named by its (row, col), and every occupied cell belongs to exactly
/// one listed piece.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(try_from = "PositionRecord", into = "PositionRecord")]
pub struct Position {
    rows: usize,
    cols: usize,
    /// Row-major cell contents.
    grid: Vec<Option<Label>>,
    white: Vec<Piece>,
    black: Vec<Piece>,
}

impl Position {
    /// Set up a new game: black fills row 0 and white fills the last row,
    /// each piece labelled by its column.
    pub fn new(rows: usize, cols: usize) -> Result<Position, PositionError> {
        Self::check_dimensions(rows, cols)?;
        Ok(Self::setup(rows, cols))
    }

    /// Build a position from explicit piece lists.
    ///
    /// Pieces keep the given order, which is also the move generation order.
    pub fn from_pieces(
        rows: usize,
        cols: usize,
        white: Vec<Piece>,
        black: Vec<Piece>,
    ) -> Result<Position, PositionError> {
        Self::check_dimensions(rows, cols)?;

        let mut position = Position::empty(rows, cols);
        let mut seen = HashSet::new();
        for (side, pieces) in [(Side::White, white), (Side::Black, black)] {
            for piece in pieces {
                if piece.label.side() != side {
                    return Err(PositionError::WrongSide { label: piece.label, side });
                }
                if piece.row >= rows || piece.col >= cols {
                    return Err(PositionError::OffBoard {
                        label: piece.label,
                        row: piece.row,
                        col: piece.col,
                        rows,
                        cols,
                    });
                }
                if !seen.insert(piece.label) {
                    return Err(PositionError::DuplicateLabel(piece.label));
                }
                if let Some(first) = position.at(piece.row, piece.col) {
                    return Err(PositionError::Overlap {
                        row: piece.row,
                        col: piece.col,
                        first,
                        second: piece.label,
                    });
                }
                position.place(piece);
            }
        }
        Ok(position)
    }

    fn check_dimensions(rows: usize, cols: usize) -> Result<(), PositionError> {
        let invalid = || PositionError::InvalidConfiguration { rows, cols };
        if !(2..=MAX_DIMENSION).contains(&rows) || !(1..=MAX_DIMENSION).contains(&cols) {
            return Err(invalid());
        }
        match rows.checked_mul(cols) {
            Some(cells) if cells <= MAX_CELLS => Ok(()),
            _ => Err(invalid()),
        }
    }

    fn empty(rows: usize, cols: usize) -> Position {
        Position {
            rows,
            cols,
            grid: vec![None; rows * cols],
            white: Vec::with_capacity(cols),
            black: Vec::with_capacity(cols),
        }
    }

    /// Initial setup for dimensions that already passed `check_dimensions`.
    fn setup(rows: usize, cols: usize) -> Position {
        let mut position = Position::empty(rows, cols);
        for col in 0..cols {
            let index = col as u16;
            position.place(Piece { label: Label::new(Side::White, index), row: rows - 1, col });
            position.place(Piece { label: Label::new(Side::Black, index), row: 0, col });
        }
        position
    }

    fn place(&mut self, piece: Piece) {
        let idx = self.index(piece.row, piece.col);
        self.grid[idx] = Some(piece.label);
        self.pieces_mut(piece.label.side()).push(piece);
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    // ========== Queries ==========

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Label of the piece on a cell. None for empty or off-board cells.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> Option<Label> {
        if row < self.rows && col < self.cols {
            self.grid[self.index(row, col)]
        } else {
            None
        }
    }

    /// A side's remaining pieces, in setup order.
    #[inline]
    pub fn pieces(&self, side: Side) -> &[Piece] {
        match side {
            Side::White => &self.white,
            Side::Black => &self.black,
        }
    }

    fn pieces_mut(&mut self, side: Side) -> &mut Vec<Piece> {
        match side {
            Side::White => &mut self.white,
            Side::Black => &mut self.black,
        }
    }

    /// Find a piece by label.
    pub fn piece(&self, label: Label) -> Option<&Piece> {
        self.pieces(label.side()).iter().find(|p| p.label == label)
    }

    #[inline]
    pub fn piece_count(&self, side: Side) -> usize {
        self.pieces(side).len()
    }

    /// Pieces left on the board for both sides.
    #[inline]
    pub fn total_pieces(&self) -> usize {
        self.white.len() + self.black.len()
    }

    /// Row a side must reach to win.
    ///
    /// Black's goal is the row indexed by the column count; see the module
    /// docs.
    #[inline]
    pub fn goal_row(&self, side: Side) -> usize {
        match side {
            Side::White => 0,
            Side::Black => self.cols,
        }
    }

    // ========== Move Generation ==========

    /// Row directly ahead of `row` for `side`, or None past the board edge.
    #[inline]
    fn forward_row(&self, side: Side, row: usize) -> Option<usize> {
        match side {
            Side::White => row.checked_sub(1),
            Side::Black => (row + 1 < self.rows).then_some(row + 1),
        }
    }

    #[inline]
    fn holds(&self, side: Side, row: usize, col: usize) -> bool {
        self.at(row, col).is_some_and(|label| label.side() == side)
    }

    /// Generate all legal moves for a side.
    ///
    /// Moves follow piece order, and for each piece: straight advance, then
    /// capture toward the lower column, then capture toward the higher column.
    /// Search tie-breaking depends on this order.
    pub fn legal_moves(&self, side: Side) -> Vec<Move> {
        let opponent = side.opponent();
        let mut moves = Vec::with_capacity(self.pieces(side).len() * 3);

        for piece in self.pieces(side) {
            let Some(row) = self.forward_row(side, piece.row) else {
                continue;
            };
            if self.at(row, piece.col).is_none() {
                moves.push(Move::new(piece.label, row, piece.col));
            }
            if piece.col > 0 && self.holds(opponent, row, piece.col - 1) {
                moves.push(Move::new(piece.label, row, piece.col - 1));
            }
            if piece.col + 1 < self.cols && self.holds(opponent, row, piece.col + 1) {
                moves.push(Move::new(piece.label, row, piece.col + 1));
            }
        }

        moves
    }

    /// Check whether `side` may play `mov` here.
    pub fn is_legal(&self, side: Side, mov: &Move) -> bool {
        self.legal_moves(side).contains(mov)
    }

    /// Check whether `side` has at least one legal move.
    pub fn has_moves(&self, side: Side) -> bool {
        !self.legal_moves(side).is_empty()
    }

    // ========== Apply ==========

    /// Apply a move to this position, returning the captured piece, if any.
    ///
    /// Does NOT validate: the move must come from `legal_moves` for this
    /// position. A label that names no piece leaves the position unchanged.
    pub fn apply_in_place(&mut self, mov: Move) -> Option<Piece> {
        debug_assert!(mov.row < self.rows && mov.col < self.cols);
        let side = mov.side();

        let mover = self.pieces_mut(side).iter_mut().find(|p| p.label == mov.label)?;
        let (from_row, from_col) = (mover.row, mover.col);
        mover.row = mov.row;
        mover.col = mov.col;

        let from = self.index(from_row, from_col);
        self.grid[from] = None;

        let opponent = side.opponent();
        let captured = self
            .pieces(opponent)
            .iter()
            .position(|p| p.row == mov.row && p.col == mov.col)
            .map(|idx| self.pieces_mut(opponent).remove(idx));

        let to = self.index(mov.row, mov.col);
        self.grid[to] = Some(mov.label);

        captured
    }

    /// Apply a move to a copy, leaving this position untouched.
    pub fn apply_copy(&self, mov: Move) -> Position {
        let mut next = self.clone();
        next.apply_in_place(mov);
        next
    }

    // ========== Terminal Detection ==========

    /// Decide whether the game is over, and how.
    ///
    /// Checked in order: a side without pieces loses, white on its goal row
    /// wins, black on its goal row wins, both sides without moves draw.
    pub fn winner(&self) -> Option<Outcome> {
        for side in Side::all() {
            if self.pieces(side).is_empty() {
                return Some(Outcome::win_for(side.opponent()));
            }
        }
        for side in Side::all() {
            let goal = self.goal_row(side);
            if self.pieces(side).iter().any(|p| p.row == goal) {
                return Some(Outcome::win_for(side));
            }
        }
        if !self.has_moves(Side::White) && !self.has_moves(Side::Black) {
            return Some(Outcome::Draw);
        }
        None
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some()
    }

    /// Value of a finished game (white positive), or None while it continues.
    pub fn terminal_value(&self) -> Option<i32> {
        self.winner().map(Outcome::value)
    }

    /// Static evaluation for search cutoffs: material difference, white
    /// positive.
    pub fn evaluate(&self) -> i32 {
        self.white.len() as i32 - self.black.len() as i32
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::setup(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

impl TryFrom<PositionRecord> for Position {
    type Error = PositionError;

    fn try_from(record: PositionRecord) -> Result<Position, PositionError> {
        Position::from_pieces(record.rows, record.cols, record.white, record.black)
    }
}

impl From<Position> for PositionRecord {
    fn from(position: Position) -> PositionRecord {
        PositionRecord {
            rows: position.rows,
            cols: position.cols,
            white: position.white,
            black: position.black,
        }
    }
}
