//! A game in progress: the live position, whose turn it is, and who plays
//! each side.

use pawned_core::{Move, Outcome, Piece, Position, Side};
use thiserror::Error;
use tracing::debug;

use crate::solver::Searcher;

/// Who picks the moves for one side.
#[derive(Clone, Copy, PartialEq, Eq, Debug, clap::ValueEnum)]
pub enum Controller {
    Human,
    Computer,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{mov} is not a legal move for {side}")]
pub struct MoveRejected {
    pub mov: Move,
    pub side: Side,
}

/// What happened during one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub side: Side,
    /// None when the side had nothing to play
    pub mov: Option<Move>,
    pub captured: Option<Piece>,
    /// Search value, for computer turns
    pub value: Option<i32>,
    /// Side whose following turn was skipped for lack of moves
    pub skipped: Option<Side>,
}

pub struct GameSession {
    position: Position,
    to_move: Side,
    white: Controller,
    black: Controller,
    plies: usize,
}

impl GameSession {
    pub fn new(position: Position, to_move: Side, white: Controller, black: Controller) -> Self {
        Self { position, to_move, white, black, plies: 0 }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn side_to_move(&self) -> Side {
        self.to_move
    }

    pub fn controller(&self, side: Side) -> Controller {
        match side {
            Side::White => self.white,
            Side::Black => self.black,
        }
    }

    /// Moves applied so far.
    pub fn plies(&self) -> usize {
        self.plies
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.position.winner()
    }

    pub fn is_over(&self) -> bool {
        self.outcome().is_some()
    }

    /// Legal moves for the side to move.
    pub fn legal_moves(&self) -> Vec<Move> {
        self.position.legal_moves(self.to_move)
    }

    /// Play a move chosen outside the engine, typically typed by a human.
    ///
    /// The position is left untouched when the move is not legal for the
    /// side to move.
    pub fn submit(&mut self, mov: Move) -> Result<Turn, MoveRejected> {
        let side = self.to_move;
        if !self.position.is_legal(side, &mov) {
            return Err(MoveRejected { mov, side });
        }
        Ok(self.play(Some(mov), None))
    }

    /// Let the engine pick and play a move for the side to move.
    ///
    /// A side with nothing to play passes.
    pub fn play_computer(&mut self, searcher: &mut Searcher, depth: u32) -> Turn {
        let (value, mov) = searcher.best_move(&self.position, self.to_move, depth);
        self.play(mov, Some(value))
    }

    fn play(&mut self, mov: Option<Move>, value: Option<i32>) -> Turn {
        let side = self.to_move;
        let captured = mov.and_then(|mov| {
            self.plies += 1;
            self.position.apply_in_place(mov)
        });
        if let Some(mov) = mov {
            debug!(side = %side, mov = %mov, captured = ?captured.map(|p| p.label), "move played");
        }

        self.to_move = side.opponent();
        let skipped = self.skip_if_stuck();

        Turn { side, mov, captured, value, skipped }
    }

    /// Hand the turn back when the side to move has no legal move while the
    /// game is still running. Returns the side that was skipped.
    pub fn skip_if_stuck(&mut self) -> Option<Side> {
        if self.is_over() || self.position.has_moves(self.to_move) {
            return None;
        }
        let stuck = self.to_move;
        debug!(side = %stuck, "no legal moves, turn skipped");
        self.to_move = stuck.opponent();
        Some(stuck)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pawned_core::Label;

    fn board(white: &[(u16, usize, usize)], black: &[(u16, usize, usize)]) -> Position {
        let pieces = |side: Side, list: &[(u16, usize, usize)]| -> Vec<Piece> {
            list.iter()
                .map(|&(i, row, col)| Piece { label: Label::new(side, i), row, col })
                .collect()
        };
        Position::from_pieces(6, 5, pieces(Side::White, white), pieces(Side::Black, black)).unwrap()
    }

    fn human_game(position: Position, to_move: Side) -> GameSession {
        GameSession::new(position, to_move, Controller::Human, Controller::Human)
    }

    #[test]
    fn test_submit_illegal_move_is_rejected() {
        let mut session = human_game(Position::default(), Side::White);
        let bad: Move = Move::new("W0".parse().unwrap(), 3, 0);

        let err = session.submit(bad).unwrap_err();
        assert_eq!(err, MoveRejected { mov: bad, side: Side::White });
        assert_eq!(err.to_string(), "W0 3 0 is not a legal move for white");
        assert_eq!(session.position(), &Position::default());
        assert_eq!(session.side_to_move(), Side::White);
        assert_eq!(session.plies(), 0);

        // Black's piece on white's turn
        let wrong_side = Move::new("B0".parse().unwrap(), 1, 0);
        assert!(session.submit(wrong_side).is_err());
    }

    #[test]
    fn test_submit_legal_move_passes_turn() {
        let mut session = human_game(Position::default(), Side::White);
        let mov = Move::new("W2".parse().unwrap(), 4, 2);

        let turn = session.submit(mov).unwrap();
        assert_eq!(turn.side, Side::White);
        assert_eq!(turn.mov, Some(mov));
        assert_eq!(turn.captured, None);
        assert_eq!(turn.value, None);
        assert_eq!(turn.skipped, None);

        assert_eq!(session.side_to_move(), Side::Black);
        assert_eq!(session.plies(), 1);
        assert_eq!(session.position().at(4, 2), Some("W2".parse().unwrap()));
        assert_eq!(session.position().at(5, 2), None);
    }

    #[test]
    fn test_submit_capture() {
        let position = board(&[(2, 3, 2)], &[(1, 2, 1), (4, 0, 4)]);
        let mut session = human_game(position, Side::White);

        let turn = session.submit(Move::new("W2".parse().unwrap(), 2, 1)).unwrap();
        let captured = turn.captured.unwrap();
        assert_eq!(captured.label, "B1".parse().unwrap());
        assert_eq!(session.position().piece_count(Side::Black), 1);
        assert!(!session.is_over());
    }

    #[test]
    fn test_turn_skipped_when_opponent_stuck() {
        // After W4 advances, B0 is still blocked by W0 while W4 can move on
        let position = board(&[(0, 3, 0), (4, 5, 4)], &[(0, 2, 0)]);
        let mut session = human_game(position, Side::White);

        let turn = session.submit(Move::new("W4".parse().unwrap(), 4, 4)).unwrap();
        assert_eq!(turn.skipped, Some(Side::Black));
        assert_eq!(session.side_to_move(), Side::White);
    }

    #[test]
    fn test_skip_if_stuck_at_start() {
        let position = board(&[(0, 3, 0)], &[(0, 2, 0), (4, 0, 4)]);
        let mut session = human_game(position, Side::White);

        assert_eq!(session.skip_if_stuck(), Some(Side::White));
        assert_eq!(session.side_to_move(), Side::Black);
        assert_eq!(session.skip_if_stuck(), None);
    }

    #[test]
    fn test_no_skip_once_game_is_over() {
        // W1 reaches row 0; black is left stuck but the game is already won
        let position = board(&[(0, 3, 0), (1, 1, 3)], &[(0, 2, 0)]);
        let mut session = human_game(position, Side::White);

        let turn = session.submit(Move::new("W1".parse().unwrap(), 0, 3)).unwrap();
        assert_eq!(turn.skipped, None);
        assert_eq!(session.outcome(), Some(Outcome::WhiteWins));
        assert!(session.is_over());
    }

    #[test]
    fn test_controllers() {
        let session = GameSession::new(
            Position::default(),
            Side::White,
            Controller::Human,
            Controller::Computer,
        );
        assert_eq!(session.controller(Side::White), Controller::Human);
        assert_eq!(session.controller(Side::Black), Controller::Computer);
    }

    #[test]
    fn test_computer_self_play_finishes() {
        let mut session = GameSession::new(
            Position::default(),
            Side::White,
            Controller::Computer,
            Controller::Computer,
        );
        let mut searcher = Searcher::default();

        while !session.is_over() && session.plies() < 50 {
            let side = session.side_to_move();
            let turn = session.play_computer(&mut searcher, 2);
            assert_eq!(turn.side, side);
            assert!(turn.mov.is_some(), "side to move always has a move");
            assert!(turn.value.is_some());
        }

        assert!(session.is_over(), "no result after {} plies", session.plies());
        assert_eq!(searcher.stats.searches as usize, session.plies());
    }
}
