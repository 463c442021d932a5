use crate::error::IllegalMoveError;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// The game-state interface the search consumes.
///
/// To use the MCTS algorithm with a custom connection game, this trait must be implemented.
/// `Clone` must produce a deep, independent copy: the search gives every tree node its own
/// board and relies on mutations of one copy never reaching another.
pub trait Board: Clone {
    /// The type representing a move, usually a cell coordinate.
    type Move: Copy + Eq + Hash + Debug;

    /// Returns every empty, playable cell.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Places a stone for `player`. Fails if the cell is occupied or off the board.
    fn place(&mut self, b_move: Self::Move, player: Player) -> Result<(), IllegalMoveError>;

    /// Returns `true` iff `player` currently has a winning connected path.
    fn has_connection(&self, player: Player) -> bool;

    /// Side length of the board.
    fn size(&self) -> usize;
}

/// One of the two players. The discriminants match the conventional ids 1 and 2.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Serialize, Deserialize)]
pub enum Player {
    One = 1,
    Two = 2,
}

impl Player {
    /// Returns the opponent (`3 - id`).
    pub const fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Returns the numeric id, 1 or 2.
    pub const fn id(self) -> u8 {
        self as u8
    }
}

/// The result of a playout.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum PlayoutOutcome {
    /// The player completed a connection.
    Win(Player),
    /// The board ran out of legal moves with no winner.
    Draw,
}

impl PlayoutOutcome {
    /// Returns the winner, or `None` for a draw.
    pub fn winner(self) -> Option<Player> {
        match self {
            PlayoutOutcome::Win(player) => Some(player),
            PlayoutOutcome::Draw => None,
        }
    }

    /// Returns `true` if this outcome counts as a win for `player`.
    pub fn is_win_for(self, player: Player) -> bool {
        self.winner() == Some(player)
    }
}
