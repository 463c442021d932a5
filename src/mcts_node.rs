use crate::board::{Board, Player};
use rustc_hash::FxHashMap;

/// All-moves-as-first statistics gathered at one node.
///
/// `visits[m]` counts playouts through the node in which the node's acting player played `m`;
/// `wins[m]` counts those that were also wins for that player.
#[derive(Debug, Clone)]
pub struct RaveStats<M> {
    pub visits: FxHashMap<M, u32>,
    pub wins: FxHashMap<M, u32>,
}

impl<M> Default for RaveStats<M> {
    fn default() -> Self {
        Self {
            visits: FxHashMap::default(),
            wins: FxHashMap::default(),
        }
    }
}

impl<M: Copy + Eq + std::hash::Hash> RaveStats<M> {
    /// Records one appearance of `b_move` in a playout.
    pub fn record(&mut self, b_move: M, won: bool) {
        *self.visits.entry(b_move).or_insert(0) += 1;
        if won {
            *self.wins.entry(b_move).or_insert(0) += 1;
        }
    }

    /// Returns `wins / visits` for the move, or 0 if it was never seen.
    pub fn value(&self, b_move: &M) -> f64 {
        match self.visits.get(b_move) {
            Some(&visits) if visits > 0 => {
                let wins = self.wins.get(b_move).copied().unwrap_or(0);
                f64::from(wins) / f64::from(visits)
            }
            _ => 0.0,
        }
    }

    pub fn visits_of(&self, b_move: &M) -> u32 {
        self.visits.get(b_move).copied().unwrap_or(0)
    }

    pub fn wins_of(&self, b_move: &M) -> u32 {
        self.wins.get(b_move).copied().unwrap_or(0)
    }
}

/// Represents a single node in the Monte Carlo search tree.
///
/// Nodes live in an [`ego_tree::Tree`] arena; the parent is reached through the arena, so a
/// node never owns its parent.
#[derive(Debug, Clone)]
pub struct MctsNode<T: Board> {
    /// The game state that this node represents, independent of every other node's board.
    pub board: Box<T>,
    /// The move that led to this node's state from its parent. `None` for the root node.
    pub prev_move: Option<T::Move>,
    /// The player who made `prev_move`. At the root, the player the search runs for.
    pub acting_player: Player,
    /// The number of playouts that passed through this node.
    pub visits: u32,
    /// The number of those playouts won by `acting_player`.
    pub wins: u32,
    pub rave: RaveStats<T::Move>,
}

impl<T: Board> MctsNode<T> {
    /// Creates a root node for `player`.
    pub fn root(board: T, player: Player) -> Self {
        MctsNode {
            board: Box::new(board),
            prev_move: None,
            acting_player: player,
            visits: 0,
            wins: 0,
            rave: RaveStats::default(),
        }
    }

    /// Creates a node reached by `player` playing `b_move`. `board` must already contain the move.
    pub fn child(board: T, b_move: T::Move, player: Player) -> Self {
        MctsNode {
            prev_move: Some(b_move),
            ..MctsNode::root(board, player)
        }
    }

    /// Calculates the win rate of this node.
    pub fn wins_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.visits)
        }
    }

    /// Returns `true` iff `children` covers every legal move of this node's board.
    ///
    /// Recomputed from the board on every call.
    pub fn is_fully_expanded(&self, children: usize) -> bool {
        children == self.board.legal_moves().len()
    }
}
