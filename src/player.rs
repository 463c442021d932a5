use crate::board::{Board, Player};
use crate::config::MctsConfig;
use crate::error::MctsError;
use crate::mcts::{MonteCarloTreeSearch, SearchResult};
use tracing::{debug, trace};

/// How a [`Decision`] was reached.
#[derive(Debug, Clone, PartialEq)]
pub enum DecisionSource<M> {
    /// The move connects immediately; no search iteration ran.
    ImmediateWin,
    /// The move came out of a tree search.
    Search(SearchResult<M>),
}

/// A move chosen by [`MctsPlayer`].
#[derive(Debug, Clone, PartialEq)]
pub struct Decision<M> {
    pub best_move: M,
    pub source: DecisionSource<M>,
}

impl<M> Decision<M> {
    /// Number of search iterations spent on this decision.
    pub fn iterations(&self) -> u32 {
        match &self.source {
            DecisionSource::ImmediateWin => 0,
            DecisionSource::Search(result) => result.iterations,
        }
    }
}

/// Returns the first legal move that connects `player` at once.
pub fn find_immediate_win<T: Board>(
    board: &T,
    player: Player,
) -> Result<Option<T::Move>, MctsError> {
    for b_move in board.legal_moves() {
        let mut board_copy = board.clone();
        board_copy.place(b_move, player)?;
        if board_copy.has_connection(player) {
            return Ok(Some(b_move));
        }
    }
    Ok(None)
}

/// An agent that plays one side of a game with Monte Carlo tree search.
///
/// Before searching it takes any move that wins on the spot.
#[derive(Debug, Clone)]
pub struct MctsPlayer {
    pub player: Player,
    pub config: MctsConfig,
}

impl MctsPlayer {
    pub fn new(player: Player, config: MctsConfig) -> Self {
        Self { player, config }
    }

    /// Chooses a move and reports how it was found.
    pub fn decide<T: Board>(&self, board: &T) -> Result<Decision<T::Move>, MctsError> {
        if let Some(b_move) = find_immediate_win(board, self.player)? {
            trace!(?b_move, player = ?self.player, "Taking immediate win");
            return Ok(Decision {
                best_move: b_move,
                source: DecisionSource::ImmediateWin,
            });
        }

        let iterations = self.config.iterations_for(board.size());
        if iterations != self.config.iterations {
            debug!(
                size = board.size(),
                iterations, "Capping iterations for large board"
            );
        }
        let config = self.config.clone().with_iterations(iterations);
        let mut mcts = MonteCarloTreeSearch::builder(board.clone(), self.player)
            .with_config(config)
            .build()?;
        let result = mcts.run()?;
        Ok(Decision {
            best_move: result.best_move,
            source: DecisionSource::Search(result),
        })
    }

    /// Chooses a move.
    pub fn play<T: Board>(&self, board: &T) -> Result<T::Move, MctsError> {
        Ok(self.decide(board)?.best_move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boards::hex::{Cell, HexBoard};
    use crate::config::LargeBoardCap;
    use crate::mcts::Termination;

    #[test]
    fn immediate_win_skips_search() {
        // arrange
        let board = HexBoard::from_rows(&[". . . .", "1 1 1 .", ". 2 2 .", "2 . . ."]).unwrap();
        let agent = MctsPlayer::new(Player::One, MctsConfig::for_testing());

        // act
        let decision = agent.decide(&board).unwrap();

        // assert
        assert_eq!(decision.source, DecisionSource::ImmediateWin);
        assert_eq!(decision.iterations(), 0);
        let mut check = board.clone();
        check.place(decision.best_move, Player::One).unwrap();
        assert!(check.has_connection(Player::One));
    }

    #[test]
    fn finds_the_first_winning_cell() {
        let board = HexBoard::from_rows(&[". . .", "1 1 .", ". . ."]).unwrap();
        // (0, 2) and (1, 2) both connect; row-major order finds (0, 2) first.
        assert_eq!(
            find_immediate_win(&board, Player::One).unwrap(),
            Some(Cell::new(0, 2))
        );
        assert_eq!(find_immediate_win(&board, Player::Two).unwrap(), None);
    }

    #[test]
    fn searches_when_no_immediate_win() {
        let agent = MctsPlayer::new(Player::Two, MctsConfig::for_testing().with_iterations(60));

        let decision = agent.decide(&HexBoard::new(3)).unwrap();

        match decision.source {
            DecisionSource::Search(ref result) => {
                assert_eq!(result.iterations, 60);
                assert_eq!(result.termination, Termination::Iterations);
                assert_eq!(result.best_move, decision.best_move);
            }
            DecisionSource::ImmediateWin => panic!("empty board has no immediate win"),
        }
    }

    #[test]
    fn large_boards_use_capped_iterations() {
        let config = MctsConfig::for_testing()
            .with_iterations(80)
            .with_large_board(Some(LargeBoardCap {
                min_size: 4,
                iterations: 12,
            }));
        let agent = MctsPlayer::new(Player::One, config);

        assert_eq!(agent.decide(&HexBoard::new(4)).unwrap().iterations(), 12);
        assert_eq!(agent.decide(&HexBoard::new(3)).unwrap().iterations(), 80);
    }

    #[test]
    fn full_board_reports_empty_root() {
        let board = HexBoard::from_rows(&["1 2", "2 1"]).unwrap();
        let agent = MctsPlayer::new(Player::Two, MctsConfig::for_testing());
        assert!(matches!(agent.play(&board), Err(MctsError::EmptyRoot)));
    }

    #[test]
    fn play_is_reproducible_with_a_seed() {
        let agent = MctsPlayer::new(Player::One, MctsConfig::for_testing().with_seed(99));
        let board = HexBoard::new(4);
        assert_eq!(agent.play(&board).unwrap(), agent.play(&board).unwrap());
    }
}
