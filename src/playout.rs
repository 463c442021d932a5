use crate::board::{Board, Player, PlayoutOutcome};
use crate::error::IllegalMoveError;
use rand::Rng;

/// The result of a random playout.
#[derive(Debug, Clone, PartialEq)]
pub struct Playout<M> {
    pub outcome: PlayoutOutcome,
    /// Every `(move, player)` placed during the playout, in order. Empty unless requested.
    pub trace: Vec<(M, Player)>,
}

/// Plays uniformly random moves on a private copy of `board`, starting with `first_player`,
/// until a player connects or no legal move is left.
///
/// `board` itself is never mutated. With `record_trace` the moves are kept for RAVE updates.
pub fn random_playout<T: Board, R: Rng + ?Sized>(
    board: &T,
    first_player: Player,
    rng: &mut R,
    record_trace: bool,
) -> Result<Playout<T::Move>, IllegalMoveError> {
    let mut board = board.clone();
    let mut player = first_player;
    let mut trace = Vec::new();

    loop {
        let possible_moves = board.legal_moves();
        if possible_moves.is_empty() {
            return Ok(Playout {
                outcome: PlayoutOutcome::Draw,
                trace,
            });
        }

        let random_move = possible_moves[rng.random_range(0..possible_moves.len())];
        board.place(random_move, player)?;
        if record_trace {
            trace.push((random_move, player));
        }

        if board.has_connection(player) {
            return Ok(Playout {
                outcome: PlayoutOutcome::Win(player),
                trace,
            });
        }
        player = player.other();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boards::hex::{Cell, HexBoard};
    use crate::random::search_rng;

    #[test]
    fn one_move_from_win_reports_mover() {
        // Only (1, 2) is empty and it completes player one's row.
        let board = HexBoard::from_rows(&["2 2 2", "1 1 .", "2 1 2"]).unwrap();
        assert!(!board.has_connection(Player::One));
        let mut rng = search_rng(Some(1));

        let playout = random_playout(&board, Player::One, &mut rng, true).unwrap();

        assert_eq!(playout.outcome, PlayoutOutcome::Win(Player::One));
        assert_eq!(playout.trace, vec![(Cell::new(1, 2), Player::One)]);
    }

    #[test]
    fn stops_at_the_first_connection() {
        // Player one wins with (1, 2). After (0, 1) instead, player two wins with (1, 2).
        let board = HexBoard::from_rows(&["2 . 2", "1 1 .", "2 1 2"]).unwrap();
        for seed in 0..20 {
            let mut rng = search_rng(Some(seed));
            let playout = random_playout(&board, Player::One, &mut rng, true).unwrap();
            if playout.trace[0].0 == Cell::new(1, 2) {
                assert_eq!(playout.outcome, PlayoutOutcome::Win(Player::One));
                assert_eq!(playout.trace.len(), 1);
            } else {
                assert_eq!(playout.outcome, PlayoutOutcome::Win(Player::Two));
                assert_eq!(
                    playout.trace,
                    vec![(Cell::new(0, 1), Player::One), (Cell::new(1, 2), Player::Two)]
                );
            }
        }
    }

    #[test]
    fn full_board_is_a_draw() {
        let board = HexBoard::from_rows(&["1 2", "2 1"]).unwrap();
        let mut rng = search_rng(Some(3));

        let playout = random_playout(&board, Player::Two, &mut rng, true).unwrap();

        assert_eq!(playout.outcome, PlayoutOutcome::Draw);
        assert_eq!(playout.outcome.winner(), None);
        assert!(playout.trace.is_empty());
    }

    #[test]
    fn does_not_touch_the_source_board() {
        let board = HexBoard::new(4);
        let mut rng = search_rng(Some(9));

        let playout = random_playout(&board, Player::One, &mut rng, false).unwrap();

        assert_eq!(board, HexBoard::new(4));
        assert!(playout.trace.is_empty());
        // Hex cannot end in a draw on an empty board.
        assert!(playout.outcome.winner().is_some());
    }

    #[test]
    fn trace_alternates_players() {
        let board = HexBoard::new(5);
        let mut rng = search_rng(Some(11));

        let playout = random_playout(&board, Player::Two, &mut rng, true).unwrap();

        assert_eq!(playout.trace[0].1, Player::Two);
        for pair in playout.trace.windows(2) {
            assert_eq!(pair[1].1, pair[0].1.other());
            assert_ne!(pair[0].0, pair[1].0);
        }
        let last_mover = playout.trace.last().unwrap().1;
        assert_eq!(playout.outcome, PlayoutOutcome::Win(last_mover));
    }

    #[test]
    fn same_seed_same_playout() {
        let board = HexBoard::new(5);
        let first = random_playout(&board, Player::One, &mut search_rng(Some(5)), true).unwrap();
        let second = random_playout(&board, Player::One, &mut search_rng(Some(5)), true).unwrap();
        assert_eq!(first, second);
    }
}
