extern crate hex_mcts;

use hex_mcts::board::{Board, Player};
use hex_mcts::boards::hex::HexBoard;
use hex_mcts::config::MctsConfig;
use hex_mcts::player::{DecisionSource, MctsPlayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Plain UCT against RAVE on a 5x5 board
    let mut board = HexBoard::new(5);
    let uct = MctsPlayer::new(Player::One, MctsConfig::default().with_iterations(800).with_seed(1));
    let rave = MctsPlayer::new(
        Player::Two,
        MctsConfig::default().with_iterations(800).with_rave(314.0).with_seed(2),
    );

    let mut to_move = Player::One;
    let winner = loop {
        let agent = match to_move {
            Player::One => &uct,
            Player::Two => &rave,
        };
        let decision = match agent.decide(&board) {
            Ok(decision) => decision,
            Err(err) => {
                eprintln!("{:?} could not move: {}", to_move, err);
                return;
            }
        };
        match &decision.source {
            DecisionSource::ImmediateWin => {
                info!(player = ?to_move, b_move = ?decision.best_move, "Immediate win")
            }
            DecisionSource::Search(result) => info!(
                player = ?to_move,
                b_move = ?decision.best_move,
                visits = result.best_move_visits,
                win_rate = %format!("{:.2}%", result.best_move_win_rate * 100.0),
                "Searched move"
            ),
        }

        if let Err(err) = board.place(decision.best_move, to_move) {
            eprintln!("{}", err);
            return;
        }
        if board.has_connection(to_move) {
            break to_move;
        }
        to_move = to_move.other();
    };

    println!("{}", board);
    println!("The winner is: {:?}", winner);
}
