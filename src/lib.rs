//! Monte Carlo tree search for Hex and other two-player connection games.
//!
//! The search grows an asymmetric tree one node per iteration, scores children with UCT or with
//! UCT blended with RAVE (all-moves-as-first) statistics, estimates new nodes with uniformly random
//! playouts and finally picks the most visited move at the root. A search runs on one thread,
//! stops at iteration boundaries when a time limit is set, and is reproducible under a fixed seed.
//!
//! # Example
//!
//! ```rust
//! use hex_mcts::board::Player;
//! use hex_mcts::boards::hex::HexBoard;
//! use hex_mcts::config::MctsConfig;
//! use hex_mcts::mcts::MonteCarloTreeSearch;
//!
//! // Create a new 5x5 Hex board
//! let board = HexBoard::new(5);
//!
//! // Create and configure a new MCTS search instance using the builder
//! let config = MctsConfig::default().with_iterations(500).with_rave(314.0).with_seed(7);
//! let mut mcts = MonteCarloTreeSearch::builder(board, Player::One)
//!     .with_config(config)
//!     .build()
//!     .unwrap();
//!
//! // Run the search and get the most visited move
//! let result = mcts.run().unwrap();
//!
//! println!("The best move is: {:?}", result.best_move);
//! ```

/// Contains the `Board` trait and the player and outcome types that define the interface for a game.
pub mod board;
/// Contains pre-made implementations of the `Board` trait.
pub mod boards;
/// Time sources for the search budget.
pub mod clock;
pub mod config;
pub mod error;
/// The core module of the library, containing the `MonteCarloTreeSearch` implementation.
pub mod mcts;
/// Contains the `MctsNode` struct, which represents a node in the search tree.
pub mod mcts_node;
/// An agent that wraps the search with a one-move win check.
pub mod player;
/// Random playouts.
pub mod playout;
pub mod policy;
/// The seeded random generator used by the search.
pub mod random;

pub use board::{Board, Player, PlayoutOutcome};
pub use config::{MctsConfig, SelectionPolicy};
pub use error::{IllegalMoveError, MctsError};
pub use mcts::{MonteCarloTreeSearch, SearchResult, Termination, search};
pub use player::MctsPlayer;
