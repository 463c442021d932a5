use crate::board::{Board, Player};
use crate::clock::{Clock, SystemClock};
use crate::config::{MctsConfig, SelectionPolicy};
use crate::error::MctsError;
use crate::mcts_node::MctsNode;
use crate::playout::{Playout, random_playout};
use crate::policy;
use crate::random::{SearchRng, search_rng};
use ego_tree::{NodeId, NodeRef, Tree};
use rand::Rng;
use rustc_hash::FxHashSet;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// The main struct for running the Monte Carlo Tree Search algorithm.
///
/// It holds the search tree, the random number generator, the clock and the configuration for
/// one search. The tree is dropped with the struct; nothing is reused between moves.
pub struct MonteCarloTreeSearch<T: Board, C: Clock = SystemClock> {
    tree: Tree<MctsNode<T>>,
    config: MctsConfig,
    random: SearchRng,
    clock: C,
    iterations: u32,
    next_action: MctsAction<T::Move>,
}

/// A builder for creating instances of `MonteCarloTreeSearch`.
pub struct MonteCarloTreeSearchBuilder<T: Board, C: Clock> {
    board: T,
    player: Player,
    config: MctsConfig,
    clock: C,
}

impl<T: Board> MonteCarloTreeSearchBuilder<T, SystemClock> {
    /// Creates a new builder searching on behalf of `player` from `board`.
    pub fn new(board: T, player: Player) -> Self {
        Self {
            board,
            player,
            config: MctsConfig::default(),
            clock: SystemClock,
        }
    }
}

impl<T: Board, C: Clock> MonteCarloTreeSearchBuilder<T, C> {
    /// Sets the search configuration.
    pub fn with_config(mut self, config: MctsConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the time source used for the time budget.
    pub fn with_clock<K: Clock>(self, clock: K) -> MonteCarloTreeSearchBuilder<T, K> {
        MonteCarloTreeSearchBuilder {
            board: self.board,
            player: self.player,
            config: self.config,
            clock,
        }
    }

    /// Validates the configuration and builds the `MonteCarloTreeSearch` instance.
    pub fn build(self) -> Result<MonteCarloTreeSearch<T, C>, MctsError> {
        self.config.validate()?;
        Ok(MonteCarloTreeSearch::new(
            self.board,
            self.player,
            self.config,
            self.clock,
        ))
    }
}

/// Why a budgeted search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// All configured iterations ran.
    Iterations,
    /// The time limit elapsed first. The tree is still complete up to the last iteration.
    TimeBudget,
}

/// Result of a budgeted search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<M> {
    /// The most visited child of the root.
    pub best_move: M,
    /// Visits of the chosen child.
    pub best_move_visits: u32,
    /// Win rate of the chosen child for the searching player.
    pub best_move_win_rate: f64,
    /// Iterations completed by this run.
    pub iterations: u32,
    pub termination: Termination,
    pub elapsed: Duration,
}

impl<T: Board> MonteCarloTreeSearch<T, SystemClock> {
    /// Returns a new builder for `MonteCarloTreeSearch`.
    pub fn builder(board: T, player: Player) -> MonteCarloTreeSearchBuilder<T, SystemClock> {
        MonteCarloTreeSearchBuilder::new(board, player)
    }
}

impl<T: Board, C: Clock> MonteCarloTreeSearch<T, C> {
    /// Creates a new `MonteCarloTreeSearch` instance. The configuration is not validated.
    ///
    /// It is recommended to use the builder pattern via `MonteCarloTreeSearch::builder()` instead.
    pub fn new(board: T, player: Player, config: MctsConfig, clock: C) -> Self {
        let random = search_rng(config.seed);
        Self {
            tree: Tree::new(MctsNode::root(board, player)),
            config,
            random,
            clock,
            iterations: 0,
            next_action: MctsAction::Selection,
        }
    }

    /// Returns an immutable reference to the underlying search tree.
    pub fn get_tree(&self) -> &Tree<MctsNode<T>> {
        &self.tree
    }

    /// Returns the root of the search tree.
    pub fn root(&self) -> NodeRef<'_, MctsNode<T>> {
        self.tree.root()
    }

    /// Returns the data of the root node.
    pub fn get_root(&self) -> &MctsNode<T> {
        self.tree.root().value()
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Number of completed iterations since this search was created.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Returns the next MCTS action to be performed. Useful for debugging and visualization.
    pub fn get_next_mcts_action(&self) -> &MctsAction<T::Move> {
        &self.next_action
    }

    /// Executes a single step of the MCTS algorithm (Selection, Expansion, Simulation, or Backpropagation).
    ///
    /// On error the step machine restarts at Selection.
    pub fn execute_action(&mut self) -> Result<(), MctsError> {
        let action = std::mem::replace(&mut self.next_action, MctsAction::Selection);
        self.next_action = match action {
            MctsAction::Selection => MctsAction::Expansion {
                leaf: self.select_leaf(),
            },
            MctsAction::Expansion { leaf } => {
                let node = if self.has_legal_moves(leaf)? {
                    self.expand(leaf)?
                } else {
                    leaf
                };
                MctsAction::Simulation { node }
            }
            MctsAction::Simulation { node } => {
                let playout = self.simulate(node)?;
                MctsAction::Backpropagation { node, playout }
            }
            MctsAction::Backpropagation { node, playout } => {
                self.backpropagate(node, &playout)?;
                self.iterations += 1;
                MctsAction::Selection
            }
        };
        Ok(())
    }

    /// Performs one full iteration of the MCTS algorithm (Selection, Expansion, Simulation, Backpropagation).
    ///
    /// A partially executed iteration is finished first.
    pub fn do_iteration(&mut self) -> Result<(), MctsError> {
        self.execute_action()?;
        while !matches!(self.next_action, MctsAction::Selection) {
            self.execute_action()?;
        }
        Ok(())
    }

    /// Runs the MCTS search for a specified number of iterations, ignoring the time limit.
    pub fn iterate_n_times(&mut self, n: u32) -> Result<(), MctsError> {
        for _ in 0..n {
            self.do_iteration()?;
        }
        Ok(())
    }

    /// Runs the configured budget and returns the most visited move.
    ///
    /// The time limit is polled before every iteration but the first, so a result is always
    /// available once the root has a legal move.
    pub fn run(&mut self) -> Result<SearchResult<T::Move>, MctsError> {
        if !self.has_legal_moves(self.tree.root().id())? {
            return Err(MctsError::EmptyRoot);
        }

        debug!(
            player = ?self.get_root().acting_player,
            iterations = self.config.iterations,
            time_limit = ?self.config.time_limit,
            policy = ?self.config.policy,
            "Starting search"
        );

        let start = self.clock.now();
        let mut completed = 0;
        let mut termination = Termination::Iterations;
        while completed < self.config.iterations {
            if completed > 0 && self.time_budget_elapsed(start) {
                termination = Termination::TimeBudget;
                break;
            }
            self.do_iteration()?;
            completed += 1;
        }
        let elapsed = self.clock.now().duration_since(start);

        let best = self.get_most_visited_child().ok_or(MctsError::EmptyRoot)?;
        let best_node = best.value();
        let best_move = best_node.prev_move.ok_or(MctsError::EmptyRoot)?;

        debug!(
            best_move = ?best_move,
            visits = best_node.visits,
            win_rate = best_node.wins_rate(),
            iterations = completed,
            ?termination,
            ?elapsed,
            "Search finished"
        );

        Ok(SearchResult {
            best_move,
            best_move_visits: best_node.visits,
            best_move_win_rate: best_node.wins_rate(),
            iterations: completed,
            termination,
            elapsed,
        })
    }

    /// Returns the most visited move of the root, or `EmptyRoot` if nothing was expanded.
    pub fn best_move(&self) -> Result<T::Move, MctsError> {
        self.get_most_visited_child()
            .and_then(|child| child.value().prev_move)
            .ok_or(MctsError::EmptyRoot)
    }

    /// Returns the child of the root with the most visits, the first one on ties.
    pub fn get_most_visited_child(&self) -> Option<NodeRef<'_, MctsNode<T>>> {
        let mut best_node = None;
        let mut max_visits = 0;
        for child in self.tree.root().children() {
            let visits = child.value().visits;
            if best_node.is_none() || visits > max_visits {
                max_visits = visits;
                best_node = Some(child);
            }
        }
        best_node
    }

    fn time_budget_elapsed(&self, start: Instant) -> bool {
        match self.config.time_limit {
            Some(limit) => self.clock.now().duration_since(start) > limit,
            None => false,
        }
    }

    fn node(&self, id: NodeId) -> Result<NodeRef<'_, MctsNode<T>>, MctsError> {
        self.tree.get(id).ok_or(MctsError::DetachedNode(id))
    }

    fn has_legal_moves(&self, id: NodeId) -> Result<bool, MctsError> {
        Ok(!self.node(id)?.value().board.legal_moves().is_empty())
    }

    /// Descends from the root while the current node has children and is fully expanded.
    fn select_leaf(&self) -> NodeId {
        let mut node = self.tree.root();
        while node.has_children() && node.value().is_fully_expanded(node.children().count()) {
            match policy::best_child(node, &self.config) {
                Some(child) => node = child,
                None => break,
            }
        }
        node.id()
    }

    /// Adds one child for a uniformly chosen untried move and returns its id.
    pub fn expand(&mut self, node_id: NodeId) -> Result<NodeId, MctsError> {
        let node = self
            .tree
            .get(node_id)
            .ok_or(MctsError::DetachedNode(node_id))?;
        let tried: FxHashSet<T::Move> = node
            .children()
            .filter_map(|child| child.value().prev_move)
            .collect();
        let untried: Vec<T::Move> = node
            .value()
            .board
            .legal_moves()
            .into_iter()
            .filter(|b_move| !tried.contains(b_move))
            .collect();
        if untried.is_empty() {
            return Err(MctsError::NothingToExpand);
        }

        // Children of the root move for the searching player; below that, turns alternate.
        let data = node.value();
        let player = if node.parent().is_none() {
            data.acting_player
        } else {
            data.acting_player.other()
        };
        let b_move = untried[self.random.random_range(0..untried.len())];
        let mut board = (*data.board).clone();
        board.place(b_move, player)?;

        trace!(?b_move, ?player, untried = untried.len(), "Expanding node");

        let mut parent = self
            .tree
            .get_mut(node_id)
            .ok_or(MctsError::DetachedNode(node_id))?;
        Ok(parent.append(MctsNode::child(board, b_move, player)).id())
    }

    /// Simulates a random playout from a node, starting with the opponent of its acting player.
    pub fn simulate(&mut self, node_id: NodeId) -> Result<Playout<T::Move>, MctsError> {
        let node = self
            .tree
            .get(node_id)
            .ok_or(MctsError::DetachedNode(node_id))?
            .value();
        let record_trace = self.config.policy == SelectionPolicy::Rave;
        Ok(random_playout(
            &*node.board,
            node.acting_player.other(),
            &mut self.random,
            record_trace,
        )?)
    }

    /// Propagates a playout result from `node_id` up to the root, updating node statistics
    /// and, for RAVE, the all-moves-as-first tables.
    /// Returns the path of nodes that were updated.
    pub fn backpropagate(
        &mut self,
        node_id: NodeId,
        playout: &Playout<T::Move>,
    ) -> Result<Vec<NodeId>, MctsError> {
        let branch: Vec<NodeId> = {
            let node = self.node(node_id)?;
            std::iter::once(node_id)
                .chain(node.ancestors().map(|ancestor| ancestor.id()))
                .collect()
        };

        for &id in &branch {
            let mut tree_node = self.tree.get_mut(id).ok_or(MctsError::DetachedNode(id))?;
            let mcts_node = tree_node.value();
            let is_win = playout.outcome.is_win_for(mcts_node.acting_player);
            mcts_node.visits += 1;
            if is_win {
                mcts_node.wins += 1;
            }
            for &(b_move, player) in &playout.trace {
                if player == mcts_node.acting_player {
                    mcts_node.rave.record(b_move, is_win);
                }
            }
        }

        Ok(branch)
    }
}

/// Runs a search on a copy of `board` for `player` and returns the chosen move.
pub fn search<T: Board>(
    board: &T,
    player: Player,
    config: &MctsConfig,
) -> Result<T::Move, MctsError> {
    let mut mcts = MonteCarloTreeSearch::builder(board.clone(), player)
        .with_config(config.clone())
        .build()?;
    Ok(mcts.run()?.best_move)
}

/// Represents the four main stages of the MCTS algorithm.
///
/// This enum is used to manage the state of the search process.
#[derive(Debug, PartialEq, Clone)]
pub enum MctsAction<M> {
    /// **Selection**: Start from the root and descend through fully expanded nodes.
    Selection,
    /// **Expansion**: Add one child to `leaf`, unless it has no legal moves.
    Expansion {
        /// The node selection stopped at.
        leaf: NodeId,
    },
    /// **Simulation**: Run a random playout from `node`.
    Simulation {
        /// The new child, or the terminal leaf.
        node: NodeId,
    },
    /// **Backpropagation**: Update the statistics on the path from `node` to the root.
    Backpropagation {
        node: NodeId,
        /// The result of the simulation.
        playout: Playout<M>,
    },
}

impl<M> MctsAction<M> {
    /// Returns the name of the current MCTS action.
    pub fn get_name(&self) -> &'static str {
        match self {
            MctsAction::Selection => "Selection",
            MctsAction::Expansion { .. } => "Expansion",
            MctsAction::Simulation { .. } => "Simulation",
            MctsAction::Backpropagation { .. } => "Backpropagation",
        }
    }
}
