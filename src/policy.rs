//! Child scoring for the selection phase.
//!
//! UCT: `w / n + C * sqrt(ln(N) / n)`.
//!
//! RAVE blends the exploitation term with the parent's all-moves-as-first value for the child's
//! move, weighted by `beta = sqrt(K / (K + 3n))`:
//! `(1 - beta) * w / n + beta * rave + C * sqrt(ln(N) / n)`.

use crate::board::Board;
use crate::config::{MctsConfig, SelectionPolicy};
use crate::mcts_node::MctsNode;
use ego_tree::NodeRef;

/// Calculates the UCT exploitation and exploration terms for a child.
///
/// An unvisited child scores infinitely high on exploration.
pub fn uct_terms(parent_visits: u32, child_wins: u32, child_visits: u32, c: f64) -> (f64, f64) {
    if child_visits == 0 {
        return (0.0, f64::INFINITY);
    }
    let n = f64::from(child_visits);
    let exploitation = f64::from(child_wins) / n;
    let exploration = c * (f64::from(parent_visits).ln() / n).sqrt();
    (exploitation, exploration)
}

/// Calculates the UCT value of a child.
pub fn uct_value(parent_visits: u32, child_wins: u32, child_visits: u32, c: f64) -> f64 {
    let (exploitation, exploration) = uct_terms(parent_visits, child_wins, child_visits, c);
    exploitation + exploration
}

/// Weight of the RAVE value for a child with `child_visits` visits.
pub fn rave_beta(rave_constant: f64, child_visits: u32) -> f64 {
    (rave_constant / (rave_constant + 3.0 * f64::from(child_visits))).sqrt()
}

/// Scores `child` as seen from `parent` under the configured policy.
pub fn score<T: Board>(parent: &MctsNode<T>, child: &MctsNode<T>, config: &MctsConfig) -> f64 {
    let (exploitation, exploration) = uct_terms(
        parent.visits,
        child.wins,
        child.visits,
        config.exploration_constant,
    );
    match config.policy {
        SelectionPolicy::Uct => exploitation + exploration,
        SelectionPolicy::Rave => {
            let rave_value = child
                .prev_move
                .map_or(0.0, |b_move| parent.rave.value(&b_move));
            let beta = rave_beta(config.rave_constant, child.visits);
            (1.0 - beta) * exploitation + beta * rave_value + exploration
        }
    }
}

/// Returns the highest scoring child of `node`, the first one on ties.
pub fn best_child<'a, T: Board>(
    node: NodeRef<'a, MctsNode<T>>,
    config: &MctsConfig,
) -> Option<NodeRef<'a, MctsNode<T>>> {
    let mut best: Option<NodeRef<'a, MctsNode<T>>> = None;
    let mut max_score = f64::NEG_INFINITY;
    for child in node.children() {
        let current = score(node.value(), child.value(), config);
        if best.is_none() || current > max_score {
            max_score = current;
            best = Some(child);
        }
    }
    best
}
