use thiserror::Error;

/// Returned by a [`Board`](crate::board::Board) that refuses a placement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("illegal move {mv}: {reason}")]
pub struct IllegalMoveError {
    /// Debug rendering of the rejected move.
    pub mv: String,
    /// Why the board refused it.
    pub reason: String,
}

impl IllegalMoveError {
    pub fn new(mv: impl std::fmt::Debug, reason: impl Into<String>) -> Self {
        Self {
            mv: format!("{mv:?}"),
            reason: reason.into(),
        }
    }
}

/// Errors that can occur during a search.
#[derive(Debug, Error)]
pub enum MctsError {
    #[error(transparent)]
    IllegalMove(#[from] IllegalMoveError),

    #[error("No legal moves available at the root")]
    EmptyRoot,

    #[error("Node has no untried moves left to expand")]
    NothingToExpand,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Node {0:?} does not belong to the search tree")]
    DetachedNode(ego_tree::NodeId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn illegal_move_renders_move_and_reason() {
        let err = IllegalMoveError::new((1, 2), "cell is occupied");
        assert_eq!(err.to_string(), "illegal move (1, 2): cell is occupied");

        let wrapped: MctsError = err.clone().into();
        assert!(matches!(wrapped, MctsError::IllegalMove(ref inner) if *inner == err));
        assert_eq!(wrapped.to_string(), err.to_string());
    }
}
