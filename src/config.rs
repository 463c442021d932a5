//! Search configuration.

use crate::error::MctsError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which score the selection phase uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectionPolicy {
    /// Plain UCT.
    #[default]
    Uct,
    /// UCT blended with all-moves-as-first statistics.
    Rave,
}

/// Iteration cap the agent applies on large boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LargeBoardCap {
    /// Boards with at least this side length are capped.
    pub min_size: usize,
    /// Iterations used instead of [`MctsConfig::iterations`].
    pub iterations: u32,
}

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MctsConfig {
    /// Maximum number of select/expand/simulate/backpropagate cycles.
    pub iterations: u32,

    /// Optional wall-clock budget, polled once per iteration.
    pub time_limit: Option<Duration>,

    /// UCT exploration constant `C`.
    pub exploration_constant: f64,

    pub policy: SelectionPolicy,

    /// RAVE constant `K`. Larger values keep RAVE statistics dominant for longer.
    pub rave_constant: f64,

    /// RNG seed. `None` seeds from the operating system.
    pub seed: Option<u64>,

    pub large_board: Option<LargeBoardCap>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: 5000,
            time_limit: None,
            exploration_constant: 1.4,
            policy: SelectionPolicy::Uct,
            rave_constant: 314.0,
            seed: None,
            large_board: Some(LargeBoardCap {
                min_size: 10,
                iterations: 2500,
            }),
        }
    }
}

impl MctsConfig {
    /// Create a small, seeded config for testing.
    pub fn for_testing() -> Self {
        Self {
            iterations: 200,
            seed: Some(42),
            large_board: None,
            ..Self::default()
        }
    }

    /// Builder pattern: set the iteration count.
    pub fn with_iterations(mut self, n: u32) -> Self {
        self.iterations = n;
        self
    }

    /// Builder pattern: set the wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Builder pattern: set the exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Builder pattern: switch to RAVE selection with constant `k`.
    pub fn with_rave(mut self, k: f64) -> Self {
        self.policy = SelectionPolicy::Rave;
        self.rave_constant = k;
        self
    }

    /// Builder pattern: set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder pattern: set or clear the large-board cap.
    pub fn with_large_board(mut self, cap: Option<LargeBoardCap>) -> Self {
        self.large_board = cap;
        self
    }

    /// Iterations to run on a board with the given side length.
    pub fn iterations_for(&self, board_size: usize) -> u32 {
        match self.large_board {
            Some(cap) if board_size >= cap.min_size => cap.iterations,
            _ => self.iterations,
        }
    }

    /// Checks that the configuration describes a runnable search.
    pub fn validate(&self) -> Result<(), MctsError> {
        if self.iterations == 0 {
            return Err(MctsError::InvalidConfig(
                "iterations must be positive".to_string(),
            ));
        }
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(MctsError::InvalidConfig(format!(
                "exploration constant must be finite and non-negative, got {}",
                self.exploration_constant
            )));
        }
        if self.policy == SelectionPolicy::Rave
            && (!self.rave_constant.is_finite() || self.rave_constant <= 0.0)
        {
            return Err(MctsError::InvalidConfig(format!(
                "RAVE constant must be finite and positive, got {}",
                self.rave_constant
            )));
        }
        if self.large_board.is_some_and(|cap| cap.iterations == 0) {
            return Err(MctsError::InvalidConfig(
                "large-board iterations must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MctsConfig::default();
        assert_eq!(config.iterations, 5000);
        assert!((config.exploration_constant - 1.4).abs() < 1e-12);
        assert!((config.rave_constant - 314.0).abs() < 1e-12);
        assert_eq!(config.policy, SelectionPolicy::Uct);
        assert!(config.time_limit.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = MctsConfig::default()
            .with_iterations(100)
            .with_exploration(0.7)
            .with_rave(50.0)
            .with_seed(7)
            .with_time_limit(Duration::from_millis(250));

        assert_eq!(config.iterations, 100);
        assert_eq!(config.exploration_constant, 0.7);
        assert_eq!(config.policy, SelectionPolicy::Rave);
        assert_eq!(config.rave_constant, 50.0);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.time_limit, Some(Duration::from_millis(250)));
    }

    #[test]
    fn large_boards_use_capped_iterations() {
        let config = MctsConfig::default();
        assert_eq!(config.iterations_for(7), 5000);
        assert_eq!(config.iterations_for(10), 2500);
        assert_eq!(config.iterations_for(11), 2500);

        let uncapped = config.with_large_board(None);
        assert_eq!(uncapped.iterations_for(11), 5000);
    }

    #[test]
    fn validate_rejects_unrunnable_configs() {
        let zero = MctsConfig::default().with_iterations(0);
        assert!(matches!(zero.validate(), Err(MctsError::InvalidConfig(_))));

        let negative = MctsConfig::default().with_exploration(-1.0);
        assert!(matches!(negative.validate(), Err(MctsError::InvalidConfig(_))));

        let nan = MctsConfig::default().with_exploration(f64::NAN);
        assert!(matches!(nan.validate(), Err(MctsError::InvalidConfig(_))));

        let rave = MctsConfig::default().with_rave(0.0);
        assert!(matches!(rave.validate(), Err(MctsError::InvalidConfig(_))));

        // The RAVE constant is ignored by plain UCT.
        let mut uct = MctsConfig::default();
        uct.rave_constant = 0.0;
        assert!(uct.validate().is_ok());
    }

    #[test]
    fn test_serialization() {
        let config = MctsConfig::for_testing()
            .with_rave(100.0)
            .with_time_limit(Duration::from_secs(2));
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: MctsConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
