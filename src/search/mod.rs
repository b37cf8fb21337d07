//! Expectiminimax search module.
//!
//! This module provides a generic depth-limited expectiminimax search for
//! two-player zero-sum games with chance events.
//!
//! # Overview
//!
//! Expectiminimax extends minimax with expectation-weighted averaging at
//! chance nodes:
//!
//! 1. Terminal states return exact payoffs
//! 2. The agent's decision nodes maximize, the opponent's minimize
//! 3. Chance nodes average child values weighted by outcome probability
//! 4. At the depth cutoff a pluggable [`Heuristic`] approximates the subtree
//!
//! Two chance-node variants are supported through [`SearchConfig`]:
//! full-width exact expectation, and Monte Carlo sampling of outcomes for
//! games where the chance branching factor makes exact summation infeasible
//! (full-deck deals).
//!
//! # Usage
//!
//! 1. Implement the [`Game`] trait for your game
//! 2. Implement (or pick) a [`Heuristic`] for the depth cutoff
//! 3. Create a [`Searcher`] and call [`Searcher::best_action`]
//!
//! ```ignore
//! use poker_search_poc::search::{Searcher, SearchConfig};
//!
//! let mut searcher = Searcher::new(game, SearchConfig::default().with_seed(42));
//! let (value, action) = searcher.best_action(&state, 4, 0, &heuristic)?;
//! println!("best: {:?} worth {:.3}", action, value);
//! ```

pub mod config;
pub mod engine;
pub mod game;
pub mod heuristics;

// Re-export main types for convenient access
pub use config::{SearchConfig, SearchConfigError};
pub use engine::{SearchError, Searcher};
pub use game::{Action, Game};
pub use heuristics::{Heuristic, HeuristicError};
