//! # Poker Search POC
//!
//! Expectiminimax search and tabular Monte Carlo control for two-player
//! zero-sum poker games with chance events.
//!
//! ## Features
//!
//! - **Generic Search Engine**: Depth-limited expectiminimax over any game
//!   implementing the `Game` trait, with exact or sampled chance nodes
//! - **Heuristic Seam**: Pluggable leaf evaluators for depth cutoffs
//! - **Monte Carlo Control**: First-visit and every-visit tabular learners
//!   with epsilon-greedy exploration
//! - **State Abstraction**: Configurable info-state key transformers
//! - **Checkpointing**: Save and restore trained agents as JSON
//!
//! ## Quick Start
//!
//! ```ignore
//! use poker_search_poc::games::leduc::{LeducGame, PerfectInfoHeuristic};
//! use poker_search_poc::search::{Searcher, SearchConfig};
//!
//! // 1. Build a game and a searcher
//! let game = LeducGame::new();
//! let mut searcher = Searcher::new(game.clone(), SearchConfig::new());
//!
//! // 2. Search from a dealt state
//! let state = game.deal(4, 0);
//! let (value, action) =
//!     searcher.best_action(&state, 6, 0, &PerfectInfoHeuristic::default())?;
//! ```
//!
//! ## Modules
//!
//! - [`search`]: Expectiminimax engine, config, and the `Game`/`Heuristic` traits
//! - [`mc`]: Monte Carlo control agent, tables, abstractions, episode runner
//! - [`games`]: Game implementations (Leduc hold'em)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                 Expectiminimax Searcher (Generic)               │
//! │  - Max/min decision nodes    - Exact chance expansion           │
//! │  - Heuristic depth cutoffs   - Sampled chance variant           │
//! └─────────────────────────────────────────────────────────────────┘
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                 Monte Carlo Control (Tabular)                   │
//! │  - Epsilon-greedy stepping   - First/every-visit updates        │
//! │  - Info-state abstraction    - Self-play episode runner         │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               │ implements Game trait
//!                               ▼
//!                         ┌───────────┐
//!                         │   Leduc   │
//!                         │  Hold'em  │
//!                         └───────────┘
//! ```

#![warn(missing_docs)]

/// Expectiminimax search module.
///
/// Contains the generic search engine and the `Game`/`Heuristic` traits.
pub mod search;

/// Monte Carlo control module.
///
/// Contains the tabular learner, its tables, abstractions, and episode runner.
pub mod mc;

/// Game implementations module.
///
/// Contains Leduc hold'em and its heuristic evaluators.
pub mod games;

// Re-export commonly used types at crate root for convenience
pub use mc::{EpisodeRunner, LeducAbstraction, McAgent, McConfig, VisitKind};
pub use search::{Action, Game, Heuristic, SearchConfig, Searcher};
