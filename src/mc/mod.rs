//! Tabular Monte Carlo control.
//!
//! This module implements on-policy Monte Carlo control with epsilon-greedy
//! exploration over abstracted info-state keys:
//!
//! - [`table`]: Q/N running-mean tables keyed by info state and action label
//! - [`config`]: agent configuration (epsilon, gamma, visit rule, seed)
//! - [`abstraction`]: state-to-key transformers that set the table granularity
//! - [`agent`]: the [`McAgent`] with first-visit / every-visit updates and
//!   JSON checkpointing
//! - [`episode`]: self-play [`EpisodeRunner`] plus the [`Policy`] seam and a
//!   [`RandomPolicy`] baseline

pub mod abstraction;
pub mod agent;
pub mod config;
pub mod episode;
pub mod table;

pub use abstraction::{LeducAbstraction, StateTransformer};
pub use agent::{AgentSnapshot, McAgent, PersistError, Trajectory, Transition};
pub use config::{McConfig, McConfigError, VisitKind};
pub use episode::{EpisodeRunner, Policy, RandomPolicy};
pub use table::{TableExport, ValueTable};
