//! Heuristic evaluation boundary for depth-limited search.
//!
//! When the searcher hits its depth cutoff at a non-terminal state it asks a
//! `Heuristic` for an approximate value. The cutoff is an approximation
//! boundary, not an error condition; heuristics themselves may fail when
//! their declared information model is violated (e.g. a perfect-information
//! heuristic asked to score a state where the opponent's card is undealt).
//!
//! Concrete poker heuristics live with their game, e.g.
//! [`crate::games::leduc::PerfectInfoHeuristic`].

use crate::search::game::Game;

/// Pluggable scoring function invoked at the depth-0 cutoff.
///
/// Sign convention: higher is better for `agent`.
pub trait Heuristic<G: Game> {
    /// Evaluate a non-terminal state from `agent`'s perspective.
    ///
    /// # Errors
    /// Returns a [`HeuristicError`] when the heuristic's information model is
    /// violated. This is a caller contract violation, not a recoverable
    /// condition: callers that cannot guarantee the opponent's cards are
    /// resolvable must route to an imperfect-information heuristic instead.
    fn evaluate(&self, game: &G, state: &G::State, agent: usize) -> Result<f64, HeuristicError>;
}

/// Errors raised by heuristic evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeuristicError {
    /// A card rank was requested for the "not dealt" sentinel.
    ///
    /// Never silently mapped to a placeholder rank: an undealt card reaching
    /// an evaluator means the chance-node bookkeeping upstream is wrong.
    CardNotDealt,

    /// A perfect-information heuristic could not resolve the opponent's
    /// private card.
    OpponentCardUnknown {
        /// The player whose card was unresolved.
        player: usize,
    },
}

impl std::fmt::Display for HeuristicError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeuristicError::CardNotDealt => {
                write!(f, "card rank requested for a card that has not been dealt")
            }
            HeuristicError::OpponentCardUnknown { player } => {
                write!(
                    f,
                    "perfect-information heuristic requires player {}'s private card",
                    player
                )
            }
        }
    }
}

impl std::error::Error for HeuristicError {}
