//! Hand-strength heuristics for Leduc hold'em.
//!
//! All variants share one scoring policy: preflop a hand is worth its raw
//! rank; postflop a fixed pair bonus is added when the private rank matches
//! the public card. No kicker or suit logic; adequate for rank-ordered
//! 6-card Leduc.
//!
//! Two information models are provided:
//!
//! - [`PerfectInfoHeuristic`] assumes the opponent's private card is known.
//!   Valid for self-play training and offline analysis; not a legal in-game
//!   heuristic for an actual agent. Fails loudly when the opponent's card is
//!   not resolvable.
//! - [`ImperfectInfoHeuristic`] averages the opponent's score uniformly over
//!   every card consistent with what the agent can see. Never requires
//!   hidden information.

use crate::games::leduc::{rank_of, LeducGame, LeducState, DECK_SIZE};
use crate::search::heuristics::{Heuristic, HeuristicError};

/// Default pair bonus added to a rank when it matches the public card.
///
/// Tunable: large enough that any pair outranks any unpaired hand
/// (ranks are 0-2).
pub const DEFAULT_PAIR_BONUS: f64 = 10.0;

/// Rank of a possibly-undealt card.
///
/// # Errors
/// Returns [`HeuristicError::CardNotDealt`] for `None`. Never substitutes a
/// placeholder rank: an undealt card reaching an evaluator means the
/// chance-node bookkeeping upstream is wrong, and masking that would hide
/// the bug.
pub fn card_rank(card: Option<u8>) -> Result<u8, HeuristicError> {
    card.map(rank_of).ok_or(HeuristicError::CardNotDealt)
}

/// Score one private card against the public card: rank plus pair bonus.
fn hand_score(card: Option<u8>, public: Option<u8>, pair_bonus: f64) -> Result<f64, HeuristicError> {
    let rank = card_rank(card)?;
    let paired = matches!(public, Some(p) if rank_of(p) == rank);
    Ok(f64::from(rank) + if paired { pair_bonus } else { 0.0 })
}

/// Perfect-information heuristic: agent's score minus the opponent's.
///
/// Requires both private cards to be dealt. Asking it to evaluate a state
/// where the opponent's card is unresolved is a caller contract violation
/// and fails with [`HeuristicError::OpponentCardUnknown`]; callers that
/// cannot guarantee resolution must use [`ImperfectInfoHeuristic`].
#[derive(Debug, Clone, Copy)]
pub struct PerfectInfoHeuristic {
    /// Bonus added to a rank that pairs the public card.
    pub pair_bonus: f64,
}

impl Default for PerfectInfoHeuristic {
    fn default() -> Self {
        Self {
            pair_bonus: DEFAULT_PAIR_BONUS,
        }
    }
}

impl Heuristic<LeducGame> for PerfectInfoHeuristic {
    fn evaluate(
        &self,
        _game: &LeducGame,
        state: &LeducState,
        agent: usize,
    ) -> Result<f64, HeuristicError> {
        let opponent = 1 - agent;
        let my_score = hand_score(state.cards[agent], state.public, self.pair_bonus)?;

        if state.cards[opponent].is_none() {
            return Err(HeuristicError::OpponentCardUnknown { player: opponent });
        }
        let opp_score = hand_score(state.cards[opponent], state.public, self.pair_bonus)?;

        Ok(my_score - opp_score)
    }
}

/// Imperfect-information heuristic: agent's score minus the expected
/// opponent score over the unseen-card pool.
///
/// The pool is every deck card except the agent's own private card and the
/// public card (if revealed); the opponent's actual card is deliberately not
/// excluded, since the agent cannot see it.
#[derive(Debug, Clone, Copy)]
pub struct ImperfectInfoHeuristic {
    /// Bonus added to a rank that pairs the public card.
    pub pair_bonus: f64,
}

impl Default for ImperfectInfoHeuristic {
    fn default() -> Self {
        Self {
            pair_bonus: DEFAULT_PAIR_BONUS,
        }
    }
}

impl Heuristic<LeducGame> for ImperfectInfoHeuristic {
    fn evaluate(
        &self,
        _game: &LeducGame,
        state: &LeducState,
        agent: usize,
    ) -> Result<f64, HeuristicError> {
        let my_card = state.cards[agent];
        let my_score = hand_score(my_card, state.public, self.pair_bonus)?;

        let unseen: Vec<u8> = (0..DECK_SIZE)
            .filter(|&c| Some(c) != my_card && Some(c) != state.public)
            .collect();
        debug_assert!(!unseen.is_empty());

        let mut total = 0.0;
        for card in &unseen {
            total += hand_score(Some(*card), state.public, self.pair_bonus)?;
        }
        let expected_opp = total / unseen.len() as f64;

        Ok(my_score - expected_opp)
    }
}

/// Perfect-information score weighted by the agent's pot contribution.
///
/// Scales the plain perfect-info difference by the chips the agent has at
/// stake, so the same edge matters more in a bigger pot. Shares the
/// perfect-information contract, including its failure mode.
#[derive(Debug, Clone, Copy)]
pub struct PotWeightedHeuristic {
    /// Bonus added to a rank that pairs the public card.
    pub pair_bonus: f64,
}

impl Default for PotWeightedHeuristic {
    fn default() -> Self {
        Self {
            pair_bonus: DEFAULT_PAIR_BONUS,
        }
    }
}

impl Heuristic<LeducGame> for PotWeightedHeuristic {
    fn evaluate(
        &self,
        game: &LeducGame,
        state: &LeducState,
        agent: usize,
    ) -> Result<f64, HeuristicError> {
        let base = PerfectInfoHeuristic {
            pair_bonus: self.pair_bonus,
        }
        .evaluate(game, state, agent)?;
        Ok(base * f64::from(state.pot[agent]))
    }
}
