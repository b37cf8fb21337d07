//! Info-state key transformers.
//!
//! A raw game state carries more than a player is allowed to see, and more
//! than a tabular learner can afford to distinguish. A [`StateTransformer`]
//! maps (state, player) to the string key the learner indexes its tables
//! with. What the key keeps is the abstraction level: dropping fields (e.g.
//! the action history) merges situations the player could in principle tell
//! apart, a deliberate trade-off between table size and acuity.

use serde::{Deserialize, Serialize};

use crate::games::leduc::{card_name, LeducGame, LeducState};
use crate::search::game::Game;

/// Maps a game state to the info-state key one player observes.
///
/// Two situations distinguishable from the player's point of view at the
/// chosen abstraction level must map to different keys; keys are immutable
/// once built and used only for table lookups.
pub trait StateTransformer<G: Game>: Send + Sync {
    /// Build the info-state key for `player` at `state`.
    fn key(&self, game: &G, state: &G::State, player: usize) -> String;

    /// Short identifier for logs and checkpoints.
    fn name(&self) -> &'static str;
}

/// Abstraction levels for Leduc hold'em.
///
/// From most to least situational awareness of the betting:
/// - `V1`: hand, public card, both chip stakes
/// - `V2`: hand, public card (smallest table)
/// - `V3`: `V1` plus the full action history
/// - `V4`: hand, public card, action history (history without stakes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeducAbstraction {
    /// Hand, public card, my chips, opponent chips.
    V1,
    /// Hand and public card only.
    V2,
    /// V1 plus action history.
    V3,
    /// Hand, public card, action history.
    V4,
}

impl LeducAbstraction {
    /// Parse an abstraction level from its short name (`v1`..`v4`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "v1" => Some(LeducAbstraction::V1),
            "v2" => Some(LeducAbstraction::V2),
            "v3" => Some(LeducAbstraction::V3),
            "v4" => Some(LeducAbstraction::V4),
            _ => None,
        }
    }
}

fn hand_label(state: &LeducState, player: usize) -> String {
    debug_assert!(
        state.cards[player].is_some(),
        "info key requested before player's card was dealt"
    );
    state.cards[player].map(card_name).unwrap_or_else(|| "--".to_string())
}

fn public_label(state: &LeducState) -> String {
    state.public.map(card_name).unwrap_or_else(|| "-".to_string())
}

impl StateTransformer<LeducGame> for LeducAbstraction {
    fn key(&self, _game: &LeducGame, state: &LeducState, player: usize) -> String {
        let hand = hand_label(state, player);
        let public = public_label(state);
        let my_chips = state.pot[player];
        let opp_chips = state.pot[1 - player];

        match self {
            LeducAbstraction::V1 => {
                format!("{}:{}:{}:{}", hand, public, my_chips, opp_chips)
            }
            LeducAbstraction::V2 => format!("{}:{}", hand, public),
            LeducAbstraction::V3 => format!(
                "{}:{}:{}:{}:{}",
                hand, public, my_chips, opp_chips, state.history
            ),
            LeducAbstraction::V4 => {
                format!("{}:{}:{}", hand, public, state.history)
            }
        }
    }

    fn name(&self) -> &'static str {
        match self {
            LeducAbstraction::V1 => "v1",
            LeducAbstraction::V2 => "v2",
            LeducAbstraction::V3 => "v3",
            LeducAbstraction::V4 => "v4",
        }
    }
}
