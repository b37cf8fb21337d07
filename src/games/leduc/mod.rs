//! Leduc hold'em implementation.
//!
//! Leduc hold'em is the standard small benchmark game for imperfect-
//! information poker algorithms: big enough to have chance nodes in the
//! middle of the game (the public card), small enough to search exactly.
//!
//! ## Game Rules
//!
//! - 6 cards: two suits of Jack (rank 0), Queen (rank 1), King (rank 2)
//! - 2 players, each antes 1 chip
//! - Each player receives 1 private card (chance)
//! - Betting round 1: raise size 2, at most 2 raises
//! - A public card is revealed (chance)
//! - Betting round 2: raise size 4, at most 2 raises
//! - Showdown: a private card pairing the public card wins; otherwise the
//!   higher rank wins; equal ranks split the pot
//!
//! Player 0 acts first in both betting rounds. A fold ends the hand
//! immediately; the folder loses their pot contribution.
//!
//! States are value-semantics: applying an action or expanding a chance
//! outcome builds a new state and never mutates the input, so the search can
//! branch freely from a shared ancestor.

pub mod heuristics;

pub use heuristics::{card_rank, ImperfectInfoHeuristic, PerfectInfoHeuristic, PotWeightedHeuristic};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::search::game::{Action, Game};

/// Rank of the Jack (lowest).
pub const RANK_J: u8 = 0;
/// Rank of the Queen.
pub const RANK_Q: u8 = 1;
/// Rank of the King (highest).
pub const RANK_K: u8 = 2;

/// Number of cards in the Leduc deck (3 ranks x 2 suits).
pub const DECK_SIZE: u8 = 6;

/// Raise sizes per betting round.
pub const RAISE_SIZES: [i32; 2] = [2, 4];

/// Maximum raises per betting round.
pub const MAX_RAISES: usize = 2;

/// Rank characters for display.
const RANK_CHARS: [char; 3] = ['J', 'Q', 'K'];

/// Suit characters for display.
const SUIT_CHARS: [char; 2] = ['a', 'b'];

/// Get the rank (0-2) of a card id (0-5). Two consecutive ids share a rank.
#[inline]
pub fn rank_of(card: u8) -> u8 {
    debug_assert!(card < DECK_SIZE, "card id must be 0-5");
    card / 2
}

/// Short display name for a card id, e.g. `Ja`, `Kb`.
pub fn card_name(card: u8) -> String {
    format!(
        "{}{}",
        RANK_CHARS[rank_of(card) as usize],
        SUIT_CHARS[(card % 2) as usize]
    )
}

/// Actions in Leduc hold'em.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeducAction {
    /// Match the outstanding bet (a check when there is nothing to call).
    Call,
    /// Add the round's raise size on top of any outstanding bet.
    Raise,
    /// Give up the hand. Only legal when facing a raise.
    Fold,
}

impl Action for LeducAction {
    fn label(&self) -> String {
        match self {
            LeducAction::Call => "c".to_string(),
            LeducAction::Raise => "r".to_string(),
            LeducAction::Fold => "f".to_string(),
        }
    }
}

impl fmt::Display for LeducAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeducAction::Call => write!(f, "Call"),
            LeducAction::Raise => write!(f, "Raise"),
            LeducAction::Fold => write!(f, "Fold"),
        }
    }
}

/// Complete game state in Leduc hold'em.
///
/// Private cards and the public card are `None` until dealt; the deal phases
/// are the game's chance nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeducState {
    /// Private card per player, `None` before the deal.
    pub cards: [Option<u8>; 2],
    /// Public card, `None` until revealed between the betting rounds.
    pub public: Option<u8>,
    /// Amount each player has invested in the pot (both ante 1).
    pub pot: [i32; 2],
    /// Action history: `c`/`r`/`f` per decision, `|` marks the public deal.
    pub history: String,
    /// Player who folded, if any.
    pub folded: Option<usize>,
}

impl Default for LeducState {
    fn default() -> Self {
        Self {
            cards: [None, None],
            public: None,
            pot: [1, 1],
            history: String::new(),
            folded: None,
        }
    }
}

impl LeducState {
    /// Current betting round: 0 before the public card, 1 after.
    pub fn round(&self) -> usize {
        usize::from(self.public.is_some())
    }

    /// History of the current betting round (after the last `|`).
    pub fn round_history(&self) -> &str {
        match self.history.rfind('|') {
            Some(i) => &self.history[i + 1..],
            None => &self.history,
        }
    }

    /// Whether the current betting round's action is closed.
    ///
    /// A call always closes the round unless it is the opening check.
    fn round_complete(&self) -> bool {
        let rh = self.round_history();
        rh.len() >= 2 && rh.ends_with('c')
    }

    /// Outstanding amount `player` would have to put in to call.
    pub fn amount_to_call(&self, player: usize) -> i32 {
        self.pot[1 - player] - self.pot[player]
    }

    /// Number of raises in the current betting round.
    pub fn raises_this_round(&self) -> usize {
        self.round_history().matches('r').count()
    }
}

impl fmt::Display for LeducState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let card = |c: Option<u8>| c.map(card_name).unwrap_or_else(|| "--".to_string());
        write!(
            f,
            "P0:{} P1:{} Pub:{} History:{} Pot:{:?}",
            card(self.cards[0]),
            card(self.cards[1]),
            card(self.public),
            self.history,
            self.pot
        )
    }
}

/// Leduc hold'em game.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeducGame;

impl LeducGame {
    /// Create a new Leduc game.
    pub fn new() -> Self {
        Self
    }

    /// Build a state with both private cards already dealt.
    ///
    /// Convenient root for searches over a fixed deal.
    pub fn deal(&self, card0: u8, card1: u8) -> LeducState {
        debug_assert!(card0 < DECK_SIZE && card1 < DECK_SIZE && card0 != card1);
        LeducState {
            cards: [Some(card0), Some(card1)],
            ..LeducState::default()
        }
    }

    /// Winner of a showdown, `None` on a split.
    fn showdown_winner(&self, state: &LeducState) -> Option<usize> {
        let public_rank = state.public.map(rank_of);
        let r0 = rank_of(state.cards[0].expect("showdown without P0 card"));
        let r1 = rank_of(state.cards[1].expect("showdown without P1 card"));

        let paired0 = public_rank == Some(r0);
        let paired1 = public_rank == Some(r1);

        match (paired0, paired1) {
            (true, false) => Some(0),
            (false, true) => Some(1),
            // Both paired is impossible with one card per rank pair left,
            // but ranks can still tie unpaired.
            _ => match r0.cmp(&r1) {
                std::cmp::Ordering::Greater => Some(0),
                std::cmp::Ordering::Less => Some(1),
                std::cmp::Ordering::Equal => None,
            },
        }
    }
}

impl Game for LeducGame {
    type State = LeducState;
    type Action = LeducAction;

    fn initial_state(&self) -> LeducState {
        LeducState::default()
    }

    fn is_terminal(&self, state: &LeducState) -> bool {
        state.folded.is_some() || (state.public.is_some() && state.round_complete())
    }

    fn is_chance(&self, state: &LeducState) -> bool {
        if state.folded.is_some() {
            return false;
        }
        state.cards[0].is_none()
            || state.cards[1].is_none()
            || (state.public.is_none() && state.round_complete())
    }

    fn payoff(&self, state: &LeducState, player: usize) -> f64 {
        debug_assert!(self.is_terminal(state), "payoff called on non-terminal state");

        let winner = match state.folded {
            Some(folder) => Some(1 - folder),
            None => self.showdown_winner(state),
        };

        match winner {
            Some(w) if w == player => f64::from(state.pot[1 - player]),
            Some(_) => -f64::from(state.pot[player]),
            None => 0.0, // split pot
        }
    }

    fn current_player(&self, state: &LeducState) -> Option<usize> {
        if self.is_terminal(state) || self.is_chance(state) {
            return None;
        }
        // Player 0 opens each round; players alternate within a round.
        Some(state.round_history().len() % 2)
    }

    fn num_players(&self) -> usize {
        2
    }

    fn legal_actions(&self, state: &LeducState) -> Vec<LeducAction> {
        let player = match self.current_player(state) {
            Some(p) => p,
            None => return vec![],
        };

        let mut actions = vec![LeducAction::Call];
        if state.raises_this_round() < MAX_RAISES {
            actions.push(LeducAction::Raise);
        }
        if state.amount_to_call(player) > 0 {
            actions.push(LeducAction::Fold);
        }
        actions
    }

    fn apply_action(&self, state: &LeducState, action: &LeducAction) -> LeducState {
        let player = self
            .current_player(state)
            .expect("apply_action on non-decision state");
        let mut next = state.clone();

        match action {
            LeducAction::Call => {
                next.pot[player] += state.amount_to_call(player);
                next.history.push('c');
            }
            LeducAction::Raise => {
                next.pot[player] +=
                    state.amount_to_call(player) + RAISE_SIZES[state.round()];
                next.history.push('r');
            }
            LeducAction::Fold => {
                debug_assert!(state.amount_to_call(player) > 0, "fold with nothing to call");
                next.history.push('f');
                next.folded = Some(player);
            }
        }

        next
    }

    fn chance_outcomes(&self, state: &LeducState) -> Vec<(LeducState, f64)> {
        if !self.is_chance(state) {
            return vec![];
        }

        let seen = |card: u8| {
            state.cards.iter().flatten().any(|&c| c == card)
                || state.public == Some(card)
        };
        let pool: Vec<u8> = (0..DECK_SIZE).filter(|&c| !seen(c)).collect();
        let prob = 1.0 / pool.len() as f64;

        pool.into_iter()
            .map(|card| {
                let mut next = state.clone();
                if state.cards[0].is_none() {
                    next.cards[0] = Some(card);
                } else if state.cards[1].is_none() {
                    next.cards[1] = Some(card);
                } else {
                    next.public = Some(card);
                    next.history.push('|');
                }
                (next, prob)
            })
            .collect()
    }

    fn state_description(&self, state: &LeducState) -> String {
        format!("{}", state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deal_sequence() {
        let game = LeducGame::new();
        let state = game.initial_state();
        assert!(game.is_chance(&state));

        // First deal: 6 outcomes at 1/6 each.
        let outcomes = game.chance_outcomes(&state);
        assert_eq!(outcomes.len(), 6);
        let total: f64 = outcomes.iter().map(|(_, p)| p).sum();
        assert!((total - 1.0).abs() < 1e-12);

        // Second deal excludes P0's card: 5 outcomes at 1/5.
        let (after_first, _) = &outcomes[0];
        assert!(game.is_chance(after_first));
        let outcomes = game.chance_outcomes(after_first);
        assert_eq!(outcomes.len(), 5);
        assert!(outcomes
            .iter()
            .all(|(s, _)| s.cards[1] != s.cards[0]));

        // After both private cards it's P0's decision.
        let (dealt, _) = &outcomes[0];
        assert!(!game.is_chance(dealt));
        assert_eq!(game.current_player(dealt), Some(0));
    }

    #[test]
    fn test_public_card_after_round_one() {
        let game = LeducGame::new();
        let state = game.deal(4, 0); // Ka vs Ja

        // Check-check closes round 1.
        let state = game.apply_action(&state, &LeducAction::Call);
        assert_eq!(game.current_player(&state), Some(1));
        let state = game.apply_action(&state, &LeducAction::Call);
        assert!(game.is_chance(&state));

        // Public card: 4 remaining cards at 1/4.
        let outcomes = game.chance_outcomes(&state);
        assert_eq!(outcomes.len(), 4);
        let total: f64 = outcomes.iter().map(|(_, p)| p).sum();
        assert!((total - 1.0).abs() < 1e-12);

        let (postflop, _) = &outcomes[0];
        assert_eq!(postflop.round(), 1);
        assert_eq!(game.current_player(postflop), Some(0));
    }

    #[test]
    fn test_legal_actions() {
        let game = LeducGame::new();
        let state = game.deal(4, 0);

        // Nothing to call: fold is not offered.
        let actions = game.legal_actions(&state);
        assert_eq!(actions, vec![LeducAction::Call, LeducAction::Raise]);

        // Facing a raise: all three.
        let state = game.apply_action(&state, &LeducAction::Raise);
        let actions = game.legal_actions(&state);
        assert_eq!(
            actions,
            vec![LeducAction::Call, LeducAction::Raise, LeducAction::Fold]
        );

        // At the raise cap: no further raise.
        let state = game.apply_action(&state, &LeducAction::Raise);
        let actions = game.legal_actions(&state);
        assert_eq!(actions, vec![LeducAction::Call, LeducAction::Fold]);
    }

    #[test]
    fn test_fold_payoff() {
        let game = LeducGame::new();
        let state = game.deal(0, 4); // Ja vs Ka

        // P0 raises to 3, P1 folds: P0 wins P1's ante.
        let state = game.apply_action(&state, &LeducAction::Raise);
        let state = game.apply_action(&state, &LeducAction::Fold);
        assert!(game.is_terminal(&state));
        assert_eq!(game.payoff(&state, 0), 1.0);
        assert_eq!(game.payoff(&state, 1), -1.0);
    }

    #[test]
    fn test_showdown_payoffs_and_zero_sum() {
        let game = LeducGame::new();

        // Full hand: check-check, public Qa, check-check. K beats J.
        let mut state = game.deal(4, 0); // Ka vs Ja
        for action in [LeducAction::Call, LeducAction::Call] {
            state = game.apply_action(&state, &action);
        }
        state.public = Some(2); // Qa
        state.history.push('|');
        for action in [LeducAction::Call, LeducAction::Call] {
            state = game.apply_action(&state, &action);
        }
        assert!(game.is_terminal(&state));
        assert_eq!(game.payoff(&state, 0), 1.0);
        assert_eq!(game.payoff(&state, 0), -game.payoff(&state, 1));

        // Pair of jacks beats the king.
        let mut paired = state.clone();
        paired.public = Some(1); // Jb pairs P1's Ja
        assert_eq!(game.payoff(&paired, 1), 1.0);
        assert_eq!(game.payoff(&paired, 0), -1.0);
    }

    #[test]
    fn test_split_pot() {
        let game = LeducGame::new();
        let mut state = game.deal(4, 5); // Ka vs Kb
        for action in [LeducAction::Call, LeducAction::Call] {
            state = game.apply_action(&state, &action);
        }
        state.public = Some(0);
        state.history.push('|');
        for action in [LeducAction::Call, LeducAction::Call] {
            state = game.apply_action(&state, &action);
        }
        assert!(game.is_terminal(&state));
        assert_eq!(game.payoff(&state, 0), 0.0);
        assert_eq!(game.payoff(&state, 1), 0.0);
    }

    #[test]
    fn test_raise_sizes_per_round() {
        let game = LeducGame::new();
        let state = game.deal(4, 0);

        // Round 1 raise: ante 1 + raise 2 = 3 invested.
        let state = game.apply_action(&state, &LeducAction::Raise);
        assert_eq!(state.pot, [3, 1]);

        // Call, public card, then a round-2 raise of 4.
        let state = game.apply_action(&state, &LeducAction::Call);
        let (mut postflop, _) = game.chance_outcomes(&state)[0].clone();
        postflop = game.apply_action(&postflop, &LeducAction::Raise);
        assert_eq!(postflop.pot[0], 3 + 4);
    }

    #[test]
    fn test_apply_action_leaves_input_untouched() {
        let game = LeducGame::new();
        let state = game.deal(4, 0);
        let before = state.clone();
        let _ = game.apply_action(&state, &LeducAction::Raise);
        assert_eq!(state, before);
    }
}
