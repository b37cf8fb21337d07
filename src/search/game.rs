//! Game trait definition for the search engine and learner.
//!
//! Any two-player zero-sum game with chance events that implements the `Game`
//! trait can be searched with expectiminimax and trained against with the
//! Monte Carlo control agents. This provides a clean abstraction between the
//! algorithms and specific games.

use std::fmt::Debug;
use std::hash::Hash;

use rand::Rng;

/// Trait for actions that can be taken in a game.
///
/// Actions must be cloneable, comparable, and hashable for storage in maps.
pub trait Action: Clone + Eq + Hash + Debug + Send + Sync {
    /// Convert action to a short string representation for display/storage.
    fn label(&self) -> String;
}

/// The main Game trait that defines the interface for any game.
///
/// Implement this trait to use the search engine or episode runner with your
/// game. State transitions are immutable-apply: `apply_action` and
/// `chance_outcomes` return fresh states and never mutate their input, which
/// is what lets the search branch many times from the same ancestor.
///
/// # Type Parameters
/// - `State`: The game state type
/// - `Action`: The action type
pub trait Game: Clone + Send + Sync {
    /// The type representing a complete game state.
    type State: Clone + Debug + Send + Sync;

    /// The type representing an action a player can take.
    type Action: Action;

    /// Create the initial game state.
    fn initial_state(&self) -> Self::State;

    /// Check if the given state is terminal (game over).
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Check if the current state is a chance node.
    ///
    /// Chance nodes represent random events like dealing cards; neither
    /// player chooses the next event.
    fn is_chance(&self, state: &Self::State) -> bool;

    /// Get the payoff for a player at a terminal state.
    ///
    /// # Arguments
    /// * `state` - A terminal game state
    /// * `player` - The player index (0-indexed)
    ///
    /// # Returns
    /// The payoff (utility) for the specified player. For two-player zero-sum
    /// games, `payoff(s, 0) == -payoff(s, 1)`.
    ///
    /// # Panics
    /// May panic if called on a non-terminal state.
    fn payoff(&self, state: &Self::State, player: usize) -> f64;

    /// Get the index of the player who should act at the current state.
    ///
    /// # Returns
    /// - `Some(player_index)` if a player should act
    /// - `None` if the state is terminal or a chance node
    fn current_player(&self, state: &Self::State) -> Option<usize>;

    /// Get the total number of players in the game.
    fn num_players(&self) -> usize;

    /// Get the list of available actions at the current state.
    ///
    /// Returns an empty vector for terminal and chance states. The rules
    /// engine must guarantee at least one legal action at any non-terminal
    /// decision node.
    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Apply an action to a state and return the resulting new state.
    ///
    /// This must not modify the input state (immutable transition).
    fn apply_action(&self, state: &Self::State, action: &Self::Action) -> Self::State;

    /// Enumerate the outcomes of a chance node.
    ///
    /// Each entry is a successor state paired with its probability; the
    /// probabilities across all returned outcomes sum to 1. Returns an empty
    /// vector for non-chance states.
    fn chance_outcomes(&self, state: &Self::State) -> Vec<(Self::State, f64)>;

    /// Sample one outcome from a chance node according to its distribution.
    ///
    /// The default implementation draws from `chance_outcomes`. Games with
    /// a cheaper direct sampling path may override it.
    ///
    /// # Panics
    /// May panic if called on a non-chance state.
    fn sample_chance<R: Rng>(&self, state: &Self::State, rng: &mut R) -> Self::State {
        let outcomes = self.chance_outcomes(state);
        debug_assert!(!outcomes.is_empty(), "sample_chance called on non-chance state");

        let r: f64 = rng.gen();
        let mut cumsum = 0.0;
        for (next, prob) in &outcomes {
            cumsum += prob;
            if r < cumsum {
                return next.clone();
            }
        }
        // Fallback to last outcome (handles floating point imprecision)
        outcomes.last().unwrap().0.clone()
    }

    /// Get a human-readable name for an action.
    fn action_name(&self, action: &Self::Action) -> String {
        action.label()
    }

    /// Get a human-readable description of a state.
    fn state_description(&self, state: &Self::State) -> String {
        format!("{:?}", state)
    }
}
