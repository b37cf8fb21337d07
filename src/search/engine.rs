//! Expectiminimax search engine.
//!
//! This module implements depth-limited expectiminimax for two-player
//! zero-sum games with chance nodes, in two variants selected by
//! [`SearchConfig`]:
//!
//! - **Exact**: chance nodes are expanded full-width, weighting every outcome
//!   by its probability. One unit of depth is consumed per ply, chance plies
//!   included.
//! - **Sampled**: chance nodes are estimated from `min(k, n)` outcomes drawn
//!   uniformly without replacement, with the sampled probabilities
//!   renormalized to sum to 1. Chance-node sampling does *not* consume depth;
//!   only decision plies do. The asymmetry with the exact variant is a
//!   deliberate, preserved design choice: a sampling pass over one deal is
//!   not a "real" game ply, so the number of decision plies searched stays
//!   comparable across sample counts.
//!
//! The search is pure recursion over value-semantics states; no tree is
//! retained between calls, and repeated calls on clones of the same root draw
//! independent samples.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::search::config::SearchConfig;
use crate::search::game::{Action, Game};
use crate::search::heuristics::{Heuristic, HeuristicError};

/// Depth-limited expectiminimax searcher.
///
/// # Example
/// ```ignore
/// use poker_search_poc::search::{Searcher, SearchConfig};
///
/// let mut searcher = Searcher::new(game, SearchConfig::default().with_seed(42));
/// let (value, action) = searcher.best_action(&state, 4, 0, &heuristic)?;
/// ```
pub struct Searcher<G: Game> {
    /// The game being searched.
    game: G,

    /// Configuration (chance expansion mode, seed).
    config: SearchConfig,

    /// Random number generator for chance-node sampling.
    rng: StdRng,
}

impl<G: Game> Searcher<G> {
    /// Create a new searcher for the given game.
    pub fn new(game: G, config: SearchConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self { game, config, rng }
    }

    /// Get reference to the game.
    pub fn game(&self) -> &G {
        &self.game
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Compute the expectiminimax value of `state` for `agent`.
    ///
    /// - Terminal states return the exact payoff, regardless of `depth`.
    /// - `depth == 0` at a non-terminal state resolves through the heuristic;
    ///   this is an approximation boundary, not an error.
    /// - Chance nodes take the probability-weighted expectation over their
    ///   outcomes (exact or sampled per the configuration).
    /// - Decision nodes maximize when `agent` acts and minimize otherwise:
    ///   the opponent is assumed to play exact adversarial zero-sum, not a
    ///   modeled strategy.
    pub fn value<H: Heuristic<G>>(
        &mut self,
        state: &G::State,
        depth: u32,
        agent: usize,
        heuristic: &H,
    ) -> Result<f64, SearchError> {
        if self.game.is_terminal(state) {
            return Ok(self.game.payoff(state, agent));
        }

        if depth == 0 {
            return Ok(heuristic.evaluate(&self.game, state, agent)?);
        }

        if self.game.is_chance(state) {
            return self.chance_value(state, depth, agent, heuristic);
        }

        // Decision node
        let player = self
            .game
            .current_player(state)
            .expect("non-terminal, non-chance state must have a player to act");
        let actions = self.game.legal_actions(state);
        debug_assert!(
            !actions.is_empty(),
            "decision node with no legal actions violates the rules-engine precondition"
        );

        let mut best: Option<f64> = None;
        for action in &actions {
            let next = self.game.apply_action(state, action);
            let val = self.value(&next, depth - 1, agent, heuristic)?;
            best = Some(match best {
                None => val,
                // Maximize at the agent's nodes, minimize at the opponent's.
                Some(b) if player == agent => b.max(val),
                Some(b) => b.min(val),
            });
        }

        Ok(best.expect("at least one legal action"))
    }

    /// Expectation over a chance node's outcomes.
    fn chance_value<H: Heuristic<G>>(
        &mut self,
        state: &G::State,
        depth: u32,
        agent: usize,
        heuristic: &H,
    ) -> Result<f64, SearchError> {
        let outcomes = self.game.chance_outcomes(state);
        debug_assert!(!outcomes.is_empty(), "chance node with no outcomes");

        match self.config.chance_samples {
            Some(k) => {
                // Uniform sample without replacement, renormalized so the
                // sampled probabilities sum to 1. Depth is NOT decremented
                // on sampled chance plies (see module docs).
                let sample: Vec<(G::State, f64)> = outcomes
                    .choose_multiple(&mut self.rng, k.min(outcomes.len()))
                    .cloned()
                    .collect();
                let total: f64 = sample.iter().map(|(_, p)| p).sum();

                let mut value = 0.0;
                for (next, prob) in &sample {
                    value += (prob / total) * self.value(next, depth, agent, heuristic)?;
                }
                Ok(value)
            }
            None => {
                // Exact full-width expectation; a chance ply consumes depth
                // just like a decision ply.
                let mut value = 0.0;
                for (next, prob) in &outcomes {
                    value += prob * self.value(next, depth - 1, agent, heuristic)?;
                }
                Ok(value)
            }
        }
    }

    /// Find the best action for `agent` at a decision-node root.
    ///
    /// Performs one explicit ply: each root legal action is applied and its
    /// subtree evaluated with `value` at `depth - 1`; the argmax is returned
    /// with its value. Ties are broken by keeping the first strict maximum in
    /// legal-action order, a fixed tie-break that keeps repeated exact
    /// searches reproducible.
    ///
    /// # Errors
    /// Fails if the root is terminal or a chance node, or if a heuristic
    /// evaluation fails somewhere in the tree.
    pub fn best_action<H: Heuristic<G>>(
        &mut self,
        state: &G::State,
        depth: u32,
        agent: usize,
        heuristic: &H,
    ) -> Result<(f64, G::Action), SearchError> {
        if self.game.is_terminal(state) {
            return Err(SearchError::RootTerminal);
        }
        if self.game.is_chance(state) {
            return Err(SearchError::RootChance);
        }
        debug_assert!(depth >= 1, "best_action needs at least one ply of depth");

        let actions = self.game.legal_actions(state);
        debug_assert!(
            !actions.is_empty(),
            "decision node with no legal actions violates the rules-engine precondition"
        );

        let mut best: Option<(f64, G::Action)> = None;
        for action in actions {
            let next = self.game.apply_action(state, &action);
            let val = self.value(&next, depth.saturating_sub(1), agent, heuristic)?;

            match best {
                // Strict comparison keeps the first-seen maximum.
                Some((best_val, _)) if val <= best_val => {}
                _ => best = Some((val, action)),
            }
        }

        let (value, action) = best.expect("at least one legal action");
        log::debug!(
            "best_action depth={} agent={}: {} (value {:.4})",
            depth,
            agent,
            action.label(),
            value
        );
        Ok((value, action))
    }
}

/// Errors raised by the search engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// `best_action` was called on a terminal state; there is nothing to pick.
    RootTerminal,
    /// `best_action` was called on a chance node; no player acts there.
    RootChance,
    /// A heuristic evaluation failed at a depth cutoff.
    Heuristic(HeuristicError),
}

impl From<HeuristicError> for SearchError {
    fn from(err: HeuristicError) -> Self {
        SearchError::Heuristic(err)
    }
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchError::RootTerminal => write!(f, "best_action called on a terminal state"),
            SearchError::RootChance => write!(f, "best_action called on a chance node"),
            SearchError::Heuristic(err) => write!(f, "heuristic evaluation failed: {}", err),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SearchError::Heuristic(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::game::Action as ActionTrait;

    /// Minimal hand-rolled game for exercising each node type in isolation.
    ///
    /// Tree:
    /// ```text
    /// Flip (chance: Heads 0.25, Tails 0.75)
    /// ├── Heads → P0 decision
    /// │   ├── Left  → terminal, payoff +4 for P0
    /// │   └── Right → P1 decision
    /// │       ├── Left  → terminal, payoff +6 for P0
    /// │       └── Right → terminal, payoff +2 for P0
    /// └── Tails → terminal, payoff -1 for P0
    /// ```
    #[derive(Debug, Clone, PartialEq)]
    enum MiniState {
        Flip,
        P0Turn,
        P1Turn,
        Terminal(f64),
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum MiniAction {
        Left,
        Right,
    }

    impl ActionTrait for MiniAction {
        fn label(&self) -> String {
            match self {
                MiniAction::Left => "L".to_string(),
                MiniAction::Right => "R".to_string(),
            }
        }
    }

    #[derive(Debug, Clone)]
    struct MiniGame;

    impl Game for MiniGame {
        type State = MiniState;
        type Action = MiniAction;

        fn initial_state(&self) -> MiniState {
            MiniState::Flip
        }

        fn is_terminal(&self, state: &MiniState) -> bool {
            matches!(state, MiniState::Terminal(_))
        }

        fn is_chance(&self, state: &MiniState) -> bool {
            matches!(state, MiniState::Flip)
        }

        fn payoff(&self, state: &MiniState, player: usize) -> f64 {
            match state {
                MiniState::Terminal(v) => {
                    if player == 0 {
                        *v
                    } else {
                        -*v
                    }
                }
                _ => panic!("payoff on non-terminal"),
            }
        }

        fn current_player(&self, state: &MiniState) -> Option<usize> {
            match state {
                MiniState::P0Turn => Some(0),
                MiniState::P1Turn => Some(1),
                _ => None,
            }
        }

        fn num_players(&self) -> usize {
            2
        }

        fn legal_actions(&self, state: &MiniState) -> Vec<MiniAction> {
            match state {
                MiniState::P0Turn | MiniState::P1Turn => {
                    vec![MiniAction::Left, MiniAction::Right]
                }
                _ => vec![],
            }
        }

        fn apply_action(&self, state: &MiniState, action: &MiniAction) -> MiniState {
            match (state, action) {
                (MiniState::P0Turn, MiniAction::Left) => MiniState::Terminal(4.0),
                (MiniState::P0Turn, MiniAction::Right) => MiniState::P1Turn,
                (MiniState::P1Turn, MiniAction::Left) => MiniState::Terminal(6.0),
                (MiniState::P1Turn, MiniAction::Right) => MiniState::Terminal(2.0),
                _ => panic!("apply_action on non-decision state"),
            }
        }

        fn chance_outcomes(&self, state: &MiniState) -> Vec<(MiniState, f64)> {
            match state {
                MiniState::Flip => vec![
                    (MiniState::P0Turn, 0.25),
                    (MiniState::Terminal(-1.0), 0.75),
                ],
                _ => vec![],
            }
        }
    }

    /// Heuristic returning a fixed value, for cutoff tests.
    struct Fixed(f64);

    impl Heuristic<MiniGame> for Fixed {
        fn evaluate(
            &self,
            _game: &MiniGame,
            _state: &MiniState,
            _agent: usize,
        ) -> Result<f64, HeuristicError> {
            Ok(self.0)
        }
    }

    fn searcher() -> Searcher<MiniGame> {
        Searcher::new(MiniGame, SearchConfig::default().with_seed(7))
    }

    #[test]
    fn test_terminal_value_ignores_depth() {
        let mut s = searcher();
        let state = MiniState::Terminal(3.5);
        for depth in [0, 1, 10] {
            assert_eq!(s.value(&state, depth, 0, &Fixed(0.0)).unwrap(), 3.5);
            assert_eq!(s.value(&state, depth, 1, &Fixed(0.0)).unwrap(), -3.5);
        }
    }

    #[test]
    fn test_depth_zero_resolves_via_heuristic() {
        let mut s = searcher();
        let val = s.value(&MiniState::P0Turn, 0, 0, &Fixed(1.25)).unwrap();
        assert_eq!(val, 1.25);
    }

    #[test]
    fn test_min_node_assumes_adversarial_opponent() {
        let mut s = searcher();
        // P1 minimizes P0's value: min(6, 2) = 2.
        let val = s.value(&MiniState::P1Turn, 2, 0, &Fixed(0.0)).unwrap();
        assert_eq!(val, 2.0);
    }

    #[test]
    fn test_max_node_and_best_action() {
        let mut s = searcher();
        // Left is 4; Right leads to P1 who minimizes to 2. Max picks Left.
        let (val, action) = s
            .best_action(&MiniState::P0Turn, 3, 0, &Fixed(0.0))
            .unwrap();
        assert_eq!(val, 4.0);
        assert_eq!(action, MiniAction::Left);
    }

    #[test]
    fn test_exact_chance_weighting() {
        let mut s = searcher();
        // 0.25 * max-subtree(4) + 0.75 * (-1) = 1.0 - 0.75 = 0.25
        let val = s.value(&MiniState::Flip, 4, 0, &Fixed(0.0)).unwrap();
        assert!((val - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_chance_ply_consumes_depth_in_exact_mode() {
        let mut s = searcher();
        // Depth 1: the chance ply eats the budget, so the P0 decision node is
        // cut off at the heuristic while the Tails terminal stays exact.
        let val = s.value(&MiniState::Flip, 1, 0, &Fixed(100.0)).unwrap();
        assert!((val - (0.25 * 100.0 + 0.75 * -1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_sampled_chance_keeps_depth() {
        // With k covering every outcome the sample is the full set and the
        // renormalized weights are the original probabilities, but depth is
        // not decremented: at depth 1 the P0 decision is still searched.
        let mut s = Searcher::new(MiniGame, SearchConfig::sampled(2).with_seed(7));
        let val = s.value(&MiniState::Flip, 1, 0, &Fixed(0.0)).unwrap();
        assert!((val - (0.25 * 4.0 + 0.75 * -1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_sampled_renormalization_sums_to_one() {
        // If the renormalized sample weights sum to 1, the sampled value of
        // a chance node whose children are all worth the same amount equals
        // that amount, for any k.
        #[derive(Debug, Clone)]
        struct FlatGame;

        impl Game for FlatGame {
            type State = MiniState;
            type Action = MiniAction;

            fn initial_state(&self) -> MiniState {
                MiniState::Flip
            }
            fn is_terminal(&self, state: &MiniState) -> bool {
                matches!(state, MiniState::Terminal(_))
            }
            fn is_chance(&self, state: &MiniState) -> bool {
                matches!(state, MiniState::Flip)
            }
            fn payoff(&self, state: &MiniState, player: usize) -> f64 {
                match state {
                    MiniState::Terminal(v) if player == 0 => *v,
                    MiniState::Terminal(v) => -*v,
                    _ => panic!("payoff on non-terminal"),
                }
            }
            fn current_player(&self, _state: &MiniState) -> Option<usize> {
                None
            }
            fn num_players(&self) -> usize {
                2
            }
            fn legal_actions(&self, _state: &MiniState) -> Vec<MiniAction> {
                vec![]
            }
            fn apply_action(&self, _state: &MiniState, _action: &MiniAction) -> MiniState {
                panic!("no decisions in FlatGame")
            }
            fn chance_outcomes(&self, _state: &MiniState) -> Vec<(MiniState, f64)> {
                // Skewed weights; all outcomes worth exactly 7.
                vec![
                    (MiniState::Terminal(7.0), 0.5),
                    (MiniState::Terminal(7.0), 0.2),
                    (MiniState::Terminal(7.0), 0.2),
                    (MiniState::Terminal(7.0), 0.05),
                    (MiniState::Terminal(7.0), 0.05),
                ]
            }
        }

        struct Zero;
        impl Heuristic<FlatGame> for Zero {
            fn evaluate(
                &self,
                _game: &FlatGame,
                _state: &MiniState,
                _agent: usize,
            ) -> Result<f64, HeuristicError> {
                Ok(0.0)
            }
        }

        for k in 1..=6 {
            let mut s = Searcher::new(FlatGame, SearchConfig::sampled(k).with_seed(99));
            let val = s.value(&MiniState::Flip, 3, 0, &Zero).unwrap();
            assert!(
                (val - 7.0).abs() < 1e-12,
                "k={}: sampled weights must renormalize to 1 (got value {})",
                k,
                val
            );
        }
    }

    #[test]
    fn test_first_seen_max_tie_break() {
        let mut s = searcher();
        // Agent 1 at P0's node, depth 1: Left is terminal (-4.0 for P1),
        // Right cuts off at the heuristic, pinned to the same -4.0.
        // The tie resolves to the first-seen maximum, Left.
        let (val, action) = s
            .best_action(&MiniState::P0Turn, 1, 1, &Fixed(-4.0))
            .unwrap();
        assert_eq!(val, -4.0);
        assert_eq!(action, MiniAction::Left);
    }

    #[test]
    fn test_best_action_root_errors() {
        let mut s = searcher();
        assert_eq!(
            s.best_action(&MiniState::Terminal(0.0), 3, 0, &Fixed(0.0)),
            Err(SearchError::RootTerminal)
        );
        assert_eq!(
            s.best_action(&MiniState::Flip, 3, 0, &Fixed(0.0)),
            Err(SearchError::RootChance)
        );
    }

    #[test]
    fn test_zero_sum_duality() {
        let game = MiniGame;
        let state = MiniState::Terminal(2.0);
        assert_eq!(game.payoff(&state, 0), -game.payoff(&state, 1));
    }
}
