//! Self-play episode generation.
//!
//! The [`EpisodeRunner`] plays two policies against each other, sampling
//! chance nodes from the game's own outcome distribution, and records one
//! trajectory per player per episode. Rewards are zero on every transition
//! except the last, whose reward is overwritten with the player's terminal
//! payoff. Learning policies receive their trajectories in batches every
//! `update_freq` episodes, with the remainder flushed at the end of a run.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::mc::agent::{McAgent, Trajectory, Transition};
use crate::search::game::Game;

/// A policy that can act in a game, and optionally learn from trajectories.
///
/// Non-learning policies keep the default no-op `update` and empty
/// `info_key`; their trajectories are still recorded but carry no keys
/// worth indexing on.
pub trait Policy<G: Game> {
    /// Choose an action at a decision node.
    ///
    /// `greedy` requests pure exploitation; policies without an
    /// exploration knob may ignore it.
    fn act(&mut self, game: &G, state: &G::State, greedy: bool) -> G::Action;

    /// Info-state key recorded on this policy's transitions.
    fn info_key(&self, _game: &G, _state: &G::State, _player: usize) -> String {
        String::new()
    }

    /// Learn from a batch of completed trajectories.
    fn update(&mut self, _trajectories: &[Trajectory<G::Action>]) {}
}

impl<G: Game> Policy<G> for McAgent<G> {
    fn act(&mut self, game: &G, state: &G::State, greedy: bool) -> G::Action {
        self.step(game, state, greedy)
    }

    fn info_key(&self, game: &G, state: &G::State, player: usize) -> String {
        McAgent::info_key(self, game, state, player)
    }

    fn update(&mut self, trajectories: &[Trajectory<G::Action>]) {
        McAgent::update(self, trajectories)
    }
}

/// Uniform random baseline policy.
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    /// Create a random policy, seeded for reproducibility if `seed` is set.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl<G: Game> Policy<G> for RandomPolicy {
    fn act(&mut self, game: &G, state: &G::State, _greedy: bool) -> G::Action {
        let legal = game.legal_actions(state);
        legal
            .choose(&mut self.rng)
            .expect("decision node with no legal actions")
            .clone()
    }
}

/// Plays episodes of a two-player game between two policies.
pub struct EpisodeRunner<G: Game> {
    game: G,
    /// Episodes per learning-update batch.
    update_freq: usize,
    rng: StdRng,
}

impl<G: Game> EpisodeRunner<G> {
    /// Create a runner for `game`.
    ///
    /// The seed drives chance-node sampling only; each policy carries its
    /// own RNG.
    pub fn new(game: G, update_freq: usize, seed: Option<u64>) -> Self {
        assert!(update_freq > 0, "update_freq must be at least 1");
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            game,
            update_freq,
            rng,
        }
    }

    /// Get reference to the game.
    pub fn game(&self) -> &G {
        &self.game
    }

    /// Play one episode and return (payoffs, per-player trajectories).
    ///
    /// Each player's trajectory records (info key, action, reward 0) at each
    /// of their decisions; after the episode ends, the reward of each
    /// player's final transition is overwritten with their terminal payoff.
    /// Intermediate transitions keep reward 0 even when chips move.
    pub fn play_episode<P0, P1>(
        &mut self,
        p0: &mut P0,
        p1: &mut P1,
        greedy: bool,
    ) -> ([f64; 2], [Trajectory<G::Action>; 2])
    where
        P0: Policy<G>,
        P1: Policy<G>,
    {
        let mut state = self.game.initial_state();
        let mut trajectories: [Trajectory<G::Action>; 2] = [Vec::new(), Vec::new()];

        while !self.game.is_terminal(&state) {
            if self.game.is_chance(&state) {
                state = self.game.sample_chance(&state, &mut self.rng);
                continue;
            }

            let player = self
                .game
                .current_player(&state)
                .expect("non-terminal, non-chance state must have a player");

            let (key, action) = if player == 0 {
                let key = p0.info_key(&self.game, &state, player);
                (key, p0.act(&self.game, &state, greedy))
            } else {
                let key = p1.info_key(&self.game, &state, player);
                (key, p1.act(&self.game, &state, greedy))
            };

            trajectories[player].push(Transition {
                key,
                action: action.clone(),
                reward: 0.0,
            });
            state = self.game.apply_action(&state, &action);
        }

        let payoffs = [self.game.payoff(&state, 0), self.game.payoff(&state, 1)];
        for player in 0..2 {
            if let Some(last) = trajectories[player].last_mut() {
                last.reward = payoffs[player];
            }
        }

        (payoffs, trajectories)
    }

    /// Play `episodes` episodes, optionally training the policies.
    ///
    /// When `train` is true, policies act with exploration enabled and each
    /// policy's `update` is called with its accumulated trajectories every
    /// `update_freq` episodes (remainder flushed at the end). When false,
    /// policies act greedily and are never updated.
    ///
    /// Returns per-episode payoffs.
    pub fn play_episodes<P0, P1>(
        &mut self,
        p0: &mut P0,
        p1: &mut P1,
        episodes: usize,
        train: bool,
    ) -> Vec<[f64; 2]>
    where
        P0: Policy<G>,
        P1: Policy<G>,
    {
        let mut payoffs = Vec::with_capacity(episodes);
        let mut batch0: Vec<Trajectory<G::Action>> = Vec::new();
        let mut batch1: Vec<Trajectory<G::Action>> = Vec::new();

        for episode in 0..episodes {
            let (result, [t0, t1]) = self.play_episode(p0, p1, !train);
            payoffs.push(result);

            if train {
                batch0.push(t0);
                batch1.push(t1);
                if (episode + 1) % self.update_freq == 0 {
                    p0.update(&batch0);
                    p1.update(&batch1);
                    batch0.clear();
                    batch1.clear();
                }
            }
        }

        if train && !batch0.is_empty() {
            p0.update(&batch0);
            p1.update(&batch1);
        }

        payoffs
    }

    /// Average payoffs over `episodes` greedy episodes, with no learning.
    pub fn evaluate<P0, P1>(&mut self, p0: &mut P0, p1: &mut P1, episodes: usize) -> [f64; 2]
    where
        P0: Policy<G>,
        P1: Policy<G>,
    {
        let results = self.play_episodes(p0, p1, episodes, false);
        let mut mean = [0.0, 0.0];
        for result in &results {
            mean[0] += result[0];
            mean[1] += result[1];
        }
        let count = results.len().max(1) as f64;
        [mean[0] / count, mean[1] / count]
    }
}
