//! Tabular Monte Carlo control agent.
//!
//! First-visit / every-visit Monte Carlo control with epsilon-greedy action
//! selection. The agent owns no per-episode state machine: it is a pair of
//! Q/N tables updated between episodes from complete trajectories, plus a
//! seeded RNG for exploration and tie-breaking.
//!
//! Unlike the search engine's deterministic first-max tie-break, `step`
//! breaks Q-value ties uniformly at random. The two rules serve different
//! correctness requirements (reproducible search versus unbiased
//! exploration of equally-valued actions) and are intentionally not
//! harmonized.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::mc::abstraction::StateTransformer;
use crate::mc::config::{McConfig, VisitKind};
use crate::mc::table::{TableExport, ValueTable};
use crate::search::game::{Action, Game};

/// One recorded step of an episode, from a single player's point of view.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<A> {
    /// Info-state key the player observed when acting.
    pub key: String,
    /// The action taken.
    pub action: A,
    /// Reward collected on this step: 0 everywhere except the final
    /// transition, whose reward is overwritten with the terminal payoff.
    pub reward: f64,
}

/// One player's chronological trajectory through one episode.
pub type Trajectory<A> = Vec<Transition<A>>;

/// Tabular Monte Carlo control agent.
///
/// # Example
/// ```ignore
/// use poker_search_poc::mc::{McAgent, McConfig, LeducAbstraction};
///
/// let mut agent = McAgent::new(McConfig::default().with_seed(1),
///                              Box::new(LeducAbstraction::V1));
/// let action = agent.step(&game, &state, false);
/// ```
pub struct McAgent<G: Game> {
    /// Configuration (epsilon, gamma, visit rule, seed).
    config: McConfig,

    /// Q/N tables.
    table: ValueTable,

    /// Maps states to the info keys the tables are indexed with.
    transformer: Box<dyn StateTransformer<G>>,

    /// Random number generator for exploration and tie-breaking.
    rng: StdRng,
}

impl<G: Game> McAgent<G> {
    /// Create a new agent with empty tables.
    pub fn new(config: McConfig, transformer: Box<dyn StateTransformer<G>>) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            config,
            table: ValueTable::new(),
            transformer,
            rng,
        }
    }

    /// Info-state key for `player` at `state` under this agent's abstraction.
    pub fn info_key(&self, game: &G, state: &G::State, player: usize) -> String {
        self.transformer.key(game, state, player)
    }

    /// Choose an action at a decision node.
    ///
    /// With probability epsilon (suppressed when `greedy` is true) a
    /// uniformly random legal action is returned. Otherwise the legal
    /// action(s) with maximal Q are found (unseen pairs read as 0.0) and
    /// ties are broken uniformly at random.
    ///
    /// # Panics
    /// Panics if called on a terminal or chance state (no player to act).
    pub fn step(&mut self, game: &G, state: &G::State, greedy: bool) -> G::Action {
        let player = game
            .current_player(state)
            .expect("step called on a state with no player to act");
        let legal = game.legal_actions(state);
        debug_assert!(!legal.is_empty(), "decision node with no legal actions");

        if !greedy && self.rng.gen::<f64>() < self.config.epsilon {
            // Explore
            return legal.choose(&mut self.rng).unwrap().clone();
        }

        let key = self.transformer.key(game, state, player);

        let mut best_value = f64::NEG_INFINITY;
        let mut best_actions: Vec<&G::Action> = Vec::new();
        for action in &legal {
            let value = self.table.q_or_default(&key, &action.label());
            if value > best_value {
                best_value = value;
                best_actions.clear();
                best_actions.push(action);
            } else if value == best_value {
                best_actions.push(action);
            }
        }

        (*best_actions.choose(&mut self.rng).unwrap()).clone()
    }

    /// Update the tables from a batch of completed episodes.
    ///
    /// Each trajectory is processed backward, accumulating the discounted
    /// return `G = reward + gamma * G`. Under [`VisitKind::FirstVisit`] a
    /// (key, action) pair updates only at its first chronological occurrence
    /// within the episode (the return is still accumulated at every step);
    /// under [`VisitKind::EveryVisit`] every occurrence updates.
    pub fn update(&mut self, trajectories: &[Trajectory<G::Action>]) {
        for episode in trajectories {
            // First chronological occurrence of each (key, action) pair.
            let mut first_seen: FxHashMap<(&str, String), usize> = FxHashMap::default();
            for (t, tr) in episode.iter().enumerate() {
                first_seen
                    .entry((tr.key.as_str(), tr.action.label()))
                    .or_insert(t);
            }

            let mut g = 0.0;
            for (t, tr) in episode.iter().enumerate().rev() {
                g = self.config.gamma * g + tr.reward;

                let label = tr.action.label();
                let updates = match self.config.visit {
                    VisitKind::EveryVisit => true,
                    VisitKind::FirstVisit => {
                        first_seen.get(&(tr.key.as_str(), label.clone())) == Some(&t)
                    }
                };
                if updates {
                    self.table.record_return(&tr.key, &label, g);
                }
            }
        }

        log::debug!(
            "update: {} episodes, {} info states, {} entries",
            trajectories.len(),
            self.table.num_states(),
            self.table.num_entries()
        );
    }

    /// Get reference to the Q/N tables.
    pub fn table(&self) -> &ValueTable {
        &self.table
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &McConfig {
        &self.config
    }

    /// Export agent state for checkpointing.
    pub fn export_state(&self) -> AgentSnapshot {
        AgentSnapshot {
            config: self.config.clone(),
            transformer: self.transformer.name().to_string(),
            table: self.table.export(),
        }
    }

    /// Import agent state from a checkpoint, replacing tables and config.
    pub fn import_state(&mut self, snapshot: AgentSnapshot) {
        self.config = snapshot.config;
        self.table.import(snapshot.table);
    }

    /// Save the agent's entire state to a JSON file.
    ///
    /// I/O and serialization failures propagate uncaught; there is no retry
    /// policy.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), PersistError> {
        let file = File::create(path)?;
        serde_json::to_writer(BufWriter::new(file), &self.export_state())?;
        Ok(())
    }

    /// Restore an agent from a file written by [`McAgent::save`].
    ///
    /// The transformer is code, not data, so the caller supplies it; the
    /// snapshot records its name for a sanity check. The restored agent's
    /// Q/N tables are element-wise equal to the saved agent's, giving
    /// identical `step`/`update` behavior.
    pub fn load<P: AsRef<Path>>(
        path: P,
        transformer: Box<dyn StateTransformer<G>>,
    ) -> Result<Self, PersistError> {
        let file = File::open(path)?;
        let snapshot: AgentSnapshot = serde_json::from_reader(BufReader::new(file))?;

        if snapshot.transformer != transformer.name() {
            return Err(PersistError::TransformerMismatch {
                saved: snapshot.transformer,
                given: transformer.name().to_string(),
            });
        }

        let mut agent = Self::new(snapshot.config.clone(), transformer);
        agent.import_state(snapshot);
        Ok(agent)
    }
}

/// Serializable agent state for checkpointing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSnapshot {
    /// Agent configuration.
    pub config: McConfig,
    /// Name of the state transformer the tables were built with.
    pub transformer: String,
    /// Q/N table export.
    pub table: TableExport,
}

/// Errors from saving or loading agent state.
#[derive(Debug)]
pub enum PersistError {
    /// Filesystem error.
    Io(std::io::Error),
    /// Malformed or incompatible snapshot.
    Serde(serde_json::Error),
    /// The snapshot was built with a different state transformer; its keys
    /// would be meaningless under the one supplied.
    TransformerMismatch {
        /// Transformer name recorded in the snapshot.
        saved: String,
        /// Transformer name supplied to `load`.
        given: String,
    },
}

impl From<std::io::Error> for PersistError {
    fn from(err: std::io::Error) -> Self {
        PersistError::Io(err)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(err: serde_json::Error) -> Self {
        PersistError::Serde(err)
    }
}

impl std::fmt::Display for PersistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistError::Io(err) => write!(f, "agent persistence I/O error: {}", err),
            PersistError::Serde(err) => write!(f, "agent snapshot parse error: {}", err),
            PersistError::TransformerMismatch { saved, given } => write!(
                f,
                "agent snapshot was built with transformer '{}', not '{}'",
                saved, given
            ),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistError::Io(err) => Some(err),
            PersistError::Serde(err) => Some(err),
            PersistError::TransformerMismatch { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::leduc::{LeducAction, LeducGame};
    use crate::mc::abstraction::LeducAbstraction;
    use rustc_hash::FxHashMap as Counts;

    fn agent(config: McConfig) -> McAgent<LeducGame> {
        McAgent::new(config, Box::new(LeducAbstraction::V1))
    }

    fn tr(key: &str, action: LeducAction, reward: f64) -> Transition<LeducAction> {
        Transition {
            key: key.to_string(),
            action,
            reward,
        }
    }

    #[test]
    fn test_running_mean_across_episodes() {
        let mut a = agent(McConfig::default().with_gamma(1.0).with_seed(1));

        // Same pair fed 5.0 then 3.0, one visit per episode.
        a.update(&[vec![tr("s", LeducAction::Call, 5.0)]]);
        a.update(&[vec![tr("s", LeducAction::Call, 3.0)]]);

        assert_eq!(a.table().q_or_default("s", "c"), 4.0);
        assert_eq!(a.table().visits("s", "c"), 2);
    }

    #[test]
    fn test_discounted_return_accumulation() {
        let mut a = agent(McConfig::default().with_gamma(0.5).with_seed(1));

        // Two steps, terminal payoff 8: G at the first step is 0 + 0.5*8.
        a.update(&[vec![
            tr("s1", LeducAction::Call, 0.0),
            tr("s2", LeducAction::Call, 8.0),
        ]]);

        assert_eq!(a.table().q_or_default("s2", "c"), 8.0);
        assert_eq!(a.table().q_or_default("s1", "c"), 4.0);
    }

    #[test]
    fn test_first_visit_updates_first_occurrence_only() {
        let mut a = agent(
            McConfig::default()
                .with_gamma(1.0)
                .with_visit(VisitKind::FirstVisit)
                .with_seed(1),
        );

        // (s, Call) occurs twice with different returns from each point:
        // G(t=1) = 6, G(t=0) = 4 + 6 = 10.
        a.update(&[vec![
            tr("s", LeducAction::Call, 4.0),
            tr("s", LeducAction::Call, 6.0),
        ]]);

        // Only the first chronological occurrence updates; N stays at 1.
        assert_eq!(a.table().visits("s", "c"), 1);
        assert_eq!(a.table().q_or_default("s", "c"), 10.0);
    }

    #[test]
    fn test_every_visit_updates_all_occurrences() {
        let mut a = agent(
            McConfig::default()
                .with_gamma(1.0)
                .with_visit(VisitKind::EveryVisit)
                .with_seed(1),
        );

        a.update(&[vec![
            tr("s", LeducAction::Call, 4.0),
            tr("s", LeducAction::Call, 6.0),
        ]]);

        // Both occurrences update: returns 10 and 6, mean 8, N = 2.
        assert_eq!(a.table().visits("s", "c"), 2);
        assert_eq!(a.table().q_or_default("s", "c"), 8.0);
    }

    #[test]
    fn test_greedy_step_stays_in_argmax_set() {
        let game = LeducGame::new();
        let state = game.deal(4, 0);
        let mut a = agent(McConfig::default().with_epsilon(0.0).with_seed(3));

        // Make Raise strictly best at P0's root key.
        let key = a.info_key(&game, &state, 0);
        a.table.record_return(&key, "r", 1.0);

        for _ in 0..50 {
            assert_eq!(a.step(&game, &state, false), LeducAction::Raise);
        }
    }

    #[test]
    fn test_epsilon_one_is_uniform_over_legal_actions() {
        let game = LeducGame::new();
        // Facing a raise: three legal actions.
        let state = game.apply_action(&game.deal(4, 0), &LeducAction::Raise);
        let mut a = agent(McConfig::default().with_epsilon(1.0).with_seed(5));

        let mut counts: Counts<String, u32> = Counts::default();
        let trials = 3000;
        for _ in 0..trials {
            let action = a.step(&game, &state, false);
            *counts.entry(action.label()).or_insert(0) += 1;
        }

        assert_eq!(counts.len(), 3);
        for (_, count) in counts {
            let freq = f64::from(count) / trials as f64;
            assert!(
                (freq - 1.0 / 3.0).abs() < 0.05,
                "epsilon=1 should explore uniformly, got frequency {}",
                freq
            );
        }
    }

    #[test]
    fn test_greedy_flag_suppresses_exploration() {
        let game = LeducGame::new();
        let state = game.deal(4, 0);
        let mut a = agent(McConfig::default().with_epsilon(1.0).with_seed(7));

        let key = a.info_key(&game, &state, 0);
        a.table.record_return(&key, "c", 2.0);

        // Even with epsilon = 1, greedy mode must pick the argmax.
        for _ in 0..50 {
            assert_eq!(a.step(&game, &state, true), LeducAction::Call);
        }
    }

    #[test]
    fn test_tie_break_is_randomized() {
        let game = LeducGame::new();
        let state = game.deal(4, 0);
        let mut a = agent(McConfig::default().with_epsilon(0.0).with_seed(11));

        // Both actions unseen: Q ties at 0.0, so both must appear.
        let mut counts: Counts<String, u32> = Counts::default();
        for _ in 0..200 {
            *counts.entry(a.step(&game, &state, false).label()).or_insert(0) += 1;
        }
        assert_eq!(counts.len(), 2, "tied actions must both be selected");
    }

    #[test]
    fn test_save_load_round_trip() {
        let mut a = agent(McConfig::default().with_gamma(1.0).with_seed(13));
        a.update(&[vec![
            tr("s1", LeducAction::Raise, 2.0),
            tr("s2", LeducAction::Call, -1.0),
        ]]);

        let dir = std::env::temp_dir().join("poker_search_poc_agent_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("agent.json");

        a.save(&path).unwrap();
        let restored: McAgent<LeducGame> =
            McAgent::load(&path, Box::new(LeducAbstraction::V1)).unwrap();

        assert_eq!(a.table(), restored.table());
        assert_eq!(a.config().gamma, restored.config().gamma);
    }

    #[test]
    fn test_load_rejects_wrong_transformer() {
        let a = agent(McConfig::default().with_seed(17));
        let dir = std::env::temp_dir().join("poker_search_poc_agent_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("agent_v1.json");
        a.save(&path).unwrap();

        let result: Result<McAgent<LeducGame>, _> =
            McAgent::load(&path, Box::new(LeducAbstraction::V2));
        assert!(matches!(
            result,
            Err(PersistError::TransformerMismatch { .. })
        ));
    }

    #[test]
    fn test_load_missing_file_propagates() {
        let result: Result<McAgent<LeducGame>, _> = McAgent::load(
            "/nonexistent/poker_search_poc/agent.json",
            Box::new(LeducAbstraction::V1),
        );
        assert!(matches!(result, Err(PersistError::Io(_))));
    }
}
