//! Tabular storage for Monte Carlo action values.
//!
//! This module provides the Q/N tables used by the MC control agents:
//! - **Q**: running-mean return estimate for each (info state, action)
//! - **N**: lifetime visit count for each (info state, action)
//!
//! Both are nested maps keyed by info-state key then action label. Misses
//! read as the defined defaults (`Q = 0.0`, `N = 0`) through explicit
//! accessors rather than auto-vivifying containers, so a lookup never
//! mutates the table.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Q/N tables for tabular Monte Carlo control.
///
/// Grows monotonically as (state, action) pairs are visited; never shrinks.
/// Invariants: `N >= 1` wherever `Q` has been updated, and the effective
/// step size of [`ValueTable::record_return`] is exactly `1/N`, making `Q`
/// the exact running mean of every return ever recorded for that pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueTable {
    /// Action-value estimates: info_key -> action label -> Q.
    q: FxHashMap<String, FxHashMap<String, f64>>,

    /// Visit counts: info_key -> action label -> N.
    n: FxHashMap<String, FxHashMap<String, u64>>,
}

impl ValueTable {
    /// Create new empty tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Q-value for a (state, action) pair; unvisited pairs read as 0.0.
    ///
    /// The 0.0 default is a neutral initialization, not a cached failure.
    pub fn q_or_default(&self, info_key: &str, action: &str) -> f64 {
        self.q
            .get(info_key)
            .and_then(|actions| actions.get(action))
            .copied()
            .unwrap_or(0.0)
    }

    /// Visit count for a (state, action) pair; unvisited pairs read as 0.
    pub fn visits(&self, info_key: &str, action: &str) -> u64 {
        self.n
            .get(info_key)
            .and_then(|actions| actions.get(action))
            .copied()
            .unwrap_or(0)
    }

    /// Record one observed return `g` for a (state, action) pair.
    ///
    /// Applies the incremental running mean: `N += 1; Q += (G - Q) / N`.
    /// `N` accumulates across the table's whole lifetime and is never reset
    /// per call or per episode, which is what makes `Q` an exact mean of
    /// all returns observed so far.
    pub fn record_return(&mut self, info_key: &str, action: &str, g: f64) {
        let n = self
            .n
            .entry(info_key.to_string())
            .or_default()
            .entry(action.to_string())
            .or_insert(0);
        *n += 1;
        let count = *n;

        let q = self
            .q
            .entry(info_key.to_string())
            .or_default()
            .entry(action.to_string())
            .or_insert(0.0);
        *q += (g - *q) / count as f64;
    }

    /// Number of info states with at least one recorded value.
    pub fn num_states(&self) -> usize {
        self.q.len()
    }

    /// Total number of (state, action) pairs visited.
    pub fn num_entries(&self) -> usize {
        self.q.values().map(|actions| actions.len()).sum()
    }

    /// Clear all stored data.
    pub fn clear(&mut self) {
        self.q.clear();
        self.n.clear();
    }

    /// Export tables to serializable format.
    pub fn export(&self) -> TableExport {
        TableExport {
            q: self.q.clone(),
            n: self.n.clone(),
        }
    }

    /// Import tables from serialized format, replacing current contents.
    pub fn import(&mut self, data: TableExport) {
        self.q = data.q;
        self.n = data.n;
    }
}

/// Serializable export format for the Q/N tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableExport {
    /// Action-value estimates.
    pub q: FxHashMap<String, FxHashMap<String, f64>>,
    /// Visit counts.
    pub n: FxHashMap<String, FxHashMap<String, u64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_on_miss() {
        let table = ValueTable::new();
        assert_eq!(table.q_or_default("nowhere", "c"), 0.0);
        assert_eq!(table.visits("nowhere", "c"), 0);
        // Reads never create entries.
        assert_eq!(table.num_states(), 0);
    }

    #[test]
    fn test_running_mean() {
        let mut table = ValueTable::new();
        table.record_return("s", "a", 5.0);
        table.record_return("s", "a", 3.0);

        assert_eq!(table.q_or_default("s", "a"), 4.0);
        assert_eq!(table.visits("s", "a"), 2);

        // A third return keeps the exact mean of all three.
        table.record_return("s", "a", 7.0);
        assert!((table.q_or_default("s", "a") - 5.0).abs() < 1e-12);
        assert_eq!(table.visits("s", "a"), 3);
    }

    #[test]
    fn test_entries_are_per_action() {
        let mut table = ValueTable::new();
        table.record_return("s", "a", 1.0);
        table.record_return("s", "b", -1.0);
        assert_eq!(table.num_states(), 1);
        assert_eq!(table.num_entries(), 2);
        assert_eq!(table.q_or_default("s", "a"), 1.0);
        assert_eq!(table.q_or_default("s", "b"), -1.0);
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut table = ValueTable::new();
        table.record_return("s1", "a", 2.5);
        table.record_return("s2", "b", -1.5);
        table.record_return("s2", "b", 0.5);

        let mut restored = ValueTable::new();
        restored.import(table.export());
        assert_eq!(table, restored);
    }
}
