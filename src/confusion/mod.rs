//! Directional substitution-cost tables.
//!
//! A table maps `from → (to → cost)`. Costs are clamped into `[0, 1]` on
//! lookup, so a weighted substitution is never dearer than an unweighted one.
//! Loading from disk never fails: a missing or corrupt file degrades to an
//! empty table (plain edit distance).

mod fuzzy;

pub use fuzzy::{parse_fuzzy_rule, syllable_fuzzy_table};

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, warn};

use crate::token::Token;

/// Cost of a substitution the table knows nothing about.
pub const DEFAULT_SUBSTITUTION_COST: f64 = 1.0;

#[derive(Debug, thiserror::Error)]
pub enum ConfusionError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfusionTable<T: Token> {
    costs: HashMap<T, HashMap<T, f64>>,
}

impl<T: Token> Default for ConfusionTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Token> ConfusionTable<T> {
    pub fn new() -> Self {
        Self {
            costs: HashMap::new(),
        }
    }

    /// Set the cost of substituting `from` with `to`. Only this direction is affected.
    pub fn insert(&mut self, from: T, to: T, cost: f64) {
        self.costs.entry(from).or_default().insert(to, cost);
    }

    /// Cost of substituting `from` with `to`.
    ///
    /// Equal tokens cost 0. Unknown pairs cost [`DEFAULT_SUBSTITUTION_COST`].
    pub fn cost(&self, from: &T, to: &T) -> f64 {
        if from == to {
            return 0.0;
        }
        let raw = self
            .costs
            .get(from)
            .and_then(|row| row.get(to))
            .copied()
            .unwrap_or(DEFAULT_SUBSTITUTION_COST);
        if raw.is_nan() {
            return DEFAULT_SUBSTITUTION_COST;
        }
        raw.clamp(0.0, DEFAULT_SUBSTITUTION_COST)
    }

    pub fn is_empty(&self) -> bool {
        self.costs.values().all(|row| row.is_empty())
    }

    /// Number of `(from, to)` pairs with an explicit cost.
    pub fn len(&self) -> usize {
        self.costs.values().map(|row| row.len()).sum()
    }

    /// Merge `other` into this table. Where both define a pair the lower cost wins.
    pub fn merge_min(&mut self, other: &ConfusionTable<T>) {
        for (from, row) in &other.costs {
            let target = self.costs.entry(from.clone()).or_default();
            for (to, &cost) in row {
                target
                    .entry(to.clone())
                    .and_modify(|c| *c = c.min(cost))
                    .or_insert(cost);
            }
        }
    }

    /// Parse a JSON object of the form `{"a": {"b": 0.5}}`.
    ///
    /// Keys that cannot be represented as `T` are skipped.
    pub fn from_json(json: &str) -> Result<Self, ConfusionError> {
        let raw: HashMap<String, HashMap<String, f64>> = serde_json::from_str(json)?;
        let mut table = Self::new();
        for (from_key, row) in raw {
            let Some(from) = T::from_key(&from_key) else {
                debug!(key = %from_key, "skipping confusion key");
                continue;
            };
            for (to_key, cost) in row {
                let Some(to) = T::from_key(&to_key) else {
                    debug!(key = %to_key, "skipping confusion key");
                    continue;
                };
                table.insert(from.clone(), to, cost);
            }
        }
        Ok(table)
    }

    /// Read and parse a JSON table from `path`.
    pub fn try_load(path: &Path) -> Result<Self, ConfusionError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Like [`try_load`](Self::try_load), but any failure yields an empty table.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(table) => {
                debug!(path = %path.display(), pairs = table.len(), "loaded confusion table");
                table
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "confusion table unavailable, using unweighted costs");
                Self::new()
            }
        }
    }
}
