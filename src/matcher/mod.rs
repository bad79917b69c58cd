//! Dictionary matcher over a literal index and a phonetic index.
//!
//! Every entry is indexed twice: once by its characters and once by its
//! phonetic transcription. A query is tokenized the same two ways, candidate
//! entries are retrieved from the automatons within `max_distance` edits, and
//! the survivors are re-ranked with the weighted similarity score.
//!
//! The matcher is not internally synchronized. Mutation takes `&mut self`;
//! share it across threads behind a lock or as an immutable `Arc` snapshot.

mod hybrid;
mod mode;

pub use hybrid::{HYBRID_LITERAL_WEIGHT, HYBRID_PHONETIC_WEIGHT};
pub use mode::MatchMode;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::{debug, debug_span};

use crate::automaton::Automaton;
use crate::confusion::{syllable_fuzzy_table, ConfusionTable};
use crate::distance::similarity;
use crate::phonetic::{PinyinTranscriber, SyllableSegmenter, Transcriber};
use crate::settings::{settings, Settings};
use crate::token::{literal_tokens, Token};

#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("invalid match mode {0:?}: expected literal, phonetic or hybrid")]
    InvalidMode(String),
}

/// One ranked dictionary entry.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub entry: String,
    pub score: f64,
}

/// Configured blend of literal and phonetic scores.
///
/// Stored for callers; hybrid ranking itself uses
/// [`HYBRID_LITERAL_WEIGHT`] and [`HYBRID_PHONETIC_WEIGHT`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HybridWeights {
    pub literal: f64,
    pub phonetic: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatcherConfig {
    /// Threshold applied by [`Matcher::match_default`].
    pub similarity_threshold: f64,
    /// Edit budget for candidate retrieval from either automaton.
    pub max_distance: usize,
    pub ignore_tones: bool,
    pub hybrid_weights: HybridWeights,
    pub literal_confusion_path: Option<PathBuf>,
    pub phonetic_confusion_path: Option<PathBuf>,
    /// Fuzzy pinyin rules such as `"zh=z"`, folded into the phonetic table.
    pub fuzzy_rules: Vec<String>,
    pub fuzzy_cost: f64,
}

impl MatcherConfig {
    pub fn from_settings(s: &Settings) -> Self {
        Self {
            similarity_threshold: s.matching.similarity_threshold,
            max_distance: s.matching.max_distance,
            ignore_tones: s.matching.ignore_tones,
            hybrid_weights: HybridWeights {
                literal: s.hybrid.literal_weight,
                phonetic: s.hybrid.phonetic_weight,
            },
            literal_confusion_path: s.confusion.literal_path.clone(),
            phonetic_confusion_path: s.confusion.phonetic_path.clone(),
            fuzzy_rules: s.phonetic.fuzzy_rules.clone(),
            fuzzy_cost: s.phonetic.fuzzy_cost,
        }
    }
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self::from_settings(settings())
    }
}

pub struct Matcher<P: Transcriber = PinyinTranscriber> {
    config: MatcherConfig,
    transcriber: P,
    entries: Vec<String>,
    literal_index: Option<Automaton<char>>,
    phonetic_index: Option<Automaton<String>>,
    literal_table: OnceLock<ConfusionTable<char>>,
    phonetic_table: OnceLock<ConfusionTable<String>>,
}

impl Default for Matcher<PinyinTranscriber> {
    fn default() -> Self {
        Self::new()
    }
}

impl Matcher<PinyinTranscriber> {
    pub fn new() -> Self {
        Self::with_config(MatcherConfig::default())
    }

    pub fn with_config(config: MatcherConfig) -> Self {
        Self::with_transcriber(config, PinyinTranscriber::new())
    }
}

impl<P: Transcriber> Matcher<P> {
    pub fn with_transcriber(config: MatcherConfig, transcriber: P) -> Self {
        Self {
            config,
            transcriber,
            entries: Vec::new(),
            literal_index: None,
            phonetic_index: None,
            literal_table: OnceLock::new(),
            phonetic_table: OnceLock::new(),
        }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    pub fn hybrid_weights(&self) -> HybridWeights {
        self.config.hybrid_weights
    }

    /// Replace the dictionary with `entries` and rebuild both indexes.
    ///
    /// Empty strings and duplicates are dropped, keeping the first occurrence
    /// of each entry. Entries whose transcription is empty are left out of
    /// the phonetic index only.
    pub fn build<I, S>(&mut self, entries: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let deduped: Vec<String> = entries
            .into_iter()
            .map(Into::into)
            .filter(|e: &String| !e.is_empty() && seen.insert(e.clone()))
            .collect();
        self.entries = deduped;
        self.rebuild();
    }

    fn rebuild(&mut self) {
        let _span = debug_span!("build", entries = self.entries.len()).entered();

        if self.entries.is_empty() {
            self.literal_index = None;
            self.phonetic_index = None;
            debug!("dictionary empty, indexes cleared");
            return;
        }

        let mut literal = Automaton::new();
        let mut phonetic = Automaton::new();
        let mut skipped = 0usize;
        for entry in &self.entries {
            literal.insert(entry, &literal_tokens(entry));
            let syllables = self.transcriber.transcribe(entry, self.config.ignore_tones);
            if syllables.is_empty() {
                skipped += 1;
                continue;
            }
            phonetic.insert(entry, &syllables);
        }
        literal.finalize();
        phonetic.finalize();

        debug!(
            literal_nodes = literal.node_count(),
            phonetic_nodes = phonetic.node_count(),
            skipped,
            "indexes built"
        );
        self.literal_index = Some(literal);
        self.phonetic_index = Some(phonetic);
    }

    /// Entries within `max_distance` character edits of `query`, best first.
    pub fn match_literal(&self, query: &str) -> Vec<MatchResult> {
        let _span = debug_span!("match_literal", query).entered();
        let Some(index) = &self.literal_index else {
            return Vec::new();
        };
        let tokens = literal_tokens(query);
        if tokens.is_empty() {
            return Vec::new();
        }

        let candidates = index.search_fuzzy(&tokens, self.config.max_distance);
        if candidates.is_empty() {
            return Vec::new();
        }
        let table = self.literal_table();

        let mut results: Vec<MatchResult> = candidates
            .into_iter()
            .map(|entry| {
                let score = similarity(&tokens, &literal_tokens(&entry), Some(table));
                MatchResult { entry, score }
            })
            .collect();
        sort_by_score(&mut results);
        debug!(result_count = results.len());
        results
    }

    /// Entries within `max_distance` syllable edits of the transcribed `query`, best first.
    ///
    /// Candidates are transcribed again for scoring rather than cached.
    pub fn match_phonetic(&self, query: &str) -> Vec<MatchResult> {
        let _span = debug_span!("match_phonetic", query).entered();
        let Some(index) = &self.phonetic_index else {
            return Vec::new();
        };
        let syllables = self.transcriber.transcribe(query, self.config.ignore_tones);
        if syllables.is_empty() {
            return Vec::new();
        }

        let candidates = index.search_fuzzy(&syllables, self.config.max_distance);
        if candidates.is_empty() {
            return Vec::new();
        }
        let table = self.phonetic_table();

        let mut results = Vec::with_capacity(candidates.len());
        for entry in candidates {
            let entry_syllables = self.transcriber.transcribe(&entry, self.config.ignore_tones);
            if entry_syllables.is_empty() {
                continue;
            }
            let score = similarity(&syllables, &entry_syllables, Some(table));
            results.push(MatchResult { entry, score });
        }
        sort_by_score(&mut results);
        debug!(result_count = results.len());
        results
    }

    /// Rank entries for `query` in `mode`.
    ///
    /// Results scoring below `threshold` are dropped when `threshold > 0`.
    /// `limit` caps the result count; `Some(0)` yields nothing.
    pub fn match_query(
        &self,
        query: &str,
        mode: MatchMode,
        threshold: f64,
        limit: Option<usize>,
    ) -> Vec<MatchResult> {
        let _span = debug_span!("match_query", query, %mode, threshold, ?limit).entered();
        if query.is_empty() || limit == Some(0) {
            return Vec::new();
        }

        let mut results = match mode {
            MatchMode::Literal => self.match_literal(query),
            MatchMode::Phonetic => self.match_phonetic(query),
            MatchMode::Hybrid => hybrid::merge(self.match_literal(query), self.match_phonetic(query)),
        };

        if threshold > 0.0 {
            results.retain(|r| r.score >= threshold);
        }
        if let Some(limit) = limit {
            results.truncate(limit);
        }
        results
    }

    /// [`match_query`](Self::match_query) with the configured similarity threshold and no limit.
    pub fn match_default(&self, query: &str, mode: MatchMode) -> Vec<MatchResult> {
        self.match_query(query, mode, self.config.similarity_threshold, None)
    }

    /// Other dictionary entries with exactly the same transcription as `entry`.
    pub fn homophones(&self, entry: &str) -> Vec<String> {
        let Some(index) = &self.phonetic_index else {
            return Vec::new();
        };
        let syllables = self.transcriber.transcribe(entry, self.config.ignore_tones);
        index
            .entries_at(&syllables)
            .map(|set| set.iter().filter(|e| *e != entry).cloned().collect())
            .unwrap_or_default()
    }

    /// Append `entry` and rebuild. Returns false for an empty or known entry.
    ///
    /// Each call rebuilds both indexes from scratch, which is linear in the
    /// dictionary size.
    pub fn add_entry(&mut self, entry: &str) -> bool {
        if entry.is_empty() || self.entries.iter().any(|e| e == entry) {
            return false;
        }
        self.entries.push(entry.to_string());
        self.rebuild();
        true
    }

    /// Remove `entry` and rebuild. Returns false for an empty or unknown entry.
    ///
    /// Same full-rebuild cost as [`add_entry`](Self::add_entry).
    pub fn remove_entry(&mut self, entry: &str) -> bool {
        if entry.is_empty() {
            return false;
        }
        let Some(pos) = self.entries.iter().position(|e| e == entry) else {
            return false;
        };
        self.entries.remove(pos);
        self.rebuild();
        true
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Owned copy of the dictionary in insertion order.
    pub fn entries(&self) -> Vec<String> {
        self.entries.clone()
    }

    fn literal_table(&self) -> &ConfusionTable<char> {
        self.literal_table
            .get_or_init(|| load_table(self.config.literal_confusion_path.as_deref()))
    }

    fn phonetic_table(&self) -> &ConfusionTable<String> {
        self.phonetic_table.get_or_init(|| {
            let mut table = load_table(self.config.phonetic_confusion_path.as_deref());
            if !self.config.fuzzy_rules.is_empty() {
                let fuzzy = syllable_fuzzy_table(
                    self.config.fuzzy_rules.as_slice(),
                    SyllableSegmenter::global().vocabulary(),
                    self.config.fuzzy_cost,
                );
                debug!(pairs = fuzzy.len(), "fuzzy pinyin rules expanded");
                table.merge_min(&fuzzy);
            }
            table
        })
    }
}

fn load_table<T: Token>(path: Option<&Path>) -> ConfusionTable<T> {
    match path {
        Some(path) => ConfusionTable::load(path),
        None => ConfusionTable::new(),
    }
}

/// Stable sort, best score first.
fn sort_by_score(results: &mut [MatchResult]) {
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
}
