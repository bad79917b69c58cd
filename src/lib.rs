//! Fuzzy dictionary matching over literal characters and pinyin syllables.
//!
//! ```no_run
//! use mohu::{MatchMode, Matcher};
//!
//! let mut matcher = Matcher::new();
//! matcher.build(["北京", "背景", "南京"]);
//! for hit in matcher.match_query("beijing", MatchMode::Hybrid, 0.0, Some(5)) {
//!     println!("{} {:.2}", hit.entry, hit.score);
//! }
//! ```

pub mod automaton;
pub mod confusion;
pub mod distance;
pub mod matcher;
pub mod phonetic;
pub mod settings;
pub mod token;
pub mod trace_init;

pub use automaton::Automaton;
pub use confusion::ConfusionTable;
pub use distance::{similarity, weighted_distance};
pub use matcher::{HybridWeights, MatchError, MatchMode, MatchResult, Matcher, MatcherConfig};
pub use phonetic::{PinyinTranscriber, Transcriber};
pub use token::Token;
