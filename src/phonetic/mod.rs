//! Phonetic transcription of dictionary entries and queries.
//!
//! The matcher only depends on the [`Transcriber`] trait. The default
//! [`PinyinTranscriber`] turns Chinese characters into pinyin syllables and
//! splits all-lowercase ASCII input (already romanized) into syllables with
//! a greedy longest match over an embedded vocabulary.

mod config;
mod pinyin;
mod segment;
mod table;

pub use self::pinyin::PinyinTranscriber;
pub use config::{parse_syllable_toml, SyllableConfigError};
pub use segment::SyllableSegmenter;

/// Converts text into a sequence of phonetic tokens.
pub trait Transcriber {
    /// Returns an empty vector when nothing can be transcribed.
    fn transcribe(&self, text: &str, ignore_tones: bool) -> Vec<String>;
}
