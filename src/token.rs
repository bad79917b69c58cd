//! Token types indexed by the automatons and scored by the distance functions.

use std::fmt::Debug;
use std::hash::Hash;

/// An atomic, comparable unit of a sequence: a character for literal
/// matching or a syllable for phonetic matching.
pub trait Token: Eq + Hash + Clone + Debug {
    /// Parse a confusion-table key. Returns `None` when the key cannot
    /// represent a token of this type.
    fn from_key(key: &str) -> Option<Self>;
}

impl Token for char {
    fn from_key(key: &str) -> Option<Self> {
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

impl Token for String {
    fn from_key(key: &str) -> Option<Self> {
        if key.is_empty() {
            None
        } else {
            Some(key.to_string())
        }
    }
}

/// Split text into its literal token sequence.
pub fn literal_tokens(text: &str) -> Vec<char> {
    text.chars().collect()
}
