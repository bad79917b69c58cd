use std::fmt;
use std::str::FromStr;

use super::MatchError;

/// Which index a query is answered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchMode {
    /// Character-level edit distance.
    Literal,
    /// Syllable-level edit distance over the phonetic transcription.
    Phonetic,
    /// Both, blended per entry.
    #[default]
    Hybrid,
}

impl MatchMode {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchMode::Literal => "literal",
            MatchMode::Phonetic => "phonetic",
            MatchMode::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Names are case-sensitive. `char` and `pinyin` are accepted as aliases.
impl FromStr for MatchMode {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "literal" | "char" => Ok(MatchMode::Literal),
            "phonetic" | "pinyin" => Ok(MatchMode::Phonetic),
            "hybrid" => Ok(MatchMode::Hybrid),
            other => Err(MatchError::InvalidMode(other.to_string())),
        }
    }
}
