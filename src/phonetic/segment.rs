use std::sync::OnceLock;

use super::config::{parse_syllable_toml, SyllableConfigError};
use super::table::DEFAULT_TOML;
use crate::automaton::Automaton;

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Greedy longest-match splitter for romanized pinyin.
pub struct SyllableSegmenter {
    trie: Automaton<char>,
    vocabulary: Vec<String>,
}

impl SyllableSegmenter {
    /// Set a custom syllable TOML before first `global()` call.
    pub fn init_custom(toml_content: String) -> Result<(), SyllableConfigError> {
        parse_syllable_toml(&toml_content)?;
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| SyllableConfigError::AlreadyInitialized)
    }

    /// Get or initialize the global singleton.
    pub fn global() -> &'static SyllableSegmenter {
        static INSTANCE: OnceLock<SyllableSegmenter> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let toml_str = CUSTOM_TOML
                .get()
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_TOML);
            let vocabulary = parse_syllable_toml(toml_str).expect("syllable TOML must be valid");
            Self::from_vocabulary(vocabulary)
        })
    }

    pub fn from_vocabulary(vocabulary: Vec<String>) -> Self {
        let mut trie = Automaton::new();
        for syllable in &vocabulary {
            let chars: Vec<char> = syllable.chars().collect();
            trie.insert(syllable, &chars);
        }
        Self { trie, vocabulary }
    }

    /// Sorted syllable list.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Split `text` into syllables, always taking the longest one that
    /// starts at the current position. A character that starts no syllable
    /// becomes a token on its own.
    pub fn segment(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let mut tokens = Vec::new();
        let mut pos = 0;

        while pos < chars.len() {
            let len = self.longest_at(&chars[pos..]).unwrap_or(1);
            tokens.push(chars[pos..pos + len].iter().collect());
            pos += len;
        }
        tokens
    }

    fn longest_at(&self, rest: &[char]) -> Option<usize> {
        let mut node = self.trie.root();
        let mut longest = None;
        for (i, c) in rest.iter().enumerate() {
            match self.trie.child(node, c) {
                Some(next) => node = next,
                None => break,
            }
            if self.trie.output(node).is_some_and(|o| !o.is_empty()) {
                longest = Some(i + 1);
            }
        }
        longest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(text: &str) -> Vec<String> {
        SyllableSegmenter::global().segment(text)
    }

    #[test]
    fn common_words() {
        assert_eq!(seg("pingguo"), vec!["ping", "guo"]);
        assert_eq!(seg("beijing"), vec!["bei", "jing"]);
        assert_eq!(seg("shanghai"), vec!["shang", "hai"]);
        assert_eq!(seg("xiangjiao"), vec!["xiang", "jiao"]);
        assert_eq!(seg("guangzhou"), vec!["guang", "zhou"]);
        assert_eq!(seg("shenzhen"), vec!["shen", "zhen"]);
    }

    #[test]
    fn single_syllable() {
        assert_eq!(seg("zhuang"), vec!["zhuang"]);
        assert_eq!(seg("a"), vec!["a"]);
    }

    #[test]
    fn unmatched_characters_stand_alone() {
        assert_eq!(seg("vbei"), vec!["v", "bei"]);
        assert_eq!(seg("iii"), vec!["i", "i", "i"]);
    }

    #[test]
    fn empty_input() {
        assert!(seg("").is_empty());
    }

    #[test]
    fn custom_vocabulary() {
        let s = SyllableSegmenter::from_vocabulary(vec!["ab".into(), "abc".into(), "d".into()]);
        assert_eq!(s.segment("abcdab"), vec!["abc", "d", "ab"]);
        assert_eq!(s.segment("abx"), vec!["ab", "x"]);
        assert_eq!(s.vocabulary().len(), 3);
    }

    #[test]
    fn init_custom_rejects_invalid_toml() {
        let err = SyllableSegmenter::init_custom("[syllables]\nlist = []\n".into()).unwrap_err();
        assert!(matches!(err, SyllableConfigError::Empty));
    }

    #[test]
    fn global_vocabulary_is_sorted() {
        let v = SyllableSegmenter::global().vocabulary();
        assert!(v.windows(2).all(|w| w[0] < w[1]));
    }
}
