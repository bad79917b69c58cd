use serde::Deserialize;

#[derive(Deserialize)]
struct SyllableConfig {
    syllables: SyllableSection,
}

#[derive(Deserialize)]
struct SyllableSection {
    list: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SyllableConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[syllables] list is empty")]
    Empty,
    #[error("syllable must be non-empty ASCII lowercase: {0:?}")]
    InvalidSyllable(String),
    #[error("syllable segmenter already initialized")]
    AlreadyInitialized,
}

/// Parse TOML text into a sorted, deduplicated syllable list.
pub fn parse_syllable_toml(toml_str: &str) -> Result<Vec<String>, SyllableConfigError> {
    let config: SyllableConfig =
        toml::from_str(toml_str).map_err(|e| SyllableConfigError::Parse(e.to_string()))?;

    let mut list = config.syllables.list;
    if list.is_empty() {
        return Err(SyllableConfigError::Empty);
    }

    for syllable in &list {
        if syllable.is_empty() || !syllable.bytes().all(|b| b.is_ascii_lowercase()) {
            return Err(SyllableConfigError::InvalidSyllable(syllable.clone()));
        }
    }

    list.sort();
    list.dedup();
    Ok(list)
}
