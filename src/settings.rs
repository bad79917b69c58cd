//! Global settings loaded from TOML, following the same OnceLock pattern as the syllable table.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::path::PathBuf;
use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub matching: MatchingSettings,
    pub hybrid: HybridSettings,
    #[serde(default)]
    pub confusion: ConfusionSettings,
    #[serde(default)]
    pub phonetic: PhoneticSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    pub similarity_threshold: f64,
    pub max_distance: usize,
    pub ignore_tones: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HybridSettings {
    pub literal_weight: f64,
    pub phonetic_weight: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfusionSettings {
    pub literal_path: Option<PathBuf>,
    pub phonetic_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhoneticSettings {
    #[serde(default)]
    pub fuzzy_rules: Vec<String>,
    #[serde(default = "default_fuzzy_cost")]
    pub fuzzy_cost: f64,
}

impl Default for PhoneticSettings {
    fn default() -> Self {
        Self {
            fuzzy_rules: Vec::new(),
            fuzzy_cost: default_fuzzy_cost(),
        }
    }
}

fn default_fuzzy_cost() -> f64 {
    0.3
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_unit_interval {
        ($section:ident . $field:ident) => {
            if !(0.0..=1.0).contains(&s.$section.$field) {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be within [0, 1]".to_string(),
                });
            }
        };
    }
    macro_rules! check_non_negative {
        ($section:ident . $field:ident) => {
            if s.$section.$field.is_nan() || s.$section.$field < 0.0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be non-negative".to_string(),
                });
            }
        };
    }

    check_unit_interval!(matching.similarity_threshold);
    check_non_negative!(hybrid.literal_weight);
    check_non_negative!(hybrid.phonetic_weight);
    check_unit_interval!(phonetic.fuzzy_cost);

    for rule in &s.phonetic.fuzzy_rules {
        let valid = rule
            .split_once('=')
            .is_some_and(|(a, b)| !a.trim().is_empty() && !b.trim().is_empty());
        if !valid {
            return Err(SettingsError::InvalidValue {
                field: "phonetic.fuzzy_rules".to_string(),
                reason: format!("rule {rule:?} must look like \"zh=z\""),
            });
        }
    }

    Ok(())
}
