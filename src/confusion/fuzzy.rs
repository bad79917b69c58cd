//! Fuzzy pinyin rules (`zh=z`, `l=n`, `in=ing`) expanded into syllable-level costs.
//!
//! A rule applies to a syllable when one side is its initial (a prefix) or
//! its final (a suffix). Rewriting that part with the other side must yield a
//! syllable in the vocabulary for the pair to be recorded. Rules are
//! symmetric.

use super::ConfusionTable;

/// Split `"a=b"` into its trimmed, lowercased halves.
pub fn parse_fuzzy_rule(rule: &str) -> Option<(String, String)> {
    let (a, b) = rule.split_once('=')?;
    let a = a.trim().to_ascii_lowercase();
    let b = b.trim().to_ascii_lowercase();
    if a.is_empty() || b.is_empty() || a == b {
        return None;
    }
    Some((a, b))
}

/// Build a symmetric syllable table from fuzzy rules over `vocabulary`.
pub fn syllable_fuzzy_table<S: AsRef<str>>(
    rules: &[S],
    vocabulary: &[String],
    cost: f64,
) -> ConfusionTable<String> {
    let mut table = ConfusionTable::new();
    let pairs: Vec<(String, String)> = rules
        .iter()
        .filter_map(|r| parse_fuzzy_rule(r.as_ref()))
        .collect();
    if pairs.is_empty() {
        return table;
    }

    for syllable in vocabulary {
        for (a, b) in &pairs {
            for (from, to) in [(a, b), (b, a)] {
                for variant in rewrites(syllable, from, to) {
                    if variant != *syllable && vocabulary.contains(&variant) {
                        table.insert(syllable.clone(), variant.clone(), cost);
                        table.insert(variant, syllable.clone(), cost);
                    }
                }
            }
        }
    }
    table
}

fn rewrites(syllable: &str, from: &str, to: &str) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(rest) = syllable.strip_prefix(from) {
        // "zh" must not be read as "z" + "h...".
        if !(from.len() == 1 && is_retroflex_split(from, rest)) {
            out.push(format!("{to}{rest}"));
        }
    }
    if let Some(head) = syllable.strip_suffix(from) {
        if !head.is_empty() {
            out.push(format!("{head}{to}"));
        }
    }
    out
}

fn is_retroflex_split(initial: &str, rest: &str) -> bool {
    matches!(initial, "z" | "c" | "s") && rest.starts_with('h')
}
