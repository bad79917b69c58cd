use std::collections::HashMap;

use super::MatchResult;

/// Share of the literal score in a hybrid score.
pub const HYBRID_LITERAL_WEIGHT: f64 = 0.6;
/// Share of the phonetic score in a hybrid score.
pub const HYBRID_PHONETIC_WEIGHT: f64 = 0.4;

/// Blend two ranked lists into one result per entry.
///
/// An entry missing from one list gets 0 from that side. Entries keep the
/// order they were first seen in (literal first) when scores tie.
pub(crate) fn merge(literal: Vec<MatchResult>, phonetic: Vec<MatchResult>) -> Vec<MatchResult> {
    let mut merged: Vec<MatchResult> = Vec::with_capacity(literal.len() + phonetic.len());
    let mut index: HashMap<String, usize> = HashMap::new();

    let weighted = literal
        .into_iter()
        .map(|r| (r, HYBRID_LITERAL_WEIGHT))
        .chain(phonetic.into_iter().map(|r| (r, HYBRID_PHONETIC_WEIGHT)));

    for (result, weight) in weighted {
        let contribution = result.score * weight;
        match index.get(&result.entry) {
            Some(&i) => merged[i].score += contribution,
            None => {
                index.insert(result.entry.clone(), merged.len());
                merged.push(MatchResult {
                    entry: result.entry,
                    score: contribution,
                });
            }
        }
    }

    super::sort_by_score(&mut merged);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(entry: &str, score: f64) -> MatchResult {
        MatchResult {
            entry: entry.to_string(),
            score,
        }
    }

    #[test]
    fn both_sides_are_summed() {
        let merged = merge(vec![r("北京", 1.0)], vec![r("北京", 1.0)]);
        assert_eq!(merged.len(), 1);
        assert!((merged[0].score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn missing_side_contributes_zero() {
        let merged = merge(vec![r("apple", 1.0)], vec![r("背景", 1.0)]);
        assert_eq!(merged[0].entry, "apple");
        assert!((merged[0].score - 0.6).abs() < 1e-12);
        assert_eq!(merged[1].entry, "背景");
        assert!((merged[1].score - 0.4).abs() < 1e-12);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let merged = merge(vec![r("b", 0.5), r("a", 0.5)], vec![]);
        let entries: Vec<&str> = merged.iter().map(|m| m.entry.as_str()).collect();
        assert_eq!(entries, vec!["b", "a"]);
    }

    #[test]
    fn empty_inputs() {
        assert!(merge(vec![], vec![]).is_empty());
    }
}
