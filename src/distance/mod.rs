//! Edit distances over token sequences.
//!
//! `similarity` is the ranking score used by the matcher: a weighted
//! Levenshtein distance normalised by the longer sequence length.


use crate::confusion::ConfusionTable;
use crate::token::Token;

const INSERTION_COST: f64 = 1.0;
const DELETION_COST: f64 = 1.0;

/// Minimum-cost edit distance from `a` to `b`.
///
/// Insertions and deletions cost 1. Substituting `a[i]` with `b[j]` costs
/// `table.cost(a[i], b[j])`, or 1 for unequal tokens when no table is given.
pub fn weighted_distance<T: Token>(a: &[T], b: &[T], table: Option<&ConfusionTable<T>>) -> f64 {
    if a.is_empty() {
        return b.len() as f64 * INSERTION_COST;
    }
    if b.is_empty() {
        return a.len() as f64 * DELETION_COST;
    }

    let mut prev_row: Vec<f64> = (0..=b.len()).map(|j| j as f64 * INSERTION_COST).collect();
    let mut curr_row = vec![0.0; b.len() + 1];

    for (i, x) in a.iter().enumerate() {
        curr_row[0] = (i + 1) as f64 * DELETION_COST;
        for (j, y) in b.iter().enumerate() {
            let substitution = match table {
                Some(t) => t.cost(x, y),
                None if x == y => 0.0,
                None => 1.0,
            };
            curr_row[j + 1] = (prev_row[j + 1] + DELETION_COST)
                .min(curr_row[j] + INSERTION_COST)
                .min(prev_row[j] + substitution);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b.len()]
}

/// Normalised similarity in `[0, 1]`; 1 means identical.
///
/// Two empty sequences are identical. Otherwise
/// `max(0, 1 - distance / max(|a|, |b|))`.
pub fn similarity<T: Token>(a: &[T], b: &[T], table: Option<&ConfusionTable<T>>) -> f64 {
    let max_len = a.len().max(b.len());
    if max_len == 0 {
        return 1.0;
    }
    let distance = weighted_distance(a, b, table);
    (1.0 - distance / max_len as f64).max(0.0)
}

/// Unweighted Levenshtein distance.
pub fn levenshtein<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev_row: Vec<usize> = (0..=b.len()).collect();
    let mut curr_row = vec![0; b.len() + 1];

    for (i, x) in a.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, y) in b.iter().enumerate() {
            let cost = usize::from(x != y);
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b.len()]
}
