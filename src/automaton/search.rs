use std::collections::BTreeSet;

use tracing::{debug, debug_span};

use super::{Automaton, NodeId, ROOT};
use crate::token::Token;

impl<T: Token> Automaton<T> {
    /// Every entry whose sequence is within unweighted Levenshtein distance
    /// `max_distance` of `query`.
    ///
    /// Walks the trie depth-first carrying one DP row per node, so entries
    /// sharing a prefix share the work for that prefix. A subtree is skipped
    /// once every value in its row exceeds `max_distance`. The walk keeps its
    /// pending nodes on a heap-allocated stack, so entry length is not
    /// limited by the thread's call stack.
    pub fn search_fuzzy(&self, query: &[T], max_distance: usize) -> BTreeSet<String> {
        let _span = debug_span!("search_fuzzy", query_len = query.len(), max_distance).entered();
        let mut results = BTreeSet::new();
        if query.is_empty() {
            return results;
        }

        let first_row: Vec<usize> = (0..=query.len()).collect();
        let mut pending: Vec<(NodeId, Vec<usize>)> = vec![(ROOT, first_row)];

        while let Some((node, row)) = pending.pop() {
            let current = &self.nodes[node];
            if node != ROOT && !current.output.is_empty() && row[query.len()] <= max_distance {
                results.extend(current.output.iter().cloned());
            }

            // Row values never decrease along a path, so nothing below can recover.
            if row.iter().min().is_some_and(|&m| m > max_distance) {
                continue;
            }

            for (token, &child) in &current.children {
                pending.push((child, next_row(&row, query, token, current.depth)));
            }
        }

        debug!(result_count = results.len());
        results
    }
}

/// DP row for the child reached from a node at `depth` via `token`.
fn next_row<T: Token>(row: &[usize], query: &[T], token: &T, depth: usize) -> Vec<usize> {
    let mut next = Vec::with_capacity(query.len() + 1);
    next.push(depth + 1);
    for i in 1..=query.len() {
        let deletion = row[i] + 1;
        let insertion = next[i - 1] + 1;
        let substitution = row[i - 1] + usize::from(query[i - 1] != *token);
        next.push(deletion.min(insertion).min(substitution));
    }
    next
}
