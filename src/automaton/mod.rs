//! Arena-backed token trie with failure links and bounded-edit-distance retrieval.
//!
//! Nodes live in a `Vec` owned by the automaton and refer to each other by
//! index. Index 0 is the root. The failure link of every node is computed by
//! [`Automaton::finalize`] for exact streaming scans; fuzzy retrieval walks
//! the goto edges only and never reads it.

mod search;

use std::collections::{BTreeSet, HashMap, VecDeque};

use crate::token::Token;

/// Index of a node inside an [`Automaton`].
pub type NodeId = usize;

const ROOT: NodeId = 0;

#[derive(Debug, Clone)]
struct Node<T: Token> {
    children: HashMap<T, NodeId>,
    /// Entries whose full sequence ends exactly here.
    output: BTreeSet<String>,
    fail: NodeId,
    depth: usize,
}

impl<T: Token> Node<T> {
    fn new(depth: usize) -> Self {
        Self {
            children: HashMap::new(),
            output: BTreeSet::new(),
            fail: ROOT,
            depth,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Automaton<T: Token> {
    nodes: Vec<Node<T>>,
    finalized: bool,
}

impl<T: Token> Default for Automaton<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Token> Automaton<T> {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(0)],
            finalized: false,
        }
    }

    /// Record `entry` at the node reached by `sequence`, creating nodes as needed.
    ///
    /// An empty sequence is ignored. Distinct entries with the same sequence
    /// share one node and end up in the same output set.
    pub fn insert(&mut self, entry: &str, sequence: &[T]) {
        if sequence.is_empty() {
            return;
        }

        let mut node = ROOT;
        for token in sequence {
            node = match self.nodes[node].children.get(token) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len();
                    let depth = self.nodes[node].depth + 1;
                    self.nodes.push(Node::new(depth));
                    self.nodes[node].children.insert(token.clone(), child);
                    child
                }
            };
        }

        if self.nodes[node].output.insert(entry.to_string()) {
            self.finalized = false;
        }
    }

    /// Compute failure links breadth-first.
    ///
    /// Depth-1 nodes fail to the root. A deeper node reached by `t` fails to
    /// the `t`-child of the nearest node on its parent's failure chain that
    /// has one, or to the root.
    pub fn finalize(&mut self) {
        let mut queue: VecDeque<NodeId> = VecDeque::new();
        let first_level: Vec<NodeId> = self.nodes[ROOT].children.values().copied().collect();
        for child in first_level {
            self.nodes[child].fail = ROOT;
            queue.push_back(child);
        }

        while let Some(current) = queue.pop_front() {
            let edges: Vec<(T, NodeId)> = self.nodes[current]
                .children
                .iter()
                .map(|(t, &c)| (t.clone(), c))
                .collect();

            for (token, child) in edges {
                queue.push_back(child);
                let mut candidate = self.nodes[current].fail;
                let fail = loop {
                    if let Some(&next) = self.nodes[candidate].children.get(&token) {
                        break next;
                    }
                    if candidate == ROOT {
                        break ROOT;
                    }
                    candidate = self.nodes[candidate].fail;
                };
                self.nodes[child].fail = fail;
            }
        }

        self.finalized = true;
    }

    /// Whether failure links reflect every insertion so far.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub fn root(&self) -> NodeId {
        ROOT
    }

    pub fn child(&self, node: NodeId, token: &T) -> Option<NodeId> {
        self.nodes.get(node)?.children.get(token).copied()
    }

    pub fn children(&self, node: NodeId) -> impl Iterator<Item = (&T, NodeId)> {
        self.nodes
            .get(node)
            .into_iter()
            .flat_map(|n| n.children.iter().map(|(t, &c)| (t, c)))
    }

    /// Failure link of `node`. The root fails to itself.
    pub fn fail(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).map(|n| n.fail)
    }

    pub fn output(&self, node: NodeId) -> Option<&BTreeSet<String>> {
        self.nodes.get(node).map(|n| &n.output)
    }

    pub fn depth(&self, node: NodeId) -> Option<usize> {
        self.nodes.get(node).map(|n| n.depth)
    }

    /// Follow `sequence` from the root.
    pub fn walk(&self, sequence: &[T]) -> Option<NodeId> {
        sequence
            .iter()
            .try_fold(ROOT, |node, token| self.child(node, token))
    }

    /// Entries indexed under exactly `sequence`.
    pub fn entries_at(&self, sequence: &[T]) -> Option<&BTreeSet<String>> {
        let node = self.walk(sequence)?;
        let output = &self.nodes[node].output;
        (!output.is_empty()).then_some(output)
    }

    /// Total number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// True when nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }
}
