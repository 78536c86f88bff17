use derive_more::Display;
use getset::CopyGetters;

use utility::*;

use crate::offset_key::OffsetKey;

#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeIndex(u32);

impl NodeIndex {
    pub const ROOT: NodeIndex = NodeIndex(0);

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, CopyGetters)]
pub struct TrieNode {
    #[get_copy = "pub"]
    relative_square: WorldStep,
    /// One step closer to the root.  Not an owner, only for walking back up.
    #[get_copy = "pub"]
    parent: Option<NodeIndex>,
    children: [Option<NodeIndex>; NUM_KING_STEP_CODES],
    dependents: Vec<OffsetKey>,
}

impl TrieNode {
    fn new(relative_square: WorldStep, parent: Option<NodeIndex>) -> Self {
        TrieNode {
            relative_square,
            parent,
            children: [None; NUM_KING_STEP_CODES],
            dependents: vec![],
        }
    }
    pub fn child(&self, step: WorldStep) -> Option<NodeIndex> {
        self.children[king_step_code(step)]
    }
    /// In king step code order
    pub fn children(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.children.iter().flatten().copied()
    }
    pub fn num_children(&self) -> usize {
        self.children().count()
    }
    /// Keys of the ray targets whose ray passes through this node.  Only filled in by dense tries.
    pub fn dependents(&self) -> &[OffsetKey] {
        &self.dependents
    }
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Descent {
    Existing(NodeIndex),
    Created(NodeIndex),
}

impl Descent {
    pub fn node(&self) -> NodeIndex {
        match *self {
            Descent::Existing(node) | Descent::Created(node) => node,
        }
    }
}

/// Arena of [`TrieNode`]s.  Every ray inserted starts at the root, which sits at `STEP_ZERO`.
///
/// Nodes are only ever added, so a `NodeIndex` stays valid for the life of the trie.
#[derive(Debug, Clone)]
pub struct RayTrie {
    nodes: Vec<TrieNode>,
}

impl Default for RayTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl RayTrie {
    pub fn new() -> Self {
        RayTrie {
            nodes: vec![TrieNode::new(STEP_ZERO, None)],
        }
    }
    pub fn root(&self) -> NodeIndex {
        NodeIndex::ROOT
    }
    pub fn node(&self, index: NodeIndex) -> &TrieNode {
        &self.nodes[index.index()]
    }
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        // always has a root
        false
    }
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &TrieNode)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeIndex(i as u32), node))
    }

    pub fn child_or_insert(&mut self, parent: NodeIndex, step: WorldStep) -> Descent {
        assert!(
            is_king_step(step),
            "rays grow one king step at a time, not {}",
            vector2_to_string(step)
        );
        let code = king_step_code(step);
        if let Some(existing) = self.nodes[parent.index()].children[code] {
            return Descent::Existing(existing);
        }
        let new_index = NodeIndex(self.nodes.len() as u32);
        let relative_square = self.node(parent).relative_square + step;
        self.nodes.push(TrieNode::new(relative_square, Some(parent)));
        self.nodes[parent.index()].children[code] = Some(new_index);
        Descent::Created(new_index)
    }

    pub fn add_dependent(&mut self, node: NodeIndex, target: OffsetKey) {
        self.nodes[node.index()].dependents.push(target);
    }

    /// From `start` up to and including the root
    pub fn ancestors(&self, start: NodeIndex) -> Ancestors<'_> {
        Ancestors {
            trie: self,
            next: Some(start),
        }
    }

    pub fn depth(&self, node: NodeIndex) -> usize {
        self.ancestors(node).count() - 1
    }

    /// Depth first, parents before children, children in king step code order.
    ///
    /// `should_stop` returning true for a node skips that node's subtree.
    pub fn pre_order(&self, mut should_stop: impl FnMut(NodeIndex, &TrieNode) -> bool) {
        let mut stack = vec![self.root()];
        while let Some(index) = stack.pop() {
            let node = self.node(index);
            if should_stop(index, node) {
                continue;
            }
            stack.extend(node.children.iter().rev().flatten());
        }
    }
}

pub struct Ancestors<'a> {
    trie: &'a RayTrie,
    next: Option<NodeIndex>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = (NodeIndex, &'a TrieNode);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next?;
        let node = self.trie.node(index);
        self.next = node.parent;
        Some((index, node))
    }
}

/// Walks one ray into a [`RayTrie`], square by square, from the root outwards.
#[derive(Debug, Copy, Clone, CopyGetters)]
#[get_copy = "pub"]
pub struct RayCursor {
    square: WorldStep,
    node: NodeIndex,
}

impl RayCursor {
    pub fn at_root(trie: &RayTrie) -> Self {
        RayCursor {
            square: trie.node(trie.root()).relative_square(),
            node: trie.root(),
        }
    }

    /// `None` if `next_square` is where the cursor already is.
    pub fn step_to(&mut self, trie: &mut RayTrie, next_square: WorldStep) -> Option<Descent> {
        let step = next_square - self.square;
        if step == STEP_ZERO {
            return None;
        }
        let descent = trie.child_or_insert(self.node, step);
        self.square = next_square;
        self.node = descent.node();
        Some(descent)
    }
}

/// Shape of a built trie, mostly for logs and benchmarks.
#[derive(Debug, Copy, Clone, PartialEq, CopyGetters)]
#[get_copy = "pub"]
pub struct TrieStats {
    radius: u32,
    node_count: usize,
    distinct_squares: usize,
    position_index_entries: usize,
}

impl TrieStats {
    pub fn new(radius: u32, trie: &RayTrie, position_index_entries: usize) -> Self {
        let distinct_squares = trie
            .nodes()
            .map(|(_, node)| node.relative_square())
            .collect::<StepSet>()
            .len();
        TrieStats {
            radius,
            node_count: trie.len(),
            distinct_squares,
            position_index_entries,
        }
    }

    /// How many times a square shows up in the trie, on average.  1.0 means no duplicated squares.
    pub fn nodes_per_square(&self) -> f64 {
        self.node_count as f64 / self.distinct_squares as f64
    }
}
