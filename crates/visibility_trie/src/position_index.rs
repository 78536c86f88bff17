use crate::offset_key::{OffsetKey, OffsetKeyCodec};
use crate::ray_trie::NodeIndex;

/// For each relative square, the trie nodes that sit on it, in the order they were created.
///
/// Different rays can reach the same square through different prefixes, so one key can have several nodes.
#[derive(Debug, Clone)]
pub struct PositionIndex {
    nodes_by_key: Vec<Vec<NodeIndex>>,
}

impl PositionIndex {
    pub fn new(codec: &OffsetKeyCodec) -> Self {
        PositionIndex {
            nodes_by_key: vec![vec![]; codec.num_keys()],
        }
    }

    pub(crate) fn register(&mut self, key: OffsetKey, node: NodeIndex) {
        self.nodes_by_key[key.index()].push(node);
    }

    pub fn lookup(&self, key: OffsetKey) -> &[NodeIndex] {
        self.nodes_by_key
            .get(key.index())
            .map(|nodes| nodes.as_slice())
            .unwrap_or(&[])
    }

    pub fn num_entries(&self) -> usize {
        self.nodes_by_key.iter().map(|nodes| nodes.len()).sum()
    }
}
