use log::{debug, trace};

use utility::*;

use crate::offset_key::OffsetKeyCodec;
use crate::position_index::PositionIndex;
use crate::ray_trie::{Descent, RayCursor, RayTrie, TrieStats};
use crate::visibility_index::{TrieStrategy, VisibilityIndex};

/// Rays only to the edge of the bounding square, clipped to the sight circle.
///
/// Squares inside the circle are reached on the way out, sometimes by several rays with
/// different prefixes.  The position index remembers every node on each square, and line of
/// sight tries them in order until one has a clear path back to the viewer.
///
/// Relies on every square in the circle lying on at least one boundary ray, which holds for
/// `SymmetricLine`.
#[derive(Debug, Clone)]
pub struct SparseVisibilityTrie {
    codec: OffsetKeyCodec,
    trie: RayTrie,
    position_index: PositionIndex,
}

impl SparseVisibilityTrie {
    pub fn new(radius: u32) -> Self {
        let codec = OffsetKeyCodec::new(radius);
        let trie = RayTrie::new();
        let mut position_index = PositionIndex::new(&codec);
        position_index.register(codec.key(STEP_ZERO), trie.root());

        let mut sparse = SparseVisibilityTrie {
            codec,
            trie,
            position_index,
        };
        for target in codec.boundary_targets() {
            sparse.add_ray(target);
        }
        debug!("built sparse sight trie: {:?}", sparse.stats());
        sparse
    }

    fn add_ray(&mut self, target: WorldStep) {
        let mut cursor = RayCursor::at_root(&self.trie);
        let mut created = 0;
        for square in SymmetricLine::new(point2(0, 0), target.to_point()) {
            let step = square.to_vector();
            if !self.codec.is_within_radius(step) {
                continue;
            }
            if let Some(Descent::Created(node)) = cursor.step_to(&mut self.trie, step) {
                self.position_index.register(self.codec.key(step), node);
                created += 1;
            }
        }
        trace!(
            "sparse ray to {} added {} nodes",
            vector2_to_string(target),
            created
        );
    }

    pub fn trie(&self) -> &RayTrie {
        &self.trie
    }

    pub fn codec(&self) -> &OffsetKeyCodec {
        &self.codec
    }

    pub fn position_index(&self) -> &PositionIndex {
        &self.position_index
    }
}

impl VisibilityIndex for SparseVisibilityTrie {
    fn radius(&self) -> u32 {
        self.codec.radius()
    }

    fn strategy(&self) -> TrieStrategy {
        TrieStrategy::Sparse
    }

    fn stats(&self) -> TrieStats {
        TrieStats::new(self.radius(), &self.trie, self.position_index.num_entries())
    }

    fn field_of_view(
        &self,
        origin: WorldSquare,
        mut is_blocked: impl FnMut(WorldSquare) -> bool,
        mut on_visible: impl FnMut(WorldSquare),
    ) {
        // several nodes can share a square
        let mut already_seen = vec![false; self.codec.num_keys()];

        self.trie.pre_order(|_, node| {
            let square = origin + node.relative_square();
            let seen = &mut already_seen[self.codec.key(node.relative_square()).index()];
            if !*seen {
                *seen = true;
                on_visible(square);
            }
            !node.is_root() && is_blocked(square)
        });
    }

    fn line_of_sight_with_trace(
        &self,
        a: WorldSquare,
        b: WorldSquare,
        mut is_blocked: impl FnMut(WorldSquare) -> bool,
        mut trace_out: impl FnMut(WorldSquare),
    ) -> bool {
        let Some(step) = self.codec.step_in_range(a, b) else {
            return false;
        };

        let clear_candidate = self
            .position_index
            .lookup(self.codec.key(step))
            .iter()
            .copied()
            .find(|&candidate| {
                self.trie
                    .ancestors(candidate)
                    .filter(|(_, node)| !node.is_root())
                    .all(|(_, node)| !is_blocked(a + node.relative_square()))
            });

        let Some(found) = clear_candidate else {
            return false;
        };
        self.trie
            .ancestors(found)
            .for_each(|(_, node)| trace_out(a + node.relative_square()));
        true
    }
}
