use log::{debug, trace};

use utility::*;

use crate::offset_key::{OffsetKey, OffsetKeyCodec};
use crate::ray_trie::{RayCursor, RayTrie, TrieStats};
use crate::visibility_index::{TrieStrategy, VisibilityIndex};

/// One precomputed ray for every square in the sight circle, all merged into one trie.
///
/// Each node remembers which ray targets pass through it, so a single blocking node can
/// shadow every target behind it without walking the rest of its subtree.
/// Visibility is exactly "the ray to this square is clear", which makes it symmetric.
#[derive(Debug, Clone)]
pub struct DenseVisibilityTrie {
    codec: OffsetKeyCodec,
    trie: RayTrie,
    targets: Vec<OffsetKey>,
}

impl DenseVisibilityTrie {
    pub fn new(radius: u32) -> Self {
        let codec = OffsetKeyCodec::new(radius);
        let mut dense = DenseVisibilityTrie {
            codec,
            trie: RayTrie::new(),
            targets: vec![],
        };
        for target in codec.steps_within_radius() {
            dense.add_ray(target);
        }
        debug!("built dense sight trie: {:?}", dense.stats());
        dense
    }

    fn add_ray(&mut self, target: WorldStep) {
        let target_key = self.codec.key(target);
        self.targets.push(target_key);

        let mut cursor = RayCursor::at_root(&self.trie);
        self.trie.add_dependent(cursor.node(), target_key);

        for square in SymmetricLine::new(point2(0, 0), target.to_point()) {
            if let Some(descent) = cursor.step_to(&mut self.trie, square.to_vector()) {
                self.trie.add_dependent(descent.node(), target_key);
            }
        }
        trace!(
            "dense ray to {} ends at depth {}",
            vector2_to_string(target),
            self.trie.depth(cursor.node())
        );
    }

    pub fn trie(&self) -> &RayTrie {
        &self.trie
    }

    pub fn codec(&self) -> &OffsetKeyCodec {
        &self.codec
    }

    /// Every square that has its own ray, in construction order
    pub fn targets(&self) -> &[OffsetKey] {
        &self.targets
    }
}

impl VisibilityIndex for DenseVisibilityTrie {
    fn radius(&self) -> u32 {
        self.codec.radius()
    }

    fn strategy(&self) -> TrieStrategy {
        TrieStrategy::Dense
    }

    fn stats(&self) -> TrieStats {
        TrieStats::new(self.radius(), &self.trie, 0)
    }

    fn field_of_view(
        &self,
        origin: WorldSquare,
        mut is_blocked: impl FnMut(WorldSquare) -> bool,
        mut on_visible: impl FnMut(WorldSquare),
    ) {
        let mut shadowed = vec![false; self.codec.num_keys()];

        self.trie.pre_order(|_, node| {
            if node.is_root() {
                return false;
            }
            let blocking = is_blocked(origin + node.relative_square());
            if blocking {
                // walls are seen, not seen through
                let own_key = self.codec.key(node.relative_square());
                node.dependents()
                    .iter()
                    .filter(|&&target| target != own_key)
                    .for_each(|target| shadowed[target.index()] = true);
            }
            blocking
        });

        self.targets
            .iter()
            .filter(|target| !shadowed[target.index()])
            .for_each(|&target| on_visible(origin + self.codec.step(target)));
    }

    fn line_of_sight_with_trace(
        &self,
        a: WorldSquare,
        b: WorldSquare,
        mut is_blocked: impl FnMut(WorldSquare) -> bool,
        mut trace_out: impl FnMut(WorldSquare),
    ) -> bool {
        if self.codec.step_in_range(a, b).is_none() {
            return false;
        }

        // Same squares as the ray from a, by symmetry, but already in trace order
        let path = symmetric_line(b, a);
        debug_assert_eq!(path.last(), Some(&a));

        let without_viewer = &path[..path.len() - 1];
        if without_viewer.iter().any(|&square| is_blocked(square)) {
            return false;
        }
        path.iter().for_each(|&square| trace_out(square));
        true
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use ntest::{assert_false, timeout};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_one_target_per_square_in_circle() {
        let dense = DenseVisibilityTrie::new(3);
        assert_eq!(dense.targets().len(), 29);
        assert_eq!(
            dense.targets().iter().unique().count(),
            dense.targets().len()
        );
        let root = dense.trie().node(dense.trie().root());
        assert_eq!(root.dependents().len(), dense.targets().len());
    }

    #[test]
    fn test_no_node_outside_the_circle() {
        for radius in 1..=12 {
            let dense = DenseVisibilityTrie::new(radius);
            assert!(dense
                .trie()
                .nodes()
                .all(|(_, node)| is_within_radius(node.relative_square(), radius)));
        }
    }

    #[test]
    fn test_every_node_is_on_the_ray_of_each_dependent() {
        let dense = DenseVisibilityTrie::new(5);
        let trie = dense.trie();
        for (index, node) in trie.nodes() {
            let path_from_root = reversed(
                trie.ancestors(index)
                    .map(|(_, n)| n.relative_square().to_point())
                    .collect_vec(),
            );
            for &target in node.dependents() {
                let ray = symmetric_line(point2(0, 0), dense.codec().step(target).to_point());
                assert_eq!(&ray[..path_from_root.len()], &path_from_root[..]);
            }
        }
    }

    #[test]
    fn test_covers_circle_with_some_duplicate_squares() {
        // a ray through a square does not always share a prefix with that square's own ray
        let dense = DenseVisibilityTrie::new(6);
        let stats = dense.stats();
        assert_eq!(stats.distinct_squares(), dense.targets().len());
        assert!(stats.node_count() >= dense.targets().len());
        assert_eq!(stats.position_index_entries(), 0);
    }

    #[test]
    fn test_wall_shadows_squares_behind_it() {
        let dense = DenseVisibilityTrie::new(5);
        let origin = point2(0, 0);
        let wall = point2(2, 0);
        let visible = dense.visible_squares(origin, |square| square == wall);
        assert!(visible.contains(&wall));
        assert!(visible.contains(&point2(1, 0)));
        assert_false!(visible.contains(&point2(3, 0)));
        assert_false!(visible.contains(&point2(5, 0)));
        assert!(visible.contains(&point2(0, 5)));
    }

    #[test]
    fn test_viewer_is_never_asked_about() {
        let dense = DenseVisibilityTrie::new(4);
        let origin = point2(7, 7);
        let mut asked = vec![];
        let visible = dense.visible_squares(origin, |square| {
            asked.push(square);
            false
        });
        assert_false!(asked.contains(&origin));
        assert!(visible.contains(&origin));
        assert!(dense.line_of_sight(origin, origin, |square| square == origin));
    }

    #[test]
    fn test_line_of_sight_into_a_wall_is_false() {
        let dense = DenseVisibilityTrie::new(5);
        let wall = point2(2, 2);
        assert_false!(dense.line_of_sight(point2(0, 0), wall, |square| square == wall));
        assert!(dense.line_of_sight(point2(0, 0), point2(1, 1), |square| square == wall));
    }

    #[test]
    fn test_failed_line_of_sight_traces_nothing() {
        let dense = DenseVisibilityTrie::new(5);
        let wall = point2(0, 2);
        let mut traced = vec![];
        let visible = dense.line_of_sight_with_trace(
            point2(0, 0),
            point2(0, 4),
            |square| square == wall,
            |square| traced.push(square),
        );
        assert_false!(visible);
        assert!(traced.is_empty());
    }

    #[test]
    fn test_out_of_range_never_asks() {
        let dense = DenseVisibilityTrie::new(3);
        let visible = dense.line_of_sight(point2(0, 0), point2(3, 1), |_| {
            panic!("should not look at the map")
        });
        assert_false!(visible);
    }

    #[test]
    fn test_far_apart_squares_are_out_of_range() {
        let dense = DenseVisibilityTrie::new(5);
        let mut traced = vec![];
        let visible = dense.line_of_sight_with_trace(
            point2(0, 0),
            point2(46341, 0),
            |_| panic!("should not look at the map"),
            |square| traced.push(square),
        );
        assert_false!(visible);
        assert!(traced.is_empty());
        assert_false!(dense.line_of_sight(point2(i32::MIN, 0), point2(i32::MAX, 0), |_| {
            panic!("should not look at the map")
        }));
    }

    #[test]
    #[timeout(10000)]
    fn test_large_radius_builds() {
        let dense = DenseVisibilityTrie::new(40);
        assert!(dense.trie().len() > 4000);
    }
}
