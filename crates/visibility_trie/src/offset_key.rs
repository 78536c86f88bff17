use derive_more::{Display, Into};
use getset::CopyGetters;
use itertools::Itertools;

use utility::*;

/// A relative square packed into one index into the `(2r+1)²` bounding square of a sight radius.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Into)]
pub struct OffsetKey(usize);

impl OffsetKey {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Converts between relative squares and [`OffsetKey`]s for one fixed radius.
///
/// `key = (r + dx) + stride * (r + dy)`, `stride = 2r + 1`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, CopyGetters)]
#[get_copy = "pub"]
pub struct OffsetKeyCodec {
    radius: u32,
    stride: u32,
}

impl OffsetKeyCodec {
    pub fn new(radius: u32) -> Self {
        assert!(radius > 0, "sight radius must be positive");
        OffsetKeyCodec {
            radius,
            stride: 2 * radius + 1,
        }
    }

    pub fn num_keys(&self) -> usize {
        (self.stride as usize).pow(2)
    }

    pub fn is_within_radius(&self, step: WorldStep) -> bool {
        is_within_radius(step, self.radius)
    }

    /// The step from `from` to `to`, if it is inside the sight circle.
    pub fn step_in_range(&self, from: WorldSquare, to: WorldSquare) -> Option<WorldStep> {
        checked_step_between(from, to).filter(|&step| self.is_within_radius(step))
    }

    pub fn is_in_bounding_square(&self, step: WorldStep) -> bool {
        king_distance(step) <= self.radius
    }

    pub fn key(&self, step: WorldStep) -> OffsetKey {
        assert!(
            self.is_in_bounding_square(step),
            "{} is outside the bounding square of radius {}",
            vector2_to_string(step),
            self.radius
        );
        let r = self.radius as i32;
        let stride = self.stride as i32;
        OffsetKey(((r + step.x) + stride * (r + step.y)) as usize)
    }

    pub fn step(&self, key: OffsetKey) -> WorldStep {
        assert!(key.index() < self.num_keys(), "key {} out of range", key);
        let r = self.radius as i32;
        let stride = self.stride as usize;
        vec2(
            (key.index() % stride) as i32 - r,
            (key.index() / stride) as i32 - r,
        )
    }

    /// Every step inside the sight circle, scanning the bounding square row by row.
    pub fn steps_within_radius(&self) -> impl Iterator<Item = WorldStep> + '_ {
        let r = self.radius as i32;
        (-r..=r)
            .cartesian_product(-r..=r)
            .map(|(dy, dx)| vec2(dx, dy))
            .filter(move |&step| self.is_within_radius(step))
    }

    /// The far ends of the rays a sparse trie is made of: every square on the edge of the bounding square.
    ///
    /// Corners show up twice, which costs nothing since the second ray finds its whole path already in the trie.
    pub fn boundary_targets(&self) -> StepList {
        let r = self.radius as i32;
        (-r..=r)
            .flat_map(|i| [vec2(-r, i), vec2(r, i), vec2(i, -r), vec2(i, r)])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use ntest::assert_false;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_key_layout() {
        let codec = OffsetKeyCodec::new(2);
        assert_eq!(codec.stride(), 5);
        assert_eq!(codec.num_keys(), 25);
        assert_eq!(codec.key(vec2(-2, -2)).index(), 0);
        assert_eq!(codec.key(STEP_ZERO).index(), 12);
        assert_eq!(codec.key(vec2(2, 2)).index(), 24);
        assert_eq!(codec.key(vec2(1, -2)).index(), 3);
    }

    #[test]
    fn test_keys_are_a_bijection_on_the_bounding_square() {
        let codec = OffsetKeyCodec::new(4);
        let keys = (0..codec.num_keys())
            .map(|i| codec.key(codec.step(OffsetKey(i))))
            .map(|key| key.index())
            .collect_vec();
        assert_eq!(keys, (0..codec.num_keys()).collect_vec());
    }

    #[test]
    #[should_panic]
    fn test_zero_radius_is_rejected() {
        OffsetKeyCodec::new(0);
    }

    #[test]
    #[should_panic]
    fn test_key_outside_bounding_square_panics() {
        OffsetKeyCodec::new(2).key(vec2(3, 0));
    }

    #[test]
    fn test_steps_within_radius() {
        let codec = OffsetKeyCodec::new(2);
        let steps = codec.steps_within_radius().collect_vec();
        assert_eq!(steps.len(), 13);
        assert_eq!(steps.first(), Some(&vec2(0, -2)));
        assert_eq!(steps.last(), Some(&vec2(0, 2)));
        assert_false!(steps.contains(&vec2(2, 1)));
        assert!(steps.contains(&vec2(1, 1)));
    }

    #[test]
    fn test_step_in_range() {
        let codec = OffsetKeyCodec::new(3);
        assert_eq!(codec.step_in_range(point2(5, 5), point2(7, 3)), Some(vec2(2, -2)));
        assert_eq!(codec.step_in_range(point2(5, 5), point2(8, 6)), None);
        assert_eq!(codec.step_in_range(point2(0, 0), point2(46341, 0)), None);
        assert_eq!(codec.step_in_range(point2(i32::MIN, 0), point2(i32::MAX, 0)), None);
    }

    #[test]
    fn test_boundary_targets() {
        let codec = OffsetKeyCodec::new(3);
        let targets = codec.boundary_targets();
        assert_eq!(targets.len(), 4 * 7);
        assert_eq!(&targets[..4], &[vec2(-3, -3), vec2(3, -3), vec2(-3, -3), vec2(-3, 3)]);
        assert!(targets.iter().all(|&step| king_distance(step) == 3));
        assert_eq!(targets.iter().unique().count(), 4 * 6);
    }
}
