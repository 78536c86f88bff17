use strum_macros::{Display, EnumIter, EnumString};

use utility::*;

use crate::dense_trie::DenseVisibilityTrie;
use crate::ray_trie::TrieStats;
use crate::sparse_trie::SparseVisibilityTrie;

/// How the rays of a sight trie are chosen.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Default, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum TrieStrategy {
    /// One ray per square in the sight circle.  Fully symmetric: A sees B iff B sees A.
    #[default]
    Dense,
    /// Only rays to the edge of the bounding square, plus an index for line of sight lookups.
    /// Fewer nodes, but a square counts as visible if any ray reaching it is clear.
    Sparse,
}

/// Precomputed field of view and line of sight for one fixed sight radius.
///
/// `is_blocked` is asked about world squares and should not change its mind during one query.
/// The viewer's own square is never asked about.
pub trait VisibilityIndex {
    fn radius(&self) -> u32;
    fn strategy(&self) -> TrieStrategy;
    fn stats(&self) -> TrieStats;

    /// Calls `on_visible` once for every square visible from `origin`, in trie order.
    ///
    /// Blocking squares are visible themselves, but hide whatever is behind them.
    fn field_of_view(
        &self,
        origin: WorldSquare,
        is_blocked: impl FnMut(WorldSquare) -> bool,
        on_visible: impl FnMut(WorldSquare),
    );

    /// If `b` is visible from `a`, feeds the sight path to `trace_out`, from `b` back to `a`.
    ///
    /// Unlike in a field of view, a blocking `b` is not in line of sight.
    fn line_of_sight_with_trace(
        &self,
        a: WorldSquare,
        b: WorldSquare,
        is_blocked: impl FnMut(WorldSquare) -> bool,
        trace_out: impl FnMut(WorldSquare),
    ) -> bool;

    fn line_of_sight(
        &self,
        a: WorldSquare,
        b: WorldSquare,
        is_blocked: impl FnMut(WorldSquare) -> bool,
    ) -> bool {
        self.line_of_sight_with_trace(a, b, is_blocked, |_| {})
    }

    fn sight_path(
        &self,
        a: WorldSquare,
        b: WorldSquare,
        is_blocked: impl FnMut(WorldSquare) -> bool,
    ) -> Option<SquareList> {
        let mut path = vec![];
        let visible = self.line_of_sight_with_trace(a, b, is_blocked, |square| path.push(square));
        visible.then_some(path)
    }

    fn visible_squares(
        &self,
        origin: WorldSquare,
        is_blocked: impl FnMut(WorldSquare) -> bool,
    ) -> SquareSet {
        let mut visible = SquareSet::new();
        self.field_of_view(origin, is_blocked, |square| {
            visible.insert(square);
        });
        visible
    }
}

/// A sight trie of either strategy, picked at build time.
#[derive(Debug, Clone)]
pub enum PrecomputedVisibility {
    Dense(DenseVisibilityTrie),
    Sparse(SparseVisibilityTrie),
}

impl PrecomputedVisibility {
    pub fn build(radius: u32, strategy: TrieStrategy) -> Self {
        match strategy {
            TrieStrategy::Dense => Self::Dense(DenseVisibilityTrie::new(radius)),
            TrieStrategy::Sparse => Self::Sparse(SparseVisibilityTrie::new(radius)),
        }
    }
}

impl VisibilityIndex for PrecomputedVisibility {
    fn radius(&self) -> u32 {
        match self {
            Self::Dense(trie) => trie.radius(),
            Self::Sparse(trie) => trie.radius(),
        }
    }

    fn strategy(&self) -> TrieStrategy {
        match self {
            Self::Dense(trie) => trie.strategy(),
            Self::Sparse(trie) => trie.strategy(),
        }
    }

    fn stats(&self) -> TrieStats {
        match self {
            Self::Dense(trie) => trie.stats(),
            Self::Sparse(trie) => trie.stats(),
        }
    }

    fn field_of_view(
        &self,
        origin: WorldSquare,
        is_blocked: impl FnMut(WorldSquare) -> bool,
        on_visible: impl FnMut(WorldSquare),
    ) {
        match self {
            Self::Dense(trie) => trie.field_of_view(origin, is_blocked, on_visible),
            Self::Sparse(trie) => trie.field_of_view(origin, is_blocked, on_visible),
        }
    }

    fn line_of_sight_with_trace(
        &self,
        a: WorldSquare,
        b: WorldSquare,
        is_blocked: impl FnMut(WorldSquare) -> bool,
        trace_out: impl FnMut(WorldSquare),
    ) -> bool {
        match self {
            Self::Dense(trie) => trie.line_of_sight_with_trace(a, b, is_blocked, trace_out),
            Self::Sparse(trie) => trie.line_of_sight_with_trace(a, b, is_blocked, trace_out),
        }
    }
}
